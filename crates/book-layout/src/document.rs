//! Composed document state and the editor that drives it
//!
//! `BookEditor` owns the manuscript, the undo history of
//! `(configuration, pages)` snapshots, the live snapshot shown on screen,
//! canvas state and the spread cursor. Every finished edit is pushed into
//! the history; drag and resize sessions only push when released.

use crate::canvas::{self, CanvasState, ContainerSize, Geometry, PointerPos, Selection, SessionKind};
use crate::config::templates::Template;
use crate::config::*;
use crate::constants::NUDGE_STEP;
use crate::design::{DesignProposal, MergeReport, MergeSelection, merge_design};
use crate::history::History;
use crate::page::{self, Page, PageRole};
use crate::pagination::{self, Manuscript};
use crate::spread::{Spread, SpreadNavigator, SpreadSlot};
use crate::stats::{DocumentStatistics, calculate_statistics};
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One immutable value of the composed document
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Snapshot {
    pub config: LayoutConfiguration,
    pub pages: Vec<Page>,
}

impl Snapshot {
    pub fn new(config: LayoutConfiguration, pages: Vec<Page>) -> Self {
        Self { config, pages }
    }

    /// Serialize for the persistence collaborator
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: Self = serde_json::from_str(json)?;
        snapshot.config.validate()?;
        Ok(snapshot.normalized())
    }

    /// Pull every placement back inside its page
    pub fn normalized(mut self) -> Self {
        for image in self.pages.iter_mut().flat_map(|p| p.images.iter_mut()) {
            image.geometry = image.geometry.normalized();
        }
        self
    }
}

/// Everything a presentation layer needs to draw one page
#[derive(Debug, Clone, PartialEq)]
pub struct PageView<'a> {
    pub index: usize,
    /// Printed page number (honours the numbering start)
    pub page_number: usize,
    pub page: &'a Page,
    pub config: &'a LayoutConfiguration,
    pub header: Option<ResolvedBand>,
    pub footer: Option<ResolvedBand>,
    pub page_number_label: Option<PageNumberLabel>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageNumberLabel {
    pub text: String,
    pub edge: Edge,
    pub alignment: Alignment,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SpreadView<'a> {
    Cover {
        title: &'a str,
        author: Option<&'a str>,
        cover: &'a CoverDesign,
    },
    Pages {
        /// `None` is an explicit empty page
        left: Option<PageView<'a>>,
        right: Option<PageView<'a>>,
    },
}

pub fn page_view<'a>(
    snapshot: &'a Snapshot,
    book_title: &str,
    index: usize,
) -> Option<PageView<'a>> {
    let page = snapshot.pages.get(index)?;
    let config = &snapshot.config;
    let page_number = config.page_numbers.start + index;
    let header = config
        .header
        .resolve(Edge::Top, page_number, book_title, config.is_rtl);
    let footer = config
        .footer
        .resolve(Edge::Bottom, page_number, book_title, config.is_rtl);
    let page_number_label = config.page_numbers.show.then(|| PageNumberLabel {
        text: page_number.to_string(),
        edge: config.page_numbers.position.edge(),
        alignment: config
            .page_numbers
            .position
            .alignment(page_number, config.is_rtl),
    });
    Some(PageView {
        index,
        page_number,
        page,
        config,
        header,
        footer,
        page_number_label,
    })
}

#[derive(Debug, Clone)]
pub struct BookEditor {
    manuscript: Manuscript,
    history: History<Snapshot>,
    live: Snapshot,
    canvas: CanvasState,
    navigator: SpreadNavigator,
    revision: u64,
}

impl BookEditor {
    /// Paginate `manuscript` under `config` and start a clean session
    pub fn new(manuscript: Manuscript, config: LayoutConfiguration) -> Self {
        let pages = pagination::generate(&manuscript, config.flags);
        Self::from_snapshot(manuscript, Snapshot::new(config, pages))
    }

    /// Resume from a persisted snapshot; the session starts clean.
    ///
    /// Placements are pulled back inside their pages. When the chapter pages
    /// do not match the manuscript, the pages are regenerated and keep the
    /// images of pages whose role still exists.
    pub fn from_snapshot(manuscript: Manuscript, snapshot: Snapshot) -> Self {
        let mut snapshot = snapshot.normalized();
        if !pagination::matches_manuscript(&snapshot.pages, &manuscript) {
            log::warn!(
                "Saved pages do not match the {} chapters of \"{}\", regenerating",
                manuscript.chapters.len(),
                manuscript.title
            );
            snapshot.pages =
                pagination::regenerate(&snapshot.pages, &manuscript, snapshot.config.flags);
        }
        let navigator = SpreadNavigator::new(snapshot.pages.len(), snapshot.config.is_rtl);
        Self {
            manuscript,
            history: History::new(snapshot.clone()),
            live: snapshot,
            canvas: CanvasState::new(),
            navigator,
            revision: 0,
        }
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history = History::with_limit(self.history.current().clone(), limit);
        self
    }

    // ---------------------------------------------------------------------
    // State access
    // ---------------------------------------------------------------------

    pub fn manuscript(&self) -> &Manuscript {
        &self.manuscript
    }

    /// Live snapshot, including an in-progress drag or resize
    pub fn snapshot(&self) -> &Snapshot {
        &self.live
    }

    /// Last snapshot recorded in the history
    pub fn committed_snapshot(&self) -> &Snapshot {
        self.history.current()
    }

    pub fn config(&self) -> &LayoutConfiguration {
        &self.live.config
    }

    pub fn pages(&self) -> &[Page] {
        &self.live.pages
    }

    pub fn page(&self, index: usize) -> Option<&Page> {
        self.live.pages.get(index)
    }

    pub fn history(&self) -> &History<Snapshot> {
        &self.history
    }

    /// Bumped on every recorded change; observers use it to detect edits
    pub fn revision(&self) -> u64 {
        self.revision
    }

    // ---------------------------------------------------------------------
    // History
    // ---------------------------------------------------------------------

    /// Push the live snapshot if it differs from the recorded one
    fn record(&mut self) {
        if self.live == *self.history.current() {
            return;
        }
        self.history.push(self.live.clone());
        self.revision += 1;
        self.after_change();
    }

    fn after_change(&mut self) {
        self.navigator.set_page_count(self.live.pages.len());
        self.navigator.set_rtl(self.live.config.is_rtl);
        self.canvas.retain_valid(&self.live.pages);
    }

    fn finish_session(&mut self) {
        if let Some(outcome) = self.canvas.release(&mut self.live.pages, None) {
            log::debug!(
                "{:?} on {} ended at {:?}",
                outcome.kind,
                outcome.placement_id,
                outcome.after
            );
        }
        self.record();
    }

    pub fn undo(&mut self) -> bool {
        self.finish_session();
        if !self.history.undo() {
            return false;
        }
        self.live = self.history.current().clone();
        self.revision += 1;
        self.after_change();
        true
    }

    pub fn redo(&mut self) -> bool {
        self.finish_session();
        if !self.history.redo() {
            return false;
        }
        self.live = self.history.current().clone();
        self.revision += 1;
        self.after_change();
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn is_dirty(&self) -> bool {
        self.history.is_dirty()
    }

    /// Mark the committed snapshot as saved
    pub fn commit(&mut self) {
        self.history.commit();
    }

    // ---------------------------------------------------------------------
    // Configuration
    // ---------------------------------------------------------------------

    /// Replace the configuration, regenerating pages if structural flags
    /// changed
    pub fn set_config(&mut self, config: LayoutConfiguration) {
        self.finish_session();
        let flags_changed = config.flags != self.live.config.flags;
        self.live.config = config;
        if flags_changed {
            self.live.pages =
                pagination::regenerate(&self.live.pages, &self.manuscript, self.live.config.flags);
            self.canvas.reset();
        }
        self.record();
    }

    fn update_config(&mut self, f: impl FnOnce(&LayoutConfiguration) -> LayoutConfiguration) {
        let next = f(&self.live.config);
        self.set_config(next);
    }

    pub fn set_columns(&mut self, columns: u8) {
        self.update_config(|c| c.with_columns(columns));
    }

    pub fn set_column_gap(&mut self, gap_mm: f32) {
        self.update_config(|c| c.with_column_gap(gap_mm));
    }

    pub fn set_split_type(&mut self, split_type: SplitType) {
        self.update_config(|c| c.with_split_type(split_type));
    }

    pub fn set_split_ratio(&mut self, first: f32) {
        self.update_config(|c| c.with_split_ratio(first));
    }

    pub fn set_background(&mut self, background: Background) {
        self.update_config(|c| c.with_background(background));
    }

    pub fn set_background_kind(&mut self, kind: BackgroundKind) {
        self.update_config(|c| c.with_background(c.background.with_kind(kind)));
    }

    pub fn set_margins(&mut self, margins: PageMargins) {
        self.update_config(|c| c.with_margins(margins));
    }

    pub fn set_typography(&mut self, typography: Typography) {
        self.update_config(|c| c.with_typography(typography));
    }

    pub fn set_header(&mut self, header: HeaderFooter) {
        self.update_config(|c| c.with_header(header));
    }

    pub fn set_footer(&mut self, footer: HeaderFooter) {
        self.update_config(|c| c.with_footer(footer));
    }

    pub fn set_rtl(&mut self, is_rtl: bool) {
        self.update_config(|c| c.with_rtl(is_rtl));
    }

    pub fn set_page_numbers(&mut self, page_numbers: PageNumbering) {
        self.update_config(|c| c.with_page_numbers(page_numbers));
    }

    pub fn set_table_of_contents(&mut self, enabled: bool) {
        self.update_config(|c| {
            c.with_flags(PaginationFlags {
                include_table_of_contents: enabled,
                ..c.flags
            })
        });
    }

    pub fn set_back_cover(&mut self, enabled: bool) {
        self.update_config(|c| {
            c.with_flags(PaginationFlags {
                include_back_cover: enabled,
                ..c.flags
            })
        });
    }

    pub fn toggle_table_of_contents(&mut self) {
        let enabled = !self.live.config.flags.include_table_of_contents;
        self.set_table_of_contents(enabled);
    }

    pub fn toggle_back_cover(&mut self) {
        let enabled = !self.live.config.flags.include_back_cover;
        self.set_back_cover(enabled);
    }

    pub fn set_title_page(&mut self, enabled: bool) {
        self.update_config(|c| {
            c.with_flags(PaginationFlags {
                include_title_page: enabled,
                ..c.flags
            })
        });
    }

    /// Restyle the pages with a named template
    pub fn apply_template(&mut self, name: &str) -> Result<()> {
        let template = Template::from_name(name)?;
        log::info!("Applying template {}", template.name());
        // Templates restyle pages; structure and cover stay as the user set them
        let config = LayoutConfiguration {
            flags: self.live.config.flags,
            cover: self.live.config.cover.clone(),
            ..template.configuration()
        };
        self.set_config(config);
        Ok(())
    }

    /// Go back to the default configuration as an undoable edit
    pub fn reset_configuration(&mut self) {
        self.set_config(LayoutConfiguration::default());
    }

    /// Merge the chosen sections of a design proposal as one undoable edit.
    /// Nothing is recorded when no section applied.
    pub fn apply_design(&mut self, proposal: &DesignProposal, selection: MergeSelection) -> MergeReport {
        self.finish_session();
        let (config, pages, report) =
            merge_design(&self.live.config, &self.live.pages, proposal, selection);
        if report.changed_anything() {
            self.live.config = config;
            self.live.pages = pages;
            self.record();
        }
        report
    }

    // ---------------------------------------------------------------------
    // Pages
    // ---------------------------------------------------------------------

    /// Replace the manuscript and regenerate pages
    pub fn set_manuscript(&mut self, manuscript: Manuscript) {
        self.finish_session();
        self.manuscript = manuscript;
        self.live.pages =
            pagination::regenerate(&self.live.pages, &self.manuscript, self.live.config.flags);
        self.canvas.reset();
        self.record();
    }

    pub fn insert_blank_page(&mut self, index: usize) -> Result<PageId> {
        self.finish_session();
        let id = page::insert_blank_page(&mut self.live.pages, index)?;
        self.canvas.reset();
        self.record();
        Ok(id)
    }

    pub fn delete_page(&mut self, index: usize) -> Result<()> {
        self.finish_session();
        page::delete_page(&mut self.live.pages, index)?;
        self.canvas.reset();
        self.record();
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Canvas
    // ---------------------------------------------------------------------

    pub fn add_image(&mut self, page_index: usize, source: impl Into<String>) -> Result<PlacementId> {
        self.finish_session();
        let id = canvas::add_image(&mut self.live.pages, page_index, source)?;
        self.record();
        Ok(id)
    }

    pub fn delete_image(&mut self, page_index: usize, id: PlacementId) -> Result<()> {
        self.finish_session();
        canvas::delete_image(&mut self.live.pages, page_index, id)?;
        self.canvas.forget_image(page_index, id);
        self.record();
        Ok(())
    }

    pub fn rotate_image(&mut self, page_index: usize, id: PlacementId, degrees: f32) -> Result<()> {
        self.finish_session();
        canvas::rotate_image(&mut self.live.pages, page_index, id, degrees)?;
        self.record();
        Ok(())
    }

    pub fn nudge_image(&mut self, page_index: usize, id: PlacementId, dx: f32, dy: f32) -> Result<Geometry> {
        self.finish_session();
        let geometry = canvas::nudge_image(&mut self.live.pages, page_index, id, dx, dy)?;
        self.record();
        Ok(geometry)
    }

    /// Place an image at an explicit geometry, pulled back inside the page
    pub fn set_image_geometry(
        &mut self,
        page_index: usize,
        id: PlacementId,
        geometry: Geometry,
    ) -> Result<Geometry> {
        self.finish_session();
        let geometry = canvas::set_image_geometry(&mut self.live.pages, page_index, id, geometry)?;
        self.record();
        Ok(geometry)
    }

    /// Arrow-key nudge of the selected image by whole steps
    pub fn nudge_selection(&mut self, dx_steps: i32, dy_steps: i32) -> Option<Geometry> {
        let selection = self.canvas.selection()?;
        self.nudge_image(
            selection.page_index,
            selection.placement_id,
            dx_steps as f32 * NUDGE_STEP,
            dy_steps as f32 * NUDGE_STEP,
        )
        .ok()
    }

    pub fn set_image_source(
        &mut self,
        page_index: usize,
        id: PlacementId,
        source: impl Into<String>,
    ) -> Result<()> {
        self.finish_session();
        canvas::set_image_source(&mut self.live.pages, page_index, id, source)?;
        self.record();
        Ok(())
    }

    pub fn bring_to_front(&mut self, page_index: usize, id: PlacementId) -> Result<()> {
        self.finish_session();
        canvas::bring_to_front(&mut self.live.pages, page_index, id)?;
        self.record();
        Ok(())
    }

    pub fn select_image(&mut self, page_index: usize, id: PlacementId) -> Result<()> {
        self.canvas.select(&self.live.pages, page_index, id)
    }

    pub fn clear_selection(&mut self) {
        self.canvas.clear_selection();
    }

    pub fn selection(&self) -> Option<Selection> {
        self.canvas.selection()
    }

    pub fn canvas(&self) -> &CanvasState {
        &self.canvas
    }

    fn begin_session(
        &mut self,
        kind: SessionKind,
        page_index: usize,
        id: PlacementId,
        pointer: PointerPos,
        container: ContainerSize,
    ) -> Result<()> {
        // Settle a previous gesture so each one is its own undo step
        self.finish_session();
        self.canvas
            .begin(kind, &mut self.live.pages, page_index, id, pointer, container)?;
        Ok(())
    }

    pub fn begin_drag(
        &mut self,
        page_index: usize,
        id: PlacementId,
        pointer: PointerPos,
        container: ContainerSize,
    ) -> Result<()> {
        self.begin_session(SessionKind::Drag, page_index, id, pointer, container)
    }

    pub fn begin_resize(
        &mut self,
        page_index: usize,
        id: PlacementId,
        pointer: PointerPos,
        container: ContainerSize,
    ) -> Result<()> {
        self.begin_session(SessionKind::Resize, page_index, id, pointer, container)
    }

    /// Feed a pointer move into the active session; `None` when idle
    pub fn pointer_moved(&mut self, pointer: PointerPos) -> Option<Geometry> {
        self.canvas.pointer_moved(&mut self.live.pages, pointer)
    }

    /// End the active session at `pointer` and record it as one edit
    pub fn pointer_released(&mut self, pointer: PointerPos) -> Option<Geometry> {
        let outcome = self.canvas.release(&mut self.live.pages, Some(pointer))?;
        self.record();
        Some(outcome.after)
    }

    /// End any active drag or resize where the pointer last was and record it
    pub fn end_gesture(&mut self) {
        self.finish_session();
    }

    // ---------------------------------------------------------------------
    // Spreads
    // ---------------------------------------------------------------------

    pub fn navigator(&self) -> &SpreadNavigator {
        &self.navigator
    }

    pub fn next_spread(&mut self) -> Spread {
        self.navigator.next()
    }

    pub fn previous_spread(&mut self) -> Spread {
        self.navigator.previous()
    }

    pub fn go_to_spread(&mut self, cursor: isize) -> Spread {
        self.navigator.go_to(cursor)
    }

    pub fn page_view(&self, index: usize) -> Option<PageView<'_>> {
        page_view(&self.live, &self.manuscript.title, index)
    }

    pub fn spread_view(&self, spread: Spread) -> SpreadView<'_> {
        match spread {
            Spread::Cover => SpreadView::Cover {
                title: &self.manuscript.title,
                author: self.manuscript.author.as_deref(),
                cover: &self.live.config.cover,
            },
            Spread::Pages { left, right } => {
                let view = |slot: SpreadSlot| slot.page_index().and_then(|i| self.page_view(i));
                SpreadView::Pages {
                    left: view(left),
                    right: view(right),
                }
            }
        }
    }

    pub fn current_spread(&self) -> SpreadView<'_> {
        self.spread_view(self.navigator.current())
    }

    /// Indices of chapter pages, in order
    pub fn chapter_pages(&self) -> impl Iterator<Item = usize> + '_ {
        self.live
            .pages
            .iter()
            .enumerate()
            .filter(|(_, p)| matches!(p.role, PageRole::ChapterBody { .. }))
            .map(|(i, _)| i)
    }

    pub fn statistics(&self) -> DocumentStatistics {
        calculate_statistics(&self.manuscript, &self.live)
    }
}

mod session;

pub use session::{SessionHandle, session_task, spawn_session};

// Re-export types from the layout crate
pub use book_layout::{
    AutosaveCoordinator, Background, BackgroundKind, BookEditor, ContainerSize, DesignProposal,
    Geometry, HeaderFooter, LayoutConfiguration, Manuscript, MergeReport, MergeSelection,
    PageId, PageMargins, PageNumbering, Persistence, PlacementId, PointerPos, SplitType,
    Typography,
};

/// One undoable change to the document
#[derive(Debug, Clone)]
pub enum Edit {
    SetColumns(u8),
    SetColumnGap(f32),
    SetSplitType(SplitType),
    SetSplitRatio(f32),
    SetBackground(Background),
    SetBackgroundKind(BackgroundKind),
    SetMargins(PageMargins),
    SetTypography(Typography),
    SetHeader(HeaderFooter),
    SetFooter(HeaderFooter),
    SetRtl(bool),
    SetPageNumbers(PageNumbering),
    SetTableOfContents(bool),
    SetBackCover(bool),
    ApplyTemplate(String),
    ResetConfiguration,
    SetManuscript(Manuscript),
    InsertBlankPage {
        index: usize,
    },
    DeletePage {
        index: usize,
    },
    AddImage {
        page_index: usize,
        source: String,
    },
    DeleteImage {
        page_index: usize,
        id: PlacementId,
    },
    RotateImage {
        page_index: usize,
        id: PlacementId,
        degrees: f32,
    },
    NudgeImage {
        page_index: usize,
        id: PlacementId,
        dx: f32,
        dy: f32,
    },
    SetImageGeometry {
        page_index: usize,
        id: PlacementId,
        geometry: Geometry,
    },
    SetImageSource {
        page_index: usize,
        id: PlacementId,
        source: String,
    },
    BringToFront {
        page_index: usize,
        id: PlacementId,
    },
    ApplyDesign {
        proposal: DesignProposal,
        selection: MergeSelection,
    },
}

impl Edit {
    /// Apply to the editor. Some edits produce an update the caller needs,
    /// such as the id of a new image.
    pub fn apply(self, editor: &mut BookEditor) -> book_layout::Result<Option<EditorUpdate>> {
        match self {
            Edit::SetColumns(columns) => editor.set_columns(columns),
            Edit::SetColumnGap(gap_mm) => editor.set_column_gap(gap_mm),
            Edit::SetSplitType(split_type) => editor.set_split_type(split_type),
            Edit::SetSplitRatio(first) => editor.set_split_ratio(first),
            Edit::SetBackground(background) => editor.set_background(background),
            Edit::SetBackgroundKind(kind) => editor.set_background_kind(kind),
            Edit::SetMargins(margins) => editor.set_margins(margins),
            Edit::SetTypography(typography) => editor.set_typography(typography),
            Edit::SetHeader(header) => editor.set_header(header),
            Edit::SetFooter(footer) => editor.set_footer(footer),
            Edit::SetRtl(is_rtl) => editor.set_rtl(is_rtl),
            Edit::SetPageNumbers(page_numbers) => editor.set_page_numbers(page_numbers),
            Edit::SetTableOfContents(enabled) => editor.set_table_of_contents(enabled),
            Edit::SetBackCover(enabled) => editor.set_back_cover(enabled),
            Edit::ApplyTemplate(name) => editor.apply_template(&name)?,
            Edit::ResetConfiguration => editor.reset_configuration(),
            Edit::SetManuscript(manuscript) => editor.set_manuscript(manuscript),
            Edit::InsertBlankPage { index } => {
                let id = editor.insert_blank_page(index)?;
                return Ok(Some(EditorUpdate::PageInserted { index, id }));
            }
            Edit::DeletePage { index } => editor.delete_page(index)?,
            Edit::AddImage { page_index, source } => {
                let id = editor.add_image(page_index, source)?;
                return Ok(Some(EditorUpdate::ImageAdded { page_index, id }));
            }
            Edit::DeleteImage { page_index, id } => editor.delete_image(page_index, id)?,
            Edit::RotateImage {
                page_index,
                id,
                degrees,
            } => editor.rotate_image(page_index, id, degrees)?,
            Edit::NudgeImage {
                page_index,
                id,
                dx,
                dy,
            } => {
                editor.nudge_image(page_index, id, dx, dy)?;
            }
            Edit::SetImageGeometry {
                page_index,
                id,
                geometry,
            } => {
                editor.set_image_geometry(page_index, id, geometry)?;
            }
            Edit::SetImageSource {
                page_index,
                id,
                source,
            } => editor.set_image_source(page_index, id, source)?,
            Edit::BringToFront { page_index, id } => editor.bring_to_front(page_index, id)?,
            Edit::ApplyDesign {
                proposal,
                selection,
            } => {
                let report = editor.apply_design(&proposal, selection);
                return Ok(Some(EditorUpdate::DesignMerged { report }));
            }
        }
        Ok(None)
    }
}

/// Commands sent from the UI to the session task
#[derive(Debug, Clone)]
pub enum EditorCommand {
    Edit(Edit),
    BeginDrag {
        page_index: usize,
        id: PlacementId,
        pointer: PointerPos,
        container: ContainerSize,
    },
    BeginResize {
        page_index: usize,
        id: PlacementId,
        pointer: PointerPos,
        container: ContainerSize,
    },
    /// High-frequency; queued moves are collapsed to the newest
    PointerMoved(PointerPos),
    PointerReleased(PointerPos),
    Undo,
    Redo,
    /// Save now; queued consecutive saves are collapsed into one
    Save,
    /// Save if dirty, then stop the task
    Shutdown,
}

/// Editor flags a UI needs to enable its controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorState {
    pub revision: u64,
    pub dirty: bool,
    pub can_undo: bool,
    pub can_redo: bool,
    pub page_count: usize,
}

impl EditorState {
    pub fn of(editor: &BookEditor) -> Self {
        Self {
            revision: editor.revision(),
            dirty: editor.is_dirty(),
            can_undo: editor.can_undo(),
            can_redo: editor.can_redo(),
            page_count: editor.pages().len(),
        }
    }
}

/// Updates sent from the session task to the UI
#[derive(Debug, Clone, PartialEq)]
pub enum EditorUpdate {
    StateChanged(EditorState),
    /// Live geometry during a drag or resize
    Manipulated {
        geometry: Geometry,
    },
    ImageAdded {
        page_index: usize,
        id: PlacementId,
    },
    PageInserted {
        index: usize,
        id: PageId,
    },
    DesignMerged {
        report: MergeReport,
    },
    Saved {
        revision: u64,
    },
    SaveFailed {
        message: String,
    },
    Error {
        message: String,
    },
}

//! Freeform canvas: image placement editing on individual pages
//!
//! The free functions edit one placement inside a page slice and never touch
//! its siblings. `CanvasState` tracks the selection and at most one active
//! drag or resize session.

mod placement;
mod session;

pub use placement::*;
pub use session::*;

use crate::page::Page;
use crate::types::*;

fn page_mut(pages: &mut [Page], page_index: usize) -> Result<&mut Page> {
    let count = pages.len();
    pages.get_mut(page_index).ok_or(LayoutError::PageOutOfRange {
        index: page_index,
        count,
    })
}

fn image_mut(pages: &mut [Page], page_index: usize, id: PlacementId) -> Result<&mut ImagePlacement> {
    page_mut(pages, page_index)?
        .image_mut(id)
        .ok_or(LayoutError::ImageNotFound(id))
}

/// Add an image at the default centered geometry
pub fn add_image(pages: &mut [Page], page_index: usize, source: impl Into<String>) -> Result<PlacementId> {
    let placement = ImagePlacement::new(source);
    let id = placement.id;
    page_mut(pages, page_index)?.images.push(placement);
    log::debug!("Added image {} to page {}", id, page_index);
    Ok(id)
}

/// Add a fully specified placement (geometry is normalized first)
pub fn insert_placement(
    pages: &mut [Page],
    page_index: usize,
    placement: ImagePlacement,
) -> Result<PlacementId> {
    let id = placement.id;
    let geometry = placement.geometry.normalized();
    page_mut(pages, page_index)?.images.push(ImagePlacement {
        geometry,
        ..placement
    });
    Ok(id)
}

pub fn delete_image(pages: &mut [Page], page_index: usize, id: PlacementId) -> Result<ImagePlacement> {
    let page = page_mut(pages, page_index)?;
    let pos = page
        .images
        .iter()
        .position(|img| img.id == id)
        .ok_or(LayoutError::ImageNotFound(id))?;
    Ok(page.images.remove(pos))
}

/// Set the absolute rotation in degrees
pub fn rotate_image(pages: &mut [Page], page_index: usize, id: PlacementId, degrees: f32) -> Result<()> {
    let image = image_mut(pages, page_index, id)?;
    if degrees.is_finite() {
        image.rotation_deg = degrees;
    }
    Ok(())
}

/// Move by a percentage delta with the same clamping as a drag
pub fn nudge_image(
    pages: &mut [Page],
    page_index: usize,
    id: PlacementId,
    dx: f32,
    dy: f32,
) -> Result<Geometry> {
    let image = image_mut(pages, page_index, id)?;
    image.geometry = image.geometry.translated(dx, dy);
    Ok(image.geometry)
}

pub fn set_image_geometry(
    pages: &mut [Page],
    page_index: usize,
    id: PlacementId,
    geometry: Geometry,
) -> Result<Geometry> {
    let image = image_mut(pages, page_index, id)?;
    image.geometry = geometry.normalized();
    Ok(image.geometry)
}

pub fn set_image_source(
    pages: &mut [Page],
    page_index: usize,
    id: PlacementId,
    source: impl Into<String>,
) -> Result<()> {
    image_mut(pages, page_index, id)?.source = source.into();
    Ok(())
}

/// Move a placement to the end of the draw order
pub fn bring_to_front(pages: &mut [Page], page_index: usize, id: PlacementId) -> Result<()> {
    let image = delete_image(pages, page_index, id)?;
    page_mut(pages, page_index)?.images.push(image);
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub page_index: usize,
    pub placement_id: PlacementId,
}

/// Result of a finished drag or resize
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionOutcome {
    pub kind: SessionKind,
    pub page_index: usize,
    pub placement_id: PlacementId,
    pub before: Geometry,
    pub after: Geometry,
}

impl SessionOutcome {
    pub fn changed(&self) -> bool {
        self.before != self.after
    }
}

#[derive(Debug, Clone, Default)]
pub struct CanvasState {
    selection: Option<Selection>,
    session: Option<ManipulationSession>,
    last_pointer: Option<PointerPos>,
}

impl CanvasState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn select(&mut self, pages: &[Page], page_index: usize, id: PlacementId) -> Result<()> {
        let page = pages.get(page_index).ok_or(LayoutError::PageOutOfRange {
            index: page_index,
            count: pages.len(),
        })?;
        page.image(id).ok_or(LayoutError::ImageNotFound(id))?;
        self.selection = Some(Selection {
            page_index,
            placement_id: id,
        });
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    pub fn session(&self) -> Option<&ManipulationSession> {
        self.session.as_ref()
    }

    pub fn is_manipulating(&self) -> bool {
        self.session.is_some()
    }

    /// Start a drag or resize on a placement and select it.
    ///
    /// Any session already in progress is ended first, at its last pointer
    /// position, and returned so the caller can record it.
    pub fn begin(
        &mut self,
        kind: SessionKind,
        pages: &mut [Page],
        page_index: usize,
        id: PlacementId,
        pointer: PointerPos,
        container: ContainerSize,
    ) -> Result<Option<SessionOutcome>> {
        let anchor_geometry = pages
            .get(page_index)
            .ok_or(LayoutError::PageOutOfRange {
                index: page_index,
                count: pages.len(),
            })?
            .image(id)
            .ok_or(LayoutError::ImageNotFound(id))?
            .geometry;

        let previous = self.release(pages, None);
        self.session = Some(ManipulationSession {
            kind,
            page_index,
            placement_id: id,
            anchor_pointer: pointer,
            anchor_geometry,
            container,
        });
        self.last_pointer = Some(pointer);
        self.selection = Some(Selection {
            page_index,
            placement_id: id,
        });
        Ok(previous)
    }

    /// Apply the active session for a new pointer position
    pub fn pointer_moved(&mut self, pages: &mut [Page], pointer: PointerPos) -> Option<Geometry> {
        let session = self.session.as_ref()?;
        let geometry = session.geometry_at(pointer);
        let image = image_mut(pages, session.page_index, session.placement_id).ok()?;
        image.geometry = geometry;
        self.last_pointer = Some(pointer);
        Some(geometry)
    }

    /// End the active session. Always clears it, even if the placement has
    /// disappeared in the meantime.
    pub fn release(&mut self, pages: &mut [Page], pointer: Option<PointerPos>) -> Option<SessionOutcome> {
        let session = self.session.take()?;
        let pointer = pointer.or(self.last_pointer.take());
        self.last_pointer = None;

        let image = image_mut(pages, session.page_index, session.placement_id).ok()?;
        if let Some(pointer) = pointer {
            image.geometry = session.geometry_at(pointer);
        }
        image.geometry = image.geometry.normalized();
        Some(SessionOutcome {
            kind: session.kind,
            page_index: session.page_index,
            placement_id: session.placement_id,
            before: session.anchor_geometry,
            after: image.geometry,
        })
    }

    /// Drop selection and session state that refers to a removed image
    pub fn forget_image(&mut self, page_index: usize, id: PlacementId) {
        let matches = |p: usize, i: PlacementId| p == page_index && i == id;
        if self
            .selection
            .is_some_and(|s| matches(s.page_index, s.placement_id))
        {
            self.selection = None;
        }
        if self
            .session
            .as_ref()
            .is_some_and(|s| matches(s.page_index, s.placement_id))
        {
            self.session = None;
            self.last_pointer = None;
        }
    }

    /// Drop any state that no longer resolves against `pages`
    pub fn retain_valid(&mut self, pages: &[Page]) {
        let resolves = |page_index: usize, id: PlacementId| {
            pages
                .get(page_index)
                .is_some_and(|p| p.image(id).is_some())
        };
        if let Some(sel) = self.selection
            && !resolves(sel.page_index, sel.placement_id)
        {
            self.selection = None;
        }
        if let Some(session) = &self.session
            && !resolves(session.page_index, session.placement_id)
        {
            self.session = None;
            self.last_pointer = None;
        }
    }

    /// Forget everything, e.g. after pages were regenerated
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

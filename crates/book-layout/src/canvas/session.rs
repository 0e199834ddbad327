//! Pointer-driven manipulation sessions
//!
//! A session captures the pointer and the placement geometry at the moment
//! the gesture began. The geometry for any later pointer position is a pure
//! function of the session and that position, so intermediate steps never
//! accumulate rounding drift.

use super::placement::Geometry;
use crate::constants::PERCENT_MAX;
use crate::types::PlacementId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKind {
    /// Move the placement
    Drag,
    /// Resize from the bottom-right corner
    Resize,
}

/// Pointer position in on-screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerPos {
    pub x: f32,
    pub y: f32,
}

impl PointerPos {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// On-screen size of the page box in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerSize {
    pub width: f32,
    pub height: f32,
}

impl ContainerSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Convert a pixel delta to percentage points of the container.
/// A degenerate container yields no movement.
pub fn percent_delta(delta_px: f32, container_px: f32) -> f32 {
    if container_px <= 0.0 || !container_px.is_finite() || !delta_px.is_finite() {
        return 0.0;
    }
    delta_px / container_px * PERCENT_MAX
}

#[derive(Debug, Clone, PartialEq)]
pub struct ManipulationSession {
    pub kind: SessionKind,
    pub page_index: usize,
    pub placement_id: PlacementId,
    pub anchor_pointer: PointerPos,
    pub anchor_geometry: Geometry,
    pub container: ContainerSize,
}

impl ManipulationSession {
    /// Geometry the placement should have with the pointer at `pointer`
    pub fn geometry_at(&self, pointer: PointerPos) -> Geometry {
        let dx = percent_delta(pointer.x - self.anchor_pointer.x, self.container.width);
        let dy = percent_delta(pointer.y - self.anchor_pointer.y, self.container.height);
        match self.kind {
            SessionKind::Drag => self.anchor_geometry.translated(dx, dy),
            SessionKind::Resize => self.anchor_geometry.resized(dx, dy),
        }
    }
}

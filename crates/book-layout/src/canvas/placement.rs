//! Image placements in page-relative percentage space
//!
//! Coordinates have a top-left origin in both text directions. Every
//! geometry that leaves this module satisfies `x + width <= 100` and
//! `y + height <= 100` with both sizes at least `MIN_PLACEMENT_SIZE`.

use crate::constants::{DEFAULT_PLACEMENT_SIZE, MIN_PLACEMENT_SIZE, PERCENT_MAX};
use crate::types::{PlacementId, clamp_finite};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Geometry {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for Geometry {
    fn default() -> Self {
        Self::centered(DEFAULT_PLACEMENT_SIZE, DEFAULT_PLACEMENT_SIZE)
    }
}

impl Geometry {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
        .normalized()
    }

    /// Geometry of the given size centered on the page
    pub fn centered(width: f32, height: f32) -> Self {
        let width = clamp_size(width);
        let height = clamp_size(height);
        Self {
            x: (PERCENT_MAX - width) / 2.0,
            y: (PERCENT_MAX - height) / 2.0,
            width,
            height,
        }
    }

    /// Translate, keeping the size and clamping position to `[0, 100 - size]`
    pub fn translated(self, dx: f32, dy: f32) -> Self {
        Self {
            x: clamp_position(self.x + dx, self.width),
            y: clamp_position(self.y + dy, self.height),
            ..self
        }
    }

    /// Grow or shrink from the bottom-right corner, keeping the top-left
    /// fixed and clamping size to `[MIN_PLACEMENT_SIZE, 100 - position]`
    pub fn resized(self, dw: f32, dh: f32) -> Self {
        Self {
            width: clamp_extent(self.width + dw, self.x),
            height: clamp_extent(self.height + dh, self.y),
            ..self
        }
    }

    /// Pull an arbitrary geometry back inside the page.
    ///
    /// Size is fixed first, then position, so a placement hanging off an edge
    /// is moved rather than shrunk.
    pub fn normalized(self) -> Self {
        let width = clamp_size(self.width);
        let height = clamp_size(self.height);
        Self {
            x: clamp_position(self.x, width),
            y: clamp_position(self.y, height),
            width,
            height,
        }
    }

    pub fn is_contained(&self) -> bool {
        self.x >= 0.0
            && self.y >= 0.0
            && self.width >= MIN_PLACEMENT_SIZE
            && self.height >= MIN_PLACEMENT_SIZE
            && self.x + self.width <= PERCENT_MAX + f32::EPSILON * PERCENT_MAX
            && self.y + self.height <= PERCENT_MAX + f32::EPSILON * PERCENT_MAX
    }
}

fn clamp_size(size: f32) -> f32 {
    clamp_finite(size, MIN_PLACEMENT_SIZE, PERCENT_MAX)
}

fn clamp_position(position: f32, size: f32) -> f32 {
    clamp_finite(position, 0.0, (PERCENT_MAX - size).max(0.0))
}

fn clamp_extent(size: f32, position: f32) -> f32 {
    let max = (PERCENT_MAX - position).max(MIN_PLACEMENT_SIZE);
    clamp_finite(size, MIN_PLACEMENT_SIZE, max)
}

/// One image on one page
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ImagePlacement {
    pub id: PlacementId,
    /// Image URL returned by the upload or generation service
    pub source: String,
    pub geometry: Geometry,
    /// Degrees, unrestricted
    pub rotation_deg: f32,
}

impl ImagePlacement {
    /// New placement centered at the default size
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            id: PlacementId::next(),
            source: source.into(),
            geometry: Geometry::default(),
            rotation_deg: 0.0,
        }
    }

    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = geometry.normalized();
        self
    }
}

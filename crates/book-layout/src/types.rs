use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "serde")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Persistence error: {0}")]
    Persistence(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("Page index {index} out of range (page count {count})")]
    PageOutOfRange { index: usize, count: usize },
    #[error("Page {0} is structural and cannot be deleted")]
    PageNotDeletable(usize),
    #[error("Image {0} not found")]
    ImageNotFound(PlacementId),
    #[error("Unknown template: {0}")]
    UnknownTemplate(String),
}

pub type Result<T> = std::result::Result<T, LayoutError>;

static NEXT_PAGE_ID: AtomicU64 = AtomicU64::new(1);
static NEXT_PLACEMENT_ID: AtomicU64 = AtomicU64::new(1);

/// Stable identifier of a generated or inserted page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageId(pub u64);

impl PageId {
    /// Allocate a fresh, process-unique page id
    pub fn next() -> Self {
        Self(NEXT_PAGE_ID.fetch_add(1, Ordering::SeqCst))
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page-{}", self.0)
    }
}

/// Identifier of one image placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlacementId(pub u64);

impl PlacementId {
    pub fn next() -> Self {
        Self(NEXT_PLACEMENT_ID.fetch_add(1, Ordering::SeqCst))
    }
}

impl fmt::Display for PlacementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "img-{}", self.0)
    }
}

/// Horizontal alignment of a text band or page number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

impl Alignment {
    /// Swap left and right, keeping center
    pub fn mirrored(self) -> Self {
        match self {
            Alignment::Left => Alignment::Right,
            Alignment::Center => Alignment::Center,
            Alignment::Right => Alignment::Left,
        }
    }
}

/// Which edge of the page a band sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Bottom,
}

/// Physical side of a two-page spread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Which side a 1-based page number lands on in a bound book.
///
/// In left-to-right books odd pages are recto (right-hand); right-to-left
/// books mirror this.
pub fn page_side(page_number: usize, is_rtl: bool) -> Side {
    let odd = page_number % 2 == 1;
    match (odd, is_rtl) {
        (true, false) | (false, true) => Side::Right,
        (false, false) | (true, true) => Side::Left,
    }
}

/// Clamp to `[min, max]`, mapping NaN to `min`
pub(crate) fn clamp_finite(value: f32, min: f32, max: f32) -> f32 {
    if value.is_nan() {
        min
    } else {
        value.clamp(min, max)
    }
}

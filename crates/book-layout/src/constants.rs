//! Shared constants for the layout engine
//!
//! This module centralizes the tunables used by history, the canvas,
//! pagination estimates and autosave.

use std::time::Duration;

// =============================================================================
// Percentage Space
// =============================================================================

/// Upper bound of the page-relative coordinate space
pub const PERCENT_MAX: f32 = 100.0;

/// Smallest width or height a placement may shrink to (percent of page)
pub const MIN_PLACEMENT_SIZE: f32 = 10.0;

/// Width and height of a freshly added placement (percent of page)
pub const DEFAULT_PLACEMENT_SIZE: f32 = 40.0;

/// Step used for keyboard nudges (percent of page)
pub const NUDGE_STEP: f32 = 1.0;

// =============================================================================
// History
// =============================================================================

/// Number of snapshots kept by the undo/redo history
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

// =============================================================================
// Autosave
// =============================================================================

/// Quiet period after the last change before an autosave fires
pub const AUTOSAVE_DELAY: Duration = Duration::from_secs(30);

// =============================================================================
// Pagination Estimates
// =============================================================================

/// Estimated 1-based page number of the first chapter when a title page,
/// its spacer, a contents page and its spacer precede it
pub const TOC_FIRST_CHAPTER_PAGE: usize = 5;

/// Estimated pages consumed by each chapter
pub const TOC_PAGES_PER_CHAPTER: usize = 1;

/// Words that fit on a single-column page at the reference font size
pub const REFERENCE_WORDS_PER_PAGE: f32 = 300.0;

/// Font size (points) the reference word count was measured at
pub const REFERENCE_FONT_SIZE_PT: f32 = 12.0;

/// Line height the reference word count was measured at
pub const REFERENCE_LINE_HEIGHT: f32 = 1.5;

// =============================================================================
// Configuration Bounds
// =============================================================================

pub const MIN_COLUMNS: u8 = 1;
pub const MAX_COLUMNS: u8 = 4;

pub const MIN_FONT_SIZE_PT: f32 = 6.0;
pub const MAX_FONT_SIZE_PT: f32 = 96.0;

pub const MIN_LINE_HEIGHT: f32 = 0.8;
pub const MAX_LINE_HEIGHT: f32 = 3.0;

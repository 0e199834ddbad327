use crate::constants::{
    REFERENCE_FONT_SIZE_PT, REFERENCE_LINE_HEIGHT, REFERENCE_WORDS_PER_PAGE,
};
use crate::document::Snapshot;
use crate::page::PageRole;
use crate::pagination::Manuscript;
use crate::spread::spread_count;

/// Summary figures for a composed book
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentStatistics {
    pub pages: usize,
    /// Including the cover spread
    pub spreads: usize,
    pub chapters: usize,
    pub blank_pages: usize,
    pub images: usize,
    pub total_words: usize,
    /// Rough capacity of one page under the active layout
    pub words_per_page: usize,
    /// Pages the text would fill at `words_per_page`
    pub estimated_text_pages: usize,
}

/// Estimate how many words fit on one page.
///
/// Scales a reference density (12pt, 1.5 line height, one column) by the
/// area a glyph line takes up. Column gaps are ignored; this is a planning
/// figure only.
pub fn estimate_words_per_page(columns: u8, font_size_pt: f32, line_height: f32) -> usize {
    let font = if font_size_pt.is_finite() && font_size_pt > 0.0 {
        font_size_pt
    } else {
        REFERENCE_FONT_SIZE_PT
    };
    let leading = if line_height.is_finite() && line_height > 0.0 {
        line_height
    } else {
        REFERENCE_LINE_HEIGHT
    };
    let scale = (REFERENCE_FONT_SIZE_PT / font).powi(2) * (REFERENCE_LINE_HEIGHT / leading);
    // More columns lose a little to gutters and ragged line ends
    let column_factor = match columns {
        0 | 1 => 1.0,
        2 => 0.95,
        3 => 0.9,
        _ => 0.85,
    };
    (REFERENCE_WORDS_PER_PAGE * scale * column_factor)
        .round()
        .max(1.0) as usize
}

/// Calculate statistics for a snapshot of the book
pub fn calculate_statistics(manuscript: &Manuscript, snapshot: &Snapshot) -> DocumentStatistics {
    let pages = snapshot.pages.len();
    let blank_pages = snapshot
        .pages
        .iter()
        .filter(|p| p.role == PageRole::Blank)
        .count();
    let images = snapshot.pages.iter().map(|p| p.images.len()).sum();

    let typography = &snapshot.config.typography;
    let words_per_page = estimate_words_per_page(
        snapshot.config.columns,
        typography.body_font_size,
        typography.line_height,
    );
    let total_words = manuscript.total_words();

    DocumentStatistics {
        pages,
        spreads: spread_count(pages),
        chapters: manuscript.chapters.len(),
        blank_pages,
        images,
        total_words,
        words_per_page,
        estimated_text_pages: total_words.div_ceil(words_per_page),
    }
}

//! Running header and footer bands

use crate::types::Edge;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Token replaced by the 1-based page number
pub const PAGE_TOKEN: &str = "{page}";
/// Token replaced by the book title
pub const TITLE_TOKEN: &str = "{title}";

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BandStyle {
    pub font: String,
    /// Size in points
    pub font_size: f32,
    pub text_color: String,
    pub background_color: Option<String>,
    pub border_color: String,
    pub border_top: bool,
    pub border_bottom: bool,
}

impl Default for BandStyle {
    fn default() -> Self {
        Self {
            font: "Georgia".to_string(),
            font_size: 9.0,
            text_color: "#555555".to_string(),
            background_color: None,
            border_color: "#cccccc".to_string(),
            border_top: false,
            border_bottom: false,
        }
    }
}

/// Header or footer band with three text slots
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HeaderFooter {
    pub enabled: bool,
    pub height_mm: f32,
    pub left: String,
    pub center: String,
    pub right: String,
    pub style: BandStyle,
    /// Show on odd-numbered pages
    pub show_on_odd: bool,
    /// Show on even-numbered pages
    pub show_on_even: bool,
}

impl Default for HeaderFooter {
    fn default() -> Self {
        Self {
            enabled: false,
            height_mm: 10.0,
            left: String::new(),
            center: String::new(),
            right: String::new(),
            style: BandStyle::default(),
            show_on_odd: true,
            show_on_even: true,
        }
    }
}

/// Band text resolved for one page, slots already placed physically
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedBand {
    pub edge: Edge,
    pub left: String,
    pub center: String,
    pub right: String,
}

impl HeaderFooter {
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn with_text(
        center: impl Into<String>,
        left: impl Into<String>,
        right: impl Into<String>,
    ) -> Self {
        Self {
            enabled: true,
            left: left.into(),
            center: center.into(),
            right: right.into(),
            ..Self::default()
        }
    }

    /// Whether the band is drawn on the given 1-based page number
    pub fn visible_on(&self, page_number: usize) -> bool {
        if !self.enabled {
            return false;
        }
        if page_number % 2 == 1 {
            self.show_on_odd
        } else {
            self.show_on_even
        }
    }

    /// Resolve tokens for one page. Right-to-left books swap the outer slots.
    pub fn resolve(
        &self,
        edge: Edge,
        page_number: usize,
        title: &str,
        is_rtl: bool,
    ) -> Option<ResolvedBand> {
        if !self.visible_on(page_number) {
            return None;
        }
        let fill = |slot: &str| {
            slot.replace(PAGE_TOKEN, &page_number.to_string())
                .replace(TITLE_TOKEN, title)
        };
        let (left, right) = if is_rtl {
            (fill(&self.right), fill(&self.left))
        } else {
            (fill(&self.left), fill(&self.right))
        };
        Some(ResolvedBand {
            edge,
            left,
            center: fill(&self.center),
            right,
        })
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.height_mm.is_nan() || self.height_mm < 0.0 {
            return Err(format!("band height {} must be non-negative", self.height_mm));
        }
        if self.style.font_size.is_nan() || self.style.font_size <= 0.0 {
            return Err(format!("band font size {} must be positive", self.style.font_size));
        }
        Ok(())
    }
}

//! Layout configuration model
//!
//! `LayoutConfiguration` is a value: every setter returns a new configuration
//! with one field replaced and leaves the receiver untouched. Callers push the
//! result into the history so each visible change can be undone.

mod background;
mod header_footer;
mod split;
pub mod templates;
mod typography;

pub use background::*;
pub use header_footer::*;
pub use split::*;
pub use typography::*;

use crate::constants::{MAX_COLUMNS, MIN_COLUMNS};
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Page margins, all non-negative
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PageMargins {
    pub top_mm: f32,
    pub bottom_mm: f32,
    pub left_mm: f32,
    pub right_mm: f32,
}

impl Default for PageMargins {
    fn default() -> Self {
        Self {
            top_mm: 20.0,
            bottom_mm: 20.0,
            left_mm: 18.0,
            right_mm: 18.0,
        }
    }
}

impl PageMargins {
    /// Create uniform margins on all sides
    pub fn uniform(margin_mm: f32) -> Self {
        Self {
            top_mm: margin_mm,
            bottom_mm: margin_mm,
            left_mm: margin_mm,
            right_mm: margin_mm,
        }
    }

    /// Copy with negative or NaN sides set to zero
    pub fn clamped(self) -> Self {
        let fix = |v: f32| if v.is_nan() { 0.0 } else { v.max(0.0) };
        Self {
            top_mm: fix(self.top_mm),
            bottom_mm: fix(self.bottom_mm),
            left_mm: fix(self.left_mm),
            right_mm: fix(self.right_mm),
        }
    }

    fn is_valid(&self) -> bool {
        [self.top_mm, self.bottom_mm, self.left_mm, self.right_mm]
            .iter()
            .all(|v| *v >= 0.0)
    }
}

/// Where page numbers are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PageNumberPosition {
    #[default]
    BottomCenter,
    /// Outer bottom corner: right on recto pages, left on verso pages
    BottomOutside,
    BottomInside,
    TopCenter,
    TopOutside,
}

impl PageNumberPosition {
    pub fn edge(self) -> Edge {
        match self {
            PageNumberPosition::TopCenter | PageNumberPosition::TopOutside => Edge::Top,
            _ => Edge::Bottom,
        }
    }

    /// Physical alignment on a given page, honouring spread side
    pub fn alignment(self, page_number: usize, is_rtl: bool) -> Alignment {
        let outside = match page_side(page_number, is_rtl) {
            Side::Right => Alignment::Right,
            Side::Left => Alignment::Left,
        };
        match self {
            PageNumberPosition::BottomCenter | PageNumberPosition::TopCenter => Alignment::Center,
            PageNumberPosition::BottomOutside | PageNumberPosition::TopOutside => outside,
            PageNumberPosition::BottomInside => outside.mirrored(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PageNumbering {
    pub show: bool,
    pub position: PageNumberPosition,
    /// Number printed on the first page of the sequence
    pub start: usize,
}

impl Default for PageNumbering {
    fn default() -> Self {
        Self {
            show: true,
            position: PageNumberPosition::BottomCenter,
            start: 1,
        }
    }
}

/// Structural switches read by the pagination generator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PaginationFlags {
    pub include_title_page: bool,
    pub include_table_of_contents: bool,
    pub include_back_cover: bool,
}

impl Default for PaginationFlags {
    fn default() -> Self {
        Self {
            include_title_page: true,
            include_table_of_contents: true,
            include_back_cover: false,
        }
    }
}

/// Cover settings; the cover itself is drawn from book metadata
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CoverDesign {
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub title_color: Option<String>,
}

/// One page-styling profile
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LayoutConfiguration {
    pub split_type: SplitType,
    pub split_ratio: Vec<f32>,
    pub columns: u8,
    pub column_gap_mm: f32,
    pub background: Background,
    pub margins: PageMargins,
    pub typography: Typography,
    pub header: HeaderFooter,
    pub footer: HeaderFooter,
    pub is_rtl: bool,
    pub page_numbers: PageNumbering,
    pub flags: PaginationFlags,
    pub cover: CoverDesign,
}

impl Default for LayoutConfiguration {
    fn default() -> Self {
        Self {
            split_type: SplitType::None,
            split_ratio: default_ratio(SplitType::None),
            columns: 1,
            column_gap_mm: 6.0,
            background: Background::default(),
            margins: PageMargins::default(),
            typography: Typography::default(),
            header: HeaderFooter::disabled(),
            footer: HeaderFooter::disabled(),
            is_rtl: false,
            page_numbers: PageNumbering::default(),
            flags: PaginationFlags::default(),
            cover: CoverDesign::default(),
        }
    }
}

impl LayoutConfiguration {
    pub fn with_columns(&self, columns: u8) -> Self {
        Self {
            columns: columns.clamp(MIN_COLUMNS, MAX_COLUMNS),
            ..self.clone()
        }
    }

    pub fn with_column_gap(&self, gap_mm: f32) -> Self {
        Self {
            column_gap_mm: clamp_finite(gap_mm, 0.0, f32::MAX),
            ..self.clone()
        }
    }

    /// Change the split kind; the ratio is re-derived for the new arity
    pub fn with_split_type(&self, split_type: SplitType) -> Self {
        Self {
            split_type,
            split_ratio: ratio_for(split_type, &self.split_ratio),
            ..self.clone()
        }
    }

    /// Move the split divider. Only two-way splits respond; the second value
    /// is always `100 - first`.
    pub fn with_split_ratio(&self, first: f32) -> Self {
        if !self.split_type.is_two_way() {
            return self.clone();
        }
        Self {
            split_ratio: two_way_ratio(first).to_vec(),
            ..self.clone()
        }
    }

    pub fn with_background(&self, background: Background) -> Self {
        Self {
            background: background.normalized(),
            ..self.clone()
        }
    }

    pub fn with_margins(&self, margins: PageMargins) -> Self {
        Self {
            margins: margins.clamped(),
            ..self.clone()
        }
    }

    pub fn with_typography(&self, typography: Typography) -> Self {
        Self {
            typography: typography.clamped(),
            ..self.clone()
        }
    }

    pub fn with_header(&self, header: HeaderFooter) -> Self {
        Self {
            header,
            ..self.clone()
        }
    }

    pub fn with_footer(&self, footer: HeaderFooter) -> Self {
        Self {
            footer,
            ..self.clone()
        }
    }

    pub fn with_rtl(&self, is_rtl: bool) -> Self {
        Self {
            is_rtl,
            ..self.clone()
        }
    }

    pub fn with_page_numbers(&self, page_numbers: PageNumbering) -> Self {
        Self {
            page_numbers,
            ..self.clone()
        }
    }

    pub fn with_flags(&self, flags: PaginationFlags) -> Self {
        Self {
            flags,
            ..self.clone()
        }
    }

    pub fn with_cover(&self, cover: CoverDesign) -> Self {
        Self {
            cover,
            ..self.clone()
        }
    }

    /// Width of one text column in mm for a page of the given width
    pub fn column_width_mm(&self, page_width_mm: f32) -> f32 {
        let columns = f32::from(self.columns.clamp(MIN_COLUMNS, MAX_COLUMNS));
        let text_width = page_width_mm - self.margins.left_mm - self.margins.right_mm;
        let gaps = self.column_gap_mm * (columns - 1.0);
        ((text_width - gaps) / columns).max(0.0)
    }

    /// Load configuration from a JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let config: Self = serde_json::from_slice(&bytes)
            .map_err(|e| LayoutError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| LayoutError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !(MIN_COLUMNS..=MAX_COLUMNS).contains(&self.columns) {
            return Err(LayoutError::Config(format!(
                "Column count {} must be between {} and {}",
                self.columns, MIN_COLUMNS, MAX_COLUMNS
            )));
        }
        if self.column_gap_mm.is_nan() || self.column_gap_mm < 0.0 {
            return Err(LayoutError::Config(
                "Column gap must be non-negative".to_string(),
            ));
        }
        if !self.margins.is_valid() {
            return Err(LayoutError::Config(
                "Margins must be non-negative".to_string(),
            ));
        }
        validate_ratio(self.split_type, &self.split_ratio).map_err(LayoutError::Config)?;
        self.background.validate().map_err(LayoutError::Config)?;
        self.typography.validate().map_err(LayoutError::Config)?;
        self.header
            .validate()
            .map_err(|e| LayoutError::Config(format!("header: {}", e)))?;
        self.footer
            .validate()
            .map_err(|e| LayoutError::Config(format!("footer: {}", e)))?;
        Ok(())
    }
}

//! Built-in named layout templates
//!
//! Applying a template supersedes the whole configuration; the previous one
//! stays reachable through undo.

use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    Classic,
    Modern,
    TwoColumn,
    Magazine,
    MangaRtl,
}

impl Template {
    pub const ALL: [Template; 5] = [
        Template::Classic,
        Template::Modern,
        Template::TwoColumn,
        Template::Magazine,
        Template::MangaRtl,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Template::Classic => "classic",
            Template::Modern => "modern",
            Template::TwoColumn => "two-column",
            Template::Magazine => "magazine",
            Template::MangaRtl => "manga-rtl",
        }
    }

    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| LayoutError::UnknownTemplate(name.to_string()))
    }

    pub fn configuration(self) -> LayoutConfiguration {
        let base = LayoutConfiguration::default();
        match self {
            Template::Classic => base
                .with_margins(PageMargins {
                    top_mm: 25.0,
                    bottom_mm: 25.0,
                    left_mm: 22.0,
                    right_mm: 22.0,
                })
                .with_footer(HeaderFooter::with_text("{page}", "", ""))
                .with_page_numbers(PageNumbering {
                    show: false,
                    ..PageNumbering::default()
                }),
            Template::Modern => base
                .with_typography(Typography {
                    body_font: "Inter".to_string(),
                    body_font_size: 11.0,
                    line_height: 1.6,
                    heading_font: "Inter".to_string(),
                    heading_font_size: 28.0,
                    ..Typography::default()
                })
                .with_margins(PageMargins::uniform(15.0))
                .with_page_numbers(PageNumbering {
                    position: PageNumberPosition::BottomOutside,
                    ..PageNumbering::default()
                }),
            Template::TwoColumn => base
                .with_columns(2)
                .with_column_gap(8.0)
                .with_header(HeaderFooter::with_text("{title}", "", "")),
            Template::Magazine => base
                .with_columns(3)
                .with_column_gap(5.0)
                .with_split_type(SplitType::Horizontal)
                .with_split_ratio(35.0)
                .with_background(Background::default().with_kind(BackgroundKind::Gradient))
                .with_margins(PageMargins::uniform(12.0)),
            Template::MangaRtl => base
                .with_rtl(true)
                .with_split_type(SplitType::Quadrant)
                .with_margins(PageMargins::uniform(8.0))
                .with_page_numbers(PageNumbering {
                    position: PageNumberPosition::BottomOutside,
                    ..PageNumbering::default()
                }),
        }
    }
}

/// Look up a template configuration by name
pub fn template(name: &str) -> Result<LayoutConfiguration> {
    Template::from_name(name).map(Template::configuration)
}

pub fn template_names() -> Vec<&'static str> {
    Template::ALL.iter().map(|t| t.name()).collect()
}

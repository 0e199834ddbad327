//! Merging AI design proposals
//!
//! A proposal may carry any subset of its sections. The user opts into
//! sections; an opted-in section the proposal lacks is skipped and reported,
//! never treated as an error.

use crate::canvas::{Geometry, ImagePlacement};
use crate::config::*;
use crate::page::Page;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TypographyProposal {
    pub body_font: Option<String>,
    pub body_font_size: Option<f32>,
    pub line_height: Option<f32>,
    pub heading_font: Option<String>,
    pub heading_font_size: Option<f32>,
    pub text_color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutProposal {
    pub margins: Option<PageMargins>,
    pub columns: Option<u8>,
    pub show_page_numbers: Option<bool>,
    pub page_number_position: Option<PageNumberPosition>,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CoverProposal {
    pub description: String,
    pub image_url: Option<String>,
    pub title_color: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ImageSuggestion {
    pub page_index: usize,
    pub prompt: String,
    pub priority: Priority,
    pub rationale: String,
    /// Filled in once the image service has produced the picture
    pub image_url: Option<String>,
    pub geometry: Option<Geometry>,
}

/// Structured design returned by the design assistant
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DesignProposal {
    pub typography: Option<TypographyProposal>,
    pub layout: Option<LayoutProposal>,
    pub cover: Option<CoverProposal>,
    pub images: Option<Vec<ImageSuggestion>>,
}

impl DesignProposal {
    /// Image suggestions, highest priority first (stable within a priority)
    pub fn ranked_images(&self) -> Vec<&ImageSuggestion> {
        let mut ranked: Vec<&ImageSuggestion> = self.images.iter().flatten().collect();
        ranked.sort_by_key(|s| s.priority);
        ranked
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DesignSection {
    Typography,
    Layout,
    Cover,
    Images,
}

/// Sections the user chose to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeSelection {
    pub typography: bool,
    pub layout: bool,
    pub cover: bool,
    pub images: bool,
}

impl MergeSelection {
    pub fn all() -> Self {
        Self {
            typography: true,
            layout: true,
            cover: true,
            images: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MergeReport {
    pub applied: Vec<DesignSection>,
    /// Opted-in sections the proposal did not contain
    pub skipped: Vec<DesignSection>,
    pub images_added: usize,
}

impl MergeReport {
    pub fn changed_anything(&self) -> bool {
        !self.applied.is_empty()
    }
}

fn merge_typography(current: &Typography, proposal: &TypographyProposal) -> Typography {
    Typography {
        body_font: proposal
            .body_font
            .clone()
            .unwrap_or_else(|| current.body_font.clone()),
        body_font_size: proposal.body_font_size.unwrap_or(current.body_font_size),
        line_height: proposal.line_height.unwrap_or(current.line_height),
        text_color: proposal
            .text_color
            .clone()
            .unwrap_or_else(|| current.text_color.clone()),
        heading_font: proposal
            .heading_font
            .clone()
            .unwrap_or_else(|| current.heading_font.clone()),
        heading_font_size: proposal.heading_font_size.unwrap_or(current.heading_font_size),
        heading_color: current.heading_color.clone(),
    }
}

fn merge_layout(config: &LayoutConfiguration, proposal: &LayoutProposal) -> LayoutConfiguration {
    let mut next = config.clone();
    if let Some(margins) = proposal.margins {
        next = next.with_margins(margins);
    }
    if let Some(columns) = proposal.columns {
        next = next.with_columns(columns);
    }
    let mut numbering = next.page_numbers;
    if let Some(show) = proposal.show_page_numbers {
        numbering.show = show;
    }
    if let Some(position) = proposal.page_number_position {
        numbering.position = position;
    }
    next.with_page_numbers(numbering)
}

/// Merge the selected sections of a proposal into a configuration and pages
pub fn merge_design(
    config: &LayoutConfiguration,
    pages: &[Page],
    proposal: &DesignProposal,
    selection: MergeSelection,
) -> (LayoutConfiguration, Vec<Page>, MergeReport) {
    let mut next = config.clone();
    let mut pages = pages.to_vec();
    let mut report = MergeReport::default();

    let mut note = |section: DesignSection, present: bool| {
        if present {
            report.applied.push(section);
        } else {
            report.skipped.push(section);
        }
        present
    };

    if selection.typography && note(DesignSection::Typography, proposal.typography.is_some()) {
        if let Some(typography) = &proposal.typography {
            next = next.with_typography(merge_typography(&next.typography, typography));
        }
    }

    if selection.layout && note(DesignSection::Layout, proposal.layout.is_some()) {
        if let Some(layout) = &proposal.layout {
            next = merge_layout(&next, layout);
        }
    }

    if selection.cover && note(DesignSection::Cover, proposal.cover.is_some()) {
        if let Some(cover) = &proposal.cover {
            next = next.with_cover(CoverDesign {
                description: Some(cover.description.clone()),
                image_url: cover.image_url.clone().or(next.cover.image_url.clone()),
                title_color: cover.title_color.clone().or(next.cover.title_color.clone()),
            });
        }
    }

    let mut images_added = 0;
    if selection.images && note(DesignSection::Images, proposal.images.is_some()) {
        for suggestion in proposal.ranked_images() {
            let (Some(url), Some(page)) = (&suggestion.image_url, pages.get_mut(suggestion.page_index))
            else {
                log::debug!(
                    "Skipping image suggestion for page {} (no image or page)",
                    suggestion.page_index
                );
                continue;
            };
            let placement = ImagePlacement::new(url.clone())
                .with_geometry(suggestion.geometry.unwrap_or_default());
            page.images.push(placement);
            images_added += 1;
        }
    }
    report.images_added = images_added;

    (next, pages, report)
}

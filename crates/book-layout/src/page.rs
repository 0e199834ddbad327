use crate::canvas::ImagePlacement;
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What a page is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PageRole {
    Title,
    /// Spacer page, the only kind a user may insert or delete
    Blank,
    TableOfContents,
    ChapterBody {
        chapter_index: usize,
    },
    BackCoverSummary,
}

impl PageRole {
    pub fn label(self) -> String {
        match self {
            PageRole::Title => "title".to_string(),
            PageRole::Blank => "blank".to_string(),
            PageRole::TableOfContents => "toc".to_string(),
            PageRole::ChapterBody { chapter_index } => format!("chapter{}", chapter_index),
            PageRole::BackCoverSummary => "backCoverSummary".to_string(),
        }
    }
}

/// One physical page of the book
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Page {
    pub id: PageId,
    pub role: PageRole,
    /// Marked-up content produced by the pagination generator
    pub content: String,
    /// Image placements, back to front
    pub images: Vec<ImagePlacement>,
}

impl Page {
    pub fn new(role: PageRole, content: impl Into<String>) -> Self {
        Self {
            id: PageId::next(),
            role,
            content: content.into(),
            images: Vec::new(),
        }
    }

    pub fn blank() -> Self {
        Self::new(PageRole::Blank, String::new())
    }

    /// Structural pages are regenerated, never deleted by hand
    pub fn is_deletable(&self) -> bool {
        self.role == PageRole::Blank
    }

    pub fn image(&self, id: PlacementId) -> Option<&ImagePlacement> {
        self.images.iter().find(|img| img.id == id)
    }

    pub fn image_mut(&mut self, id: PlacementId) -> Option<&mut ImagePlacement> {
        self.images.iter_mut().find(|img| img.id == id)
    }
}

/// Insert a user blank page before `index` (`index == len` appends)
pub fn insert_blank_page(pages: &mut Vec<Page>, index: usize) -> Result<PageId> {
    if index > pages.len() {
        return Err(LayoutError::PageOutOfRange {
            index,
            count: pages.len(),
        });
    }
    let page = Page::blank();
    let id = page.id;
    pages.insert(index, page);
    Ok(id)
}

/// Remove the page at `index`; only blank pages may be removed
pub fn delete_page(pages: &mut Vec<Page>, index: usize) -> Result<Page> {
    let page = pages.get(index).ok_or(LayoutError::PageOutOfRange {
        index,
        count: pages.len(),
    })?;
    if !page.is_deletable() {
        return Err(LayoutError::PageNotDeletable(index));
    }
    Ok(pages.remove(index))
}

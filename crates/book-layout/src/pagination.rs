//! Pagination generator
//!
//! Turns a manuscript into an ordered page sequence:
//!
//! ```text
//! [title, blank]            if include_title_page
//! [toc, blank]              if include_table_of_contents and > 1 chapter
//! [chapter 0 .. chapter n]
//! [backCoverSummary]        if include_back_cover
//! ```
//!
//! The blank after the title keeps the first content page on the same spread
//! side whether or not a title is present. Generation is deterministic in
//! roles and order; only page ids differ between runs.

use crate::config::PaginationFlags;
use crate::constants::{TOC_FIRST_CHAPTER_PAGE, TOC_PAGES_PER_CHAPTER};
use crate::page::{Page, PageRole};
use crate::types::*;
use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Chapter {
    pub title: String,
    pub content: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub word_count: usize,
}

impl Chapter {
    /// Chapter with the word count derived from its content
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        let content = content.into();
        let word_count = content.split_whitespace().count();
        Self {
            title: title.into(),
            content,
            word_count,
        }
    }
}

/// Read-only manuscript supplied by the writing side of the product
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Manuscript {
    pub title: String,
    pub author: Option<String>,
    pub chapters: Vec<Chapter>,
    pub synopsis: Option<String>,
    pub description: Option<String>,
}

impl Manuscript {
    pub fn new(title: impl Into<String>, chapters: Vec<Chapter>) -> Self {
        Self {
            title: title.into(),
            chapters,
            ..Self::default()
        }
    }

    /// Back-cover text: synopsis, else description, else empty
    pub fn back_cover_text(&self) -> &str {
        self.synopsis
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .or(self.description.as_deref())
            .unwrap_or("")
    }

    pub fn total_words(&self) -> usize {
        self.chapters.iter().map(|c| c.word_count).sum()
    }

    /// Load a manuscript from a JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let manuscript = serde_json::from_slice(&bytes)?;
        Ok(manuscript)
    }
}

/// One table-of-contents line
#[derive(Debug, Clone, PartialEq)]
pub struct TocEntry {
    pub chapter_index: usize,
    pub title: String,
    /// Approximate 1-based page number. This is a linear estimate from the
    /// chapter index; the real position depends on the renderer.
    pub estimated_page: usize,
}

/// Estimated page of a chapter: a straight line from the first chapter page.
/// Not guaranteed to match the typeset book.
pub fn estimate_chapter_page(chapter_index: usize) -> usize {
    TOC_FIRST_CHAPTER_PAGE + chapter_index * TOC_PAGES_PER_CHAPTER
}

pub fn table_of_contents(manuscript: &Manuscript) -> Vec<TocEntry> {
    manuscript
        .chapters
        .iter()
        .enumerate()
        .map(|(i, chapter)| TocEntry {
            chapter_index: i,
            title: chapter.title.clone(),
            estimated_page: estimate_chapter_page(i),
        })
        .collect()
}

/// Whether a contents page would be generated for this manuscript
pub fn has_table_of_contents(manuscript: &Manuscript, flags: PaginationFlags) -> bool {
    flags.include_table_of_contents && manuscript.chapters.len() > 1
}

/// Generate the full page sequence
pub fn generate(manuscript: &Manuscript, flags: PaginationFlags) -> Vec<Page> {
    let mut pages = Vec::with_capacity(manuscript.chapters.len() + 5);

    if flags.include_title_page {
        pages.push(Page::new(PageRole::Title, render_title(manuscript)));
        pages.push(Page::blank());
    }

    if has_table_of_contents(manuscript, flags) {
        pages.push(Page::new(
            PageRole::TableOfContents,
            render_toc(&table_of_contents(manuscript)),
        ));
        pages.push(Page::blank());
    }

    for (chapter_index, chapter) in manuscript.chapters.iter().enumerate() {
        pages.push(Page::new(
            PageRole::ChapterBody { chapter_index },
            render_chapter(chapter),
        ));
    }

    if flags.include_back_cover {
        pages.push(Page::new(
            PageRole::BackCoverSummary,
            render_back_cover(manuscript.back_cover_text()),
        ));
    }

    log::debug!(
        "Generated {} pages for {} chapters",
        pages.len(),
        manuscript.chapters.len()
    );
    pages
}

/// Regenerate pages, carrying placements over from `previous`.
///
/// The n-th page of a given role inherits the images and id of the n-th page
/// with the same role in `previous`. User-inserted blanks beyond the
/// generated spacers are dropped, as are images on pages whose role no longer
/// exists.
pub fn regenerate(previous: &[Page], manuscript: &Manuscript, flags: PaginationFlags) -> Vec<Page> {
    let mut pages = generate(manuscript, flags);

    let mut by_role: HashMap<PageRole, Vec<&Page>> = HashMap::new();
    for page in previous {
        by_role.entry(page.role).or_default().push(page);
    }
    let mut seen: HashMap<PageRole, usize> = HashMap::new();

    for page in &mut pages {
        let n = seen.entry(page.role).or_default();
        if let Some(old) = by_role.get(&page.role).and_then(|olds| olds.get(*n)) {
            page.id = old.id;
            page.images = old.images.clone();
        }
        *n += 1;
    }
    pages
}

/// Whether the chapter pages are exactly one per chapter, in order
pub fn matches_manuscript(pages: &[Page], manuscript: &Manuscript) -> bool {
    let mut chapters = pages.iter().filter_map(|p| match p.role {
        PageRole::ChapterBody { chapter_index } => Some(chapter_index),
        _ => None,
    });
    (0..manuscript.chapters.len()).all(|i| chapters.next() == Some(i)) && chapters.next().is_none()
}

/// Roles in order, handy for comparing two generations
pub fn role_sequence(pages: &[Page]) -> Vec<PageRole> {
    pages.iter().map(|p| p.role).collect()
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

fn render_title(manuscript: &Manuscript) -> String {
    let mut out = format!("<h1 class=\"book-title\">{}</h1>", escape(&manuscript.title));
    if let Some(author) = &manuscript.author {
        out.push_str(&format!("<p class=\"book-author\">{}</p>", escape(author)));
    }
    out
}

fn render_toc(entries: &[TocEntry]) -> String {
    let mut out = String::from("<h2 class=\"toc-title\">Contents</h2><ol class=\"toc\">");
    for entry in entries {
        out.push_str(&format!(
            "<li><span class=\"toc-chapter\">{}</span><span class=\"toc-page\">{}</span></li>",
            escape(&entry.title),
            entry.estimated_page
        ));
    }
    out.push_str("</ol>");
    out
}

fn render_chapter(chapter: &Chapter) -> String {
    let mut out = format!("<h2 class=\"chapter-title\">{}</h2>", escape(&chapter.title));
    for paragraph in chapter
        .content
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
    {
        out.push_str(&format!("<p>{}</p>", escape(paragraph)));
    }
    out
}

fn render_back_cover(text: &str) -> String {
    format!("<div class=\"back-cover\"><p>{}</p></div>", escape(text))
}

//! Two-page spread navigation
//!
//! Spread 0 is the cover and carries no pages. Spread `k > 0` shows pages
//! `2(k-1)` and `2(k-1)+1` in reading order. Right-to-left books place the
//! first page of the pair on the right; cursor arithmetic is the same in
//! both directions.

use crate::types::Side;

/// Number of spreads for a page count, including the cover spread.
///
/// An odd final page gets a spread of its own with an empty partner.
pub fn spread_count(page_count: usize) -> usize {
    1 + page_count.div_ceil(2)
}

/// Spread that shows a given page index
pub fn spread_of_page(page_index: usize) -> usize {
    page_index / 2 + 1
}

/// One side of a spread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpreadSlot {
    Page(usize),
    /// Past the end of an odd-length sequence; drawn as an empty page
    Empty,
}

impl SpreadSlot {
    pub fn page_index(self) -> Option<usize> {
        match self {
            SpreadSlot::Page(i) => Some(i),
            SpreadSlot::Empty => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spread {
    /// Rendered from book metadata, not from the page sequence
    Cover,
    Pages { left: SpreadSlot, right: SpreadSlot },
}

impl Spread {
    pub fn slot(&self, side: Side) -> Option<SpreadSlot> {
        match (self, side) {
            (Spread::Cover, _) => None,
            (Spread::Pages { left, .. }, Side::Left) => Some(*left),
            (Spread::Pages { right, .. }, Side::Right) => Some(*right),
        }
    }
}

/// Compute the spread at `cursor` for a sequence of `page_count` pages.
/// Out-of-range cursors are clamped to the last spread.
pub fn spread_at(cursor: usize, page_count: usize, is_rtl: bool) -> Spread {
    let cursor = cursor.min(spread_count(page_count) - 1);
    if cursor == 0 {
        return Spread::Cover;
    }
    let first = 2 * (cursor - 1);
    let slot = |i: usize| {
        if i < page_count {
            SpreadSlot::Page(i)
        } else {
            SpreadSlot::Empty
        }
    };
    let (reading_first, reading_second) = (slot(first), slot(first + 1));
    if is_rtl {
        Spread::Pages {
            left: reading_second,
            right: reading_first,
        }
    } else {
        Spread::Pages {
            left: reading_first,
            right: reading_second,
        }
    }
}

/// Cursor over the spreads of a page sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpreadNavigator {
    page_count: usize,
    is_rtl: bool,
    cursor: usize,
}

impl SpreadNavigator {
    pub fn new(page_count: usize, is_rtl: bool) -> Self {
        Self {
            page_count,
            is_rtl,
            cursor: 0,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn spread_count(&self) -> usize {
        spread_count(self.page_count)
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn is_rtl(&self) -> bool {
        self.is_rtl
    }

    pub fn current(&self) -> Spread {
        spread_at(self.cursor, self.page_count, self.is_rtl)
    }

    /// Jump to a cursor, clamping into `[0, spread_count - 1]`
    pub fn go_to(&mut self, cursor: isize) -> Spread {
        let last = self.spread_count() - 1;
        self.cursor = usize::try_from(cursor).unwrap_or(0).min(last);
        self.current()
    }

    /// Advance one spread in reading order; stays put on the last spread
    pub fn next(&mut self) -> Spread {
        if self.cursor + 1 < self.spread_count() {
            self.cursor += 1;
        }
        self.current()
    }

    /// Go back one spread in reading order; stays put on the cover
    pub fn previous(&mut self) -> Spread {
        self.cursor = self.cursor.saturating_sub(1);
        self.current()
    }

    pub fn can_go_next(&self) -> bool {
        self.cursor + 1 < self.spread_count()
    }

    pub fn can_go_previous(&self) -> bool {
        self.cursor > 0
    }

    /// Show the spread containing `page_index`
    pub fn reveal_page(&mut self, page_index: usize) -> Spread {
        self.go_to(isize::try_from(spread_of_page(page_index)).unwrap_or(isize::MAX))
    }

    /// Physical side of the screen that means "next" in this direction
    pub fn forward_side(&self) -> Side {
        if self.is_rtl { Side::Left } else { Side::Right }
    }

    /// Update after pages were added or removed; the cursor is clamped
    pub fn set_page_count(&mut self, page_count: usize) {
        self.page_count = page_count;
        self.cursor = self.cursor.min(self.spread_count() - 1);
    }

    pub fn set_rtl(&mut self, is_rtl: bool) {
        self.is_rtl = is_rtl;
    }
}

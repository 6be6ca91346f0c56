use std::ops::Range;

use crate::error::{Bound, InvalidRange};

/// Sentinel accepted from the front ends for "through the last page".
pub const LAST_PAGE: i64 = -1;

/// End bound of a user-supplied range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEnd {
    /// 1-based page number, inclusive.
    Page(i64),
    /// Through the last page (`-1`).
    Last,
    /// Leave off this many pages at the end: `-2` drops the last two.
    DropLast(i64),
}

impl From<i64> for PageEnd {
    fn from(value: i64) -> Self {
        match value {
            LAST_PAGE => PageEnd::Last,
            v if v < 0 => PageEnd::DropLast(v.saturating_neg()),
            v => PageEnd::Page(v),
        }
    }
}

/// How strictly a range is checked against the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveMode {
    /// Loading text for a prompt: out-of-range bounds shrink the result.
    Query,
    /// Building a new PDF: every bound must name an existing page.
    Extract,
}

/// A page range as the user typed it, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    pub start: i64,
    pub end: i64,
}

impl Default for PageRange {
    fn default() -> Self {
        PageRange::all()
    }
}

impl PageRange {
    pub fn new(start: i64, end: i64) -> Self {
        PageRange { start, end }
    }

    /// Every page of the document.
    pub fn all() -> Self {
        PageRange::new(1, LAST_PAGE)
    }

    /// Validate against a document with `page_count` pages.
    ///
    /// In [`ResolveMode::Query`], `end` is an inclusive 1-based page (the
    /// same number is the exclusive 0-based slice bound) and `-1` means the
    /// last page. Other negatives are slice bounds from the back, so `-2`
    /// leaves off the last two pages. A start past the end of the document,
    /// an end of `0` or an end before the start all give an empty range.
    /// Only a start below 1 is rejected.
    ///
    /// In [`ResolveMode::Extract`], both bounds are inclusive 1-based pages
    /// with no sentinel values. Each must lie in `1..=page_count` and start
    /// may not come after end, so the result is never empty.
    pub fn resolve(&self, page_count: u32, mode: ResolveMode) -> Result<ResolvedRange, InvalidRange> {
        let resolved = match mode {
            ResolveMode::Query => self.resolve_query(page_count)?,
            ResolveMode::Extract => self.resolve_extract(page_count)?,
        };

        tracing::debug!(
            start = self.start,
            end = self.end,
            page_count,
            ?mode,
            indices = ?resolved.indices(),
            "resolved page range"
        );

        Ok(resolved)
    }

    fn resolve_query(&self, page_count: u32) -> Result<ResolvedRange, InvalidRange> {
        if self.start < 1 {
            return Err(InvalidRange::StartBelowOne { start: self.start });
        }

        let count = i64::from(page_count);
        let start_index = (self.start - 1).min(count);

        let end_exclusive = match PageEnd::from(self.end) {
            PageEnd::Page(page) => page.min(count),
            PageEnd::Last => count,
            PageEnd::DropLast(n) => (count - n).max(0),
        };

        Ok(ResolvedRange::from_indices(
            start_index,
            end_exclusive.max(start_index),
        ))
    }

    fn resolve_extract(&self, page_count: u32) -> Result<ResolvedRange, InvalidRange> {
        let count = i64::from(page_count);

        for (bound, page) in [(Bound::Start, self.start), (Bound::End, self.end)] {
            if !(1..=count).contains(&page) {
                return Err(InvalidRange::OutOfBounds {
                    bound,
                    page,
                    page_count,
                });
            }
        }

        if self.start > self.end {
            return Err(InvalidRange::StartAfterEnd {
                start: self.start,
                end: self.end,
            });
        }

        Ok(ResolvedRange::from_indices(self.start - 1, self.end))
    }
}

/// A range checked against a specific document, as 0-based indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedRange {
    start_index: usize,
    end_index: usize,
}

impl ResolvedRange {
    // Callers guarantee 0 <= start <= end.
    fn from_indices(start: i64, end_exclusive: i64) -> Self {
        ResolvedRange {
            start_index: start as usize,
            end_index: end_exclusive as usize,
        }
    }

    /// Half-open 0-based indices, ready for slicing.
    pub fn indices(&self) -> Range<usize> {
        self.start_index..self.end_index
    }

    pub fn len(&self) -> usize {
        self.end_index - self.start_index
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 1-based number of the first selected page.
    pub fn first_page(&self) -> u32 {
        self.start_index as u32 + 1
    }

    /// 1-based number of the last selected page. Meaningless when empty.
    pub fn last_page(&self) -> u32 {
        self.end_index as u32
    }

    pub fn contains_page(&self, page: u32) -> bool {
        !self.is_empty() && (self.first_page()..=self.last_page()).contains(&page)
    }
}

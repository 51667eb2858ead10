use thiserror::Error;

/// A page capacity below one line cannot form a page window.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("page size must be at least 1, got {0}")]
pub struct InvalidPageSize(pub usize);

/// Fixed-capacity page cursor over a growing line list.
///
/// Tracks only `(line_count, cursor)`; pages are derived windows, never
/// stored. Navigation clamps at both ends. Appended lines move the cursor
/// only when it already sat on the last page (auto-follow); a cursor parked
/// on an earlier page stays put while the user reviews history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
    line_count: usize,
    cursor: usize,
}

impl Paginator {
    pub fn new(page_size: usize) -> Result<Self, InvalidPageSize> {
        if page_size == 0 {
            return Err(InvalidPageSize(0));
        }
        Ok(Self {
            page_size,
            line_count: 0,
            cursor: 0,
        })
    }

    /// Back to the empty state: no lines, cursor on the first (empty) page.
    pub fn reset(&mut self) {
        self.line_count = 0;
        self.cursor = 0;
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn line_count(&self) -> usize {
        self.line_count
    }

    /// Number of pages; at least 1 even with no lines (one empty page).
    pub fn page_count(&self) -> usize {
        if self.line_count == 0 {
            1
        } else {
            self.line_count.div_ceil(self.page_size)
        }
    }

    pub fn on_first_page(&self) -> bool {
        self.cursor == 0
    }

    pub fn on_last_page(&self) -> bool {
        self.cursor == self.page_count() - 1
    }

    /// Whether the page containing the last line is currently displayed.
    ///
    /// An in-place edit of the last line changes no pagination state; the
    /// edit is visible exactly when this returns true.
    pub fn showing_latest(&self) -> bool {
        self.on_last_page()
    }

    /// Record `count` appended lines.
    ///
    /// The follow decision compares against the last-page index from
    /// *before* the append: a cursor that sat there advances to the new
    /// last page, any other cursor is left alone.
    pub fn on_lines_appended(&mut self, count: usize) {
        let was_following = self.on_last_page();
        self.line_count += count;
        if was_following {
            self.cursor = self.page_count() - 1;
        }
    }

    /// Advance one page; stays put at the last page.
    pub fn next_page(&mut self) -> bool {
        if self.on_last_page() {
            false
        } else {
            self.cursor += 1;
            true
        }
    }

    /// Go back one page; stays put at the first page.
    pub fn previous_page(&mut self) -> bool {
        if self.cursor == 0 {
            false
        } else {
            self.cursor -= 1;
            true
        }
    }

    /// Bounds of the current page window over the line list (`start..end`).
    pub fn page_bounds(&self) -> (usize, usize) {
        let start = (self.cursor * self.page_size).min(self.line_count);
        let end = (start + self.page_size).min(self.line_count);
        (start, end)
    }

    /// Slice the current page out of `lines`.
    ///
    /// `lines` must be the list whose growth was reported through
    /// `on_lines_appended`; the window is empty when no lines exist.
    pub fn current_page<'a>(&self, lines: &'a [String]) -> &'a [String] {
        let (start, end) = self.page_bounds();
        &lines[start..end]
    }

    /// `cur/total` page indicator, 1-indexed for display.
    pub fn indicator(&self) -> String {
        format!("{}/{}", self.cursor + 1, self.page_count())
    }
}

//! The streaming-response engine: line assembly plus pagination.
//!
//! One `ResponseView` exists per capture cycle. Appends and navigation
//! interleave at event granularity; every operation takes `&mut self`, so
//! no caller can observe a partially-applied update.

pub mod assembler;
pub mod paginator;

pub use assembler::{AppendDelta, TextAssembler};
pub use paginator::{InvalidPageSize, Paginator};

/// How one operation changed what the wearable page view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageImpact {
    /// The displayed page's content or position changed and should be
    /// retransmitted to the device.
    pub page_changed: bool,
    /// The cursor moved (auto-follow).
    pub cursor_moved: bool,
}

/// One capture cycle's response: the assembled line list and its page cursor.
pub struct ResponseView {
    assembler: TextAssembler,
    paginator: Paginator,
}

impl ResponseView {
    pub fn new(page_size: usize) -> Result<Self, InvalidPageSize> {
        Ok(Self {
            assembler: TextAssembler::new(),
            paginator: Paginator::new(page_size)?,
        })
    }

    /// Clear both halves for a new capture cycle.
    pub fn reset(&mut self) {
        self.assembler.reset();
        self.paginator.reset();
    }

    /// Feed one stream fragment through the assembler and notify the
    /// paginator of the delta.
    pub fn push_fragment(&mut self, fragment: &str) -> PageImpact {
        let cursor_before = self.paginator.cursor();
        let delta = self.assembler.append_fragment(fragment);
        if delta.new_lines > 0 {
            self.paginator.on_lines_appended(delta.new_lines);
        }
        let cursor_moved = self.paginator.cursor() != cursor_before;
        // Only the last page can gain lines or grow its tail line; pages the
        // user paged back to are already full and never change.
        let page_changed =
            cursor_moved || (!delta.is_empty() && self.paginator.showing_latest());
        PageImpact {
            page_changed,
            cursor_moved,
        }
    }

    /// Append `message` as its own line through the ordinary fragment path.
    ///
    /// Error text is stored exactly like generated text; a leading break is
    /// only needed once content is already present.
    pub fn push_error_line(&mut self, message: &str) -> PageImpact {
        if self.assembler.is_empty() {
            self.push_fragment(message)
        } else {
            self.push_fragment(&format!("\n{message}"))
        }
    }

    pub fn next_page(&mut self) -> bool {
        self.paginator.next_page()
    }

    pub fn previous_page(&mut self) -> bool {
        self.paginator.previous_page()
    }

    /// The slice of lines on the current page; empty before any content.
    pub fn current_page(&self) -> &[String] {
        self.paginator.current_page(self.assembler.lines())
    }

    pub fn lines(&self) -> &[String] {
        self.assembler.lines()
    }

    pub fn joined(&self) -> String {
        self.assembler.joined()
    }

    pub fn is_empty(&self) -> bool {
        self.assembler.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.assembler.line_count()
    }

    pub fn page_count(&self) -> usize {
        self.paginator.page_count()
    }

    pub fn page_size(&self) -> usize {
        self.paginator.page_size()
    }

    pub fn cursor(&self) -> usize {
        self.paginator.cursor()
    }

    pub fn indicator(&self) -> String {
        self.paginator.indicator()
    }
}

use std::io::{self, Write};
use std::path::Path;

use crossterm::style::Print;
use crossterm::{cursor, queue, terminal};

use super::theme;

/// Tracks terminal output state and produces colored output.
///
/// The wearable panel is a live block kept at the bottom of the scrollback:
/// every print erases it first, so the newest content lands above it and
/// the block can be redrawn in place.
pub struct Renderer<W: Write = io::Stdout> {
    /// Rows occupied by the live panel block, 0 when none is on screen.
    panel_rows: usize,
    /// Writer for output.
    out: W,
}

impl Default for Renderer<io::Stdout> {
    fn default() -> Self {
        Self {
            panel_rows: 0,
            out: io::stdout(),
        }
    }
}

impl Renderer<io::Stdout> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<W: Write> Renderer<W> {
    pub fn with_writer(writer: W) -> Self {
        Self {
            panel_rows: 0,
            out: writer,
        }
    }

    pub fn render_help(&mut self) {
        self.erase_panel();
        let help = "space capture · ←/→ flip pages · s share · q quit";
        queue!(self.out, Print(theme::dim().apply(help)), Print("\r\n")).ok();
        self.out.flush().ok();
    }

    /// Announce a new capture cycle: the image source and the prompt in use.
    pub fn render_capture_header(&mut self, source: &str, prompt: &str) {
        self.erase_panel();
        queue!(
            self.out,
            Print(theme::dim().apply(format!("Capturing  {source}"))),
            Print("\r\n"),
            Print(theme::prompt_style().apply(format!("> {prompt}"))),
            Print("\r\n"),
        )
        .ok();
        self.out.flush().ok();
    }

    /// Redraw the wearable panel block in place.
    pub fn render_panel(&mut self, rows: &[String]) {
        self.erase_panel();
        for row in rows {
            queue!(self.out, Print(row), Print("\r\n")).ok();
        }
        self.panel_rows = rows.len();
        self.out.flush().ok();
    }

    /// Print the full assembled transcript (the host-screen view), one
    /// response line per terminal row.
    pub fn render_transcript(&mut self, lines: &[String]) {
        self.erase_panel();
        for line in lines {
            queue!(self.out, Print(line), Print("\r\n")).ok();
        }
        self.out.flush().ok();
    }

    pub fn render_result(
        &mut self,
        completed: bool,
        duration_ms: u64,
        fragments: usize,
        line_count: usize,
        page_count: usize,
    ) {
        self.erase_panel();
        // Round to tenths of a second (add 50ms to round instead of truncate)
        let rounded = duration_ms + 50;
        let whole_secs = rounded / 1000;
        let tenths = (rounded % 1000) / 100;

        let (label, style) = if completed {
            ("Done", theme::result_line())
        } else {
            ("Error", theme::error())
        };
        let fragment_word = if fragments == 1 { "fragment" } else { "fragments" };
        let line_word = if line_count == 1 { "line" } else { "lines" };
        let page_word = if page_count == 1 { "page" } else { "pages" };
        let stats = format!(
            "  {whole_secs}.{tenths}s · {fragments} {fragment_word} · \
             {line_count} {line_word} · {page_count} {page_word}"
        );
        queue!(
            self.out,
            Print(style.apply(label)),
            Print(theme::dim().apply(stats)),
            Print("\r\n"),
            Print("\r\n"),
        )
        .ok();
        self.out.flush().ok();
    }

    pub fn render_warning(&mut self, warning: &str) {
        self.erase_panel();
        queue!(
            self.out,
            Print(theme::dim().apply(format!("[warn] {warning}"))),
            Print("\r\n"),
        )
        .ok();
        self.out.flush().ok();
    }

    /// A transient dim notice, e.g. `[capture in progress]`.
    pub fn render_notice(&mut self, notice: &str) {
        self.erase_panel();
        queue!(
            self.out,
            Print(theme::dim().apply(format!("[{notice}]"))),
            Print("\r\n"),
        )
        .ok();
        self.out.flush().ok();
    }

    pub fn render_share_notice(&mut self, path: &Path) {
        self.erase_panel();
        queue!(
            self.out,
            Print(theme::dim().apply(format!("shared to {}", path.display()))),
            Print("\r\n"),
        )
        .ok();
        self.out.flush().ok();
    }

    /// Erase the live panel block so the next print lands above it.
    fn erase_panel(&mut self) {
        if self.panel_rows == 0 {
            return;
        }
        let rows = u16::try_from(self.panel_rows).unwrap_or(u16::MAX);
        queue!(
            self.out,
            cursor::MoveUp(rows),
            cursor::MoveToColumn(0),
            terminal::Clear(terminal::ClearType::FromCursorDown),
        )
        .ok();
        self.panel_rows = 0;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn transcript_prints_each_line() {
        let mut out = Vec::new();
        let mut renderer = Renderer::with_writer(&mut out);
        let lines = vec!["first".to_string(), "second".to_string()];
        renderer.render_transcript(&lines);
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("first\r\n"));
        assert!(output.contains("second\r\n"));
    }

    #[test]
    fn result_line_reports_counts() {
        let mut out = Vec::new();
        let mut renderer = Renderer::with_writer(&mut out);
        renderer.render_result(true, 2240, 34, 12, 3);
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("Done"));
        assert!(output.contains("2.2s · 34 fragments · 12 lines · 3 pages"));
    }

    #[test]
    fn failed_result_uses_the_error_label() {
        let mut out = Vec::new();
        let mut renderer = Renderer::with_writer(&mut out);
        renderer.render_result(false, 0, 0, 1, 1);
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("Error"));
        assert!(output.contains("1 line · 1 page"));
    }

    #[test]
    fn panel_redraw_moves_up_over_the_old_block() {
        let mut out = Vec::new();
        let mut renderer = Renderer::with_writer(&mut out);
        let rows = vec!["┌──┐".to_string(), "└──┘".to_string()];
        renderer.render_panel(&rows);
        renderer.render_panel(&rows);
        let output = String::from_utf8(out).unwrap();
        // The second draw climbs over the first block's two rows
        assert!(output.contains("\x1b[2A"));
    }

    #[test]
    fn first_panel_draw_does_not_move_the_cursor() {
        let mut out = Vec::new();
        let mut renderer = Renderer::with_writer(&mut out);
        renderer.render_panel(&["x".to_string()]);
        let output = String::from_utf8(out).unwrap();
        assert!(!output.contains("\x1b[1A"));
    }
}

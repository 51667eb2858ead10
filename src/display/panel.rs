//! Wearable panel emulation.
//!
//! Formats the current page exactly as it would be transmitted to the
//! device: a fixed grid of `page_size` rows by `panel_columns` cells, with
//! a page indicator worked into the bottom border. The block height is
//! constant, so the renderer can redraw it in place.

use std::io::Write;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::display::renderer::Renderer;
use crate::response::ResponseView;

/// Rows added by the top and bottom border.
pub const BORDER_ROWS: usize = 2;

/// Render `view`'s current page into the renderer's live panel block.
pub fn render_view<W: Write>(renderer: &mut Renderer<W>, view: &ResponseView, columns: usize) {
    let rows = format_page(
        view.current_page(),
        view.page_size(),
        columns,
        &view.indicator(),
    );
    renderer.render_panel(&rows);
}

/// Lay out one page as bordered rows. Short pages pad with blank rows so
/// the block height never varies.
pub fn format_page(page: &[String], rows: usize, columns: usize, indicator: &str) -> Vec<String> {
    let mut out = Vec::with_capacity(rows + BORDER_ROWS);
    out.push(format!("┌{}┐", "─".repeat(columns)));
    for i in 0..rows {
        let text = page.get(i).map_or("", String::as_str);
        out.push(format!("│{}│", pad_to_width(text, columns)));
    }
    out.push(bottom_border(columns, indicator));
    out
}

/// Bottom border with the indicator right-aligned: `└──────2/3─┘`.
/// Falls back to a plain border when the indicator doesn't fit.
fn bottom_border(columns: usize, indicator: &str) -> String {
    let ind_width = indicator.width();
    if ind_width + 1 > columns {
        return format!("└{}┘", "─".repeat(columns));
    }
    format!("└{}{indicator}─┘", "─".repeat(columns - ind_width - 1))
}

/// Fit `text` into exactly `columns` display cells: truncate with a
/// trailing `…` when too wide, pad with spaces when too narrow.
fn pad_to_width(text: &str, columns: usize) -> String {
    let mut fitted = truncate_to_width(text, columns);
    let width = fitted.width();
    fitted.extend(std::iter::repeat_n(' ', columns - width));
    fitted
}

/// Truncate a string to at most `max_width` display cells, ending with `…`
/// when cut. Wide glyphs count by their column width, not char count.
fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut width = 0;
    // Byte position where `…` would replace the tail
    let mut cut_pos = 0;
    let mut result = String::new();
    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width {
            if max_width >= 1 {
                result.truncate(cut_pos);
                result.push('…');
            } else {
                result.clear();
            }
            return result;
        }
        result.push(ch);
        width += ch_width;
        // Track the latest position that leaves room for the ellipsis
        if width <= max_width.saturating_sub(1) {
            cut_pos = result.len();
        }
    }
    result
}

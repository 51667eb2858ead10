//! Terminal display styles.
//!
//! All styles use only named ANSI colors (Black, Red, Green, Yellow, Blue,
//! Magenta, Cyan, White) so that colors adapt to the user's terminal theme.
//! Avoid `Color::Rgb`, `Color::AnsiValue`, and bright variants — these bypass
//! the user's palette and may be unreadable on some backgrounds.

use crossterm::style::{Attribute, Color, ContentStyle};

pub fn dim() -> ContentStyle {
    ContentStyle {
        attributes: Attribute::Dim.into(),
        ..Default::default()
    }
}

pub fn error() -> ContentStyle {
    ContentStyle {
        foreground_color: Some(Color::Red),
        ..Default::default()
    }
}

pub fn result_line() -> ContentStyle {
    ContentStyle {
        foreground_color: Some(Color::Green),
        attributes: Attribute::Bold.into(),
        ..Default::default()
    }
}

pub fn prompt_style() -> ContentStyle {
    ContentStyle {
        foreground_color: Some(Color::Cyan),
        attributes: Attribute::Bold.into(),
        ..Default::default()
    }
}

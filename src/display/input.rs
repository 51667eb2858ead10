use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Action mapped from one key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    None,
    /// Start a new capture cycle (ignored while one is in flight).
    Capture,
    /// Flip to the next page.
    NextPage,
    /// Flip to the previous page.
    PreviousPage,
    /// Write the share bundle for the current response.
    Share,
    /// Ctrl-C: abort the in-flight generation, or quit when idle.
    Interrupt,
    /// Quit (q, Esc, Ctrl-D).
    Quit,
}

/// Map a terminal key event to its action.
///
/// Navigation stands in for the device's two tap zones; arrows and vim
/// keys both work.
pub fn map_key(event: &KeyEvent) -> InputAction {
    match event.code {
        KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => {
            InputAction::Interrupt
        }
        KeyCode::Char('d') if event.modifiers.contains(KeyModifiers::CONTROL) => InputAction::Quit,
        KeyCode::Char('q') | KeyCode::Esc => InputAction::Quit,
        KeyCode::Char(' ' | 'c') | KeyCode::Enter => InputAction::Capture,
        KeyCode::Right | KeyCode::PageDown | KeyCode::Char('l' | 'n') => InputAction::NextPage,
        KeyCode::Left | KeyCode::PageUp | KeyCode::Char('h' | 'p') => InputAction::PreviousPage,
        KeyCode::Char('s') => InputAction::Share,
        _ => InputAction::None,
    }
}

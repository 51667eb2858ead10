use crate::protocol::types::GenEvent;

/// Unified application event consumed by the capture event loop.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// An event parsed from the generator's stdout stream.
    Generator(Box<GenEvent>),
    /// A warning about an unparseable line from the generator's stdout.
    ParseWarning(String),
    /// The generator process has exited.
    ProcessExit(Option<i32>),
    /// The settings file changed on disk (applied between captures).
    SettingsChanged,
}

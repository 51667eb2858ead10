use std::io::Write;

use anyhow::Result;
use crossterm::event::Event;

use crate::config::Settings;
use crate::display::input::{self, InputAction};
use crate::display::panel;
use crate::display::renderer::Renderer;
use crate::event::AppEvent;
use crate::io::{Io, IoEvent};
use crate::response::ResponseView;
use crate::session::runner::GeneratorRunner;
use crate::session::state::{CaptureState, CaptureStatus};
use crate::share;

/// How a generation stream ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The stream completed normally.
    Completed,
    /// The stream failed or the generator died; partial content retained.
    Failed,
    /// The user cancelled the stream; partial content retained.
    Aborted,
    /// The user asked to quit the app mid-stream.
    Quit,
}

/// Drive one generation stream to completion.
///
/// Fragments stream into the response view while navigation taps are
/// served; the two sources interleave freely, one event at a time, so no
/// append is ever observed half-applied by a navigation (or vice versa).
pub async fn run_generation<W: Write>(
    runner: &mut GeneratorRunner,
    state: &mut CaptureState,
    view: &mut ResponseView,
    renderer: &mut Renderer<W>,
    settings: &Settings,
    settings_dirty: &mut bool,
    io: &mut Io,
) -> Result<CycleOutcome> {
    loop {
        match io.next_event().await {
            IoEvent::App(AppEvent::Generator(event)) => {
                if let Some(outcome) = crate::handle_generator_event(
                    &event,
                    state,
                    view,
                    renderer,
                    settings.panel_columns,
                ) {
                    return Ok(outcome);
                }
            }
            IoEvent::App(AppEvent::ParseWarning(warning)) => {
                renderer.render_warning(&warning);
                panel::render_view(renderer, view, settings.panel_columns);
            }
            IoEvent::App(AppEvent::ProcessExit(code)) => {
                state.status = CaptureStatus::Failed;
                let detail = code.map_or(String::new(), |c| format!(" (code {c})"));
                view.push_error_line(&format!("Error: generator exited unexpectedly{detail}"));
                panel::render_view(renderer, view, settings.panel_columns);
                return Ok(CycleOutcome::Failed);
            }
            IoEvent::App(AppEvent::SettingsChanged) => {
                // Settings apply between cycles; just remember it happened.
                *settings_dirty = true;
            }
            IoEvent::Terminal(Event::Key(key)) => match input::map_key(&key) {
                InputAction::NextPage => {
                    if view.next_page() {
                        panel::render_view(renderer, view, settings.panel_columns);
                    }
                }
                InputAction::PreviousPage => {
                    if view.previous_page() {
                        panel::render_view(renderer, view, settings.panel_columns);
                    }
                }
                InputAction::Capture => {
                    // Single-flight: this cycle is still running.
                    renderer.render_notice("capture already in progress");
                    panel::render_view(renderer, view, settings.panel_columns);
                }
                InputAction::Share => {
                    share_response(settings, view, state.image.as_deref(), renderer);
                    panel::render_view(renderer, view, settings.panel_columns);
                }
                InputAction::Interrupt => {
                    runner.kill().await.ok();
                    state.status = CaptureStatus::Failed;
                    view.push_error_line("Error: generation cancelled");
                    panel::render_view(renderer, view, settings.panel_columns);
                    return Ok(CycleOutcome::Aborted);
                }
                InputAction::Quit => {
                    runner.kill().await.ok();
                    return Ok(CycleOutcome::Quit);
                }
                InputAction::None => {}
            },
            IoEvent::Terminal(_) => {}
            IoEvent::Closed => {
                runner.kill().await.ok();
                return Ok(CycleOutcome::Quit);
            }
        }
    }
}

/// Write the share bundle for the current response and report the result.
pub fn share_response<W: Write>(
    settings: &Settings,
    view: &ResponseView,
    image: Option<&[u8]>,
    renderer: &mut Renderer<W>,
) {
    if view.is_empty() {
        renderer.render_notice("nothing to share yet");
        return;
    }
    match share::write_bundle(&settings.share_dir, &view.joined(), image) {
        Ok(path) => renderer.render_share_notice(&path),
        Err(e) => renderer.render_warning(&format!("share failed: {e:#}")),
    }
}

use std::io::Write;

use display::panel;
use display::renderer::Renderer;
use protocol::types::GenEvent;
use response::ResponseView;
use session::event_loop::CycleOutcome;
use session::state::{CaptureState, CaptureStatus};

pub mod capture;
pub mod commands;
pub mod config;
pub mod display;
pub mod event;
pub mod io;
pub mod protocol;
pub mod response;
pub mod session;
pub mod share;

/// Handle one generator event: update capture state and the response view,
/// and redraw the wearable panel when the displayed page changed.
///
/// Returns the cycle outcome once the stream has ended.
pub fn handle_generator_event<W: Write>(
    event: &GenEvent,
    state: &mut CaptureState,
    view: &mut ResponseView,
    renderer: &mut Renderer<W>,
    panel_columns: usize,
) -> Option<CycleOutcome> {
    match event {
        GenEvent::Fragment(fragment) => {
            state.fragments += 1;
            let impact = view.push_fragment(&fragment.text);
            if impact.page_changed {
                panel::render_view(renderer, view, panel_columns);
            }
            None
        }
        GenEvent::Done(done) => {
            state.status = CaptureStatus::Complete;
            state.duration_ms = done.duration_ms;
            Some(CycleOutcome::Completed)
        }
        GenEvent::Error(error) => {
            state.status = CaptureStatus::Failed;
            let message = if error.message.is_empty() {
                "Error: generation failed".to_string()
            } else {
                format!("Error: {}", error.message)
            };
            let impact = view.push_error_line(&message);
            if impact.page_changed {
                panel::render_view(renderer, view, panel_columns);
            }
            Some(CycleOutcome::Failed)
        }
        GenEvent::Other => None,
    }
}

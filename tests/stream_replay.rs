#![allow(clippy::unwrap_used)]

use glint::display::renderer::Renderer;
use glint::handle_generator_event;
use glint::protocol::parse::parse_line;
use glint::response::ResponseView;
use glint::session::event_loop::CycleOutcome;
use glint::session::state::{CaptureState, CaptureStatus};

const PANEL_COLUMNS: usize = 24;

fn streaming_state() -> CaptureState {
    let mut state = CaptureState::default();
    state.begin_capture();
    state.status = CaptureStatus::Streaming;
    state
}

/// Feed one scripted generator stdout line through parse → glue → render.
fn feed<W: std::io::Write>(
    line: &str,
    state: &mut CaptureState,
    view: &mut ResponseView,
    renderer: &mut Renderer<W>,
) -> Option<CycleOutcome> {
    match parse_line(line) {
        Ok(Some(event)) => handle_generator_event(&event, state, view, renderer, PANEL_COLUMNS),
        Ok(None) => None,
        Err(e) => {
            renderer.render_warning(&format!("parse error: {e}"));
            None
        }
    }
}

/// Replay scripted generator output, capturing state and terminal bytes.
fn replay(
    lines: &[&str],
    page_size: usize,
) -> (CaptureState, ResponseView, Vec<CycleOutcome>, String) {
    let mut output = Vec::new();
    let mut renderer = Renderer::with_writer(&mut output);
    let mut state = streaming_state();
    let mut view = ResponseView::new(page_size).unwrap();
    let mut outcomes = Vec::new();

    for line in lines {
        if let Some(outcome) = feed(line, &mut state, &mut view, &mut renderer) {
            outcomes.push(outcome);
        }
    }
    drop(renderer);
    (state, view, outcomes, String::from_utf8(output).unwrap())
}

#[test]
fn streamed_response_assembles_and_follows() {
    let script = [
        r#"{"type":"fragment","text":"A red bicycle "}"#,
        r#"{"type":"fragment","text":"leaning on a wall."}"#,
        r#"{"type":"fragment","text":"\nThe paint is "}"#,
        r#"{"type":"fragment","text":"chipped.\nA basket hangs"}"#,
        r#"{"type":"fragment","text":" from the bars."}"#,
        r#"{"type":"done","duration_ms":1800}"#,
    ];
    let (state, view, outcomes, output) = replay(&script, 2);

    assert_eq!(
        view.lines(),
        [
            "A red bicycle leaning on a wall.",
            "The paint is chipped.",
            "A basket hangs from the bars.",
        ]
    );
    assert_eq!(
        view.joined(),
        "A red bicycle leaning on a wall.\nThe paint is chipped.\nA basket hangs from the bars."
    );
    assert_eq!(view.page_count(), 2);
    assert_eq!(view.cursor(), 1, "cursor follows the newest page");
    assert_eq!(outcomes, [CycleOutcome::Completed]);
    assert_eq!(state.status, CaptureStatus::Complete);
    assert_eq!(state.fragments, 5);
    assert_eq!(state.duration_ms, 1800);
    assert!(output.contains('┌'), "panel block was drawn");
}

#[test]
fn finished_response_stays_navigable() {
    let script = [
        r#"{"type":"fragment","text":"a\nb\nc\nd\ne"}"#,
        r#"{"type":"done","duration_ms":500}"#,
    ];
    let (_, mut view, _, _) = replay(&script, 2);

    assert_eq!(view.current_page(), ["e"]);
    assert!(view.previous_page());
    assert_eq!(view.current_page(), ["c", "d"]);
    assert!(view.next_page());
    assert!(!view.next_page(), "clamped at the last page");
    assert_eq!(view.current_page(), ["e"]);
}

#[test]
fn paging_back_mid_stream_is_not_disturbed() {
    let mut output = Vec::new();
    let mut renderer = Renderer::with_writer(&mut output);
    let mut state = streaming_state();
    let mut view = ResponseView::new(2).unwrap();

    assert!(
        feed(
            r#"{"type":"fragment","text":"a\nb\nc\nd"}"#,
            &mut state,
            &mut view,
            &mut renderer,
        )
        .is_none()
    );
    assert_eq!(view.cursor(), 1);
    assert!(view.previous_page());

    assert!(
        feed(
            r#"{"type":"fragment","text":"\ne\nf"}"#,
            &mut state,
            &mut view,
            &mut renderer,
        )
        .is_none()
    );
    assert_eq!(view.cursor(), 0, "review position survives the append");
    assert_eq!(view.current_page(), ["a", "b"]);
    assert_eq!(view.page_count(), 3);
}

#[test]
fn error_event_lands_as_an_ordinary_line() {
    let script = [
        r#"{"type":"fragment","text":"Partial description"}"#,
        r#"{"type":"error","message":"invalid credential"}"#,
    ];
    let (state, view, outcomes, _) = replay(&script, 5);

    assert_eq!(
        view.lines(),
        ["Partial description", "Error: invalid credential"]
    );
    assert_eq!(
        view.joined(),
        "Partial description\nError: invalid credential"
    );
    assert_eq!(outcomes, [CycleOutcome::Failed]);
    assert_eq!(state.status, CaptureStatus::Failed);
}

#[test]
fn error_without_message_gets_a_generic_line() {
    let script = [r#"{"type":"error"}"#];
    let (_, view, outcomes, _) = replay(&script, 5);
    assert_eq!(view.lines(), ["Error: generation failed"]);
    assert_eq!(outcomes, [CycleOutcome::Failed]);
}

#[test]
fn unknown_events_and_blank_lines_are_ignored() {
    let script = [
        "",
        r#"{"type":"usage","tokens":12}"#,
        r#"{"type":"fragment","text":"still fine"}"#,
    ];
    let (state, view, outcomes, _) = replay(&script, 5);
    assert_eq!(view.lines(), ["still fine"]);
    assert!(outcomes.is_empty());
    assert_eq!(state.fragments, 1);
}

#[test]
fn malformed_line_warns_and_the_stream_continues() {
    let script = [
        r#"{"type":"fragment","text":"before"}"#,
        "{not json",
        r#"{"type":"fragment","text":" after"}"#,
    ];
    let (_, view, _, output) = replay(&script, 5);
    assert_eq!(view.lines(), ["before after"]);
    assert!(output.contains("[warn]"));
}

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::Event;

use crate::capture::{self, CaptureSource};
use crate::config::{self, Settings};
use crate::display::input::{self, InputAction};
use crate::display::panel;
use crate::display::renderer::Renderer;
use crate::event::AppEvent;
use crate::io::{Io, IoEvent};
use crate::protocol::emit;
use crate::response::ResponseView;
use crate::session::event_loop::{self, CycleOutcome};
use crate::session::runner::GeneratorRunner;
use crate::session::state::{CaptureState, CaptureStatus};

use super::RawModeGuard;

pub struct RunConfig {
    /// Capture from this file instead of the camera command.
    pub image: Option<PathBuf>,
    /// Capture immediately on startup instead of waiting for a key.
    pub capture_on_start: bool,
    pub prompt_override: Option<String>,
    pub generator_override: Option<String>,
    pub page_size_override: Option<usize>,
}

impl RunConfig {
    /// CLI overrides win over the settings file, including after reloads.
    fn apply_overrides(&self, settings: &mut Settings) {
        if let Some(ref prompt) = self.prompt_override {
            settings.prompt = prompt.clone();
        }
        if let Some(ref generator) = self.generator_override {
            settings.generator_command = generator.clone();
        }
        if let Some(page_size) = self.page_size_override {
            settings.page_size = page_size;
        }
    }
}

/// Run the interactive capture loop: wait for a capture key, drive one
/// capture-generate-render cycle, and keep the finished response navigable
/// until the next capture.
pub async fn run<W: Write>(
    options: RunConfig,
    mut settings: Settings,
    io: &mut Io,
    writer: W,
) -> Result<()> {
    options.apply_overrides(&mut settings);
    settings.validate().context("invalid settings")?;

    let mut renderer = Renderer::with_writer(writer);
    let _raw = RawModeGuard::acquire()?;
    let _watcher = config::watch(Path::new("."), io.app_sender())?;
    renderer.render_help();

    let mut view = ResponseView::new(settings.page_size).context("invalid page_size")?;
    let mut state = CaptureState::default();
    let mut settings_dirty = false;

    if options.capture_on_start
        && run_cycle(
            &options,
            &settings,
            &mut state,
            &mut view,
            &mut renderer,
            &mut settings_dirty,
            io,
        )
        .await?
    {
        return Ok(());
    }

    loop {
        match io.next_event().await {
            IoEvent::Closed => break,
            IoEvent::App(AppEvent::SettingsChanged) => settings_dirty = true,
            IoEvent::App(_) => {} // stale generator events between cycles
            IoEvent::Terminal(Event::Key(key)) => match input::map_key(&key) {
                InputAction::Capture => {
                    if !state.can_start_capture() {
                        continue;
                    }
                    if settings_dirty {
                        reload_settings(&options, &mut settings, &mut renderer);
                        settings_dirty = false;
                        view = ResponseView::new(settings.page_size)
                            .context("invalid page_size")?;
                    }
                    let quit = run_cycle(
                        &options,
                        &settings,
                        &mut state,
                        &mut view,
                        &mut renderer,
                        &mut settings_dirty,
                        io,
                    )
                    .await?;
                    if quit {
                        break;
                    }
                }
                InputAction::NextPage => {
                    if view.next_page() {
                        panel::render_view(&mut renderer, &view, settings.panel_columns);
                    }
                }
                InputAction::PreviousPage => {
                    if view.previous_page() {
                        panel::render_view(&mut renderer, &view, settings.panel_columns);
                    }
                }
                InputAction::Share => {
                    event_loop::share_response(
                        &settings,
                        &view,
                        state.image.as_deref(),
                        &mut renderer,
                    );
                    if !view.is_empty() {
                        panel::render_view(&mut renderer, &view, settings.panel_columns);
                    }
                }
                InputAction::Interrupt | InputAction::Quit => break,
                InputAction::None => {}
            },
            IoEvent::Terminal(_) => {}
        }
    }
    Ok(())
}

/// One capture → generate → render cycle. Returns true when the user quit.
async fn run_cycle<W: Write>(
    options: &RunConfig,
    settings: &Settings,
    state: &mut CaptureState,
    view: &mut ResponseView,
    renderer: &mut Renderer<W>,
    settings_dirty: &mut bool,
    io: &mut Io,
) -> Result<bool> {
    view.reset();
    state.begin_capture();

    let Some(source) = capture_source(options, settings) else {
        fail_cycle(
            state,
            view,
            renderer,
            settings,
            "Error processing photo: no camera command configured and no --image given",
        );
        return Ok(false);
    };
    renderer.render_capture_header(&source.describe(), &settings.prompt);

    let image = match capture::acquire(&source).await {
        Ok(bytes) => bytes,
        Err(e) => {
            fail_cycle(
                state,
                view,
                renderer,
                settings,
                &format!("Error processing photo: {e:#}"),
            );
            return Ok(false);
        }
    };
    let request = emit::format_request(&settings.prompt, &image)
        .context("failed to encode generation request")?;
    state.image = Some(image);

    let mut runner = match GeneratorRunner::spawn(
        &settings.generator_command_line(),
        settings.api_key.as_deref(),
        &request,
        io.app_sender(),
    )
    .await
    {
        Ok(runner) => runner,
        Err(e) => {
            fail_cycle(state, view, renderer, settings, &format!("Error: {e:#}"));
            return Ok(false);
        }
    };

    state.status = CaptureStatus::Streaming;
    panel::render_view(renderer, view, settings.panel_columns);

    let outcome = event_loop::run_generation(
        &mut runner,
        state,
        view,
        renderer,
        settings,
        settings_dirty,
        io,
    )
    .await?;

    runner.close_input();
    if outcome == CycleOutcome::Quit {
        return Ok(true);
    }
    if tokio::time::timeout(Duration::from_secs(5), runner.wait())
        .await
        .is_err()
    {
        runner.kill().await.ok();
    }
    // Absorb the reader task's trailing events up to its final ProcessExit
    // so a dead generator's events cannot bleed into the next cycle. A
    // settings change that arrived mid-stream is still honored.
    loop {
        match io
            .next_app_event_timeout(Duration::from_millis(500))
            .await
        {
            Some(AppEvent::SettingsChanged) => *settings_dirty = true,
            Some(AppEvent::ProcessExit(_)) | None => break,
            Some(_) => {}
        }
    }

    finish_cycle(
        state,
        view,
        renderer,
        settings,
        outcome == CycleOutcome::Completed,
    );
    Ok(false)
}

/// Completion rendering: full transcript above, result line, live panel
/// below (still navigable until the next capture).
fn finish_cycle<W: Write>(
    state: &CaptureState,
    view: &ResponseView,
    renderer: &mut Renderer<W>,
    settings: &Settings,
    completed: bool,
) {
    renderer.render_transcript(view.lines());
    renderer.render_result(
        completed,
        state.duration_ms,
        state.fragments,
        view.line_count(),
        view.page_count(),
    );
    panel::render_view(renderer, view, settings.panel_columns);
}

/// A cycle that failed before streaming: the error becomes the response.
fn fail_cycle<W: Write>(
    state: &mut CaptureState,
    view: &mut ResponseView,
    renderer: &mut Renderer<W>,
    settings: &Settings,
    message: &str,
) {
    state.status = CaptureStatus::Failed;
    view.push_error_line(message);
    finish_cycle(state, view, renderer, settings, false);
}

fn capture_source(options: &RunConfig, settings: &Settings) -> Option<CaptureSource> {
    if let Some(ref path) = options.image {
        Some(CaptureSource::File(path.clone()))
    } else {
        settings.camera_command_line().map(CaptureSource::Command)
    }
}

/// Reload settings between cycles. A reload that fails keeps the previous
/// settings and surfaces a warning.
fn reload_settings<W: Write>(
    options: &RunConfig,
    settings: &mut Settings,
    renderer: &mut Renderer<W>,
) {
    match config::load(Path::new(".")) {
        Ok(mut loaded) => {
            options.apply_overrides(&mut loaded);
            if let Err(e) = loaded.validate() {
                renderer.render_warning(&format!("settings reload failed: {e:#}"));
                return;
            }
            *settings = loaded;
            renderer.render_notice("settings reloaded");
        }
        Err(e) => renderer.render_warning(&format!("settings reload failed: {e:#}")),
    }
}

mod cli;

use std::path::Path;

use anyhow::Result;
use clap::Parser;
use glint::io::Io;
use glint::{commands, config};

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    install_panic_hook();
    let cli = Cli::parse();
    match cli.command {
        Some(Command::Init) => {
            commands::init::init(Path::new("."), &mut std::io::stdout())?;
        }
        None => {
            let settings = config::load(Path::new("."))?;
            let opts = cli.capture_opts;
            let options = commands::run::RunConfig {
                image: opts.image,
                capture_on_start: opts.capture,
                prompt_override: opts.prompt,
                generator_override: opts.generator,
                page_size_override: opts.page_size,
            };
            let mut io = create_live_io();
            commands::run::run(options, settings, &mut io, std::io::stdout()).await?;
        }
    }

    Ok(())
}

/// Install a panic hook that restores terminal state before printing the panic.
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        crossterm::terminal::disable_raw_mode().ok();
        default_hook(info);
    }));
}

/// Create the live `Io`: a background task forwards crossterm events to the
/// terminal channel; generator reader tasks and the settings watcher attach
/// through `app_sender`.
fn create_live_io() -> Io {
    use crossterm::event::EventStream;
    use futures::StreamExt;
    use tokio::sync::mpsc;

    let (term_tx, term_rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        let mut stream = EventStream::new();
        while let Some(Ok(event)) = stream.next().await {
            if term_tx.send(event).is_err() {
                return;
            }
        }
    });
    Io::new(term_rx)
}

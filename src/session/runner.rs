use std::process::Stdio;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, ChildStdout};
use tokio::sync::mpsc;

use crate::event::AppEvent;
use crate::protocol::parse::parse_line;

/// Manages one generator subprocess speaking NDJSON on stdin/stdout.
///
/// The generator is the external multimodal client: it receives one request
/// line (prompt + image) and streams back fragment/done/error events.
pub struct GeneratorRunner {
    child: Child,
    stdin: Option<ChildStdin>,
}

impl GeneratorRunner {
    /// Spawn the generator and send the request line.
    ///
    /// The credential (when configured) travels as `GLINT_API_KEY` in the
    /// child's environment, never on the command line. Parsed events are
    /// forwarded to `event_tx`; stdout closing yields a final process-exit
    /// event.
    pub async fn spawn(
        command: &[String],
        api_key: Option<&str>,
        request: &str,
        event_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Result<Self> {
        let (program, args) = command
            .split_first()
            .context("generator command is empty")?;
        let mut cmd = tokio::process::Command::new(program);
        cmd.args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null());
        if let Some(api_key) = api_key {
            cmd.env("GLINT_API_KEY", api_key);
        }

        let mut child = cmd
            .spawn()
            .with_context(|| format!("failed to spawn generator `{program}`"))?;

        let stdout = child
            .stdout
            .take()
            .context("generator stdout should be piped")?;
        let mut stdin = child
            .stdin
            .take()
            .context("generator stdin should be piped")?;

        stdin
            .write_all(request.as_bytes())
            .await
            .context("failed to write request to generator stdin")?;
        stdin
            .write_all(b"\n")
            .await
            .context("failed to write newline after request")?;
        stdin.flush().await?;

        Self::spawn_reader(stdout, event_tx);

        Ok(Self {
            child,
            stdin: Some(stdin),
        })
    }

    /// Close stdin, signaling the generator that no more requests follow.
    pub fn close_input(&mut self) {
        self.stdin.take();
    }

    /// Wait for the generator process to exit.
    pub async fn wait(&mut self) -> Result<Option<i32>> {
        let status = self.child.wait().await?;
        Ok(status.code())
    }

    /// Kill the generator process.
    pub async fn kill(&mut self) -> Result<()> {
        self.child.kill().await?;
        Ok(())
    }

    fn spawn_reader(stdout: ChildStdout, event_tx: mpsc::UnboundedSender<AppEvent>) {
        tokio::spawn(async move {
            let reader = BufReader::new(stdout);
            let mut lines = reader.lines();

            while let Ok(Some(line)) = lines.next_line().await {
                match parse_line(&line) {
                    Ok(Some(event)) => {
                        if event_tx.send(AppEvent::Generator(Box::new(event))).is_err() {
                            break;
                        }
                    }
                    Ok(None) => {} // blank line
                    Err(e) => {
                        let warning =
                            format!("failed to parse generator output: {e}\n  Line: {line}");
                        if event_tx.send(AppEvent::ParseWarning(warning)).is_err() {
                            break;
                        }
                    }
                }
            }

            // stdout closed — generator is exiting or has exited
            let _ = event_tx.send(AppEvent::ProcessExit(None));
        });
    }
}

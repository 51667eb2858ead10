use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::event::AppEvent;

pub const CONFIG_DIR: &str = ".glint";
pub const CONFIG_FILE: &str = "config.toml";

/// Settings from `.glint/config.toml`, written by an external settings
/// surface. `page_size` is fixed for the lifetime of a capture session;
/// changes are picked up between cycles only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Prompt sent with every captured photo.
    #[serde(default = "default_prompt")]
    pub prompt: String,
    /// Lines per page on the wearable display.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Character cells per line on the wearable display.
    #[serde(default = "default_panel_columns")]
    pub panel_columns: usize,
    /// Generator command: reads one request line on stdin, writes NDJSON
    /// events on stdout.
    #[serde(default = "default_generator_command")]
    pub generator_command: String,
    /// Camera command producing JPEG bytes on stdout. Unset means captures
    /// must come from `--image`.
    #[serde(default)]
    pub camera_command: Option<String>,
    /// Credential handed to the generator via `GLINT_API_KEY`. glint never
    /// interprets it.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Where share bundles are written.
    #[serde(default = "default_share_dir")]
    pub share_dir: PathBuf,
}

fn default_prompt() -> String {
    "Describe what you see.".to_string()
}

fn default_page_size() -> usize {
    5
}

fn default_panel_columns() -> usize {
    24
}

fn default_generator_command() -> String {
    "glint-generate".to_string()
}

fn default_share_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            page_size: default_page_size(),
            panel_columns: default_panel_columns(),
            generator_command: default_generator_command(),
            camera_command: None,
            api_key: None,
            share_dir: default_share_dir(),
        }
    }
}

impl Settings {
    /// Reject sizes no display can render. Fatal at load time, so a running
    /// session never sees an invalid value.
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            bail!("page_size must be at least 1");
        }
        if self.panel_columns == 0 {
            bail!("panel_columns must be at least 1");
        }
        if self.generator_command.trim().is_empty() {
            bail!("generator_command must not be empty");
        }
        Ok(())
    }

    /// Generator command split into program + arguments.
    pub fn generator_command_line(&self) -> Vec<String> {
        self.generator_command
            .split_whitespace()
            .map(ToString::to_string)
            .collect()
    }

    /// Camera command split into program + arguments, if configured.
    pub fn camera_command_line(&self) -> Option<Vec<String>> {
        self.camera_command
            .as_ref()
            .map(|cmd| cmd.split_whitespace().map(ToString::to_string).collect())
    }
}

/// Load settings from `.glint/config.toml` under `dir`.
///
/// Falls back to defaults if the file is missing; an unparseable or invalid
/// file is an error.
pub fn load(dir: &Path) -> Result<Settings> {
    let path = dir.join(CONFIG_DIR).join(CONFIG_FILE);
    if !path.exists() {
        return Ok(Settings::default());
    }
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let settings: Settings = toml::from_str(&contents)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    settings.validate()?;
    Ok(settings)
}

/// Watch the config file for changes, reporting them as app events.
///
/// Returns `None` when no `.glint` directory exists to watch. The watcher
/// must be kept alive for events to keep flowing.
pub fn watch(dir: &Path, tx: mpsc::UnboundedSender<AppEvent>) -> Result<Option<RecommendedWatcher>> {
    let config_dir = dir.join(CONFIG_DIR);
    if !config_dir.is_dir() {
        return Ok(None);
    }
    let mut watcher = notify::recommended_watcher(
        move |result: Result<notify::Event, notify::Error>| {
            if let Ok(event) = result
                && (event.kind.is_modify() || event.kind.is_create() || event.kind.is_remove())
                && event
                    .paths
                    .iter()
                    .any(|p| p.file_name().is_some_and(|n| n == CONFIG_FILE))
            {
                let _ = tx.send(AppEvent::SettingsChanged);
            }
        },
    )
    .context("failed to create settings watcher")?;
    // Watch the directory, not the file: editors replace files on save.
    watcher
        .watch(&config_dir, RecursiveMode::NonRecursive)
        .with_context(|| format!("failed to watch {}", config_dir.display()))?;
    Ok(Some(watcher))
}

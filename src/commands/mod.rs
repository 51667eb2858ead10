use anyhow::{Context, Result};
use crossterm::terminal;

pub mod init;
pub mod run;

/// Enables raw mode on construction and restores it on drop.
pub struct RawModeGuard;

impl RawModeGuard {
    pub fn acquire() -> Result<Self> {
        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        terminal::disable_raw_mode().ok();
    }
}

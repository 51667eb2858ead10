use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::{CONFIG_DIR, CONFIG_FILE};

const DEFAULT_CONFIG: &str = r#"# glint configuration

# Prompt sent with every captured photo.
prompt = "Describe what you see."

# Lines per page on the wearable display.
page_size = 5

# Character cells per line on the wearable display.
panel_columns = 24

# Generator command: reads one request line on stdin, writes NDJSON
# fragment/done/error events on stdout.
generator_command = "glint-generate"

# Camera command producing JPEG bytes on stdout. Leave unset to capture
# from a file via --image.
# camera_command = "libcamera-still --nopreview -o -"

# Credential passed to the generator as GLINT_API_KEY.
# api_key = ""

# Where share bundles are written.
share_dir = "."
"#;

/// Write a starter config file, refusing to overwrite an existing one.
pub fn init<W: Write>(dir: &Path, out: &mut W) -> Result<()> {
    let config_dir = dir.join(CONFIG_DIR);
    let path = config_dir.join(CONFIG_FILE);
    if path.exists() {
        writeln!(out, "{} already exists", path.display())?;
        return Ok(());
    }
    std::fs::create_dir_all(&config_dir)
        .with_context(|| format!("failed to create {}", config_dir.display()))?;
    std::fs::write(&path, DEFAULT_CONFIG)
        .with_context(|| format!("failed to write {}", path.display()))?;
    writeln!(out, "created {}", path.display())?;
    Ok(())
}

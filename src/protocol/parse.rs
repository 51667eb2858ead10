use anyhow::Result;

use super::types::GenEvent;

/// Parse a single NDJSON line into a `GenEvent`.
///
/// Returns `Ok(None)` for blank lines.
/// Returns `Err` for malformed JSON (caller should warn, not crash).
pub fn parse_line(line: &str) -> Result<Option<GenEvent>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let event: GenEvent = serde_json::from_str(line)?;
    Ok(Some(event))
}

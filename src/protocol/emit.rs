use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use super::types::GenerateRequest;

/// Format a generation request as NDJSON for the generator's stdin.
///
/// The captured image travels base64-encoded inside the JSON line, so the
/// wire stays pure NDJSON.
pub fn format_request(prompt: &str, image: &[u8]) -> serde_json::Result<String> {
    let request = GenerateRequest {
        r#type: "generate".to_string(),
        prompt: prompt.to_string(),
        image: STANDARD.encode(image),
    };
    serde_json::to_string(&request)
}

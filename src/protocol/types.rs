use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Top-level inbound event from the generator's NDJSON stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GenEvent {
    /// One chunk of generated text; boundaries are arbitrary and not
    /// line-aligned.
    #[serde(rename = "fragment")]
    Fragment(Fragment),
    /// The generation stream completed normally.
    #[serde(rename = "done")]
    Done(StreamDone),
    /// Upstream generation failure (network, credential, empty prompt).
    #[serde(rename = "error")]
    Error(StreamError),
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fragment {
    #[serde(default)]
    pub text: String,
    #[serde(flatten)]
    _extra: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamDone {
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(flatten)]
    _extra: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamError {
    #[serde(default)]
    pub message: String,
    #[serde(flatten)]
    _extra: Value,
}

/// Outbound request: a single NDJSON line on the generator's stdin.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    pub r#type: String,
    pub prompt: String,
    /// Captured JPEG, base64-encoded.
    pub image: String,
}

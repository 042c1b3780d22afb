use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Success body of `POST /transcribe`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptionResponse {
    pub raw_transcription: String,
    pub sanitized_text: String,
    pub processing_time: f64,
}

/// Failure body of any backend route. `detail` is usually a string but
/// request validation failures carry a list of objects instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<Value>,
}

impl ErrorBody {
    /// Returns the detail only when it is a non-empty string.
    pub fn usable_detail(&self) -> Option<&str> {
        self.detail
            .as_ref()
            .and_then(Value::as_str)
            .filter(|detail| !detail.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}

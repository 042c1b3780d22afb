use serde::{Deserialize, Serialize};

use crate::protocol::TranscriptionResponse;

/// Outcome of one successful transcription request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptionResult {
    pub raw_transcription: String,
    pub sanitized_text: String,
    pub processing_time_seconds: f64,
}

impl TranscriptionResult {
    /// Footer line shown under the two transcript panels.
    pub fn processing_time_label(&self) -> String {
        format!(
            "Processing time: {:.2} seconds",
            self.processing_time_seconds
        )
    }
}

impl From<TranscriptionResponse> for TranscriptionResult {
    fn from(value: TranscriptionResponse) -> Self {
        Self {
            raw_transcription: value.raw_transcription,
            sanitized_text: value.sanitized_text,
            processing_time_seconds: value.processing_time,
        }
    }
}

impl From<&TranscriptionResult> for TranscriptionResponse {
    fn from(value: &TranscriptionResult) -> Self {
        Self {
            raw_transcription: value.raw_transcription.clone(),
            sanitized_text: value.sanitized_text.clone(),
            processing_time: value.processing_time_seconds,
        }
    }
}

//! Front-end agnostic view model derived from [`SubmissionState`].

use crate::state::SubmissionState;

pub const PICK_FILE_PROMPT: &str = "Click to select audio file";
pub const SUBMIT_LABEL: &str = "Transcribe";
pub const SUBMIT_BUSY_LABEL: &str = "Processing...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultPanel {
    pub raw_transcription: String,
    pub sanitized_text: String,
    pub processing_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionView {
    pub file_label: String,
    pub submit_label: &'static str,
    pub submit_enabled: bool,
    pub error_banner: Option<String>,
    pub result: Option<ResultPanel>,
}

impl SubmissionView {
    pub fn from_state(state: &SubmissionState) -> Self {
        Self {
            file_label: state
                .selected_file()
                .map(|file| file.name().to_string())
                .unwrap_or_else(|| PICK_FILE_PROMPT.to_string()),
            submit_label: if state.is_processing() {
                SUBMIT_BUSY_LABEL
            } else {
                SUBMIT_LABEL
            },
            submit_enabled: state.can_submit(),
            error_banner: state.error().map(str::to_string),
            result: state.result().map(|result| ResultPanel {
                raw_transcription: result.raw_transcription.clone(),
                sanitized_text: result.sanitized_text.clone(),
                processing_time: result.processing_time_label(),
            }),
        }
    }
}

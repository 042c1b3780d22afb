//! Submission state and the pure reducer that drives it.

use std::sync::Arc;

use shared::{domain::TranscriptionResult, NO_FILE_SELECTED_MESSAGE};

use crate::file::SelectedFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Ready,
    Processing,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone)]
pub enum SubmissionEvent {
    /// `None` is a cancelled picker and changes nothing.
    FileSelected(Option<Arc<SelectedFile>>),
    SubmitRequested,
    SubmitStarted,
    SubmitSucceeded(TranscriptionResult),
    SubmitFailed(String),
    SubmitSettled,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubmissionState {
    selected_file: Option<Arc<SelectedFile>>,
    is_processing: bool,
    result: Option<TranscriptionResult>,
    error: Option<String>,
}

impl SubmissionState {
    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected_file.as_deref()
    }

    pub(crate) fn selected_file_handle(&self) -> Option<Arc<SelectedFile>> {
        self.selected_file.clone()
    }

    pub fn is_processing(&self) -> bool {
        self.is_processing
    }

    pub fn result(&self) -> Option<&TranscriptionResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether the submit control should be enabled.
    pub fn can_submit(&self) -> bool {
        self.selected_file.is_some() && !self.is_processing
    }

    pub fn phase(&self) -> Phase {
        if self.is_processing {
            Phase::Processing
        } else if self.error.is_some() {
            Phase::Failed
        } else if self.result.is_some() {
            Phase::Succeeded
        } else if self.selected_file.is_some() {
            Phase::Ready
        } else {
            Phase::Idle
        }
    }
}

pub fn reduce(state: &SubmissionState, event: SubmissionEvent) -> SubmissionState {
    let mut next = state.clone();
    match event {
        SubmissionEvent::FileSelected(None) => {}
        SubmissionEvent::FileSelected(Some(file)) => {
            next.selected_file = Some(file);
            next.result = None;
            next.error = None;
        }
        SubmissionEvent::SubmitRequested => {
            if next.selected_file.is_none() {
                next.error = Some(NO_FILE_SELECTED_MESSAGE.to_string());
            }
        }
        SubmissionEvent::SubmitStarted => {
            next.is_processing = true;
            next.error = None;
        }
        SubmissionEvent::SubmitSucceeded(result) => {
            next.result = Some(result);
            next.error = None;
        }
        // The previous result is kept so the last good transcript stays visible.
        SubmissionEvent::SubmitFailed(message) => {
            next.error = Some(message);
        }
        SubmissionEvent::SubmitSettled => {
            next.is_processing = false;
        }
    }
    next
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;

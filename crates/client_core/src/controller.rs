use std::sync::Arc;

use shared::{domain::TranscriptionResult, error::SubmitError};
use tokio::sync::watch;
use tracing::{info, warn};

use crate::{
    file::SelectedFile,
    state::{reduce, SubmissionEvent, SubmissionState},
    transport::TranscriptionBackend,
};

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Succeeded(TranscriptionResult),
    Failed(SubmitError),
    /// Another submission was already in flight; nothing changed.
    Rejected,
}

enum Admission {
    Started(Arc<SelectedFile>),
    NoFile,
    Busy,
}

/// Owns the submission state and runs the single submit operation.
///
/// State lives in a watch channel so front-ends can observe every
/// transition; all writes go through [`reduce`].
pub struct SubmissionController {
    backend: Arc<dyn TranscriptionBackend>,
    state: watch::Sender<SubmissionState>,
}

impl SubmissionController {
    pub fn new(backend: Arc<dyn TranscriptionBackend>) -> Self {
        let (state, _) = watch::channel(SubmissionState::default());
        Self { backend, state }
    }

    pub fn snapshot(&self) -> SubmissionState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SubmissionState> {
        self.state.subscribe()
    }

    pub fn select_file(&self, file: Option<SelectedFile>) {
        if let Some(file) = &file {
            info!(file = %file.name(), bytes = file.len(), "file selected");
        }
        self.dispatch(SubmissionEvent::FileSelected(file.map(Arc::new)));
    }

    pub async fn submit(&self) -> SubmitOutcome {
        let file = match self.admit() {
            Admission::Started(file) => file,
            Admission::NoFile => return SubmitOutcome::Failed(SubmitError::Validation),
            Admission::Busy => {
                warn!("submit rejected: a transcription is already in flight");
                return SubmitOutcome::Rejected;
            }
        };

        let _guard = ProcessingGuard { state: &self.state };
        match self.backend.transcribe(&file).await {
            Ok(result) => {
                self.dispatch(SubmissionEvent::SubmitSucceeded(result.clone()));
                SubmitOutcome::Succeeded(result)
            }
            Err(err) => {
                warn!(kind = ?err.kind(), error = %err, "transcription failed");
                self.dispatch(SubmissionEvent::SubmitFailed(err.to_string()));
                SubmitOutcome::Failed(err)
            }
        }
    }

    /// Checks and flips the processing flag in one step so two callers
    /// cannot both start a request.
    fn admit(&self) -> Admission {
        let mut admission = Admission::Busy;
        self.state.send_if_modified(|state| {
            if state.is_processing() {
                return false;
            }
            match state.selected_file_handle() {
                Some(file) => {
                    *state = reduce(state, SubmissionEvent::SubmitStarted);
                    admission = Admission::Started(file);
                }
                None => {
                    *state = reduce(state, SubmissionEvent::SubmitRequested);
                    admission = Admission::NoFile;
                }
            }
            true
        });
        admission
    }

    fn dispatch(&self, event: SubmissionEvent) {
        dispatch(&self.state, event);
    }
}

fn dispatch(state: &watch::Sender<SubmissionState>, event: SubmissionEvent) {
    state.send_modify(|current| *current = reduce(current, event));
}

/// Clears the processing flag when dropped, including when the submit
/// future is dropped mid-request or the backend panics.
struct ProcessingGuard<'a> {
    state: &'a watch::Sender<SubmissionState>,
}

impl Drop for ProcessingGuard<'_> {
    fn drop(&mut self) {
        dispatch(self.state, SubmissionEvent::SubmitSettled);
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;

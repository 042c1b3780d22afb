//! UI/backend events and error modeling for desktop GUI controller.

use client_core::SubmissionState;

pub enum UiEvent {
    StateChanged(SubmissionState),
    Info(String),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    FileSelection,
    HealthCheck,
    CommandQueue,
}

/// Errors outside the submission lifecycle. Submission failures travel
/// inside [`SubmissionState`] instead.
#[derive(Debug, Clone)]
pub struct UiError {
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn new(context: UiErrorContext, message: impl Into<String>) -> Self {
        Self {
            context,
            message: message.into(),
        }
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn title(&self) -> &'static str {
        match self.context {
            UiErrorContext::BackendStartup => "Backend unavailable",
            UiErrorContext::FileSelection => "Could not open file",
            UiErrorContext::HealthCheck => "Health check failed",
            UiErrorContext::CommandQueue => "Request not sent",
        }
    }
}

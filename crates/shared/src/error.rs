use thiserror::Error;

use crate::{protocol::ErrorBody, BACKEND_FALLBACK_MESSAGE, NO_FILE_SELECTED_MESSAGE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Backend,
    BackendUnspecified,
    Transport,
}

/// Every way a submission can fail. The `Display` text is exactly what the
/// user sees in the error banner.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("{}", NO_FILE_SELECTED_MESSAGE)]
    Validation,
    #[error("{detail}")]
    Backend { status: u16, detail: String },
    #[error("{}", BACKEND_FALLBACK_MESSAGE)]
    BackendUnspecified { status: u16 },
    #[error("{0}")]
    Transport(String),
}

impl SubmitError {
    pub fn transport(err: impl std::fmt::Display) -> Self {
        Self::Transport(err.to_string())
    }

    /// Maps a non-2xx response body onto `Backend` or `BackendUnspecified`.
    /// A body that is not JSON is a `Transport` error carrying the decoder's
    /// message.
    pub fn from_failure_body(status: u16, body: &[u8]) -> Self {
        let parsed = match serde_json::from_slice::<ErrorBody>(body) {
            Ok(parsed) => parsed,
            Err(err) => return Self::transport(err),
        };
        match parsed.usable_detail() {
            Some(detail) => Self::Backend {
                status,
                detail: detail.to_string(),
            },
            None => Self::BackendUnspecified { status },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation => ErrorKind::Validation,
            Self::Backend { .. } => ErrorKind::Backend,
            Self::BackendUnspecified { .. } => ErrorKind::BackendUnspecified,
            Self::Transport(_) => ErrorKind::Transport,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Backend { status, .. } | Self::BackendUnspecified { status } => Some(*status),
            Self::Validation | Self::Transport(_) => None,
        }
    }
}

//! Client side of the voice transcription service: file selection, the
//! submission state machine, and the HTTP transport.

pub mod config;
pub mod controller;
pub mod file;
pub mod state;
pub mod transport;
pub mod view;

pub use config::{load_settings, ClientSettings, ConfigError};
pub use controller::{SubmissionController, SubmitOutcome};
pub use file::{FileError, SelectedFile};
pub use state::{reduce, Phase, SubmissionEvent, SubmissionState};
pub use transport::{HttpTranscriptionBackend, TranscriptionBackend};
pub use view::{ResultPanel, SubmissionView};

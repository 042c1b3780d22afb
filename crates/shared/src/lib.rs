//! Types shared between the transcription client core and its front-ends.

pub mod domain;
pub mod error;
pub mod protocol;

/// Endpoint used when no configuration overrides it.
pub const DEFAULT_TRANSCRIBE_ENDPOINT: &str = "http://localhost:8000/transcribe";

/// Multipart field name the backend reads the audio blob from.
pub const UPLOAD_FIELD_NAME: &str = "file";

pub const NO_FILE_SELECTED_MESSAGE: &str = "Please select an audio file";
pub const BACKEND_FALLBACK_MESSAGE: &str = "Error processing audio";

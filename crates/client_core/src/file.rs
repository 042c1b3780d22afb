use std::path::Path;

use thiserror::Error;

const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

#[derive(Debug, Error)]
pub enum FileError {
    #[error("path '{0}' does not name a file")]
    MissingFileName(String),
    #[error("failed to read '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
}

/// A user-chosen audio blob, held in memory until it is replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    name: String,
    bytes: Vec<u8>,
    mime_type: String,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bytes,
            mime_type: mime_type.into(),
        }
    }

    /// Reads the whole file and guesses its MIME type from the extension.
    /// The type is advisory only; nothing here rejects non-audio files.
    pub async fn from_path(path: &Path) -> Result<Self, FileError> {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| FileError::MissingFileName(path.display().to_string()))?;
        let bytes = tokio::fs::read(path).await.map_err(|source| FileError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let mime_type = guess_mime_type(path);
        tracing::debug!(file = %name, bytes = bytes.len(), %mime_type, "loaded selected file");
        Ok(Self::new(name, bytes, mime_type))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

pub fn guess_mime_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_raw()
        .unwrap_or(FALLBACK_MIME_TYPE)
        .to_string()
}

/// Extensions offered by the file pickers. Advisory, like an `accept` filter.
pub const AUDIO_EXTENSIONS: &[&str] = &[
    "wav", "mp3", "m4a", "ogg", "oga", "flac", "aac", "webm", "opus",
];

#[cfg(test)]
#[path = "tests/file_tests.rs"]
mod tests;

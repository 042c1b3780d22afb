use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client,
};
use shared::{
    domain::TranscriptionResult,
    error::SubmitError,
    protocol::{HealthResponse, TranscriptionResponse},
    UPLOAD_FIELD_NAME,
};
use tracing::{info, warn};
use url::Url;

use crate::{
    config::{ClientSettings, ConfigError},
    file::SelectedFile,
};

#[async_trait]
pub trait TranscriptionBackend: Send + Sync {
    async fn transcribe(&self, file: &SelectedFile) -> Result<TranscriptionResult, SubmitError>;
    async fn health(&self) -> Result<HealthResponse, SubmitError>;
}

/// Talks to the transcription service over HTTP: one multipart POST per
/// submission, no retries.
#[derive(Debug, Clone)]
pub struct HttpTranscriptionBackend {
    http: Client,
    endpoint: Url,
}

impl HttpTranscriptionBackend {
    pub fn new(endpoint: Url) -> Self {
        Self {
            http: Client::new(),
            endpoint,
        }
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self, ConfigError> {
        let endpoint = settings.endpoint_url()?;
        let mut builder = Client::builder();
        if let Some(timeout) = settings.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|err| ConfigError::HttpClient(err.to_string()))?;
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// `/health` on the same origin as the transcribe endpoint.
    pub fn health_url(&self) -> Url {
        let mut url = self.endpoint.clone();
        url.set_path("/health");
        url.set_query(None);
        url
    }
}

#[async_trait]
impl TranscriptionBackend for HttpTranscriptionBackend {
    async fn transcribe(&self, file: &SelectedFile) -> Result<TranscriptionResult, SubmitError> {
        let part = Part::bytes(file.bytes().to_vec())
            .file_name(file.name().to_string())
            .mime_str(file.mime_type())
            .map_err(SubmitError::transport)?;
        let form = Form::new().part(UPLOAD_FIELD_NAME, part);

        info!(
            endpoint = %self.endpoint,
            file = %file.name(),
            bytes = file.len(),
            "transcribe: uploading audio"
        );
        let response = self
            .http
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await
            .map_err(SubmitError::transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.map_err(SubmitError::transport)?;
            let err = SubmitError::from_failure_body(status.as_u16(), &body);
            warn!(status = status.as_u16(), error = %err, "transcribe: backend rejected request");
            return Err(err);
        }

        let payload: TranscriptionResponse =
            response.json().await.map_err(SubmitError::transport)?;
        info!(
            processing_time = payload.processing_time,
            "transcribe: transcription received"
        );
        Ok(payload.into())
    }

    async fn health(&self) -> Result<HealthResponse, SubmitError> {
        let response = self
            .http
            .get(self.health_url())
            .send()
            .await
            .map_err(SubmitError::transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.map_err(SubmitError::transport)?;
            return Err(SubmitError::from_failure_body(status.as_u16(), &body));
        }

        response.json().await.map_err(SubmitError::transport)
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;

use super::*;

use std::{sync::Arc, time::Duration};

use axum::{
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Debug, Clone)]
struct ReceivedUpload {
    field_name: String,
    file_name: Option<String>,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

#[derive(Clone)]
struct StubState {
    status: StatusCode,
    body: &'static str,
    delay: Option<Duration>,
    uploads: Arc<Mutex<Vec<ReceivedUpload>>>,
}

async fn handle_transcribe(
    State(state): State<StubState>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    while let Ok(Some(field)) = multipart.next_field().await {
        let field_name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map(|b| b.to_vec()).unwrap_or_default();
        state.uploads.lock().await.push(ReceivedUpload {
            field_name,
            file_name,
            content_type,
            bytes,
        });
    }
    if let Some(delay) = state.delay {
        tokio::time::sleep(delay).await;
    }
    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body,
    )
}

async fn handle_health() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/json")],
        r#"{"status":"healthy"}"#,
    )
}

async fn spawn_stub_backend(
    status: StatusCode,
    body: &'static str,
    delay: Option<Duration>,
) -> (Url, Arc<Mutex<Vec<ReceivedUpload>>>) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let uploads = Arc::new(Mutex::new(Vec::new()));
    let state = StubState {
        status,
        body,
        delay,
        uploads: uploads.clone(),
    };
    let app = Router::new()
        .route("/transcribe", post(handle_transcribe))
        .route("/health", get(handle_health))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    let endpoint = Url::parse(&format!("http://{addr}/transcribe")).expect("url");
    (endpoint, uploads)
}

fn sample_wav() -> SelectedFile {
    SelectedFile::new("sample.wav", b"RIFF-fake-wave".to_vec(), "audio/wav")
}

const SUCCESS_BODY: &str =
    r#"{"raw_transcription":"hello world","sanitized_text":"Hello, world.","processing_time":1.23}"#;

#[tokio::test]
async fn uploads_file_field_and_parses_success_body() {
    let (endpoint, uploads) = spawn_stub_backend(StatusCode::OK, SUCCESS_BODY, None).await;
    let backend = HttpTranscriptionBackend::new(endpoint);

    let result = backend.transcribe(&sample_wav()).await.expect("transcribe");
    assert_eq!(result.raw_transcription, "hello world");
    assert_eq!(result.sanitized_text, "Hello, world.");
    assert!((result.processing_time_seconds - 1.23).abs() < f64::EPSILON);

    let uploads = uploads.lock().await;
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].field_name, "file");
    assert_eq!(uploads[0].file_name.as_deref(), Some("sample.wav"));
    assert_eq!(uploads[0].content_type.as_deref(), Some("audio/wav"));
    assert_eq!(uploads[0].bytes, b"RIFF-fake-wave");
}

#[tokio::test]
async fn backend_detail_is_surfaced_verbatim() {
    let (endpoint, _uploads) = spawn_stub_backend(
        StatusCode::BAD_REQUEST,
        r#"{"detail":"Audio too short"}"#,
        None,
    )
    .await;
    let backend = HttpTranscriptionBackend::new(endpoint);

    let err = backend.transcribe(&sample_wav()).await.expect_err("must fail");
    assert_eq!(
        err,
        SubmitError::Backend {
            status: 400,
            detail: "Audio too short".to_string()
        }
    );
}

#[tokio::test]
async fn missing_detail_maps_to_fallback_message() {
    let (endpoint, _uploads) =
        spawn_stub_backend(StatusCode::INTERNAL_SERVER_ERROR, "{}", None).await;
    let backend = HttpTranscriptionBackend::new(endpoint);

    let err = backend.transcribe(&sample_wav()).await.expect_err("must fail");
    assert_eq!(err.to_string(), "Error processing audio");
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn html_failure_body_surfaces_decoder_message_as_transport_error() {
    let (endpoint, _uploads) =
        spawn_stub_backend(StatusCode::BAD_GATEWAY, "<html>Bad Gateway</html>", None).await;
    let backend = HttpTranscriptionBackend::new(endpoint);

    let err = backend.transcribe(&sample_wav()).await.expect_err("must fail");
    assert_eq!(err.kind(), shared::error::ErrorKind::Transport);
    assert_ne!(err.to_string(), "Error processing audio");
    assert!(err.to_string().contains("expected value"), "{err}");
}

#[tokio::test]
async fn malformed_success_body_is_a_transport_error() {
    let (endpoint, _uploads) =
        spawn_stub_backend(StatusCode::OK, r#"{"raw_transcription":"hi"}"#, None).await;
    let backend = HttpTranscriptionBackend::new(endpoint);

    let err = backend.transcribe(&sample_wav()).await.expect_err("must fail");
    assert_eq!(err.kind(), shared::error::ErrorKind::Transport);
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let backend = HttpTranscriptionBackend::new(
        Url::parse(&format!("http://{addr}/transcribe")).expect("url"),
    );
    let err = backend.transcribe(&sample_wav()).await.expect_err("must fail");
    assert_eq!(err.kind(), shared::error::ErrorKind::Transport);
    assert!(!err.to_string().is_empty());
}

#[tokio::test]
async fn configured_timeout_surfaces_as_transport_error() {
    let (endpoint, _uploads) =
        spawn_stub_backend(StatusCode::OK, SUCCESS_BODY, Some(Duration::from_secs(5))).await;
    let settings = ClientSettings {
        endpoint: endpoint.to_string(),
        timeout_secs: Some(1),
    };
    let backend = HttpTranscriptionBackend::from_settings(&settings).expect("backend");

    let err = backend.transcribe(&sample_wav()).await.expect_err("must time out");
    assert_eq!(err.kind(), shared::error::ErrorKind::Transport);
}

#[tokio::test]
async fn health_uses_same_origin() {
    let (endpoint, _uploads) = spawn_stub_backend(StatusCode::OK, SUCCESS_BODY, None).await;
    let backend = HttpTranscriptionBackend::new(endpoint.clone());
    assert_eq!(backend.health_url().path(), "/health");
    assert_eq!(backend.health_url().port(), endpoint.port());

    let health = backend.health().await.expect("health");
    assert!(health.is_healthy());
}

#[test]
fn health_url_drops_query_and_nested_path() {
    let backend = HttpTranscriptionBackend::new(
        Url::parse("http://localhost:8000/api/v1/transcribe?lang=en").expect("url"),
    );
    assert_eq!(backend.health_url().as_str(), "http://localhost:8000/health");
}

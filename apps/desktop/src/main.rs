use std::{path::PathBuf, process::ExitCode, sync::Arc};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    load_settings, HttpTranscriptionBackend, SelectedFile, SubmissionController, SubmissionView,
    TranscriptionBackend,
};
use shared::{domain::TranscriptionResult, protocol::TranscriptionResponse};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "voice-scribe", about = "Send audio to a transcription service")]
struct Args {
    /// Transcribe endpoint; overrides config file and environment.
    #[arg(long, global = true)]
    endpoint: Option<String>,
    /// Path to a TOML config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Upload one audio file and print the transcription.
    Transcribe {
        file: PathBuf,
        /// Print the result as JSON, in the backend's response shape.
        #[arg(long)]
        json: bool,
    },
    /// Check that the backend answers on /health.
    Health,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref()).context("failed to load settings")?;
    if let Some(endpoint) = args.endpoint {
        settings.endpoint = endpoint;
    }
    let backend = Arc::new(
        HttpTranscriptionBackend::from_settings(&settings)
            .context("failed to configure transcription backend")?,
    );

    match args.command {
        Command::Transcribe { file, json } => transcribe(backend, file, json).await,
        Command::Health => health(backend.as_ref()).await,
    }
}

async fn transcribe(
    backend: Arc<HttpTranscriptionBackend>,
    path: PathBuf,
    json: bool,
) -> Result<ExitCode> {
    let file = SelectedFile::from_path(&path)
        .await
        .with_context(|| format!("could not open {}", path.display()))?;

    let controller = SubmissionController::new(backend);
    controller.select_file(Some(file));
    controller.submit().await;

    let state = controller.snapshot();
    if json {
        if let Some(result) = state.result() {
            println!("{}", result_json(result)?);
        }
    }

    let view = SubmissionView::from_state(&state);
    if let Some(banner) = &view.error_banner {
        eprintln!("error: {banner}");
        return Ok(ExitCode::FAILURE);
    }
    if !json {
        if let Some(panel) = &view.result {
            print!("{}", render_result_panel(panel));
        }
    }
    Ok(ExitCode::SUCCESS)
}

async fn health(backend: &HttpTranscriptionBackend) -> Result<ExitCode> {
    match backend.health().await {
        Ok(health) if health.is_healthy() => {
            println!("{}: {}", backend.health_url(), health.status);
            Ok(ExitCode::SUCCESS)
        }
        Ok(health) => {
            eprintln!("{}: {}", backend.health_url(), health.status);
            Ok(ExitCode::FAILURE)
        }
        Err(err) => {
            eprintln!("error: {err}");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn result_json(result: &TranscriptionResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&TranscriptionResponse::from(result))
}

fn render_result_panel(panel: &client_core::ResultPanel) -> String {
    format!(
        "Raw Transcription\n{}\n\nSanitized Text\n{}\n\n{}\n",
        panel.raw_transcription, panel.sanitized_text, panel.processing_time
    )
}

use std::path::PathBuf;

mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use client_core::{load_settings, ClientSettings};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::VoiceScribeApp;

#[derive(Parser, Debug)]
#[command(name = "voice-scribe-gui")]
struct Args {
    /// Transcribe endpoint; overrides config file and environment.
    #[arg(long)]
    endpoint: Option<String>,
    /// Path to a TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn resolve_settings(args: &Args) -> anyhow::Result<ClientSettings> {
    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(endpoint) = &args.endpoint {
        settings.endpoint = endpoint.clone();
    }
    Ok(settings)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
    let args = Args::parse();
    let settings = resolve_settings(&args)?;
    let endpoint = settings.endpoint.clone();

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(settings, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Voice Scribe")
            .with_inner_size([900.0, 720.0])
            .with_min_inner_size([520.0, 420.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Voice Scribe",
        options,
        Box::new(move |_cc| Ok(Box::new(VoiceScribeApp::new(cmd_tx, ui_rx, endpoint)))),
    )
    .map_err(|err| anyhow::anyhow!("failed to start window: {err}"))
}

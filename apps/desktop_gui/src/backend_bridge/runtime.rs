//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread, time::Duration};

use client_core::{
    ClientSettings, HttpTranscriptionBackend, SelectedFile, SubmissionController,
    SubmissionState, TranscriptionBackend,
};
use crossbeam_channel::{Receiver, Sender, TrySendError};
use tokio::sync::watch;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

const UI_QUEUE_RETRY_DELAY: Duration = Duration::from_millis(16);

/// Pushes every submission state change to the UI queue without blocking a
/// runtime worker. While the queue is full only the newest snapshot is kept.
async fn forward_state_updates(
    mut updates: watch::Receiver<SubmissionState>,
    state_tx: Sender<UiEvent>,
) {
    loop {
        let mut pending = UiEvent::StateChanged(updates.borrow_and_update().clone());
        loop {
            match state_tx.try_send(pending) {
                Ok(()) => break,
                Err(TrySendError::Full(event)) => {
                    pending = event;
                    tokio::time::sleep(UI_QUEUE_RETRY_DELAY).await;
                    if updates.has_changed().unwrap_or(false) {
                        pending = UiEvent::StateChanged(updates.borrow_and_update().clone());
                    }
                }
                Err(TrySendError::Disconnected(_)) => return,
            }
        }
        if updates.changed().await.is_err() {
            return;
        }
    }
}

pub fn launch(settings: ClientSettings, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::new(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let backend = match HttpTranscriptionBackend::from_settings(&settings) {
                Ok(backend) => Arc::new(backend),
                Err(err) => {
                    let _ = ui_tx.try_send(UiEvent::Error(UiError::new(
                        UiErrorContext::BackendStartup,
                        err.to_string(),
                    )));
                    tracing::error!(%err, "invalid transcription backend settings");
                    return;
                }
            };
            tracing::info!(endpoint = %backend.endpoint(), "backend worker ready");

            let controller = Arc::new(SubmissionController::new(backend.clone()));
            tokio::spawn(forward_state_updates(controller.subscribe(), ui_tx.clone()));

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::SelectFile { path } => {
                        match SelectedFile::from_path(&path).await {
                            Ok(file) => controller.select_file(Some(file)),
                            Err(err) => {
                                tracing::warn!(%err, "could not load selected file");
                                let _ = ui_tx.try_send(UiEvent::Error(UiError::new(
                                    UiErrorContext::FileSelection,
                                    err.to_string(),
                                )));
                            }
                        }
                    }
                    BackendCommand::Submit => {
                        let controller = controller.clone();
                        tokio::spawn(async move {
                            controller.submit().await;
                        });
                    }
                    BackendCommand::CheckHealth => {
                        let backend = backend.clone();
                        let ui_tx = ui_tx.clone();
                        tokio::spawn(async move {
                            let event = match backend.health().await {
                                Ok(health) => UiEvent::Info(format!(
                                    "{}: {}",
                                    backend.health_url(),
                                    health.status
                                )),
                                Err(err) => UiEvent::Error(UiError::new(
                                    UiErrorContext::HealthCheck,
                                    err.to_string(),
                                )),
                            };
                            let _ = ui_tx.try_send(event);
                        });
                    }
                }
            }
            tracing::info!("ui command channel closed; backend worker exiting");
        });
    });
}

#[cfg(test)]
mod tests {
    use client_core::{reduce, SubmissionEvent};
    use crossbeam_channel::bounded;

    use super::*;

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn full_ui_queue_delivers_latest_state_once_drained() {
        let (ui_tx, ui_rx) = bounded(1);
        ui_tx
            .try_send(UiEvent::Info("busy".to_string()))
            .expect("fill queue");
        let (state_tx, updates) = watch::channel(SubmissionState::default());
        let forwarder = tokio::spawn(forward_state_updates(updates, ui_tx));

        let file = Arc::new(SelectedFile::new("sample.wav", vec![0; 4], "audio/wav"));
        let ready = reduce(
            &SubmissionState::default(),
            SubmissionEvent::FileSelected(Some(file)),
        );
        state_tx.send(ready.clone()).expect("publish state");
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert!(matches!(ui_rx.try_recv(), Ok(UiEvent::Info(_))));
        match ui_rx.recv_timeout(Duration::from_secs(2)) {
            Ok(UiEvent::StateChanged(state)) => assert_eq!(state, ready),
            _ => panic!("expected the latest submission state"),
        }

        drop(state_tx);
        tokio::time::timeout(Duration::from_secs(2), forwarder)
            .await
            .expect("forwarder stops when the controller is gone")
            .expect("join");
    }

    #[tokio::test]
    async fn closed_ui_queue_stops_forwarding() {
        let (ui_tx, ui_rx) = bounded::<UiEvent>(1);
        drop(ui_rx);
        let (_state_tx, updates) = watch::channel(SubmissionState::default());

        tokio::time::timeout(
            Duration::from_secs(2),
            forward_state_updates(updates, ui_tx),
        )
        .await
        .expect("returns once the ui is gone");
    }
}

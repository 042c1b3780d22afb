use arboard::Clipboard;
use client_core::{file::AUDIO_EXTENSIONS, SubmissionState, SubmissionView};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::{UiError, UiEvent},
    orchestration::dispatch_backend_command,
};

const CARD_WIDTH: f32 = 720.0;

pub struct VoiceScribeApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    endpoint: String,
    submission: SubmissionState,
    notice: Option<UiError>,
    status: String,
}

impl VoiceScribeApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        endpoint: impl Into<String>,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            endpoint: endpoint.into(),
            submission: SubmissionState::default(),
            notice: None,
            status: "Ready".to_string(),
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::StateChanged(state) => {
                    self.status = match (state.is_processing(), state.selected_file()) {
                        (true, Some(file)) => format!("Transcribing {}", file.name()),
                        (false, Some(file)) => format!("{} ({} bytes)", file.name(), file.len()),
                        (_, None) => "Ready".to_string(),
                    };
                    self.submission = state;
                }
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::Error(err) => {
                    tracing::warn!(context = ?err.context(), message = err.message(), "ui error");
                    self.notice = Some(err);
                }
            }
        }
    }

    fn send(&mut self, cmd: BackendCommand) {
        if let Err(err) = dispatch_backend_command(&self.cmd_tx, cmd) {
            self.notice = Some(err);
        }
    }

    fn pick_file(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Audio", AUDIO_EXTENSIONS)
            .add_filter("All files", &["*"])
            .pick_file()
        {
            self.notice = None;
            self.send(BackendCommand::SelectFile { path });
        }
    }

    fn copy_to_clipboard(&mut self, label: &str, text: &str) {
        match Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text.to_owned())) {
            Ok(()) => self.status = format!("Copied {label} to clipboard"),
            Err(err) => self.status = format!("Failed to copy {label}: {err}"),
        }
    }

    fn show_form(&mut self, ui: &mut egui::Ui, view: &SubmissionView) {
        egui::Frame::group(ui.style())
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(16, 16))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.vertical_centered(|ui| {
                    let picker = ui.add(
                        egui::Button::new(egui::RichText::new(&view.file_label).size(16.0))
                            .min_size(egui::vec2(ui.available_width(), 64.0)),
                    );
                    if picker.clicked() {
                        self.pick_file();
                    }

                    ui.add_space(12.0);
                    let submit = ui.add_enabled(
                        view.submit_enabled,
                        egui::Button::new(egui::RichText::new(view.submit_label).strong())
                            .min_size(egui::vec2(ui.available_width(), 36.0)),
                    );
                    if submit.clicked() {
                        self.send(BackendCommand::Submit);
                    }
                });
            });
    }

    fn show_error_banner(ui: &mut egui::Ui, message: &str) {
        egui::Frame::NONE
            .fill(egui::Color32::from_rgb(111, 53, 53))
            .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)))
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(10, 8))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(egui::RichText::new(message).color(egui::Color32::WHITE));
            });
    }

    fn show_notice(&mut self, ui: &mut egui::Ui) {
        let Some(notice) = self.notice.clone() else {
            return;
        };
        egui::Frame::NONE
            .fill(egui::Color32::from_rgb(96, 80, 40))
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(10, 8))
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.label(
                        egui::RichText::new(format!("{}: {}", notice.title(), notice.message()))
                            .color(egui::Color32::WHITE),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Dismiss").clicked() {
                            self.notice = None;
                        }
                    });
                });
            });
    }

    fn show_text_panel(&mut self, ui: &mut egui::Ui, title: &str, text: &str) {
        egui::Frame::group(ui.style())
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(16, 12))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.heading(title);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("Copy").clicked() {
                            self.copy_to_clipboard(title, text);
                        }
                    });
                });
                ui.add_space(6.0);
                ui.add(egui::Label::new(text).wrap());
            });
    }
}

impl eframe::App for VoiceScribeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        let view = SubmissionView::from_state(&self.submission);

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.status);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("Check backend").clicked() {
                        self.send(BackendCommand::CheckHealth);
                    }
                    ui.weak(&self.endpoint);
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.set_max_width(CARD_WIDTH);
                    ui.add_space(16.0);
                    ui.heading(egui::RichText::new("Voice Scribe").size(32.0).strong());
                    ui.add_space(16.0);

                    self.show_notice(ui);
                    self.show_form(ui, &view);
                    ui.add_space(16.0);

                    if let Some(message) = &view.error_banner {
                        Self::show_error_banner(ui, message);
                        ui.add_space(12.0);
                    }

                    if let Some(panel) = &view.result {
                        self.show_text_panel(ui, "Raw Transcription", &panel.raw_transcription);
                        ui.add_space(12.0);
                        self.show_text_panel(ui, "Sanitized Text", &panel.sanitized_text);
                        ui.add_space(6.0);
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                            ui.weak(&panel.processing_time);
                        });
                    }
                });
            });
        });

        if self.submission.is_processing() {
            ctx.request_repaint_after(std::time::Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use client_core::{reduce, SelectedFile, SubmissionEvent};
    use crossbeam_channel::bounded;

    use super::*;
    use crate::controller::events::UiErrorContext;

    fn app() -> (VoiceScribeApp, Sender<UiEvent>, Receiver<BackendCommand>) {
        let (cmd_tx, cmd_rx) = bounded(8);
        let (ui_tx, ui_rx) = bounded(8);
        (
            VoiceScribeApp::new(cmd_tx, ui_rx, "http://localhost:8000/transcribe"),
            ui_tx,
            cmd_rx,
        )
    }

    #[test]
    fn state_changes_replace_the_local_snapshot() {
        let (mut app, ui_tx, _cmd_rx) = app();
        let file = Arc::new(SelectedFile::new("sample.wav", vec![0; 4], "audio/wav"));
        let ready = reduce(
            &SubmissionState::default(),
            SubmissionEvent::FileSelected(Some(file)),
        );
        let processing = reduce(&ready, SubmissionEvent::SubmitStarted);

        ui_tx.send(UiEvent::StateChanged(ready)).expect("send");
        ui_tx
            .send(UiEvent::StateChanged(processing.clone()))
            .expect("send");
        app.process_ui_events();

        assert_eq!(app.submission, processing);
        assert_eq!(app.status, "Transcribing sample.wav");
        assert!(!SubmissionView::from_state(&app.submission).submit_enabled);
    }

    #[test]
    fn backend_errors_become_a_notice() {
        let (mut app, ui_tx, _cmd_rx) = app();
        ui_tx
            .send(UiEvent::Error(UiError::new(
                UiErrorContext::FileSelection,
                "failed to read 'x.wav'",
            )))
            .expect("send");
        app.process_ui_events();

        let notice = app.notice.expect("notice");
        assert_eq!(notice.context(), UiErrorContext::FileSelection);
    }

    #[test]
    fn submit_goes_through_the_command_queue() {
        let (mut app, _ui_tx, cmd_rx) = app();
        app.send(BackendCommand::Submit);
        assert!(matches!(cmd_rx.try_recv(), Ok(BackendCommand::Submit)));
        assert!(app.notice.is_none());
    }
}

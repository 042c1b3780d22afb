//! UI layer for desktop GUI: the single-window app shell.

pub mod app;

pub use app::VoiceScribeApp;

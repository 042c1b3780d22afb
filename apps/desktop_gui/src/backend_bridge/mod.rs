//! Bridge between the egui thread and the tokio worker that owns the
//! submission controller.

pub mod commands;
pub mod runtime;

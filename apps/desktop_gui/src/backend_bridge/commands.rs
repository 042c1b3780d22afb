//! Backend commands queued from UI to backend worker.

use std::path::PathBuf;

pub enum BackendCommand {
    SelectFile { path: PathBuf },
    Submit,
    CheckHealth,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::SelectFile { .. } => "select_file",
            BackendCommand::Submit => "submit",
            BackendCommand::CheckHealth => "check_health",
        }
    }
}

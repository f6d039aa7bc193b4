//! better-phpunit - build PHPUnit and Codeception command lines from editor
//! state.

use serde::Serialize;
use strum::{Display, EnumString};

pub mod config;
pub mod document;
pub mod error;
pub mod log;
pub mod platform;
pub mod workspace;

// Runner-specific command assembly
pub mod php;

pub use config::Settings;
pub use document::{LineSource, TextDocument};
pub use php::{Command, CommandBuilder};
pub use platform::Platform;

// --- Core Types ---

pub type FilePath = String;
pub type WorkspacePath = String;

/// Which slice of the test suite the command targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, EnumString)]
pub enum RunMode {
    #[strum(serialize = "suite")]
    #[serde(rename = "suite")]
    FullSuite,
    #[strum(serialize = "file")]
    #[serde(rename = "file")]
    File,
    #[strum(serialize = "test")]
    #[serde(rename = "test")]
    SingleTest,
}

/// Editor state captured for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    pub mode: RunMode,
    pub file_path: FilePath,
    /// Zero-based.
    pub cursor_line: usize,
    pub workspace_root: WorkspacePath,
}

impl RunRequest {
    pub fn new(
        mode: RunMode,
        file_path: impl Into<FilePath>,
        cursor_line: usize,
        workspace_root: impl Into<WorkspacePath>,
    ) -> Self {
        Self {
            mode,
            file_path: file_path.into(),
            cursor_line,
            workspace_root: workspace_root.into(),
        }
    }
}

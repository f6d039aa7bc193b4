//! Line access to the active document.

use std::{fs, path::Path};

use crate::error::BPError;

/// Host-provided view of the active document, queried one line at a time.
pub trait LineSource {
    /// Text of the zero-based line `index`, without its line terminator.
    fn line_at(&self, index: usize) -> Option<&str>;
}

/// A document held in memory, split into lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextDocument {
    lines: Vec<String>,
}

impl TextDocument {
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.lines().map(str::to_string).collect(),
        }
    }

    /// Read a document from disk. Bytes that are not UTF-8 (Latin-1 sources)
    /// are replaced rather than rejected.
    pub fn open(path: &Path) -> Result<Self, BPError> {
        let bytes = fs::read(path).map_err(|source| BPError::ActiveFile {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_text(&String::from_utf8_lossy(&bytes)))
    }
}

impl LineSource for TextDocument {
    fn line_at(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }
}

impl LineSource for [&str] {
    fn line_at(&self, index: usize) -> Option<&str> {
        self.get(index).copied()
    }
}

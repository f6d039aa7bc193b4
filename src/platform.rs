//! Host platform flavour.

use strum::{Display, EnumString};

/// Selects the `.bat` runner suffix and the filter quoting style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, clap::ValueEnum)]
#[strum(serialize_all = "lowercase")]
pub enum Platform {
    Windows,
    Posix,
}

impl Platform {
    #[must_use]
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Posix
        }
    }

    #[must_use]
    pub fn is_windows(self) -> bool {
        self == Platform::Windows
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::current()
    }
}

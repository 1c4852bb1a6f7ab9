//! Error types for restore-config

use std::path::PathBuf;

/// Result type for restore-config operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during settings discovery
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An explicitly requested settings file does not exist
    #[error("Settings file not found at {path}")]
    SettingsNotFound { path: PathBuf },

    /// Filesystem or parse error from restore-fs
    #[error(transparent)]
    Fs(#[from] restore_fs::Error),
}

//! Error types for restore-core

use crate::validate::ListKind;

/// Result type for restore-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during restore settings resolution
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A declared list mixes the clear keyword with other entries while no
    /// override is present for that output.
    #[error(
        "Invalid restore settings: \"clear\" must not be combined with other {list} entries. Project: {project}"
    )]
    InvalidClearCombination { list: ListKind, project: String },

    // Transparent wrappers for underlying crate errors
    /// Settings discovery error from restore-config
    #[error(transparent)]
    Config(#[from] restore_config::Error),

    /// Filesystem error from restore-fs
    #[error(transparent)]
    Fs(#[from] restore_fs::Error),
}

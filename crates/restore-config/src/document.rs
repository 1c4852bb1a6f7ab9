//! Settings document parsing
//!
//! A document represents one parsed settings file. Documents from several
//! directories are layered by [`MergedSettings`](crate::MergedSettings);
//! a single document never knows about inheritance beyond its own `clear`
//! flags.

use serde::{Deserialize, Serialize};

/// File names probed in each directory, first match wins.
pub const SETTINGS_FILE_NAMES: [&str; 3] = ["restore.toml", "restore.json", "restore.yaml"];

/// Package-cache section of a settings file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackagesSection {
    /// Global packages folder; relative values resolve against the
    /// directory of the declaring file.
    #[serde(default)]
    pub path: Option<String>,
}

/// An ordered list section with inheritance control
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListSection {
    /// When true, entries inherited from farther layers are discarded.
    #[serde(default)]
    pub clear: bool,

    /// Entries declared by this file, in order.
    #[serde(default)]
    pub list: Vec<String>,
}

impl ListSection {
    pub fn is_empty(&self) -> bool {
        !self.clear && self.list.is_empty()
    }
}

/// One parsed settings file
///
/// ```toml
/// [packages]
/// path = "packages"
///
/// [sources]
/// clear = false
/// list = ["https://pkgs.example.org/v1/index", "../local-feed"]
///
/// [fallback]
/// list = ["/opt/shared-cache"]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsDocument {
    #[serde(default)]
    pub packages: PackagesSection,

    #[serde(default)]
    pub sources: ListSection,

    #[serde(default)]
    pub fallback: ListSection,
}

impl SettingsDocument {
    /// A document equivalent to an empty settings file.
    pub fn empty() -> Self {
        Self::default()
    }
}

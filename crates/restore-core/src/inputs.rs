//! Invocation inputs for one resolution

use restore_fs::PortablePath;

/// Identity and anchoring directories for one resolution.
///
/// Immutable for the duration of a resolution. The two required paths
/// anchor the two normalization policies: overrides resolve against
/// `startup_dir`, project declarations against the project's directory.
#[derive(Debug, Clone)]
pub struct InvocationContext {
    /// Unique project file path; also anchors settings discovery.
    pub project_path: PortablePath,

    /// Working directory of the invoking process.
    pub startup_dir: PortablePath,

    /// Solution directory, when the project belongs to one.
    pub solution_dir: Option<PortablePath>,

    /// Pinned settings file; disables the discovery walk.
    pub config_file: Option<PortablePath>,
}

impl InvocationContext {
    pub fn new(project_path: impl Into<PortablePath>, startup_dir: impl Into<PortablePath>) -> Self {
        Self {
            project_path: project_path.into(),
            startup_dir: startup_dir.into(),
            solution_dir: None,
            config_file: None,
        }
    }

    pub fn with_solution_dir(mut self, dir: impl Into<PortablePath>) -> Self {
        self.solution_dir = Some(dir.into());
        self
    }

    pub fn with_config_file(mut self, file: impl Into<PortablePath>) -> Self {
        self.config_file = Some(file.into());
        self
    }

    /// Directory containing the project file.
    pub fn project_dir(&self) -> PortablePath {
        self.project_path
            .parent()
            .unwrap_or_else(|| PortablePath::new("/"))
    }
}

/// Command-line-origin values; `None` means "no override given".
#[derive(Debug, Clone, Default)]
pub struct OverrideInputs {
    pub packages_path: Option<String>,
    pub sources: Option<Vec<String>>,
    pub fallback_folders: Option<Vec<String>>,
}

/// Project-declared values; source and fallback lists may carry the clear
/// keyword.
#[derive(Debug, Clone, Default)]
pub struct ProjectInputs {
    pub packages_path: Option<String>,
    pub sources: Option<Vec<String>>,
    pub fallback_folders: Option<Vec<String>>,
}

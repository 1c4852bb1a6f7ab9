//! Settings file discovery
//!
//! Walks the directory hierarchy above a project, loads each settings file
//! it finds, and assembles the layered [`MergedSettings`] view. The walk
//! is skipped entirely when the caller pins an explicit settings file.

use restore_fs::{PortablePath, load_document};

use crate::document::{SETTINGS_FILE_NAMES, SettingsDocument};
use crate::machine::MachineWideSettings;
use crate::merged::{MergedSettings, SettingsLayer, SettingsView};
use crate::{Error, Result};

/// Where to look for settings, for one resolution.
#[derive(Debug, Clone)]
pub struct DiscoveryRequest<'a> {
    /// Directory containing the project file; the upward walk starts here.
    pub project_dir: &'a PortablePath,

    /// Solution directory whose settings file participates when it was not
    /// already found by the walk.
    pub solution_dir: Option<&'a PortablePath>,

    /// Pinned settings file; when set, the walk is skipped and this file
    /// must exist.
    pub config_file: Option<&'a PortablePath>,
}

/// Discovery collaborator consumed by the resolution core.
pub trait SettingsDiscovery {
    type View: SettingsView;

    /// Locate, parse, and layer persisted settings.
    ///
    /// Failures are fatal for the whole resolution; there is no retry.
    fn read_settings(&self, request: &DiscoveryRequest<'_>) -> Result<Self::View>;
}

/// File-based discovery over `restore.toml` / `restore.json` / `restore.yaml`.
pub struct FileDiscovery<'a> {
    machine: &'a MachineWideSettings,
}

impl<'a> FileDiscovery<'a> {
    /// Create a discovery backed by the given machine-wide provider.
    ///
    /// Production callers pass [`MachineWideSettings::shared`]; tests pass
    /// a provider rooted in a temp directory.
    pub fn new(machine: &'a MachineWideSettings) -> Self {
        Self { machine }
    }

    /// Find the settings file in one directory, if any.
    fn settings_file_in(dir: &PortablePath) -> Option<PortablePath> {
        SETTINGS_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
    }

    fn load_layer(path: PortablePath) -> Result<SettingsLayer> {
        let doc: SettingsDocument = load_document(&path)?;
        let path = canonical(path);
        let dir = path.parent().unwrap_or_else(|| PortablePath::new("/"));
        Ok(SettingsLayer { path, dir, doc })
    }

    /// Layers from the upward walk, closest-to-project first, plus the
    /// solution directory's file when the walk did not already collect it.
    fn walk(&self, request: &DiscoveryRequest<'_>) -> Result<Vec<SettingsLayer>> {
        let mut layers = Vec::new();

        let mut dir = Some(request.project_dir.clone());
        while let Some(current) = dir {
            if let Some(file) = Self::settings_file_in(&current) {
                tracing::debug!(path = %file, "discovered settings file");
                layers.push(Self::load_layer(file)?);
            }
            dir = current.parent();
        }

        if let Some(solution_dir) = request.solution_dir {
            if let Some(file) = Self::settings_file_in(solution_dir) {
                let canonical_file = canonical(file);
                if !layers.iter().any(|l| l.path == canonical_file) {
                    tracing::debug!(path = %canonical_file, "adding solution settings file");
                    layers.push(Self::load_layer(canonical_file)?);
                }
            }
        }

        Ok(layers)
    }
}

impl SettingsDiscovery for FileDiscovery<'_> {
    type View = MergedSettings;

    fn read_settings(&self, request: &DiscoveryRequest<'_>) -> Result<MergedSettings> {
        let mut layers = match request.config_file {
            Some(file) => {
                if !file.is_file() {
                    return Err(Error::SettingsNotFound {
                        path: file.to_native(),
                    });
                }
                tracing::debug!(path = %file, "using pinned settings file");
                vec![Self::load_layer(file.clone())?]
            }
            None => self.walk(request)?,
        };

        let machine = self.machine.layer()?;
        if let Some((path, doc)) = &machine.file {
            layers.push(SettingsLayer {
                path: path.clone(),
                dir: path.parent().unwrap_or_else(|| PortablePath::new("/")),
                doc: doc.clone(),
            });
        }

        Ok(MergedSettings::new(
            layers,
            machine.default_packages_folder.clone(),
        ))
    }
}

/// Canonicalize an on-disk path, falling back to lexical resolution.
fn canonical(path: PortablePath) -> PortablePath {
    match dunce::canonicalize(path.to_native()) {
        Ok(real) => PortablePath::new(real),
        Err(_) => path.lexically_resolved(),
    }
}

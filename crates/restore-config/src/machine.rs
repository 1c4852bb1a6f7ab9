//! Machine-wide default settings
//!
//! The machine-wide layer sits below every discovered settings file. It is
//! loaded at most once per process and shared across resolutions.

use std::sync::OnceLock;

use restore_fs::{PortablePath, load_document};

use crate::Result;
use crate::document::{SETTINGS_FILE_NAMES, SettingsDocument};

static SHARED: OnceLock<MachineWideSettings> = OnceLock::new();

/// The loaded machine-wide layer.
#[derive(Debug)]
pub struct MachineLayer {
    /// Machine-wide settings file, when one exists on disk.
    pub file: Option<(PortablePath, SettingsDocument)>,

    /// Built-in global packages folder, used when no layer declares one.
    pub default_packages_folder: PortablePath,
}

/// Provider of machine-wide defaults.
///
/// Uses the platform config directory (`<config_dir>/restore/`) unless a
/// directory override is given; the override exists so tests can exercise
/// the machine-wide layer without touching real user configuration.
#[derive(Debug, Default)]
pub struct MachineWideSettings {
    dir_override: Option<PortablePath>,
    loaded: OnceLock<MachineLayer>,
}

impl MachineWideSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a provider rooted at a custom directory.
    ///
    /// The directory is searched for a settings file and also hosts the
    /// built-in `packages` default, keeping tests fully self-contained.
    pub fn with_dir(dir: impl Into<PortablePath>) -> Self {
        Self {
            dir_override: Some(dir.into()),
            loaded: OnceLock::new(),
        }
    }

    /// The process-wide provider, constructed on first use.
    pub fn shared() -> &'static MachineWideSettings {
        SHARED.get_or_init(MachineWideSettings::new)
    }

    /// Load the machine-wide layer, at most once per provider.
    pub fn layer(&self) -> Result<&MachineLayer> {
        if let Some(layer) = self.loaded.get() {
            return Ok(layer);
        }
        let layer = self.load()?;
        // OnceLock::set is thread-safe; if another thread won the race, use their value
        let _ = self.loaded.set(layer);
        Ok(self.loaded.get().expect("just initialized"))
    }

    fn load(&self) -> Result<MachineLayer> {
        let default_packages_folder = self.default_packages_folder();

        let Some(dir) = self.settings_dir() else {
            return Ok(MachineLayer {
                file: None,
                default_packages_folder,
            });
        };

        for name in SETTINGS_FILE_NAMES {
            let candidate = dir.join(name);
            if candidate.is_file() {
                tracing::debug!(path = %candidate, "loading machine-wide settings");
                let doc: SettingsDocument = load_document(&candidate)?;
                return Ok(MachineLayer {
                    file: Some((candidate, doc)),
                    default_packages_folder,
                });
            }
        }

        tracing::debug!(dir = %dir, "no machine-wide settings file, using defaults");
        Ok(MachineLayer {
            file: None,
            default_packages_folder,
        })
    }

    fn settings_dir(&self) -> Option<PortablePath> {
        if let Some(dir) = &self.dir_override {
            return Some(dir.clone());
        }
        dirs::config_dir().map(|d| PortablePath::new(d.join("restore")))
    }

    /// Built-in cache location: the data dir, then a home dot-directory.
    /// With a directory override the default sits beside the override so
    /// tests stay self-contained.
    fn default_packages_folder(&self) -> PortablePath {
        if let Some(dir) = &self.dir_override {
            return dir.join("packages");
        }
        if let Some(data) = dirs::data_dir() {
            return PortablePath::new(data.join("restore").join("packages"));
        }
        match dirs::home_dir() {
            Some(home) => PortablePath::new(home.join(".restore").join("packages")),
            None => PortablePath::new("/restore/packages"),
        }
    }
}

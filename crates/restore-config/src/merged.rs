//! Merged, read-only view over layered settings

use restore_fs::{PortablePath, to_absolute};

use crate::document::{ListSection, SettingsDocument};

/// Read-only queries over merged configuration.
///
/// The resolution core depends on this trait rather than on
/// [`MergedSettings`] so tests can substitute views that panic when a
/// query must never run (proving a cascade tier was short-circuited).
pub trait SettingsView {
    /// Files that contributed, closest-to-project first.
    fn config_file_paths(&self) -> Vec<PortablePath>;

    /// The global packages folder; always present once settings are loaded.
    fn global_packages_folder(&self) -> PortablePath;

    /// Package sources, absolute, closest layer's entries first.
    fn package_sources(&self) -> Vec<String>;

    /// Fallback package folders, absolute, closest layer's entries first.
    fn fallback_folders(&self) -> Vec<PortablePath>;
}

/// One settings file participating in the merge.
#[derive(Debug, Clone)]
pub struct SettingsLayer {
    /// Absolute path of the file.
    pub path: PortablePath,

    /// Directory of the file; relative values in the document resolve
    /// against it.
    pub dir: PortablePath,

    /// Parsed content.
    pub doc: SettingsDocument,
}

/// Layered settings, closest-to-project first, machine-wide last.
#[derive(Debug, Clone)]
pub struct MergedSettings {
    layers: Vec<SettingsLayer>,
    default_packages_folder: PortablePath,
}

impl MergedSettings {
    /// Assemble a merged view from ordered layers.
    ///
    /// `layers` must already be ordered closest-to-project first with the
    /// machine-wide layer (if any) last; `default_packages_folder` backs
    /// [`SettingsView::global_packages_folder`] when no layer declares one.
    pub fn new(layers: Vec<SettingsLayer>, default_packages_folder: PortablePath) -> Self {
        Self {
            layers,
            default_packages_folder,
        }
    }

    /// Accumulate a list section across layers.
    ///
    /// Closest entries come first; a layer with `clear` set stops
    /// inheritance from the layers below it. Duplicates keep their closest
    /// occurrence.
    fn layered_list(&self, pick: impl Fn(&SettingsDocument) -> &ListSection) -> Vec<String> {
        let mut merged: Vec<String> = Vec::new();
        for layer in &self.layers {
            let section = pick(&layer.doc);
            for raw in &section.list {
                if let Some(resolved) = to_absolute(&layer.dir, raw) {
                    let value = resolved.as_str().to_string();
                    if !merged.contains(&value) {
                        merged.push(value);
                    }
                }
            }
            if section.clear {
                break;
            }
        }
        merged
    }
}

impl SettingsView for MergedSettings {
    fn config_file_paths(&self) -> Vec<PortablePath> {
        self.layers.iter().map(|layer| layer.path.clone()).collect()
    }

    fn global_packages_folder(&self) -> PortablePath {
        for layer in &self.layers {
            if let Some(raw) = &layer.doc.packages.path {
                if let Some(resolved) = to_absolute(&layer.dir, raw) {
                    return resolved;
                }
            }
        }
        self.default_packages_folder.clone()
    }

    fn package_sources(&self) -> Vec<String> {
        self.layered_list(|doc| &doc.sources)
    }

    fn fallback_folders(&self) -> Vec<PortablePath> {
        self.layered_list(|doc| &doc.fallback)
            .into_iter()
            .map(PortablePath::from)
            .collect()
    }
}

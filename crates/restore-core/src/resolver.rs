//! Restore settings orchestration
//!
//! Runs the validation gate, reads persisted settings through the
//! discovery collaborator, and evaluates one cascade per output. Outputs
//! are published together on success; any failure aborts the whole
//! resolution with nothing partially populated.

use restore_config::{DiscoveryRequest, SettingsDiscovery, SettingsView};
use restore_fs::{PortablePath, to_absolute};

use crate::Result;
use crate::cascade::Cascade;
use crate::inputs::{InvocationContext, OverrideInputs, ProjectInputs};
use crate::validate::{ListKind, contains_clear_keyword, validate_no_mixed_clear};

/// Effective restore settings for one invocation.
///
/// Every path is absolute; the lists preserve precedence order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSettings {
    pub packages_path: PortablePath,
    pub sources: Vec<String>,
    pub fallback_folders: Vec<PortablePath>,
    pub config_file_paths: Vec<PortablePath>,
}

/// Resolves effective restore settings through a discovery collaborator.
pub struct RestoreSettingsResolver<D> {
    discovery: D,
}

impl<D: SettingsDiscovery> RestoreSettingsResolver<D> {
    pub fn new(discovery: D) -> Self {
        Self { discovery }
    }

    /// Resolve the packages folder, sources, fallback folders, and the
    /// settings files consulted.
    ///
    /// Validation runs before any I/O; a malformed clear combination fails
    /// the invocation without touching the filesystem. Discovery failures
    /// are fatal and never retried.
    pub fn resolve(
        &self,
        context: &InvocationContext,
        overrides: &OverrideInputs,
        declared: &ProjectInputs,
    ) -> Result<ResolvedSettings> {
        match self.resolve_inner(context, overrides, declared) {
            Ok(resolved) => Ok(resolved),
            Err(error) => {
                tracing::error!(
                    project = %context.project_path,
                    %error,
                    "restore settings resolution failed"
                );
                Err(error)
            }
        }
    }

    fn resolve_inner(
        &self,
        context: &InvocationContext,
        overrides: &OverrideInputs,
        declared: &ProjectInputs,
    ) -> Result<ResolvedSettings> {
        tracing::debug!(
            project = %context.project_path,
            startup_dir = %context.startup_dir,
            solution_dir = ?context.solution_dir,
            config_file = ?context.config_file,
            override_packages_path = ?overrides.packages_path,
            override_sources = ?overrides.sources,
            override_fallback_folders = ?overrides.fallback_folders,
            declared_packages_path = ?declared.packages_path,
            declared_sources = ?declared.sources,
            declared_fallback_folders = ?declared.fallback_folders,
            "resolving restore settings"
        );

        validate_no_mixed_clear(
            declared.sources.as_deref(),
            overrides.sources.is_some(),
            ListKind::Sources,
            &context.project_path,
        )?;
        validate_no_mixed_clear(
            declared.fallback_folders.as_deref(),
            overrides.fallback_folders.is_some(),
            ListKind::FallbackFolders,
            &context.project_path,
        )?;

        let project_dir = context.project_dir();
        let settings = self.discovery.read_settings(&DiscoveryRequest {
            project_dir: &project_dir,
            solution_dir: context.solution_dir.as_ref(),
            config_file: context.config_file.as_ref(),
        })?;

        let packages_path = Cascade::new()
            .tier(|| {
                overrides
                    .packages_path
                    .as_deref()
                    .and_then(|raw| to_absolute(&context.startup_dir, raw))
            })
            .tier(|| {
                declared
                    .packages_path
                    .as_deref()
                    .and_then(|raw| to_absolute(&project_dir, raw))
            })
            .tier(|| Some(settings.global_packages_folder()))
            .resolve()
            .expect("settings tier always yields a packages folder");

        let sources = Cascade::new()
            .tier(|| {
                overrides
                    .sources
                    .as_deref()
                    .map(|list| absolute_sources(list, &context.startup_dir))
            })
            .tier(|| {
                declared
                    .sources
                    .as_deref()
                    .is_some_and(contains_clear_keyword)
                    .then(Vec::new)
            })
            .tier(|| {
                declared
                    .sources
                    .as_deref()
                    .map(|list| absolute_sources(list, &project_dir))
            })
            .tier(|| Some(settings.package_sources()))
            .resolve()
            .expect("settings tier always yields sources");

        let fallback_folders = Cascade::new()
            .tier(|| {
                overrides
                    .fallback_folders
                    .as_deref()
                    .map(|list| absolute_folders(list, &context.startup_dir))
            })
            .tier(|| {
                declared
                    .fallback_folders
                    .as_deref()
                    .is_some_and(contains_clear_keyword)
                    .then(Vec::new)
            })
            .tier(|| {
                declared
                    .fallback_folders
                    .as_deref()
                    .map(|list| absolute_folders(list, &project_dir))
            })
            .tier(|| Some(settings.fallback_folders()))
            .resolve()
            .expect("settings tier always yields fallback folders");

        let resolved = ResolvedSettings {
            packages_path,
            sources,
            fallback_folders,
            config_file_paths: settings.config_file_paths(),
        };

        tracing::debug!(
            packages_path = %resolved.packages_path,
            sources = ?resolved.sources,
            fallback_folders = ?resolved.fallback_folders,
            config_file_paths = ?resolved.config_file_paths,
            "resolved restore settings"
        );

        Ok(resolved)
    }
}

/// Reduce `file://` URLs to local paths; other values pass through.
pub fn fix_source_path(raw: &str) -> String {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("file://") else {
        return trimmed.to_string();
    };
    let bytes = rest.as_bytes();
    let is_drive = bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':';
    if rest.starts_with('/') || is_drive {
        // file:///opt/feed and file://C:/feed name local paths
        rest.to_string()
    } else {
        // file://host/share names a UNC share
        format!("//{rest}")
    }
}

fn absolute_sources(list: &[String], base: &PortablePath) -> Vec<String> {
    list.iter()
        .filter_map(|raw| to_absolute(base, &fix_source_path(raw)))
        .map(|path| path.as_str().to_string())
        .collect()
}

fn absolute_folders(list: &[String], base: &PortablePath) -> Vec<PortablePath> {
    list.iter()
        .filter_map(|raw| to_absolute(base, raw))
        .collect()
}

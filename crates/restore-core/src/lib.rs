//! Precedence cascade and orchestration for restore settings resolution
//!
//! Resolves the effective packages folder, package sources, and fallback
//! folders for a package-restore operation from four layered origins:
//! command-line overrides, per-invocation clear requests, project
//! declarations, and discovered persisted settings.
//!
//! # Architecture
//!
//! `restore-core` sits above the layer-0 crates:
//!
//! ```text
//!            host (build task / CLI)
//!                      |
//!                restore-core
//!                      |
//!           +----------+----------+
//!           |                     |
//!       restore-fs         restore-config
//! ```
//!
//! # Example
//!
//! ```ignore
//! use restore_config::{FileDiscovery, MachineWideSettings};
//! use restore_core::{InvocationContext, OverrideInputs, ProjectInputs, RestoreSettingsResolver};
//!
//! let discovery = FileDiscovery::new(MachineWideSettings::shared());
//! let resolver = RestoreSettingsResolver::new(discovery);
//! let context = InvocationContext::new("/repo/proj/app.proj", "/home/user");
//! let resolved = resolver.resolve(&context, &OverrideInputs::default(), &ProjectInputs::default())?;
//! println!("packages: {}", resolved.packages_path);
//! ```

pub mod cascade;
pub mod error;
pub mod inputs;
pub mod resolver;
pub mod validate;

pub use cascade::Cascade;
pub use error::{Error, Result};
pub use inputs::{InvocationContext, OverrideInputs, ProjectInputs};
pub use resolver::{ResolvedSettings, RestoreSettingsResolver, fix_source_path};
pub use validate::{
    CLEAR_KEYWORD, ListKind, contains_clear_keyword, is_clear_keyword, validate_no_mixed_clear,
};

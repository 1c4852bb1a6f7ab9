//! Path values and settings-file primitives for the restore resolver
//!
//! Provides forward-slash path handling, origin-aware absolutization, and
//! format-agnostic loading of settings documents.

pub mod error;
pub mod path;
pub mod store;

pub use error::{Error, Result};
pub use path::{PortablePath, to_absolute};
pub use store::load_document;

//! Clear-keyword validation for declared lists

use restore_fs::PortablePath;

use crate::{Error, Result};

/// Reserved list entry meaning "discard inherited values here".
pub const CLEAR_KEYWORD: &str = "clear";

/// Which declared list an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Sources,
    FallbackFolders,
}

impl std::fmt::Display for ListKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sources => write!(f, "source"),
            Self::FallbackFolders => write!(f, "fallback folder"),
        }
    }
}

/// Whether a single entry is the clear keyword (ASCII-case-insensitive).
pub fn is_clear_keyword(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case(CLEAR_KEYWORD)
}

/// Whether any entry of a list is the clear keyword.
pub fn contains_clear_keyword(values: &[String]) -> bool {
    values.iter().any(|value| is_clear_keyword(value))
}

/// A list is malformed when it mixes the clear keyword with real entries.
/// A list made entirely of clear keywords is a plain clear request.
fn has_mixed_clear(values: &[String]) -> bool {
    contains_clear_keyword(values) && values.iter().any(|value| !is_clear_keyword(value))
}

/// Reject a declared list that mixes the clear keyword with other entries.
///
/// Runs only when no override was supplied for the same output: an
/// override supersedes whatever the declared list says, malformed or not.
/// Runs before any settings I/O so a malformed request never pays for
/// discovery.
pub fn validate_no_mixed_clear(
    declared: Option<&[String]>,
    override_present: bool,
    list: ListKind,
    project: &PortablePath,
) -> Result<()> {
    if override_present {
        return Ok(());
    }
    if let Some(values) = declared {
        if has_mixed_clear(values) {
            return Err(Error::InvalidClearCombination {
                list,
                project: project.to_string(),
            });
        }
    }
    Ok(())
}

//! Portable path handling and origin-aware absolutization

use std::path::{Path, PathBuf};

/// A path normalized to use forward slashes internally.
///
/// Settings values travel between directories, config files, and process
/// arguments that may each use different separators. Storing one canonical
/// form keeps comparisons and layering stable; conversion to the platform
/// representation happens only at I/O boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PortablePath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl PortablePath {
    /// Create a new PortablePath from any path-like input.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let raw = path.as_ref().to_string_lossy();
        Self {
            inner: raw.replace('\\', "/"),
        }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Join this path with a trailing segment.
    pub fn join(&self, segment: &str) -> Self {
        let segment = segment.replace('\\', "/");
        let segment = segment.trim_start_matches('/');
        let joined = if self.inner.ends_with('/') {
            format!("{}{}", self.inner, segment)
        } else {
            format!("{}/{}", self.inner, segment)
        };
        Self { inner: joined }
    }

    /// Get the parent directory.
    pub fn parent(&self) -> Option<Self> {
        let trimmed = self.inner.trim_end_matches('/');
        match trimmed.rfind('/') {
            Some(0) => Some(Self {
                inner: "/".to_string(),
            }),
            Some(idx) => Some(Self {
                inner: trimmed[..idx].to_string(),
            }),
            None => None,
        }
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        let trimmed = self.inner.trim_end_matches('/');
        trimmed.rsplit('/').next().filter(|name| !name.is_empty())
    }

    /// Get the extension if present.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 { None } else { Some(&name[idx + 1..]) }
        })
    }

    /// Whether this path is rooted (Unix root, UNC, or a drive letter).
    pub fn is_rooted(&self) -> bool {
        if self.inner.starts_with('/') {
            return true;
        }
        let bytes = self.inner.as_bytes();
        bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
    }

    /// Check if this path exists on the filesystem.
    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }

    /// Check if this is a file.
    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }

    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        self.to_native().is_dir()
    }

    /// Remove `.` and `..` segments lexically.
    ///
    /// `..` never escapes a root: `/a/../../b` resolves to `/b`. Relative
    /// paths keep leading `..` segments since there is nothing to pop.
    pub fn lexically_resolved(&self) -> Self {
        let (root, rest) = self.split_root();
        let mut stack: Vec<&str> = Vec::new();
        for segment in rest.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    if stack.last().is_some_and(|s| *s != "..") {
                        stack.pop();
                    } else if root.is_none() {
                        stack.push("..");
                    }
                }
                other => stack.push(other),
            }
        }
        let body = stack.join("/");
        let inner = match root {
            Some(root) if body.is_empty() => root.to_string(),
            Some(root) => format!("{root}{body}"),
            None if body.is_empty() => ".".to_string(),
            None => body,
        };
        Self { inner }
    }

    /// Split off the root prefix (`/`, `//server/`, or `C:/`).
    fn split_root(&self) -> (Option<&str>, &str) {
        let s = self.inner.as_str();
        if s.starts_with('/') {
            let root_len = s.len() - s.trim_start_matches('/').len();
            return (Some(&s[..root_len]), &s[root_len..]);
        }
        let bytes = s.as_bytes();
        if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
            let root_len = if bytes.get(2) == Some(&b'/') { 3 } else { 2 };
            return (Some(&s[..root_len]), &s[root_len..]);
        }
        (None, s)
    }
}

impl AsRef<Path> for PortablePath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for PortablePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for PortablePath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for PortablePath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for PortablePath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for PortablePath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}

/// Resolve a raw settings value into an absolute path against `base`.
///
/// Blank input yields `None`: an unset value must never silently become
/// the current directory. Remote URLs pass through untouched so package
/// sources survive normalization. Everything else is joined onto `base`
/// when relative, then resolved lexically.
///
/// The caller picks `base` by the ORIGIN of the value: process startup
/// directory for command-line overrides, the project's directory for
/// values declared in the project, the declaring file's directory for
/// values read from settings files.
pub fn to_absolute(base: &PortablePath, raw: &str) -> Option<PortablePath> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if is_url(trimmed) {
        return Some(PortablePath::new(trimmed));
    }

    let candidate = PortablePath::new(trimmed);
    let rooted = if candidate.is_rooted() {
        candidate
    } else {
        base.join(candidate.as_str())
    };
    Some(rooted.lexically_resolved())
}

/// Whether a raw value carries a URL scheme (`https://…`, `ssh://…`).
fn is_url(raw: &str) -> bool {
    let Some(idx) = raw.find("://") else {
        return false;
    };
    let scheme = &raw[..idx];
    let mut chars = scheme.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

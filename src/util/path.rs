use std::path::{Component, Path, PathBuf};

/// Normalizes a path without touching the file system.
///
/// `.` components are dropped and `..` removes the preceding normal component
/// where there is one. Leading `..` components of relative paths are kept.
///
/// # Example
/// ```
/// use std::path::PathBuf;
///
/// use fir::util::path::normalize_lexically;
///
/// assert_eq!(normalize_lexically("scripts/./lib/../main.fir".as_ref()),
///            PathBuf::from("scripts/main.fir"));
/// assert_eq!(normalize_lexically("../shared.fir".as_ref()),
///            PathBuf::from("../shared.fir"));
/// ```
#[must_use]
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {},
            Component::ParentDir => {
                if matches!(normalized.components().next_back(), Some(Component::Normal(_))) {
                    normalized.pop();
                } else if !matches!(normalized.components().next_back(),
                                    Some(Component::RootDir | Component::Prefix(_)))
                {
                    normalized.push("..");
                }
            },
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Returns the identity used to detect repeated inclusion of a file.
///
/// Existing files are canonicalized so that different spellings of the same
/// path (and symlinks) compare equal; anything else is normalized lexically.
#[must_use]
pub fn include_key(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| normalize_lexically(path))
}

/// Returns the name shown for a source file in diagnostics.
///
/// # Example
/// ```
/// use fir::util::path::display_name;
///
/// assert_eq!(display_name("scripts/lib/math.fir".as_ref()), "math.fir");
/// ```
#[must_use]
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(),
                     |name| name.to_string_lossy().into_owned())
}

//! Path normalization, relation and visibility helpers.
//!
//! Comparisons work on `/`-separated strings so that the same query text
//! behaves identically on every platform.

use std::path::{Component, Path, PathBuf};

use crate::error::{Result, ToolbeltError};

/// Normalizes a path for comparison (forward slashes, no trailing slash).
pub fn normalize_path_for_compare(raw: &str) -> String {
    let mut normalized = raw.replace('\\', "/");

    while normalized.ends_with('/') {
        if normalized == "/" || looks_like_windows_drive_root(normalized.as_str()) {
            break;
        }
        normalized.pop();
    }

    if normalized.is_empty() {
        "/".to_string()
    } else {
        normalized
    }
}

fn looks_like_windows_drive_root(path: &str) -> bool {
    path.len() == 3
        && path.as_bytes()[1] == b':'
        && path.as_bytes()[2] == b'/'
        && path.as_bytes()[0].is_ascii_alphabetic()
}

/// Splits a `/`-separated path into its non-empty segments.
pub fn split_path_segments(path: &str) -> Vec<String> {
    path.split(['/', '\\'])
        .filter(|segment| !segment.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Checks if `candidate` sits directly inside `parent`.
pub fn is_direct_child_path(candidate: &str, parent: &str) -> bool {
    let candidate = normalize_path_for_compare(candidate);
    let parent = normalize_path_for_compare(parent);
    if candidate == parent {
        return false;
    }
    match candidate.rsplit_once('/') {
        Some(("", _)) => parent == "/",
        Some((head, _)) => head == parent,
        None => false,
    }
}

/// Checks if `candidate` sits anywhere below `parent`.
pub fn is_descendant_path(candidate: &str, parent: &str) -> bool {
    let candidate = normalize_path_for_compare(candidate);
    let parent = normalize_path_for_compare(parent);
    if candidate == parent {
        return false;
    }
    if parent.ends_with('/') {
        return candidate.starts_with(parent.as_str());
    }
    candidate
        .strip_prefix(parent.as_str())
        .is_some_and(|rest| rest.starts_with('/'))
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a tilde prefix are returned unchanged.
pub fn expand_home(raw: &str) -> Result<PathBuf> {
    let trimmed = raw.trim();
    if trimmed != "~" && !trimmed.starts_with("~/") && !trimmed.starts_with("~\\") {
        return Ok(PathBuf::from(trimmed));
    }

    let home = std::env::var("HOME")
        .map(PathBuf::from)
        .map_err(|_| ToolbeltError::Path("HOME is not set".to_string()))?;
    if trimmed == "~" {
        return Ok(home);
    }
    let rest = trimmed
        .strip_prefix("~/")
        .or_else(|| trimmed.strip_prefix("~\\"))
        .unwrap_or_default();
    Ok(home.join(rest))
}

/// Extracts the lowercased extension from a file name.
pub fn extension_of_name(name: &str) -> Option<String> {
    let split = name.rfind('.')?;
    if split == 0 || split + 1 >= name.len() {
        return None;
    }
    Some(name[split + 1..].to_ascii_lowercase())
}

/// Returns `path` expressed relative to `base`, walking up with `..` as needed.
pub fn relative_path(path: &Path, base: &Path) -> Option<PathBuf> {
    pathdiff::diff_paths(path, base)
}

/// Returns `path` relative to `root`, joined with `/`.
///
/// The root itself maps to an empty string. Returns `None` when `path` is not
/// below `root`.
pub fn relative_slash_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let segments = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            _ => None,
        })
        .collect::<Vec<_>>();
    Some(segments.join("/"))
}

/// Dot-prefixed names are hidden; `.` and `..` are not.
pub fn is_hidden_name(name: &str) -> bool {
    name.starts_with('.') && name != "." && name != ".."
}

/// A relative path is visible only if none of its components is hidden.
///
/// A hidden ancestor makes every descendant invisible.
pub fn is_visible_path(relative: &Path) -> bool {
    relative.components().all(|component| match component {
        Component::Normal(name) => !is_hidden_name(name.to_string_lossy().as_ref()),
        _ => true,
    })
}

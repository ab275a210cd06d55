//! Regpath queries: a hybrid glob/regex syntax for filtering walked entries.
//!
//! A query has the form `[filters::]pattern`:
//! - `filters` is a hyphen-separated subset of `visible`, `dir`, `file`
//!   (abbreviated `v`, `d`, `f`), defaulting to `dir-file`
//! - `pattern` is matched against the entry path relative to the walk root
//!
//! ```
//! use toolbelt::Regpath;
//!
//! let query = Regpath::compile("file::**.py").unwrap();
//! assert!(query.matches("a/b/c.py", false, true));
//! assert!(!query.matches("a/b/c.py", true, true));
//! ```

mod filter;
mod pattern;

use std::borrow::Cow;
use std::fmt;
use std::path::{Component, Path};
use std::str::FromStr;

use regex::Regex;
use serde::Deserialize;

use crate::error::{Result, ToolbeltError};
use crate::paths::is_visible_path;

pub use filter::RegpathFilter;
pub use pattern::{translate_pattern, MATCH_ALL};

/// Separates the filter list from the pattern.
pub const FILTER_SEPARATOR: &str = "::";

/// A compiled regpath query.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "String")]
pub struct Regpath {
    filters: RegpathFilter,
    pattern: String,
    regex: Regex,
}

impl Regpath {
    /// Compiles a raw query string.
    ///
    /// Fails with [`ToolbeltError::InvalidQuery`] on an unknown filter, more
    /// than one `::`, or a pattern that does not form a valid regex.
    pub fn compile(query: &str) -> Result<Self> {
        let (filters, pattern) = split_query(query)?;
        let filters = match filters {
            Some(raw) => RegpathFilter::parse(raw)?,
            None => RegpathFilter::DEFAULT,
        };
        let regex = pattern::compile_pattern(pattern)?;
        log::trace!("compiled regpath {query:?} to {}", regex.as_str());

        Ok(Self {
            filters,
            pattern: pattern.to_string(),
            regex,
        })
    }

    /// Returns the filter set.
    pub fn filters(&self) -> RegpathFilter {
        self.filters
    }

    /// Returns the pattern half of the query as written.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Returns the generated regex source.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Tests an entry against the filters, then the pattern.
    ///
    /// `path` is relative to the walk root; `\` separators are treated as `/`.
    pub fn matches(&self, path: &str, is_dir: bool, is_visible: bool) -> bool {
        self.filters.accepts(is_dir, is_visible) && self.matches_pattern(path)
    }

    /// Tests only the pattern half of the query.
    ///
    /// `\` is read as `/`; empty and `.` segments are dropped.
    pub fn matches_pattern(&self, path: &str) -> bool {
        self.regex.is_match(normalize_relative(path).as_ref())
    }

    /// Tests a relative path, deriving visibility from its components.
    pub fn matches_path(&self, relative: &Path, is_dir: bool) -> bool {
        let joined = relative
            .components()
            .filter(|component| matches!(component, Component::Normal(_) | Component::ParentDir))
            .map(|component| component.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        self.matches(joined.as_str(), is_dir, is_visible_path(relative))
    }
}

fn normalize_relative(path: &str) -> Cow<'_, str> {
    let is_clean = !path.contains('\\')
        && (path.is_empty()
            || path
                .split('/')
                .all(|segment| !segment.is_empty() && segment != "."));
    if is_clean {
        return Cow::Borrowed(path);
    }
    let joined = path
        .split(['/', '\\'])
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/");
    Cow::Owned(joined)
}

fn split_query(query: &str) -> Result<(Option<&str>, &str)> {
    if query.matches(FILTER_SEPARATOR).count() > 1 {
        return Err(ToolbeltError::InvalidQuery(format!(
            "query {query:?} contains more than one {FILTER_SEPARATOR:?}"
        )));
    }
    Ok(match query.split_once(FILTER_SEPARATOR) {
        Some((filters, pattern)) => (Some(filters), pattern),
        None => (None, query),
    })
}

impl FromStr for Regpath {
    type Err = ToolbeltError;

    fn from_str(query: &str) -> Result<Self> {
        Self::compile(query)
    }
}

impl TryFrom<String> for Regpath {
    type Error = ToolbeltError;

    fn try_from(query: String) -> Result<Self> {
        Self::compile(query.as_str())
    }
}

impl fmt::Display for Regpath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{FILTER_SEPARATOR}{}", self.filters, self.pattern)
    }
}

//! Entry-kind and visibility filters for regpath queries.

use std::fmt;

use bitflags::bitflags;

use crate::error::{Result, ToolbeltError};

bitflags! {
    /// The filter half of a regpath query (`visible-file::…`).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RegpathFilter: u8 {
        const VISIBLE = 0b0001;
        const DIR     = 0b0010;
        const FILE    = 0b0100;
    }
}

impl RegpathFilter {
    /// Both entry kinds, no visibility requirement.
    pub const DEFAULT: Self = Self::DIR.union(Self::FILE);

    /// Parses a hyphen-separated filter list such as `v-f` or `visible-dir`.
    ///
    /// An empty list yields [`RegpathFilter::DEFAULT`].
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(Self::DEFAULT);
        }

        let mut filters = Self::empty();
        for token in trimmed.split('-') {
            let normalized = token.trim().to_ascii_lowercase();
            let filter = lookup_filter_token(normalized.as_str()).ok_or_else(|| {
                ToolbeltError::InvalidQuery(format!(
                    "unknown filter {token:?}, expected one of visible (v), dir (d), file (f)"
                ))
            })?;
            filters |= filter;
        }
        Ok(filters)
    }

    /// Returns true if an entry of this kind and visibility passes the filter.
    ///
    /// When neither `dir` nor `file` is present every kind is accepted.
    pub fn accepts(self, is_dir: bool, is_visible: bool) -> bool {
        if self.contains(Self::VISIBLE) && !is_visible {
            return false;
        }
        let kinds = self & Self::DEFAULT;
        if kinds.is_empty() {
            return true;
        }
        if is_dir {
            kinds.contains(Self::DIR)
        } else {
            kinds.contains(Self::FILE)
        }
    }
}

fn lookup_filter_token(value: &str) -> Option<RegpathFilter> {
    match value {
        "v" | "visible" => Some(RegpathFilter::VISIBLE),
        "d" | "dir" => Some(RegpathFilter::DIR),
        "f" | "file" => Some(RegpathFilter::FILE),
        _ => None,
    }
}

impl fmt::Display for RegpathFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = [
            (Self::VISIBLE, "visible"),
            (Self::DIR, "dir"),
            (Self::FILE, "file"),
        ]
        .into_iter()
        .filter(|(flag, _)| self.contains(*flag))
        .map(|(_, name)| name)
        .collect::<Vec<_>>();
        f.write_str(names.join("-").as_str())
    }
}

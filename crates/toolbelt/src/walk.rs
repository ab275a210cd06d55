//! Directory walking filtered by a regpath query.
//!
//! Walking is depth-first with children sorted per directory, so results come
//! back in a stable preorder. Ignore files (`.gitignore` and friends) are not
//! consulted; only the query decides what is returned. Hidden means a
//! dot-prefixed name on every platform, the same rule the query applies.
//! Symlinks are classified without following them unless
//! [`WalkOptions::follow_links`] is set.

use std::cmp::Ordering;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use serde::Deserialize;

use crate::error::{Result, ToolbeltError};
use crate::paths::{is_hidden_name, relative_slash_path};
use crate::regpath::{Regpath, RegpathFilter};

/// Ordering of siblings within one directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalkOrder {
    /// Files before subdirectories, each group by name.
    FilesFirst,
    /// Subdirectories before files, each group by name.
    DirsFirst,
    /// Plain name order.
    #[default]
    Name,
}

/// Options controlling a walk.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WalkOptions {
    pub order: WalkOrder,
    /// Maximum depth below the root; `Some(1)` lists only direct children.
    pub max_depth: Option<usize>,
    pub follow_links: bool,
    /// Also test the root itself (with an empty relative path).
    pub include_root: bool,
}

impl WalkOptions {
    pub fn with_order(mut self, order: WalkOrder) -> Self {
        self.order = order;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn with_follow_links(mut self, follow_links: bool) -> Self {
        self.follow_links = follow_links;
        self
    }

    pub fn with_include_root(mut self, include_root: bool) -> Self {
        self.include_root = include_root;
        self
    }
}

/// An entry accepted by the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkEntry {
    /// Full path as produced by the walker (rooted at the walk root).
    pub path: PathBuf,
    /// Path relative to the walk root, `/`-separated.
    pub relative: String,
    pub is_dir: bool,
    /// Depth below the root (root is 0).
    pub depth: usize,
}

/// Compiles `query` and walks `root` with it.
pub fn walk_str(root: &Path, query: &str, options: &WalkOptions) -> Result<Vec<WalkEntry>> {
    let query = Regpath::compile(query)?;
    walk(root, &query, options)
}

/// Walks `root` and returns every entry accepted by `query`, in walk order.
///
/// Entries that cannot be read are logged and skipped.
pub fn walk(root: &Path, query: &Regpath, options: &WalkOptions) -> Result<Vec<WalkEntry>> {
    let metadata = match fs::metadata(root) {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(ToolbeltError::PathNotFound(root.to_path_buf()));
        }
        Err(err) => return Err(err.into()),
    };
    if !metadata.is_dir() {
        return Err(ToolbeltError::Path(format!(
            "{} is not a directory",
            root.display()
        )));
    }

    let order = options.order;
    let follow_links = options.follow_links;
    let prune_hidden = query.filters().contains(RegpathFilter::VISIBLE);
    let mut builder = WalkBuilder::new(root);
    builder
        .standard_filters(false)
        .follow_links(follow_links)
        .max_depth(options.max_depth)
        .sort_by_file_path(move |left, right| {
            compare_siblings(order, follow_links, left, right)
        });
    if prune_hidden {
        // Nothing below a hidden directory can satisfy `visible`.
        builder.filter_entry(|entry| {
            entry.depth() == 0 || !is_hidden_name(entry.file_name().to_string_lossy().as_ref())
        });
    }

    let mut entries = Vec::new();
    let mut scanned = 0usize;
    let mut skipped = 0usize;

    for result in builder.build() {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                skipped += 1;
                log::warn!("skipping unreadable entry under {}: {err}", root.display());
                continue;
            }
        };

        let depth = entry.depth();
        if depth == 0 && !options.include_root {
            continue;
        }
        scanned += 1;

        let is_dir = entry.file_type().is_some_and(|file_type| file_type.is_dir());
        let path = entry.into_path();
        let Ok(relative_path) = path.strip_prefix(root) else {
            continue;
        };
        if !query.matches_path(relative_path, is_dir) {
            continue;
        }
        let Some(relative) = relative_slash_path(root, &path) else {
            continue;
        };

        entries.push(WalkEntry {
            path,
            relative,
            is_dir,
            depth,
        });
    }

    log::debug!(
        "walked {}: scanned={scanned} matched={} skipped={skipped} query={query}",
        root.display(),
        entries.len()
    );
    Ok(entries)
}

fn compare_siblings(order: WalkOrder, follow_links: bool, left: &Path, right: &Path) -> Ordering {
    let by_name = || left.file_name().cmp(&right.file_name());
    let is_dir = |path: &Path| {
        let metadata = if follow_links {
            fs::metadata(path)
        } else {
            fs::symlink_metadata(path)
        };
        metadata.is_ok_and(|metadata| metadata.is_dir())
    };
    match order {
        WalkOrder::Name => by_name(),
        WalkOrder::FilesFirst => is_dir(left).cmp(&is_dir(right)).then_with(by_name),
        WalkOrder::DirsFirst => is_dir(right).cmp(&is_dir(left)).then_with(by_name),
    }
}

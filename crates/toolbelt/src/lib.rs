//! Filesystem matching and text processing utilities.
//!
//! This crate provides:
//! - Regpath queries (hybrid glob/regex with kind and visibility filters)
//! - Filtered directory walks
//! - Path helpers
//! - A multi-separator tokenizer and simultaneous word replacement
//! - Localized month and weekday names

pub mod date;
pub mod error;
pub mod paths;
pub mod regpath;
pub mod text;
pub mod walk;

// Re-export main types
pub use date::{format_localized, DateNames, DateTranslator, Language};
pub use error::{Result, ToolbeltError};
pub use regpath::{Regpath, RegpathFilter};
pub use text::{MultiReplace, MultiSplit, Node, Token, TokenKind};
pub use walk::{walk, walk_str, WalkEntry, WalkOptions, WalkOrder};

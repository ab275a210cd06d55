//! Text processing: tokenizing, nesting, replacing and formatting strings.
//!
//! This module provides:
//! - [`MultiSplit`], a tokenizer over several named separators and pairs
//! - [`Node`] trees built from paired separators
//! - [`MultiReplace`], simultaneous whole-word replacement
//! - small formatting and LaTeX escaping helpers

pub mod format;
pub mod latex;
mod replace;
mod split;
mod tree;

pub use replace::{
    MultiReplace, MultiReplaceBuilder, ReplaceConfig, ReplaceRule, IDENTIFIER_PATTERN,
    LETTERS_PATTERN, WORD_PATTERN,
};
pub use split::{
    MultiSplit, MultiSplitBuilder, NamedSeparator, PairSeparator, SplitConfig, Token, TokenKind,
    Tokens, DEFAULT_SEPARATOR_NAME, TEXT_KIND_NAME,
};
pub use tree::{flatten, Node};

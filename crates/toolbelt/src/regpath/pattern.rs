//! Translation of the glob half of a regpath query into an anchored regex.
//!
//! | Pattern | Regex        | Meaning                                   |
//! |---------|--------------|-------------------------------------------|
//! | `*`     | `[^/]*`      | any run within one path segment           |
//! | `**`    | `.*`         | any run, crossing separators              |
//! | `**/`   | `(?:.*/)?`   | zero or more leading directories          |
//! | `.`     | `\.`         | literal dot                               |
//! | `\x`    | escaped `x`  | literal character                         |
//! | `[..]`  | verbatim     | regex character class                     |
//!
//! Every other character is a literal: regex metacharacters such as `+`,
//! `(`, `|` or `$` are escaped, so `notes (1).txt` matches only itself.

use std::iter::Peekable;
use std::str::Chars;

use regex::Regex;

use crate::error::{Result, ToolbeltError};

/// Pattern used when a query has no pattern text.
pub const MATCH_ALL: &str = "**";

/// Compiles a regpath pattern into an anchored regex.
pub fn compile_pattern(pattern: &str) -> Result<Regex> {
    let translated = translate_pattern(pattern)?;
    Regex::new(translated.as_str()).map_err(|err| {
        ToolbeltError::InvalidQuery(format!("invalid pattern {pattern:?}: {err}"))
    })
}

/// Rewrites a regpath pattern into regex source text.
pub fn translate_pattern(pattern: &str) -> Result<String> {
    let source = if pattern.is_empty() { MATCH_ALL } else { pattern };

    let mut out = String::with_capacity(source.len() * 2 + 8);
    out.push_str("(?s)^(?:");

    let mut chars = source.chars().peekable();
    let mut segment_start = true;
    while let Some(ch) = chars.next() {
        match ch {
            '*' => {
                if chars.peek() == Some(&'*') {
                    while chars.peek() == Some(&'*') {
                        chars.next();
                    }
                    if segment_start && chars.peek() == Some(&'/') {
                        chars.next();
                        out.push_str("(?:.*/)?");
                        segment_start = true;
                        continue;
                    }
                    out.push_str(".*");
                } else {
                    out.push_str("[^/]*");
                }
            }
            '.' => out.push_str(r"\."),
            '\\' => {
                let escaped = chars.next().ok_or_else(|| {
                    ToolbeltError::InvalidQuery(format!(
                        "pattern {pattern:?} ends with a dangling escape"
                    ))
                })?;
                push_literal(&mut out, escaped);
            }
            '[' => copy_character_class(&mut chars, &mut out, pattern)?,
            _ => push_literal(&mut out, ch),
        }
        segment_start = ch == '/';
    }

    out.push_str(")$");
    Ok(out)
}

fn push_literal(out: &mut String, ch: char) {
    let mut buffer = [0u8; 4];
    out.push_str(regex::escape(ch.encode_utf8(&mut buffer)).as_str());
}

fn copy_character_class(
    chars: &mut Peekable<Chars<'_>>,
    out: &mut String,
    pattern: &str,
) -> Result<()> {
    out.push('[');
    if chars.peek() == Some(&'^') {
        out.push('^');
        chars.next();
    }
    // A leading `]` is a member of the class, not its end.
    if chars.peek() == Some(&']') {
        out.push_str(r"\]");
        chars.next();
    }

    for ch in chars.by_ref() {
        match ch {
            ']' => {
                out.push(']');
                return Ok(());
            }
            '[' => out.push_str(r"\["),
            _ => out.push(ch),
        }
    }

    Err(ToolbeltError::InvalidQuery(format!(
        "unterminated character class in pattern {pattern:?}"
    )))
}

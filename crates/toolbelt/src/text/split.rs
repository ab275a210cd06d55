//! Multi-separator tokenizer.
//!
//! [`MultiSplit`] scans text once, left to right, and yields a [`Token`] for
//! every literal run and every separator it recognizes. Separators are tried
//! longest first, so `<=` wins over `<` when both are configured.
//!
//! ```
//! use toolbelt::text::MultiSplit;
//!
//! let splitter = MultiSplit::builder().separator(",").strip(true).build().unwrap();
//! let pairs = splitter
//!     .split(" a , b ,c")
//!     .map(|token| (token.kind.name(), token.value))
//!     .collect::<Vec<_>>();
//! assert_eq!(pairs[0], ("text", "a".to_string()));
//! assert_eq!(pairs[1], ("sep", ",".to_string()));
//! ```

use std::collections::HashSet;

use serde::Deserialize;

use crate::error::{Result, ToolbeltError};

/// Name given to separators added without an explicit name.
pub const DEFAULT_SEPARATOR_NAME: &str = "sep";

/// Name reported by [`TokenKind::Text`].
pub const TEXT_KIND_NAME: &str = "text";

/// What a token is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind<'s> {
    Text,
    Separator(&'s str),
    /// Opening half of a named pair.
    Open(&'s str),
    /// Closing half of a named pair.
    Close(&'s str),
}

impl<'s> TokenKind<'s> {
    /// Returns `"text"` for literal runs, otherwise the separator name.
    pub fn name(&self) -> &'s str {
        match self {
            Self::Text => TEXT_KIND_NAME,
            Self::Separator(name) | Self::Open(name) | Self::Close(name) => name,
        }
    }
}

/// One segment of the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'s> {
    pub kind: TokenKind<'s>,
    pub value: String,
    /// Byte offset in the input where the token's source text starts.
    pub offset: usize,
}

impl Token<'_> {
    pub fn is_text(&self) -> bool {
        matches!(self.kind, TokenKind::Text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SeparatorRole {
    Plain,
    Open,
    Close,
}

#[derive(Debug, Clone)]
struct Separator {
    name: String,
    text: String,
    role: SeparatorRole,
}

impl Separator {
    fn kind(&self) -> TokenKind<'_> {
        match self.role {
            SeparatorRole::Plain => TokenKind::Separator(self.name.as_str()),
            SeparatorRole::Open => TokenKind::Open(self.name.as_str()),
            SeparatorRole::Close => TokenKind::Close(self.name.as_str()),
        }
    }
}

/// A configured tokenizer. Immutable once built.
#[derive(Debug, Clone)]
pub struct MultiSplit {
    /// Sorted longest first.
    separators: Vec<Separator>,
    escape: Option<char>,
    strip: bool,
    keep_empty: bool,
}

impl MultiSplit {
    /// Builds a tokenizer over plain separators named `"sep"`.
    pub fn new<I, S>(separators: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        separators
            .into_iter()
            .fold(Self::builder(), |builder, separator| builder.separator(separator))
            .build()
    }

    pub fn builder() -> MultiSplitBuilder {
        MultiSplitBuilder::default()
    }

    /// Builds a tokenizer from deserialized configuration.
    pub fn from_config(config: &SplitConfig) -> Result<Self> {
        let mut builder = Self::builder()
            .strip(config.strip)
            .keep_empty(config.keep_empty);
        if let Some(escape) = config.escape {
            builder = builder.escape(escape);
        }
        for separator in &config.separators {
            builder = builder.separator(separator.as_str());
        }
        for named in &config.named {
            builder = builder.named(named.name.as_str(), named.text.as_str());
        }
        for pair in &config.pairs {
            builder = builder.pair(pair.name.as_str(), pair.open.as_str(), pair.close.as_str());
        }
        builder.build()
    }

    /// Lazily tokenizes `text`. Each call starts a fresh scan.
    pub fn split<'s, 't>(&'s self, text: &'t str) -> Tokens<'s, 't> {
        Tokens {
            splitter: self,
            text,
            cursor: 0,
            pending: None,
            after_separator: false,
            finished: false,
        }
    }

    /// Eagerly tokenizes `text`.
    pub fn tokens(&self, text: &str) -> Vec<Token<'_>> {
        self.split(text).collect()
    }

    /// Returns only the literal text values, in order.
    pub fn values(&self, text: &str) -> Vec<String> {
        self.split(text)
            .filter(Token::is_text)
            .map(|token| token.value)
            .collect()
    }

    pub fn escape_char(&self) -> Option<char> {
        self.escape
    }

    pub fn strips(&self) -> bool {
        self.strip
    }

    fn match_at(&self, rest: &str) -> Option<&Separator> {
        self.separators
            .iter()
            .find(|separator| rest.starts_with(separator.text.as_str()))
    }

    fn text_token(&self, raw: String, offset: usize, force: bool) -> Option<Token<'_>> {
        let value = if self.strip {
            raw.trim().to_string()
        } else {
            raw
        };
        if value.is_empty() && !force {
            return None;
        }
        Some(Token {
            kind: TokenKind::Text,
            value,
            offset,
        })
    }
}

/// Collects separators and options, validated by [`MultiSplitBuilder::build`].
#[derive(Debug, Clone, Default)]
pub struct MultiSplitBuilder {
    separators: Vec<Separator>,
    escape: Option<char>,
    strip: bool,
    keep_empty: bool,
}

impl MultiSplitBuilder {
    /// Adds a separator named `"sep"`.
    pub fn separator(self, text: impl Into<String>) -> Self {
        self.named(DEFAULT_SEPARATOR_NAME, text)
    }

    /// Adds a separator reported under `name`.
    pub fn named(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.separators.push(Separator {
            name: name.into(),
            text: text.into(),
            role: SeparatorRole::Plain,
        });
        self
    }

    /// Adds an opening/closing pair used by [`MultiSplit::tree`].
    pub fn pair(
        mut self,
        name: impl Into<String>,
        open: impl Into<String>,
        close: impl Into<String>,
    ) -> Self {
        let name = name.into();
        self.separators.push(Separator {
            name: name.clone(),
            text: open.into(),
            role: SeparatorRole::Open,
        });
        self.separators.push(Separator {
            name,
            text: close.into(),
            role: SeparatorRole::Close,
        });
        self
    }

    /// Sets the character that makes the following separator literal.
    pub fn escape(mut self, escape: char) -> Self {
        self.escape = Some(escape);
        self
    }

    /// Trims whitespace around literal runs.
    pub fn strip(mut self, strip: bool) -> Self {
        self.strip = strip;
        self
    }

    /// Emits empty literal runs between adjacent separators.
    pub fn keep_empty(mut self, keep_empty: bool) -> Self {
        self.keep_empty = keep_empty;
        self
    }

    pub fn build(self) -> Result<MultiSplit> {
        let mut seen_text = HashSet::new();
        let mut seen_pairs = HashSet::new();
        let mut open_text: Option<&str> = None;

        for separator in &self.separators {
            if separator.text.is_empty() {
                return Err(ToolbeltError::InvalidConfig(format!(
                    "separator {:?} is empty",
                    separator.name
                )));
            }
            if separator.name.is_empty() {
                return Err(ToolbeltError::InvalidConfig(format!(
                    "separator {:?} has an empty name",
                    separator.text
                )));
            }
            if let Some(escape) = self.escape {
                if separator.text.starts_with(escape) {
                    return Err(ToolbeltError::InvalidConfig(format!(
                        "separator {:?} starts with the escape character {escape:?}",
                        separator.text
                    )));
                }
            }
            match separator.role {
                SeparatorRole::Plain => {}
                SeparatorRole::Open => {
                    if !seen_pairs.insert(separator.name.as_str()) {
                        return Err(ToolbeltError::InvalidConfig(format!(
                            "pair {:?} is configured more than once",
                            separator.name
                        )));
                    }
                    open_text = Some(separator.text.as_str());
                }
                SeparatorRole::Close => {
                    if open_text == Some(separator.text.as_str()) {
                        return Err(ToolbeltError::InvalidConfig(format!(
                            "pair {:?} uses the same text to open and close",
                            separator.name
                        )));
                    }
                }
            }
            if !seen_text.insert(separator.text.as_str()) {
                return Err(ToolbeltError::InvalidConfig(format!(
                    "separator {:?} is configured more than once",
                    separator.text
                )));
            }
        }

        let mut separators = self.separators;
        separators.sort_by(|left, right| right.text.len().cmp(&left.text.len()));

        Ok(MultiSplit {
            separators,
            escape: self.escape,
            strip: self.strip,
            keep_empty: self.keep_empty,
        })
    }
}

/// Lazy token stream over one input. Created by [`MultiSplit::split`].
#[derive(Debug, Clone)]
pub struct Tokens<'s, 't> {
    splitter: &'s MultiSplit,
    text: &'t str,
    cursor: usize,
    pending: Option<Token<'s>>,
    after_separator: bool,
    finished: bool,
}

impl<'s> Iterator for Tokens<'s, '_> {
    type Item = Token<'s>;

    fn next(&mut self) -> Option<Token<'s>> {
        if let Some(token) = self.pending.take() {
            return Some(token);
        }
        if self.finished {
            return None;
        }

        let splitter = self.splitter;
        let text = self.text;
        let run_start = self.cursor;
        let mut run = String::new();

        while self.cursor < text.len() {
            let rest = &text[self.cursor..];

            if let Some(escape) = splitter.escape {
                if let Some(after) = rest.strip_prefix(escape) {
                    if after.starts_with(escape) {
                        run.push(escape);
                        self.cursor += escape.len_utf8() * 2;
                        continue;
                    }
                    if let Some(first) = splitter
                        .match_at(after)
                        .and_then(|separator| separator.text.chars().next())
                    {
                        run.push(first);
                        self.cursor += escape.len_utf8() + first.len_utf8();
                        continue;
                    }
                }
            }

            if let Some(separator) = splitter.match_at(rest) {
                let token = Token {
                    kind: separator.kind(),
                    value: separator.text.clone(),
                    offset: self.cursor,
                };
                self.cursor += separator.text.len();
                self.after_separator = true;

                return match splitter.text_token(run, run_start, splitter.keep_empty) {
                    Some(text) => {
                        self.pending = Some(token);
                        Some(text)
                    }
                    None => Some(token),
                };
            }

            let Some(ch) = rest.chars().next() else {
                break;
            };
            run.push(ch);
            self.cursor += ch.len_utf8();
        }

        self.finished = true;
        let force = splitter.keep_empty && self.after_separator;
        splitter.text_token(run, run_start, force)
    }
}

impl std::iter::FusedIterator for Tokens<'_, '_> {}

/// Serializable tokenizer configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    /// Plain separators named `"sep"`.
    pub separators: Vec<String>,
    pub named: Vec<NamedSeparator>,
    pub pairs: Vec<PairSeparator>,
    pub escape: Option<char>,
    pub strip: bool,
    pub keep_empty: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NamedSeparator {
    pub name: String,
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PairSeparator {
    pub name: String,
    pub open: String,
    pub close: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs<'s>(splitter: &'s MultiSplit, text: &str) -> Vec<(&'s str, String)> {
        splitter
            .split(text)
            .map(|token| (token.kind.name(), token.value))
            .collect()
    }

    fn owned(expected: &[(&'static str, &str)]) -> Vec<(&'static str, String)> {
        expected
            .iter()
            .map(|(kind, value)| (*kind, value.to_string()))
            .collect()
    }

    #[test]
    fn strip_trims_text_tokens() {
        let splitter = MultiSplit::builder()
            .separator(",")
            .strip(true)
            .build()
            .unwrap();
        assert_eq!(
            pairs(&splitter, " a , b ,c"),
            owned(&[
                ("text", "a"),
                ("sep", ","),
                ("text", "b"),
                ("sep", ","),
                ("text", "c"),
            ])
        );
    }

    #[test]
    fn round_trip_without_escape() {
        let splitter = MultiSplit::new([",", ";;", " - ", "é"]).unwrap();
        for text in [
            "",
            ",",
            "a,b;;c",
            ",,;;;;,",
            "one - two -three",
            "café,é;",
            "no separators here",
        ] {
            let joined = splitter
                .split(text)
                .map(|token| token.value)
                .collect::<String>();
            assert_eq!(joined, text);
        }
    }

    #[test]
    fn longest_separator_wins() {
        let splitter = MultiSplit::builder()
            .named("lt", "<")
            .named("le", "<=")
            .build()
            .unwrap();
        assert_eq!(
            pairs(&splitter, "a<=b<c"),
            owned(&[
                ("text", "a"),
                ("le", "<="),
                ("text", "b"),
                ("lt", "<"),
                ("text", "c"),
            ])
        );
    }

    #[test]
    fn adjacent_separators_skip_empty_runs_by_default() {
        let splitter = MultiSplit::new([","]).unwrap();
        assert_eq!(
            pairs(&splitter, ",,a"),
            owned(&[("sep", ","), ("sep", ","), ("text", "a")])
        );
    }

    #[test]
    fn keep_empty_emits_empty_runs() {
        let splitter = MultiSplit::builder()
            .separator(",")
            .keep_empty(true)
            .build()
            .unwrap();
        assert_eq!(
            pairs(&splitter, ",a,"),
            owned(&[
                ("text", ""),
                ("sep", ","),
                ("text", "a"),
                ("sep", ","),
                ("text", ""),
            ])
        );
        assert!(splitter.tokens("").is_empty());
    }

    #[test]
    fn escape_makes_separator_literal() {
        let splitter = MultiSplit::builder()
            .separator(",")
            .escape('\\')
            .build()
            .unwrap();
        assert_eq!(
            pairs(&splitter, r"a\,b,c"),
            owned(&[("text", "a,b"), ("sep", ","), ("text", "c")])
        );
        // Doubled escape is one literal escape; the separator then applies.
        assert_eq!(
            pairs(&splitter, r"a\\,b"),
            owned(&[("text", r"a\"), ("sep", ","), ("text", "b")])
        );
        // An escape before anything else is kept.
        assert_eq!(pairs(&splitter, r"a\nb"), owned(&[("text", r"a\nb")]));
    }

    #[test]
    fn escape_only_covers_first_separator_char() {
        let splitter = MultiSplit::builder()
            .separator("::")
            .escape('\\')
            .build()
            .unwrap();
        // `\:` makes the first colon literal, the second one cannot start `::`.
        assert_eq!(pairs(&splitter, r"a\::b"), owned(&[("text", "a::b")]));
        assert_eq!(
            pairs(&splitter, r"a\:::b"),
            owned(&[("text", "a:"), ("sep", "::"), ("text", "b")])
        );
    }

    #[test]
    fn offsets_point_into_input() {
        let splitter = MultiSplit::new(["|"]).unwrap();
        let tokens = splitter.tokens("ab|cd");
        assert_eq!(
            tokens.iter().map(|token| token.offset).collect::<Vec<_>>(),
            vec![0, 2, 3]
        );
    }

    #[test]
    fn split_is_restartable() {
        let splitter = MultiSplit::new([" "]).unwrap();
        let first = splitter.tokens("x y z");
        let second = splitter.tokens("x y z");
        assert_eq!(first, second);
        assert_eq!(splitter.values("x y z"), vec!["x", "y", "z"]);
    }

    #[test]
    fn iterator_is_fused() {
        let splitter = MultiSplit::new([","]).unwrap();
        let mut tokens = splitter.split("a,b");
        assert_eq!(tokens.by_ref().count(), 3);
        assert!(tokens.next().is_none());
        assert!(tokens.next().is_none());
    }

    #[test]
    fn whitespace_only_runs_are_dropped_when_stripping() {
        let splitter = MultiSplit::builder()
            .separator(";")
            .strip(true)
            .build()
            .unwrap();
        assert_eq!(
            pairs(&splitter, "a;   ;b"),
            owned(&[("text", "a"), ("sep", ";"), ("sep", ";"), ("text", "b")])
        );
    }

    #[test]
    fn pair_tokens_carry_role() {
        let splitter = MultiSplit::builder()
            .pair("paren", "(", ")")
            .build()
            .unwrap();
        let kinds = splitter
            .split("f(x)")
            .map(|token| token.kind)
            .collect::<Vec<_>>();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Text,
                TokenKind::Open("paren"),
                TokenKind::Text,
                TokenKind::Close("paren"),
            ]
        );
    }

    #[test]
    fn invalid_configurations() {
        assert!(matches!(
            MultiSplit::new([""]),
            Err(ToolbeltError::InvalidConfig(_))
        ));
        assert!(MultiSplit::new([",", ","]).is_err());
        assert!(MultiSplit::builder().pair("q", "\"", "\"").build().is_err());
        assert!(MultiSplit::builder()
            .pair("p", "(", ")")
            .pair("p", "[", "]")
            .build()
            .is_err());
        assert!(MultiSplit::builder()
            .separator("\\n")
            .escape('\\')
            .build()
            .is_err());
    }

    #[test]
    fn from_config_json() {
        let config: SplitConfig = serde_json::from_str(
            r#"{
                "separators": [","],
                "named": [{"name": "arrow", "text": "->"}],
                "pairs": [{"name": "brace", "open": "{", "close": "}"}],
                "escape": "\\",
                "strip": true
            }"#,
        )
        .unwrap();
        let splitter = MultiSplit::from_config(&config).unwrap();
        assert_eq!(splitter.escape_char(), Some('\\'));
        assert!(splitter.strips());
        assert_eq!(
            pairs(&splitter, "a -> {b, c}"),
            owned(&[
                ("text", "a"),
                ("arrow", "->"),
                ("brace", "{"),
                ("text", "b"),
                ("sep", ","),
                ("text", "c"),
                ("brace", "}"),
            ])
        );
    }
}

//! Simultaneous replacement of many fixed words.
//!
//! [`MultiReplace`] finds candidate spans with a word pattern and swaps every
//! span that is exactly one of the configured keys. All substitutions of one
//! pass happen at once, so `a→b, b→a` swaps words rather than chaining.
//!
//! In recursive mode the pass is repeated over its own output until nothing
//! changes. Rule sets whose replacement texts feed back into their own keys
//! are rejected when the replacer is built.

use std::collections::{HashMap, HashSet};

use petgraph::algo::toposort;
use petgraph::graph::DiGraph;
use regex::Regex;
use serde::Deserialize;

use crate::error::{Result, ToolbeltError};

/// Identifier-like words: `snake_case`, `CamelCase`, `x1`.
pub const IDENTIFIER_PATTERN: &str = r"[A-Za-z_][A-Za-z0-9_]*";

/// Runs of Unicode word characters.
pub const WORD_PATTERN: &str = r"\w+";

/// Runs of Unicode letters.
pub const LETTERS_PATTERN: &str = r"\p{L}+";

/// Upper bound on recursive passes over one input.
const MAX_PASSES: usize = 1024;

/// A compiled replacement rule set. Immutable once built.
#[derive(Debug, Clone)]
pub struct MultiReplace {
    rules: HashMap<String, String>,
    /// `None` only when there are no rules and no word pattern.
    candidates: Option<Regex>,
    recursive: bool,
}

impl MultiReplace {
    /// Builds a replacer from `(old, new)` pairs.
    ///
    /// Without a word pattern the keys themselves are the candidates, longest
    /// first. Recursive mode requires a word pattern.
    pub fn new<I, K, V>(rules: I, word_pattern: Option<&str>, recursive: bool) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut builder = Self::builder().rules(rules).recursive(recursive);
        if let Some(pattern) = word_pattern {
            builder = builder.word_pattern(pattern);
        }
        builder.build()
    }

    pub fn builder() -> MultiReplaceBuilder {
        MultiReplaceBuilder::default()
    }

    /// Builds a replacer from deserialized configuration.
    pub fn from_config(config: &ReplaceConfig) -> Result<Self> {
        Self::new(
            config
                .rules
                .iter()
                .map(|rule| (rule.old.as_str(), rule.new.as_str())),
            config.word_pattern.as_deref(),
            config.recursive,
        )
    }

    pub fn is_recursive(&self) -> bool {
        self.recursive
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns the replacement for an exact key.
    pub fn get(&self, old: &str) -> Option<&str> {
        self.rules.get(old).map(String::as_str)
    }

    /// Applies the rules to `text`.
    pub fn replace(&self, text: &str) -> String {
        self.replace_count(text).0
    }

    /// Applies the rules and reports how many substitutions were made.
    ///
    /// In recursive mode passes repeat until one changes nothing.
    pub fn replace_count(&self, text: &str) -> (String, usize) {
        let (mut output, mut total) = self.replace_once(text);
        if !self.recursive || total == 0 {
            return (output, total);
        }

        // Replacements can join their neighbours into new candidate words,
        // so the pass count is not bounded by the rule graph.
        let mut seen = HashSet::from([text.to_string()]);
        for _ in 0..MAX_PASSES {
            let (next, count) = self.replace_once(output.as_str());
            if count == 0 || next == output {
                return (output, total);
            }
            total += count;
            seen.insert(std::mem::replace(&mut output, next));
            if seen.contains(output.as_str()) {
                log::warn!("recursive replacement repeats an earlier output; stopping");
                return (output, total);
            }
        }
        log::warn!("recursive replacement did not settle after {MAX_PASSES} passes");
        (output, total)
    }

    fn replace_once(&self, text: &str) -> (String, usize) {
        let Some(candidates) = &self.candidates else {
            return (text.to_string(), 0);
        };

        let mut output = String::with_capacity(text.len());
        let mut last = 0usize;
        let mut count = 0usize;
        for found in candidates.find_iter(text) {
            let Some(new) = self.rules.get(found.as_str()) else {
                continue;
            };
            output.push_str(&text[last..found.start()]);
            output.push_str(new.as_str());
            last = found.end();
            count += 1;
        }
        output.push_str(&text[last..]);
        (output, count)
    }
}

/// Collects rules and options, validated by [`MultiReplaceBuilder::build`].
#[derive(Debug, Clone, Default)]
pub struct MultiReplaceBuilder {
    rules: Vec<(String, String)>,
    word_pattern: Option<String>,
    recursive: bool,
}

impl MultiReplaceBuilder {
    pub fn rule(mut self, old: impl Into<String>, new: impl Into<String>) -> Self {
        self.rules.push((old.into(), new.into()));
        self
    }

    pub fn rules<I, K, V>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.rules
            .extend(rules.into_iter().map(|(old, new)| (old.into(), new.into())));
        self
    }

    /// Restricts candidate spans to matches of `pattern`.
    pub fn word_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.word_pattern = Some(pattern.into());
        self
    }

    /// Re-applies the rules to their own output until a fixed point.
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn build(self) -> Result<MultiReplace> {
        if self.recursive && self.word_pattern.is_none() {
            return Err(ToolbeltError::InvalidConfig(
                "recursive replacement requires a word pattern".to_string(),
            ));
        }

        let mut rules = HashMap::with_capacity(self.rules.len());
        for (old, new) in self.rules {
            if old.is_empty() {
                return Err(ToolbeltError::InvalidConfig(
                    "replacement keys must not be empty".to_string(),
                ));
            }
            if rules.contains_key(old.as_str()) {
                return Err(ToolbeltError::InvalidConfig(format!(
                    "replacement key {old:?} is configured more than once"
                )));
            }
            rules.insert(old, new);
        }

        let candidates = match self.word_pattern.as_deref() {
            Some(pattern) => {
                let candidates = compile_word_pattern(pattern)?;
                let whole = compile_word_pattern(format!("^(?:{pattern})$").as_str())?;
                if let Some(old) = rules.keys().find(|old| !whole.is_match(old.as_str())) {
                    return Err(ToolbeltError::InvalidConfig(format!(
                        "replacement key {old:?} does not match the word pattern {pattern:?}"
                    )));
                }
                Some(candidates)
            }
            None => key_alternation(&rules)?,
        };

        if self.recursive {
            if let Some(candidates) = &candidates {
                reject_cycles(&rules, candidates)?;
            }
        }

        log::trace!(
            "built replacer with {} rules (recursive={})",
            rules.len(),
            self.recursive
        );
        Ok(MultiReplace {
            rules,
            candidates,
            recursive: self.recursive,
        })
    }
}

fn compile_word_pattern(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|err| {
        ToolbeltError::InvalidConfig(format!("invalid word pattern {pattern:?}: {err}"))
    })
}

/// Matches any key, preferring the longest at each position.
fn key_alternation(rules: &HashMap<String, String>) -> Result<Option<Regex>> {
    if rules.is_empty() {
        return Ok(None);
    }
    let mut keys = rules.keys().map(String::as_str).collect::<Vec<_>>();
    keys.sort_by(|left, right| right.len().cmp(&left.len()).then_with(|| left.cmp(right)));
    let alternation = keys
        .into_iter()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join("|");
    compile_word_pattern(alternation.as_str()).map(Some)
}

/// Fails if some key can reach itself through the replacement texts.
fn reject_cycles(rules: &HashMap<String, String>, candidates: &Regex) -> Result<()> {
    let mut graph: DiGraph<&str, ()> = DiGraph::new();
    let indices = rules
        .keys()
        .map(|old| (old.as_str(), graph.add_node(old.as_str())))
        .collect::<HashMap<_, _>>();

    for (old, new) in rules {
        let from = indices[old.as_str()];
        for found in candidates.find_iter(new.as_str()) {
            if let Some(&to) = indices.get(found.as_str()) {
                graph.update_edge(from, to, ());
            }
        }
    }

    toposort(&graph, None).map(|_| ()).map_err(|cycle| {
        ToolbeltError::CyclicRules {
            word: graph[cycle.node_id()].to_string(),
        }
    })
}

/// Serializable replacer configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReplaceConfig {
    pub rules: Vec<ReplaceRule>,
    pub word_pattern: Option<String>,
    pub recursive: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReplaceRule {
    pub old: String,
    pub new: String,
}

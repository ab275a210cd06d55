//! Word-level translation of date names between two tables.

use std::collections::HashSet;

use crate::error::Result;
use crate::text::{MultiReplace, LETTERS_PATTERN};

use super::names::DateNames;

/// Rewrites month and weekday names from one table into another.
///
/// Matching is case-sensitive and on whole letter runs. When a word appears
/// more than once in the source table (German `Mai` is both a month and its
/// abbreviation), full month names win, then full weekday names, then month
/// abbreviations, then weekday abbreviations.
#[derive(Debug, Clone)]
pub struct DateTranslator {
    replacer: MultiReplace,
}

impl DateTranslator {
    /// Fails with `InvalidConfig` if a name in `from` is not a single word.
    pub fn new(from: &DateNames, to: &DateNames) -> Result<Self> {
        let columns = [
            (from.months(), to.months()),
            (from.weekdays(), to.weekdays()),
            (from.months_abbr(), to.months_abbr()),
            (from.weekdays_abbr(), to.weekdays_abbr()),
        ];

        let mut seen = HashSet::new();
        let mut rules = Vec::new();
        for (source, target) in columns {
            for (old, new) in source.iter().zip(target) {
                if seen.insert(old.as_str()) {
                    rules.push((old.as_str(), new.as_str()));
                }
            }
        }

        let replacer = MultiReplace::new(rules, Some(LETTERS_PATTERN), false)?;
        Ok(Self { replacer })
    }

    pub fn translate(&self, text: &str) -> String {
        self.replacer.replace(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::Language;
    use crate::error::ToolbeltError;

    fn translator(from: Language, to: Language) -> DateTranslator {
        DateTranslator::new(&DateNames::builtin(from), &DateNames::builtin(to)).unwrap()
    }

    #[test]
    fn english_to_french() {
        let translator = translator(Language::English, Language::French);
        assert_eq!(translator.translate("Monday 3 March"), "lundi 3 mars");
        assert_eq!(translator.translate("Sun, 1 Dec"), "dim, 1 déc");
    }

    #[test]
    fn only_whole_words_are_translated() {
        let translator = translator(Language::English, Language::French);
        assert_eq!(translator.translate("Monsoon Mayhem"), "Monsoon Mayhem");
        assert_eq!(translator.translate("monday"), "monday");
    }

    #[test]
    fn full_names_take_priority() {
        let translator = translator(Language::German, Language::English);
        assert_eq!(translator.translate("Mai"), "May");
        assert_eq!(translator.translate("Montag, 3. März"), "Monday, 3. March");
        assert_eq!(translator.translate("Mo 3. Mär"), "Mon 3. Mar");
    }

    #[test]
    fn month_abbreviations_beat_weekday_abbreviations() {
        let translator = translator(Language::Spanish, Language::English);
        assert_eq!(translator.translate("mar"), "Mar");
        assert_eq!(translator.translate("miércoles 5 de marzo"), "Wednesday 5 de March");
    }

    #[test]
    fn round_trip_through_another_language() {
        let there = translator(Language::English, Language::German);
        let back = translator(Language::German, Language::English);
        let text = "Friday 13 October";
        assert_eq!(back.translate(there.translate(text).as_str()), text);
    }

    #[test]
    fn multi_word_names_are_rejected() {
        let english = DateNames::builtin(Language::English);
        let mut months = english.months().to_vec();
        months[0] = "First Month".to_string();
        let custom = DateNames::new(
            months,
            english.months_abbr().to_vec(),
            english.weekdays().to_vec(),
            english.weekdays_abbr().to_vec(),
        )
        .unwrap();
        assert!(matches!(
            DateTranslator::new(&custom, &english),
            Err(ToolbeltError::InvalidConfig(_))
        ));
    }
}

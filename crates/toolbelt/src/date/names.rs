//! Month and weekday name tables.

use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use serde::Deserialize;

use crate::error::{Result, ToolbeltError};

/// Languages with built-in name tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    English,
    French,
    German,
    Spanish,
}

impl Language {
    pub const ALL: [Language; 4] = [
        Language::English,
        Language::French,
        Language::German,
        Language::Spanish,
    ];

    /// ISO 639-1 code.
    pub fn code(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::French => "fr",
            Self::German => "de",
            Self::Spanish => "es",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = ToolbeltError;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Self::English),
            "fr" | "french" => Ok(Self::French),
            "de" | "german" => Ok(Self::German),
            "es" | "spanish" => Ok(Self::Spanish),
            other => Err(ToolbeltError::InvalidInput(format!(
                "unknown language: {other}"
            ))),
        }
    }
}

/// Month and weekday names for one language.
///
/// Months are indexed from January, weekdays from Monday.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawDateNames")]
pub struct DateNames {
    months: Vec<String>,
    months_abbr: Vec<String>,
    weekdays: Vec<String>,
    weekdays_abbr: Vec<String>,
}

#[derive(Deserialize)]
struct RawDateNames {
    months: Vec<String>,
    months_abbr: Vec<String>,
    weekdays: Vec<String>,
    weekdays_abbr: Vec<String>,
}

impl TryFrom<RawDateNames> for DateNames {
    type Error = ToolbeltError;

    fn try_from(raw: RawDateNames) -> Result<Self> {
        Self::new(raw.months, raw.months_abbr, raw.weekdays, raw.weekdays_abbr)
    }
}

impl DateNames {
    /// Builds a table, checking for 12 months, 7 weekdays and no empty names.
    pub fn new(
        months: Vec<String>,
        months_abbr: Vec<String>,
        weekdays: Vec<String>,
        weekdays_abbr: Vec<String>,
    ) -> Result<Self> {
        check_table("months", &months, 12)?;
        check_table("months_abbr", &months_abbr, 12)?;
        check_table("weekdays", &weekdays, 7)?;
        check_table("weekdays_abbr", &weekdays_abbr, 7)?;
        Ok(Self {
            months,
            months_abbr,
            weekdays,
            weekdays_abbr,
        })
    }

    /// Returns the built-in table for `language`.
    pub fn builtin(language: Language) -> Self {
        let (months, months_abbr, weekdays, weekdays_abbr) = match language {
            Language::English => (
                &ENGLISH_MONTHS,
                &ENGLISH_MONTHS_ABBR,
                &ENGLISH_WEEKDAYS,
                &ENGLISH_WEEKDAYS_ABBR,
            ),
            Language::French => (
                &FRENCH_MONTHS,
                &FRENCH_MONTHS_ABBR,
                &FRENCH_WEEKDAYS,
                &FRENCH_WEEKDAYS_ABBR,
            ),
            Language::German => (
                &GERMAN_MONTHS,
                &GERMAN_MONTHS_ABBR,
                &GERMAN_WEEKDAYS,
                &GERMAN_WEEKDAYS_ABBR,
            ),
            Language::Spanish => (
                &SPANISH_MONTHS,
                &SPANISH_MONTHS_ABBR,
                &SPANISH_WEEKDAYS,
                &SPANISH_WEEKDAYS_ABBR,
            ),
        };
        Self {
            months: owned(months),
            months_abbr: owned(months_abbr),
            weekdays: owned(weekdays),
            weekdays_abbr: owned(weekdays_abbr),
        }
    }

    /// Full month name; `month` is 1-based. `None` outside `1..=12`.
    pub fn month_name(&self, month: u32) -> Option<&str> {
        month_index(month).map(|index| self.months[index].as_str())
    }

    pub fn month_abbr(&self, month: u32) -> Option<&str> {
        month_index(month).map(|index| self.months_abbr[index].as_str())
    }

    pub fn weekday_name(&self, weekday: Weekday) -> &str {
        self.weekdays[weekday.num_days_from_monday() as usize].as_str()
    }

    pub fn weekday_abbr(&self, weekday: Weekday) -> &str {
        self.weekdays_abbr[weekday.num_days_from_monday() as usize].as_str()
    }

    pub fn months(&self) -> &[String] {
        &self.months
    }

    pub fn months_abbr(&self) -> &[String] {
        &self.months_abbr
    }

    pub fn weekdays(&self) -> &[String] {
        &self.weekdays
    }

    pub fn weekdays_abbr(&self) -> &[String] {
        &self.weekdays_abbr
    }
}

fn month_index(month: u32) -> Option<usize> {
    (1..=12).contains(&month).then(|| month as usize - 1)
}

fn check_table(field: &str, names: &[String], expected: usize) -> Result<()> {
    if names.len() != expected {
        return Err(ToolbeltError::InvalidConfig(format!(
            "{field}: expected {expected} names, got {}",
            names.len()
        )));
    }
    if let Some(position) = names.iter().position(|name| name.trim().is_empty()) {
        return Err(ToolbeltError::InvalidConfig(format!(
            "{field}: name {} is empty",
            position + 1
        )));
    }
    Ok(())
}

fn owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| (*name).to_string()).collect()
}

const ENGLISH_MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];
const ENGLISH_MONTHS_ABBR: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const ENGLISH_WEEKDAYS: [&str; 7] = [
    "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday",
];
const ENGLISH_WEEKDAYS_ABBR: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

const FRENCH_MONTHS: [&str; 12] = [
    "janvier", "février", "mars", "avril", "mai", "juin", "juillet", "août", "septembre",
    "octobre", "novembre", "décembre",
];
const FRENCH_MONTHS_ABBR: [&str; 12] = [
    "janv", "févr", "mars", "avr", "mai", "juin", "juil", "août", "sept", "oct", "nov", "déc",
];
const FRENCH_WEEKDAYS: [&str; 7] = [
    "lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi", "dimanche",
];
const FRENCH_WEEKDAYS_ABBR: [&str; 7] = ["lun", "mar", "mer", "jeu", "ven", "sam", "dim"];

const GERMAN_MONTHS: [&str; 12] = [
    "Januar", "Februar", "März", "April", "Mai", "Juni", "Juli", "August", "September",
    "Oktober", "November", "Dezember",
];
const GERMAN_MONTHS_ABBR: [&str; 12] = [
    "Jan", "Feb", "Mär", "Apr", "Mai", "Jun", "Jul", "Aug", "Sep", "Okt", "Nov", "Dez",
];
const GERMAN_WEEKDAYS: [&str; 7] = [
    "Montag", "Dienstag", "Mittwoch", "Donnerstag", "Freitag", "Samstag", "Sonntag",
];
const GERMAN_WEEKDAYS_ABBR: [&str; 7] = ["Mo", "Di", "Mi", "Do", "Fr", "Sa", "So"];

const SPANISH_MONTHS: [&str; 12] = [
    "enero", "febrero", "marzo", "abril", "mayo", "junio", "julio", "agosto", "septiembre",
    "octubre", "noviembre", "diciembre",
];
const SPANISH_MONTHS_ABBR: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sep", "oct", "nov", "dic",
];
const SPANISH_WEEKDAYS: [&str; 7] = [
    "lunes", "martes", "miércoles", "jueves", "viernes", "sábado", "domingo",
];
const SPANISH_WEEKDAYS_ABBR: [&str; 7] = ["lun", "mar", "mié", "jue", "vie", "sáb", "dom"];

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(names: &[&str]) -> Vec<String> {
        owned(names)
    }

    #[test]
    fn builtin_tables_are_valid() {
        for language in Language::ALL {
            let names = DateNames::builtin(language);
            let rebuilt = DateNames::new(
                names.months().to_vec(),
                names.months_abbr().to_vec(),
                names.weekdays().to_vec(),
                names.weekdays_abbr().to_vec(),
            )
            .unwrap();
            assert_eq!(rebuilt, names, "{language}");
        }
    }

    #[test]
    fn lookups_are_one_based_and_monday_first() {
        let french = DateNames::builtin(Language::French);
        assert_eq!(french.month_name(1), Some("janvier"));
        assert_eq!(french.month_abbr(12), Some("déc"));
        assert_eq!(french.month_name(0), None);
        assert_eq!(french.month_name(13), None);
        assert_eq!(french.weekday_name(Weekday::Mon), "lundi");
        assert_eq!(french.weekday_abbr(Weekday::Sun), "dim");
    }

    #[test]
    fn rejects_wrong_lengths_and_empty_names() {
        let english = DateNames::builtin(Language::English);
        let short = DateNames::new(
            english.months()[..11].to_vec(),
            english.months_abbr().to_vec(),
            english.weekdays().to_vec(),
            english.weekdays_abbr().to_vec(),
        );
        assert!(matches!(short, Err(ToolbeltError::InvalidConfig(_))));

        let mut weekdays_abbr = english.weekdays_abbr().to_vec();
        weekdays_abbr[3] = " ".to_string();
        let blank = DateNames::new(
            english.months().to_vec(),
            english.months_abbr().to_vec(),
            english.weekdays().to_vec(),
            weekdays_abbr,
        );
        assert!(matches!(blank, Err(ToolbeltError::InvalidConfig(_))));
    }

    #[test]
    fn deserializes_with_validation() {
        let json = serde_json::json!({
            "months": strings(&GERMAN_MONTHS),
            "months_abbr": strings(&GERMAN_MONTHS_ABBR),
            "weekdays": strings(&GERMAN_WEEKDAYS),
            "weekdays_abbr": strings(&GERMAN_WEEKDAYS_ABBR),
        });
        let names: DateNames = serde_json::from_value(json).unwrap();
        assert_eq!(names, DateNames::builtin(Language::German));

        let invalid = serde_json::json!({
            "months": strings(&GERMAN_MONTHS),
            "months_abbr": strings(&GERMAN_MONTHS_ABBR),
            "weekdays": strings(&GERMAN_WEEKDAYS[..6]),
            "weekdays_abbr": strings(&GERMAN_WEEKDAYS_ABBR),
        });
        assert!(serde_json::from_value::<DateNames>(invalid).is_err());
    }

    #[test]
    fn language_parsing() {
        assert_eq!("fr".parse::<Language>().unwrap(), Language::French);
        assert_eq!("German".parse::<Language>().unwrap(), Language::German);
        assert!("klingon".parse::<Language>().is_err());
        let parsed: Language = serde_json::from_str("\"spanish\"").unwrap();
        assert_eq!(parsed, Language::Spanish);
    }
}

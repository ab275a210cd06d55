//! Localized month and weekday names.
//!
//! Name tables are plain values: pick a [`DateNames::builtin`] table or load
//! one from configuration, then pass it to [`format_localized`] or a
//! [`DateTranslator`].

mod names;
mod translate;

use std::fmt::{self, Write as _};

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::error::{Result, ToolbeltError};

pub use names::{DateNames, Language};
pub use translate::DateTranslator;

/// Replaces the name specifiers of a strftime format with names from `names`.
///
/// `%A`, `%a`, `%B`, `%b` and `%h` become literal text (with any `%` in a
/// name doubled); every other specifier, `%%` included, is left for chrono.
pub fn localize_format(fmt: &str, date: &impl Datelike, names: &DateNames) -> String {
    let mut out = String::with_capacity(fmt.len() + 16);
    let mut chars = fmt.chars();
    while let Some(ch) = chars.next() {
        if ch != '%' {
            out.push(ch);
            continue;
        }
        let Some(specifier) = chars.next() else {
            out.push('%');
            break;
        };
        let name = match specifier {
            'A' => Some(names.weekday_name(date.weekday())),
            'a' => Some(names.weekday_abbr(date.weekday())),
            'B' => names.month_name(date.month()),
            'b' | 'h' => names.month_abbr(date.month()),
            _ => None,
        };
        match name {
            Some(name) => out.push_str(name.replace('%', "%%").as_str()),
            None => {
                out.push('%');
                out.push(specifier);
            }
        }
    }
    out
}

/// Formats a date-time with chrono, using `names` for month and weekday names.
///
/// An invalid format string is [`ToolbeltError::InvalidInput`].
pub fn format_localized(date: &NaiveDateTime, fmt: &str, names: &DateNames) -> Result<String> {
    let localized = localize_format(fmt, date, names);
    render(date.format(localized.as_str()), fmt)
}

/// Date-only variant of [`format_localized`].
pub fn format_localized_date(date: &NaiveDate, fmt: &str, names: &DateNames) -> Result<String> {
    let localized = localize_format(fmt, date, names);
    render(date.format(localized.as_str()), fmt)
}

fn render(formatted: impl fmt::Display, fmt: &str) -> Result<String> {
    let mut out = String::new();
    write!(out, "{formatted}")
        .map_err(|_| ToolbeltError::InvalidInput(format!("invalid date format {fmt:?}")))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn formats_french_names() {
        let french = DateNames::builtin(Language::French);
        assert_eq!(
            format_localized_date(&date(2024, 3, 4), "%A %-d %B %Y", &french).unwrap(),
            "lundi 4 mars 2024"
        );
    }

    #[test]
    fn formats_abbreviations() {
        let german = DateNames::builtin(Language::German);
        assert_eq!(
            format_localized_date(&date(2024, 5, 5), "%a %d. %b", &german).unwrap(),
            "So 05. Mai"
        );
        assert_eq!(
            format_localized_date(&date(2024, 3, 5), "%h", &german).unwrap(),
            "Mär"
        );
    }

    #[test]
    fn keeps_literal_percent_and_time_fields() {
        let spanish = DateNames::builtin(Language::Spanish);
        let at = date(2024, 3, 6).and_hms_opt(14, 30, 0).unwrap();
        assert_eq!(
            format_localized(&at, "100%% %A %H:%M", &spanish).unwrap(),
            "100% miércoles 14:30"
        );
    }

    #[test]
    fn localize_format_leaves_other_specifiers() {
        let english = DateNames::builtin(Language::English);
        assert_eq!(
            localize_format("%Y-%m-%d %B %%B", &date(2024, 1, 2), &english),
            "%Y-%m-%d January %%B"
        );
    }

    #[test]
    fn invalid_format_is_an_error() {
        let english = DateNames::builtin(Language::English);
        assert!(matches!(
            format_localized_date(&date(2024, 1, 2), "%Q", &english),
            Err(ToolbeltError::InvalidInput(_))
        ));
    }
}

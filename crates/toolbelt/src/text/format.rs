//! Small string formatting helpers.

use crate::error::{Result, ToolbeltError};

const ELLIPSIS: char = '…';

/// Where [`ellipsize`] cuts the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ellipsis {
    #[default]
    End,
    Middle,
}

/// Removes the leading whitespace shared by every non-blank line.
///
/// Whitespace-only lines come back empty and do not affect the margin.
pub fn dedent(text: &str) -> String {
    let mut margin: Option<&str> = None;
    for line in text.split('\n') {
        if line.trim().is_empty() {
            continue;
        }
        let leading = &line[..line.len() - line.trim_start().len()];
        margin = Some(match margin {
            None => leading,
            Some(current) => common_prefix(current, leading),
        });
    }
    let margin = margin.unwrap_or("");

    text.split('\n')
        .map(|line| {
            if line.trim().is_empty() {
                ""
            } else {
                &line[margin.len()..]
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn common_prefix<'a>(left: &'a str, right: &str) -> &'a str {
    let end = left
        .char_indices()
        .zip(right.chars())
        .find(|((_, a), b)| a != b)
        .map_or_else(|| left.len().min(right.len()), |((index, _), _)| index);
    &left[..end]
}

/// Prepends `prefix` to every non-blank line.
pub fn indent(text: &str, prefix: &str) -> String {
    text.split('\n')
        .map(|line| {
            if line.trim().is_empty() {
                line.to_string()
            } else {
                format!("{prefix}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Shortens `text` to at most `max_chars` characters, marking the cut with `…`.
pub fn ellipsize(text: &str, max_chars: usize, mode: Ellipsis) -> String {
    let count = text.chars().count();
    if count <= max_chars {
        return text.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }

    let keep = max_chars - 1;
    let mut out = String::with_capacity(text.len().min(max_chars * 4));
    match mode {
        Ellipsis::End => {
            out.extend(text.chars().take(keep));
            out.push(ELLIPSIS);
        }
        Ellipsis::Middle => {
            let head = keep.div_ceil(2);
            let tail = keep / 2;
            out.extend(text.chars().take(head));
            out.push(ELLIPSIS);
            out.extend(text.chars().skip(count - tail));
        }
    }
    out
}

const SIZE_UNITS: [&str; 6] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB"];

/// Renders a byte count with binary units, e.g. `1.5 KiB`.
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64;
    let mut unit = 0usize;
    // Round before comparing so 1023.96 KiB prints as 1.0 MiB.
    while unit + 1 < SIZE_UNITS.len() && (value * 10.0).round() / 10.0 >= 1024.0 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", SIZE_UNITS[unit])
}

/// Parses a size such as `512`, `1.5k`, `10 MB` or `2GiB` into bytes.
///
/// All units are binary; fractional values are rounded to the nearest byte
/// and values past `u64::MAX` saturate.
pub fn parse_size(raw: &str) -> Result<u64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ToolbeltError::InvalidInput(
            "size: expected a number".to_string(),
        ));
    }

    let split = trimmed
        .char_indices()
        .find(|(_, ch)| !(ch.is_ascii_digit() || *ch == '.'))
        .map_or(trimmed.len(), |(index, _)| index);
    let (number_part, unit_part) = trimmed.split_at(split);
    if number_part.is_empty() {
        return Err(ToolbeltError::InvalidInput(format!(
            "size: expected a numeric value in {raw:?}"
        )));
    }

    let value: f64 = number_part.parse().map_err(|_| {
        ToolbeltError::InvalidInput(format!("size: failed to parse number in {raw:?}"))
    })?;
    let multiplier = size_unit_multiplier(unit_part)?;
    let bytes = (value * multiplier as f64).round();
    if !bytes.is_finite() || bytes < 0.0 {
        return Err(ToolbeltError::InvalidInput(format!(
            "size: value {raw:?} is out of range"
        )));
    }

    if bytes > u64::MAX as f64 {
        Ok(u64::MAX)
    } else {
        Ok(bytes as u64)
    }
}

fn size_unit_multiplier(unit: &str) -> Result<u64> {
    match unit.trim().to_ascii_lowercase().as_str() {
        "" | "b" | "byte" | "bytes" => Ok(1),
        "k" | "kb" | "kib" | "kilobyte" | "kilobytes" => Ok(1024),
        "m" | "mb" | "mib" | "megabyte" | "megabytes" => Ok(1024_u64.pow(2)),
        "g" | "gb" | "gib" | "gigabyte" | "gigabytes" => Ok(1024_u64.pow(3)),
        "t" | "tb" | "tib" | "terabyte" | "terabytes" => Ok(1024_u64.pow(4)),
        "p" | "pb" | "pib" | "petabyte" | "petabytes" => Ok(1024_u64.pow(5)),
        _ => Err(ToolbeltError::InvalidInput(format!(
            "unknown size unit: {unit:?}"
        ))),
    }
}

//! Release date parsing and formatting.
//!
//! Date formats are written as patterns such as `yyyy-MM-dd` or `MM/dd/yyyy`
//! and translated to chrono format strings before use.

use chrono::NaiveDate;

/// Format the catalog uses for release dates.
pub const SOURCE_DATE_FORMAT: &str = "yyyy-MM-dd";

/// Translate a date pattern into a chrono format string.
///
/// Unsupported letters are kept as literals.
pub fn to_chrono_format(pattern: &str) -> String {
    let Ok(re) = regex::Regex::new(r"y+|M+|d+|E+|%") else {
        return pattern.to_string();
    };

    re.replace_all(pattern, |caps: &regex::Captures| {
        let token = &caps[0];
        match (token.chars().next(), token.len()) {
            (Some('y'), 2) => "%y",
            (Some('y'), _) => "%Y",
            (Some('M'), 1) => "%-m",
            (Some('M'), 2) => "%m",
            (Some('M'), 3) => "%b",
            (Some('M'), _) => "%B",
            (Some('d'), 1) => "%-d",
            (Some('d'), _) => "%d",
            (Some('E'), n) if n <= 3 => "%a",
            (Some('E'), _) => "%A",
            _ => "%%",
        }
    })
    .into_owned()
}

/// Parse a date with the given pattern.
pub fn parse_date(input: &str, pattern: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(input, &to_chrono_format(pattern)).ok()
}

/// Format a date with the given pattern.
pub fn format_date(date: NaiveDate, pattern: &str) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    // chrono reports bad format strings through fmt::Error
    if write!(out, "{}", date.format(&to_chrono_format(pattern))).is_err() {
        return String::new();
    }
    out
}

/// Parse `input` with `source` and format it with `target`.
///
/// Returns an empty string when `input` does not parse.
pub fn reformat_date(input: &str, source: &str, target: &str) -> String {
    parse_date(input, source)
        .map(|date| format_date(date, target))
        .unwrap_or_default()
}

//! Lenient calendar-date parsing for CSV date columns.
//!
//! Accepts the mix of formats found in hand-maintained spreadsheets:
//! - year-first numeric (`2020-04-01`, `2020/4/1`, `20200401`)
//! - ambiguous numeric (`01/02/2020`, `01.02.20`), resolved by [`DateOrder`]
//! - named months (`20-May-87`, `May 20, 1987`, `20 May 1987`)
//!
//! Trailing times, weekday prefixes and ordinal suffixes are ignored.
//! Anything that cannot be read as a real calendar date yields `None`.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

/// Which component of an ambiguous all-numeric date is the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOrder {
    DayFirst,
    MonthFirst,
}

static WEEKDAY_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:mon|tue|wed|thu|fri|sat|sun)[a-z]*\.?,?\s+").unwrap()
});

static TIME_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?:T|\s+)\d{1,2}:\d{2}(?::\d{2}(?:\.\d+)?)?(?:\s*(?:am|pm))?(?:\s*(?:Z|UTC|GMT|[+-]\d{2}:?\d{2}))?$",
    )
    .unwrap()
});

static ORDINAL_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(\d{1,2})(?:st|nd|rd|th)\b").unwrap());

static NUMERIC_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,4})[/\-.](\d{1,2})[/\-.](\d{1,4})$").unwrap());

static COMPACT_DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{8}$").unwrap());

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Parse a date cell. Returns `None` for empty or unrecognised input.
pub fn parse_date(value: &str, order: DateOrder) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    let without_weekday = WEEKDAY_PREFIX.replace(trimmed, "");
    let without_time = TIME_SUFFIX.replace(&without_weekday, "");
    let normalized = ORDINAL_SUFFIX.replace_all(&without_time, "$1");
    let normalized = normalized.trim();

    if COMPACT_DATE.is_match(normalized) {
        return parse_numeric(&normalized[..4], &normalized[4..6], &normalized[6..], order);
    }

    if let Some(caps) = NUMERIC_DATE.captures(normalized) {
        return parse_numeric(&caps[1], &caps[2], &caps[3], order);
    }

    parse_named_month(normalized)
}

fn parse_numeric(first: &str, second: &str, third: &str, order: DateOrder) -> Option<NaiveDate> {
    if first.len() == 4 {
        let year = first.parse().ok()?;
        let month = second.parse().ok()?;
        let day = third.parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    if first.len() > 2 {
        return None;
    }

    let year = expand_year(third)?;
    let a: u32 = first.parse().ok()?;
    let b: u32 = second.parse().ok()?;

    // Fall back to the other reading when the preferred one is impossible
    let (preferred, fallback) = match order {
        DateOrder::DayFirst => ((b, a), (a, b)),
        DateOrder::MonthFirst => ((a, b), (b, a)),
    };

    NaiveDate::from_ymd_opt(year, preferred.0, preferred.1)
        .or_else(|| NaiveDate::from_ymd_opt(year, fallback.0, fallback.1))
}

fn parse_named_month(value: &str) -> Option<NaiveDate> {
    let cleaned = value.replace([',', '-', '/', '.'], " ");
    let tokens: Vec<&str> = cleaned.split_whitespace().collect();
    if tokens.len() != 3 {
        return None;
    }

    let (month, day, year) = if let Some(month) = month_from_name(tokens[1]) {
        // 20 May 1987
        (month, tokens[0], tokens[2])
    } else if let Some(month) = month_from_name(tokens[0]) {
        // May 20 1987
        (month, tokens[1], tokens[2])
    } else {
        return None;
    };

    if day.len() > 2 {
        return None;
    }
    let day = day.parse().ok()?;
    let year = expand_year(year)?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn month_from_name(token: &str) -> Option<u32> {
    let lower = token.to_ascii_lowercase();
    if lower.len() < 3 || !lower.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    if lower == "sept" {
        return Some(9);
    }
    MONTH_NAMES
        .iter()
        .position(|name| name.starts_with(lower.as_str()))
        .map(|idx| idx as u32 + 1)
}

/// Two-digit years pivot at 69: 00-68 are 20xx, 69-99 are 19xx.
fn expand_year(token: &str) -> Option<i32> {
    if !token.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let year: i32 = token.parse().ok()?;
    match token.len() {
        2 if year < 69 => Some(2000 + year),
        2 => Some(1900 + year),
        4 => Some(year),
        _ => None,
    }
}

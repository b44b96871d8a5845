//! Cell value normalizers
//!
//! Statement cells are untrusted text. Both functions here are total: a
//! malformed date is `None` and a malformed amount is zero, so callers only
//! ever decide whether to skip a row.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Date patterns, tried in order. Day-first wins over month-first for
/// ambiguous slashed dates.
pub const DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d",
    "%d/%m/%Y",
    "%m/%d/%Y",
    "%d-%m-%Y",
    "%d-%b-%y",
    "%d-%b-%Y",
];

/// Cell contents that some exporters write instead of leaving a cell empty
const AMOUNT_SENTINELS: [&str; 3] = ["S", "NAN", "NONE"];

/// Parse a date cell against [`DATE_FORMATS`]
pub fn parse_date(raw: Option<&str>) -> Option<NaiveDate> {
    let s = raw?.trim();
    if s.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .filter(|fmt| year_fields_are_four_digits(s, fmt))
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// chrono's `%Y` takes any number of digits (and a sign); statement years
/// must be written with exactly four.
fn year_fields_are_four_digits(s: &str, fmt: &str) -> bool {
    const SEPARATORS: &[char] = &['-', '/'];
    let fields: Vec<&str> = s.split(SEPARATORS).collect();
    let specs: Vec<&str> = fmt.split(SEPARATORS).collect();

    fields.len() == specs.len()
        && specs.iter().zip(&fields).all(|(spec, field)| {
            *spec != "%Y" || (field.len() == 4 && field.bytes().all(|b| b.is_ascii_digit()))
        })
}

/// Parse a money cell, keeping its sign
///
/// Currency symbols, thousands separators and any other noise are dropped
/// before parsing. Anything that still fails to parse counts as zero.
pub fn parse_amount(raw: Option<&str>) -> Decimal {
    let Some(raw) = raw else {
        return Decimal::ZERO;
    };

    let s = raw.trim().to_uppercase();
    if s.is_empty() || AMOUNT_SENTINELS.contains(&s.as_str()) {
        return Decimal::ZERO;
    }

    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    if cleaned.is_empty() {
        return Decimal::ZERO;
    }

    Decimal::from_str(&cleaned).unwrap_or(Decimal::ZERO)
}

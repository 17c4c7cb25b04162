//! Token finders for dates, amounts and references on a statement line.

use std::str::FromStr;

use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;

use super::patterns::{amount_patterns, date_patterns, reference_patterns};

/// A value found on a line together with the byte span it occupies.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenMatch<T> {
    pub value: T,
    /// Text as printed on the line.
    pub source: String,
    /// Byte range removed from the description.
    pub position: (usize, usize),
}

impl<T> TokenMatch<T> {
    pub fn new(value: T, source: impl Into<String>, position: (usize, usize)) -> Self {
        Self {
            value,
            source: source.into(),
            position,
        }
    }

    pub fn start(&self) -> usize {
        self.position.0
    }

    pub fn end(&self) -> usize {
        self.position.1
    }

    pub fn overlaps(&self, span: (usize, usize)) -> bool {
        spans_overlap(self.position, span)
    }
}

fn spans_overlap(a: (usize, usize), b: (usize, usize)) -> bool {
    a.0 < b.1 && b.0 < a.1
}

/// First date on the line, trying each date shape in priority order.
///
/// The value is the calendar date when the printed text names a real one;
/// the printed text is kept either way.
pub fn find_date(line: &str) -> Option<TokenMatch<Option<NaiveDate>>> {
    for pattern in date_patterns() {
        if let Some(caps) = pattern.captures(line) {
            let whole = caps.get(0)?;
            let day = caps.name("d").and_then(|m| m.as_str().parse::<u32>().ok());
            let month = match caps.name("mon") {
                Some(name) => month_number(name.as_str()),
                None => caps.name("m").and_then(|m| m.as_str().parse::<u32>().ok()),
            };
            let year = caps.name("y").and_then(|m| m.as_str().parse::<i32>().ok());

            let posted_on = match (day, month, year) {
                (Some(d), Some(m), Some(y)) => NaiveDate::from_ymd_opt(parse_year(y), m, d),
                _ => None,
            };

            return Some(TokenMatch::new(
                posted_on,
                whole.as_str(),
                (whole.start(), whole.end()),
            ));
        }
    }

    None
}

/// First reference number on the line outside the `exclude` spans.
///
/// A candidate must contain at least one digit and must not be the integer
/// or fractional part of a longer printed number such as `100000000.00`.
pub fn find_reference(line: &str, exclude: &[(usize, usize)]) -> Option<TokenMatch<String>> {
    for (pattern, strip_label) in reference_patterns() {
        if let Some(found) = first_reference(pattern, strip_label, line, exclude) {
            return Some(found);
        }
    }
    None
}

fn first_reference(
    pattern: &Regex,
    strip_label: bool,
    line: &str,
    exclude: &[(usize, usize)],
) -> Option<TokenMatch<String>> {
    pattern.captures_iter(line).find_map(|caps| {
        let whole = caps.get(0)?;
        let value = caps.name("r")?;

        if !value.as_str().chars().any(|c| c.is_ascii_digit()) {
            return None;
        }
        if continues_number(line, value.start(), value.end()) {
            return None;
        }

        let span = if strip_label {
            (whole.start(), whole.end())
        } else {
            (value.start(), value.end())
        };

        if exclude.iter().any(|&e| spans_overlap(span, e)) {
            return None;
        }

        Some(TokenMatch::new(value.as_str().to_string(), whole.as_str(), span))
    })
}

/// Whether the digits at `start..end` run on into a decimal or grouped number.
fn continues_number(line: &str, start: usize, end: usize) -> bool {
    let mut after = line[end..].chars();
    let mut before = line[..start].chars().rev();

    separator_then_digit(after.next(), after.next())
        || separator_then_digit(before.next(), before.next())
}

fn separator_then_digit(sep: Option<char>, digit: Option<char>) -> bool {
    matches!(sep, Some('.' | ',')) && digit.is_some_and(|c| c.is_ascii_digit())
}

/// Monetary amounts on the line in positional order.
///
/// Matches overlapping an `exclude` span or an earlier, higher-priority
/// match are dropped, so each printed amount appears once.
pub fn find_amounts(line: &str, exclude: &[(usize, usize)]) -> Vec<TokenMatch<Decimal>> {
    let mut amounts: Vec<TokenMatch<Decimal>> = Vec::new();

    for pattern in amount_patterns() {
        for caps in pattern.captures_iter(line) {
            let (Some(whole), Some(number)) = (caps.get(0), caps.name("n")) else {
                continue;
            };
            let span = (whole.start(), whole.end());

            if exclude.iter().any(|&e| spans_overlap(span, e))
                || amounts.iter().any(|a| a.overlaps(span))
            {
                continue;
            }

            if let Some(value) = parse_amount(number.as_str()) {
                amounts.push(TokenMatch::new(value, whole.as_str(), span));
            }
        }
    }

    amounts.sort_by_key(|a| a.start());
    amounts
}

/// Parse a printed amount, dropping grouping separators and currency marks.
///
/// The printed scale is kept, so `5,000.00` parses to `5000.00`. Text with
/// non-ASCII digits is rejected rather than read with those digits dropped.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    if s.chars().any(|c| c.is_numeric() && !c.is_ascii_digit()) {
        return None;
    }

    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    if cleaned.is_empty() || cleaned.starts_with('.') {
        return None;
    }

    Decimal::from_str(&cleaned).ok()
}

/// Parse a day-first statement date such as `15/04/2024`, `15-APR-24`
/// or `Apr 15, 2024`.
pub fn parse_statement_date(s: &str) -> Option<NaiveDate> {
    find_date(s.trim()).and_then(|m| m.value)
}

/// Expand two-digit years: 00-50 map to 2000s, 51-99 to 1900s.
fn parse_year(year: i32) -> i32 {
    if year >= 100 {
        year
    } else if year <= 50 {
        2000 + year
    } else {
        1900 + year
    }
}

fn month_number(name: &str) -> Option<u32> {
    let prefix: String = name.chars().take(3).collect::<String>().to_ascii_lowercase();
    let month = match prefix.as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

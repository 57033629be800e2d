//! Parsing of human-formatted price and sold-count text.
//!
//! Both functions are total: malformed input is a normal outcome and
//! maps to `Field::Unknown`, never an error.

use crate::catalog::models::Field;

/// Parses a displayed price like `Rp1.250.000` into its integer value.
///
/// Every non-digit character is stripped and the remaining digit run is
/// read as one integer in the page's displayed currency unit. No
/// decimal handling; an empty digit run is `Unknown`.
pub fn parse_price(text: &str) -> Field<u64> {
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.is_empty() {
        return Field::Unknown;
    }

    digits.parse().map(Field::Present).unwrap_or(Field::Unknown)
}

/// Parses a sold-count blurb like `2,5rb terjual` or `87 terjual`.
///
/// Case-insensitive. "rb" (ribu) abbreviates thousands: the decimal
/// number directly before it (comma as decimal separator) is scaled by
/// 1000 and truncated. Without the abbreviation the first run of digits
/// wins. No numeric token anywhere means `Unknown`.
pub fn parse_sold_count(text: &str) -> Field<u64> {
    let lowered = text.to_lowercase();

    if let Some(rb_at) = lowered.find("rb") {
        return parse_thousands(&lowered[..rb_at]);
    }

    first_digit_run(&lowered)
}

/// Reads the trailing `[0-9,]` run of the text before the "rb" token
/// as a comma-decimal number and scales it to units.
fn parse_thousands(prefix: &str) -> Field<u64> {
    let trimmed = prefix.trim_end();
    let number: String = trimmed
        .chars()
        .rev()
        .take_while(|c| c.is_ascii_digit() || *c == ',')
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();

    if !number.chars().any(|c| c.is_ascii_digit()) {
        return Field::Unknown;
    }

    match number.replace(',', ".").parse::<f64>() {
        Ok(value) => Field::Present((value * 1000.0) as u64),
        Err(_) => Field::Unknown,
    }
}

/// Extracts the first contiguous run of digits, if any.
fn first_digit_run(text: &str) -> Field<u64> {
    let run: String =
        text.chars().skip_while(|c| !c.is_ascii_digit()).take_while(char::is_ascii_digit).collect();

    if run.is_empty() {
        return Field::Unknown;
    }

    run.parse().map(Field::Present).unwrap_or(Field::Unknown)
}

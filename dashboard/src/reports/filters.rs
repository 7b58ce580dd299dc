//! Turning dropdown selections into query parameters.

use common::{Error, Result};
use rusqlite::types::Value;

/// Sentinel shown first in the country dropdown.
pub const ALL_COUNTRIES: &str = "All Countries";

/// `None`, blank, `All Countries` and `all` mean "no country filter".
pub fn country_filter(selection: Option<&str>) -> Option<String> {
    let selection = selection?.trim();
    if selection.is_empty()
        || selection.eq_ignore_ascii_case(ALL_COUNTRIES)
        || selection.eq_ignore_ascii_case("all")
    {
        None
    } else {
        Some(selection.to_string())
    }
}

pub fn country_label(country: Option<&str>) -> &str {
    country.unwrap_or(ALL_COUNTRIES)
}

/// Parses a year selection. Blank or `all` means every year.
pub fn parse_year(selection: Option<&str>) -> Result<Option<i32>> {
    let Some(selection) = selection.map(str::trim) else {
        return Ok(None);
    };
    if selection.is_empty() || selection.eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    if selection.len() != 4 || !selection.chars().all(|c| c.is_ascii_digit()) {
        return Err(Error::InvalidInput(format!(
            "Year must be a 4-digit number, got '{}'",
            selection
        )));
    }
    selection
        .parse()
        .map(Some)
        .map_err(|e| Error::InvalidInput(format!("Invalid year '{}': {}", selection, e)))
}

pub fn text_param(value: Option<&str>) -> Value {
    value.map_or(Value::Null, |v| Value::Text(v.to_string()))
}

pub fn year_param(value: Option<i32>) -> Value {
    value.map_or(Value::Null, |v| Value::Integer(i64::from(v)))
}

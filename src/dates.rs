//! Calendar date parsing and the two fixed display formats
//!
//! Form dates arrive as text. ISO (`2024-01-10`) and US (`01/10/2024`) forms
//! are accepted; anything else is a `DateFormat` error naming the field.

use chrono::NaiveDate;

use crate::error::{Error, Result};

/// Parse a required date field
pub fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate> {
    let trimmed = value.trim();

    // ISO format: 2024-01-10
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }

    // US format: 01/10/2024
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%m/%d/%Y") {
        return Ok(date);
    }

    Err(Error::DateFormat {
        field,
        value: value.to_string(),
    })
}

/// Parse an optional date field; blank input means "not given"
pub fn parse_optional_date(field: &'static str, value: &str) -> Result<Option<NaiveDate>> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    parse_date(field, value).map(Some)
}

/// en-GB short form used on the printable voucher: `10 Jan 2024`
pub fn format_short(date: NaiveDate) -> String {
    date.format("%-d %b %Y").to_string()
}

/// en-US long form used on the on-screen preview: `Wednesday, January 10, 2024`
pub fn format_long(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

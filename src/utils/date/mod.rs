// Date key helpers
// Canonical `yyyy-mm-dd` keys used as the natural identifier of a calendar day

use chrono::{Local, NaiveDate};

pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Formats a date as its canonical `yyyy-mm-dd` key.
pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

/// Parses a canonical `yyyy-mm-dd` key. Surrounding whitespace is ignored.
///
/// Unpadded forms such as `2024-3-5` are rejected: chrono accepts them, but
/// they would name the same day as a different key.
pub fn parse_date_key(key: &str) -> Option<NaiveDate> {
    let key = key.trim();
    NaiveDate::parse_from_str(key, DATE_KEY_FORMAT)
        .ok()
        .filter(|date| date_key(*date) == key)
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

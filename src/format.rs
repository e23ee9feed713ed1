use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use itertools::Itertools;
use regex::Regex;
use std::borrow::Cow;
use std::fmt::Display;
use unicode_segmentation::UnicodeSegmentation;

pub const POST_TEXT_LIMIT: usize = 180;
pub const PLACEHOLDER: &str = "–";

/// `1234567` -> `1,234,567`
pub fn count(n: u64) -> String {
    n.to_string()
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(String::from_utf8_lossy)
        .join(",")
}

pub fn percent(value: f64) -> String {
    format!("{value:.1}%")
}

/// Short month/day for a calendar day, e.g. `May 3`. Unrecognized input is returned as-is.
pub fn day_label(date: &str) -> String {
    if let Ok(day) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return day.format("%b %-d").to_string();
    }
    match parse_timestamp(date) {
        Some(ts) => ts.date_naive().format("%b %-d").to_string(),
        None => date.to_string(),
    }
}

pub fn post_timestamp(created_at: &str) -> String {
    post_timestamp_in(created_at, &Local)
}

pub fn post_timestamp_in<Tz: TimeZone>(created_at: &str, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    match parse_timestamp(created_at) {
        Some(ts) => ts.with_timezone(tz).format("%b %-d, %H:%M").to_string(),
        None => created_at.to_string(),
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    // NB: some backends emit naive timestamps; those are UTC
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Post body as shown in the top posts list: cut to [POST_TEXT_LIMIT] characters plus an ellipsis.
pub fn post_text(text: Option<&str>) -> Cow<'_, str> {
    let text = match text {
        Some(text) if !text.is_empty() => text,
        _ => return Cow::Borrowed("(no text)"),
    };

    match text.grapheme_indices(true).nth(POST_TEXT_LIMIT) {
        Some((cut, _)) => Cow::Owned(format!("{}…", &text[..cut])),
        None => Cow::Borrowed(text),
    }
}

pub fn collapse_newlines(text: &str) -> Cow<'_, str> {
    let re_newlines = Regex::new(r"[\r\n]+").unwrap();
    re_newlines.replace_all(text, "⏎ ")
}

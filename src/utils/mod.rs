//! Date parsing and display shared by the catalog entities and views.

use time::{format_description::BorrowedFormatItem, macros::format_description, Date};

const MEDIUM_DATE: &[BorrowedFormatItem<'_>] =
    format_description!("[month repr:short] [day padding:none], [year]");
const ISO_DATE: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");
const DAY_FIRST_DATE: &[BorrowedFormatItem<'_>] = format_description!("[day]/[month]/[year]");

/// Formats a date for display, e.g. `Oct 16, 2026`. Absent dates render empty.
pub fn short_date(date: Option<Date>) -> String {
    date.and_then(|d| d.format(MEDIUM_DATE).ok())
        .unwrap_or_default()
}

/// Formats a date the way `<input type="date">` expects it.
pub fn iso_date(date: Option<Date>) -> String {
    date.and_then(|d| d.format(ISO_DATE).ok())
        .unwrap_or_default()
}

/// Parses `YYYY-MM-DD`, falling back to `DD/MM/YYYY`.
pub fn parse_date(input: &str) -> Option<Date> {
    [ISO_DATE, DAY_FIRST_DATE]
        .into_iter()
        .find_map(|format| Date::parse(input, format).ok())
}

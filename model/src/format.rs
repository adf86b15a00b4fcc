//! Display formatting for trip dates and counters.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

use time::Date;
use time::macros::format_description;

use crate::validate::parse_date;

fn month_day(date: Date) -> String {
    date.format(format_description!("[month repr:short] [day padding:none]"))
        .unwrap_or_default()
}

/// `Jun 1 - Jun 7, 2025`, or `Dec 28, 2024 - Jan 3, 2025` across years.
///
/// Unparseable input is echoed back as `start - end`.
#[must_use]
pub fn format_date_range(start: &str, end: &str) -> String {
    let (Some(s), Some(e)) = (parse_date(start), parse_date(end)) else {
        return format!("{start} - {end}");
    };
    if s.year() == e.year() {
        format!("{} - {}, {}", month_day(s), month_day(e), e.year())
    } else {
        format!("{}, {} - {}, {}", month_day(s), s.year(), month_day(e), e.year())
    }
}

/// `Jun 1, 2025`. Unparseable input is echoed back.
#[must_use]
pub fn format_day(raw: &str) -> String {
    parse_date(raw).map_or_else(|| raw.to_owned(), |d| format!("{}, {}", month_day(d), d.year()))
}

/// `"1 item"`, `"3 items"`.
#[must_use]
pub fn pluralize(count: u64, singular: &str, plural: &str) -> String {
    if count == 1 { format!("{count} {singular}") } else { format!("{count} {plural}") }
}

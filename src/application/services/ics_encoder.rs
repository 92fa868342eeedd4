//! iCalendar (RFC 5545) rendering of resolved holidays.
//!
//! Output is deterministic for identical input except for the `DTSTAMP`
//! line of each event, which carries the render time.

use crate::domain::entities::{CalendarRequest, HolidayRecord};
use chrono::{DateTime, NaiveDate, Utc};

pub const PRODUCT_NAME: &str = "Holiday Calendar API";
pub const UID_DOMAIN: &str = "holiday-calendar-api";
pub const ORIGINAL_URL: &str = "https://holidays.example.com";
const SECONDARY_CATEGORY: &str = "HOLIDAY";
const CRLF: &str = "\r\n";

/// Render a calendar stamped with the current wall-clock time
pub fn render(records: &[HolidayRecord], request: &CalendarRequest) -> Vec<u8> {
    render_at(records, request, Utc::now())
}

/// Render a calendar with an explicit `DTSTAMP`.
///
/// Events are written in input order.
pub fn render_at(
    records: &[HolidayRecord],
    request: &CalendarRequest,
    stamp: DateTime<Utc>,
) -> Vec<u8> {
    let mut out = IcsWriter::default();
    let label = request.label();
    let year = request.year.value();

    out.line("BEGIN", "VCALENDAR");
    out.line("VERSION", "2.0");
    out.line(
        "PRODID",
        &format!("-//{}//Public Holidays {}//EN", PRODUCT_NAME, year),
    );
    out.line("CALSCALE", "GREGORIAN");
    out.line("METHOD", "PUBLISH");
    out.line("X-WR-CALNAME", &escape_text(&request.calendar_name()));
    out.line(
        "X-WR-CALDESC",
        &escape_text(&format!("Public holidays for {} in {}", label, year)),
    );
    out.line("X-WR-TIMEZONE", "UTC");
    out.line("X-PUBLISHED-TTL", "P1D");
    out.line("X-ORIGINAL-URL", ORIGINAL_URL);

    let dtstamp = format_timestamp(stamp);
    for record in records {
        write_event(&mut out, record, request, &dtstamp);
    }

    out.line("END", "VCALENDAR");
    out.into_bytes()
}

fn write_event(
    out: &mut IcsWriter,
    record: &HolidayRecord,
    request: &CalendarRequest,
    dtstamp: &str,
) {
    out.line("BEGIN", "VEVENT");
    out.line(
        "UID",
        &event_uid(record, request.country.as_str(), request.year.value()),
    );
    out.line("DTSTAMP", dtstamp);
    out.line("DTSTART;VALUE=DATE", &format_date(record.date));
    out.line("SUMMARY", &escape_text(&record.name));
    out.line("STATUS", "CONFIRMED");
    out.line("TRANSP", "TRANSPARENT");
    out.line("CLASS", "PUBLIC");
    out.line("PRIORITY", "5");
    if let Some(description) = &record.description {
        out.line("DESCRIPTION", &escape_text(description));
    }
    out.line(
        "CATEGORIES",
        &format!("{},{}", record.kind.to_uppercase(), SECONDARY_CATEGORY),
    );
    if let Some(observed) = record.observed_shift() {
        out.line("X-OBSERVED-DATE;VALUE=DATE", &format_date(observed));
    }
    out.line("END", "VEVENT");
}

/// Stable event identifier built from date, name slug, country and year
pub fn event_uid(record: &HolidayRecord, country: &str, year: i32) -> String {
    format!(
        "{}-{}-{}-{}@{}",
        format_date(record.date),
        slugify(&record.name),
        country,
        year,
        UID_DOMAIN
    )
}

/// Escape a TEXT value.
///
/// Backslash goes first so the escapes added afterwards are not doubled.
pub fn escape_text(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace(';', "\\;")
        .replace(',', "\\,")
        .replace('\n', "\\n")
        .replace('\r', "")
}

/// Lowercased alphanumerics of the name, or its UTF-8 bytes in hex when it has none
fn slugify(name: &str) -> String {
    let slug: String = name
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect();
    if !slug.is_empty() {
        return slug;
    }
    name.bytes().map(|b| format!("{:02x}", b)).collect()
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

fn format_timestamp(stamp: DateTime<Utc>) -> String {
    stamp.format("%Y%m%dT%H%M%SZ").to_string()
}

#[derive(Default)]
struct IcsWriter {
    buf: String,
}

impl IcsWriter {
    fn line(&mut self, name: &str, value: &str) {
        self.buf.push_str(name);
        self.buf.push(':');
        self.buf.push_str(value);
        self.buf.push_str(CRLF);
    }

    fn into_bytes(self) -> Vec<u8> {
        self.buf.into_bytes()
    }
}

//! Built-in holiday data used when no external source answers.
//!
//! Keyed by `"{COUNTRY}-{YEAR}"`. Region is not part of the key.

use crate::domain::entities::{CountryCode, HolidayRecord, Year};
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::LazyLock;

/// (date, name, description, type, observed)
type Row = (
    &'static str,
    &'static str,
    Option<&'static str>,
    &'static str,
    Option<&'static str>,
);

const US_2024: &[Row] = &[
    ("2024-01-01", "New Year's Day", None, "public", None),
    ("2024-01-15", "Martin Luther King, Jr. Day", None, "public", None),
    ("2024-02-19", "Washington's Birthday", Some("Presidents' Day"), "public", None),
    ("2024-05-27", "Memorial Day", None, "public", None),
    ("2024-06-19", "Juneteenth National Independence Day", None, "public", None),
    ("2024-07-04", "Independence Day", None, "public", None),
    ("2024-09-02", "Labor Day", None, "public", None),
    ("2024-10-14", "Columbus Day", None, "public", None),
    ("2024-11-11", "Veterans Day", None, "public", None),
    ("2024-11-28", "Thanksgiving Day", None, "public", None),
    ("2024-12-25", "Christmas Day", None, "public", None),
];

const US_2025: &[Row] = &[
    ("2025-01-01", "New Year's Day", None, "public", None),
    ("2025-01-20", "Martin Luther King, Jr. Day", None, "public", None),
    ("2025-02-17", "Washington's Birthday", Some("Presidents' Day"), "public", None),
    ("2025-05-26", "Memorial Day", None, "public", None),
    ("2025-07-04", "Independence Day", None, "public", None),
    ("2025-09-01", "Labor Day", None, "public", None),
    ("2025-10-13", "Columbus Day", None, "public", None),
    ("2025-11-11", "Veterans Day", None, "public", None),
    ("2025-11-27", "Thanksgiving Day", None, "public", None),
    ("2025-12-25", "Christmas Day", None, "public", None),
];

const US_2026: &[Row] = &[
    ("2026-01-01", "New Year's Day", None, "public", None),
    ("2026-01-19", "Martin Luther King, Jr. Day", None, "public", None),
    ("2026-02-16", "Washington's Birthday", Some("Presidents' Day"), "public", None),
    ("2026-05-25", "Memorial Day", None, "public", None),
    ("2026-06-19", "Juneteenth National Independence Day", None, "public", None),
    ("2026-07-04", "Independence Day", None, "public", Some("2026-07-03")),
    ("2026-09-07", "Labor Day", None, "public", None),
    ("2026-10-12", "Columbus Day", None, "public", None),
    ("2026-11-11", "Veterans Day", None, "public", None),
    ("2026-11-26", "Thanksgiving Day", None, "public", None),
    ("2026-12-25", "Christmas Day", None, "public", None),
];

const GB_2025: &[Row] = &[
    ("2025-01-01", "New Year's Day", None, "bank", None),
    ("2025-04-18", "Good Friday", None, "bank", None),
    ("2025-04-21", "Easter Monday", None, "bank", None),
    ("2025-05-05", "Early May Bank Holiday", None, "bank", None),
    ("2025-05-26", "Spring Bank Holiday", None, "bank", None),
    ("2025-08-25", "Summer Bank Holiday", None, "bank", None),
    ("2025-12-25", "Christmas Day", None, "bank", None),
    ("2025-12-26", "Boxing Day", None, "bank", None),
];

const DE_2025: &[Row] = &[
    ("2025-01-01", "New Year's Day", Some("Neujahr"), "public", None),
    ("2025-04-18", "Good Friday", Some("Karfreitag"), "public", None),
    ("2025-04-21", "Easter Monday", Some("Ostermontag"), "public", None),
    ("2025-05-01", "Labour Day", Some("Tag der Arbeit"), "public", None),
    ("2025-05-29", "Ascension Day", Some("Christi Himmelfahrt"), "public", None),
    ("2025-06-09", "Whit Monday", Some("Pfingstmontag"), "public", None),
    ("2025-10-03", "German Unity Day", Some("Tag der Deutschen Einheit"), "public", None),
    ("2025-12-25", "Christmas Day", Some("Erster Weihnachtstag"), "public", None),
    ("2025-12-26", "St. Stephen's Day", Some("Zweiter Weihnachtstag"), "public", None),
];

const FR_2025: &[Row] = &[
    ("2025-01-01", "New Year's Day", Some("Jour de l'an"), "public", None),
    ("2025-04-21", "Easter Monday", Some("Lundi de Pâques"), "public", None),
    ("2025-05-01", "Labour Day", Some("Fête du Travail"), "public", None),
    ("2025-05-08", "Victory in Europe Day", Some("Victoire 1945"), "public", None),
    ("2025-05-29", "Ascension Day", Some("Ascension"), "public", None),
    ("2025-06-09", "Whit Monday", Some("Lundi de Pentecôte"), "public", None),
    ("2025-07-14", "Bastille Day", Some("Fête nationale"), "public", None),
    ("2025-08-15", "Assumption Day", Some("Assomption"), "public", None),
    ("2025-11-01", "All Saints' Day", Some("Toussaint"), "public", None),
    ("2025-11-11", "Armistice Day", Some("Armistice 1918"), "public", None),
    ("2025-12-25", "Christmas Day", Some("Noël"), "public", None),
];

const CA_2025: &[Row] = &[
    ("2025-01-01", "New Year's Day", None, "public", None),
    ("2025-04-18", "Good Friday", None, "public", None),
    ("2025-05-19", "Victoria Day", None, "public", None),
    ("2025-07-01", "Canada Day", None, "public", None),
    ("2025-09-01", "Labour Day", None, "public", None),
    ("2025-09-30", "National Day for Truth and Reconciliation", None, "public", None),
    ("2025-10-13", "Thanksgiving", None, "public", None),
    ("2025-11-11", "Remembrance Day", None, "public", None),
    ("2025-12-25", "Christmas Day", None, "public", None),
    ("2025-12-26", "Boxing Day", None, "public", None),
];

static FALLBACK_HOLIDAYS: LazyLock<HashMap<&'static str, Vec<HolidayRecord>>> =
    LazyLock::new(|| {
        [
            ("US-2024", US_2024),
            ("US-2025", US_2025),
            ("US-2026", US_2026),
            ("GB-2025", GB_2025),
            ("DE-2025", DE_2025),
            ("FR-2025", FR_2025),
            ("CA-2025", CA_2025),
        ]
        .into_iter()
        .map(|(key, rows)| (key, rows.iter().filter_map(to_record).collect()))
        .collect()
    });

fn to_record(row: &Row) -> Option<HolidayRecord> {
    let (date, name, description, kind, observed) = *row;
    let mut record = HolidayRecord::new(parse_date(date)?, name, kind);
    record.description = description.map(str::to_string);
    record.observed = observed.and_then(parse_date);
    Some(record)
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Static holidays for a country and year, if the table covers the pair
pub fn lookup(country: &CountryCode, year: Year) -> Option<&'static [HolidayRecord]> {
    let key = format!("{}-{}", country, year);
    FALLBACK_HOLIDAYS.get(key.as_str()).map(Vec::as_slice)
}

/// All `"{COUNTRY}-{YEAR}"` keys covered by the table, sorted
pub fn covered_keys() -> Vec<&'static str> {
    let mut keys: Vec<&'static str> = FALLBACK_HOLIDAYS.keys().copied().collect();
    keys.sort_unstable();
    keys
}

//! Permissive, locale-independent date/time parsing.
//!
//! Numeric dates are month-first (`04/05/2018` is 5 April 2018). A numeric
//! date is read year-first only when it opens with a four-digit year, so
//! `04/05/18` is 5 April 2018 and never 18 May of year 4. Offsets in RFC 3339
//! input are dropped keeping the wall-clock time. A bare time of day is
//! placed on the current UTC date. Two-digit years follow chrono's `%y`
//! pivot (small values land in the 2000s).

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Canonical rendering of a parsed value, `dd-MM-yyyy HH:mm:ss`.
pub const CANONICAL_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

/// Numeric dates opening with a four-digit year.
const YEAR_FIRST_DATES: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Month-first numeric dates. `%y` goes first: `%Y` takes any digit count.
const MONTH_FIRST_DATES: &[&str] = &["%m/%d/%y", "%m/%d/%Y", "%m-%d-%Y"];

const TEXTUAL_DATES: &[&str] = &["%B %d, %Y", "%B %d %Y", "%d %B %Y"];

/// Times of day, alone or after a date.
const CLOCKS: &[&str] = &["%H:%M:%S%.f", "%H:%M", "%I:%M:%S %p", "%I:%M %p"];

fn leading_digits(raw: &str) -> usize {
    raw.bytes().take_while(u8::is_ascii_digit).count()
}

fn numeric_dates(raw: &str) -> &'static [&'static str] {
    if leading_digits(raw) == 4 {
        YEAR_FIRST_DATES
    } else {
        MONTH_FIRST_DATES
    }
}

fn separators(date_format: &str) -> &'static [&'static str] {
    if date_format == "%Y-%m-%d" { &[" ", "T"] } else { &[" "] }
}

fn parse_with_clock(raw: &str, dates: &[&str]) -> Option<NaiveDateTime> {
    dates.iter().find_map(|date| {
        separators(date).iter().find_map(|sep| {
            CLOCKS.iter().find_map(|clock| {
                NaiveDateTime::parse_from_str(raw, &format!("{date}{sep}{clock}")).ok()
            })
        })
    })
}

fn parse_date(raw: &str, dates: &[&str]) -> Option<NaiveDateTime> {
    dates
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .map(|date| date.and_time(NaiveTime::MIN))
}

/// Parse `raw` as a date, a date and time, or a time of day.
#[must_use]
pub fn parse_date_time(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }

    let numeric = numeric_dates(raw);
    parse_with_clock(raw, numeric)
        .or_else(|| parse_with_clock(raw, TEXTUAL_DATES))
        .or_else(|| parse_date(raw, numeric))
        .or_else(|| parse_date(raw, TEXTUAL_DATES))
        .or_else(|| {
            CLOCKS
                .iter()
                .find_map(|format| NaiveTime::parse_from_str(raw, format).ok())
                .map(|time| Utc::now().date_naive().and_time(time))
        })
}

/// Render a parsed value in the canonical format.
#[must_use]
pub fn to_canonical(value: &NaiveDateTime) -> String {
    value.format(CANONICAL_FORMAT).to_string()
}

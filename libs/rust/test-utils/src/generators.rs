//! Shared proptest generators.
//!
//! Date generators pair every rendered input with the canonical
//! `dd-MM-yyyy HH:mm:ss` text the provider is expected to answer with.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use proptest::prelude::*;

/// Canonical output format of the validation endpoint.
pub const CANONICAL_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

/// A parseable date input and its expected canonical rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateInput {
    /// Text sent as `validDateTime`
    pub raw: String,
    /// Expected `validDateTime` in the response
    pub expected: String,
}

/// Generate calendar date-times that exist in every month.
pub fn naive_date_time_strategy() -> impl Strategy<Value = NaiveDateTime> {
    (1970i32..2100, 1u32..=12, 1u32..=28, 0u32..24, 0u32..60, 0u32..60).prop_filter_map(
        "valid calendar date",
        |(year, month, day, hour, minute, second)| {
            NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, second)
        },
    )
}

/// Date-only shapes; the time of day is midnight.
const DATE_ONLY_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%m/%d/%y",
    "%B %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d %B %Y",
];

/// Clocks that may follow a date. Formats without `%S` drop the seconds.
const CLOCK_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M", "%I:%M:%S %p", "%I:%M %p"];

/// Every supported date followed by every supported clock, plus the ISO
/// `T` separator.
fn date_time_formats() -> Vec<String> {
    let mut formats: Vec<String> = DATE_ONLY_FORMATS
        .iter()
        .flat_map(|date| CLOCK_FORMATS.iter().map(move |clock| format!("{date} {clock}")))
        .collect();
    formats.extend(CLOCK_FORMATS.iter().map(|clock| format!("%Y-%m-%dT{clock}")));
    formats
}

/// Fit `dt` to what `format` can express: two-digit years stay in
/// 2000-2068 and clocks without seconds land on `:00`.
fn representable(dt: NaiveDateTime, format: &str) -> NaiveDateTime {
    let dt = if format.contains("%y") {
        dt.with_year(2000 + (dt.year() - 1970).rem_euclid(69)).unwrap_or(dt)
    } else {
        dt
    };
    if format.contains("%S") {
        dt
    } else {
        dt.with_second(0).unwrap_or(dt)
    }
}

fn rendered(dt: NaiveDateTime, format: &str) -> DateInput {
    let dt = representable(dt, format);
    DateInput {
        raw: dt.format(format).to_string(),
        expected: dt.format(CANONICAL_FORMAT).to_string(),
    }
}

/// Generate parseable inputs in every supported month-first shape.
pub fn date_input_strategy() -> impl Strategy<Value = DateInput> {
    let date_only = (naive_date_time_strategy(), prop::sample::select(DATE_ONLY_FORMATS)).prop_map(
        |(dt, format)| rendered(dt.date().and_time(NaiveTime::MIN), format),
    );
    let with_time = (naive_date_time_strategy(), prop::sample::select(date_time_formats()))
        .prop_map(|(dt, format)| rendered(dt, &format));
    prop_oneof![date_only, with_time]
}

/// Generate non-empty text that no supported shape accepts.
pub fn unparsable_input_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("lolz".to_string()),
        Just("not a date".to_string()),
        Just("13/45/2018".to_string()),
        Just("2018-02-30".to_string()),
        "[a-z]{1,12}",
    ]
}

/// Generate a recognized provider state name.
pub fn known_state_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("There is data"), Just("There is no data")]
}

/// Generate state names the provider does not know.
pub fn unknown_state_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z ]{1,30}".prop_filter("must not be blank or a known state", |s| {
        let name = s.trim();
        !name.is_empty() && name != "There is data" && name != "There is no data"
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::strategy::ValueTree;
    use proptest::test_runner::TestRunner;

    #[test]
    fn test_date_input_expected_is_canonical() {
        let mut runner = TestRunner::default();
        for _ in 0..50 {
            let input = date_input_strategy()
                .new_tree(&mut runner)
                .unwrap()
                .current();
            assert!(NaiveDateTime::parse_from_str(&input.expected, CANONICAL_FORMAT).is_ok());
            assert!(!input.raw.is_empty());
        }
    }

    #[test]
    fn test_two_digit_year_shapes_stay_in_pivot_range() {
        let dt = NaiveDate::from_ymd_opt(2099, 4, 5)
            .unwrap()
            .and_hms_opt(13, 14, 15)
            .unwrap();
        let input = rendered(dt, "%m/%d/%y %H:%M");
        assert_eq!(input.raw, "04/05/60 13:14");
        assert_eq!(input.expected, "05-04-2060 13:14:00");
    }

    #[test]
    fn test_every_date_shape_has_a_clock_variant() {
        let formats = date_time_formats();
        assert_eq!(
            formats.len(),
            (DATE_ONLY_FORMATS.len() + 1) * CLOCK_FORMATS.len()
        );
        assert!(formats.iter().any(|f| f == "%m/%d/%y %I:%M %p"));
        assert!(formats.iter().any(|f| f == "%Y-%m-%dT%H:%M"));
    }

    #[test]
    fn test_unknown_states_exclude_known() {
        let mut runner = TestRunner::default();
        for _ in 0..50 {
            let state = unknown_state_strategy()
                .new_tree(&mut runner)
                .unwrap()
                .current();
            assert!(!state.trim().is_empty());
            assert_ne!(state.trim(), "There is data");
            assert_ne!(state.trim(), "There is no data");
        }
    }
}

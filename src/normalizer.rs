use std::borrow::Cow;
use std::sync::LazyLock;

use chrono::{Datelike, NaiveDateTime, TimeDelta};

use crate::clock::{Clock, SystemClock};
use crate::consts::{AGE_UNKNOWN, DEFAULT_DATE_PATTERNS, YEAR_DIGITS};
use crate::layout::{DateLayout, LayoutError};
use crate::types::Year;

/// The default candidate list, compiled once and never mutated.
static DEFAULT_LAYOUTS: LazyLock<Vec<DateLayout>> = LazyLock::new(|| {
    DEFAULT_DATE_PATTERNS
        .iter()
        .filter_map(|pattern| match DateLayout::new(pattern) {
            Ok(layout) => Some(layout),
            Err(error) => {
                tracing::error!(pattern, %error, "default date layout failed to compile");
                debug_assert!(false, "default date layout {pattern:?} failed to compile: {error}");
                None
            }
        })
        .collect()
});

/// The default layout candidates, in matching order.
pub fn default_layouts() -> &'static [DateLayout] {
    &DEFAULT_LAYOUTS
}

/// Parses date strings against an ordered list of layouts and derives
/// durations and ages from the results.
///
/// The first layout that matches an input wins, so ambiguous inputs such as
/// `01/02/2024 10:30` resolve according to list order.
#[derive(Debug, Clone)]
pub struct DateNormalizer<C = SystemClock> {
    layouts: Cow<'static, [DateLayout]>,
    clock: C,
}

impl DateNormalizer {
    /// A normalizer using the default layouts and the system clock.
    pub fn new() -> Self {
        Self {
            layouts: Cow::Borrowed(default_layouts()),
            clock: SystemClock,
        }
    }

    /// A normalizer using custom layout patterns, tried in the given order.
    ///
    /// # Errors
    /// Returns the `LayoutError` of the first pattern that fails to compile.
    pub fn from_patterns<I, S>(patterns: I) -> Result<Self, LayoutError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let layouts = patterns
            .into_iter()
            .map(|p| DateLayout::new(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new().with_layouts(layouts))
    }
}

impl Default for DateNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> DateNormalizer<C> {
    /// Replaces the candidate list.
    #[must_use]
    pub fn with_layouts<I>(self, layouts: I) -> Self
    where
        I: IntoIterator<Item = DateLayout>,
    {
        Self {
            layouts: Cow::Owned(layouts.into_iter().collect()),
            clock: self.clock,
        }
    }

    /// Replaces the source of "now".
    pub fn with_clock<D: Clock>(self, clock: D) -> DateNormalizer<D> {
        DateNormalizer {
            layouts: self.layouts,
            clock,
        }
    }

    pub fn layouts(&self) -> &[DateLayout] {
        &self.layouts
    }

    /// Returns the first layout matching `input` together with the parsed value.
    pub fn matching_layout(&self, input: &str) -> Option<(&DateLayout, NaiveDateTime)> {
        if input.trim().is_empty() {
            return None;
        }

        for layout in &*self.layouts {
            match layout.parse(input) {
                Ok(parsed) => {
                    tracing::debug!(layout = %layout, "date layout matched");
                    return Some((layout, parsed));
                }
                Err(error) => {
                    tracing::trace!(layout = %layout, %error, "date layout rejected input");
                }
            }
        }

        tracing::debug!(input, "no date layout matched");
        None
    }

    /// Parses `input` with the first matching layout.
    ///
    /// Empty or whitespace-only input returns `None` without trying any layout.
    pub fn validate_date_string(&self, input: &str) -> Option<NaiveDateTime> {
        self.matching_layout(input).map(|(_, parsed)| parsed)
    }

    /// True if `input` is exactly a four digit year in `1..=9999`.
    pub fn validate_year_string(&self, input: &str) -> bool {
        validate_year_string(input)
    }

    /// Time elapsed from `from` until now.
    pub fn diff_dates(&self, from: &str) -> Option<TimeDelta> {
        let from = self.validate_date_string(from)?;
        Some(self.clock.now() - from)
    }

    /// Time elapsed from `from` until `to`. `None` unless both parse.
    pub fn diff_dates_between(&self, from: &str, to: &str) -> Option<TimeDelta> {
        let from = self.validate_date_string(from);
        let to = self.validate_date_string(to);
        Some(to? - from?)
    }

    /// Whole years between `given` and now. The count drops by one while
    /// this year's anniversary of `given` has not been reached.
    pub fn age_from_date(&self, given: NaiveDateTime) -> i32 {
        let now = self.clock.now();
        let mut age = now.year() - given.year();
        if (now.month(), now.day()) < (given.month(), given.day()) {
            age -= 1;
        }
        age
    }

    /// Like `age_from_date`, returning `AGE_UNKNOWN` (-1) when no date is given.
    pub fn age_from_optional_date(&self, given: Option<NaiveDateTime>) -> i32 {
        given.map_or(AGE_UNKNOWN, |date| self.age_from_date(date))
    }
}

/// Parses `input` against the default layouts.
pub fn validate_date_string(input: &str) -> Option<NaiveDateTime> {
    DateNormalizer::new().validate_date_string(input)
}

/// True if `input` is exactly a four digit year in `1..=9999`.
pub fn validate_year_string(input: &str) -> bool {
    if input.len() != YEAR_DIGITS || !input.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    input.parse::<u16>().is_ok_and(|year| Year::new(year).is_ok())
}

/// Time elapsed from `from` until the system clock's now.
pub fn diff_dates(from: &str) -> Option<TimeDelta> {
    DateNormalizer::new().diff_dates(from)
}

/// Time elapsed from `from` until `to`, using the default layouts.
pub fn diff_dates_between(from: &str, to: &str) -> Option<TimeDelta> {
    DateNormalizer::new().diff_dates_between(from, to)
}

/// Whole years between `given` and the system clock's now.
pub fn age_from_date(given: NaiveDateTime) -> i32 {
    DateNormalizer::new().age_from_date(given)
}

/// Whole years between `given` and now, or `AGE_UNKNOWN` (-1) for `None`.
pub fn age_from_optional_date(given: Option<NaiveDateTime>) -> i32 {
    DateNormalizer::new().age_from_optional_date(given)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(h, min, s))
            .unwrap()
    }

    fn fixed(now: NaiveDateTime) -> DateNormalizer<FixedClock> {
        DateNormalizer::new().with_clock(FixedClock(now))
    }

    #[test]
    fn test_default_layouts_all_compile() {
        assert_eq!(default_layouts().len(), DEFAULT_DATE_PATTERNS.len());
        for (layout, pattern) in default_layouts().iter().zip(DEFAULT_DATE_PATTERNS) {
            assert_eq!(layout.pattern(), pattern);
        }
    }

    #[test]
    fn test_empty_and_whitespace_short_circuit() {
        let n = DateNormalizer::new();
        assert_eq!(n.validate_date_string(""), None);
        assert_eq!(n.validate_date_string("   "), None);
        assert_eq!(n.validate_date_string("\t\n"), None);
    }

    #[test]
    fn test_each_default_layout_family() {
        let n = DateNormalizer::new();
        let cases = [
            ("8/15/1991 3:04:05 PM", at(1991, 8, 15, 15, 4, 5)),
            ("8/15/1991 3:04 AM", at(1991, 8, 15, 3, 4, 0)),
            ("08/15/1991 03:04:05", at(1991, 8, 15, 3, 4, 5)),
            ("8/15/1991 3:04:05", at(1991, 8, 15, 3, 4, 5)),
            ("8/15/1991 11 PM", at(1991, 8, 15, 23, 0, 0)),
            ("8/15/1991 3:04", at(1991, 8, 15, 3, 4, 0)),
            ("15/08/1991", at(1991, 8, 15, 0, 0, 0)),
            ("15/8/1991", at(1991, 8, 15, 0, 0, 0)),
        ];
        for (input, expected) in cases {
            assert_eq!(n.validate_date_string(input), Some(expected), "{input}");
        }
    }

    #[test]
    fn test_first_matching_layout_wins() {
        let n = DateNormalizer::new();
        // Month-first layouts precede the day-first ones.
        let (layout, parsed) = n.matching_layout("01/02/2024 10:30").unwrap();
        assert_eq!(layout.pattern(), "M/d/yyyy h:mm");
        assert_eq!(parsed, at(2024, 1, 2, 10, 30, 0));

        // Date-only input reaches the day-first layouts.
        let (layout, parsed) = n.matching_layout("01/02/2024").unwrap();
        assert_eq!(layout.pattern(), "dd/MM/yyyy");
        assert_eq!(parsed, at(2024, 2, 1, 0, 0, 0));
    }

    #[test]
    fn test_custom_layout_order_is_honored() {
        let day_first = DateNormalizer::from_patterns(["d/M/yyyy", "M/d/yyyy"]).unwrap();
        let month_first = DateNormalizer::from_patterns(["M/d/yyyy", "d/M/yyyy"]).unwrap();
        assert_eq!(
            day_first.validate_date_string("3/4/2024"),
            Some(at(2024, 4, 3, 0, 0, 0))
        );
        assert_eq!(
            month_first.validate_date_string("3/4/2024"),
            Some(at(2024, 3, 4, 0, 0, 0))
        );
    }

    #[test]
    fn test_from_patterns_reports_bad_pattern() {
        let result = DateNormalizer::from_patterns(["d/M/yyyy", "d/M/yy"]);
        assert!(matches!(result, Err(LayoutError::UnsupportedWidth { .. })));
    }

    #[test]
    fn test_unmatched_input() {
        let n = DateNormalizer::new();
        assert_eq!(n.validate_date_string("2024-01-15"), None);
        assert_eq!(n.validate_date_string(" 15/08/1991"), None);
        assert_eq!(n.validate_date_string("31/02/2024"), None);
        assert_eq!(n.validate_date_string("not a date"), None);
    }

    #[test]
    fn test_validate_year_string() {
        assert!(validate_year_string("2024"));
        assert!(validate_year_string("0001"));
        assert!(!validate_year_string("0000"));
        assert!(!validate_year_string("99"));
        assert!(!validate_year_string(""));
        assert!(!validate_year_string("20245"));
        assert!(!validate_year_string("+024"));
        assert!(!validate_year_string(" 2024"));
        assert!(DateNormalizer::new().validate_year_string("1991"));
    }

    #[test]
    fn test_diff_dates_against_clock() {
        let n = fixed(at(2024, 1, 2, 12, 0, 0));
        assert_eq!(n.diff_dates("1/1/2024 9:00"), Some(TimeDelta::days(1) + TimeDelta::hours(3)));
        assert_eq!(
            n.diff_dates("1/1/2024 12:00"),
            Some(TimeDelta::days(1) + TimeDelta::hours(12))
        );
        assert_eq!(n.diff_dates("1/3/2024 12:00"), Some(TimeDelta::hours(-12)));
        assert_eq!(n.diff_dates("garbage"), None);
        assert_eq!(n.diff_dates(""), None);
    }

    #[test]
    fn test_twelve_o_clock_without_designator_is_midnight() {
        assert_eq!(validate_date_string("1/1/2020 12:30"), Some(at(2020, 1, 1, 0, 30, 0)));
        assert_eq!(
            validate_date_string("01/01/2020 12:30:15"),
            Some(at(2020, 1, 1, 0, 30, 15))
        );
        assert_eq!(
            diff_dates_between("1/1/2020 12:30", "1/1/2020 1:30"),
            Some(TimeDelta::hours(1))
        );
        assert_eq!(validate_date_string("1/1/2020 13:30"), None);
    }

    #[test]
    fn test_diff_dates_between() {
        let n = DateNormalizer::new();
        assert_eq!(
            n.diff_dates_between("1/1/2024 9:00", "1/1/2024 10:30"),
            Some(TimeDelta::minutes(90))
        );
        assert_eq!(
            n.diff_dates_between("1/1/2024 9:00:00 AM", "1/1/2024 9:00:00 AM"),
            Some(TimeDelta::zero())
        );
        assert_eq!(n.diff_dates_between("1/1/2024 9:00", "later"), None);
        assert_eq!(n.diff_dates_between("", "1/1/2024 9:00"), None);
    }

    #[test]
    fn test_age_from_date() {
        let n = fixed(at(2024, 6, 15, 8, 0, 0));
        assert_eq!(n.age_from_date(at(2023, 6, 15, 0, 0, 0)), 1);
        assert_eq!(n.age_from_date(at(2023, 6, 16, 0, 0, 0)), 0);
        assert_eq!(n.age_from_date(at(1991, 8, 15, 0, 0, 0)), 32);
        assert_eq!(n.age_from_date(at(1991, 5, 1, 0, 0, 0)), 33);
    }

    #[test]
    fn test_age_from_optional_date() {
        let n = fixed(at(2024, 6, 15, 8, 0, 0));
        assert_eq!(n.age_from_optional_date(None), AGE_UNKNOWN);
        assert_eq!(n.age_from_optional_date(Some(at(2000, 1, 1, 0, 0, 0))), 24);
    }
}

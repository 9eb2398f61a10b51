/// Maximum valid year (inclusive)
pub const MAX_YEAR: u16 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// Largest value of a 12-hour clock field (`h`, `hh`)
pub const MAX_HOUR_12: u8 = 12;
/// Largest value of a 24-hour clock field (`H`, `HH`)
pub const MAX_HOUR_24: u8 = 23;
/// Largest minute or second value
pub const MAX_MINUTE: u8 = 59;

/// Ante meridiem designator accepted by `tt`
pub const AM_DESIGNATOR: &str = "AM";
/// Post meridiem designator accepted by `tt`
pub const PM_DESIGNATOR: &str = "PM";

/// Number of digits a `yyyy` field must have
pub const YEAR_DIGITS: usize = 4;

/// Returned by `age_from_optional_date` when no date is given
pub const AGE_UNKNOWN: i32 = -1;

/// Accepted date layouts, tried in order. The first layout that matches wins.
///
/// The duplicated `M/d/yyyy h:mm` entry is kept so the table keeps its
/// historical shape of twelve candidates.
pub const DEFAULT_DATE_PATTERNS: [&str; 12] = [
    "M/d/yyyy h:mm:ss tt",
    "M/d/yyyy h:mm tt",
    "MM/dd/yyyy hh:mm:ss",
    "M/d/yyyy h:mm:ss",
    "M/d/yyyy hh:mm tt",
    "M/d/yyyy hh tt",
    "M/d/yyyy h:mm",
    "M/d/yyyy h:mm",
    "MM/dd/yyyy hh:mm",
    "M/dd/yyyy hh:mm",
    "dd/MM/yyyy",
    "d/M/yyyy",
];

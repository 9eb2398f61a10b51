//! Strict date normalization and description-tagged enum resolution.
//!
//! Two independent helpers live here:
//!
//! - [`DateNormalizer`] matches date strings exactly against an ordered list
//!   of layouts (first match wins) and derives durations and ages from them.
//! - The enum resolver ([`enum_value_by_description`], [`all_values`],
//!   [`parse_or_default`], [`description_of`]) works on any [`EnumLike`]
//!   type, typically declared with [`enum_like!`].

mod clock;
mod consts;
mod descriptor;
mod layout;
mod normalizer;
mod prelude;
mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use consts::*;
pub use descriptor::{
    DescriptionIndex, EnumError, EnumLike, Values, all_values, description_of, ensure_enum_like,
    enum_value_by_description, parse_name, parse_or_default, try_parse,
};
pub use layout::{DateLayout, LayoutError};
pub use normalizer::{
    DateNormalizer, age_from_date, age_from_optional_date, default_layouts, diff_dates,
    diff_dates_between, validate_date_string, validate_year_string,
};
pub use types::{Hour, Meridiem, Minute, Month, Second, Year};

use crate::prelude::*;

/// Why a single layout rejected an input.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Empty date string")]
    EmptyInput,
    #[display(fmt = "Input does not match layout at byte {position}")]
    Mismatch { position: usize },
    #[display(fmt = "Unexpected trailing input at byte {position}")]
    TrailingInput { position: usize },
    #[display(fmt = "Invalid year: {} (must be 1-{})", "_0", MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { month: u8, day: u8, year: u16 },
    #[display(fmt = "Invalid hour: {_0}")]
    InvalidHour(u8),
    #[display(fmt = "Invalid minute: {_0}")]
    InvalidMinute(u8),
    #[display(fmt = "Invalid second: {_0}")]
    InvalidSecond(u8),
}

impl std::error::Error for ParseError {}

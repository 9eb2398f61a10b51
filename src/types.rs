use crate::ParseError;
use crate::consts::{
    AM_DESIGNATOR, MAX_HOUR_12, MAX_HOUR_24, MAX_MINUTE, MAX_MONTH, MAX_YEAR, PM_DESIGNATOR,
};
use std::fmt;
use std::num::NonZeroU16;
use std::num::NonZeroU8;

/// A year value guaranteed to be in the range `1..=MAX_YEAR` (1..=9999)
/// Uses `NonZeroU16` internally, so 0 is not a valid year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Year(NonZeroU16);

impl Year {
    /// Creates a new Year, validating that it's non-zero and <= `MAX_YEAR`
    ///
    /// # Errors
    /// Returns `ParseError::InvalidYear` if the value is 0 or > `MAX_YEAR`.
    pub fn new(value: u16) -> Result<Self, ParseError> {
        let non_zero = NonZeroU16::new(value).ok_or(ParseError::InvalidYear(value))?;
        if value > MAX_YEAR {
            return Err(ParseError::InvalidYear(value));
        }
        Ok(Self(non_zero))
    }

    /// Returns the year value as u16
    #[inline]
    pub const fn get(self) -> u16 {
        self.0.get()
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

/// A month value guaranteed to be in the range `1..=MAX_MONTH` (1..=12)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month(NonZeroU8);

impl Month {
    /// Creates a new Month, validating that it's non-zero and <= `MAX_MONTH`
    ///
    /// # Errors
    /// Returns `ParseError::InvalidMonth` if the value is 0 or > `MAX_MONTH`.
    pub fn new(value: u8) -> Result<Self, ParseError> {
        let non_zero = NonZeroU8::new(value).ok_or(ParseError::InvalidMonth(value))?;
        if value > MAX_MONTH {
            return Err(ParseError::InvalidMonth(value));
        }
        Ok(Self(non_zero))
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

/// Ante/post meridiem marker read from a `tt` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    /// Matches a designator case-insensitively (`AM`, `am`, `Pm`, ...).
    pub fn from_designator(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case(AM_DESIGNATOR) {
            Some(Self::Am)
        } else if s.eq_ignore_ascii_case(PM_DESIGNATOR) {
            Some(Self::Pm)
        } else {
            None
        }
    }
}

/// An hour of the day on the 24-hour clock (`0..=23`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Hour(u8);

impl Hour {
    /// # Errors
    /// Returns `ParseError::InvalidHour` if the value is > `MAX_HOUR_24`.
    pub const fn from_24h(value: u8) -> Result<Self, ParseError> {
        if value > MAX_HOUR_24 {
            return Err(ParseError::InvalidHour(value));
        }
        Ok(Self(value))
    }

    /// Converts a 12-hour clock reading. Without a designator the reading is
    /// taken as AM, so `12` is midnight.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidHour` if the value is > `MAX_HOUR_12`.
    pub const fn from_12h(value: u8, meridiem: Option<Meridiem>) -> Result<Self, ParseError> {
        if value > MAX_HOUR_12 {
            return Err(ParseError::InvalidHour(value));
        }
        let hour = match meridiem {
            None | Some(Meridiem::Am) => value % MAX_HOUR_12,
            Some(Meridiem::Pm) => value % MAX_HOUR_12 + MAX_HOUR_12,
        };
        Ok(Self(hour))
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }
}

/// A minute of the hour (`0..=59`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Minute(u8);

impl Minute {
    /// # Errors
    /// Returns `ParseError::InvalidMinute` if the value is > `MAX_MINUTE`.
    pub const fn new(value: u8) -> Result<Self, ParseError> {
        if value > MAX_MINUTE {
            return Err(ParseError::InvalidMinute(value));
        }
        Ok(Self(value))
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }
}

/// A second of the minute (`0..=59`). Leap seconds are not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Second(u8);

impl Second {
    /// # Errors
    /// Returns `ParseError::InvalidSecond` if the value is > `MAX_MINUTE`.
    pub const fn new(value: u8) -> Result<Self, ParseError> {
        if value > MAX_MINUTE {
            return Err(ParseError::InvalidSecond(value));
        }
        Ok(Self(value))
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }
}

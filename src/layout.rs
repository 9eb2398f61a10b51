//! Compiled date-time layouts and strict, exact matching against them.
//!
//! Layouts are written with repeated pattern letters:
//!
//! | letters      | meaning                                   |
//! |--------------|-------------------------------------------|
//! | `yyyy`       | four digit year                           |
//! | `M`, `MM`    | month, one-or-two / exactly two digits    |
//! | `d`, `dd`    | day of month                              |
//! | `h`, `hh`    | hour on the 12-hour clock (`0..=12`)      |
//! | `H`, `HH`    | hour on the 24-hour clock (`0..=23`)      |
//! | `m`, `mm`    | minute                                    |
//! | `s`, `ss`    | second                                    |
//! | `tt`         | `AM` / `PM`, case-insensitive             |
//!
//! Every other non-letter character is a literal that must appear verbatim.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};

use crate::ParseError;
use crate::consts::YEAR_DIGITS;
use crate::types::{Hour, Meridiem, Minute, Month, Second, Year};

/// Maximum width of every numeric field except the year.
const TWO_DIGITS: usize = 2;

/// Error type for malformed layout patterns.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// The pattern is empty.
    #[error("Empty layout pattern")]
    Empty,

    /// A letter that is not a known specifier.
    #[error("Unknown specifier '{specifier}' at position {position}")]
    UnknownSpecifier { specifier: char, position: usize },

    /// A known specifier repeated an unsupported number of times.
    #[error("Unsupported width {width} for specifier '{specifier}'")]
    UnsupportedWidth { specifier: char, width: usize },

    /// The same component appears twice.
    #[error("Component '{specifier}' appears more than once")]
    DuplicateField { specifier: char },

    /// Layouts must name a full calendar date.
    #[error("Layout has no {0} field")]
    MissingField(&'static str),

    /// `tt` without a 12-hour field to apply it to.
    #[error("Designator 'tt' requires a 12-hour field (h or hh)")]
    DesignatorWithoutTwelveHour,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Year,
    Month,
    Day,
    Hour12,
    Hour24,
    Minute,
    Second,
}

impl Field {
    const fn slot(self) -> usize {
        match self {
            Self::Year => 0,
            Self::Month => 1,
            Self::Day => 2,
            Self::Hour12 | Self::Hour24 => 3,
            Self::Minute => 4,
            Self::Second => 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Number { field: Field, min: usize, max: usize },
    Designator,
    Literal(char),
}

/// A compiled layout pattern such as `M/d/yyyy h:mm:ss tt`.
///
/// Matching is exact: no whitespace is skipped, every field must be present
/// with the digit count the pattern asks for, and the whole input must be
/// consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateLayout {
    pattern: String,
    tokens: Vec<Token>,
}

impl DateLayout {
    /// Compiles a layout pattern.
    ///
    /// # Errors
    /// Returns a `LayoutError` describing the first problem in the pattern.
    pub fn new(pattern: &str) -> Result<Self, LayoutError> {
        if pattern.is_empty() {
            return Err(LayoutError::Empty);
        }

        let chars: Vec<char> = pattern.chars().collect();
        let mut tokens = Vec::new();
        let mut seen = [false; 6];
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            if !c.is_ascii_alphabetic() {
                tokens.push(Token::Literal(c));
                i += 1;
                continue;
            }

            let width = chars[i..].iter().take_while(|&&x| x == c).count();
            let token = Self::specifier(c, width, i)?;
            if let Token::Number { field, .. } = token {
                let slot = &mut seen[field.slot()];
                if *slot {
                    return Err(LayoutError::DuplicateField { specifier: c });
                }
                *slot = true;
            }
            tokens.push(token);
            i += width;
        }

        for (field, name) in [(Field::Year, "year"), (Field::Month, "month"), (Field::Day, "day")] {
            if !seen[field.slot()] {
                return Err(LayoutError::MissingField(name));
            }
        }

        let has_designator = tokens.contains(&Token::Designator);
        let has_twelve_hour = tokens
            .iter()
            .any(|t| matches!(t, Token::Number { field: Field::Hour12, .. }));
        if has_designator && !has_twelve_hour {
            return Err(LayoutError::DesignatorWithoutTwelveHour);
        }

        Ok(Self {
            pattern: pattern.to_owned(),
            tokens,
        })
    }

    fn specifier(c: char, width: usize, position: usize) -> Result<Token, LayoutError> {
        let field = match c {
            'y' if width == YEAR_DIGITS => {
                return Ok(Token::Number {
                    field: Field::Year,
                    min: YEAR_DIGITS,
                    max: YEAR_DIGITS,
                });
            }
            't' if width == TWO_DIGITS => return Ok(Token::Designator),
            'y' | 't' => return Err(LayoutError::UnsupportedWidth { specifier: c, width }),
            'M' => Field::Month,
            'd' => Field::Day,
            'h' => Field::Hour12,
            'H' => Field::Hour24,
            'm' => Field::Minute,
            's' => Field::Second,
            _ => return Err(LayoutError::UnknownSpecifier { specifier: c, position }),
        };

        if width > TWO_DIGITS {
            return Err(LayoutError::UnsupportedWidth { specifier: c, width });
        }
        Ok(Token::Number {
            field,
            min: width,
            max: TWO_DIGITS,
        })
    }

    /// The pattern this layout was compiled from.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Matches `input` against this layout exactly.
    ///
    /// # Errors
    /// Returns a `ParseError` naming the first position or component that
    /// does not fit.
    pub fn parse(&self, input: &str) -> Result<NaiveDateTime, ParseError> {
        if input.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let bytes = input.as_bytes();
        let mut fields = Fields::default();
        let mut pos = 0;

        for token in &self.tokens {
            match *token {
                Token::Number { field, min, max } => {
                    let digits = bytes[pos..]
                        .iter()
                        .take(max)
                        .take_while(|b| b.is_ascii_digit())
                        .count();
                    if digits < min {
                        return Err(ParseError::Mismatch { position: pos });
                    }
                    let value = bytes[pos..pos + digits]
                        .iter()
                        .fold(0_u16, |acc, b| acc * 10 + u16::from(b - b'0'));
                    fields.set(field, value);
                    pos += digits;
                }
                Token::Designator => {
                    let meridiem = input
                        .get(pos..pos + TWO_DIGITS)
                        .and_then(Meridiem::from_designator)
                        .ok_or(ParseError::Mismatch { position: pos })?;
                    fields.meridiem = Some(meridiem);
                    pos += TWO_DIGITS;
                }
                Token::Literal(c) => {
                    if !input[pos..].starts_with(c) {
                        return Err(ParseError::Mismatch { position: pos });
                    }
                    pos += c.len_utf8();
                }
            }
        }

        if pos != input.len() {
            return Err(ParseError::TrailingInput { position: pos });
        }

        fields.into_datetime()
    }

    /// Returns true if `input` matches this layout.
    pub fn matches(&self, input: &str) -> bool {
        self.parse(input).is_ok()
    }
}

/// Raw numeric values collected while walking the tokens.
#[derive(Debug, Default)]
struct Fields {
    year: u16,
    month: u8,
    day: u8,
    hour: u8,
    twelve_hour: bool,
    minute: u8,
    second: u8,
    meridiem: Option<Meridiem>,
}

impl Fields {
    fn set(&mut self, field: Field, value: u16) {
        // Only the year can exceed two digits.
        let small = u8::try_from(value).unwrap_or(u8::MAX);
        match field {
            Field::Year => self.year = value,
            Field::Month => self.month = small,
            Field::Day => self.day = small,
            Field::Hour12 => {
                self.hour = small;
                self.twelve_hour = true;
            }
            Field::Hour24 => self.hour = small,
            Field::Minute => self.minute = small,
            Field::Second => self.second = small,
        }
    }

    fn into_datetime(self) -> Result<NaiveDateTime, ParseError> {
        let year = Year::new(self.year)?;
        let month = Month::new(self.month)?;
        let date = NaiveDate::from_ymd_opt(
            i32::from(year.get()),
            u32::from(month.get()),
            u32::from(self.day),
        )
        .ok_or(ParseError::InvalidDay {
            month: month.get(),
            day: self.day,
            year: year.get(),
        })?;
        let hour = if self.twelve_hour {
            Hour::from_12h(self.hour, self.meridiem)?
        } else {
            Hour::from_24h(self.hour)?
        };
        let minute = Minute::new(self.minute)?;
        let second = Second::new(self.second)?;

        date.and_hms_opt(
            u32::from(hour.get()),
            u32::from(minute.get()),
            u32::from(second.get()),
        )
        .ok_or(ParseError::InvalidHour(hour.get()))
    }
}

impl FromStr for DateLayout {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for DateLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

impl serde::Serialize for DateLayout {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.pattern)
    }
}

impl<'de> serde::Deserialize<'de> for DateLayout {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

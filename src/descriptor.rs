//! Resolution of enum-like values from their names and description tags.
//!
//! Types opt in through the [`EnumLike`] trait, usually generated by the
//! [`enum_like!`](crate::enum_like) macro, which records each constant's
//! name and optional description next to the type definition.

use std::any::type_name;
use std::collections::{HashMap, HashSet};

/// A type whose values are a finite, ordered set of named constants, each
/// optionally tagged with a human-readable description.
pub trait EnumLike: Copy + Eq + 'static {
    /// Every constant, in declaration order.
    const VARIANTS: &'static [Self];

    /// The constant's identifier.
    fn name(self) -> &'static str;

    /// The description tag attached to the constant, if any.
    fn description(self) -> Option<&'static str> {
        None
    }

    /// The description tag, or `""` when none is attached.
    fn description_or_empty(self) -> &'static str {
        self.description().unwrap_or_default()
    }
}

/// Error type for enum resolution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnumError {
    /// A required string argument was empty.
    #[error("Invalid argument: {0} must not be empty")]
    InvalidArgument(&'static str),

    /// The type's constant table is not a usable finite, named set.
    #[error("{type_name} is not enum-like: {reason}")]
    TypeConstraintViolation {
        type_name: &'static str,
        reason: String,
    },

    /// No constant carries the requested description.
    #[error("No {type_name} value has description \"{description}\"")]
    NotFound {
        type_name: &'static str,
        description: String,
    },

    /// No constant has the requested name.
    #[error("No {type_name} value is named \"{name}\"")]
    UnknownName { type_name: &'static str, name: String },
}

/// Iterator over every constant of `T`, in declaration order.
pub type Values<T> = std::iter::Copied<std::slice::Iter<'static, T>>;

/// Checks that `T` declares at least one constant and that its names are
/// non-empty and unique.
///
/// # Errors
/// Returns `EnumError::TypeConstraintViolation` describing the first defect.
pub fn ensure_enum_like<T: EnumLike>() -> Result<(), EnumError> {
    let violation = |reason: String| EnumError::TypeConstraintViolation {
        type_name: type_name::<T>(),
        reason,
    };

    if T::VARIANTS.is_empty() {
        return Err(violation("declares no constants".to_owned()));
    }

    let mut names = HashSet::with_capacity(T::VARIANTS.len());
    for (index, value) in T::VARIANTS.iter().enumerate() {
        let name = value.name();
        if name.is_empty() {
            return Err(violation(format!("constant #{index} has an empty name")));
        }
        if !names.insert(name) {
            return Err(violation(format!("name \"{name}\" is declared more than once")));
        }
    }
    Ok(())
}

/// Returns the first constant, in declaration order, whose description is
/// exactly `description`.
///
/// # Errors
/// - `EnumError::InvalidArgument` if `description` is empty.
/// - `EnumError::TypeConstraintViolation` if `T` fails [`ensure_enum_like`].
/// - `EnumError::NotFound` if no constant carries the description.
pub fn enum_value_by_description<T: EnumLike>(description: &str) -> Result<T, EnumError> {
    if description.is_empty() {
        return Err(EnumError::InvalidArgument("description"));
    }
    ensure_enum_like::<T>()?;

    T::VARIANTS
        .iter()
        .copied()
        .find(|value| value.description_or_empty() == description)
        .ok_or_else(|| {
            tracing::debug!(enum_type = type_name::<T>(), description, "no constant has description");
            EnumError::NotFound {
                type_name: type_name::<T>(),
                description: description.to_owned(),
            }
        })
}

/// Every constant of `T` in declaration order. Each call returns a fresh
/// iterator.
///
/// # Errors
/// Returns `EnumError::TypeConstraintViolation` if `T` fails [`ensure_enum_like`].
pub fn all_values<T: EnumLike>() -> Result<Values<T>, EnumError> {
    ensure_enum_like::<T>()?;
    Ok(T::VARIANTS.iter().copied())
}

/// Case-insensitive exact match of `raw` against the constant names of `T`.
/// Case is folded with Unicode lowercasing, so `"été"` matches `Été`.
///
/// # Errors
/// Returns `EnumError::TypeConstraintViolation` if `T` fails [`ensure_enum_like`].
pub fn try_parse<T: EnumLike>(raw: &str) -> Result<Option<T>, EnumError> {
    ensure_enum_like::<T>()?;
    let raw = raw.to_lowercase();
    Ok(T::VARIANTS
        .iter()
        .copied()
        .find(|value| value.name().to_lowercase() == raw))
}

/// Like [`try_parse`], failing with `EnumError::UnknownName` when nothing matches.
///
/// # Errors
/// `EnumError::TypeConstraintViolation` or `EnumError::UnknownName`.
pub fn parse_name<T: EnumLike>(raw: &str) -> Result<T, EnumError> {
    try_parse::<T>(raw)?.ok_or_else(|| EnumError::UnknownName {
        type_name: type_name::<T>(),
        name: raw.to_owned(),
    })
}

/// Parses `raw` as a constant name of `T`, returning `fallback` when it is
/// empty, malformed or unknown.
///
/// # Errors
/// Only `EnumError::TypeConstraintViolation`; data problems never fail.
pub fn parse_or_default<T: EnumLike>(raw: &str, fallback: T) -> Result<T, EnumError> {
    let parsed = try_parse::<T>(raw)?;
    if parsed.is_none() {
        tracing::debug!(enum_type = type_name::<T>(), raw, "falling back to default constant");
    }
    Ok(parsed.unwrap_or(fallback))
}

/// The description tag of `value`, or `""` when absent.
pub fn description_of<T: EnumLike>(value: Option<T>) -> &'static str {
    value.map_or("", T::description_or_empty)
}

/// Description-to-constant lookup table built once for repeated lookups.
/// When two constants share a description, the first declared wins.
#[derive(Debug, Clone)]
pub struct DescriptionIndex<T: EnumLike> {
    entries: HashMap<&'static str, T>,
}

impl<T: EnumLike> DescriptionIndex<T> {
    /// # Errors
    /// Returns `EnumError::TypeConstraintViolation` if `T` fails [`ensure_enum_like`].
    pub fn build() -> Result<Self, EnumError> {
        ensure_enum_like::<T>()?;
        let mut entries = HashMap::new();
        for &value in T::VARIANTS {
            if let Some(description) = value.description().filter(|d| !d.is_empty()) {
                entries.entry(description).or_insert(value);
            }
        }
        Ok(Self { entries })
    }

    pub fn get(&self, description: &str) -> Option<T> {
        self.entries.get(description).copied()
    }

    /// Number of distinct descriptions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Declares an enum together with its [`EnumLike`] implementation.
///
/// Each variant may carry a description with `=> "text"`. The generated type
/// also implements `Display` (the constant name) and `FromStr`
/// (case-insensitive name).
///
/// ```
/// exact_parse::enum_like! {
///     pub enum Color {
///         Red => "Red",
///         Green => "Green",
///         Blue => "Blue",
///         Unknown,
///     }
/// }
///
/// let green = exact_parse::enum_value_by_description::<Color>("Green").unwrap();
/// assert_eq!(green, Color::Green);
/// assert_eq!("BLUE".parse::<Color>().unwrap(), Color::Blue);
/// ```
#[macro_export]
macro_rules! enum_like {
    (@description) => {
        ::core::option::Option::None
    };
    (@description $description:literal) => {
        ::core::option::Option::Some($description)
    };
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $(=> $description:literal)?
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )+
        }

        impl $crate::EnumLike for $name {
            const VARIANTS: &'static [Self] = &[$(Self::$variant),+];

            fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => ::core::stringify!($variant),)+
                }
            }

            fn description(self) -> ::core::option::Option<&'static str> {
                match self {
                    $(Self::$variant => $crate::enum_like!(@description $($description)?),)+
                }
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str($crate::EnumLike::name(*self))
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = $crate::EnumError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                $crate::parse_name(s)
            }
        }
    };
}

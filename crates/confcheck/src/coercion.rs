//! Type coercion table: raw default strings to typed values.
//!
//! Parsing is locale-invariant. Surrounding whitespace is ignored for every
//! type except `string`, which is passed through untouched.

use crate::descriptor::PropertyType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A typed value produced by coercing a raw default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum PropertyValue {
    /// `bool` value.
    Bool(bool),
    /// `i8` value.
    Int8(i8),
    /// `u8` value.
    Uint8(u8),
    /// `i16` value.
    Int16(i16),
    /// `u16` value.
    Uint16(u16),
    /// `i32` value.
    Int32(i32),
    /// `u32` value.
    Uint32(u32),
    /// `i64` value.
    Int64(i64),
    /// `u64` value.
    Uint64(u64),
    /// `f64` value.
    Float64(f64),
    /// `String` value.
    String(String),
}

impl PropertyValue {
    /// The type tag this value belongs to.
    #[must_use]
    pub const fn property_type(&self) -> PropertyType {
        match self {
            Self::Bool(_) => PropertyType::Bool,
            Self::Int8(_) => PropertyType::Int8,
            Self::Uint8(_) => PropertyType::Uint8,
            Self::Int16(_) => PropertyType::Int16,
            Self::Uint16(_) => PropertyType::Uint16,
            Self::Int32(_) => PropertyType::Int32,
            Self::Uint32(_) => PropertyType::Uint32,
            Self::Int64(_) => PropertyType::Int64,
            Self::Uint64(_) => PropertyType::Uint64,
            Self::Float64(_) => PropertyType::Float64,
            Self::String(_) => PropertyType::String,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(formatter, "{value}"),
            Self::Int8(value) => write!(formatter, "{value}"),
            Self::Uint8(value) => write!(formatter, "{value}"),
            Self::Int16(value) => write!(formatter, "{value}"),
            Self::Uint16(value) => write!(formatter, "{value}"),
            Self::Int32(value) => write!(formatter, "{value}"),
            Self::Uint32(value) => write!(formatter, "{value}"),
            Self::Int64(value) => write!(formatter, "{value}"),
            Self::Uint64(value) => write!(formatter, "{value}"),
            Self::Float64(value) => write!(formatter, "{value}"),
            Self::String(value) => formatter.write_str(value),
        }
    }
}

/// A raw default that does not parse as its declared type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{raw}' is not a valid {kind}: {reason}")]
pub struct CoercionError {
    /// Declared type.
    pub kind: PropertyType,
    /// Raw input.
    pub raw: String,
    /// Parser message.
    pub reason: String,
}

/// Parser for one type tag.
pub type Coercion = fn(&str) -> Result<PropertyValue, CoercionError>;

/// Look up the parser for `kind`.
#[must_use]
pub const fn coercion(kind: PropertyType) -> Coercion {
    match kind {
        PropertyType::Bool => parse_bool,
        PropertyType::Int8 => parse_int8,
        PropertyType::Uint8 => parse_uint8,
        PropertyType::Int16 => parse_int16,
        PropertyType::Uint16 => parse_uint16,
        PropertyType::Int32 => parse_int32,
        PropertyType::Uint32 => parse_uint32,
        PropertyType::Int64 => parse_int64,
        PropertyType::Uint64 => parse_uint64,
        PropertyType::Float64 => parse_float64,
        PropertyType::String => parse_string,
    }
}

/// Coerce `raw` into a value of type `kind`.
pub fn coerce(kind: PropertyType, raw: &str) -> Result<PropertyValue, CoercionError> {
    coercion(kind)(raw)
}

macro_rules! number_parser {
    ($name:ident, $ty:ty, $variant:ident) => {
        fn $name(raw: &str) -> Result<PropertyValue, CoercionError> {
            parse_number::<$ty>(PropertyType::$variant, raw).map(PropertyValue::$variant)
        }
    };
}

number_parser!(parse_int8, i8, Int8);
number_parser!(parse_uint8, u8, Uint8);
number_parser!(parse_int16, i16, Int16);
number_parser!(parse_uint16, u16, Uint16);
number_parser!(parse_int32, i32, Int32);
number_parser!(parse_uint32, u32, Uint32);
number_parser!(parse_int64, i64, Int64);
number_parser!(parse_uint64, u64, Uint64);
number_parser!(parse_float64, f64, Float64);

#[allow(clippy::unnecessary_wraps, reason = "must match the `Coercion` signature")]
fn parse_string(raw: &str) -> Result<PropertyValue, CoercionError> {
    Ok(PropertyValue::String(raw.to_owned()))
}

fn parse_bool(raw: &str) -> Result<PropertyValue, CoercionError> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        Ok(PropertyValue::Bool(true))
    } else if trimmed.eq_ignore_ascii_case("false") {
        Ok(PropertyValue::Bool(false))
    } else {
        Err(CoercionError {
            kind: PropertyType::Bool,
            raw: raw.to_owned(),
            reason: "expected 'true' or 'false'".to_owned(),
        })
    }
}

fn parse_number<T>(kind: PropertyType, raw: &str) -> Result<T, CoercionError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    raw.trim().parse::<T>().map_err(|error| CoercionError {
        kind,
        raw: raw.to_owned(),
        reason: error.to_string(),
    })
}

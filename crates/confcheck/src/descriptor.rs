//! Field descriptor model: type tags and per-field validation metadata.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Primitive type tag a validated field is declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    /// `bool`
    Bool,
    /// `i8`
    Int8,
    /// `u8`
    Uint8,
    /// `i16`
    Int16,
    /// `u16`
    Uint16,
    /// `i32`
    Int32,
    /// `u32`
    Uint32,
    /// `i64`
    Int64,
    /// `u64`
    Uint64,
    /// `f64`
    Float64,
    /// `String`
    String,
}

impl PropertyType {
    /// Every known tag, in declaration order.
    pub const ALL: [Self; 11] = [
        Self::Bool,
        Self::Int8,
        Self::Uint8,
        Self::Int16,
        Self::Uint16,
        Self::Int32,
        Self::Uint32,
        Self::Int64,
        Self::Uint64,
        Self::Float64,
        Self::String,
    ];

    /// Canonical textual tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int8 => "int8",
            Self::Uint8 => "uint8",
            Self::Int16 => "int16",
            Self::Uint16 => "uint16",
            Self::Int32 => "int32",
            Self::Uint32 => "uint32",
            Self::Int64 => "int64",
            Self::Uint64 => "uint64",
            Self::Float64 => "float64",
            Self::String => "string",
        }
    }

    /// Resolve a textual tag, accepting canonical names and legacy aliases.
    ///
    /// Matching is ASCII case-insensitive. Returns `None` for unknown tags.
    #[must_use]
    pub fn parse_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim().to_ascii_lowercase();
        let kind = match tag.as_str() {
            "bool" => Self::Bool,
            "int8" | "sbyte" => Self::Int8,
            "uint8" | "byte" => Self::Uint8,
            "int16" | "short" => Self::Int16,
            "uint16" | "ushort" => Self::Uint16,
            "int32" | "int" => Self::Int32,
            "uint32" | "uint" => Self::Uint32,
            "int64" | "long" => Self::Int64,
            "uint64" | "ulong" => Self::Uint64,
            "float64" | "double" => Self::Float64,
            "string" => Self::String,
            _ => return None,
        };
        Some(kind)
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Error returned when a textual tag names none of the known types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown property type '{tag}'")]
pub struct UnknownTagError {
    /// Tag as registered.
    pub tag: String,
}

impl FromStr for PropertyType {
    type Err = UnknownTagError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse_tag(value).ok_or_else(|| UnknownTagError {
            tag: value.to_owned(),
        })
    }
}

/// Validation metadata attached to one field of a configuration type.
///
/// The type tag is stored as registered and only resolved when the field
/// registry is built, so a hand-written registration with a bad tag fails the
/// validation call rather than the registration itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: Cow<'static, str>,
    kind: Cow<'static, str>,
    required: bool,
    parent: Option<Cow<'static, str>>,
    default: Option<Cow<'static, str>>,
}

impl FieldDescriptor {
    /// Describe an optional field named `name` with type tag `kind`.
    pub fn new(name: impl Into<Cow<'static, str>>, kind: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            required: false,
            parent: None,
            default: None,
        }
    }

    /// Describe a field with an already-resolved type.
    pub fn typed(name: impl Into<Cow<'static, str>>, kind: PropertyType) -> Self {
        Self::new(name, kind.as_str())
    }

    /// Mark the field as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set whether the field is required.
    #[must_use]
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Condition this field on the presence of the sibling field `parent`.
    ///
    /// A blank name means "no parent".
    #[must_use]
    pub fn with_parent(mut self, parent: impl Into<Cow<'static, str>>) -> Self {
        let parent = parent.into();
        self.parent = if parent.trim().is_empty() {
            None
        } else {
            Some(parent)
        };
        self
    }

    /// Raw default applied when the field is optional and absent.
    #[must_use]
    pub fn with_default(mut self, default: impl Into<Cow<'static, str>>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Registry name of the field.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw type tag as registered.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Resolve the raw type tag.
    pub fn property_type(&self) -> Result<PropertyType, UnknownTagError> {
        self.kind.parse()
    }

    /// Whether the field must hold a value.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    /// Name of the parent field, if any.
    #[must_use]
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    /// Raw default string, if any.
    #[must_use]
    pub fn default_value(&self) -> Option<&str> {
        self.default.as_deref()
    }
}

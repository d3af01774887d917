//! Host accessor contract: descriptor registration and typed field access.
//!
//! A configuration type exposes its validated fields through [`Properties`].
//! The derive macro generates the implementation; hand-written
//! implementations are useful when metadata is only known at runtime.

use crate::coercion::PropertyValue;
use crate::custom::SelfValidate;
use crate::descriptor::{FieldDescriptor, PropertyType};

/// Shared view of one validated field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Slot<'a> {
    /// `Option<bool>` field.
    Bool(&'a Option<bool>),
    /// `Option<i8>` field.
    Int8(&'a Option<i8>),
    /// `Option<u8>` field.
    Uint8(&'a Option<u8>),
    /// `Option<i16>` field.
    Int16(&'a Option<i16>),
    /// `Option<u16>` field.
    Uint16(&'a Option<u16>),
    /// `Option<i32>` field.
    Int32(&'a Option<i32>),
    /// `Option<u32>` field.
    Uint32(&'a Option<u32>),
    /// `Option<i64>` field.
    Int64(&'a Option<i64>),
    /// `Option<u64>` field.
    Uint64(&'a Option<u64>),
    /// `Option<f64>` field.
    Float64(&'a Option<f64>),
    /// `Option<String>` field.
    String(&'a Option<String>),
}

/// Exclusive view of one validated field.
#[derive(Debug)]
pub enum SlotMut<'a> {
    /// `Option<bool>` field.
    Bool(&'a mut Option<bool>),
    /// `Option<i8>` field.
    Int8(&'a mut Option<i8>),
    /// `Option<u8>` field.
    Uint8(&'a mut Option<u8>),
    /// `Option<i16>` field.
    Int16(&'a mut Option<i16>),
    /// `Option<u16>` field.
    Uint16(&'a mut Option<u16>),
    /// `Option<i32>` field.
    Int32(&'a mut Option<i32>),
    /// `Option<u32>` field.
    Uint32(&'a mut Option<u32>),
    /// `Option<i64>` field.
    Int64(&'a mut Option<i64>),
    /// `Option<u64>` field.
    Uint64(&'a mut Option<u64>),
    /// `Option<f64>` field.
    Float64(&'a mut Option<f64>),
    /// `Option<String>` field.
    String(&'a mut Option<String>),
}

impl Slot<'_> {
    /// Type stored in the field.
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

    /// Whether the field holds a value. An empty string counts as present.
    #[must_use]
    pub const fn is_present(&self) -> bool {
        match self {
            Self::Bool(value) => value.is_some(),
            Self::Int8(value) => value.is_some(),
            Self::Uint8(value) => value.is_some(),
            Self::Int16(value) => value.is_some(),
            Self::Uint16(value) => value.is_some(),
            Self::Int32(value) => value.is_some(),
            Self::Uint32(value) => value.is_some(),
            Self::Int64(value) => value.is_some(),
            Self::Uint64(value) => value.is_some(),
            Self::Float64(value) => value.is_some(),
            Self::String(value) => value.is_some(),
        }
    }

    /// Current value, if present.
    #[must_use]
    pub fn value(&self) -> Option<PropertyValue> {
        match self {
            Self::Bool(value) => value.map(PropertyValue::Bool),
            Self::Int8(value) => value.map(PropertyValue::Int8),
            Self::Uint8(value) => value.map(PropertyValue::Uint8),
            Self::Int16(value) => value.map(PropertyValue::Int16),
            Self::Uint16(value) => value.map(PropertyValue::Uint16),
            Self::Int32(value) => value.map(PropertyValue::Int32),
            Self::Uint32(value) => value.map(PropertyValue::Uint32),
            Self::Int64(value) => value.map(PropertyValue::Int64),
            Self::Uint64(value) => value.map(PropertyValue::Uint64),
            Self::Float64(value) => value.map(PropertyValue::Float64),
            Self::String(value) => (*value).clone().map(PropertyValue::String),
        }
    }
}

impl SlotMut<'_> {
    /// Type stored in the field.
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

    /// Store `value` in the field.
    ///
    /// On a type mismatch the field is left untouched and the value is
    /// handed back.
    pub fn assign(self, value: PropertyValue) -> Result<(), PropertyValue> {
        match (self, value) {
            (Self::Bool(slot), PropertyValue::Bool(value)) => *slot = Some(value),
            (Self::Int8(slot), PropertyValue::Int8(value)) => *slot = Some(value),
            (Self::Uint8(slot), PropertyValue::Uint8(value)) => *slot = Some(value),
            (Self::Int16(slot), PropertyValue::Int16(value)) => *slot = Some(value),
            (Self::Uint16(slot), PropertyValue::Uint16(value)) => *slot = Some(value),
            (Self::Int32(slot), PropertyValue::Int32(value)) => *slot = Some(value),
            (Self::Uint32(slot), PropertyValue::Uint32(value)) => *slot = Some(value),
            (Self::Int64(slot), PropertyValue::Int64(value)) => *slot = Some(value),
            (Self::Uint64(slot), PropertyValue::Uint64(value)) => *slot = Some(value),
            (Self::Float64(slot), PropertyValue::Float64(value)) => *slot = Some(value),
            (Self::String(slot), PropertyValue::String(value)) => *slot = Some(value),
            (_, value) => return Err(value),
        }
        Ok(())
    }
}

macro_rules! slot_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl<'a> From<&'a Option<$ty>> for Slot<'a> {
                fn from(value: &'a Option<$ty>) -> Self {
                    Self::$variant(value)
                }
            }

            impl<'a> From<&'a mut Option<$ty>> for SlotMut<'a> {
                fn from(value: &'a mut Option<$ty>) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

slot_from! {
    bool => Bool,
    i8 => Int8,
    u8 => Uint8,
    i16 => Int16,
    u16 => Uint16,
    i32 => Int32,
    u32 => Uint32,
    i64 => Int64,
    u64 => Uint64,
    f64 => Float64,
    String => String,
}

/// A configuration type whose fields carry validation metadata.
///
/// `descriptors` lists fields in declaration order, with the fields of
/// flattened sub-structures spliced in where those sub-structures are
/// declared. `slot`/`slot_mut` must resolve every name `descriptors` returns.
pub trait Properties {
    /// Field metadata, in declaration order.
    fn descriptors() -> Vec<FieldDescriptor>
    where
        Self: Sized;

    /// Shared access to the field registered under `name`.
    fn slot(&self, name: &str) -> Option<Slot<'_>>;

    /// Exclusive access to the field registered under `name`.
    fn slot_mut(&mut self, name: &str) -> Option<SlotMut<'_>>;

    /// The type's own validation hook, when it opts in.
    fn self_validation(&self) -> Option<&dyn SelfValidate> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presence_follows_option_state() {
        let absent: Option<String> = None;
        let empty = Some(String::new());
        assert!(!Slot::from(&absent).is_present());
        assert!(Slot::from(&empty).is_present());

        let count = Some(0_u8);
        let slot = Slot::from(&count);
        assert!(slot.is_present());
        assert_eq!(slot.property_type(), PropertyType::Uint8);
        assert_eq!(slot.value(), Some(PropertyValue::Uint8(0)));
    }

    #[test]
    fn assign_matching_value_sets_field() {
        let mut port: Option<u16> = None;
        let result = SlotMut::from(&mut port).assign(PropertyValue::Uint16(8080));
        assert_eq!(result, Ok(()));
        assert_eq!(port, Some(8080));
    }

    #[test]
    fn assign_mismatched_value_leaves_field_untouched() {
        let mut port: Option<u16> = None;
        let result = SlotMut::from(&mut port).assign(PropertyValue::Int32(1));
        assert_eq!(result, Err(PropertyValue::Int32(1)));
        assert_eq!(port, None);
    }
}

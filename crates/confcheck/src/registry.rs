//! Field registry: one presence snapshot per described field.

use crate::descriptor::{FieldDescriptor, PropertyType};
use crate::error::ValidationError;
use crate::properties::Properties;
use std::collections::BTreeMap;

/// A described field paired with its resolved type and presence snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEntry {
    descriptor: FieldDescriptor,
    kind: PropertyType,
    present: bool,
}

impl FieldEntry {
    /// Registry name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.descriptor.name()
    }

    /// Metadata as registered.
    #[must_use]
    pub const fn descriptor(&self) -> &FieldDescriptor {
        &self.descriptor
    }

    /// Resolved type tag.
    #[must_use]
    pub const fn property_type(&self) -> PropertyType {
        self.kind
    }

    /// Whether the field held a value when the registry was built.
    #[must_use]
    pub const fn is_present(&self) -> bool {
        self.present
    }
}

/// Per-call map from field name to descriptor and presence.
///
/// Entries keep the order of [`Properties::descriptors`]. Presence is a
/// snapshot: later writes to the instance do not update it.
#[derive(Debug, Clone, Default)]
pub struct FieldRegistry {
    entries: Vec<FieldEntry>,
    index: BTreeMap<String, usize>,
}

impl FieldRegistry {
    /// Build the registry for `config` from its type's descriptors.
    pub fn build<T: Properties>(config: &T) -> Result<Self, ValidationError> {
        Self::from_descriptors(T::descriptors(), config)
    }

    /// Build the registry from an explicit descriptor list.
    pub fn from_descriptors<T>(
        descriptors: Vec<FieldDescriptor>,
        config: &T,
    ) -> Result<Self, ValidationError>
    where
        T: Properties + ?Sized,
    {
        let mut registry = Self {
            entries: Vec::with_capacity(descriptors.len()),
            index: BTreeMap::new(),
        };
        for descriptor in descriptors {
            let entry = probe(config, descriptor)?;
            let position = registry.entries.len();
            if registry
                .index
                .insert(entry.name().to_owned(), position)
                .is_some()
            {
                return Err(ValidationError::DuplicateField {
                    field: entry.name().to_owned(),
                });
            }
            registry.entries.push(entry);
        }
        Ok(registry)
    }

    /// Look up a field by registry name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldEntry> {
        self.index
            .get(name)
            .and_then(|position| self.entries.get(*position))
    }

    /// Entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldEntry> {
        self.entries.iter()
    }

    /// Number of described fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no field carries a descriptor.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a FieldRegistry {
    type Item = &'a FieldEntry;
    type IntoIter = std::slice::Iter<'a, FieldEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Resolve the descriptor's type and read the field's presence.
fn probe<T>(config: &T, descriptor: FieldDescriptor) -> Result<FieldEntry, ValidationError>
where
    T: Properties + ?Sized,
{
    let kind = descriptor
        .property_type()
        .map_err(|error| ValidationError::UnknownPropertyType {
            field: descriptor.name().to_owned(),
            kind: error.tag,
        })?;
    let slot = config
        .slot(descriptor.name())
        .ok_or_else(|| ValidationError::UnknownField {
            field: descriptor.name().to_owned(),
        })?;
    if slot.property_type() != kind {
        return Err(ValidationError::TypeMismatch {
            field: descriptor.name().to_owned(),
            declared: kind,
            actual: slot.property_type(),
        });
    }
    let present = slot.is_present();
    Ok(FieldEntry {
        descriptor,
        kind,
        present,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::{Slot, SlotMut};

    #[derive(Default)]
    struct Listener {
        host: Option<String>,
        port: Option<u16>,
    }

    impl Properties for Listener {
        fn descriptors() -> Vec<FieldDescriptor> {
            vec![
                FieldDescriptor::new("host", "string").required(),
                FieldDescriptor::new("port", "uint16").with_default("8080"),
            ]
        }

        fn slot(&self, name: &str) -> Option<Slot<'_>> {
            match name {
                "host" => Some(Slot::from(&self.host)),
                "port" => Some(Slot::from(&self.port)),
                _ => None,
            }
        }

        fn slot_mut(&mut self, name: &str) -> Option<SlotMut<'_>> {
            match name {
                "host" => Some(SlotMut::from(&mut self.host)),
                "port" => Some(SlotMut::from(&mut self.port)),
                _ => None,
            }
        }
    }

    #[test]
    fn build_snapshots_presence_in_order() -> Result<(), ValidationError> {
        let config = Listener {
            host: Some("localhost".to_owned()),
            port: None,
        };
        let registry = FieldRegistry::build(&config)?;

        let names: Vec<&str> = registry.iter().map(FieldEntry::name).collect();
        assert_eq!(names, vec!["host", "port"]);
        assert_eq!(registry.len(), 2);
        assert!(registry.get("host").is_some_and(FieldEntry::is_present));
        assert!(registry.get("port").is_some_and(|entry| !entry.is_present()));
        assert_eq!(
            registry.get("port").map(FieldEntry::property_type),
            Some(PropertyType::Uint16)
        );
        assert!(registry.get("missing").is_none());
        Ok(())
    }

    #[test]
    fn unknown_tag_fails_during_build() {
        let descriptors = vec![FieldDescriptor::new("port", "port-number")];
        let result = FieldRegistry::from_descriptors(descriptors, &Listener::default());
        assert!(matches!(
            result,
            Err(ValidationError::UnknownPropertyType { ref field, ref kind })
                if field == "port" && kind == "port-number"
        ));
    }

    #[test]
    fn descriptor_without_accessor_fails() {
        let descriptors = vec![FieldDescriptor::new("timeout", "uint32")];
        let result = FieldRegistry::from_descriptors(descriptors, &Listener::default());
        assert!(matches!(result, Err(ValidationError::UnknownField { .. })));
    }

    #[test]
    fn mismatched_slot_type_fails() {
        let descriptors = vec![FieldDescriptor::new("port", "int32")];
        let result = FieldRegistry::from_descriptors(descriptors, &Listener::default());
        assert!(matches!(
            result,
            Err(ValidationError::TypeMismatch {
                declared: PropertyType::Int32,
                actual: PropertyType::Uint16,
                ..
            })
        ));
    }

    #[test]
    fn duplicate_names_fail() {
        let descriptors = vec![
            FieldDescriptor::new("port", "uint16"),
            FieldDescriptor::new("port", "uint16"),
        ];
        let result = FieldRegistry::from_descriptors(descriptors, &Listener::default());
        assert!(matches!(result, Err(ValidationError::DuplicateField { .. })));
    }

    #[test]
    fn empty_descriptor_list_builds_empty_registry() -> Result<(), ValidationError> {
        let registry = FieldRegistry::from_descriptors(Vec::new(), &Listener::default())?;
        assert!(registry.is_empty());
        Ok(())
    }
}

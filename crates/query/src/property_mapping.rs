//! Mapping of public DTO sort fields onto entity properties.

use std::any::{type_name, TypeId};
use std::collections::HashMap;

use crate::error::QueryError;
use crate::sort::parse_order_by;

/// Entity properties backing one DTO field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyMappingValue {
    destination_properties: Vec<&'static str>,
    revert: bool,
}

impl PropertyMappingValue {
    /// Map a DTO field onto one or more entity properties, in tie-break order.
    pub fn new(destination_properties: impl IntoIterator<Item = &'static str>) -> Self {
        Self {
            destination_properties: destination_properties.into_iter().collect(),
            revert: false,
        }
    }

    /// Invert the requested direction when sorting the entity properties.
    ///
    /// Used when the DTO field grows in the opposite direction of its source,
    /// e.g. `Age` ascending is `DateOfBirth` descending.
    #[must_use]
    pub fn reverted(mut self) -> Self {
        self.revert = true;
        self
    }

    pub fn destination_properties(&self) -> &[&'static str] {
        &self.destination_properties
    }

    pub fn revert(&self) -> bool {
        self.revert
    }
}

/// Sort-field mapping for one DTO/entity pair. Field lookups ignore case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyMapping {
    entries: Vec<(&'static str, PropertyMappingValue)>,
}

impl PropertyMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the mapping of a DTO field.
    #[must_use]
    pub fn with(mut self, field: &'static str, value: PropertyMappingValue) -> Self {
        self.entries
            .retain(|(existing, _)| !existing.eq_ignore_ascii_case(field));
        self.entries.push((field, value));
        self
    }

    pub fn get(&self, field: &str) -> Option<&PropertyMappingValue> {
        self.entries
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(field))
            .map(|(_, value)| value)
    }

    /// DTO fields in registration order.
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }

    /// Check that every clause of a comma-separated order-by string names a
    /// mapped field. A leading `-` marks descending order and is ignored here.
    /// Blank input is valid and means "no ordering".
    pub fn valid_mapping_exists_for(&self, order_by: &str) -> bool {
        parse_order_by(order_by)
            .iter()
            .all(|clause| self.get(clause.field).is_some())
    }
}

/// Immutable table of property mappings keyed by (DTO, entity) type pair.
///
/// Built once at startup and shared through application state.
#[derive(Debug, Default)]
pub struct PropertyMappingRegistry {
    mappings: HashMap<(TypeId, TypeId), PropertyMapping>,
}

impl PropertyMappingRegistry {
    pub fn builder() -> PropertyMappingRegistryBuilder {
        PropertyMappingRegistryBuilder::default()
    }

    /// Mapping registered for `Source` (the DTO) onto `Destination` (the entity).
    pub fn property_mapping<Source: 'static, Destination: 'static>(
        &self,
    ) -> Result<&PropertyMapping, QueryError> {
        self.mappings
            .get(&(TypeId::of::<Source>(), TypeId::of::<Destination>()))
            .ok_or(QueryError::MappingNotFound {
                source_type: type_name::<Source>(),
                destination_type: type_name::<Destination>(),
            })
    }

    pub fn valid_mapping_exists_for<Source: 'static, Destination: 'static>(
        &self,
        order_by: &str,
    ) -> Result<bool, QueryError> {
        Ok(self
            .property_mapping::<Source, Destination>()?
            .valid_mapping_exists_for(order_by))
    }
}

#[derive(Debug, Default)]
pub struct PropertyMappingRegistryBuilder {
    mappings: HashMap<(TypeId, TypeId), PropertyMapping>,
}

impl PropertyMappingRegistryBuilder {
    #[must_use]
    pub fn register<Source: 'static, Destination: 'static>(
        mut self,
        mapping: PropertyMapping,
    ) -> Self {
        self.mappings
            .insert((TypeId::of::<Source>(), TypeId::of::<Destination>()), mapping);
        self
    }

    pub fn build(self) -> PropertyMappingRegistry {
        PropertyMappingRegistry {
            mappings: self.mappings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct PersonDto;
    struct Person;
    struct Unregistered;

    fn person_mapping() -> PropertyMapping {
        PropertyMapping::new()
            .with("Id", PropertyMappingValue::new(["Id"]))
            .with("Age", PropertyMappingValue::new(["DateOfBirth"]).reverted())
            .with("Name", PropertyMappingValue::new(["FirstName", "LastName"]))
    }

    #[test]
    fn blank_order_by_is_valid() {
        let mapping = person_mapping();
        assert!(mapping.valid_mapping_exists_for(""));
        assert!(mapping.valid_mapping_exists_for("   "));
    }

    #[test]
    fn mapped_fields_are_valid_in_any_case_and_direction() {
        let mapping = person_mapping();
        assert!(mapping.valid_mapping_exists_for("Name"));
        assert!(mapping.valid_mapping_exists_for("-age, name"));
        assert!(mapping.valid_mapping_exists_for(" - Id ,Age"));
    }

    #[test]
    fn unknown_field_is_rejected() {
        let mapping = person_mapping();
        assert!(!mapping.valid_mapping_exists_for("Name,Height"));
        assert!(!mapping.valid_mapping_exists_for("-FirstName"));
        assert!(!mapping.valid_mapping_exists_for("Name,"));
    }

    #[test]
    fn with_replaces_existing_field() {
        let mapping = person_mapping().with("name", PropertyMappingValue::new(["LastName"]));
        assert_eq!(
            mapping.get("Name").map(PropertyMappingValue::destination_properties),
            Some(&["LastName"][..])
        );
        assert_eq!(mapping.fields().count(), 3);
    }

    #[test]
    fn registry_resolves_registered_pairs_only() {
        let registry = PropertyMappingRegistry::builder()
            .register::<PersonDto, Person>(person_mapping())
            .build();

        assert!(registry.property_mapping::<PersonDto, Person>().is_ok());
        assert!(registry
            .valid_mapping_exists_for::<PersonDto, Person>("-Name")
            .unwrap());

        let missing = registry.property_mapping::<Unregistered, Person>();
        assert!(matches!(missing, Err(QueryError::MappingNotFound { .. })));
    }
}

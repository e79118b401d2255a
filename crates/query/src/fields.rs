//! Field-list validation for shaped responses.

use serde_json::Value;

/// A read model whose public properties can be selected individually.
pub trait Shapeable {
    /// Public property names in declaration order.
    const PROPERTIES: &'static [&'static str];

    /// Current value of `property`, one of [`Shapeable::PROPERTIES`].
    fn property_value(&self, property: &str) -> Option<Value>;
}

/// Canonical name of the property matching `field`, ignoring case.
pub fn resolve_property<T: Shapeable>(field: &str) -> Option<&'static str> {
    T::PROPERTIES
        .iter()
        .copied()
        .find(|property| property.eq_ignore_ascii_case(field))
}

/// Split a comma-separated field list into trimmed tokens.
pub(crate) fn split_fields(fields: &str) -> impl Iterator<Item = &str> {
    fields.split(',').map(str::trim)
}

/// Whether every field of a comma-separated list names a property of `T`.
///
/// A blank list places no restriction and is always valid.
pub fn type_has_properties<T: Shapeable>(fields: &str) -> bool {
    if fields.trim().is_empty() {
        return true;
    }

    split_fields(fields).all(|field| resolve_property::<T>(field).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Gadget;

    impl Shapeable for Gadget {
        const PROPERTIES: &'static [&'static str] = &["Id", "Label", "Weight"];

        fn property_value(&self, _property: &str) -> Option<Value> {
            None
        }
    }

    #[test]
    fn blank_field_list_is_always_valid() {
        assert!(type_has_properties::<Gadget>(""));
        assert!(type_has_properties::<Gadget>(" \t "));
    }

    #[test]
    fn own_properties_match_in_any_case() {
        assert!(type_has_properties::<Gadget>("id"));
        assert!(type_has_properties::<Gadget>(" LABEL , weight,Id"));
        assert_eq!(resolve_property::<Gadget>("weight"), Some("Weight"));
    }

    #[test]
    fn unknown_property_fails() {
        assert!(!type_has_properties::<Gadget>("Id,Colour"));
        assert!(!type_has_properties::<Gadget>("Id,"));
        assert_eq!(resolve_property::<Gadget>("Colour"), None);
    }
}

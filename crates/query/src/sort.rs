//! Multi-key ordering driven by client order-by clauses.

use std::cmp::Ordering;

use crate::error::QueryError;
use crate::property_mapping::PropertyMapping;

/// One clause of an order-by string such as `-Name`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderByClause<'a> {
    pub field: &'a str,
    pub descending: bool,
}

/// Split a comma-separated order-by string into clauses.
///
/// Blank input yields no clauses. Empty tokens (`"Name,"`) are kept with an
/// empty field name so validation can reject them.
pub fn parse_order_by(order_by: &str) -> Vec<OrderByClause<'_>> {
    if order_by.trim().is_empty() {
        return Vec::new();
    }

    order_by
        .split(',')
        .map(|token| {
            let token = token.trim();
            match token.strip_prefix('-') {
                Some(field) => OrderByClause {
                    field: field.trim(),
                    descending: true,
                },
                None => OrderByClause {
                    field: token,
                    descending: false,
                },
            }
        })
        .collect()
}

/// Comparable value of an entity property.
///
/// Values of different kinds order as `Null < Integer < Text`. Text compares
/// case-insensitively first, falling back to a byte comparison so the order
/// stays total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortValue {
    Null,
    Integer(i64),
    Text(String),
}

impl SortValue {
    fn rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Integer(_) => 1,
            Self::Text(_) => 2,
        }
    }
}

impl Ord for SortValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => a
                .to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b)),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for SortValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<&str> for SortValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for SortValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

/// Entities whose properties can be targeted by a property mapping.
pub trait Sortable {
    /// Property names accepted by [`Sortable::sort_value`].
    const SORTABLE_PROPERTIES: &'static [&'static str];

    fn sort_value(&self, property: &str) -> SortValue;
}

#[derive(Debug, Clone, Copy)]
struct SortKey {
    property: &'static str,
    descending: bool,
}

impl SortKey {
    fn compare<T: Sortable>(&self, a: &T, b: &T) -> Ordering {
        let ordering = a.sort_value(self.property).cmp(&b.sort_value(self.property));
        if self.descending {
            ordering.reverse()
        } else {
            ordering
        }
    }
}

fn sort_keys<T: Sortable>(
    order_by: &str,
    mapping: &PropertyMapping,
) -> Result<Vec<SortKey>, QueryError> {
    let mut keys = Vec::new();

    for clause in parse_order_by(order_by) {
        let value = mapping
            .get(clause.field)
            .ok_or_else(|| QueryError::UnmappedSortField(clause.field.to_string()))?;
        let descending = clause.descending != value.revert();

        for &property in value.destination_properties() {
            let property = T::SORTABLE_PROPERTIES
                .iter()
                .copied()
                .find(|candidate| *candidate == property)
                .ok_or(QueryError::UnsupportedSortProperty(property))?;
            keys.push(SortKey {
                property,
                descending,
            });
        }
    }

    Ok(keys)
}

/// Order `items` by the clauses of `order_by`, translated through `mapping`.
///
/// The first clause is the primary key and each later clause breaks ties; a
/// field mapped onto several properties contributes each of them in turn.
/// The sort is stable and a blank `order_by` leaves `items` untouched.
///
/// Fields must have been checked with
/// [`PropertyMapping::valid_mapping_exists_for`] beforehand; an unmapped field
/// here is reported as [`QueryError::UnmappedSortField`].
pub fn apply_sort<T: Sortable>(
    items: &mut [T],
    order_by: &str,
    mapping: &PropertyMapping,
) -> Result<(), QueryError> {
    let keys = sort_keys::<T>(order_by, mapping)?;
    if keys.is_empty() {
        return Ok(());
    }

    items.sort_by(|a, b| {
        keys.iter()
            .fold(Ordering::Equal, |ordering, key| {
                ordering.then_with(|| key.compare(a, b))
            })
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property_mapping::PropertyMappingValue;

    #[derive(Debug, Clone, PartialEq)]
    struct Person {
        first: &'static str,
        last: &'static str,
        born: i64,
    }

    impl Sortable for Person {
        const SORTABLE_PROPERTIES: &'static [&'static str] = &["FirstName", "LastName", "Born"];

        fn sort_value(&self, property: &str) -> SortValue {
            match property {
                "FirstName" => self.first.into(),
                "LastName" => self.last.into(),
                "Born" => self.born.into(),
                _ => SortValue::Null,
            }
        }
    }

    fn mapping() -> PropertyMapping {
        PropertyMapping::new()
            .with("Name", PropertyMappingValue::new(["FirstName", "LastName"]))
            .with("Age", PropertyMappingValue::new(["Born"]).reverted())
            .with("Surname", PropertyMappingValue::new(["LastName"]))
    }

    fn people() -> Vec<Person> {
        vec![
            Person { first: "Bob", last: "Young", born: 1980 },
            Person { first: "Carol", last: "Adams", born: 1950 },
            Person { first: "Alice", last: "Zimmer", born: 1990 },
            Person { first: "Bob", last: "Adams", born: 1970 },
        ]
    }

    fn firsts(people: &[Person]) -> Vec<&'static str> {
        people.iter().map(|p| p.first).collect()
    }

    #[test]
    fn parses_direction_and_whitespace() {
        let clauses = parse_order_by(" -Name , age");
        assert_eq!(
            clauses,
            vec![
                OrderByClause { field: "Name", descending: true },
                OrderByClause { field: "age", descending: false },
            ]
        );
        assert!(parse_order_by("  ").is_empty());
    }

    #[test]
    fn descending_name_reverses_order() {
        let mut items = vec![
            Person { first: "Alice", last: "A", born: 1 },
            Person { first: "Bob", last: "B", born: 2 },
            Person { first: "Carol", last: "C", born: 3 },
        ];
        apply_sort(&mut items, "-Name", &mapping()).unwrap();
        assert_eq!(firsts(&items), ["Carol", "Bob", "Alice"]);
    }

    #[test]
    fn multi_property_field_sorts_each_property_in_turn() {
        let mut items = people();
        apply_sort(&mut items, "Name", &mapping()).unwrap();
        assert_eq!(
            items.iter().map(|p| (p.first, p.last)).collect::<Vec<_>>(),
            vec![("Alice", "Zimmer"), ("Bob", "Adams"), ("Bob", "Young"), ("Carol", "Adams")]
        );
    }

    #[test]
    fn reverted_field_inverts_direction() {
        let mut items = people();
        apply_sort(&mut items, "Age", &mapping()).unwrap();
        assert_eq!(items.iter().map(|p| p.born).collect::<Vec<_>>(), [1990, 1980, 1970, 1950]);

        apply_sort(&mut items, "-age", &mapping()).unwrap();
        assert_eq!(items.iter().map(|p| p.born).collect::<Vec<_>>(), [1950, 1970, 1980, 1990]);
    }

    #[test]
    fn later_clauses_break_ties() {
        let mut items = people();
        apply_sort(&mut items, "Surname, -Age", &mapping()).unwrap();
        assert_eq!(
            items.iter().map(|p| (p.first, p.born)).collect::<Vec<_>>(),
            vec![("Carol", 1950), ("Bob", 1970), ("Bob", 1980), ("Alice", 1990)]
        );
    }

    #[test]
    fn blank_order_by_keeps_input_order() {
        let mut items = people();
        apply_sort(&mut items, "", &mapping()).unwrap();
        assert_eq!(items, people());
    }

    #[test]
    fn unmapped_field_is_a_configuration_error() {
        let mut items = people();
        let err = apply_sort(&mut items, "Height", &mapping()).unwrap_err();
        assert!(matches!(err, QueryError::UnmappedSortField(field) if field == "Height"));
    }

    #[test]
    fn mapping_to_unknown_entity_property_fails() {
        let mapping = PropertyMapping::new().with("Shoe", PropertyMappingValue::new(["ShoeSize"]));
        let mut items = people();
        let err = apply_sort(&mut items, "Shoe", &mapping).unwrap_err();
        assert!(matches!(err, QueryError::UnsupportedSortProperty("ShoeSize")));
    }

    #[test]
    fn sort_values_order_across_kinds() {
        assert!(SortValue::Null < SortValue::Integer(-5));
        assert!(SortValue::Integer(i64::MAX) < SortValue::Text(String::new()));
        assert!(SortValue::from("apple") < SortValue::from("Banana"));
        assert_ne!(SortValue::from("a").cmp(&SortValue::from("A")), Ordering::Equal);
    }
}

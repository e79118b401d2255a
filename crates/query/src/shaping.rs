//! Projection of read models onto client-selected fields.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::error::QueryError;
use crate::fields::{resolve_property, split_fields, Shapeable};

/// A dynamically-keyed record produced by shaping.
///
/// Serializes as a JSON object whose keys appear in insertion order, so the
/// shape of a response follows the field list the client asked for.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ShapedRecord(IndexMap<String, Value>);

impl ShapedRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, keeping the original position if the key exists.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    /// Serialize `value` and insert it under `key`.
    pub fn insert_serialized<V: Serialize + ?Sized>(
        &mut self,
        key: impl Into<String>,
        value: &V,
    ) -> Result<(), QueryError> {
        self.insert(key, serde_json::to_value(value)?);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> IndexMap<String, Value> {
        self.0
    }
}

/// Shaping of a single read model.
pub trait ShapeData {
    /// Project onto a comma-separated field list. A blank list selects every
    /// property in declaration order; otherwise properties appear in list
    /// order under their canonical names.
    fn shape_data(&self, fields: &str) -> Result<ShapedRecord, QueryError>;
}

impl<T: Shapeable> ShapeData for T {
    fn shape_data(&self, fields: &str) -> Result<ShapedRecord, QueryError> {
        let mut record = ShapedRecord::new();

        if fields.trim().is_empty() {
            for &property in T::PROPERTIES {
                record.insert(property, read_property(self, property)?);
            }
            return Ok(record);
        }

        for field in split_fields(fields) {
            let property = resolve_property::<T>(field).ok_or_else(|| unknown::<T>(field))?;
            record.insert(property, read_property(self, property)?);
        }

        Ok(record)
    }
}

/// Shape every item of a collection with the same field list.
pub fn shape_collection<'a, T, I>(items: I, fields: &str) -> Result<Vec<ShapedRecord>, QueryError>
where
    T: Shapeable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    items.into_iter().map(|item| item.shape_data(fields)).collect()
}

fn read_property<T: Shapeable>(item: &T, property: &str) -> Result<Value, QueryError> {
    item.property_value(property)
        .ok_or_else(|| unknown::<T>(property))
}

fn unknown<T>(field: &str) -> QueryError {
    QueryError::UnknownProperty {
        field: field.to_string(),
        type_name: std::any::type_name::<T>(),
    }
}

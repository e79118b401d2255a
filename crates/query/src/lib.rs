//! Resource query pipeline for Libris.
//!
//! Translates the generic list parameters of a request (order-by clause,
//! field list, paging) into operations over typed collections, and reshapes
//! the results into dynamically-keyed records decorated with links.

pub mod error;
pub mod fields;
pub mod links;
pub mod paging;
pub mod property_mapping;
pub mod shaping;
pub mod sort;

pub use error::QueryError;
pub use fields::{resolve_property, type_has_properties, Shapeable};
pub use links::{Link, LinkedCollection, ResourceUriType};
pub use paging::PagedList;
pub use property_mapping::{PropertyMapping, PropertyMappingRegistry, PropertyMappingValue};
pub use shaping::{shape_collection, ShapeData, ShapedRecord};
pub use sort::{apply_sort, parse_order_by, OrderByClause, SortValue, Sortable};

//! Catalog store for Libris.
//!
//! Holds the author and book entities, the list parameters accepted by the
//! authors collection, and the [`LibraryRepository`] contract with its
//! in-memory implementation.

pub mod entities;
pub mod module;
pub mod params;
pub mod repository;
pub mod seed;

pub use entities::{Author, Book, NewAuthor, NewBook};
pub use module::StoreModule;
pub use params::AuthorsResourceParameters;
pub use repository::{
    InMemoryLibraryRepository, LibraryRepository, RepositoryError, RepositoryResult,
};
pub use seed::seed_sample_catalog;

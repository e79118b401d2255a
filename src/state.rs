use std::sync::Arc;

use libris_db::{Author, LibraryRepository};
use libris_kernel::Settings;
use libris_query::PropertyMappingRegistry;

use crate::modules::authors::models::{author_property_mapping, AuthorDto};

/// Shared state handed to every resource module's router.
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn LibraryRepository>,
    pub property_mappings: Arc<PropertyMappingRegistry>,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(repository: Arc<dyn LibraryRepository>, settings: Settings) -> Self {
        let property_mappings = PropertyMappingRegistry::builder()
            .register::<AuthorDto, Author>(author_property_mapping())
            .build();

        Self {
            repository,
            property_mappings: Arc::new(property_mappings),
            settings: Arc::new(settings),
        }
    }
}

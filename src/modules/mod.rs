pub mod author_collections;
pub mod authors;
pub mod books;
pub mod root;

use libris_kernel::ModuleRegistry;

use crate::state::AppState;

/// Register all resource modules with the registry
pub fn register_all(registry: &mut ModuleRegistry, state: &AppState) {
    registry.register_custom(root::create_module(state.clone()));
    registry.register_custom(authors::create_module(state.clone()));
    registry.register_custom(author_collections::create_module(state.clone()));
    registry.register_custom(books::create_module(state.clone()));
}

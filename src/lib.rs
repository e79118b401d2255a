//! Libris application library
//!
//! Resource modules of the authors and books catalog, wired onto the Libris
//! kernel and HTTP crates.

pub mod extract;
pub mod hypermedia;
pub mod modules;
pub mod state;

pub use modules::register_all;
pub use state::AppState;

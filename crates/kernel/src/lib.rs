//! Module lifecycle and layered settings shared by every Libris crate.

pub mod module;
pub mod registry;
pub mod settings;

pub use module::{InitCtx, Module};
pub use registry::ModuleRegistry;
pub use settings::{
    DatabaseSettings, Environment, LogFormat, ServerSettings, Settings, TelemetrySettings,
};

use async_trait::async_trait;
use axum::Router;

/// Context provided to modules during initialization
pub struct InitCtx<'a> {
    pub settings: &'a crate::settings::Settings,
}

/// Lifecycle and routing contract for a Libris module
#[async_trait]
pub trait Module: Sync + Send {
    /// Unique name for this module
    fn name(&self) -> &'static str;

    /// Path the module's routes are nested under.
    ///
    /// Defaults to `/api/{name}`. Modules without HTTP routes return `None`.
    fn base_path(&self) -> Option<String> {
        Some(format!("/api/{}", self.name()))
    }

    /// Initialize the module with the provided context
    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Return the Axum router for this module's routes, relative to
    /// [`Module::base_path`]
    fn routes(&self) -> Router {
        Router::new()
    }

    /// Return OpenAPI paths fragment for this module as JSON
    /// Paths are relative to the base path and merged with other modules'
    fn openapi(&self) -> Option<serde_json::Value> {
        None
    }

    /// Start background tasks for this module
    /// Called once every module is initialized
    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Stop the module and clean up resources
    /// Called during application shutdown
    async fn stop(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

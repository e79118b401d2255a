use std::sync::Arc;

use anyhow::Context;
use libris_app::{register_all, AppState};
use libris_db::{InMemoryLibraryRepository, LibraryRepository, StoreModule};
use libris_kernel::{InitCtx, ModuleRegistry, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load Libris settings")?;
    libris_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        address = %settings.server.bind_address(),
        "libris-app bootstrap starting"
    );

    let repository: Arc<dyn LibraryRepository> = Arc::new(InMemoryLibraryRepository::new());
    let state = AppState::new(Arc::clone(&repository), settings.clone());

    let mut registry = ModuleRegistry::new();
    registry.register_core(Arc::new(StoreModule::new(repository)));
    register_all(&mut registry, &state);

    let ctx = InitCtx {
        settings: &settings,
    };
    registry.init_core_modules(&ctx).await?;
    registry.init_custom_modules(&ctx).await?;
    registry.start_core_modules(&ctx).await?;
    registry.start_custom_modules(&ctx).await?;

    tracing::info!(
        core = registry.core_module_count(),
        custom = registry.custom_module_count(),
        "libris-app bootstrap complete"
    );

    let served = libris_http::start_server(&registry, &settings).await;

    registry.stop_custom_modules().await?;
    registry.stop_core_modules().await?;

    served
}

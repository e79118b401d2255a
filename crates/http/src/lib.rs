//! HTTP server facade for Libris with Axum, error handling, and OpenAPI support.

use anyhow::Context;
use axum::{extract::Request, http::HeaderValue, routing::get, Router};
use tokio::signal;
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::{Timestamp, Uuid};

use libris_kernel::{ModuleRegistry, Settings};

pub mod error;
pub mod router;

pub use error::{AppError, AppResult};
use router::RouterBuilder;

/// Start the HTTP server with the given module registry and serve until a
/// shutdown signal arrives
pub async fn start_server(registry: &ModuleRegistry, settings: &Settings) -> anyhow::Result<()> {
    let address = settings.server.bind_address();
    tracing::info!("starting HTTP server on {}", address);

    let app = build_router(registry, settings);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind to address {}", address))?;

    tracing::info!("HTTP server listening on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    tracing::info!("HTTP server stopped");

    Ok(())
}

/// Build the main HTTP router with all module routes mounted
pub fn build_router(registry: &ModuleRegistry, settings: &Settings) -> Router {
    let mut router_builder = RouterBuilder::new().route("/healthz", get(health_check));

    for module in registry.modules() {
        let Some(base_path) = module.base_path() else {
            continue;
        };

        tracing::info!(
            module = module.name(),
            "mounting module routes under {}",
            base_path
        );
        router_builder = router_builder.mount_module(&base_path, module.routes());
    }

    // Layers wrap only the routes registered before them.
    router_builder
        .with_openapi(registry)
        .with_catch_panic()
        .with_tracing()
        .with_cors()
        .with_request_id()
        .with_timeout(settings.server.request_timeout_ms)
        .build()
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "ok"
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!(%error, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                tracing::error!(%error, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received SIGINT, starting graceful shutdown"),
        _ = terminate => tracing::info!("received SIGTERM, starting graceful shutdown"),
    }
}

/// Request ID generator producing time-ordered UUIDs
#[derive(Clone, Copy, Default)]
pub struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let timestamp = Timestamp::now(uuid::NoContext);
        let request_id = Uuid::new_v7(timestamp)
            .to_string()
            .parse::<HeaderValue>()
            .ok()?;
        Some(RequestId::new(request_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::StatusCode,
    };
    use libris_kernel::Module;
    use tower::ServiceExt;

    struct FaultyModule;

    async fn faulty() -> &'static str {
        panic!("catalog invariant broken")
    }

    #[async_trait]
    impl Module for FaultyModule {
        fn name(&self) -> &'static str {
            "faulty"
        }

        fn routes(&self) -> Router {
            Router::new().route("/", get(faulty))
        }
    }

    #[tokio::test]
    async fn test_module_panic_is_answered_with_internal_error() {
        let mut registry = ModuleRegistry::new();
        registry.register_custom(Arc::new(FaultyModule));
        let router = build_router(&registry, &Settings::default());

        let response = router
            .oneshot(axum::http::Request::get("/api/faulty").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["message"], error::INTERNAL_ERROR_MESSAGE);
        assert_eq!(json["error"]["details"], serde_json::json!([]));
    }
}

use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;

use libris_kernel::{InitCtx, Module};

use crate::repository::LibraryRepository;
use crate::seed::seed_sample_catalog;

/// Core module owning the catalog store lifecycle.
pub struct StoreModule {
    repository: Arc<dyn LibraryRepository>,
}

impl StoreModule {
    pub fn new(repository: Arc<dyn LibraryRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl Module for StoreModule {
    fn name(&self) -> &'static str {
        "db"
    }

    fn base_path(&self) -> Option<String> {
        None
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        if !ctx.settings.database.seed {
            tracing::info!(module = self.name(), "starting with an empty catalog");
            return Ok(());
        }

        seed_sample_catalog(self.repository.as_ref())
            .await
            .context("failed to seed sample catalog")?;
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "catalog store released");
        Ok(())
    }
}

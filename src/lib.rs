//! Bookshelf application library
//!
//! Wires the books module onto the kernel, database and HTTP crates.

pub mod modules;
pub mod utils;

#[cfg(test)]
mod test_support;

/// Re-export commonly used types
pub use modules::*;

use std::sync::Arc;

use anyhow::Context;
use bookshelf_kernel::settings::{DatabaseDriver, Settings};
use bookshelf_kernel::{InitCtx, ModuleRegistry};
use sqlx::MySqlPool;

use modules::books::repository::{BookRepository, InMemoryBookRepository, MySqlBookRepository};

/// Core and custom modules wired to the configured store.
pub struct Application {
    pub registry: ModuleRegistry,
    pool: Option<MySqlPool>,
}

impl Application {
    /// Connect to the store named by `database.driver` and register modules.
    pub async fn build(settings: &Settings) -> anyhow::Result<Self> {
        let mut registry = ModuleRegistry::new();

        let (repository, pool) = match settings.database.driver {
            DatabaseDriver::Mysql => {
                let pool = bookshelf_db::connect(&settings.database).await?;
                registry.register_core(bookshelf_db::create_module(pool.clone()));
                let repository: Arc<dyn BookRepository> =
                    Arc::new(MySqlBookRepository::new(pool.clone()));
                (repository, Some(pool))
            }
            DatabaseDriver::Memory => {
                tracing::warn!("using the in-memory book store; data is lost on exit");
                let repository: Arc<dyn BookRepository> = Arc::new(InMemoryBookRepository::new());
                (repository, None)
            }
        };

        modules::register_all(&mut registry, repository, settings);

        tracing::info!(
            core = registry.core_module_count(),
            custom = registry.custom_module_count(),
            "modules registered"
        );

        Ok(Self { registry, pool })
    }

    /// Apply every module's table definitions. No-op for the in-memory store.
    pub async fn apply_schema(&self) -> anyhow::Result<()> {
        match &self.pool {
            Some(pool) => bookshelf_db::apply_schema(pool, &self.registry.collect_schema()).await,
            None => Ok(()),
        }
    }

    pub async fn init(&self, settings: &Settings) -> anyhow::Result<()> {
        let ctx = InitCtx { settings };
        self.registry.init_core_modules(&ctx).await?;
        self.registry.init_custom_modules(&ctx).await?;
        self.apply_schema().await?;
        self.registry.start_core_modules(&ctx).await?;
        self.registry.start_custom_modules(&ctx).await?;
        Ok(())
    }

    pub async fn shutdown(&self) -> anyhow::Result<()> {
        self.registry.stop_custom_modules().await?;
        self.registry.stop_core_modules().await?;
        Ok(())
    }
}

/// Run the service until a shutdown signal arrives.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let app = Application::build(&settings).await?;
    app.init(&settings)
        .await
        .context("module startup failed")?;

    let served = bookshelf_http::start_server(
        &app.registry,
        &settings,
        bookshelf_http::shutdown_signal(),
    )
    .await;

    // Stop modules even when the server failed, so the pool is closed.
    let stopped = app.shutdown().await;
    served?;
    stopped
}

/// Create the tables and exit.
pub async fn init_db(settings: Settings) -> anyhow::Result<()> {
    if settings.database.driver == DatabaseDriver::Memory {
        anyhow::bail!("init-db needs database.driver = \"mysql\"");
    }

    let app = Application::build(&settings).await?;
    app.apply_schema().await.context("schema bootstrap failed")?;
    app.shutdown().await
}

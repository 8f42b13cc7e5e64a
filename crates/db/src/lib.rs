//! MySQL pool factory and schema bootstrap for bookshelf.
//!
//! The pool is created once at startup and handed to modules explicitly;
//! nothing in this crate keeps global state.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use bookshelf_kernel::settings::DatabaseSettings;
use bookshelf_kernel::{InitCtx, Module, SchemaDefinition};
use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};
use sqlx::MySqlPool;

/// Build connection options from settings.
pub fn connect_options(settings: &DatabaseSettings) -> MySqlConnectOptions {
    MySqlConnectOptions::new()
        .host(&settings.host)
        .port(settings.port)
        .username(&settings.user)
        .password(&settings.password)
        .database(&settings.name)
}

/// Open a MySQL connection pool.
///
/// Fails fast when the server is unreachable so startup errors surface
/// before the HTTP listener binds.
pub async fn connect(settings: &DatabaseSettings) -> anyhow::Result<MySqlPool> {
    tracing::info!(
        target: "bookshelf-db",
        host = %settings.host,
        port = settings.port,
        database = %settings.name,
        max_connections = settings.max_connections,
        "connecting to MySQL"
    );

    MySqlPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(Duration::from_millis(settings.acquire_timeout_ms))
        .connect_with(connect_options(settings))
        .await
        .with_context(|| {
            format!(
                "failed to connect to MySQL at {}:{}/{}",
                settings.host, settings.port, settings.name
            )
        })
}

/// Execute schema definitions in the order given.
pub async fn apply_schema(
    pool: &MySqlPool,
    definitions: &[(String, SchemaDefinition)],
) -> anyhow::Result<()> {
    for (module, definition) in definitions {
        tracing::info!(
            target: "bookshelf-db",
            module = %module,
            schema = definition.id,
            "applying schema definition"
        );

        sqlx::raw_sql(definition.ddl)
            .execute(pool)
            .await
            .with_context(|| {
                format!(
                    "failed to apply schema '{}' for module '{}'",
                    definition.id, module
                )
            })?;
    }

    tracing::info!(
        target: "bookshelf-db",
        count = definitions.len(),
        "schema bootstrap complete"
    );
    Ok(())
}

/// Core module owning the pool lifecycle.
pub struct DatabaseModule {
    pool: MySqlPool,
}

impl DatabaseModule {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Module for DatabaseModule {
    fn name(&self) -> &'static str {
        "db"
    }

    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .context("database ping failed")?;
        tracing::info!(module = self.name(), "database reachable");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        self.pool.close().await;
        tracing::info!(module = self.name(), "database pool closed");
        Ok(())
    }
}

/// Create the core database module.
pub fn create_module(pool: MySqlPool) -> Arc<dyn Module> {
    Arc::new(DatabaseModule::new(pool))
}

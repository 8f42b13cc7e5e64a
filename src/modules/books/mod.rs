pub mod images;
pub mod models;
pub mod repository;
pub mod routes;

mod openapi;

use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use axum::Router;
use bookshelf_kernel::{InitCtx, Module, SchemaDefinition};

use images::ImageStore;
use repository::BookRepository;
use routes::BooksState;

/// DDL for the single table backing the catalogue.
pub const BOOKS_TABLE_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS books (
        book_id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
        book_name VARCHAR(255) NOT NULL,
        book_description TEXT NOT NULL,
        genre VARCHAR(255) NOT NULL,
        book_image VARCHAR(512) NOT NULL
    )
"#;

/// Books module: catalogue CRUD plus cover uploads
pub struct BooksModule {
    state: BooksState,
}

impl BooksModule {
    pub fn new(repository: Arc<dyn BookRepository>, images: ImageStore) -> Self {
        Self {
            state: BooksState { repository, images },
        }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        self.state.images.ensure_dir().await.with_context(|| {
            format!(
                "failed to create image directory {}",
                self.state.images.dir().display()
            )
        })?;

        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            image_dir = %self.state.images.dir().display(),
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.state.clone())
    }

    fn base_path(&self) -> String {
        "/".to_string()
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(openapi::fragment())
    }

    fn schema(&self) -> Vec<SchemaDefinition> {
        vec![SchemaDefinition {
            id: "001_books",
            ddl: BOOKS_TABLE_DDL,
        }]
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Create a new instance of the books module
pub fn create_module(repository: Arc<dyn BookRepository>, images: ImageStore) -> Arc<dyn Module> {
    Arc::new(BooksModule::new(repository, images))
}

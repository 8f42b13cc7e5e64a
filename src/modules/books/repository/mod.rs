//! Persistence gateway for books.
//!
//! Handlers only see [`BookRepository`]; the concrete store is picked at
//! startup from `database.driver`.

mod memory;
mod mysql;

pub use memory::InMemoryBookRepository;
pub use mysql::MySqlBookRepository;

use async_trait::async_trait;

use super::models::{Book, BookId, BookPatch, NewBook};

#[derive(thiserror::Error, Debug)]
pub enum BookStoreError {
    #[error("Book with ID {0} not found")]
    NotFound(BookId),

    #[error("database failure: {0}")]
    Persistence(#[from] sqlx::Error),
}

#[async_trait]
pub trait BookRepository: Send + Sync {
    /// All books in storage order
    async fn list_books(&self) -> Result<Vec<Book>, BookStoreError>;

    /// Fails with [`BookStoreError::NotFound`] when no row matches
    async fn get_book(&self, book_id: BookId) -> Result<Book, BookStoreError>;

    /// Inserts the book and returns the record as the store persisted it
    async fn create_book(&self, book: NewBook) -> Result<Book, BookStoreError>;

    /// Coalesce update: absent fields keep their stored value.
    /// Fails with [`BookStoreError::NotFound`] when the id does not exist.
    async fn update_book(&self, book_id: BookId, patch: BookPatch) -> Result<(), BookStoreError>;

    /// Returns the number of deleted rows (0 or 1); zero is not an error here
    async fn delete_book(&self, book_id: BookId) -> Result<u64, BookStoreError>;
}

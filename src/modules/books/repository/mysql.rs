use async_trait::async_trait;
use sqlx::MySqlPool;

use super::{BookRepository, BookStoreError};
use crate::modules::books::models::{Book, BookId, BookPatch, NewBook};

const SELECT_BOOKS: &str =
    "SELECT book_id, book_name, book_description, genre, book_image FROM books";

const SELECT_BOOK_BY_ID: &str = "SELECT book_id, book_name, book_description, genre, book_image \
     FROM books WHERE book_id = ?";

const INSERT_BOOK: &str = "INSERT INTO books (book_name, book_description, genre, book_image) \
     VALUES (?, ?, ?, ?)";

const UPDATE_BOOK: &str = r#"
    UPDATE books
    SET
        book_name = COALESCE(?, book_name),
        book_description = COALESCE(?, book_description),
        genre = COALESCE(?, genre),
        book_image = COALESCE(?, book_image)
    WHERE book_id = ?
"#;

const BOOK_EXISTS: &str = "SELECT 1 FROM books WHERE book_id = ?";

const DELETE_BOOK: &str = "DELETE FROM books WHERE book_id = ?";

/// Book store backed by the shared MySQL pool.
///
/// Every call checks a connection out of the pool and returns it when the
/// statement completes, whether it succeeded or not.
#[derive(Clone)]
pub struct MySqlBookRepository {
    pool: MySqlPool,
}

impl MySqlBookRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn exists(&self, book_id: BookId) -> Result<bool, sqlx::Error> {
        let row: Option<(i64,)> = sqlx::query_as(BOOK_EXISTS)
            .bind(book_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }
}

fn persistence_failure(
    operation: &'static str,
    book_id: Option<BookId>,
    error: sqlx::Error,
) -> BookStoreError {
    tracing::error!(operation, book_id, error = %error, "book store query failed");
    BookStoreError::Persistence(error)
}

#[async_trait]
impl BookRepository for MySqlBookRepository {
    async fn list_books(&self) -> Result<Vec<Book>, BookStoreError> {
        sqlx::query_as::<_, Book>(SELECT_BOOKS)
            .fetch_all(&self.pool)
            .await
            .map_err(|error| persistence_failure("list_books", None, error))
    }

    async fn get_book(&self, book_id: BookId) -> Result<Book, BookStoreError> {
        sqlx::query_as::<_, Book>(SELECT_BOOK_BY_ID)
            .bind(book_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|error| persistence_failure("get_book", Some(book_id), error))?
            .ok_or(BookStoreError::NotFound(book_id))
    }

    async fn create_book(&self, book: NewBook) -> Result<Book, BookStoreError> {
        let result = sqlx::query(INSERT_BOOK)
            .bind(book.book_name)
            .bind(book.book_description)
            .bind(book.genre)
            .bind(book.book_image)
            .execute(&self.pool)
            .await
            .map_err(|error| persistence_failure("create_book", None, error))?;

        let book_id = result.last_insert_id() as BookId;
        tracing::debug!(book_id, "book inserted");

        // Read back so the caller sees exactly what the store holds.
        match self.get_book(book_id).await {
            Ok(book) => Ok(book),
            Err(BookStoreError::NotFound(id)) => Err(persistence_failure(
                "create_book",
                Some(id),
                sqlx::Error::RowNotFound,
            )),
            Err(error) => Err(error),
        }
    }

    async fn update_book(&self, book_id: BookId, patch: BookPatch) -> Result<(), BookStoreError> {
        let result = sqlx::query(UPDATE_BOOK)
            .bind(patch.book_name)
            .bind(patch.book_description)
            .bind(patch.genre)
            .bind(patch.book_image)
            .bind(book_id)
            .execute(&self.pool)
            .await
            .map_err(|error| persistence_failure("update_book", Some(book_id), error))?;

        if result.rows_affected() > 0 {
            return Ok(());
        }

        // Zero affected rows also happens when every supplied value equals
        // the stored one, so tell that apart from a missing id.
        let exists = self
            .exists(book_id)
            .await
            .map_err(|error| persistence_failure("update_book", Some(book_id), error))?;

        if exists {
            Ok(())
        } else {
            Err(BookStoreError::NotFound(book_id))
        }
    }

    async fn delete_book(&self, book_id: BookId) -> Result<u64, BookStoreError> {
        let result = sqlx::query(DELETE_BOOK)
            .bind(book_id)
            .execute(&self.pool)
            .await
            .map_err(|error| persistence_failure("delete_book", Some(book_id), error))?;

        Ok(result.rows_affected())
    }
}

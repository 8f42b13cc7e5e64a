//! HTTP handlers for the books module.

mod form;

use form::BookForm;

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use bookshelf_http::error::AppError;

use super::images::ImageStore;
use super::models::{Book, BookId, NewBook, UpdateConfirmation};
use super::repository::{BookRepository, BookStoreError};

const MISSING_FIELDS: &str =
    "All fields (book_name, book_description, genre, book_image) are required";
const NO_FIELDS: &str = "No fields provided to update";

/// Dependencies shared by every books handler.
#[derive(Clone)]
pub struct BooksState {
    pub repository: Arc<dyn BookRepository>,
    pub images: ImageStore,
}

/// Routes are mounted at the root, not under `/api/books`, to keep the
/// public URLs clients already use.
pub fn router(state: BooksState) -> Router {
    Router::new()
        .route("/books", get(list_books))
        .route("/books/{id}", get(get_book))
        .route("/createBookWithImage", post(create_book_with_image))
        .route("/updateBookById/{book_id}", put(update_book_by_id))
        .route("/deleteBookById/{id}", delete(delete_book_by_id))
        .with_state(state)
}

fn not_found(raw_id: &str) -> AppError {
    AppError::not_found(format!("Book with ID {} not found", raw_id))
}

/// A path segment that is not an integer cannot name a stored book.
fn parse_book_id(raw_id: &str) -> Result<BookId, AppError> {
    raw_id.parse().map_err(|_| not_found(raw_id))
}

fn store_failure(raw_id: &str, error: BookStoreError, summary: String) -> AppError {
    match error {
        BookStoreError::NotFound(_) => not_found(raw_id),
        other => AppError::internal(summary, other),
    }
}

async fn list_books(State(state): State<BooksState>) -> Result<Json<Vec<Book>>, AppError> {
    let books = state
        .repository
        .list_books()
        .await
        .map_err(|error| AppError::internal("Error retrieving books", error))?;

    Ok(Json(books))
}

async fn get_book(
    State(state): State<BooksState>,
    Path(id): Path<String>,
) -> Result<Json<Book>, AppError> {
    let book_id = parse_book_id(&id)?;

    let book = state
        .repository
        .get_book(book_id)
        .await
        .map_err(|error| {
            store_failure(&id, error, format!("Error retrieving book with ID {}", id))
        })?;

    Ok(Json(book))
}

async fn create_book_with_image(
    State(state): State<BooksState>,
    form: BookForm,
) -> Result<(StatusCode, Json<Book>), AppError> {
    const FAILURE: &str = "Error creating book with image";

    let (Some(book_name), Some(book_description), Some(genre), Some(upload)) = (
        form.book_name,
        form.book_description,
        form.genre,
        form.book_image,
    ) else {
        return Err(AppError::validation(MISSING_FIELDS));
    };

    let book_image = state
        .images
        .save(&upload)
        .await
        .map_err(|error| AppError::internal(FAILURE, error))?;

    let book = state
        .repository
        .create_book(NewBook {
            book_name,
            book_description,
            genre,
            book_image,
        })
        .await
        .map_err(|error| AppError::internal(FAILURE, error))?;

    tracing::info!(book_id = book.book_id, "book created");
    Ok((StatusCode::CREATED, Json(book)))
}

async fn update_book_by_id(
    State(state): State<BooksState>,
    Path(id): Path<String>,
    form: BookForm,
) -> Result<Json<UpdateConfirmation>, AppError> {
    let (mut patch, upload) = form.into_parts();
    if patch.is_empty() && upload.is_none() {
        return Err(AppError::validation(NO_FIELDS));
    }

    let book_id = parse_book_id(&id)?;
    let failure = || format!("Error updating book with ID {}", id);

    if let Some(upload) = upload {
        let book_image = state
            .images
            .save(&upload)
            .await
            .map_err(|error| AppError::internal(failure(), error))?;
        patch.book_image = Some(book_image);
    }

    state
        .repository
        .update_book(book_id, patch)
        .await
        .map_err(|error| store_failure(&id, error, failure()))?;

    tracing::info!(book_id, "book updated");
    Ok(Json(UpdateConfirmation {
        message: format!("Book with ID {} updated successfully", id),
    }))
}

async fn delete_book_by_id(
    State(state): State<BooksState>,
    Path(id): Path<String>,
) -> Result<String, AppError> {
    let book_id = parse_book_id(&id)?;

    let deleted = state
        .repository
        .delete_book(book_id)
        .await
        .map_err(|error| {
            store_failure(&id, error, format!("Error deleting book with ID {}", id))
        })?;

    if deleted == 0 {
        return Err(not_found(&id));
    }

    tracing::info!(book_id, "book deleted");
    Ok(format!("Book with ID {} deleted successfully", id))
}

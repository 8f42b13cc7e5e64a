use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{BookRepository, BookStoreError};
use crate::modules::books::models::{Book, BookId, BookPatch, NewBook};

/// Process-local book store.
///
/// Used by tests and by `database.driver = "memory"`. Ids start at 1 and are
/// never handed out twice, even after deletes.
#[derive(Default)]
pub struct InMemoryBookRepository {
    state: RwLock<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    books: BTreeMap<BookId, Book>,
    last_id: BookId,
}

impl InMemoryBookRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn list_books(&self) -> Result<Vec<Book>, BookStoreError> {
        let state = self.state.read().await;
        Ok(state.books.values().cloned().collect())
    }

    async fn get_book(&self, book_id: BookId) -> Result<Book, BookStoreError> {
        let state = self.state.read().await;
        state
            .books
            .get(&book_id)
            .cloned()
            .ok_or(BookStoreError::NotFound(book_id))
    }

    async fn create_book(&self, book: NewBook) -> Result<Book, BookStoreError> {
        let mut state = self.state.write().await;
        state.last_id += 1;
        let book = Book {
            book_id: state.last_id,
            book_name: book.book_name,
            book_description: book.book_description,
            genre: book.genre,
            book_image: book.book_image,
        };
        state.books.insert(book.book_id, book.clone());
        Ok(book)
    }

    async fn update_book(&self, book_id: BookId, patch: BookPatch) -> Result<(), BookStoreError> {
        let mut state = self.state.write().await;
        let book = state
            .books
            .get_mut(&book_id)
            .ok_or(BookStoreError::NotFound(book_id))?;
        patch.apply_to(book);
        Ok(())
    }

    async fn delete_book(&self, book_id: BookId) -> Result<u64, BookStoreError> {
        let mut state = self.state.write().await;
        Ok(state.books.remove(&book_id).map_or(0, |_| 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_book(name: &str) -> NewBook {
        NewBook {
            book_name: name.to_string(),
            book_description: format!("{name} description"),
            genre: "Fiction".to_string(),
            book_image: format!("/book_images/{name}.png"),
        }
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let repo = InMemoryBookRepository::new();
        let first = repo.create_book(new_book("first")).await.unwrap();
        assert_eq!(repo.delete_book(first.book_id).await.unwrap(), 1);

        let second = repo.create_book(new_book("second")).await.unwrap();
        assert!(second.book_id > first.book_id);
    }

    #[tokio::test]
    async fn list_keeps_insertion_order() {
        let repo = InMemoryBookRepository::new();
        for name in ["a", "b", "c"] {
            repo.create_book(new_book(name)).await.unwrap();
        }

        let names: Vec<_> = repo
            .list_books()
            .await
            .unwrap()
            .into_iter()
            .map(|book| book.book_name)
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn update_of_missing_book_is_not_found() {
        let repo = InMemoryBookRepository::new();
        let patch = BookPatch {
            genre: Some("Horror".to_string()),
            ..BookPatch::default()
        };

        assert!(matches!(
            repo.update_book(42, patch).await,
            Err(BookStoreError::NotFound(42))
        ));
    }

    #[tokio::test]
    async fn delete_of_missing_book_affects_nothing() {
        let repo = InMemoryBookRepository::new();
        assert_eq!(repo.delete_book(7).await.unwrap(), 0);
    }
}

use serde::{Deserialize, Serialize};

/// Store-assigned book identifier.
pub type BookId = i64;

/// A catalogue entry as persisted in the `books` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Book {
    pub book_id: BookId,
    pub book_name: String,
    pub book_description: String,
    pub genre: String,
    /// Public path of the uploaded cover, e.g. `/book_images/1718035200000.jpg`
    pub book_image: String,
}

/// Fields required to create a book. The id is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub book_name: String,
    pub book_description: String,
    pub genre: String,
    pub book_image: String,
}

/// Partial update. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookPatch {
    pub book_name: Option<String>,
    pub book_description: Option<String>,
    pub genre: Option<String>,
    pub book_image: Option<String>,
}

impl BookPatch {
    pub fn is_empty(&self) -> bool {
        self.book_name.is_none()
            && self.book_description.is_none()
            && self.genre.is_none()
            && self.book_image.is_none()
    }

    /// Overwrite the fields of `book` that this patch carries.
    pub fn apply_to(self, book: &mut Book) {
        if let Some(book_name) = self.book_name {
            book.book_name = book_name;
        }
        if let Some(book_description) = self.book_description {
            book.book_description = book_description;
        }
        if let Some(genre) = self.genre {
            book.genre = genre;
        }
        if let Some(book_image) = self.book_image {
            book.book_image = book_image;
        }
    }
}

/// Body returned by a successful update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateConfirmation {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dune() -> Book {
        Book {
            book_id: 1,
            book_name: "Dune".to_string(),
            book_description: "Desert planet saga".to_string(),
            genre: "Sci-Fi".to_string(),
            book_image: "/book_images/1.jpg".to_string(),
        }
    }

    #[test]
    fn empty_patch_changes_nothing() {
        let patch = BookPatch::default();
        assert!(patch.is_empty());

        let mut book = dune();
        patch.apply_to(&mut book);
        assert_eq!(book, dune());
    }

    #[test]
    fn patch_overwrites_only_supplied_fields() {
        let patch = BookPatch {
            genre: Some("Space Opera".to_string()),
            ..BookPatch::default()
        };
        assert!(!patch.is_empty());

        let mut book = dune();
        patch.apply_to(&mut book);
        assert_eq!(book.genre, "Space Opera");
        assert_eq!(book.book_name, "Dune");
        assert_eq!(book.book_image, "/book_images/1.jpg");
    }

    #[test]
    fn book_serializes_with_column_names() {
        let value = serde_json::to_value(dune()).unwrap();
        assert_eq!(value["book_id"], 1);
        assert_eq!(value["book_description"], "Desert planet saga");
    }
}

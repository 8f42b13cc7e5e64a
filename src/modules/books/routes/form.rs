//! Decoding of the book form shared by create and update.
//!
//! Clients send either `multipart/form-data` (the only way to attach an
//! image) or a JSON object carrying the text fields.

use axum::{
    extract::{multipart::MultipartError, FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    Json,
};
use bookshelf_http::error::AppError;
use serde::Deserialize;

use crate::modules::books::images::ImageUpload;
use crate::modules::books::models::BookPatch;

/// Fields read from a book form. Every field is optional at this stage;
/// create and update apply their own presence rules.
#[derive(Debug, Default)]
pub struct BookForm {
    pub book_name: Option<String>,
    pub book_description: Option<String>,
    pub genre: Option<String>,
    pub book_image: Option<ImageUpload>,
}

/// Text fields accepted in a JSON body. Unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
struct JsonBookFields {
    book_name: Option<String>,
    book_description: Option<String>,
    genre: Option<String>,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}

fn is_json(request: &Request) -> bool {
    request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| {
            let mime = mime.trim().to_ascii_lowercase();
            mime == "application/json" || mime.ends_with("+json")
        })
        .unwrap_or(false)
}

impl<S> FromRequest<S> for BookForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    /// Read all parts into memory. Nothing touches disk here.
    ///
    /// Empty text values count as absent, and an image part counts only when
    /// it carries a filename. A body that is neither JSON nor multipart
    /// decodes to an empty form.
    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_json(&request) {
            let Json(fields) = Json::<JsonBookFields>::from_request(request, state)
                .await
                .map_err(|rejection| {
                    AppError::rejected(rejection.status(), rejection.body_text())
                })?;

            return Ok(BookForm {
                book_name: present(fields.book_name),
                book_description: present(fields.book_description),
                genre: present(fields.genre),
                book_image: None,
            });
        }

        match Multipart::from_request(request, state).await {
            Ok(multipart) => Self::read_multipart(multipart).await,
            Err(rejection) => {
                tracing::debug!(%rejection, "request body is not a book form");
                Ok(BookForm::default())
            }
        }
    }
}

impl BookForm {
    async fn read_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = BookForm::default();
        let rejected =
            |error: MultipartError| AppError::rejected(error.status(), error.body_text());

        while let Some(field) = multipart.next_field().await.map_err(rejected)? {
            let name = field.name().unwrap_or_default().to_string();

            match name.as_str() {
                "book_name" | "book_description" | "genre" => {
                    let value = present(Some(field.text().await.map_err(rejected)?));

                    match name.as_str() {
                        "book_name" => form.book_name = value,
                        "book_description" => form.book_description = value,
                        _ => form.genre = value,
                    }
                }
                "book_image" => {
                    let file_name = field.file_name().map(str::to_owned);
                    let bytes = field.bytes().await.map_err(rejected)?;

                    form.book_image = file_name
                        .filter(|file_name| !file_name.is_empty())
                        .map(|file_name| ImageUpload { file_name, bytes });
                }
                other => {
                    tracing::debug!(field = other, "ignoring unknown form field");
                }
            }
        }

        Ok(form)
    }

    /// Split off the image so the text fields can become a patch once the
    /// image has been stored.
    pub fn into_parts(self) -> (BookPatch, Option<ImageUpload>) {
        let patch = BookPatch {
            book_name: self.book_name,
            book_description: self.book_description,
            genre: self.genre,
            book_image: None,
        };
        (patch, self.book_image)
    }
}

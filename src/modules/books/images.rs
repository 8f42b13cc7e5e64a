//! On-disk storage for uploaded cover images.

use std::io;
use std::path::{Path, PathBuf};

use axum::body::Bytes;
use bookshelf_kernel::settings::StorageSettings;

use crate::utils;

/// A file part received from a multipart form.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Bytes,
}

/// Writes uploads into one directory and maps them to their public path.
///
/// Files are named by upload time, so writes need no coordination. A failed
/// insert after a successful write leaves the file behind.
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
    public_path: String,
}

impl ImageStore {
    pub fn new(dir: impl Into<PathBuf>, public_path: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            public_path: public_path.into(),
        }
    }

    pub fn from_settings(settings: &StorageSettings) -> Self {
        Self::new(settings.image_dir.clone(), settings.public_path.clone())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn ensure_dir(&self) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await
    }

    /// Persist the upload and return its public path.
    pub async fn save(&self, upload: &ImageUpload) -> io::Result<String> {
        let file_name = utils::timestamped_file_name(&upload.file_name, utils::unix_time_millis());
        let path = self.dir.join(&file_name);

        tokio::fs::write(&path, &upload.bytes).await?;
        tracing::debug!(
            path = %path.display(),
            original = %upload.file_name,
            size = upload.bytes.len(),
            "stored image upload"
        );

        Ok(format!(
            "{}/{}",
            self.public_path.trim_end_matches('/'),
            file_name
        ))
    }
}

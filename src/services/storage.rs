//! Local filesystem storage for uploaded PDF files

use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::{
    config::StorageConfig,
    error::{AppError, AppResult},
};

/// Accepted upload extensions, lowercase
const ALLOWED_EXTENSIONS: &[&str] = &["pdf"];

#[derive(Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Create the storage service, ensuring the upload directory exists
    pub async fn init(config: &StorageConfig) -> AppResult<Self> {
        let root = PathBuf::from(&config.upload_dir);
        tokio::fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    /// Extract and validate the extension of a client-supplied filename
    pub fn validate_extension(filename: &str) -> AppResult<String> {
        let ext = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        if ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
            Ok(ext)
        } else {
            Err(AppError::InvalidFileType(format!(
                "File '{}' is not an accepted document type (PDFs only)",
                filename
            )))
        }
    }

    /// Store uploaded bytes under a generated filename, returning the stored name.
    /// The original filename is only used to validate the extension.
    pub async fn save(&self, original_filename: &str, data: &[u8]) -> AppResult<String> {
        let ext = Self::validate_extension(original_filename)?;
        let stored_name = format!("{}.{}", Uuid::new_v4(), ext);

        tokio::fs::write(self.root.join(&stored_name), data).await?;

        tracing::debug!("Stored upload '{}' as '{}'", original_filename, stored_name);
        Ok(stored_name)
    }

    /// Read a stored file back
    pub async fn read(&self, stored_name: &str) -> AppResult<Vec<u8>> {
        let path = self.resolve(stored_name)?;
        match tokio::fs::read(&path).await {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(AppError::NotFound(
                format!("Stored file '{}' not found", stored_name),
            )),
            Err(e) => Err(e.into()),
        }
    }

    /// Remove a stored file; missing files are not an error (idempotent)
    pub async fn delete(&self, stored_name: &str) -> AppResult<()> {
        let path = self.resolve(stored_name)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Resolve a stored name inside the upload directory.
    /// Stored names are generated by `save`; anything with a path separator
    /// or parent reference is rejected.
    fn resolve(&self, stored_name: &str) -> AppResult<PathBuf> {
        if stored_name.is_empty()
            || stored_name.contains('/')
            || stored_name.contains('\\')
            || stored_name.contains("..")
        {
            return Err(AppError::Validation(format!(
                "Invalid stored filename '{}'",
                stored_name
            )));
        }
        Ok(self.root.join(stored_name))
    }
}

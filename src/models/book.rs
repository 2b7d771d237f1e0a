//! Book model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Book record from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    /// Stored filename of the uploaded PDF
    pub pdf_file: String,
    /// Stored filename of an optional cover image
    pub image_file: Option<String>,
    pub crea_date: Option<DateTime<Utc>>,
    pub modif_date: Option<DateTime<Utc>>,
}

/// An uploaded file received from a multipart form
#[derive(Debug, Clone)]
pub struct FileUpload {
    /// Filename as submitted by the client, untrusted
    pub filename: String,
    pub data: Vec<u8>,
}

/// Fields accepted when creating a book
#[derive(Debug)]
pub struct CreateBook {
    pub title: String,
    pub pdf: FileUpload,
}

/// Fields accepted when updating a book; absent fields are left unchanged
#[derive(Debug, Default)]
pub struct UpdateBook {
    pub title: Option<String>,
    pub pdf: Option<FileUpload>,
}

/// List response wrapper
#[derive(Debug, Serialize, ToSchema)]
pub struct BookListResponse {
    pub books: Vec<Book>,
    pub total: i64,
}

/// Multipart form schema for creating a book (documentation only)
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct CreateBookForm {
    pub title: String,
    /// PDF file content
    #[schema(value_type = String, format = Binary)]
    pub pdf: String,
}

/// Multipart form schema for updating a book (documentation only)
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UpdateBookForm {
    pub title: Option<String>,
    /// Replacement PDF file content
    #[schema(value_type = Option<String>, format = Binary)]
    pub pdf: Option<String>,
}

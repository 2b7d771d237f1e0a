//! Book endpoints

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::Multipart;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookListResponse, CreateBook, CreateBookForm, FileUpload, UpdateBook, UpdateBookForm},
};

use super::AuthenticatedUser;

/// Fields collected from a multipart book form
#[derive(Default)]
struct BookForm {
    title: Option<String>,
    pdf: Option<FileUpload>,
}

/// Collect the `title` and `pdf` parts of a multipart form.
/// Unknown parts are ignored; explicit mapping only, nothing is auto-populated.
async fn read_book_form(mut multipart: Multipart) -> AppResult<BookForm> {
    let mut form = BookForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {}", e)))?
    {
        let name = field.name().map(|s| s.to_string());
        match name.as_deref() {
            Some("title") => {
                let title = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid title field: {}", e)))?;
                if !title.trim().is_empty() {
                    form.title = Some(title);
                }
            }
            Some("pdf") => {
                let filename = field
                    .file_name()
                    .map(|s| s.to_string())
                    .ok_or_else(|| AppError::Validation("Missing filename on pdf field".to_string()))?;
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid pdf field: {}", e)))?;
                // An empty file input submits a part with no filename and no content
                if !filename.is_empty() && !data.is_empty() {
                    form.pdf = Some(FileUpload {
                        filename,
                        data: data.to_vec(),
                    });
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

/// List all books
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of books", body = BookListResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<BookListResponse>> {
    let books = state.services.books.list_books().await?;
    let total = books.len() as i64;

    Ok(Json(BookListResponse { books, total }))
}

/// Get book details by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Book>> {
    let book = state.services.books.get_book(id).await?;
    Ok(Json(book))
}

/// Create a new book from a multipart form with a `title` text part and a
/// `pdf` file part
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    security(("bearer_auth" = [])),
    request_body(content = CreateBookForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Missing title or file, or not a PDF"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<Book>)> {
    let form = read_book_form(multipart).await?;

    let title = form
        .title
        .ok_or_else(|| AppError::Validation("Title is required".to_string()))?;
    let pdf = form
        .pdf
        .ok_or_else(|| AppError::Validation("A PDF file is required".to_string()))?;

    let created = state
        .services
        .books
        .create_book(CreateBook { title, pdf })
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update an existing book; both form parts are optional
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    request_body(content = UpdateBookForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 400, description = "Replacement file is not a PDF"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> AppResult<Json<Book>> {
    let form = read_book_form(multipart).await?;

    let updated = state
        .services
        .books
        .update_book(
            id,
            UpdateBook {
                title: form.title,
                pdf: form.pdf,
            },
        )
        .await?;
    Ok(Json(updated))
}

/// Delete a book and its stored file
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.books.delete_book(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Download the stored PDF of a book
#[utoipa::path(
    get,
    path = "/books/{id}/file",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "PDF content", body = Vec<u8>, content_type = "application/pdf"),
        (status = 404, description = "Book or stored file not found")
    )
)]
pub async fn download_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Response> {
    let (book, data) = state.services.books.read_book_file(id).await?;

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("inline; filename=\"{}\"", book.pdf_file),
        ),
    ];

    Ok((headers, data).into_response())
}

//! Book management service, coordinating the book store and file storage

use crate::{
    error::AppResult,
    models::book::{Book, CreateBook, UpdateBook},
    repository::Repository,
    services::storage::FileStorage,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
    storage: FileStorage,
}

impl BooksService {
    pub fn new(repository: Repository, storage: FileStorage) -> Self {
        Self { repository, storage }
    }

    /// List all books in storage order
    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list().await
    }

    /// Get book by ID
    pub async fn get_book(&self, id: i32) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    /// Create a book from an uploaded PDF.
    /// The file is stored before the record is committed; if the insert
    /// fails, the stored file is removed again.
    pub async fn create_book(&self, create: CreateBook) -> AppResult<Book> {
        let stored_name = self.storage.save(&create.pdf.filename, &create.pdf.data).await?;

        let book = match self.repository.books.create(&create.title, &stored_name).await {
            Ok(book) => book,
            Err(e) => {
                if let Err(cleanup) = self.storage.delete(&stored_name).await {
                    tracing::warn!(
                        "Failed to remove stored file '{}' after insert failure: {}",
                        stored_name, cleanup
                    );
                }
                return Err(e);
            }
        };

        tracing::info!("Created book id={} pdf_file={}", book.id, book.pdf_file);
        Ok(book)
    }

    /// Update title and/or replace the PDF of an existing book.
    /// A replacement file is stored and committed first; the previous stored
    /// file is then removed best effort, so a failed update never leaves the
    /// record pointing at a missing file.
    pub async fn update_book(&self, id: i32, update: UpdateBook) -> AppResult<Book> {
        let existing = self.repository.books.get_by_id(id).await?;

        let stored_name = match &update.pdf {
            Some(upload) => Some(self.storage.save(&upload.filename, &upload.data).await?),
            None => None,
        };

        let result = self
            .repository
            .books
            .update(id, update.title.as_deref(), stored_name.as_deref())
            .await;

        match result {
            Ok(book) => {
                if stored_name.is_some() && existing.pdf_file != book.pdf_file {
                    if let Err(e) = self.storage.delete(&existing.pdf_file).await {
                        tracing::warn!(
                            "Failed to remove replaced file '{}' for book id={}: {}",
                            existing.pdf_file, id, e
                        );
                    }
                }
                Ok(book)
            }
            Err(e) => {
                if let Some(ref name) = stored_name {
                    if let Err(cleanup) = self.storage.delete(name).await {
                        tracing::warn!(
                            "Failed to remove stored file '{}' after update failure: {}",
                            name, cleanup
                        );
                    }
                }
                Err(e)
            }
        }
    }

    /// Delete a book and its stored file.
    /// The record is removed first; file removal is best effort, so a
    /// partial failure can only leave an orphaned file, never a live record
    /// referencing a deleted file.
    pub async fn delete_book(&self, id: i32) -> AppResult<()> {
        let book = self.repository.books.get_by_id(id).await?;

        self.repository.books.delete(id).await?;

        if let Err(e) = self.storage.delete(&book.pdf_file).await {
            tracing::warn!(
                "Failed to remove stored file '{}' for deleted book id={}: {}",
                book.pdf_file, id, e
            );
        }

        tracing::info!("Deleted book id={}", id);
        Ok(())
    }

    /// Read the stored PDF bytes for a book
    pub async fn read_book_file(&self, id: i32) -> AppResult<(Book, Vec<u8>)> {
        let book = self.repository.books.get_by_id(id).await?;
        let data = self.storage.read(&book.pdf_file).await?;
        Ok((book, data))
    }
}

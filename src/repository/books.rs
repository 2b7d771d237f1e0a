//! Books repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::book::Book,
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all books in storage order
    pub async fn list(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            "SELECT id, title, pdf_file, image_file, crea_date, modif_date FROM books ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        let book = sqlx::query_as::<_, Book>(
            "SELECT id, title, pdf_file, image_file, crea_date, modif_date FROM books WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))?;

        Ok(book)
    }

    /// Create a new book referencing an already-stored PDF file
    pub async fn create(&self, title: &str, pdf_file: &str) -> AppResult<Book> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, pdf_file, crea_date, modif_date)
            VALUES ($1, $2, NOW(), NOW())
            RETURNING id, title, pdf_file, image_file, crea_date, modif_date
            "#,
        )
        .bind(title)
        .bind(pdf_file)
        .fetch_one(&self.pool)
        .await?;

        Ok(book)
    }

    /// Update title and/or PDF reference; absent fields are left unchanged
    pub async fn update(
        &self,
        id: i32,
        title: Option<&str>,
        pdf_file: Option<&str>,
    ) -> AppResult<Book> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET title = COALESCE($2, title),
                pdf_file = COALESCE($3, pdf_file),
                modif_date = NOW()
            WHERE id = $1
            RETURNING id, title, pdf_file, image_file, crea_date, modif_date
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(pdf_file)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))?;

        Ok(book)
    }

    /// Delete a book record
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }

        Ok(())
    }
}

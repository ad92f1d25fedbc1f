//! Catalog management service

use crate::{
    config::SeedBook,
    error::{AppError, AppResult},
    models::book::{Book, CreateBook, UpdateBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List every book in creation order
    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        let books = self.repository.books.list().await;
        tracing::debug!("Listing {} books", books.len());
        Ok(books)
    }

    /// Get book by ID
    pub async fn get_book(&self, id: &str) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    /// Create a new book
    pub async fn create_book(&self, data: &CreateBook) -> AppResult<Book> {
        let book = self.repository.books.create(data).await?;
        tracing::info!("Catalog create: book id={} title={:?}", book.id, book.title);
        Ok(book)
    }

    /// Update an existing book
    pub async fn update_book(&self, id: &str, data: &UpdateBook) -> AppResult<Book> {
        let book = self.repository.books.update(id, data).await?;
        tracing::info!("Catalog update: book id={}", id);
        Ok(book)
    }

    /// Delete a book
    pub async fn delete_book(&self, id: &str) -> AppResult<()> {
        if !self.repository.books.delete_by_id(id).await {
            return Err(AppError::BookNotFound(id.to_string()));
        }
        tracing::info!("Catalog delete: book id={}", id);
        Ok(())
    }

    /// Load startup books through the regular create path
    pub async fn seed(&self, books: &[SeedBook]) -> AppResult<usize> {
        for seed in books {
            self.create_book(&CreateBook::from(seed)).await?;
        }
        Ok(books.len())
    }
}

//! In-memory book store

use std::{collections::HashSet, sync::Arc};

use indexmap::IndexMap;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, CreateBook, UpdateBook},
};

/// Books keyed by id, iterated in insertion order
#[derive(Debug, Default)]
struct Shelf {
    books: IndexMap<String, Book>,
    /// Every id handed out so far, including deleted ones
    issued: HashSet<String>,
}

impl Shelf {
    fn next_id(&mut self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if self.issued.insert(id.clone()) {
                return id;
            }
        }
    }
}

/// Book store shared by every request handler.
///
/// All operations lock the whole shelf for the duration of the in-memory
/// work, so each call sees a consistent collection.
#[derive(Clone, Debug)]
pub struct BooksRepository {
    shelf: Arc<Mutex<Shelf>>,
    capacity: Option<usize>,
}

impl BooksRepository {
    pub fn new(capacity: Option<usize>) -> Self {
        Self {
            shelf: Arc::new(Mutex::new(Shelf::default())),
            capacity,
        }
    }

    /// Create a book, assigning it a fresh id
    pub async fn create(&self, data: &CreateBook) -> AppResult<Book> {
        let (title, author) = data
            .required_fields()
            .ok_or_else(|| AppError::Validation("Title and author are required".to_string()))?;

        let mut shelf = self.shelf.lock().await;

        if let Some(capacity) = self.capacity {
            if shelf.books.len() >= capacity {
                return Err(AppError::CapacityExceeded(capacity));
            }
        }

        let book = Book {
            id: shelf.next_id(),
            title: title.to_string(),
            author: author.to_string(),
            description: data.description.clone().unwrap_or_default(),
            cover_image_url: data.cover_image_url.clone().unwrap_or_default(),
        };
        shelf.books.insert(book.id.clone(), book.clone());

        Ok(book)
    }

    /// All books in insertion order
    pub async fn list(&self) -> Vec<Book> {
        self.shelf.lock().await.books.values().cloned().collect()
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: &str) -> AppResult<Book> {
        self.shelf
            .lock()
            .await
            .books
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::BookNotFound(id.to_string()))
    }

    /// Apply a partial update and return the updated book
    pub async fn update(&self, id: &str, data: &UpdateBook) -> AppResult<Book> {
        let mut shelf = self.shelf.lock().await;
        let book = shelf
            .books
            .get_mut(id)
            .ok_or_else(|| AppError::BookNotFound(id.to_string()))?;

        data.apply_to(book);

        Ok(book.clone())
    }

    /// Remove a book, returns false when no book has this id
    pub async fn delete_by_id(&self, id: &str) -> bool {
        // shift_remove keeps the survivors in their relative order
        self.shelf.lock().await.books.shift_remove(id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.shelf.lock().await.books.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

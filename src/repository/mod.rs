//! Repository layer for book storage

pub mod books;

use crate::config::AppConfig;

/// Main repository struct holding the in-memory stores
#[derive(Clone)]
pub struct Repository {
    pub books: books::BooksRepository,
}

impl Repository {
    /// Create a new repository sized from configuration
    pub fn new(config: &AppConfig) -> Self {
        Self {
            books: books::BooksRepository::new(config.capacity_limit()),
        }
    }
}

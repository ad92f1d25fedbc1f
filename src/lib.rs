//! Book Catalog Server
//!
//! An in-memory book record store exposed as a REST JSON API with
//! create, read, update and delete operations on `/book`.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

use repository::Repository;
use services::Services;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<Services>,
}

impl AppState {
    /// Build an empty store and its services from configuration
    pub fn new(config: AppConfig) -> Self {
        let repository = Repository::new(&config);
        Self {
            services: Arc::new(Services::new(repository)),
            config: Arc::new(config),
        }
    }
}

//! Bookshelf Personal PDF Library
//!
//! A Rust implementation of the Bookshelf server, providing a REST JSON API
//! for managing user accounts and a library of uploaded PDF books.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

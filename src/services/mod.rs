//! Business logic services

pub mod auth;
pub mod books;
pub mod storage;

use crate::{
    config::{AuthConfig, StorageConfig},
    error::AppResult,
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub books: books::BooksService,
    pub storage: storage::FileStorage,
}

impl Services {
    /// Create all services with the given repository
    pub async fn new(
        repository: Repository,
        auth_config: AuthConfig,
        storage_config: &StorageConfig,
    ) -> AppResult<Self> {
        let storage = storage::FileStorage::init(storage_config).await?;

        Ok(Self {
            auth: auth::AuthService::new(repository.clone(), auth_config),
            books: books::BooksService::new(repository, storage.clone()),
            storage,
        })
    }
}

use crate::config::Config;
use std::sync::Arc;

pub mod catalog;
pub mod demo_user_seed;
pub mod progress_store;
pub mod question_service;
pub mod stats_service;
pub mod user_store;

use catalog::Catalog;
use progress_store::ProgressStore;
use user_store::UserStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(String),
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    Conflict(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

pub struct AppState {
    pub config: Config,
    pub catalog: Arc<Catalog>,
    pub progress: ProgressStore,
    pub users: UserStore,
}

impl AppState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let catalog = match &config.catalog.fixture_path {
            Some(path) if !path.is_empty() => {
                tracing::info!("Loading question catalog from {}", path);
                Catalog::load(path).await?
            }
            _ => Catalog::seeded()?,
        };

        Self::with_catalog(config, catalog).await
    }

    /// Builds state around an already loaded catalog (used by tests with small fixtures).
    pub async fn with_catalog(config: Config, catalog: Catalog) -> anyhow::Result<Self> {
        tracing::info!("Question catalog ready with {} questions", catalog.len());
        crate::metrics::CATALOG_QUESTIONS.set(catalog.len() as i64);

        let users = UserStore::with_cost(config.auth.bcrypt_cost);
        demo_user_seed::bootstrap(&config, &users).await?;

        Ok(Self {
            config,
            catalog: Arc::new(catalog),
            progress: ProgressStore::new(),
            users,
        })
    }
}

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::{
    config::Config,
    data,
    error::{AppError, AppResult},
    models::CatalogStats,
    services::{providers::PosterProvider, Catalog},
};

/// Shared application state
///
/// The catalog sits behind one `Arc` so queries hold a consistent snapshot
/// for as long as they need it, and a reload replaces it in a single write.
#[derive(Clone)]
pub struct AppState {
    catalog: Arc<RwLock<Arc<Catalog>>>,
    reload_lock: Arc<Mutex<()>>,
    pub poster_provider: Arc<dyn PosterProvider>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(catalog: Catalog, poster_provider: Arc<dyn PosterProvider>, config: Config) -> Self {
        Self {
            catalog: Arc::new(RwLock::new(Arc::new(catalog))),
            reload_lock: Arc::new(Mutex::new(())),
            poster_provider,
            config: Arc::new(config),
        }
    }

    /// Snapshot of the catalog currently being served
    pub async fn catalog(&self) -> Arc<Catalog> {
        self.catalog.read().await.clone()
    }

    /// Rebuilds the catalog from the configured metadata files and swaps it in.
    ///
    /// Reloads run one at a time. On failure the current catalog is kept.
    pub async fn reload(&self) -> AppResult<CatalogStats> {
        let _guard = self.reload_lock.lock().await;

        let config = self.config.clone();
        let catalog = tokio::task::spawn_blocking(move || -> AppResult<Catalog> {
            let movies = data::load_movies(&config.movies_path)?;
            let credits = data::load_credits(&config.credits_path)?;
            Ok(Catalog::build(&movies, &credits, config.max_features)?)
        })
        .await
        .map_err(|e| AppError::Internal(format!("Catalog rebuild task failed: {}", e)))??;

        let stats = catalog.stats();
        *self.catalog.write().await = Arc::new(catalog);

        tracing::info!(
            movies = stats.movies,
            vocabulary = stats.vocabulary,
            "Catalog reloaded"
        );

        Ok(stats)
    }
}

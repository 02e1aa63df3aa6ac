//! Poster image providers
//!
//! Posters are display enrichment only: every provider resolves to a URL,
//! falling back to a placeholder image, and never fails the recommendation
//! that asked for it.

use std::sync::Arc;

pub mod tmdb;

pub use tmdb::TmdbProvider;

/// Trait for poster image sources
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PosterProvider: Send + Sync {
    /// Poster URL for a movie, or the placeholder when none can be resolved
    async fn poster_url(&self, movie_id: i64) -> String;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Provider that always answers with the same placeholder image
#[derive(Debug, Clone)]
pub struct PlaceholderProvider {
    placeholder: String,
}

impl PlaceholderProvider {
    pub fn new(placeholder: String) -> Self {
        Self { placeholder }
    }
}

#[async_trait::async_trait]
impl PosterProvider for PlaceholderProvider {
    async fn poster_url(&self, _movie_id: i64) -> String {
        self.placeholder.clone()
    }

    fn name(&self) -> &'static str {
        "placeholder"
    }
}

/// Fetches posters for several movies in parallel
///
/// URLs come back in the same order as `movie_ids`. A lookup task that
/// panics or is cancelled resolves to `fallback`.
pub async fn fetch_posters(
    provider: Arc<dyn PosterProvider>,
    movie_ids: &[i64],
    fallback: &str,
) -> Vec<String> {
    let tasks: Vec<_> = movie_ids
        .iter()
        .map(|&movie_id| {
            let provider = provider.clone();
            tokio::spawn(async move { provider.poster_url(movie_id).await })
        })
        .collect();

    let mut urls = Vec::with_capacity(tasks.len());
    for (task, movie_id) in tasks.into_iter().zip(movie_ids) {
        match task.await {
            Ok(url) => urls.push(url),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    movie_id = movie_id,
                    provider = provider.name(),
                    "Poster task join error"
                );
                urls.push(fallback.to_string());
            }
        }
    }

    urls
}

//! TMDB poster provider
//!
//! Looks a movie up with `/3/movie/{id}` and joins its `poster_path` onto the
//! configured image base. Lookups without an API key never hit the network.
use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::Deserialize;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    services::providers::PosterProvider,
};

/// Subset of the TMDB movie details response we care about
#[derive(Debug, Deserialize)]
struct TmdbMovie {
    #[serde(default)]
    poster_path: Option<String>,
}

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: Option<String>,
    api_url: String,
    image_base: String,
    placeholder: String,
}

impl TmdbProvider {
    pub fn new(
        api_key: Option<String>,
        api_url: String,
        image_base: String,
        placeholder: String,
        timeout: Duration,
    ) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            api_url,
            image_base,
            placeholder,
        })
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(
            config.tmdb_api_key.clone(),
            config.tmdb_api_url.clone(),
            config.tmdb_image_base.clone(),
            config.poster_placeholder.clone(),
            Duration::from_secs(config.poster_timeout_secs),
        )
    }

    /// Fetches the movie's `poster_path`, `None` when TMDB has no poster
    async fn fetch_poster_path(&self, api_key: &str, movie_id: i64) -> AppResult<Option<String>> {
        let url = format!("{}/3/movie/{}", self.api_url, movie_id);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", api_key)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {}",
                response.status()
            )));
        }

        let movie: TmdbMovie = response.json().await?;
        Ok(movie.poster_path.filter(|p| !p.trim().is_empty()))
    }

    fn image_url(&self, poster_path: &str) -> String {
        format!("{}{}", self.image_base, poster_path)
    }
}

#[async_trait::async_trait]
impl PosterProvider for TmdbProvider {
    async fn poster_url(&self, movie_id: i64) -> String {
        let Some(api_key) = self.api_key.as_deref() else {
            return self.placeholder.clone();
        };
        if movie_id <= 0 {
            return self.placeholder.clone();
        }

        match self.fetch_poster_path(api_key, movie_id).await {
            Ok(Some(path)) => self.image_url(&path),
            Ok(None) => {
                tracing::debug!(movie_id, provider = "tmdb", "Movie has no poster");
                self.placeholder.clone()
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    movie_id,
                    provider = "tmdb",
                    "Poster lookup failed, using placeholder"
                );
                self.placeholder.clone()
            }
        }
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}

use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Path to the TMDB movie metadata CSV
    #[serde(default = "default_movies_path")]
    pub movies_path: String,

    /// Path to the TMDB credits CSV
    #[serde(default = "default_credits_path")]
    pub credits_path: String,

    /// Vocabulary size limit for the vectorizer
    #[serde(default = "default_max_features")]
    pub max_features: usize,

    /// Number of recommendations returned when the request doesn't specify `k`
    #[serde(default = "default_top_k")]
    pub default_top_k: i64,

    /// TMDB API key, poster lookups fall back to the placeholder when unset
    #[serde(default)]
    pub tmdb_api_key: Option<String>,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Prefix prepended to TMDB `poster_path` values
    #[serde(default = "default_tmdb_image_base")]
    pub tmdb_image_base: String,

    /// Image returned whenever a poster can't be resolved
    #[serde(default = "default_poster_placeholder")]
    pub poster_placeholder: String,

    /// Per-request timeout for poster lookups
    #[serde(default = "default_poster_timeout_secs")]
    pub poster_timeout_secs: u64,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_movies_path() -> String {
    "data/tmdb_5000_movies.csv".to_string()
}

fn default_credits_path() -> String {
    "data/tmdb_5000_credits.csv".to_string()
}

fn default_max_features() -> usize {
    5000
}

fn default_top_k() -> i64 {
    5
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org".to_string()
}

fn default_tmdb_image_base() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_poster_placeholder() -> String {
    "https://via.placeholder.com/300x450?text=No+Image".to_string()
}

fn default_poster_timeout_secs() -> u64 {
    5
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            movies_path: default_movies_path(),
            credits_path: default_credits_path(),
            max_features: default_max_features(),
            default_top_k: default_top_k(),
            tmdb_api_key: None,
            tmdb_api_url: default_tmdb_api_url(),
            tmdb_image_base: default_tmdb_image_base(),
            poster_placeholder: default_poster_placeholder(),
            poster_timeout_secs: default_poster_timeout_secs(),
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.max_features == 0 {
            anyhow::bail!("MAX_FEATURES must be greater than zero");
        }
        Ok(())
    }

    /// Address the HTTP listener binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

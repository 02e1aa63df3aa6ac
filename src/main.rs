use std::sync::Arc;

use marquee_api::{
    api::{create_router, AppState},
    config::Config,
    data,
    services::{providers::TmdbProvider, Catalog},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "marquee_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    // Build the catalog before accepting traffic
    let catalog = {
        let config = config.clone();
        tokio::task::spawn_blocking(move || -> anyhow::Result<Catalog> {
            let movies = data::load_movies(&config.movies_path)?;
            let credits = data::load_credits(&config.credits_path)?;
            Ok(Catalog::build(&movies, &credits, config.max_features)?)
        })
        .await??
    };

    let poster_provider = Arc::new(TmdbProvider::from_config(&config)?);
    if config.tmdb_api_key.is_none() {
        tracing::warn!("TMDB_API_KEY not set, posters will use the placeholder image");
    }

    let addr = config.bind_addr();
    let state = AppState::new(catalog, poster_provider, config);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{
        CatalogStats, MovieDetails, MovieSummary, QueryMovie, RecommendationResponse,
        RecommendedMovie,
    },
    services::providers::fetch_posters,
};

use super::AppState;

// Request/Response types

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub catalog: CatalogStats,
}

#[derive(Debug, Deserialize)]
pub struct MovieListQuery {
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub title: Option<String>,
    pub id: Option<i64>,
    pub k: Option<i64>,
}

// Handlers

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let catalog = state.catalog().await;
    Json(HealthResponse {
        status: "healthy",
        catalog: catalog.stats(),
    })
}

/// Lists movies in index order, optionally filtered by a title substring
pub async fn list_movies(
    State(state): State<AppState>,
    Query(params): Query<MovieListQuery>,
) -> Json<Vec<MovieSummary>> {
    let catalog = state.catalog().await;
    let needle = params
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_lowercase);

    let movies = catalog
        .engine()
        .movies()
        .iter()
        .filter(|m| match &needle {
            Some(needle) => m.title.to_lowercase().contains(needle.as_str()),
            None => true,
        })
        .map(MovieSummary::from)
        .collect();

    Json(movies)
}

/// Display details for one movie
pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MovieDetails>> {
    let catalog = state.catalog().await;
    catalog
        .details(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Movie {} not found", id)))
}

/// Ranks movies similar to the one named by `title` or `id`
///
/// An unmatched movie is not an error: the response carries a null id and no
/// recommendations.
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<RecommendationQuery>,
) -> AppResult<Json<RecommendationResponse>> {
    let k = params.k.unwrap_or(state.config.default_top_k);
    let k = usize::try_from(k).unwrap_or(0);

    let catalog = state.catalog().await;
    let engine = catalog.engine();

    let (matched, recommendations) = match (params.title.as_deref(), params.id) {
        (Some(title), None) => (engine.find(title), engine.recommend(title, k)),
        (None, Some(id)) => (engine.find_by_id(id), engine.recommend_by_id(id, k)),
        _ => {
            return Err(AppError::InvalidInput(
                "Provide exactly one of `title` or `id`".to_string(),
            ))
        }
    };

    tracing::info!(
        request_id = %request_id,
        title = ?params.title,
        id = ?params.id,
        k,
        matched = matched.is_some(),
        results = recommendations.len(),
        "Recommendation query"
    );

    let query = QueryMovie {
        title: matched.map(|m| m.title.clone()).or(params.title.clone()),
        id: matched.map(|m| m.id),
        details: matched.and_then(|m| catalog.details(m.id).cloned()),
    };

    let ids: Vec<i64> = recommendations.iter().map(|r| r.id).collect();
    let posters = fetch_posters(
        state.poster_provider.clone(),
        &ids,
        &state.config.poster_placeholder,
    )
    .await;

    let recommendations = recommendations
        .into_iter()
        .zip(posters)
        .map(|(rec, poster_url)| RecommendedMovie {
            title: rec.title,
            id: rec.id,
            poster_url,
        })
        .collect();

    Ok(Json(RecommendationResponse {
        query,
        recommendations,
    }))
}

/// Rebuilds the catalog from the metadata files on disk
pub async fn reload_catalog(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> AppResult<Json<CatalogStats>> {
    tracing::info!(request_id = %request_id, "Catalog reload requested");
    let stats = state.reload().await?;
    Ok(Json(stats))
}

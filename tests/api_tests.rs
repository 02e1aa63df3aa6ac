use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::Value;

use marquee_api::{
    api::{create_router, AppState},
    config::Config,
    models::{CreditRow, MovieRow},
    services::{providers::PlaceholderProvider, Catalog},
};

const PLACEHOLDER: &str = "https://img.local/placeholder.png";

fn movie(id: i64, title: &str, overview: &str) -> MovieRow {
    MovieRow {
        id,
        title: title.to_string(),
        overview: Some(overview.to_string()),
        release_date: Some("1999-03-30".to_string()),
        ..Default::default()
    }
}

fn credit(id: i64, title: &str) -> CreditRow {
    CreditRow {
        movie_id: id,
        title: title.to_string(),
        ..Default::default()
    }
}

fn sample_catalog() -> Catalog {
    let movies = vec![
        movie(1, "A", "space war robot"),
        movie(2, "B", "space war alien"),
        movie(3, "C", "romance drama"),
        movie(4, "Blank", ""),
    ];
    let credits = vec![
        credit(1, "A"),
        credit(2, "B"),
        credit(3, "C"),
        credit(4, "Blank"),
    ];
    Catalog::build(&movies, &credits, 5000).unwrap()
}

fn test_config(movies_path: &str, credits_path: &str) -> Config {
    Config {
        movies_path: movies_path.to_string(),
        credits_path: credits_path.to_string(),
        poster_placeholder: PLACEHOLDER.to_string(),
        ..Config::default()
    }
}

fn create_test_server_with(config: Config) -> TestServer {
    let provider = Arc::new(PlaceholderProvider::new(PLACEHOLDER.to_string()));
    let state = AppState::new(sample_catalog(), provider, config);
    TestServer::new(create_router(state)).unwrap()
}

fn create_test_server() -> TestServer {
    create_test_server_with(test_config("/nonexistent/movies.csv", "/nonexistent/credits.csv"))
}

fn titles(body: &Value) -> Vec<String> {
    body["recommendations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["title"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_health_check_reports_catalog() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["catalog"]["movies"], 4);
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = create_test_server();
    let response = server.get("/health").await;
    let header = response.header("x-request-id");
    assert!(uuid::Uuid::parse_str(header.to_str().unwrap()).is_ok());
}

#[tokio::test]
async fn test_recommend_by_title() {
    let server = create_test_server();
    let response = server
        .get("/recommendations")
        .add_query_param("title", "A")
        .add_query_param("k", 2)
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["query"]["id"], 1);
    assert_eq!(body["query"]["details"]["release_date"], "1999-03-30");
    assert_eq!(titles(&body), vec!["B", "C"]);
    assert_eq!(body["recommendations"][0]["id"], 2);
    assert_eq!(body["recommendations"][0]["poster_url"], PLACEHOLDER);
}

#[tokio::test]
async fn test_recommend_defaults_k_and_clamps_to_pool() {
    let server = create_test_server();
    let response = server
        .get("/recommendations")
        .add_query_param("title", "A")
        .await;

    let body: Value = response.json();
    // Default k is 5 but only three other movies exist; the blank one ranks last
    assert_eq!(titles(&body), vec!["B", "C", "Blank"]);
}

#[tokio::test]
async fn test_recommend_unknown_title_is_empty_not_error() {
    let server = create_test_server();
    let response = server
        .get("/recommendations")
        .add_query_param("title", "Unknown Title")
        .add_query_param("k", 5)
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert!(body["query"]["id"].is_null());
    assert_eq!(body["query"]["title"], "Unknown Title");
    assert!(titles(&body).is_empty());
}

#[tokio::test]
async fn test_recommend_negative_k_is_empty() {
    let server = create_test_server();
    let response = server
        .get("/recommendations")
        .add_query_param("title", "A")
        .add_query_param("k", -3)
        .await;
    response.assert_status_ok();
    assert!(titles(&response.json()).is_empty());
}

#[tokio::test]
async fn test_recommend_by_id() {
    let server = create_test_server();
    let response = server
        .get("/recommendations")
        .add_query_param("id", 2)
        .add_query_param("k", 1)
        .await;

    let body: Value = response.json();
    assert_eq!(body["query"]["title"], "B");
    assert_eq!(titles(&body), vec!["A"]);
}

#[tokio::test]
async fn test_recommend_requires_exactly_one_selector() {
    let server = create_test_server();

    let response = server.get("/recommendations").await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = server
        .get("/recommendations")
        .add_query_param("title", "A")
        .add_query_param("id", 1)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_movies_with_filter() {
    let server = create_test_server();

    let response = server.get("/movies").await;
    response.assert_status_ok();
    let all: Vec<Value> = response.json();
    assert_eq!(all.len(), 4);
    assert_eq!(all[0]["title"], "A");

    let response = server.get("/movies").add_query_param("q", "bla").await;
    let filtered: Vec<Value> = response.json();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0]["id"], 4);
}

#[tokio::test]
async fn test_get_movie_details() {
    let server = create_test_server();

    let response = server.get("/movies/3").await;
    response.assert_status_ok();
    let details: Value = response.json();
    assert_eq!(details["title"], "C");
    assert_eq!(details["overview"], "romance drama");

    let response = server.get("/movies/999").await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_failed_reload_keeps_serving_old_catalog() {
    let server = create_test_server();

    let response = server.post("/catalog/reload").await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    let response = server
        .get("/recommendations")
        .add_query_param("title", "A")
        .add_query_param("k", 1)
        .await;
    assert_eq!(titles(&response.json()), vec!["B"]);
}

#[tokio::test]
async fn test_reload_swaps_in_new_catalog() {
    let dir = std::env::temp_dir().join(format!("marquee-reload-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    let movies_path = dir.join("movies.csv");
    let credits_path = dir.join("credits.csv");

    std::fs::write(
        &movies_path,
        "id,title,overview,genres,keywords\n\
         10,Heat,heist crew city,[],[]\n\
         11,Ronin,heist crew paris,[],[]\n\
         12,Rocky,boxing ring,[],[]\n",
    )
    .unwrap();
    std::fs::write(
        &credits_path,
        "movie_id,title,cast,crew\n10,Heat,[],[]\n11,Ronin,[],[]\n12,Rocky,[],[]\n",
    )
    .unwrap();

    let server = create_test_server_with(test_config(
        movies_path.to_str().unwrap(),
        credits_path.to_str().unwrap(),
    ));

    let response = server.post("/catalog/reload").await;
    response.assert_status_ok();
    let stats: Value = response.json();
    assert_eq!(stats["movies"], 3);

    let response = server
        .get("/recommendations")
        .add_query_param("title", "Heat")
        .add_query_param("k", 1)
        .await;
    assert_eq!(titles(&response.json()), vec!["Ronin"]);

    let response = server
        .get("/recommendations")
        .add_query_param("title", "A")
        .await;
    assert!(titles(&response.json()).is_empty());

    std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn test_reload_with_only_stop_words_is_rejected() {
    let dir = std::env::temp_dir().join(format!("marquee-stop-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    let movies_path = dir.join("movies.csv");
    let credits_path = dir.join("credits.csv");

    std::fs::write(&movies_path, "id,title,overview\n1,X,the and of\n").unwrap();
    std::fs::write(&credits_path, "movie_id,title,cast,crew\n1,X,[],[]\n").unwrap();

    let server = create_test_server_with(test_config(
        movies_path.to_str().unwrap(),
        credits_path.to_str().unwrap(),
    ));

    let response = server.post("/catalog/reload").await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    let response = server.get("/health").await;
    let body: Value = response.json();
    assert_eq!(body["catalog"]["movies"], 4);

    std::fs::remove_dir_all(&dir).ok();
}

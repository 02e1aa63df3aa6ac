use serde::{Deserialize, Serialize};

use super::metadata::{FieldParse, MovieRow, NamedEntry};

/// A movie as seen by the recommendation engine
///
/// `title` is the lookup key but is not unique across the corpus; `id` is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieRecord {
    pub id: i64,
    pub title: String,
    /// Lowercased synopsis, genres, keywords, top cast and director
    pub tag: String,
}

/// A single ranked result of a recommendation query
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub title: String,
    pub id: i64,
}

/// Display details for a movie, taken from the metadata source
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetails {
    pub id: i64,
    pub title: String,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<u32>,
    pub runtime: Option<f64>,
    pub tagline: Option<String>,
    pub genres: Vec<String>,
}

impl From<&MovieRow> for MovieDetails {
    fn from(row: &MovieRow) -> Self {
        let genres = FieldParse::<NamedEntry>::parse(&row.genres)
            .into_entries()
            .into_iter()
            .map(|g| g.name)
            .collect();

        Self {
            id: row.id,
            title: row.title.clone(),
            overview: non_blank(&row.overview),
            release_date: non_blank(&row.release_date),
            vote_average: row.vote_average,
            vote_count: row.vote_count,
            runtime: row.runtime,
            tagline: non_blank(&row.tagline),
            genres,
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

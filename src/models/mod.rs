use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod metadata;
pub mod movie;

pub use metadata::{
    CastMember, CreditRow, CrewMember, FieldParse, MalformedFieldWarning, MovieRow, NamedEntry,
    StructuredField,
};
pub use movie::{MovieDetails, MovieRecord, Recommendation};

// ============================================================================
// API Types
// ============================================================================

/// Entry of the movie selection list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieSummary {
    pub id: i64,
    pub title: String,
}

impl From<&MovieRecord> for MovieSummary {
    fn from(record: &MovieRecord) -> Self {
        Self {
            id: record.id,
            title: record.title.clone(),
        }
    }
}

/// The movie a recommendation request resolved to
///
/// `id` and `details` are `None` when nothing matched the request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueryMovie {
    pub title: Option<String>,
    pub id: Option<i64>,
    pub details: Option<MovieDetails>,
}

/// A recommended movie enriched for display
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendedMovie {
    pub title: String,
    pub id: i64,
    pub poster_url: String,
}

/// Response for a recommendation request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationResponse {
    pub query: QueryMovie,
    /// Ordered from most to least similar
    pub recommendations: Vec<RecommendedMovie>,
}

/// Size and age of the catalog currently being served
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogStats {
    pub movies: usize,
    pub vocabulary: usize,
    pub built_at: DateTime<Utc>,
}

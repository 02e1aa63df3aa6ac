use std::collections::HashMap;
use std::time::Instant;

use chrono::{DateTime, Utc};

use crate::{
    error::EngineError,
    models::{CatalogStats, CreditRow, MovieDetails, MovieRecord, MovieRow, Recommendation},
};

use super::{
    recommendations,
    similarity::{self, SimilarityMatrix},
    tags,
    vectorizer::{FeatureMatrix, Vectorizer, Vocabulary},
};

/// Immutable recommendation model built from one metadata snapshot.
///
/// Row `i` of the feature and similarity matrices is `movies[i]`.
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    movies: Vec<MovieRecord>,
    vocabulary: Vocabulary,
    features: FeatureMatrix,
    similarity: SimilarityMatrix,
}

impl RecommendationEngine {
    /// Runs the full chain: tag building, vectorizing, pairwise similarity
    pub fn build(
        movies: &[MovieRow],
        credits: &[CreditRow],
        max_features: usize,
    ) -> Result<Self, EngineError> {
        let start = Instant::now();

        let index = tags::build(movies, credits);
        tracing::info!(
            movie_rows = movies.len(),
            credit_rows = credits.len(),
            joined = index.len(),
            "Tags built"
        );

        Self::from_records(index, max_features).inspect(|engine| {
            tracing::info!(
                movies = engine.movies.len(),
                vocabulary = engine.vocabulary.len(),
                elapsed_ms = start.elapsed().as_millis(),
                "Recommendation engine built"
            );
        })
    }

    /// Builds the model from already tagged records
    pub fn from_records(movies: Vec<MovieRecord>, max_features: usize) -> Result<Self, EngineError> {
        let tags: Vec<&str> = movies.iter().map(|m| m.tag.as_str()).collect();
        let (vocabulary, features) = Vectorizer::new(max_features).fit(&tags)?;
        tracing::debug!(
            rows = features.n_rows(),
            cols = features.n_cols(),
            "Feature matrix built"
        );

        let similarity = similarity::compute(&features);

        Ok(Self {
            movies,
            vocabulary,
            features,
            similarity,
        })
    }

    pub fn movies(&self) -> &[MovieRecord] {
        &self.movies
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn features(&self) -> &FeatureMatrix {
        &self.features
    }

    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }

    /// First movie with the given title
    pub fn find(&self, title: &str) -> Option<&MovieRecord> {
        recommendations::find_by_title(&self.movies, title).map(|row| &self.movies[row])
    }

    pub fn find_by_id(&self, id: i64) -> Option<&MovieRecord> {
        recommendations::find_by_id(&self.movies, id).map(|row| &self.movies[row])
    }

    /// Top-`k` movies similar to the first movie titled `title`
    pub fn recommend(&self, title: &str, k: usize) -> Vec<Recommendation> {
        recommendations::recommend(&self.movies, &self.similarity, title, k)
    }

    /// Top-`k` movies similar to the first movie with catalog id `id`
    pub fn recommend_by_id(&self, id: i64, k: usize) -> Vec<Recommendation> {
        match recommendations::find_by_id(&self.movies, id) {
            Some(row) => recommendations::rank_from(&self.movies, &self.similarity, row, k),
            None => Vec::new(),
        }
    }
}

/// Everything served for one metadata snapshot: the engine plus display
/// details keyed by movie id
#[derive(Debug, Clone)]
pub struct Catalog {
    engine: RecommendationEngine,
    details: HashMap<i64, MovieDetails>,
    built_at: DateTime<Utc>,
}

impl Catalog {
    pub fn build(
        movies: &[MovieRow],
        credits: &[CreditRow],
        max_features: usize,
    ) -> Result<Self, EngineError> {
        let engine = RecommendationEngine::build(movies, credits, max_features)?;

        let mut details = HashMap::with_capacity(movies.len());
        for row in movies {
            details.entry(row.id).or_insert_with(|| MovieDetails::from(row));
        }

        Ok(Self {
            engine,
            details,
            built_at: Utc::now(),
        })
    }

    pub fn engine(&self) -> &RecommendationEngine {
        &self.engine
    }

    pub fn details(&self, id: i64) -> Option<&MovieDetails> {
        self.details.get(&id)
    }

    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            movies: self.engine.movies().len(),
            vocabulary: self.engine.vocabulary().len(),
            built_at: self.built_at,
        }
    }
}

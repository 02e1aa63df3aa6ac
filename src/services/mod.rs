pub mod engine;
pub mod providers;
pub mod recommendations;
pub mod similarity;
pub mod tags;
pub mod vectorizer;

pub use engine::{Catalog, RecommendationEngine};

use crate::models::{MovieRecord, Recommendation};

use super::similarity::SimilarityMatrix;

/// Position of the first movie whose title matches exactly.
///
/// Titles are not unique; the first row in index order wins.
pub fn find_by_title(index: &[MovieRecord], title: &str) -> Option<usize> {
    index.iter().position(|m| m.title == title)
}

/// Position of the first movie with the given catalog id
pub fn find_by_id(index: &[MovieRecord], id: i64) -> Option<usize> {
    index.iter().position(|m| m.id == id)
}

/// Top-`k` movies most similar to `title`, most similar first.
///
/// An unknown title yields an empty list rather than an error.
pub fn recommend(
    index: &[MovieRecord],
    similarity: &SimilarityMatrix,
    title: &str,
    k: usize,
) -> Vec<Recommendation> {
    match find_by_title(index, title) {
        Some(row) => rank_from(index, similarity, row, k),
        None => {
            tracing::debug!(title = %title, "No movie matches recommendation query");
            Vec::new()
        }
    }
}

/// Ranks every other movie against the movie at `row`.
///
/// Order: similarity descending, ties by row index ascending. Movies whose
/// tag produced no features rank after all others so they never lead a
/// result. The queried row itself is always excluded; fewer than `k`
/// results are returned only when the corpus is smaller.
pub fn rank_from(
    index: &[MovieRecord],
    similarity: &SimilarityMatrix,
    row: usize,
    k: usize,
) -> Vec<Recommendation> {
    if k == 0 {
        return Vec::new();
    }

    let scores = similarity.row(row);
    let is_featureless = |i: usize| similarity.get(i, i) == 0.0;

    let mut candidates: Vec<usize> = (0..index.len()).filter(|&i| i != row).collect();
    candidates.sort_by(|&a, &b| {
        is_featureless(a)
            .cmp(&is_featureless(b))
            .then_with(|| scores[b].total_cmp(&scores[a]))
            .then_with(|| a.cmp(&b))
    });

    candidates
        .into_iter()
        .take(k)
        .map(|i| Recommendation {
            title: index[i].title.clone(),
            id: index[i].id,
        })
        .collect()
}

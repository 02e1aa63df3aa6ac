use super::vectorizer::FeatureMatrix;

/// Square, symmetric matrix of pairwise cosine similarities
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    n: usize,
    cells: Vec<f64>,
}

impl SimilarityMatrix {
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.cells[i * self.n + j]
    }

    /// Similarities of row `i` against every row, in index order
    pub fn row(&self, i: usize) -> &[f64] {
        &self.cells[i * self.n..(i + 1) * self.n]
    }
}

/// Computes cosine similarity between every pair of feature rows.
///
/// A row with no counts has similarity 0.0 to every row, itself included.
/// Dot products are accumulated as integers so the result only depends on
/// the input, never on iteration order.
pub fn compute(matrix: &FeatureMatrix) -> SimilarityMatrix {
    let n = matrix.n_rows();

    // column -> [(row, count)], rows ascending
    let mut postings: Vec<Vec<(usize, u64)>> = vec![Vec::new(); matrix.n_cols()];
    for i in 0..n {
        for &(col, count) in matrix.row(i) {
            postings[col].push((i, count as u64));
        }
    }

    let norms: Vec<f64> = (0..n)
        .map(|i| {
            let squared: u64 = matrix.row(i).iter().map(|&(_, c)| (c as u64) * (c as u64)).sum();
            (squared as f64).sqrt()
        })
        .collect();

    let mut cells = vec![0.0; n * n];
    let mut dots = vec![0u64; n];

    for i in 0..n {
        if norms[i] == 0.0 {
            continue;
        }

        dots.iter_mut().for_each(|d| *d = 0);
        for &(col, count) in matrix.row(i) {
            for &(j, other) in &postings[col] {
                if j > i {
                    dots[j] += count as u64 * other;
                }
            }
        }

        cells[i * n + i] = 1.0;
        for j in (i + 1)..n {
            if dots[j] == 0 {
                continue;
            }
            let sim = (dots[j] as f64 / (norms[i] * norms[j])).min(1.0);
            cells[i * n + j] = sim;
            cells[j * n + i] = sim;
        }
    }

    SimilarityMatrix { n, cells }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::vectorizer::Vectorizer;

    fn similarity_for(tags: &[&str]) -> SimilarityMatrix {
        let (_, matrix) = Vectorizer::new(5000).fit(tags).unwrap();
        compute(&matrix)
    }

    #[test]
    fn test_diagonal_is_one() {
        let sim = similarity_for(&["space war robot", "space war alien", "romance drama"]);
        for i in 0..sim.len() {
            assert_eq!(sim.get(i, i), 1.0);
        }
    }

    #[test]
    fn test_symmetric() {
        let sim = similarity_for(&[
            "space war robot",
            "space war alien alien",
            "romance drama war",
            "drama courtroom",
        ]);
        for i in 0..sim.len() {
            for j in 0..sim.len() {
                assert_eq!(sim.get(i, j), sim.get(j, i));
            }
        }
    }

    #[test]
    fn test_known_values() {
        let sim = similarity_for(&["space war robot", "space war alien", "romance drama"]);
        // Two shared terms out of three each: 2 / (sqrt(3) * sqrt(3))
        assert!((sim.get(0, 1) - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(sim.get(0, 2), 0.0);
        assert_eq!(sim.get(1, 2), 0.0);
    }

    #[test]
    fn test_empty_row_is_zero_everywhere() {
        let sim = similarity_for(&["space war", "", "war drama"]);
        assert_eq!(sim.row(1), &[0.0, 0.0, 0.0]);
        assert_eq!(sim.get(0, 1), 0.0);
        assert_eq!(sim.get(2, 1), 0.0);
    }

    #[test]
    fn test_values_within_unit_range() {
        let sim = similarity_for(&["a long heist night", "night heist heist", "city night"]);
        assert!(sim.row(0).iter().chain(sim.row(1)).all(|&v| (0.0..=1.0).contains(&v)));
    }
}

//! # Flat vector index
//!
//! An exact nearest-neighbor index over squared Euclidean distance. Every
//! query scans every stored vector; there is no approximation and no
//! pruning. That is the point: the corpus is a few hundred FAQ chunks at
//! most, and a brute-force scan is both correct and fast enough, with a
//! deterministic tie order that approximate structures cannot give.
//!
//! Usage follows an add → build → search lifecycle: vectors are appended
//! during the one-time build phase, [`FlatIndex::build`] freezes the index,
//! and only a frozen index answers queries. Positions are assigned in
//! insertion order and never change, so position *i* here stays aligned
//! with entry *i* in whatever parallel collection the caller keeps.

/// Exact brute-force nearest-neighbor index over squared L2 distance.
pub struct FlatIndex {
    dimension: usize,
    vectors: Vec<Vec<f32>>,
    built: bool,
}

impl FlatIndex {
    /// Create an empty index for vectors of length `dimension`.
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            vectors: Vec::new(),
            built: false,
        }
    }

    /// Append a vector and return its assigned position.
    ///
    /// # Errors
    /// - `"dimension mismatch"` if `vector.len() != self.dimension()`.
    /// - `"index already built"` after [`build`](Self::build); the index is
    ///   read-only once queries begin.
    pub fn add(&mut self, vector: &[f32]) -> Result<usize, &'static str> {
        if self.built {
            return Err("index already built");
        }
        if vector.len() != self.dimension {
            return Err("dimension mismatch");
        }
        let position = self.vectors.len();
        self.vectors.push(vector.to_vec());
        Ok(position)
    }

    /// Freeze the index. Must be called after the batch of adds and before
    /// [`search`](Self::search).
    pub fn build(&mut self) {
        self.built = true;
    }

    /// Number of stored vectors.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Whether the index holds no vectors.
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Vector dimensionality this index enforces.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Return up to `k` stored positions closest to `query`, as
    /// `(squared_distance, position)` pairs in ascending distance order.
    ///
    /// Distances are compared in squared form; the ranking is the same as
    /// for true Euclidean distance and skips the square root. Equidistant
    /// vectors rank by lowest position (first inserted wins).
    ///
    /// # Errors
    /// - `"dimension mismatch"` if the query length differs from the index.
    /// - `"index not built"` if [`build`](Self::build) has not been called.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<(f32, usize)>, &'static str> {
        if query.len() != self.dimension {
            return Err("dimension mismatch");
        }
        if !self.built {
            return Err("index not built");
        }

        let mut hits: Vec<(f32, usize)> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(position, stored)| (squared_l2(query, stored), position))
            .collect();
        // Stable sort keeps insertion order among equal distances.
        hits.sort_by(|a, b| a.0.total_cmp(&b.0));
        hits.truncate(k);
        Ok(hits)
    }
}

/// Squared Euclidean distance between two equal-length vectors.
pub fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y).powi(2)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn built(vectors: &[&[f32]], dimension: usize) -> FlatIndex {
        let mut index = FlatIndex::new(dimension);
        for v in vectors {
            index.add(v).unwrap();
        }
        index.build();
        index
    }

    #[test]
    fn test_add_rejects_dimension_mismatch() {
        let mut index = FlatIndex::new(3);
        assert_eq!(index.add(&[1.0, 2.0]), Err("dimension mismatch"));
        assert_eq!(index.add(&[1.0, 2.0, 3.0]), Ok(0));
        assert_eq!(index.add(&[4.0, 5.0, 6.0]), Ok(1));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_add_after_build_fails() {
        let mut index = FlatIndex::new(2);
        index.add(&[0.0, 0.0]).unwrap();
        index.build();
        assert_eq!(index.add(&[1.0, 1.0]), Err("index already built"));
    }

    #[test]
    fn test_search_requires_build() {
        let mut index = FlatIndex::new(2);
        index.add(&[0.0, 0.0]).unwrap();
        assert_eq!(index.search(&[0.0, 0.0], 1), Err("index not built"));
    }

    #[test]
    fn test_search_returns_nearest_first() {
        let index = built(&[&[0.0, 0.0], &[3.0, 4.0], &[1.0, 0.0]], 2);
        let hits = index.search(&[0.9, 0.0], 2).unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].1, 2); // (1, 0) is closest to (0.9, 0)
        assert_eq!(hits[1].1, 0);
        assert!(hits[0].0 <= hits[1].0);
    }

    #[test]
    fn test_search_distance_is_squared() {
        let index = built(&[&[3.0, 4.0]], 2);
        let hits = index.search(&[0.0, 0.0], 1).unwrap();
        assert_eq!(hits[0].0, 25.0);
    }

    #[test]
    fn test_ties_resolve_to_earliest_position() {
        // Two stored vectors equidistant from the query.
        let index = built(&[&[1.0, 0.0], &[-1.0, 0.0]], 2);
        let hits = index.search(&[0.0, 0.0], 2).unwrap();
        assert_eq!(hits[0], (1.0, 0));
        assert_eq!(hits[1], (1.0, 1));

        // Same tie with insertion order flipped.
        let index = built(&[&[-1.0, 0.0], &[1.0, 0.0]], 2);
        let hits = index.search(&[0.0, 0.0], 1).unwrap();
        assert_eq!(hits[0].1, 0);
    }

    #[test]
    fn test_k_larger_than_index() {
        let index = built(&[&[0.0], &[1.0]], 1);
        let hits = index.search(&[0.5], 10).unwrap();
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn test_empty_index_returns_no_hits() {
        let mut index = FlatIndex::new(4);
        index.build();
        let hits = index.search(&[0.0, 0.0, 0.0, 0.0], 1).unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn test_search_rejects_wrong_query_dimension() {
        let index = built(&[&[0.0, 0.0]], 2);
        assert_eq!(index.search(&[0.0], 1), Err("dimension mismatch"));
    }
}

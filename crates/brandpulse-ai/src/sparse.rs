//! Sparse feature vectors.

/// A fixed-width sparse vector of `f64` values.
///
/// Entries are kept sorted by column with no duplicates and no explicit zeros.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseVector {
    dim: usize,
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// The all-zero vector of width `dim`.
    pub fn zeros(dim: usize) -> Self {
        Self {
            dim,
            entries: Vec::new(),
        }
    }

    /// Build from `(column, value)` pairs in any order.
    ///
    /// Duplicate columns are summed and zeros dropped. Columns must be below `dim`.
    pub fn from_entries(dim: usize, mut entries: Vec<(usize, f64)>) -> Self {
        entries.sort_by_key(|&(col, _)| col);

        let mut merged: Vec<(usize, f64)> = Vec::with_capacity(entries.len());
        for (col, value) in entries {
            debug_assert!(col < dim, "column {col} out of range for width {dim}");
            if let Some((last, acc)) = merged.last_mut()
                && *last == col
            {
                *acc += value;
                continue;
            }
            merged.push((col, value));
        }
        merged.retain(|&(_, v)| v != 0.0);

        Self {
            dim,
            entries: merged,
        }
    }

    /// Concatenate blocks left to right; block `i` is shifted by the widths of
    /// blocks `0..i`.
    pub fn concat(blocks: &[SparseVector]) -> Self {
        let mut dim = 0;
        let mut entries = Vec::with_capacity(blocks.iter().map(|b| b.nnz()).sum());
        for block in blocks {
            entries.extend(block.entries.iter().map(|&(col, v)| (col + dim, v)));
            dim += block.dim;
        }
        Self { dim, entries }
    }

    /// Width of the vector.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of stored non-zero entries.
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    /// Value at `col` (zero when not stored).
    pub fn get(&self, col: usize) -> f64 {
        self.entries
            .binary_search_by_key(&col, |&(c, _)| c)
            .map(|i| self.entries[i].1)
            .unwrap_or(0.0)
    }

    /// Stored `(column, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.entries.iter().copied()
    }

    /// Dot product with a dense row of the same width.
    pub fn dot(&self, dense: &[f64]) -> f64 {
        debug_assert_eq!(dense.len(), self.dim);
        self.entries.iter().map(|&(col, v)| v * dense[col]).sum()
    }

    /// Dense copy, mostly for inspection and tests.
    pub fn to_dense(&self) -> Vec<f64> {
        let mut out = vec![0.0; self.dim];
        for &(col, v) in &self.entries {
            out[col] = v;
        }
        out
    }

    /// Scale to unit L2 norm in place. The zero vector is left unchanged.
    pub fn normalize_l2(&mut self) {
        let norm = self.entries.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
        self.scale_by_inverse(norm);
    }

    /// Scale to unit L1 norm in place. The zero vector is left unchanged.
    pub fn normalize_l1(&mut self) {
        let norm = self.entries.iter().map(|(_, v)| v.abs()).sum::<f64>();
        self.scale_by_inverse(norm);
    }

    fn scale_by_inverse(&mut self, norm: f64) {
        if norm > 0.0 {
            for (_, v) in &mut self.entries {
                *v /= norm;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_entries_sorts_merges_and_drops_zeros() {
        let v = SparseVector::from_entries(5, vec![(3, 1.0), (0, 2.0), (3, 0.5), (1, 0.0)]);
        assert_eq!(v.dim(), 5);
        assert_eq!(v.iter().collect::<Vec<_>>(), vec![(0, 2.0), (3, 1.5)]);
    }

    #[test]
    fn concat_offsets_later_blocks() {
        let text = SparseVector::from_entries(3, vec![(2, 0.5)]);
        let brand = SparseVector::from_entries(2, vec![(1, 1.0)]);
        let joined = SparseVector::concat(&[text, brand]);

        assert_eq!(joined.dim(), 5);
        assert_eq!(joined.to_dense(), vec![0.0, 0.0, 0.5, 0.0, 1.0]);
    }

    #[test]
    fn concat_of_zero_blocks_keeps_width() {
        let joined = SparseVector::concat(&[SparseVector::zeros(4), SparseVector::zeros(3)]);
        assert_eq!(joined.dim(), 7);
        assert!(joined.is_zero());
    }

    #[test]
    fn get_and_dot() {
        let v = SparseVector::from_entries(4, vec![(1, 2.0), (3, -1.0)]);
        assert_eq!(v.get(1), 2.0);
        assert_eq!(v.get(2), 0.0);
        assert_eq!(v.dot(&[10.0, 1.0, 100.0, 3.0]), -1.0);
    }

    #[test]
    fn l2_normalisation() {
        let mut v = SparseVector::from_entries(3, vec![(0, 3.0), (2, 4.0)]);
        v.normalize_l2();
        assert!((v.get(0) - 0.6).abs() < 1e-12);
        assert!((v.get(2) - 0.8).abs() < 1e-12);

        let mut zero = SparseVector::zeros(3);
        zero.normalize_l2();
        assert!(zero.is_zero());
    }

    #[test]
    fn l1_normalisation() {
        let mut v = SparseVector::from_entries(3, vec![(0, 1.0), (1, -3.0)]);
        v.normalize_l1();
        assert!((v.get(0) - 0.25).abs() < 1e-12);
        assert!((v.get(1) + 0.75).abs() < 1e-12);
    }
}

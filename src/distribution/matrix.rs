//! Provides [`WeightedSampleMatrix`].
use rayon::prelude::*;
use serde::{Serialize, Deserialize};

use crate::{Error, Result};
use crate::common::constants::SIMPLEX_TOLERANCE;

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;


/// How the matrix is renormalized after each pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Normalization {
    /// Each category row sums to `1 / n_categories`.
    /// A row is divided by `row_sum * n_categories`.
    #[default]
    PerCategory,
    /// The whole matrix sums to `1`.
    Global,
}


/// Dense boosting distribution over `(category, document)` pairs,
/// stored row by row (one row per category).
/// All entries are non-negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedSampleMatrix {
    n_categories: usize,
    n_documents: usize,
    weights: Vec<f64>,
}


impl WeightedSampleMatrix {
    /// Allocate a zero matrix of `n_categories` rows
    /// and `n_documents` columns.
    /// Returns [`Error::Allocation`] if the storage cannot be reserved.
    pub fn open(n_categories: usize, n_documents: usize) -> Result<Self> {
        let allocation = Error::Allocation { n_categories, n_documents };
        let size = match n_categories.checked_mul(n_documents) {
            Some(size) => size,
            None => return Err(allocation),
        };

        let mut weights = Vec::new();
        if weights.try_reserve_exact(size).is_err() {
            return Err(allocation);
        }
        weights.resize(size, 0f64);

        Ok(Self { n_categories, n_documents, weights })
    }


    /// Number of rows.
    #[inline]
    pub fn n_categories(&self) -> usize {
        self.n_categories
    }


    /// Number of columns.
    #[inline]
    pub fn n_documents(&self) -> usize {
        self.n_documents
    }


    /// Weight of `(category, document)`.
    #[inline]
    pub fn get(&self, category: usize, document: usize) -> f64 {
        self.weights[category * self.n_documents + document]
    }


    /// Overwrite the weight of `(category, document)`.
    #[inline]
    pub fn set(&mut self, category: usize, document: usize, value: f64) {
        self.weights[category * self.n_documents + document] = value;
    }


    /// The weights of `category`, indexed by document.
    #[inline]
    pub fn row(&self, category: usize) -> &[f64] {
        let start = category * self.n_documents;
        &self.weights[start..start + self.n_documents]
    }


    /// Mutable rows, in parallel.
    #[inline]
    pub(crate) fn par_rows_mut(&mut self)
        -> rayon::slice::ChunksMut<'_, f64>
    {
        self.weights.par_chunks_mut(self.n_documents.max(1))
    }


    /// Sum of every row, in category order.
    pub fn row_sums(&self) -> Vec<f64> {
        if self.n_documents == 0 {
            return vec![0f64; self.n_categories];
        }
        self.weights.par_chunks(self.n_documents)
            .map(|row| row.iter().sum::<f64>())
            .collect()
    }


    /// Sum of the whole matrix.
    /// Rows are summed first, then the row sums in category order.
    pub fn total(&self) -> f64 {
        self.row_sums().into_iter().sum::<f64>()
    }


    /// Renormalize in place.
    /// An all-zero (or non-finite) row or matrix is
    /// [`Error::DegenerateDistribution`]; nothing is modified then.
    pub fn normalize(&mut self, normalization: Normalization) -> Result<()> {
        if self.weights.is_empty() {
            return Err(Error::DegenerateDistribution("the empty matrix".into()));
        }

        let n_categories = self.n_categories as f64;
        match normalization {
            Normalization::PerCategory => {
                let sums = self.row_sums();
                if let Some(c) = sums.iter().position(|s| !valid_sum(*s)) {
                    return Err(Error::DegenerateDistribution(format!("row {c}")));
                }
                self.par_rows_mut()
                    .zip(sums)
                    .for_each(|(row, sum)| {
                        let z = sum * n_categories;
                        row.iter_mut().for_each(|w| { *w /= z; });
                    });
            },
            Normalization::Global => {
                let total = self.total();
                if !valid_sum(total) {
                    return Err(Error::DegenerateDistribution("the matrix".into()));
                }
                self.weights.par_iter_mut()
                    .for_each(|w| { *w /= total; });
            },
        }
        Ok(())
    }


    /// Returns `true` if the matrix satisfies `normalization`
    /// up to a small tolerance.
    pub fn is_normalized(&self, normalization: Normalization) -> bool {
        if self.weights.iter().any(|w| *w < 0f64) { return false; }

        match normalization {
            Normalization::PerCategory => {
                let target = 1f64 / self.n_categories as f64;
                self.row_sums()
                    .into_iter()
                    .all(|s| (s - target).abs() < SIMPLEX_TOLERANCE)
            },
            Normalization::Global => {
                (self.total() - 1f64).abs() < SIMPLEX_TOLERANCE
            },
        }
    }


    /// Write the matrix to `path` as JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer(writer, self)?;
        Ok(())
    }


    /// Read a matrix written by [`WeightedSampleMatrix::save`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let matrix: Self = serde_json::from_reader(reader)?;
        if matrix.weights.len() != matrix.n_categories * matrix.n_documents {
            return Err(Error::Config(format!(
                "stored distribution has {} weights for {} x {} pairs",
                matrix.weights.len(),
                matrix.n_categories,
                matrix.n_documents,
            )));
        }
        Ok(matrix)
    }


    /// Release the matrix.
    #[inline]
    pub fn close(self) {}
}


#[inline(always)]
fn valid_sum(sum: f64) -> bool {
    sum.is_finite() && sum > 0f64
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_get_set() {
        let mut m = WeightedSampleMatrix::open(2, 3).unwrap();
        assert_eq!(m.get(1, 2), 0f64);
        m.set(1, 2, 0.5);
        assert_eq!(m.get(1, 2), 0.5);
        assert_eq!(m.row(1), &[0f64, 0f64, 0.5]);
    }

    #[test]
    fn open_overflow_is_allocation_error() {
        let m = WeightedSampleMatrix::open(usize::MAX, 2);
        assert!(matches!(m, Err(Error::Allocation { .. })));
    }

    #[test]
    fn per_category_normalization() {
        let mut m = WeightedSampleMatrix::open(2, 2).unwrap();
        m.set(0, 0, 1.0); m.set(0, 1, 3.0);
        m.set(1, 0, 2.0); m.set(1, 1, 2.0);
        m.normalize(Normalization::PerCategory).unwrap();

        assert!(m.is_normalized(Normalization::PerCategory));
        assert!((m.get(0, 0) - 0.125).abs() < 1e-12);
        assert!((m.get(1, 1) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn global_normalization() {
        let mut m = WeightedSampleMatrix::open(2, 2).unwrap();
        m.set(0, 0, 1.0);
        m.set(1, 1, 3.0);
        m.normalize(Normalization::Global).unwrap();

        assert!(m.is_normalized(Normalization::Global));
        assert!((m.get(1, 1) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn zero_row_is_rejected() {
        let mut m = WeightedSampleMatrix::open(2, 2).unwrap();
        m.set(0, 0, 1.0);
        let err = m.normalize(Normalization::PerCategory);
        assert!(matches!(err, Err(Error::DegenerateDistribution(_))));
        assert_eq!(m.get(0, 0), 1.0);

        let mut zero = WeightedSampleMatrix::open(1, 1).unwrap();
        assert!(zero.normalize(Normalization::Global).is_err());
    }
}

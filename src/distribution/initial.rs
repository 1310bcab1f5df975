//! Provides the initial distribution policies.
use serde::{Serialize, Deserialize};

use crate::{Error, Result, TrainingIndex};
use crate::common::checkers;
use crate::common::constants::DEFAULT_POSITIVE_BOOST;
use super::matrix::{Normalization, WeightedSampleMatrix};

use std::fmt;
use std::str::FromStr;


/// The distribution a training run starts from.
///
/// Parse one from its name with [`str::parse`]:
/// `"uniform"`, `"category-oriented"` or `"max-f1"`.
/// Any other name is [`Error::UnsupportedDistribution`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InitialDistribution {
    /// Every cell is `1 / (n_documents * n_categories)`.
    Uniform,

    /// Within a category, the `p` positives share a mass of
    /// `positive_boost` (`positive_boost / p` each) and
    /// the `n` negatives share a mass of `1` (`1 / n` each).
    /// Categories without positives or without negatives
    /// weigh every document `1 / n_documents`.
    CategoryOriented {
        /// Mass of the positives relative to the negatives.
        positive_boost: f64,
    },

    /// Positives weigh `n_documents / n_positives`, negatives weigh `1`.
    MaxF1,
}


impl Default for InitialDistribution {
    fn default() -> Self {
        Self::Uniform
    }
}


impl fmt::Display for InitialDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uniform => write!(f, "uniform"),
            Self::CategoryOriented { positive_boost } => {
                write!(f, "category-oriented (boost {positive_boost})")
            },
            Self::MaxF1 => write!(f, "max-f1"),
        }
    }
}


impl FromStr for InitialDistribution {
    type Err = Error;
    fn from_str(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "uniform" => Ok(Self::Uniform),
            "category-oriented" | "category" => Ok(Self::CategoryOriented {
                positive_boost: DEFAULT_POSITIVE_BOOST,
            }),
            "max-f1" | "maxf1" => Ok(Self::MaxF1),
            _ => Err(Error::UnsupportedDistribution(name.to_string())),
        }
    }
}


impl InitialDistribution {
    /// Fill `matrix` for `index` and renormalize it with `normalization`.
    /// The uniform policy already satisfies both normalizations
    /// and is written as is.
    pub fn populate(
        &self,
        matrix: &mut WeightedSampleMatrix,
        index: &TrainingIndex,
        normalization: Normalization,
    ) -> Result<()>
    {
        let n_documents = matrix.n_documents();
        let n_categories = matrix.n_categories();
        if n_documents != index.n_documents() || n_categories != index.n_categories() {
            return Err(Error::CategoryMismatch {
                expected: index.n_categories() * index.n_documents(),
                found: n_categories * n_documents,
            });
        }
        if n_documents == 0 || n_categories == 0 {
            return Err(Error::EmptyIndex("no cell to weigh"));
        }

        match *self {
            Self::Uniform => {
                let uni = 1f64 / (n_documents * n_categories) as f64;
                for c in 0..n_categories {
                    for d in 0..n_documents {
                        matrix.set(c, d, uni);
                    }
                }
                return Ok(());
            },
            Self::CategoryOriented { positive_boost } => {
                checkers::positive_factor("positive boost", positive_boost)?;
                for c in 0..n_categories {
                    let n_pos = index.n_positives(c);
                    let n_neg = n_documents - n_pos;
                    let (pos, neg) = if n_pos == 0 || n_neg == 0 {
                        let uni = 1f64 / n_documents as f64;
                        (uni, uni)
                    } else {
                        (positive_boost / n_pos as f64, 1f64 / n_neg as f64)
                    };
                    fill_row(matrix, index, c, pos, neg);
                }
            },
            Self::MaxF1 => {
                for c in 0..n_categories {
                    let n_pos = index.n_positives(c);
                    let pos = if n_pos == 0 {
                        1f64
                    } else {
                        n_documents as f64 / n_pos as f64
                    };
                    fill_row(matrix, index, c, pos, 1f64);
                }
            },
        }

        matrix.normalize(normalization)
    }
}


fn fill_row(
    matrix: &mut WeightedSampleMatrix,
    index: &TrainingIndex,
    category: usize,
    pos: f64,
    neg: f64,
)
{
    for d in 0..matrix.n_documents() {
        let w = if index.is_positive(category, d) { pos } else { neg };
        matrix.set(category, d, w);
    }
}

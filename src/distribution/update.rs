//! Provides the distribution update applied after every boosting round.
use rayon::prelude::*;
use serde::{Serialize, Deserialize};

use crate::{Error, Result, TrainingIndex, WeakHypothesis};
use super::matrix::{Normalization, WeightedSampleMatrix};

use std::fmt;
use std::str::FromStr;


/// The function applied to `label * value * correction`
/// to obtain the multiplicative weight update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BoostingLoss {
    /// `exp(x)`.
    #[default]
    Exponential,
    /// `log2(1 + exp(x))`, equal to `1` at `x = 0` like the exponential.
    Logistic,
}


impl BoostingLoss {
    /// The name of the loss function.
    pub fn name(&self) -> &str {
        match self {
            Self::Exponential => "exponential",
            Self::Logistic => "logistic",
        }
    }


    /// Loss value at `exponent`.
    #[inline(always)]
    pub fn eval(&self, exponent: f64) -> f64 {
        match self {
            Self::Exponential => exponent.exp(),
            Self::Logistic => exponent.exp().ln_1p() / std::f64::consts::LN_2,
        }
    }
}


impl fmt::Display for BoostingLoss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}


impl FromStr for BoostingLoss {
    type Err = Error;
    fn from_str(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "exponential" | "exp" => Ok(Self::Exponential),
            "logistic" => Ok(Self::Logistic),
            _ => Err(Error::Config(format!("unknown loss function `{name}`"))),
        }
    }
}


/// Per-outcome multipliers of the update exponent.
/// The label of a document is `-1` if it belongs to the category
/// and `+1` otherwise; a positive value predicts membership.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Corrections {
    /// `label < 0`, `value > 0`.
    pub true_positive: f64,
    /// `label > 0`, `value < 0`.
    pub true_negative: f64,
    /// `label < 0`, `value < 0`.
    pub false_negative: f64,
    /// `label > 0`, `value > 0`.
    pub false_positive: f64,
}


impl Default for Corrections {
    fn default() -> Self {
        Self {
            true_positive: 1f64,
            true_negative: 1f64,
            false_negative: 1f64,
            false_positive: 1f64,
        }
    }
}


impl Corrections {
    /// The multiplier of the `(label, value)` outcome.
    /// A zero value belongs to no outcome and gets `1`.
    #[inline(always)]
    pub fn factor(&self, label: f64, value: f64) -> f64 {
        if label < 0f64 && value > 0f64 {
            self.true_positive
        } else if label > 0f64 && value < 0f64 {
            self.true_negative
        } else if label < 0f64 && value < 0f64 {
            self.false_negative
        } else if label > 0f64 && value > 0f64 {
            self.false_positive
        } else {
            1f64
        }
    }
}


/// The update applied after each round:
/// `w <- w * loss(label * value * correction)`, then renormalization.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DistributionUpdate {
    /// Loss applied to the exponent.
    pub loss: BoostingLoss,
    /// Outcome multipliers.
    pub corrections: Corrections,
    /// Renormalization after the update.
    pub normalization: Normalization,
}


impl DistributionUpdate {
    /// Update `matrix` with the outputs of `hypothesis` on `index`.
    /// Rows are independent and updated in parallel.
    pub fn apply(
        &self,
        matrix: &mut WeightedSampleMatrix,
        index: &TrainingIndex,
        hypothesis: &WeakHypothesis,
    ) -> Result<()>
    {
        if hypothesis.n_categories() != matrix.n_categories() {
            return Err(Error::CategoryMismatch {
                expected: matrix.n_categories(),
                found: hypothesis.n_categories(),
            });
        }

        let loss = self.loss;
        let corrections = self.corrections;
        matrix.par_rows_mut()
            .enumerate()
            .for_each(|(c, row)| {
                let stump = hypothesis[c];
                let present = index.feature_set(stump.pivot);
                let labels = index.labels(c);
                row.iter_mut()
                    .enumerate()
                    .for_each(|(d, w)| {
                        // A stump without pivot only renormalizes.
                        let value = match stump.pivot {
                            Some(_) => stump.value(present.contains(d)),
                            None => 0f64,
                        };
                        let label = if labels.contains(d) { -1f64 } else { 1f64 };
                        let correction = corrections.factor(label, value);
                        *w *= loss.eval(label * value * correction);
                    });
            });

        matrix.normalize(self.normalization)
    }
}

//! This file defines some functions that checks some pre-conditions
//! E.g., the number of boosting rounds or folds.

use crate::{Error, Result};


/// Check whether the number of boosting rounds is positive.
#[inline(always)]
pub fn iterations(n_iterations: usize) -> Result<()> {
    if n_iterations == 0 {
        return Err(Error::Config(
            "the number of iterations must be positive".into()
        ));
    }
    Ok(())
}


/// Check whether `n_folds` is usable on `n_documents` documents.
#[inline(always)]
pub fn n_folds(n_folds: usize, n_documents: usize) -> Result<()> {
    if n_folds == 0 {
        return Err(Error::Config("the number of folds must be positive".into()));
    }
    if n_folds > n_documents {
        return Err(Error::Config(format!(
            "cannot split {n_documents} documents into {n_folds} folds"
        )));
    }
    Ok(())
}


/// Check whether the training percentage is in `(0, 1]`.
#[inline(always)]
pub fn percentage(ratio: f64) -> Result<()> {
    if !(ratio > 0f64 && ratio <= 1f64) {
        return Err(Error::Config(format!(
            "training percentage must be in (0, 1]. got {ratio}."
        )));
    }
    Ok(())
}


/// Check whether a multiplicative factor is finite and positive.
#[inline(always)]
pub fn positive_factor(name: &str, factor: f64) -> Result<()> {
    if !(factor.is_finite() && factor > 0f64) {
        return Err(Error::Config(format!(
            "{name} must be a finite positive number. got {factor}."
        )));
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn test_iterations_success() {
        assert!(iterations(1).is_ok());
        assert!(iterations(500).is_ok());
    }

    #[test]
    fn test_iterations_failure() {
        assert!(matches!(iterations(0), Err(Error::Config(_))));
    }

    #[test]
    fn test_n_folds_success() {
        assert!(n_folds(1, 1).is_ok());
        assert!(n_folds(10, 100).is_ok());
        assert!(n_folds(10, 10).is_ok());
    }

    #[test]
    fn test_n_folds_failure() {
        assert!(n_folds(0, 10).is_err());
        assert!(n_folds(11, 10).is_err());
    }

    #[test]
    fn test_percentage_success() {
        assert!(percentage(1f64).is_ok());
        assert!(percentage(0.01).is_ok());
    }

    #[test]
    fn test_percentage_failure() {
        assert!(percentage(0f64).is_err());
        assert!(percentage(1.0001).is_err());
        assert!(percentage(f64::NAN).is_err());
    }

    #[test]
    fn test_positive_factor() {
        assert!(positive_factor("boost", 2.5).is_ok());
        assert!(positive_factor("boost", 0f64).is_err());
        assert!(positive_factor("boost", f64::INFINITY).is_err());
    }
}

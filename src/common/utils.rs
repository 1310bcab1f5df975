//! This file provides some common functions
//! such as the stump confidence and the binary cosine similarity.
use fixedbitset::FixedBitSet;


/// Returns the smoothed confidence `½·ln((pos + eps) / (neg + eps))`.
#[inline(always)]
pub(crate) fn confidence(pos: f64, neg: f64, eps: f64) -> f64 {
    0.5 * ((pos + eps) / (neg + eps)).ln()
}


/// Returns the Schapire-Singer normalization factor of one block,
/// `2·sqrt(pos·neg)`.
#[inline(always)]
pub(crate) fn block_z(pos: f64, neg: f64) -> f64 {
    2f64 * (pos.max(0f64) * neg.max(0f64)).sqrt()
}


/// Cosine similarity of two binary vectors.
#[inline(always)]
pub(crate) fn binary_cosine(a: &FixedBitSet, b: &FixedBitSet) -> f64 {
    let na = a.count_ones(..);
    let nb = b.count_ones(..);
    if na == 0 || nb == 0 { return 0f64; }

    let common = a.intersection(b).count() as f64;
    common / ((na * nb) as f64).sqrt()
}


/// Population variance of `values`. Empty input has zero variance.
#[inline(always)]
pub(crate) fn variance(values: &[f64]) -> f64 {
    if values.is_empty() { return 0f64; }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    values.iter()
        .map(|v| (v - mean).powi(2))
        .sum::<f64>()
        / n
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_is_antisymmetric() {
        let eps = 1e-3;
        let c = confidence(0.3, 0.1, eps);
        assert!(c > 0f64);
        assert!((c + confidence(0.1, 0.3, eps)).abs() < 1e-12);
        assert_eq!(confidence(0.2, 0.2, eps), 0f64);
    }

    #[test]
    fn cosine_of_identical_sets_is_one() {
        let mut a = FixedBitSet::with_capacity(8);
        a.insert(1); a.insert(5);
        assert!((binary_cosine(&a, &a) - 1f64).abs() < 1e-12);

        let empty = FixedBitSet::with_capacity(8);
        assert_eq!(binary_cosine(&a, &empty), 0f64);
    }

    #[test]
    fn variance_of_constant_is_zero() {
        assert_eq!(variance(&[2f64, 2f64, 2f64]), 0f64);
        assert!((variance(&[1f64, 3f64]) - 1f64).abs() < 1e-12);
        assert_eq!(variance(&[]), 0f64);
    }
}

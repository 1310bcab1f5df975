//! Provides the decision stump produced by one boosting round.
use serde::{Serialize, Deserialize};

use std::ops::Index;


/// One category's decision stump.
/// The stump outputs `c1` on documents containing `pivot`, `c0` otherwise.
/// A `None` pivot means no feature discriminated the category;
/// the stump then always outputs `c0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HypothesisData {
    /// The tested feature.
    pub pivot: Option<usize>,
    /// Output when the pivot is absent.
    pub c0: f64,
    /// Output when the pivot is present.
    pub c1: f64,
}


impl HypothesisData {
    /// Construct a stump testing `pivot`.
    #[inline]
    pub fn new(pivot: usize, c0: f64, c1: f64) -> Self {
        Self { pivot: Some(pivot), c0, c1 }
    }


    /// Construct a stump that outputs `c0` everywhere.
    #[inline]
    pub fn constant(c0: f64) -> Self {
        Self { pivot: None, c0, c1: 0f64 }
    }


    /// The output for a document that does (not) contain the pivot.
    #[inline]
    pub fn value(&self, has_pivot: bool) -> f64 {
        match self.pivot {
            Some(_) if has_pivot => self.c1,
            _ => self.c0,
        }
    }
}


/// The decision stumps of one boosting round, one per category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeakHypothesis {
    data: Vec<HypothesisData>,
}


impl WeakHypothesis {
    /// Construct a hypothesis from per-category stumps.
    #[inline]
    pub fn new(data: Vec<HypothesisData>) -> Self {
        Self { data }
    }


    /// Number of categories covered.
    #[inline]
    pub fn n_categories(&self) -> usize {
        self.data.len()
    }


    /// Iterate over the stumps in category order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, HypothesisData> {
        self.data.iter()
    }


    /// Concatenate the stumps of `hypotheses`, in order.
    pub fn concat<'a, I>(hypotheses: I) -> Self
        where I: IntoIterator<Item = &'a WeakHypothesis>,
    {
        let data = hypotheses.into_iter()
            .flat_map(|h| h.data.iter().copied())
            .collect();
        Self { data }
    }
}


impl Index<usize> for WeakHypothesis {
    type Output = HypothesisData;
    #[inline]
    fn index(&self, category: usize) -> &Self::Output {
        &self.data[category]
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stump_value() {
        let h = HypothesisData::new(3, -1.0, 2.0);
        assert_eq!(h.value(true), 2.0);
        assert_eq!(h.value(false), -1.0);

        let c = HypothesisData::constant(0.5);
        assert_eq!(c.value(true), 0.5);
        assert_eq!(c.value(false), 0.5);
    }

    #[test]
    fn concat_keeps_order() {
        let a = WeakHypothesis::new(vec![HypothesisData::constant(1.0)]);
        let b = WeakHypothesis::new(vec![
            HypothesisData::new(0, 0.0, 1.0),
            HypothesisData::constant(-1.0),
        ]);
        let ab = WeakHypothesis::concat([&a, &b]);
        assert_eq!(ab.n_categories(), 3);
        assert_eq!(ab[0], a[0]);
        assert_eq!(ab[2], b[1]);
    }
}

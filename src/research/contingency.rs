//! Contingency tables and the measures derived from them.
use serde::{Serialize, Deserialize};

use std::ops::AddAssign;


/// Counts of one category's binary decisions.
///
/// Ratios whose denominator is zero are `1`:
/// a category that is never assigned and never relevant
/// is classified perfectly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContingencyTable {
    /// Assigned and relevant.
    pub true_positives: usize,
    /// Assigned, not relevant.
    pub false_positives: usize,
    /// Relevant, not assigned.
    pub false_negatives: usize,
    /// Neither assigned nor relevant.
    pub true_negatives: usize,
}


impl ContingencyTable {
    /// Construct an empty table.
    pub fn new() -> Self {
        Self::default()
    }


    /// Count one decision.
    #[inline]
    pub fn record(&mut self, predicted: bool, actual: bool) {
        match (predicted, actual) {
            (true, true) => self.true_positives += 1,
            (true, false) => self.false_positives += 1,
            (false, true) => self.false_negatives += 1,
            (false, false) => self.true_negatives += 1,
        }
    }


    /// Number of decisions counted.
    #[inline]
    pub fn total(&self) -> usize {
        self.true_positives
            + self.false_positives
            + self.false_negatives
            + self.true_negatives
    }


    /// `tp / (tp + fp)`.
    pub fn precision(&self) -> f64 {
        ratio(self.true_positives, self.true_positives + self.false_positives)
    }


    /// `tp / (tp + fn)`.
    pub fn recall(&self) -> f64 {
        ratio(self.true_positives, self.true_positives + self.false_negatives)
    }


    /// `2 tp / (2 tp + fp + fn)`.
    pub fn f1(&self) -> f64 {
        let tp2 = 2 * self.true_positives;
        ratio(tp2, tp2 + self.false_positives + self.false_negatives)
    }


    /// `(tp + tn) / total`.
    pub fn accuracy(&self) -> f64 {
        ratio(self.true_positives + self.true_negatives, self.total())
    }


    /// `1 - accuracy`.
    pub fn error(&self) -> f64 {
        1f64 - self.accuracy()
    }
}


impl AddAssign for ContingencyTable {
    fn add_assign(&mut self, other: Self) {
        self.true_positives += other.true_positives;
        self.false_positives += other.false_positives;
        self.false_negatives += other.false_negatives;
        self.true_negatives += other.true_negatives;
    }
}


/// One [`ContingencyTable`] per category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContingencyTableSet {
    tables: Vec<ContingencyTable>,
}


impl ContingencyTableSet {
    /// Construct empty tables for `n_categories` categories.
    pub fn new(n_categories: usize) -> Self {
        Self { tables: vec![ContingencyTable::default(); n_categories] }
    }


    /// Number of categories.
    #[inline]
    pub fn n_categories(&self) -> usize {
        self.tables.len()
    }


    /// The table of `category`.
    #[inline]
    pub fn table(&self, category: usize) -> &ContingencyTable {
        &self.tables[category]
    }


    /// The mutable table of `category`.
    #[inline]
    pub fn table_mut(&mut self, category: usize) -> &mut ContingencyTable {
        &mut self.tables[category]
    }


    /// Iterate over the tables in category order.
    pub fn iter(&self) -> std::slice::Iter<'_, ContingencyTable> {
        self.tables.iter()
    }


    /// Add `other` category by category.
    /// Missing categories on either side count as empty tables.
    pub fn merge(&mut self, other: &Self) {
        if other.tables.len() > self.tables.len() {
            self.tables.resize(other.tables.len(), ContingencyTable::default());
        }
        self.tables.iter_mut()
            .zip(other.tables.iter())
            .for_each(|(t, o)| { *t += *o; });
    }


    /// Sum of every table.
    pub fn micro(&self) -> ContingencyTable {
        let mut sum = ContingencyTable::default();
        self.tables.iter().for_each(|t| { sum += *t; });
        sum
    }


    /// Micro-averaged F1.
    pub fn micro_f1(&self) -> f64 {
        self.micro().f1()
    }


    /// Mean of the per-category precisions.
    pub fn macro_precision(&self) -> f64 {
        self.mean(ContingencyTable::precision)
    }


    /// Mean of the per-category recalls.
    pub fn macro_recall(&self) -> f64 {
        self.mean(ContingencyTable::recall)
    }


    /// Mean of the per-category F1 values.
    pub fn macro_f1(&self) -> f64 {
        self.mean(ContingencyTable::f1)
    }


    fn mean<F>(&self, measure: F) -> f64
        where F: Fn(&ContingencyTable) -> f64,
    {
        if self.tables.is_empty() { return 0f64; }
        self.tables.iter().map(measure).sum::<f64>() / self.tables.len() as f64
    }
}


#[inline(always)]
fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 { 1f64 } else { num as f64 / den as f64 }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measures() {
        let t = ContingencyTable {
            true_positives: 2,
            false_positives: 1,
            false_negatives: 1,
            true_negatives: 6,
        };
        assert_eq!(t.total(), 10);
        assert!((t.precision() - 2.0 / 3.0).abs() < 1e-12);
        assert!((t.recall() - 2.0 / 3.0).abs() < 1e-12);
        assert!((t.f1() - 2.0 / 3.0).abs() < 1e-12);
        assert!((t.accuracy() - 0.8).abs() < 1e-12);
        assert!((t.error() - 0.2).abs() < 1e-12);

        let empty = ContingencyTable::new();
        assert_eq!(empty.f1(), 1f64);
    }

    #[test]
    fn micro_and_macro() {
        let mut set = ContingencyTableSet::new(2);
        set.table_mut(0).record(true, true);
        set.table_mut(1).record(true, false);
        set.table_mut(1).record(false, true);

        let micro = set.micro();
        assert_eq!(micro.total(), 3);
        assert!((set.micro_f1() - 0.5).abs() < 1e-12);
        assert!((set.macro_f1() - 0.5).abs() < 1e-12);

        let mut other = ContingencyTableSet::new(2);
        other.merge(&set);
        other.merge(&set);
        assert_eq!(other.table(1).total(), 4);
    }
}

use rand::prelude::*;
use colored::Colorize;
use serde::{Serialize, Deserialize};

use crate::Index;
use crate::common::constants::{DEFAULT_N_FOLDS, DEFAULT_SEED, PRINT_WIDTH};

use std::iter::Iterator;


/// How documents are dealt into folds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FoldSplit {
    /// Contiguous blocks of the (optionally shuffled) document order.
    #[default]
    Simple,
    /// Documents grouped by stratum, then dealt round-robin,
    /// so that every fold gets its share of every stratum.
    Stratified,
}


/// A struct that generates
/// pairs of training/test document ids for cross validation.
/// Ids are sorted within each side of a pair.
///
/// With one fold, the single pair trains and tests on every document.
///
/// # Example
/// ```
/// use tcboost::prelude::*;
/// use tcboost::research::{Folds, FoldSplit};
///
/// let mut index = MemoryIndex::new(1);
/// let c = index.add_category("c", None).unwrap();
/// for d in 0..6 {
///     let labels = if d % 2 == 0 { vec![c] } else { vec![] };
///     index.add_document(&[0], &labels).unwrap();
/// }
///
/// let folds = Folds::new(&index)
///     .n_folds(3)
///     .split(FoldSplit::Stratified)
///     .seed(777)
///     .shuffle();
/// for (train, test) in folds {
///     assert_eq!(train.len(), 4);
///     assert_eq!(test.len(), 2);
/// }
/// ```
pub struct Folds {
    current_fold: usize,
    n_folds: usize,
    seed: u64,
    split: FoldSplit,
    // Stratum of every document; `None` for unlabeled documents.
    strata: Vec<Option<usize>>,
    ix: Vec<usize>,
    verbose: bool,
}


impl Folds {
    /// Construct a new instance of `Folds` over every document of `index`.
    /// Under [`FoldSplit::Stratified`], the stratum of a document is
    /// its smallest category.
    #[inline]
    pub fn new(index: &dyn Index) -> Self {
        let n_documents = index.n_documents();
        let mut strata = vec![None; n_documents];
        for c in (0..index.n_categories()).rev() {
            for d in index.category_documents(c) {
                strata[d] = Some(c);
            }
        }
        Self::with_strata(strata)
    }


    /// Folds stratified on the membership of `category` alone.
    #[inline]
    pub fn binary(index: &dyn Index, category: usize) -> Self {
        let strata = (0..index.n_documents())
            .map(|d| index.has_document_category(d, category).then_some(0))
            .collect();
        Self::with_strata(strata).split(FoldSplit::Stratified)
    }


    fn with_strata(strata: Vec<Option<usize>>) -> Self {
        let ix = (0..strata.len()).collect::<Vec<_>>();
        Self {
            current_fold: 0,
            n_folds: DEFAULT_N_FOLDS,
            seed: DEFAULT_SEED,
            split: FoldSplit::default(),
            verbose: false,
            strata,
            ix,
        }
    }


    /// Set the number of folds.
    /// Default value is `10.`
    #[inline]
    pub fn n_folds(mut self, n_folds: usize) -> Self {
        self.n_folds = n_folds;
        self
    }


    /// Set the splitting strategy.
    #[inline]
    pub fn split(mut self, split: FoldSplit) -> Self {
        self.split = split;
        self
    }


    /// Set the seed of the randomness for shuffling.
    /// Default vaule is `1234.`
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }


    /// Set the verbose parameter.
    /// If `true`, `Folds` prints some information
    /// when generating a train/test pair.
    /// Default vaule is `false.`
    #[inline]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }


    /// Shuffle the documents.
    /// By default, `Folds` does not shuffle the documents.
    #[inline]
    pub fn shuffle(mut self) -> Self {
        let mut rng = StdRng::seed_from_u64(self.seed);
        self.ix.shuffle(&mut rng);
        self
    }


    /// Number of documents.
    #[inline]
    pub fn n_documents(&self) -> usize {
        self.ix.len()
    }


    /// The fold of every document, in the current order.
    fn assignment(&self) -> Vec<usize> {
        let n_documents = self.ix.len();
        let mut fold_of = vec![0usize; n_documents];
        match self.split {
            FoldSplit::Simple => {
                for (position, &d) in self.ix.iter().enumerate() {
                    fold_of[d] = position * self.n_folds / n_documents;
                }
            },
            FoldSplit::Stratified => {
                let mut order = self.ix.clone();
                // stable: keeps the shuffled order inside a stratum
                order.sort_by_key(|&d| self.strata[d]);
                for (position, d) in order.into_iter().enumerate() {
                    fold_of[d] = position % self.n_folds;
                }
            },
        }
        fold_of
    }


    /// Returns the training/test ids for `i`th fold.
    #[inline]
    fn fold_at(&self, i: usize) -> (Vec<usize>, Vec<usize>) {
        let n_documents = self.ix.len();
        if self.n_folds == 1 {
            let all = (0..n_documents).collect::<Vec<_>>();
            return (all.clone(), all);
        }

        let fold_of = self.assignment();
        (0..n_documents).partition(|&d| fold_of[d] != i)
    }
}


impl Iterator for Folds {
    type Item = (Vec<usize>, Vec<usize>);
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_fold >= self.n_folds { return None; }
        if self.ix.is_empty() { return None; }

        let output = self.fold_at(self.current_fold);
        self.current_fold += 1;

        if self.verbose {
            let train_size = output.0.len();
            let test_size = output.1.len();
            println!(
                "{}    {}    {}",
                format!("  [{: >3}'th fold]", self.current_fold).bold().red(),
                format!("[TRAIN {:>PRINT_WIDTH$}]", train_size).bold().green(),
                format!("[TEST {:>PRINT_WIDTH$}]", test_size).bold().yellow(),
            );
        }

        Some(output)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryIndex;

    fn index(n: usize) -> MemoryIndex {
        let mut index = MemoryIndex::new(1);
        index.add_category("c", None).unwrap();
        for d in 0..n {
            let labels = if d < 3 { vec![0] } else { vec![] };
            index.add_document(&[0], &labels).unwrap();
        }
        index
    }

    #[test]
    fn simple_folds_partition_the_documents() {
        let index = index(10);
        let mut seen = Vec::new();
        for (train, test) in Folds::new(&index).n_folds(3) {
            assert_eq!(train.len() + test.len(), 10);
            assert!(test.iter().all(|d| !train.contains(d)));
            seen.extend(test);
        }
        seen.sort_unstable();
        assert_eq!(seen, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn stratified_folds_spread_positives() {
        let index = index(9);
        for (_, test) in Folds::binary(&index, 0).n_folds(3).seed(9).shuffle() {
            let positives = test.iter().filter(|&&d| d < 3).count();
            assert_eq!(positives, 1);
        }
    }

    #[test]
    fn one_fold_is_train_on_test() {
        let index = index(4);
        let folds = Folds::new(&index).n_folds(1).collect::<Vec<_>>();
        assert_eq!(folds.len(), 1);
        assert_eq!(folds[0].0, folds[0].1);
        assert_eq!(folds[0].1.len(), 4);
    }
}

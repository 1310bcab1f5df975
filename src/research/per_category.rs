//! Binary k-fold evaluation, one category at a time.
use rayon::prelude::*;

use crate::{
    Result,
    Index,
    IndexView,
    Learner,

    common::checkers,
    common::constants::{DEFAULT_N_FOLDS, DEFAULT_SEED},
    common::status::{CancellationToken, Progress, StatusListener},
};
use super::contingency::{ContingencyTable, ContingencyTableSet};
use super::cross_validation::Folds;
use super::kfold::contingency;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};


/// The outcome of a [`PerCategoryKFold`] run.
#[derive(Debug, Clone, PartialEq)]
pub struct PerCategoryReport {
    /// One table per category; skipped categories keep empty tables.
    pub tables: ContingencyTableSet,
    /// Folds run for every category; `0` if skipped.
    pub folds: Vec<usize>,
    /// Categories with too few positives to be cross-validated.
    pub skipped: Vec<usize>,
}


/// Cross-validates every category as its own binary problem,
/// with folds stratified on the category.
///
/// A category with fewer positives than folds is evaluated on as many
/// folds as it has positives; a single fold trains and tests once on
/// every document. A category with no positive is skipped and
/// reported in [`PerCategoryReport::skipped`].
pub struct PerCategoryKFold<L> {
    learner: L,
    n_folds: usize,
    seed: u64,
    parallel: bool,
    progress: Progress,
}


impl<L> PerCategoryKFold<L> {
    /// Construct an evaluator of `learner` with `10` folds.
    pub fn new(learner: L) -> Self {
        Self {
            learner,
            n_folds: DEFAULT_N_FOLDS,
            seed: DEFAULT_SEED,
            parallel: false,
            progress: Progress::default(),
        }
    }


    /// Set the number of folds.
    pub fn n_folds(mut self, n_folds: usize) -> Self {
        self.n_folds = n_folds;
        self
    }


    /// Set the seed of the shuffling.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }


    /// Evaluate the categories in parallel.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }


    /// Report the share of evaluated categories.
    pub fn status<S>(mut self, listener: S) -> Self
        where S: StatusListener + 'static,
    {
        self.progress.set_listener(Arc::new(listener));
        self
    }


    /// Stop with [`Error::Cancelled`](crate::Error::Cancelled)
    /// once `token` is cancelled.
    pub fn cancel_with(mut self, token: CancellationToken) -> Self {
        self.progress.set_token(token);
        self
    }
}


impl<L> PerCategoryKFold<L>
    where L: Learner,
{
    /// The number of folds `category` can be split into.
    pub fn effective_folds(&self, index: &dyn Index, category: usize) -> usize {
        let n_positives = index.category_documents_count(category);
        self.n_folds.min(n_positives)
    }


    /// Run the evaluation on every category of `index`.
    pub fn evaluate(&self, index: &dyn Index) -> Result<PerCategoryReport> {
        checkers::n_folds(self.n_folds, index.n_documents())?;

        let n_categories = index.n_categories();
        let done = AtomicUsize::new(0);
        let run = |category: usize| -> Result<(ContingencyTable, usize)> {
            let outcome = self.evaluate_category(index, category)?;
            let n = done.fetch_add(1, Ordering::SeqCst) + 1;
            self.progress.report(n, n_categories);
            Ok(outcome)
        };

        let outcomes = if self.parallel {
            (0..n_categories).into_par_iter()
                .map(run)
                .collect::<Result<Vec<_>>>()?
        } else {
            (0..n_categories)
                .map(run)
                .collect::<Result<Vec<_>>>()?
        };

        let mut tables = ContingencyTableSet::new(n_categories);
        let mut folds = Vec::with_capacity(n_categories);
        let mut skipped = Vec::new();
        for (category, (table, n_folds)) in outcomes.into_iter().enumerate() {
            *tables.table_mut(category) = table;
            folds.push(n_folds);
            if n_folds == 0 {
                skipped.push(category);
            }
        }

        Ok(PerCategoryReport { tables, folds, skipped })
    }


    fn evaluate_category(&self, index: &dyn Index, category: usize)
        -> Result<(ContingencyTable, usize)>
    {
        let n_folds = self.effective_folds(index, category);
        if n_folds == 0 {
            log::warn!(
                "category {category} has {} positives, skipped",
                index.category_documents_count(category),
            );
            return Ok((ContingencyTable::default(), 0));
        }
        if n_folds < self.n_folds {
            log::info!("category {category}: {n_folds} folds instead of {}", self.n_folds);
        }

        let folds = Folds::binary(index, category)
            .n_folds(n_folds)
            .seed(self.seed)
            .shuffle();

        let mut table = ContingencyTable::default();
        for (train, test) in folds {
            self.progress.checkpoint()?;

            let train_view = IndexView::new(index, train, vec![category])?;
            let classifier = self.learner.build(&train_view)?;

            let test_view = IndexView::new(index, test, vec![category])?;
            let (tables, _) = contingency(&test_view, &classifier);
            table += *tables.table(0);
        }
        Ok((table, n_folds))
    }
}

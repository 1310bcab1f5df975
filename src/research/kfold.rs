//! Multi-label k-fold evaluation.
use rand::prelude::*;
use rayon::prelude::*;

use crate::{
    Result,
    Index,
    IndexView,
    Learner,
    Classifier,
    ClassificationResult,

    common::checkers,
    common::constants::{DEFAULT_N_FOLDS, DEFAULT_SEED},
    common::status::{CancellationToken, Progress, StatusListener},
};
use super::contingency::ContingencyTableSet;
use super::cross_validation::{FoldSplit, Folds};

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};


/// The outcome of a [`KFoldEvaluator`] run.
#[derive(Debug, Clone, PartialEq)]
pub struct KFoldReport {
    /// Contingency tables summed over the folds.
    pub tables: ContingencyTableSet,
    /// Out-of-fold scores, by document, if kept.
    /// Categories are numbered as in the evaluated index.
    pub predictions: Option<Vec<ClassificationResult>>,
    /// Number of folds run.
    pub n_folds: usize,
}


/// Trains on `k - 1` folds, classifies the held-out fold,
/// and sums the per-category contingency tables.
/// With `k = 1`, trains and tests once on every document.
///
/// # Example
/// ```
/// use tcboost::prelude::*;
/// use tcboost::research::KFoldEvaluator;
///
/// let mut index = MemoryIndex::new(2);
/// let c = index.add_category("c", None).unwrap();
/// for d in 0..8 {
///     let (features, labels) = if d % 2 == 0 {
///         (vec![0], vec![c])
///     } else {
///         (vec![1], vec![])
///     };
///     index.add_document(&features, &labels).unwrap();
/// }
///
/// let learner = AdaBoost::init(MultiPivot::new()).max_iterations(5);
/// let report = KFoldEvaluator::new(learner)
///     .n_folds(4)
///     .evaluate(&index)
///     .unwrap();
/// assert_eq!(report.tables.table(c).total(), 8);
/// ```
pub struct KFoldEvaluator<L> {
    learner: L,
    n_folds: usize,
    split: FoldSplit,
    training_percentage: f64,
    seed: u64,
    shuffle: bool,
    parallel: bool,
    keep_predictions: bool,
    verbose: bool,
    progress: Progress,
}


impl<L> KFoldEvaluator<L> {
    /// Construct an evaluator of `learner` with `10` simple folds.
    pub fn new(learner: L) -> Self {
        Self {
            learner,
            n_folds: DEFAULT_N_FOLDS,
            split: FoldSplit::Simple,
            training_percentage: 1f64,
            seed: DEFAULT_SEED,
            shuffle: false,
            parallel: false,
            keep_predictions: false,
            verbose: false,
            progress: Progress::default(),
        }
    }


    /// Set the number of folds.
    pub fn n_folds(mut self, n_folds: usize) -> Self {
        self.n_folds = n_folds;
        self
    }


    /// Set the splitting strategy.
    pub fn split(mut self, split: FoldSplit) -> Self {
        self.split = split;
        self
    }


    /// Train on this share, in `(0, 1]`, of each training part.
    pub fn training_percentage(mut self, percentage: f64) -> Self {
        self.training_percentage = percentage;
        self
    }


    /// Set the seed of the shuffling and of the training subsampling.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }


    /// Shuffle the documents before dealing the folds.
    pub fn shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }


    /// Run the folds in parallel.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }


    /// Keep the out-of-fold scores.
    pub fn keep_predictions(mut self, keep: bool) -> Self {
        self.keep_predictions = keep;
        self
    }


    /// Print a banner per fold.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }


    /// Report the share of completed folds.
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


    /// The evaluated learner.
    pub fn learner(&self) -> &L {
        &self.learner
    }
}


/// Tables and kept predictions of one fold.
type FoldOutcome = (ContingencyTableSet, Vec<ClassificationResult>);


impl<L> KFoldEvaluator<L>
    where L: Learner,
{
    /// Run the folds on `index`.
    pub fn evaluate(&self, index: &dyn Index) -> Result<KFoldReport> {
        checkers::n_folds(self.n_folds, index.n_documents())?;
        checkers::percentage(self.training_percentage)?;

        let mut folds = Folds::new(index)
            .n_folds(self.n_folds)
            .split(self.split)
            .seed(self.seed)
            .verbose(self.verbose);
        if self.shuffle {
            folds = folds.shuffle();
        }
        let folds = folds.collect::<Vec<_>>();
        log::info!(
            "{}-fold evaluation of {} on {} documents",
            folds.len(),
            self.learner.name(),
            index.n_documents(),
        );

        let done = AtomicUsize::new(0);
        let run = |(i, (train, test)): (usize, (Vec<usize>, Vec<usize>))|
            -> Result<FoldOutcome>
        {
            let outcome = self.run_fold(index, i, train, test)?;
            let n = done.fetch_add(1, Ordering::SeqCst) + 1;
            self.progress.report(n, self.n_folds);
            Ok(outcome)
        };

        let outcomes = if self.parallel {
            folds.into_par_iter()
                .enumerate()
                .map(run)
                .collect::<Result<Vec<FoldOutcome>>>()?
        } else {
            folds.into_iter()
                .enumerate()
                .map(run)
                .collect::<Result<Vec<FoldOutcome>>>()?
        };

        let mut tables = ContingencyTableSet::new(index.n_categories());
        let mut predictions = Vec::new();
        for (fold_tables, fold_predictions) in outcomes {
            tables.merge(&fold_tables);
            predictions.extend(fold_predictions);
        }
        predictions.sort_by_key(|p| p.document);

        Ok(KFoldReport {
            tables,
            predictions: self.keep_predictions.then_some(predictions),
            n_folds: self.n_folds,
        })
    }


    fn run_fold(
        &self,
        index: &dyn Index,
        fold: usize,
        train: Vec<usize>,
        test: Vec<usize>,
    ) -> Result<FoldOutcome>
    {
        self.progress.checkpoint()?;

        let seed = self.seed.wrapping_add(fold as u64);
        let train = subsample(train, self.training_percentage, seed);
        let train_view = IndexView::with_documents(index, train)?;
        let classifier = self.learner.build(&train_view)?;

        let test_view = IndexView::with_documents(index, test)?;
        let (tables, mut predictions) = contingency(&test_view, &classifier);
        log::debug!(
            "fold {}: micro F1 {:.4}",
            fold + 1,
            tables.micro_f1(),
        );

        if !self.keep_predictions {
            predictions.clear();
        }
        predictions.iter_mut()
            .for_each(|p| { p.document = test_view.base_document(p.document); });
        Ok((tables, predictions))
    }
}


/// Classify every document of `index` and count the decisions
/// of every category of `index`.
pub(crate) fn contingency<C>(index: &dyn Index, classifier: &C)
    -> (ContingencyTableSet, Vec<ClassificationResult>)
    where C: Classifier + Sync,
{
    let n_categories = index.n_categories();
    let mut tables = ContingencyTableSet::new(n_categories);
    let results = classifier.classify_all(index);
    for result in results.iter() {
        let accepted = classifier.accepted(result);
        for c in 0..n_categories {
            let predicted = accepted.contains(&c);
            let actual = index.has_document_category(result.document, c);
            tables.table_mut(c).record(predicted, actual);
        }
    }
    (tables, results)
}


/// Keep `⌈percentage · |documents|⌉` documents at random, in order.
pub(crate) fn subsample(documents: Vec<usize>, percentage: f64, seed: u64)
    -> Vec<usize>
{
    if percentage >= 1f64 { return documents; }

    let n_keep = ((documents.len() as f64 * percentage).ceil() as usize)
        .max(1)
        .min(documents.len());
    let mut rng = StdRng::seed_from_u64(seed);
    let mut kept = documents.choose_multiple(&mut rng, n_keep)
        .copied()
        .collect::<Vec<_>>();
    kept.sort_unstable();
    kept
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AdaBoost, Error, MemoryIndex, MultiPivot};

    fn index() -> MemoryIndex {
        let mut index = MemoryIndex::new(3);
        index.add_category("even", None).unwrap();
        index.add_category("big", None).unwrap();
        for d in 0..12 {
            let mut labels = Vec::new();
            let mut features = vec![2];
            if d % 2 == 0 { labels.push(0); features.push(0); }
            if d >= 6 { labels.push(1); features.push(1); }
            index.add_document(&features, &labels).unwrap();
        }
        index
    }

    fn learner() -> AdaBoost<MultiPivot> {
        AdaBoost::init(MultiPivot::new()).max_iterations(5)
    }

    #[test]
    fn totals_equal_evaluated_pairs() {
        let index = index();
        let report = KFoldEvaluator::new(learner())
            .n_folds(3)
            .shuffle(true)
            .parallel(true)
            .keep_predictions(true)
            .evaluate(&index)
            .unwrap();
        for c in 0..2 {
            assert_eq!(report.tables.table(c).total(), 12);
        }
        let predictions = report.predictions.unwrap();
        let documents = predictions.iter().map(|p| p.document).collect::<Vec<_>>();
        assert_eq!(documents, (0..12).collect::<Vec<_>>());
    }

    #[test]
    fn single_fold_is_one_pass() {
        let index = index();
        let report = KFoldEvaluator::new(learner())
            .n_folds(1)
            .evaluate(&index)
            .unwrap();
        assert_eq!(report.n_folds, 1);
        assert_eq!(report.tables.micro().total(), 24);
        assert_eq!(report.tables.micro_f1(), 1f64);
        assert!(report.predictions.is_none());
    }

    #[test]
    fn invalid_parameters() {
        let index = index();
        let too_many = KFoldEvaluator::new(learner()).n_folds(13).evaluate(&index);
        assert!(matches!(too_many, Err(Error::Config(_))));

        let percentage = KFoldEvaluator::new(learner())
            .training_percentage(0.0)
            .evaluate(&index);
        assert!(matches!(percentage, Err(Error::Config(_))));
    }

    #[test]
    fn subsample_is_sorted_and_seeded() {
        let kept = subsample((0..10).collect(), 0.35, 3);
        assert_eq!(kept.len(), 4);
        assert!(kept.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(kept, subsample((0..10).collect(), 0.35, 3));
    }
}

//! Provides [`AdaBoost`](AdaBoost), the AdaBoost.MH multi-label learner
//! by Schapire & Singer, 2000.
use crate::{
    Booster,
    Error,
    Result,
    Index,
    Learner,
    WeakLearner,
    WeakHypothesis,
    TrainingIndex,
    WeightedSampleMatrix,
    InitialDistribution,
    Normalization,
    BoostingLoss,
    Corrections,
    DistributionUpdate,

    common::checkers,
    common::constants::DEFAULT_MAX_ITERATIONS,
    common::status::{CancellationToken, Progress, StatusListener},
    research::Research,
};
use super::adaboost_classifier::AdaBoostClassifier;

use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use std::sync::Arc;


/// Defines `AdaBoost` for multi-label categorization (AdaBoost.MH).
///
/// `AdaBoost` keeps one weight per `(category, document)` pair
/// in a [`WeightedSampleMatrix`].
/// Each round asks the weak learner for one decision stump per category,
/// stores it, and multiplies every weight by
/// `loss(label * value * correction)`.
///
/// `AdaBoost` is a [`Learner`]: it holds configuration only and
/// can build any number of classifiers.
///
/// # Example
/// ```
/// use tcboost::prelude::*;
///
/// let mut index = MemoryIndex::new(2);
/// let sports = index.add_category("sports", None).unwrap();
/// index.add_document(&[0], &[sports]).unwrap();
/// index.add_document(&[1], &[]).unwrap();
///
/// let learner = AdaBoost::init(MultiPivot::new())
///     .max_iterations(5)
///     .initial_distribution(InitialDistribution::Uniform);
///
/// let f = learner.build(&index).unwrap();
/// assert_eq!(f.iterations(), 5);
///
/// let result = f.classify(&index, 0);
/// assert_eq!(f.accepted(&result), vec![sports]);
/// ```
pub struct AdaBoost<W> {
    weak_learner: W,

    // Number of rounds.
    max_iterations: usize,

    initial: InitialDistribution,
    update: DistributionUpdate,

    // Optional. If set, the final matrix is written there.
    keep_distribution: Option<PathBuf>,

    // Build the grouped cache of the returned classifier.
    grouped: bool,

    progress: Progress,
}


impl<W> AdaBoost<W> {
    /// Initialize the `AdaBoost` with its weak learner.
    /// By default, `AdaBoost` runs
    /// [`DEFAULT_MAX_ITERATIONS`] rounds from the uniform distribution
    /// with the exponential loss and per-category normalization.
    pub fn init(weak_learner: W) -> Self {
        Self {
            weak_learner,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            initial: InitialDistribution::default(),
            update: DistributionUpdate::default(),
            keep_distribution: None,
            grouped: false,
            progress: Progress::default(),
        }
    }


    /// Set the number of boosting rounds.
    pub fn max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = iterations;
        self
    }


    /// Set the initial distribution.
    pub fn initial_distribution(mut self, initial: InitialDistribution) -> Self {
        self.initial = initial;
        self
    }


    /// Set the loss applied to the update exponent.
    pub fn loss(mut self, loss: BoostingLoss) -> Self {
        self.update.loss = loss;
        self
    }


    /// Set the per-outcome corrections of the update exponent.
    pub fn corrections(mut self, corrections: Corrections) -> Self {
        self.update.corrections = corrections;
        self
    }


    /// Set the renormalization applied after initialization
    /// and after every round.
    pub fn normalization(mut self, normalization: Normalization) -> Self {
        self.update.normalization = normalization;
        self
    }


    /// Write the final weighted-sample matrix to `path`.
    /// By default it is dropped.
    pub fn keep_distribution<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.keep_distribution = Some(path.as_ref().to_path_buf());
        self
    }


    /// Return classifiers in grouped mode.
    pub fn grouped(mut self, grouped: bool) -> Self {
        self.grouped = grouped;
        self
    }


    /// Report the completed percentage after every round.
    pub fn status<S>(mut self, listener: S) -> Self
        where S: StatusListener + 'static,
    {
        self.progress.set_listener(Arc::new(listener));
        self
    }


    /// Stop with [`Error::Cancelled`] once `token` is cancelled.
    pub fn cancel_with(mut self, token: CancellationToken) -> Self {
        self.progress.set_token(token);
        self
    }


    /// The weak learner.
    pub fn weak_learner(&self) -> &W {
        &self.weak_learner
    }


    /// The configured number of rounds.
    pub fn n_iterations(&self) -> usize {
        self.max_iterations
    }


    /// The configured distribution update.
    pub fn update(&self) -> &DistributionUpdate {
        &self.update
    }


    /// Prepare a round-by-round run on `index`.
    /// Use [`Booster::run`] to drive it,
    /// or [`Logger`](crate::research::Logger) to record every round.
    pub fn trainer(&self, index: &dyn Index) -> Result<AdaBoostTrainer<'_>> {
        checkers::iterations(self.max_iterations)?;
        if index.n_documents() == 0 {
            return Err(Error::EmptyIndex("no documents"));
        }
        if index.n_categories() == 0 {
            return Err(Error::EmptyIndex("no categories"));
        }

        Ok(AdaBoostTrainer {
            index: TrainingIndex::from_index(index),
            matrix: None,
            hypotheses: Vec::new(),
            max_iterations: self.max_iterations,
            initial: self.initial,
            update: self.update,
            keep_distribution: self.keep_distribution.as_deref(),
            grouped: self.grouped,
            progress: &self.progress,
        })
    }
}


impl<W> Learner for AdaBoost<W>
    where W: WeakLearner + Send,
{
    type Output = AdaBoostClassifier;


    fn name(&self) -> &str {
        "AdaBoost.MH"
    }


    fn build(&self, index: &dyn Index) -> Result<Self::Output> {
        log::info!(
            "{} with {}: {} documents, {} categories, {} rounds",
            self.name(),
            self.weak_learner.name(),
            index.n_documents(),
            index.n_categories(),
            self.max_iterations,
        );
        self.trainer(index)?.run(&self.weak_learner)
    }


    fn merge(&self, classifiers: Vec<Self::Output>) -> Result<Self::Output> {
        AdaBoostClassifier::merge(classifiers)
    }
}


/// One training run of [`AdaBoost`] on a fixed index.
pub struct AdaBoostTrainer<'a> {
    index: TrainingIndex,

    // Allocated in `preprocess`.
    matrix: Option<WeightedSampleMatrix>,

    hypotheses: Vec<WeakHypothesis>,

    max_iterations: usize,
    initial: InitialDistribution,
    update: DistributionUpdate,
    keep_distribution: Option<&'a Path>,
    grouped: bool,
    progress: &'a Progress,
}


impl AdaBoostTrainer<'_> {
    /// The current distribution, once allocated.
    pub fn distribution(&self) -> Option<&WeightedSampleMatrix> {
        self.matrix.as_ref()
    }


    /// The hypotheses produced so far.
    pub fn hypotheses(&self) -> &[WeakHypothesis] {
        &self.hypotheses[..]
    }
}


impl Booster for AdaBoostTrainer<'_> {
    type Output = AdaBoostClassifier;


    fn preprocess<W>(&mut self, _weak_learner: &W) -> Result<()>
        where W: WeakLearner
    {
        let n_categories = self.index.n_categories();
        let n_documents = self.index.n_documents();

        let mut matrix = WeightedSampleMatrix::open(n_categories, n_documents)?;
        self.initial.populate(&mut matrix, &self.index, self.update.normalization)?;
        log::debug!("initial distribution: {}", self.initial);

        self.matrix = Some(matrix);
        self.hypotheses = Vec::with_capacity(self.max_iterations);
        Ok(())
    }


    fn boost<W>(&mut self, weak_learner: &W, iteration: usize)
        -> Result<ControlFlow<usize>>
        where W: WeakLearner
    {
        if self.max_iterations < iteration {
            return Ok(ControlFlow::Break(self.max_iterations));
        }
        self.progress.checkpoint()?;

        let matrix = self.matrix.as_mut()
            .ok_or_else(|| Error::Config("`preprocess` was not called".into()))?;

        // Get a new hypothesis
        let h = weak_learner.produce(&self.index, matrix);
        self.update.apply(matrix, &self.index, &h)?;
        self.hypotheses.push(h);

        log::trace!("round {iteration} done");
        self.progress.report(iteration, self.max_iterations);
        Ok(ControlFlow::Continue(()))
    }


    fn postprocess<W>(&mut self, _weak_learner: &W) -> Result<Self::Output>
        where W: WeakLearner
    {
        if let Some(matrix) = self.matrix.take() {
            match self.keep_distribution {
                Some(path) => {
                    matrix.save(path)?;
                    log::info!("distribution written to {}", path.display());
                },
                None => matrix.close(),
            }
        }

        let hypotheses = std::mem::take(&mut self.hypotheses);
        let classifier = AdaBoostClassifier::new(
            hypotheses, self.index.n_categories()
        )?;
        Ok(if self.grouped { classifier.grouped() } else { classifier })
    }
}


impl Research for AdaBoostTrainer<'_> {
    type Output = AdaBoostClassifier;
    fn current_classifier(&self) -> Result<Self::Output> {
        AdaBoostClassifier::new(
            self.hypotheses.clone(), self.index.n_categories()
        )
    }
}

//! Provides `Booster` trait.

use crate::{Result, WeakLearner};

use std::ops::ControlFlow;


/// The trait [`Booster`](Booster) defines the standard framework of Boosting.
///
/// You need to implement [`Booster::preprocess`](Booster::preprocess),
/// [`Booster::boost`](Booster::boost),
/// and [`Booster::postprocess`](Booster::postprocess)
/// to write a new boosting algorithm.
pub trait Booster {
    /// The classifier returned by [`Booster::postprocess`].
    type Output;


    /// A main function that runs boosting algorithm.
    fn run<W>(&mut self, weak_learner: &W) -> Result<Self::Output>
        where W: WeakLearner
    {
        self.preprocess(weak_learner)?;

        let flow = (1..).try_for_each(|iter| {
            match self.boost(weak_learner, iter) {
                Ok(ControlFlow::Continue(())) => ControlFlow::Continue(()),
                Ok(ControlFlow::Break(_)) => ControlFlow::Break(Ok(())),
                Err(e) => ControlFlow::Break(Err(e)),
            }
        });
        if let ControlFlow::Break(Err(e)) = flow {
            return Err(e);
        }

        self.postprocess(weak_learner)
    }


    /// Pre-processing for `self`.
    /// As you can see in [`Booster::run`](Booster::run),
    /// This method is called before the boosting process.
    fn preprocess<W>(&mut self, weak_learner: &W) -> Result<()>
        where W: WeakLearner;


    /// Boosting step per iteration.
    /// This method returns
    /// `ControlFlow::Continue(())` if the stopping criterion is not satisfied,
    /// `ControlFlow::Break(terminated_iter)` otherwise.
    fn boost<W>(&mut self, weak_learner: &W, iteration: usize)
        -> Result<ControlFlow<usize>>
        where W: WeakLearner;


    /// Post-processing.
    /// This method returns the trained classifier.
    fn postprocess<W>(&mut self, weak_learner: &W) -> Result<Self::Output>
        where W: WeakLearner;
}

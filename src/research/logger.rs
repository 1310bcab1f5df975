use colored::Colorize;

use crate::{
    Booster,
    Classifier,
    Index,
    Result,
    WeakLearner,
};
use super::loss_functions::hamming_loss;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;

const HEADER: &str = "Round,TrainLoss,TestLoss,Time\n";
const WIDTH: usize = 9;


/// Struct `Logger` runs a booster round by round and
/// logs the Hamming loss on a training and a test index
/// after every round, with the cumulative running time in milliseconds.
///
/// # Example
/// ```no_run
/// use tcboost::prelude::*;
/// use tcboost::research::Logger;
///
/// # fn run(train: &MemoryIndex, test: &MemoryIndex) -> tcboost::Result<()> {
/// let learner = AdaBoost::init(MultiPivot::new())
///     .max_iterations(100);
/// let trainer = learner.trainer(train)?;
///
/// let mut logger = Logger::new(trainer, MultiPivot::new(), train, test)
///     .print_every(10);
/// let f = logger.run("adaboost.csv")?;
/// # Ok(())
/// # }
/// ```
pub struct Logger<'a, B, W> {
    booster: B,
    weak_learner: W,
    train: &'a dyn Index,
    test: &'a dyn Index,
    print_every: usize,
}


impl<'a, B, W> Logger<'a, B, W> {
    /// Create a new instance of `Logger`.
    pub fn new(
        booster: B,
        weak_learner: W,
        train: &'a dyn Index,
        test: &'a dyn Index,
    ) -> Self
    {
        Self { booster, weak_learner, train, test, print_every: 0 }
    }


    /// Print the losses every `round` rounds.
    /// `0` (the default) prints nothing.
    pub fn print_every(mut self, round: usize) -> Self {
        self.print_every = round;
        self
    }
}


impl<B, W> Logger<'_, B, W>
    where B: Booster + Research,
          <B as Research>::Output: Classifier + Sync,
          W: WeakLearner,
{
    /// Run the given boosting algorithm with logging.
    /// Note that this method is almost the same as `Booster::run`.
    /// This method measures running time per iteration.
    pub fn run<P: AsRef<Path>>(&mut self, filename: P)
        -> Result<<B as Booster>::Output>
    {
        let mut file = BufWriter::new(File::create(filename)?);
        file.write_all(HEADER.as_bytes())?;

        self.booster.preprocess(&self.weak_learner)?;

        // Cumulative time
        let mut time_acc = 0;

        for iter in 1.. {
            let now = Instant::now();
            let flow = self.booster.boost(&self.weak_learner, iter)?;
            time_acc += now.elapsed().as_millis();

            if flow.is_break() { break; }

            let classifier = self.booster.current_classifier()?;
            let train = hamming_loss(self.train, &classifier);
            let test = hamming_loss(self.test, &classifier);

            let line = format!("{iter},{train},{test},{time_acc}\n");
            file.write_all(line.as_bytes())?;

            if self.print_every > 0 && iter % self.print_every == 0 {
                println!(
                    "{}    {}    {}",
                    format!("  [ROUND {iter:>WIDTH$}]").bold().red(),
                    format!("[TRAIN {train:>WIDTH$.4}]").bold().green(),
                    format!("[TEST {test:>WIDTH$.4}]").bold().yellow(),
                );
            }
        }
        file.flush()?;

        self.booster.postprocess(&self.weak_learner)
    }
}


/// Implementing this trait allows you to use `Logger` to
/// log algorithm's behavor.
pub trait Research {
    /// The classifier of the current state.
    type Output;

    /// Returns the classifier at current state.
    fn current_classifier(&self) -> Result<Self::Output>;
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AdaBoost, MemoryIndex, MultiPivot};

    #[test]
    fn one_line_per_round() {
        let mut index = MemoryIndex::new(2);
        index.add_category("a", None).unwrap();
        index.add_document(&[0], &[0]).unwrap();
        index.add_document(&[1], &[]).unwrap();

        let learner = AdaBoost::init(MultiPivot::new()).max_iterations(3);
        let trainer = learner.trainer(&index).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.csv");

        let f = Logger::new(trainer, MultiPivot::new(), &index, &index)
            .run(&path)
            .unwrap();
        assert_eq!(f.n_rounds(), 3);

        let log = std::fs::read_to_string(&path).unwrap();
        let lines = log.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], HEADER.trim_end());
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("1,0,0,"));
    }
}

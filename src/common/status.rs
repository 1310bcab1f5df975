//! Progress callbacks and cooperative cancellation.
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::{Error, Result};


/// Receives coarse progress notifications,
/// e.g., after each boosting round or each fold.
///
/// Any `Fn(f64) + Send + Sync` closure is a `StatusListener`.
pub trait StatusListener: Send + Sync {
    /// Called with the completed percentage in `[0, 100]`.
    fn operation_status(&self, percent: f64);
}


impl<F> StatusListener for F
    where F: Fn(f64) + Send + Sync,
{
    #[inline]
    fn operation_status(&self, percent: f64) {
        self(percent)
    }
}


/// A shared flag checked between rounds and folds.
/// Cloning a token yields a handle to the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);


impl CancellationToken {
    /// Construct a token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }


    /// Request cancellation of every operation holding this token.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }


    /// Returns `true` if [`CancellationToken::cancel`] was called.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}


/// Optional listener plus optional token, as carried by
/// learners and evaluators.
#[derive(Clone, Default)]
pub(crate) struct Progress {
    listener: Option<Arc<dyn StatusListener>>,
    token: Option<CancellationToken>,
}


impl Progress {
    pub(crate) fn set_listener(&mut self, listener: Arc<dyn StatusListener>) {
        self.listener = Some(listener);
    }


    pub(crate) fn set_token(&mut self, token: CancellationToken) {
        self.token = Some(token);
    }


    /// Report `done` out of `total` steps.
    #[inline]
    pub(crate) fn report(&self, done: usize, total: usize) {
        if let Some(listener) = &self.listener {
            let percent = if total == 0 {
                100f64
            } else {
                100f64 * done as f64 / total as f64
            };
            listener.operation_status(percent.min(100f64));
        }
    }


    /// Returns `Err(Error::Cancelled)` once the token is cancelled.
    #[inline]
    pub(crate) fn checkpoint(&self) -> Result<()> {
        match &self.token {
            Some(token) if token.is_cancelled() => Err(Error::Cancelled),
            _ => Ok(()),
        }
    }
}


impl std::fmt::Debug for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Progress")
            .field("listener", &self.listener.is_some())
            .field("token", &self.token)
            .finish()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn closure_listener_receives_percentages() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut progress = Progress::default();
        progress.set_listener(Arc::new(move |p: f64| {
            sink.lock().unwrap().push(p);
        }));

        progress.report(1, 4);
        progress.report(4, 4);
        assert_eq!(*seen.lock().unwrap(), vec![25f64, 100f64]);
    }

    #[test]
    fn cancelled_token_stops_checkpoint() {
        let token = CancellationToken::new();
        let mut progress = Progress::default();
        progress.set_token(token.clone());
        assert!(progress.checkpoint().is_ok());

        token.cancel();
        assert!(matches!(progress.checkpoint(), Err(Error::Cancelled)));
    }
}

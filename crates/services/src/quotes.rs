//! Motivational quotes shown under the dashboard greeting.

use std::time::Duration;

use rand::Rng;
use rand::seq::IndexedRandom;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::error::QuoteError;

const BUILTIN_QUOTES: &[&str] = &[
    "Small steps every day add up to big results.",
    "You don't have to be great to start, but you have to start to be great.",
    "Focus on progress, not perfection.",
    "The expert in anything was once a beginner.",
    "Discipline is choosing what you want most over what you want now.",
    "One topic at a time. You've got this.",
    "Rest if you must, but don't quit.",
    "Future you will thank you for today's revision.",
];

/// Non-empty, fixed set of quotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotePool {
    quotes: Vec<String>,
}

impl QuotePool {
    /// # Errors
    ///
    /// Returns `QuoteError::EmptyPool` when no non-blank quote is given.
    pub fn new<I, S>(quotes: I) -> Result<Self, QuoteError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let quotes: Vec<String> = quotes
            .into_iter()
            .map(Into::into)
            .filter(|q| !q.trim().is_empty())
            .collect();
        if quotes.is_empty() {
            return Err(QuoteError::EmptyPool);
        }
        Ok(Self { quotes })
    }

    #[must_use]
    pub fn builtin() -> Self {
        Self {
            quotes: BUILTIN_QUOTES.iter().map(|q| (*q).to_owned()).collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    #[must_use]
    pub fn quotes(&self) -> &[String] {
        &self.quotes
    }

    /// Uniform pick using the caller's RNG.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        self.quotes
            .choose(rng)
            .map_or(BUILTIN_QUOTES[0], String::as_str)
    }

    /// Uniform pick that avoids repeating `current` when the pool allows it.
    pub fn pick_other<R: Rng + ?Sized>(&self, current: &str, rng: &mut R) -> &str {
        let others: Vec<&String> = self.quotes.iter().filter(|q| *q != current).collect();
        others
            .choose(rng)
            .map_or_else(|| self.pick(rng), |q| q.as_str())
    }

    #[must_use]
    pub fn random(&self) -> &str {
        self.pick(&mut rand::rng())
    }
}

impl Default for QuotePool {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Background task that swaps the visible quote on a fixed period.
///
/// The task stops when the handle is dropped or [`QuoteRotation::cancel`] is
/// called. Must be started from inside a tokio runtime.
pub struct QuoteRotation {
    current: watch::Receiver<String>,
    task: JoinHandle<()>,
}

impl QuoteRotation {
    #[must_use]
    pub fn start(pool: QuotePool, period: Duration) -> Self {
        let (tx, rx) = watch::channel(pool.random().to_owned());
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let next = pool.pick_other(&tx.borrow(), &mut rand::rng()).to_owned();
                tracing::trace!(quote = %next, "rotating quote");
                if tx.send(next).is_err() {
                    break;
                }
            }
        });
        Self { current: rx, task }
    }

    #[must_use]
    pub fn current(&self) -> String {
        self.current.borrow().clone()
    }

    /// Independent receiver for consumers that outlive a borrow of `self`.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.current.clone()
    }

    /// Wait for the next quote. `None` once the rotation has stopped.
    pub async fn changed(&mut self) -> Option<String> {
        self.current.changed().await.ok()?;
        Some(self.current.borrow_and_update().clone())
    }

    pub fn cancel(&self) {
        self.task.abort();
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for QuoteRotation {
    fn drop(&mut self) {
        self.task.abort();
    }
}

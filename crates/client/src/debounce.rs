//! Input coalescing for the query control.
//!
//! A [`Debouncer`] owns a single pending-task slot. Each [`push`](Debouncer::push)
//! aborts the pending task and schedules a new one that delivers the value
//! once the idle interval elapses. Deliveries carry a generation number so a
//! value that raced a newer keystroke through the channel is discarded by
//! [`accept`](Debouncer::accept).

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// A value delivered after the idle interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settled<T> {
    generation: u64,
    value: T,
}

#[derive(Debug)]
pub struct Debouncer<T> {
    interval: Duration,
    tx: mpsc::UnboundedSender<Settled<T>>,
    pending: Option<JoinHandle<()>>,
    generation: u64,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(interval: Duration, tx: mpsc::UnboundedSender<Settled<T>>) -> Self {
        Self {
            interval,
            tx,
            pending: None,
            generation: 0,
        }
    }

    /// Debouncer plus the receiving end of its delivery channel.
    pub fn channel(interval: Duration) -> (Self, mpsc::UnboundedReceiver<Settled<T>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(interval, tx), rx)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Replace any pending value with `value` and restart the idle timer.
    ///
    /// Must be called from within a tokio runtime.
    pub fn push(&mut self, value: T) {
        self.cancel();

        let settled = Settled {
            generation: self.generation,
            value,
        };
        let tx = self.tx.clone();
        let interval = self.interval;

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(interval).await;
            // Receiver gone means the owning control was torn down.
            let _ = tx.send(settled);
        }));
    }

    /// Drop the pending value, if any. Returns whether the timer was still running.
    ///
    /// A value the timer already delivered into the channel is invalidated too:
    /// [`accept`](Debouncer::accept) rejects it.
    pub fn cancel(&mut self) -> bool {
        self.generation += 1;
        match self.pending.take() {
            Some(handle) => {
                let was_pending = !handle.is_finished();
                handle.abort();
                was_pending
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Unwrap a delivery, discarding it if a newer push superseded it.
    pub fn accept(&mut self, settled: Settled<T>) -> Option<T> {
        if settled.generation != self.generation {
            tracing::trace!(
                stale = settled.generation,
                current = self.generation,
                "discarding superseded debounce delivery"
            );
            return None;
        }
        self.pending = None;
        Some(settled.value)
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.generation += 1;
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

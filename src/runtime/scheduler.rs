//! One-shot pacing timers
//!
//! At most one timer is outstanding. Scheduling a new one cancels the old,
//! and a cancelled timer never fires.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Identifies a scheduled timer so stale firings can be ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerId(u64);

pub struct Scheduler {
    fired_tx: mpsc::UnboundedSender<TimerId>,
    fired_rx: mpsc::UnboundedReceiver<TimerId>,
    pending: Option<(TimerId, CancellationToken)>,
    next_id: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        let (fired_tx, fired_rx) = mpsc::unbounded_channel();
        Self {
            fired_tx,
            fired_rx,
            pending: None,
            next_id: 0,
        }
    }

    /// Start a timer, replacing any pending one
    pub fn schedule(&mut self, delay: Duration) -> TimerId {
        self.cancel();

        self.next_id += 1;
        let id = TimerId(self.next_id);
        let token = CancellationToken::new();
        let guard = token.clone();
        let fired_tx = self.fired_tx.clone();

        tokio::spawn(async move {
            tokio::select! {
                () = guard.cancelled() => {}
                () = tokio::time::sleep(delay) => {
                    let _ = fired_tx.send(id);
                }
            }
        });

        self.pending = Some((id, token));
        id
    }

    /// Cancel the pending timer; returns whether one was pending
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some((id, token)) => {
                tracing::trace!(timer = id.0, "Cancelling timer");
                token.cancel();
                true
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Wait for the next firing; `None` only if the channel closed
    pub async fn fired(&mut self) -> Option<TimerId> {
        self.fired_rx.recv().await
    }

    /// Accept a firing if it belongs to the pending timer
    pub fn complete(&mut self, id: TimerId) -> bool {
        if self
            .pending
            .as_ref()
            .is_some_and(|(pending, _)| *pending == id)
        {
            self.pending = None;
            true
        } else {
            false
        }
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

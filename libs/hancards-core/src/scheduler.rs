//! Cancellable deferred tasks for quiz auto-advance.
//!
//! The quiz engine never owns a timer directly. It asks an
//! [`AdvanceScheduler`] to deliver an [`AdvanceTicket`] after a delay and keeps
//! the returned [`PendingAdvance`] handle; dropping or cancelling the handle
//! guarantees the ticket is never delivered. Delivered tickets are matched
//! against the engine's current ticket so a late delivery cannot advance twice.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Identifies one scheduled auto-advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AdvanceTicket(pub u64);

/// Handle to a scheduled advance.
pub trait PendingAdvance: Send {
    /// Prevent delivery. Cancelling twice is a no-op.
    fn cancel(&mut self);
}

/// Schedules ticket delivery after a delay.
pub trait AdvanceScheduler: Send {
    fn schedule(&mut self, delay: Duration, ticket: AdvanceTicket) -> Box<dyn PendingAdvance>;
}

/// Scheduler backed by the tokio timer. Tickets arrive on the receiver returned
/// by [`TokioScheduler::new`].
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    tx: mpsc::UnboundedSender<AdvanceTicket>,
}

impl TokioScheduler {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<AdvanceTicket>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl AdvanceScheduler for TokioScheduler {
    fn schedule(&mut self, delay: Duration, ticket: AdvanceTicket) -> Box<dyn PendingAdvance> {
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the host is shutting down.
            let _ = tx.send(ticket);
        });
        Box::new(TokioPending {
            handle: Some(handle),
        })
    }
}

struct TokioPending {
    handle: Option<JoinHandle<()>>,
}

impl PendingAdvance for TokioPending {
    fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for TokioPending {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Scheduler that records requests and delivers nothing on its own; the
/// caller fires tickets explicitly. Useful for hosts without a runtime and
/// for deterministic tests.
#[derive(Debug, Default, Clone)]
pub struct ManualScheduler {
    scheduled: std::sync::Arc<std::sync::Mutex<Vec<(Duration, AdvanceTicket)>>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests made so far, oldest first, including cancelled ones.
    pub fn requests(&self) -> Vec<(Duration, AdvanceTicket)> {
        self.scheduled
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }

    /// The most recent request.
    pub fn last(&self) -> Option<(Duration, AdvanceTicket)> {
        self.requests().last().copied()
    }
}

impl AdvanceScheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration, ticket: AdvanceTicket) -> Box<dyn PendingAdvance> {
        if let Ok(mut scheduled) = self.scheduled.lock() {
            scheduled.push((delay, ticket));
        }
        Box::new(NoopPending)
    }
}

struct NoopPending;

impl PendingAdvance for NoopPending {
    fn cancel(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn ticket_delivered_after_delay() {
        let (mut scheduler, mut rx) = TokioScheduler::new();
        let _pending = scheduler.schedule(Duration::from_millis(2500), AdvanceTicket(1));

        tokio::time::sleep(Duration::from_millis(2400)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(rx.recv().await, Some(AdvanceTicket(1)));
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_ticket_never_arrives() {
        let (mut scheduler, mut rx) = TokioScheduler::new();
        let mut pending = scheduler.schedule(Duration::from_millis(100), AdvanceTicket(7));
        pending.cancel();
        pending.cancel();

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_handle_cancels() {
        let (mut scheduler, mut rx) = TokioScheduler::new();
        drop(scheduler.schedule(Duration::from_millis(100), AdvanceTicket(3)));

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn manual_scheduler_records_requests() {
        let mut scheduler = ManualScheduler::new();
        let handle = scheduler.clone();
        scheduler.schedule(Duration::from_secs(4), AdvanceTicket(2));
        assert_eq!(handle.last(), Some((Duration::from_secs(4), AdvanceTicket(2))));
    }
}

// In-flight request counter.
//
// Every request issued through `ApiClient` holds an `ActivityGuard` for
// its whole lifetime (including the refresh-and-retry path). Front-ends
// subscribe to the counter to drive a busy indicator.

use std::sync::Arc;

use tokio::sync::watch;

/// Shared counter of requests currently in flight.
#[derive(Debug, Clone)]
pub struct ActivityTracker {
    tx: Arc<watch::Sender<usize>>,
}

impl Default for ActivityTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ActivityTracker {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0);
        Self { tx: Arc::new(tx) }
    }

    /// Mark one request as started. The count drops again when the
    /// returned guard is dropped, whether the request succeeded or not.
    pub fn begin(&self) -> ActivityGuard {
        self.tx.send_modify(|n| *n += 1);
        ActivityGuard {
            tx: Arc::clone(&self.tx),
        }
    }

    /// Number of requests currently in flight.
    pub fn in_flight(&self) -> usize {
        *self.tx.borrow()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight() > 0
    }

    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.tx.subscribe()
    }
}

/// RAII marker for one in-flight request.
#[derive(Debug)]
pub struct ActivityGuard {
    tx: Arc<watch::Sender<usize>>,
}

impl Drop for ActivityGuard {
    fn drop(&mut self) {
        self.tx.send_modify(|n| *n = n.saturating_sub(1));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn guard_increments_and_decrements() {
        let tracker = ActivityTracker::new();
        assert!(!tracker.is_busy());

        let a = tracker.begin();
        let b = tracker.begin();
        assert_eq!(tracker.in_flight(), 2);

        drop(a);
        assert_eq!(tracker.in_flight(), 1);
        drop(b);
        assert_eq!(tracker.in_flight(), 0);
    }

    #[tokio::test]
    async fn subscribers_observe_changes() {
        let tracker = ActivityTracker::new();
        let mut rx = tracker.subscribe();

        let guard = tracker.begin();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), 1);

        drop(guard);
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), 0);
    }
}

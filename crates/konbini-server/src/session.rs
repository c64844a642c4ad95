//! Single-writer search session state.
//!
//! One search is outstanding at a time from the UI's point of view, but two
//! searches can still race when a user re-triggers before the first resolves.
//! Each search takes a monotonically increasing ticket at start; only the
//! holder of the newest ticket may publish or clear the snapshot, so a slow
//! stale response can never overwrite a newer result.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;

use konbini_core::{Coordinates, SearchResult};

/// The published outcome of the most recent completed search.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub center: Coordinates,
    pub result: SearchResult,
}

/// Owner of the in-memory result set.
#[derive(Debug, Default)]
pub struct SearchSession {
    ticket: AtomicU64,
    latest: RwLock<Option<Snapshot>>,
}

impl SearchSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new in-flight search and returns its ticket. Any earlier
    /// ticket is superseded from this point on.
    pub fn begin(&self) -> u64 {
        self.ticket.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Publishes a completed search. Returns `false` (and stores nothing)
    /// when `ticket` has been superseded by a newer `begin`.
    pub async fn publish(&self, ticket: u64, snapshot: Snapshot) -> bool {
        let mut latest = self.latest.write().await;
        if self.ticket.load(Ordering::SeqCst) != ticket {
            return false;
        }
        *latest = Some(snapshot);
        true
    }

    /// Clears the snapshot after a failed search, so a stale center/list pair
    /// is not shown alongside a fresh error. Stale tickets are ignored.
    pub async fn clear(&self, ticket: u64) -> bool {
        let mut latest = self.latest.write().await;
        if self.ticket.load(Ordering::SeqCst) != ticket {
            return false;
        }
        *latest = None;
        true
    }

    pub async fn snapshot(&self) -> Option<Snapshot> {
        self.latest.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(text: &str) -> Snapshot {
        Snapshot {
            center: Coordinates::new(35.0, 139.0),
            result: SearchResult {
                text: text.to_owned(),
                stores: vec![],
            },
        }
    }

    #[tokio::test]
    async fn publish_with_current_ticket_is_accepted() {
        let session = SearchSession::new();
        let ticket = session.begin();
        assert!(session.publish(ticket, snapshot("first")).await);
        assert_eq!(session.snapshot().await.unwrap().result.text, "first");
    }

    #[tokio::test]
    async fn stale_publish_is_discarded() {
        let session = SearchSession::new();
        let old = session.begin();
        let new = session.begin();

        // The newer search resolves first...
        assert!(session.publish(new, snapshot("new")).await);
        // ...then the stale one lands and must be dropped.
        assert!(!session.publish(old, snapshot("old")).await);

        assert_eq!(session.snapshot().await.unwrap().result.text, "new");
    }

    #[tokio::test]
    async fn stale_clear_does_not_wipe_newer_result() {
        let session = SearchSession::new();
        let old = session.begin();
        let new = session.begin();

        assert!(session.publish(new, snapshot("kept")).await);
        assert!(!session.clear(old).await);
        assert!(session.snapshot().await.is_some());
    }

    #[tokio::test]
    async fn clear_with_current_ticket_resets_state() {
        let session = SearchSession::new();
        let first = session.begin();
        assert!(session.publish(first, snapshot("gone soon")).await);

        let second = session.begin();
        assert!(session.clear(second).await);
        assert!(session.snapshot().await.is_none());
    }

    #[tokio::test]
    async fn tickets_are_strictly_increasing() {
        let session = SearchSession::new();
        let a = session.begin();
        let b = session.begin();
        let c = session.begin();
        assert!(a < b && b < c);
    }
}

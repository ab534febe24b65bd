// ── Entity store with request lifecycle ──
//
// Wraps an `EntityCollection` with the three-state fetch lifecycle and
// the per-store request sequence. `begin` and `resolve` both run under
// the sequence lock, so the staleness check and the apply are one step.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tracing::{debug, trace, warn};

use super::collection::EntityCollection;
use super::status::{Lifecycle, StoreStatus};
use crate::error::{CoreError, FetchFailure};
use crate::fetch::FetchOutcome;
use crate::model::{Entity, EntityId};
use crate::stream::EntityStream;

/// Proof that a request was issued against a store, carrying its sequence
/// number. Only the ticket with the highest sequence may apply a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    sequence: u64,
}

impl RequestTicket {
    pub fn sequence(self) -> u64 {
        self.sequence
    }
}

/// Normalized, id-keyed cache for one entity kind.
///
/// Reads (`select_all`, `select_by_id`, `status`) never block writers.
/// Writes go through [`begin`](Self::begin) / [`resolve`](Self::resolve),
/// normally driven by a [`FetchController`](crate::fetch::FetchController).
pub struct EntityStore<T: Entity> {
    collection: EntityCollection<T>,
    lifecycle: watch::Sender<Lifecycle>,
    /// Highest sequence issued so far.
    sequence: Mutex<u64>,
}

impl<T: Entity> EntityStore<T> {
    pub fn new() -> Self {
        let (lifecycle, _) = watch::channel(Lifecycle::Idle);
        Self {
            collection: EntityCollection::new(),
            lifecycle,
            sequence: Mutex::new(0),
        }
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// Current records in the kind's display order.
    pub fn select_all(&self) -> Arc<Vec<Arc<T>>> {
        self.collection.snapshot()
    }

    pub fn select_by_id(&self, id: EntityId) -> Option<Arc<T>> {
        self.collection.get(id)
    }

    /// Look up `id`, failing with [`CoreError::NotFound`] when it is absent.
    pub fn require(&self, id: EntityId) -> Result<Arc<T>, CoreError> {
        self.select_by_id(id).ok_or_else(|| CoreError::NotFound {
            entity_type: T::KIND.into(),
            identifier: id.to_string(),
            collection: T::COLLECTION.into(),
        })
    }

    pub fn status(&self) -> StoreStatus {
        self.lifecycle.borrow().status()
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.collection.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of replacements applied so far.
    pub fn version(&self) -> u64 {
        self.collection.version()
    }

    /// Highest request sequence issued against this store.
    pub fn latest_sequence(&self) -> u64 {
        *self.latest()
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn subscribe(&self) -> EntityStream<T> {
        EntityStream::new(self.collection.subscribe())
    }

    pub fn subscribe_status(&self) -> watch::Receiver<Lifecycle> {
        self.lifecycle.subscribe()
    }

    // ── Writes ───────────────────────────────────────────────────────

    /// Seed the store with `records` outside any fetch.
    ///
    /// Runs under the sequence lock like a fetch result: any in-flight
    /// request is superseded and the store becomes `Ready`.
    pub fn replace_all(&self, records: Vec<T>) -> usize {
        let mut latest = self.latest();
        *latest += 1;
        let count = self.collection.replace_all(records);
        self.transition(Lifecycle::Ready);
        debug!(kind = T::KIND, sequence = *latest, count, "store seeded");
        count
    }

    /// Issue a new request: bump the sequence and enter `Loading`.
    pub fn begin(&self) -> RequestTicket {
        let mut latest = self.latest();
        *latest += 1;
        self.transition(Lifecycle::Loading);
        debug!(kind = T::KIND, sequence = *latest, "request issued");
        RequestTicket { sequence: *latest }
    }

    /// Apply the result of the request identified by `ticket`.
    ///
    /// Results from superseded requests are discarded without touching the
    /// contents or the lifecycle. A failure keeps the last good contents.
    pub fn resolve(&self, ticket: RequestTicket, result: Result<Vec<T>, FetchFailure>) -> FetchOutcome {
        let latest = self.latest();
        if ticket.sequence != *latest {
            trace!(
                kind = T::KIND,
                sequence = ticket.sequence,
                latest = *latest,
                "discarding stale response"
            );
            return FetchOutcome::Stale;
        }

        match result {
            Ok(records) => {
                let count = self.collection.replace_all(records);
                self.transition(Lifecycle::Ready);
                debug!(kind = T::KIND, sequence = ticket.sequence, count, "store replaced");
                FetchOutcome::Applied { count }
            }
            Err(failure) => {
                warn!(kind = T::KIND, sequence = ticket.sequence, error = %failure, "fetch failed");
                self.transition(Lifecycle::Errored(failure.clone()));
                FetchOutcome::Failed(failure)
            }
        }
    }

    /// Empty the store and return to `Idle`, superseding any in-flight
    /// request.
    pub fn reset(&self) {
        let mut latest = self.latest();
        *latest += 1;
        self.collection.replace_all(Vec::new());
        self.transition(Lifecycle::Idle);
        debug!(kind = T::KIND, sequence = *latest, "store reset");
    }

    // The guarded counter is a plain integer, so a poisoned lock is still
    // consistent.
    fn latest(&self) -> MutexGuard<'_, u64> {
        self.sequence.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn transition(&self, next: Lifecycle) {
        let previous = self.lifecycle.send_replace(next);
        let current = self.lifecycle.borrow();
        trace!(
            kind = T::KIND,
            from = previous.as_ref(),
            to = current.as_ref(),
            "lifecycle transition"
        );
    }
}

impl<T: Entity> Default for EntityStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

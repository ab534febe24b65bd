// ── Generic reactive entity collection ──
//
// Whole-collection replacement with O(1) id lookups and push-based change
// notification via `watch` channels. Readers never observe a half-built
// collection: the indexed state is swapped in with a single `ArcSwap`
// store.

use std::sync::Arc;

use arc_swap::ArcSwap;
use indexmap::IndexMap;
use tokio::sync::watch;

use crate::model::{Entity, EntityId};

/// Immutable indexed contents, replaced wholesale on every mutation.
struct CollectionState<T> {
    /// Id -> record, in the entity's display order.
    by_id: IndexMap<EntityId, Arc<T>>,
    /// The same records as a shareable ordered snapshot.
    ordered: Arc<Vec<Arc<T>>>,
}

impl<T> CollectionState<T> {
    fn empty() -> Self {
        Self {
            by_id: IndexMap::new(),
            ordered: Arc::new(Vec::new()),
        }
    }
}

/// A lock-free, reactive collection for a single entity kind.
///
/// Every replacement bumps a version counter and publishes the new ordered
/// snapshot to subscribers.
pub(crate) struct EntityCollection<T: Entity> {
    state: ArcSwap<CollectionState<T>>,

    /// Version counter, bumped on every mutation.
    version: watch::Sender<u64>,

    /// Ordered snapshot broadcast to subscribers.
    snapshot: watch::Sender<Arc<Vec<Arc<T>>>>,
}

impl<T: Entity> EntityCollection<T> {
    pub(crate) fn new() -> Self {
        let (version, _) = watch::channel(0u64);
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));

        Self {
            state: ArcSwap::from_pointee(CollectionState::empty()),
            version,
            snapshot,
        }
    }

    /// Discard the current contents and install `records`.
    ///
    /// Duplicate ids keep the position of their first occurrence and the
    /// value of their last. Returns the number of distinct records stored.
    pub(crate) fn replace_all(&self, records: Vec<T>) -> usize {
        let mut by_id: IndexMap<EntityId, Arc<T>> = IndexMap::with_capacity(records.len());
        for record in records {
            by_id.insert(record.id(), Arc::new(record));
        }
        by_id.sort_by(|_, a, _, b| a.order_cmp(b));

        let ordered: Arc<Vec<Arc<T>>> = Arc::new(by_id.values().cloned().collect());
        let count = ordered.len();

        self.state.store(Arc::new(CollectionState {
            by_id,
            ordered: Arc::clone(&ordered),
        }));
        // `send_replace` updates unconditionally, even with zero receivers.
        self.snapshot.send_replace(ordered);
        self.version.send_modify(|v| *v += 1);

        count
    }

    /// Look up a record by id.
    pub(crate) fn get(&self, id: EntityId) -> Option<Arc<T>> {
        self.state.load().by_id.get(&id).cloned()
    }

    /// Get the current ordered snapshot (cheap `Arc` clone).
    pub(crate) fn snapshot(&self) -> Arc<Vec<Arc<T>>> {
        Arc::clone(&self.state.load().ordered)
    }

    /// Subscribe to snapshot changes via a `watch::Receiver`.
    pub(crate) fn subscribe(&self) -> watch::Receiver<Arc<Vec<Arc<T>>>> {
        self.snapshot.subscribe()
    }

    pub(crate) fn len(&self) -> usize {
        self.state.load().by_id.len()
    }

    pub(crate) fn version(&self) -> u64 {
        *self.version.borrow()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{Availability, Practitioner};
    use chrono::{TimeZone, Utc};

    fn practitioner(id: u64, name: &str) -> Practitioner {
        Practitioner {
            id: EntityId::new(id),
            first_name: name.into(),
            last_name: None,
            speciality: "General".into(),
        }
    }

    fn slot(id: u64, hour: u32) -> Availability {
        Availability {
            id: EntityId::new(id),
            practitioner_id: EntityId::new(1),
            start_date: Utc.with_ymd_and_hms(2024, 6, 15, hour, 0, 0).unwrap(),
            end_date: Utc.with_ymd_and_hms(2024, 6, 15, hour, 30, 0).unwrap(),
        }
    }

    #[test]
    fn replace_keeps_payload_order_for_unordered_kinds() {
        let col: EntityCollection<Practitioner> = EntityCollection::new();
        col.replace_all(vec![practitioner(3, "c"), practitioner(1, "a"), practitioner(2, "b")]);

        let ids: Vec<u64> = col.snapshot().iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn replace_sorts_availabilities_by_start() {
        let col: EntityCollection<Availability> = EntityCollection::new();
        col.replace_all(vec![slot(1, 14), slot(2, 9), slot(3, 11)]);

        let ids: Vec<u64> = col.snapshot().iter().map(|a| a.id.get()).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn replace_discards_previous_contents() {
        let col: EntityCollection<Practitioner> = EntityCollection::new();
        col.replace_all(vec![practitioner(1, "a"), practitioner(2, "b")]);
        col.replace_all(vec![practitioner(3, "c")]);

        assert_eq!(col.len(), 1);
        assert!(col.get(EntityId::new(1)).is_none());
        assert_eq!(col.get(EntityId::new(3)).unwrap().first_name, "c");
    }

    #[test]
    fn duplicate_ids_keep_first_position_last_value() {
        let col: EntityCollection<Practitioner> = EntityCollection::new();
        let count = col.replace_all(vec![
            practitioner(1, "first"),
            practitioner(2, "other"),
            practitioner(1, "second"),
        ]);

        assert_eq!(count, 2);
        let names: Vec<String> = col.snapshot().iter().map(|p| p.first_name.clone()).collect();
        assert_eq!(names, vec!["second", "other"]);
    }

    #[test]
    fn replace_bumps_version_and_notifies() {
        let col: EntityCollection<Practitioner> = EntityCollection::new();
        let mut rx = col.subscribe();
        assert_eq!(col.version(), 0);

        col.replace_all(vec![practitioner(1, "a")]);

        assert_eq!(col.version(), 1);
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().len(), 1);
    }
}

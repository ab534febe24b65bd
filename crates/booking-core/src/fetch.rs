// ── Async fetch controller ──
//
// Wraps one remote call per request and maps its result to exactly one
// lifecycle transition on the owning store. The store is marked `Loading`
// before the request leaves; the result is applied only if no newer
// request was issued in the meantime.

use std::sync::Arc;

use booking_api::{ApiClient, Scope};
use serde::Serialize;
use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::{CoreError, FetchFailure};
use crate::model::{Entity, EntityId};
use crate::normalize::normalize_ids;
use crate::store::{EntityStore, RequestTicket};

/// How a single request ended, from the store's point of view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The result replaced the store contents.
    Applied { count: usize },
    /// A newer request was issued first; the result was dropped.
    Stale,
    /// The store moved to `Errored` with this failure.
    Failed(FetchFailure),
}

impl FetchOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }

    /// Turn a failure into an error, keeping applied and stale outcomes.
    pub fn into_result(self) -> Result<Self, CoreError> {
        match self {
            Self::Failed(failure) => Err(CoreError::Fetch(failure)),
            other => Ok(other),
        }
    }
}

/// Pending request returned by [`FetchController::fetch_all`].
///
/// Dropping the handle does not cancel the request; its result is still
/// applied (or discarded as stale) when it arrives.
#[derive(Debug)]
pub struct FetchHandle {
    ticket: RequestTicket,
    task: JoinHandle<FetchOutcome>,
}

impl FetchHandle {
    pub fn sequence(&self) -> u64 {
        self.ticket.sequence()
    }

    /// Wait for the request to settle.
    pub async fn outcome(self) -> Result<FetchOutcome, CoreError> {
        self.task
            .await
            .map_err(|e| CoreError::Internal(format!("fetch task failed: {e}")))
    }
}

/// Decode a raw payload into typed records after id normalization.
pub fn decode_records<T: Entity>(payload: Value) -> Result<Vec<T>, FetchFailure> {
    serde_json::from_value(normalize_ids(payload))
        .map_err(|e| FetchFailure::decode(format!("invalid {} payload: {e}", T::COLLECTION)))
}

/// Sole writer of one [`EntityStore`].
#[derive(Clone)]
pub struct FetchController<T: Entity> {
    api: Arc<ApiClient>,
    store: Arc<EntityStore<T>>,
}

impl<T: Entity> FetchController<T> {
    pub fn new(api: Arc<ApiClient>, store: Arc<EntityStore<T>>) -> Self {
        Self { api, store }
    }

    pub fn store(&self) -> &Arc<EntityStore<T>> {
        &self.store
    }

    /// Begin a read of the whole collection, optionally narrowed to one
    /// parent record through the kind's scope field.
    ///
    /// Marks the store `Loading` before returning. Must be called from
    /// within a tokio runtime.
    pub fn fetch_all(&self, scope: Option<EntityId>) -> FetchHandle {
        let scope = self.scope(scope);
        let ticket = self.store.begin();
        let api = Arc::clone(&self.api);
        let store = Arc::clone(&self.store);

        let task = tokio::spawn(async move {
            let result = match api.list(T::COLLECTION, scope.as_ref()).await {
                Ok(payload) => decode_records::<T>(payload),
                Err(e) => Err(FetchFailure::from(e)),
            };
            store.resolve(ticket, result)
        });

        FetchHandle { ticket, task }
    }

    /// Create a record remotely, then refresh the whole collection.
    ///
    /// The store gains the new record only through the refresh. A failed
    /// create leaves the contents untouched and the store `Errored`.
    pub async fn create(&self, body: &(impl Serialize + Sync)) -> Result<FetchOutcome, CoreError> {
        let ticket = self.store.begin();

        match self.api.create(T::COLLECTION, body).await {
            Ok(_) => {
                info!(kind = T::KIND, "record created; refreshing collection");
                self.fetch_all(None).outcome().await
            }
            Err(e) => {
                let failure = FetchFailure::from(e);
                self.store.resolve(ticket, Err(failure.clone()));
                Err(CoreError::Fetch(failure))
            }
        }
    }

    fn scope(&self, scope: Option<EntityId>) -> Option<Scope> {
        let id = scope?;
        match T::SCOPE_FIELD {
            Some(field) => {
                debug!(kind = T::KIND, %field, %id, "scoped fetch");
                Some(Scope::new(field, id))
            }
            None => {
                warn!(kind = T::KIND, %id, "collection has no scope field; fetching all");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use crate::model::{Availability, Practitioner};
    use serde_json::json;

    #[test]
    fn decode_normalizes_string_ids() {
        let payload = json!([{ "id": "10", "firstName": "Alice", "speciality": "Cardiology" }]);
        let records = decode_records::<Practitioner>(payload);
        assert_eq!(records.map(|r| r[0].id), Ok(EntityId::new(10)));
    }

    #[test]
    fn decode_rejects_non_array() {
        let failure = decode_records::<Practitioner>(json!({ "error": "nope" }));
        assert!(matches!(failure, Err(FetchFailure { kind: FailureKind::Decode, .. })));
    }

    #[test]
    fn decode_rejects_bad_instants() {
        let payload = json!([{
            "id": 1,
            "practitionerId": 10,
            "startDate": "tomorrow",
            "endDate": "2024-06-15T10:30:00Z"
        }]);
        let failure = decode_records::<Availability>(payload);
        assert!(matches!(failure, Err(FetchFailure { kind: FailureKind::Decode, .. })));
    }

    #[test]
    fn outcome_into_result() {
        assert!(FetchOutcome::Stale.into_result().is_ok());
        assert!(
            FetchOutcome::Failed(FetchFailure::transport("x"))
                .into_result()
                .is_err()
        );
    }
}

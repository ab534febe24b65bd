// ── Entity kind contract ──
//
// Everything a store and its fetch controller need to know about a kind:
// where it lives remotely, how it is scoped, how it is keyed and ordered.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::EntityId;

/// A record kind held in an [`EntityStore`](crate::store::EntityStore).
pub trait Entity: DeserializeOwned + Serialize + Clone + fmt::Debug + Send + Sync + 'static {
    /// Collection path segment under the API base, e.g. `"practitioners"`.
    const COLLECTION: &'static str;

    /// Query field used to narrow a fetch to one parent record.
    const SCOPE_FIELD: Option<&'static str> = None;

    /// Human-readable kind name for logs and errors.
    const KIND: &'static str;

    fn id(&self) -> EntityId;

    /// Ordering rule applied on every replacement. The sort is stable, so the
    /// default keeps payload order.
    fn order_cmp(&self, _other: &Self) -> Ordering {
        Ordering::Equal
    }
}

// ── Availability domain type ──
//
// Open slots of one practitioner. The store holding these is always
// scoped to a single practitioner and kept sorted by start instant.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Entity, EntityId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub id: EntityId,
    /// Owning practitioner. Not checked against the practitioner store.
    pub practitioner_id: EntityId,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl Entity for Availability {
    const COLLECTION: &'static str = "availabilities";
    const SCOPE_FIELD: Option<&'static str> = Some("practitionerId");
    const KIND: &'static str = "availability";

    fn id(&self) -> EntityId {
        self.id
    }

    fn order_cmp(&self, other: &Self) -> Ordering {
        self.start_date.cmp(&other.start_date)
    }
}

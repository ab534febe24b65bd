// ── Appointment domain type ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Entity, EntityId};

/// A booked appointment as returned by the remote API.
///
/// Foreign keys are resolved at read time by [`crate::join`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: EntityId,
    pub practitioner_id: EntityId,
    pub patient_id: EntityId,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl Entity for Appointment {
    const COLLECTION: &'static str = "appointments";
    const KIND: &'static str = "appointment";

    fn id(&self) -> EntityId {
        self.id
    }
}

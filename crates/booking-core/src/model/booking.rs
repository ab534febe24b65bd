// ── Booking draft and submission payload ──
//
// The draft is the in-progress form value; every field is optional until
// submission. `BookingRequest` is the validated wire body for
// `POST {base}/appointments`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::EntityId;
use crate::error::CoreError;

/// In-progress booking form state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingDraft {
    pub practitioner_id: Option<EntityId>,
    pub patient_id: Option<EntityId>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

/// Validated body of an appointment create request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub practitioner_id: EntityId,
    pub patient_id: EntityId,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl BookingDraft {
    /// Names of the required fields that are still empty, in form order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.patient_id.is_none() {
            missing.push("patient");
        }
        if self.practitioner_id.is_none() {
            missing.push("practitioner");
        }
        if self.start_date.is_none() {
            missing.push("start date");
        }
        if self.end_date.is_none() {
            missing.push("end date");
        }
        missing
    }

    /// Whether submission is currently permitted.
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

impl TryFrom<&BookingDraft> for BookingRequest {
    type Error = CoreError;

    fn try_from(draft: &BookingDraft) -> Result<Self, Self::Error> {
        match (
            draft.practitioner_id,
            draft.patient_id,
            draft.start_date,
            draft.end_date,
        ) {
            (Some(practitioner_id), Some(patient_id), Some(start_date), Some(end_date)) => {
                Ok(Self {
                    practitioner_id,
                    patient_id,
                    start_date,
                    end_date,
                })
            }
            _ => Err(CoreError::ValidationFailed {
                message: format!("missing required fields: {}", draft.missing_fields().join(", ")),
            }),
        }
    }
}

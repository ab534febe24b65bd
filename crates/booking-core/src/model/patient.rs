// ── Patient domain type ──

use serde::{Deserialize, Serialize};

use super::{Entity, EntityId};

/// A patient who can be booked into an appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: EntityId,
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl Patient {
    pub fn display_name(&self) -> String {
        match self.last_name.as_deref() {
            Some(last) if !last.is_empty() => format!("{} {last}", self.first_name),
            _ => self.first_name.clone(),
        }
    }
}

impl Entity for Patient {
    const COLLECTION: &'static str = "patients";
    const KIND: &'static str = "patient";

    fn id(&self) -> EntityId {
        self.id
    }
}

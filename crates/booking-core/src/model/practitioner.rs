// ── Practitioner domain type ──

use serde::{Deserialize, Serialize};

use super::{Entity, EntityId};

/// A bookable practitioner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Practitioner {
    pub id: EntityId,
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    pub speciality: String,
}

impl Practitioner {
    /// First and last name joined, or the first name alone.
    pub fn display_name(&self) -> String {
        match self.last_name.as_deref() {
            Some(last) if !last.is_empty() => format!("{} {last}", self.first_name),
            _ => self.first_name.clone(),
        }
    }
}

impl Entity for Practitioner {
    const COLLECTION: &'static str = "practitioners";
    const KIND: &'static str = "practitioner";

    fn id(&self) -> EntityId {
        self.id
    }
}

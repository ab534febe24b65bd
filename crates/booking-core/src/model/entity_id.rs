// ── Core identity type ──
//
// EntityId is the canonical key of every store. The remote API is not
// trusted to send a consistently typed `id`; `normalize` coerces payloads
// into this shape before they are decoded.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Canonical identifier for any booking entity.
///
/// Serializes as a bare JSON number. Deserialization is strict: strings are
/// rejected here and must be coerced by [`crate::normalize`] first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(u64);

impl EntityId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntityId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl From<u64> for EntityId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn entity_id_serializes_as_number() {
        let id = EntityId::new(42);
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");
    }

    #[test]
    fn entity_id_rejects_string_payload() {
        let parsed: Result<EntityId, _> = serde_json::from_str("\"42\"");
        assert!(parsed.is_err());
    }

    #[test]
    fn entity_id_from_str_trims() {
        let id: EntityId = " 17 ".parse().unwrap();
        assert_eq!(id.get(), 17);
    }

    #[test]
    fn entity_id_from_str_rejects_garbage() {
        assert!("abc".parse::<EntityId>().is_err());
        assert!("-3".parse::<EntityId>().is_err());
    }
}

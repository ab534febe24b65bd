// ── Request lifecycle ──

use strum::AsRefStr;

use crate::error::FetchFailure;

/// Request lifecycle of one entity store.
///
/// `Loading` never carries an error: the previous failure is dropped when a
/// new request is issued, and only a successful result moves to `Ready`.
#[derive(Debug, Clone, Default, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Lifecycle {
    #[default]
    Idle,
    Loading,
    Ready,
    Errored(FetchFailure),
}

impl Lifecycle {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn error(&self) -> Option<&FetchFailure> {
        match self {
            Self::Errored(failure) => Some(failure),
            _ => None,
        }
    }

    /// Collapse into the `(loading, error)` pair exposed to renderers.
    pub fn status(&self) -> StoreStatus {
        StoreStatus {
            loading: self.is_loading(),
            error: self.error().cloned(),
        }
    }
}

/// `(loading, error)` view of a [`Lifecycle`]. Both are never set at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreStatus {
    pub loading: bool,
    pub error: Option<FetchFailure>,
}

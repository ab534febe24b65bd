// ── Entity stores ──
//
// One normalized, id-keyed collection per entity kind, paired with its
// request lifecycle and stale-response guard.

mod collection;
mod entity_store;
mod status;

pub use entity_store::{EntityStore, RequestTicket};
pub use status::{Lifecycle, StoreStatus};

//! Shared helpers for command handlers.

use booking_core::{Entity, EntityId, EntityStore, FetchHandle};

use crate::error::CliError;

/// Wait for a fetch and surface a failure as an error.
pub async fn settle(handle: FetchHandle) -> Result<(), CliError> {
    handle.outcome().await?.into_result()?;
    Ok(())
}

/// Require that `id` is present in an already loaded store.
pub fn require_known<T: Entity>(store: &EntityStore<T>, id: EntityId) -> Result<(), CliError> {
    store.require(id)?;
    Ok(())
}

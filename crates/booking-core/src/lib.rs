//! Client-side synchronization layer between `booking-api` and UI consumers.
//!
//! This crate owns the domain model and the cache infrastructure for the
//! booking client:
//!
//! - **[`BookingClient`]**: Facade owning one [`EntityStore`] per entity kind
//!   plus the booking form. [`load_directory()`](BookingClient::load_directory)
//!   fetches the reference collections, [`book()`](BookingClient::book) submits
//!   the current draft.
//!
//! - **[`EntityStore<T>`]**: Normalized, id-keyed collection with a request
//!   lifecycle ([`Lifecycle`]). Replacement is atomic (`ArcSwap`), change
//!   notification is push-based (`tokio::sync::watch`), and stale fetch
//!   results are dropped by a per-store sequence number.
//!
//! - **[`FetchController<T>`]**: Issues a remote read or create and maps the
//!   result to exactly one lifecycle transition on its store.
//!
//! - **[`CascadeCoordinator`]**: Re-scopes the availability store whenever the
//!   practitioner selection in the [`BookingForm`] changes.
//!
//! - **[`join_appointments`]**: Denormalizing join of appointments with their
//!   practitioners for display.
//!
//! Raw payloads pass through [`normalize::normalize_ids`] before typed
//! decoding, so loosely typed identifiers never reach the stores.

pub mod cascade;
pub mod client;
pub mod config;
pub mod error;
pub mod fetch;
pub mod join;
pub mod model;
pub mod normalize;
pub mod store;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use cascade::{BookingForm, CascadeCoordinator, SlotOptions};
pub use client::{BookingClient, DirectoryOutcome};
pub use config::{ClientConfig, TlsVerification};
pub use error::{CoreError, FailureKind, FetchFailure};
pub use fetch::{FetchController, FetchHandle, FetchOutcome};
pub use join::{AppointmentView, PractitionerDetails, join_appointments};
pub use store::{EntityStore, Lifecycle, RequestTicket, StoreStatus};
pub use stream::EntityStream;

// Re-export model types at the crate root for ergonomics.
pub use model::{
    Appointment, Availability, BookingDraft, BookingRequest, Entity, EntityId, Patient,
    Practitioner,
};

// ── Domain model ──
//
// Canonical entity types decoded from normalized API payloads.

mod appointment;
mod availability;
mod booking;
mod entity;
mod entity_id;
mod patient;
mod practitioner;

pub use appointment::Appointment;
pub use availability::Availability;
pub use booking::{BookingDraft, BookingRequest};
pub use entity::Entity;
pub use entity_id::EntityId;
pub use patient::Patient;
pub use practitioner::Practitioner;

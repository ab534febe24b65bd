// booking-api: Async Rust client for the appointment-booking REST API

pub mod client;
pub mod error;
pub mod transport;

pub use client::{ApiClient, Scope};
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};

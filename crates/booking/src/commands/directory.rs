//! Practitioner and patient listings.

use std::sync::Arc;

use tabled::Tabled;

use booking_core::{BookingClient, Patient, Practitioner};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct PractitionerRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Speciality")]
    speciality: String,
}

impl From<&Arc<Practitioner>> for PractitionerRow {
    fn from(p: &Arc<Practitioner>) -> Self {
        Self {
            id: p.id.to_string(),
            name: p.display_name(),
            speciality: p.speciality.clone(),
        }
    }
}

#[derive(Tabled)]
struct PatientRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
}

impl From<&Arc<Patient>> for PatientRow {
    fn from(p: &Arc<Patient>) -> Self {
        Self {
            id: p.id.to_string(),
            name: p.display_name(),
        }
    }
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn practitioners(client: &BookingClient, global: &GlobalOpts) -> Result<(), CliError> {
    util::settle(client.practitioner_fetcher().fetch_all(None)).await?;

    let snap = client.practitioners().select_all();
    let out = output::render_list(
        &global.output,
        snap.as_slice(),
        |p| PractitionerRow::from(p),
        |p| p.id.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn patients(client: &BookingClient, global: &GlobalOpts) -> Result<(), CliError> {
    util::settle(client.patient_fetcher().fetch_all(None)).await?;

    let snap = client.patients().select_all();
    let out = output::render_list(
        &global.output,
        snap.as_slice(),
        |p| PatientRow::from(p),
        |p| p.id.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

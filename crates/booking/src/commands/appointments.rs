//! Appointment listing, joined with practitioner details.

use tabled::Tabled;

use booking_core::{AppointmentView, BookingClient, CoreError, EntityStore, FetchOutcome, Patient};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct AppointmentRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "When")]
    when: String,
    #[tabled(rename = "Practitioner")]
    practitioner: String,
    #[tabled(rename = "Speciality")]
    speciality: String,
    #[tabled(rename = "Patient")]
    patient: String,
}

impl AppointmentRow {
    fn new(view: &AppointmentView, patients: &EntityStore<Patient>) -> Self {
        let (practitioner, speciality) = view.practitioner.as_ref().map_or_else(
            || ("-".to_owned(), "-".to_owned()),
            |p| (p.display_name(), p.speciality.clone()),
        );
        let patient = patients
            .select_by_id(view.patient_id)
            .map_or_else(|| view.patient_id.to_string(), |p| p.display_name());

        Self {
            id: view.id.to_string(),
            when: view.date_range(),
            practitioner,
            speciality,
            patient,
        }
    }
}

/// Render appointment views in the selected format.
pub fn render(
    client: &BookingClient,
    views: &[AppointmentView],
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let patients = client.patients();
    let out = output::render_list(
        &global.output,
        views,
        |v| AppointmentRow::new(v, patients),
        |v| v.id.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn handle(client: &BookingClient, global: &GlobalOpts) -> Result<(), CliError> {
    let loaded = client.load_directory().await?;

    // Without appointments there is nothing to show; the other stores only
    // enrich the listing.
    if let FetchOutcome::Failed(failure) = &loaded.appointments {
        return Err(CoreError::Fetch(failure.clone()).into());
    }
    if !global.quiet {
        for (kind, failure) in loaded.failures() {
            eprintln!(
                "{}",
                output::warning(&format!("{kind} unavailable: {failure}"), &global.color)
            );
        }
    }

    render(client, &client.appointment_views(), global)
}

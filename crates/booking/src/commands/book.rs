//! Appointment booking.
//!
//! Drives the same form and cascade a UI would: fill the draft, let the
//! practitioner selection scope the availability store, then check the
//! requested slot against the derived slot options before submitting.

use booking_core::join::date_range;
use booking_core::{BookingClient, EntityId};

use crate::cli::{BookArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::{appointments, util};

pub async fn handle(
    client: &BookingClient,
    args: BookArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let form = client.form();
    form.select_patient(args.patient.map(EntityId::new));
    form.select_practitioner(args.practitioner.map(EntityId::new));
    form.select_start(args.start);
    form.select_end(args.end);

    // Incomplete drafts never reach the API.
    let request = form.submit()?;

    let slot_fetch = client
        .cascade()
        .on_practitioner_selected(Some(request.practitioner_id));
    let (slots, practitioners, patients) = tokio::join!(
        async {
            match slot_fetch {
                Some(handle) => util::settle(handle).await,
                None => Ok(()),
            }
        },
        util::settle(client.practitioner_fetcher().fetch_all(None)),
        util::settle(client.patient_fetcher().fetch_all(None)),
    );
    practitioners?;
    patients?;
    slots?;

    util::require_known(client.practitioners(), request.practitioner_id)?;
    util::require_known(client.patients(), request.patient_id)?;

    let open = client.slot_options().is_some_and(|options| {
        options.starts.contains(&request.start_date) && options.ends.contains(&request.end_date)
    });
    if !open {
        return Err(CliError::SlotUnavailable {
            practitioner: request.practitioner_id.to_string(),
            requested: date_range(request.start_date, request.end_date),
        });
    }

    client.book().await?.into_result()?;

    if !global.quiet {
        eprintln!(
            "{}",
            output::success(
                &format!(
                    "Appointment booked: {}",
                    date_range(request.start_date, request.end_date)
                ),
                &global.color
            )
        );
    }

    let booked: Vec<_> = client
        .appointment_views()
        .into_iter()
        .filter(|v| v.patient_id == request.patient_id && v.start_date == request.start_date)
        .collect();
    appointments::render(client, &booked, global)
}

//! Availability slot listing.

use std::sync::Arc;

use tabled::Tabled;

use booking_core::join::date_range;
use booking_core::{Availability, BookingClient, EntityId};

use crate::cli::{AvailabilitiesArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct AvailabilityRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Practitioner")]
    practitioner: String,
    #[tabled(rename = "When")]
    when: String,
}

impl From<&Arc<Availability>> for AvailabilityRow {
    fn from(a: &Arc<Availability>) -> Self {
        Self {
            id: a.id.to_string(),
            practitioner: a.practitioner_id.to_string(),
            when: date_range(a.start_date, a.end_date),
        }
    }
}

pub async fn handle(
    client: &BookingClient,
    args: AvailabilitiesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let scope = args.practitioner.map(EntityId::new);
    util::settle(client.availability_fetcher().fetch_all(scope)).await?;

    let snap = client.availabilities().select_all();
    let out = output::render_list(
        &global.output,
        snap.as_slice(),
        |a| AvailabilityRow::from(a),
        |a| a.id.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── Appointment display view ──
//
// Read-time join of appointments with their practitioners. Foreign keys are
// resolved here rather than at write time, so a dangling practitioner id
// only drops the practitioner fields from the composite.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::{Appointment, EntityId, Practitioner};

/// Practitioner fields merged into an [`AppointmentView`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PractitionerDetails {
    pub first_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    pub speciality: String,
}

impl PractitionerDetails {
    pub fn display_name(&self) -> String {
        match self.last_name.as_deref() {
            Some(last) if !last.is_empty() => format!("{} {last}", self.first_name),
            _ => self.first_name.clone(),
        }
    }
}

impl From<&Practitioner> for PractitionerDetails {
    fn from(p: &Practitioner) -> Self {
        Self {
            first_name: p.first_name.clone(),
            last_name: p.last_name.clone(),
            speciality: p.speciality.clone(),
        }
    }
}

/// One appointment with its practitioner's details inlined.
///
/// Serializes as a single flat object. Neither the appointment's
/// `practitionerId` nor the practitioner's own `id` appear in the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentView {
    pub id: EntityId,
    pub patient_id: EntityId,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(flatten)]
    pub practitioner: Option<PractitionerDetails>,
}

impl AppointmentView {
    pub fn date_range(&self) -> String {
        date_range(self.start_date, self.end_date)
    }
}

/// Compose appointments with their practitioners, in appointment order.
///
/// Appointments whose practitioner is missing are kept without details.
pub fn join_appointments(
    appointments: &[Arc<Appointment>],
    practitioners: &[Arc<Practitioner>],
) -> Vec<AppointmentView> {
    let by_id: HashMap<EntityId, &Practitioner> =
        practitioners.iter().map(|p| (p.id, p.as_ref())).collect();

    appointments
        .iter()
        .map(|appt| AppointmentView {
            id: appt.id,
            patient_id: appt.patient_id,
            start_date: appt.start_date,
            end_date: appt.end_date,
            practitioner: by_id
                .get(&appt.practitioner_id)
                .map(|p| PractitionerDetails::from(*p)),
        })
        .collect()
}

const DAY_TIME: &str = "%d %b %Y, %H:%M";

/// Human-readable range, e.g. `15 Jun 2024, 10:30 – 11:00`.
///
/// The end carries its own date only when it falls on a different day.
pub fn date_range(start: DateTime<Utc>, end: DateTime<Utc>) -> String {
    if start.date_naive() == end.date_naive() {
        format!("{} – {}", start.format(DAY_TIME), end.format("%H:%M"))
    } else {
        format!("{} – {}", start.format(DAY_TIME), end.format(DAY_TIME))
    }
}

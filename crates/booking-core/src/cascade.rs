// ── Booking form and availability cascade ──
//
// Two separate steps: the form records a selection and publishes the new
// draft; the coordinator watches for practitioner changes and re-scopes
// the availability store. Slot choices are derived from the store and
// carry no state of their own.

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::CoreError;
use crate::fetch::{FetchController, FetchHandle};
use crate::model::{Availability, BookingDraft, BookingRequest, EntityId};
use crate::store::EntityStore;

// ── BookingForm ──────────────────────────────────────────────────

/// Observable booking form state.
///
/// Every change is published on a `watch` channel. Selecting a different
/// practitioner clears the start and end choices, since those only exist
/// relative to that practitioner's availabilities.
pub struct BookingForm {
    draft: watch::Sender<BookingDraft>,
}

impl BookingForm {
    pub fn new() -> Self {
        let (draft, _) = watch::channel(BookingDraft::default());
        Self { draft }
    }

    pub fn draft(&self) -> BookingDraft {
        self.draft.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<BookingDraft> {
        self.draft.subscribe()
    }

    /// Select (or clear) the practitioner. Returns `true` if it changed.
    pub fn select_practitioner(&self, practitioner_id: Option<EntityId>) -> bool {
        self.draft.send_if_modified(|draft| {
            if draft.practitioner_id == practitioner_id {
                return false;
            }
            draft.practitioner_id = practitioner_id;
            draft.start_date = None;
            draft.end_date = None;
            true
        })
    }

    pub fn select_patient(&self, patient_id: Option<EntityId>) {
        self.draft.send_if_modified(|draft| {
            let changed = draft.patient_id != patient_id;
            draft.patient_id = patient_id;
            changed
        });
    }

    pub fn select_start(&self, start: Option<DateTime<Utc>>) {
        self.draft.send_if_modified(|draft| {
            let changed = draft.start_date != start;
            draft.start_date = start;
            changed
        });
    }

    pub fn select_end(&self, end: Option<DateTime<Utc>>) {
        self.draft.send_if_modified(|draft| {
            let changed = draft.end_date != end;
            draft.end_date = end;
            changed
        });
    }

    /// Validate the current draft into a submission payload.
    pub fn submit(&self) -> Result<BookingRequest, CoreError> {
        BookingRequest::try_from(&*self.draft.borrow())
    }

    /// Return to an empty draft.
    pub fn reset(&self) {
        self.draft.send_replace(BookingDraft::default());
    }
}

impl Default for BookingForm {
    fn default() -> Self {
        Self::new()
    }
}

// ── SlotOptions ──────────────────────────────────────────────────

/// Start and end choices offered for the selected practitioner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotOptions {
    pub starts: Vec<DateTime<Utc>>,
    pub ends: Vec<DateTime<Utc>>,
}

impl SlotOptions {
    /// Derive the choices for `draft` from the availability store.
    ///
    /// `None` while no practitioner is selected, while the store is
    /// loading, or when it holds no slot belonging to the selection.
    pub fn derive(draft: &BookingDraft, store: &EntityStore<Availability>) -> Option<Self> {
        let practitioner_id = draft.practitioner_id?;
        if store.status().loading {
            return None;
        }

        let snapshot = store.select_all();
        let (starts, ends): (Vec<_>, Vec<_>) = snapshot
            .iter()
            .filter(|slot| slot.practitioner_id == practitioner_id)
            .map(|slot| (slot.start_date, slot.end_date))
            .unzip();

        if starts.is_empty() {
            None
        } else {
            Some(Self { starts, ends })
        }
    }
}

// ── CascadeCoordinator ───────────────────────────────────────────

/// Keeps the availability store scoped to the selected practitioner.
#[derive(Clone)]
pub struct CascadeCoordinator {
    availabilities: FetchController<Availability>,
}

impl CascadeCoordinator {
    pub fn new(availabilities: FetchController<Availability>) -> Self {
        Self { availabilities }
    }

    /// React to a practitioner selection.
    ///
    /// A selection issues a scoped fetch that replaces the whole store.
    /// Clearing the selection empties the store and supersedes any
    /// in-flight fetch; no request is made.
    pub fn on_practitioner_selected(&self, practitioner_id: Option<EntityId>) -> Option<FetchHandle> {
        match practitioner_id {
            Some(id) => {
                debug!(practitioner = %id, "practitioner selected; re-scoping availabilities");
                Some(self.availabilities.fetch_all(Some(id)))
            }
            None => {
                debug!("practitioner cleared; emptying availabilities");
                self.availabilities.store().reset();
                None
            }
        }
    }

    /// Run the cascade as a background task until `cancel` fires or the
    /// form is dropped.
    ///
    /// A practitioner already selected at spawn time is fetched right away.
    pub fn spawn(
        self,
        mut drafts: watch::Receiver<BookingDraft>,
        cancel: CancellationToken,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut selected = drafts.borrow_and_update().practitioner_id;
            if selected.is_some() {
                drop(self.on_practitioner_selected(selected));
            }

            loop {
                tokio::select! {
                    biased;

                    () = cancel.cancelled() => break,

                    changed = drafts.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        let practitioner_id = drafts.borrow_and_update().practitioner_id;
                        if practitioner_id != selected {
                            selected = practitioner_id;
                            // The handle is not awaited: a newer selection
                            // supersedes this fetch through the store sequence.
                            drop(self.on_practitioner_selected(practitioner_id));
                        }
                    }
                }
            }

            debug!("cascade coordinator stopped");
        })
    }
}

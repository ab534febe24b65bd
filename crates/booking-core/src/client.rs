// ── Booking client facade ──
//
// Owns one store and fetch controller per entity kind, the booking form and
// the background cascade task. Consumers hold a cheap clone and read stores
// directly; all writes go through the fetch controllers.

use std::sync::Arc;

use booking_api::ApiClient;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::cascade::{BookingForm, CascadeCoordinator, SlotOptions};
use crate::config::ClientConfig;
use crate::error::{CoreError, FetchFailure};
use crate::fetch::{FetchController, FetchOutcome};
use crate::join::{AppointmentView, join_appointments};
use crate::model::{Appointment, Availability, BookingRequest, Patient, Practitioner};
use crate::store::EntityStore;

// ── DirectoryOutcome ─────────────────────────────────────────────

/// Per-store result of [`BookingClient::load_directory`].
///
/// Each store settles independently; one failure never masks another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryOutcome {
    pub practitioners: FetchOutcome,
    pub patients: FetchOutcome,
    pub appointments: FetchOutcome,
}

impl DirectoryOutcome {
    /// Failed stores, by kind.
    pub fn failures(&self) -> Vec<(&'static str, &FetchFailure)> {
        [
            ("practitioners", &self.practitioners),
            ("patients", &self.patients),
            ("appointments", &self.appointments),
        ]
        .into_iter()
        .filter_map(|(kind, outcome)| match outcome {
            FetchOutcome::Failed(failure) => Some((kind, failure)),
            _ => None,
        })
        .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.failures().is_empty()
    }
}

// ── BookingClient ────────────────────────────────────────────────

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<ClientInner>`. Constructing a client makes no
/// request; call [`load_directory()`](Self::load_directory) to populate the
/// reference stores and [`start_cascade()`](Self::start_cascade) to keep
/// availabilities in step with the practitioner selection.
#[derive(Clone)]
pub struct BookingClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    config: ClientConfig,
    practitioners: FetchController<Practitioner>,
    patients: FetchController<Patient>,
    availabilities: FetchController<Availability>,
    appointments: FetchController<Appointment>,
    form: BookingForm,
    cancel: CancellationToken,
    /// Child token for the running cascade; replaced on restart.
    cancel_child: Mutex<CancellationToken>,
    task_handles: Mutex<Vec<JoinHandle<()>>>,
}

impl BookingClient {
    /// Build a client from configuration. Fails only if the HTTP client
    /// cannot be constructed (bad CA file, invalid TLS setup).
    pub fn new(config: ClientConfig) -> Result<Self, CoreError> {
        let api = ApiClient::new(config.base_url.clone(), &config.transport())?;
        Ok(Self::with_api(config, api))
    }

    /// Build a client around an existing API client.
    pub fn with_api(config: ClientConfig, api: ApiClient) -> Self {
        let api = Arc::new(api);
        let cancel = CancellationToken::new();
        let cancel_child = cancel.child_token();

        Self {
            inner: Arc::new(ClientInner {
                config,
                practitioners: FetchController::new(Arc::clone(&api), Arc::new(EntityStore::new())),
                patients: FetchController::new(Arc::clone(&api), Arc::new(EntityStore::new())),
                availabilities: FetchController::new(Arc::clone(&api), Arc::new(EntityStore::new())),
                appointments: FetchController::new(api, Arc::new(EntityStore::new())),
                form: BookingForm::new(),
                cancel,
                cancel_child: Mutex::new(cancel_child),
                task_handles: Mutex::new(Vec::new()),
            }),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    pub fn form(&self) -> &BookingForm {
        &self.inner.form
    }

    // ── Stores ───────────────────────────────────────────────────

    pub fn practitioners(&self) -> &Arc<EntityStore<Practitioner>> {
        self.inner.practitioners.store()
    }

    pub fn patients(&self) -> &Arc<EntityStore<Patient>> {
        self.inner.patients.store()
    }

    pub fn availabilities(&self) -> &Arc<EntityStore<Availability>> {
        self.inner.availabilities.store()
    }

    pub fn appointments(&self) -> &Arc<EntityStore<Appointment>> {
        self.inner.appointments.store()
    }

    // ── Fetch controllers ────────────────────────────────────────

    pub fn practitioner_fetcher(&self) -> &FetchController<Practitioner> {
        &self.inner.practitioners
    }

    pub fn patient_fetcher(&self) -> &FetchController<Patient> {
        &self.inner.patients
    }

    pub fn availability_fetcher(&self) -> &FetchController<Availability> {
        &self.inner.availabilities
    }

    pub fn appointment_fetcher(&self) -> &FetchController<Appointment> {
        &self.inner.appointments
    }

    /// Coordinator bound to this client's availability store.
    pub fn cascade(&self) -> CascadeCoordinator {
        CascadeCoordinator::new(self.inner.availabilities.clone())
    }

    // ── Lifecycle ────────────────────────────────────────────────

    /// Fetch practitioners, patients and appointments concurrently and wait
    /// for all three to settle.
    pub async fn load_directory(&self) -> Result<DirectoryOutcome, CoreError> {
        let (practitioners, patients, appointments) = tokio::join!(
            self.inner.practitioners.fetch_all(None).outcome(),
            self.inner.patients.fetch_all(None).outcome(),
            self.inner.appointments.fetch_all(None).outcome(),
        );

        let outcome = DirectoryOutcome {
            practitioners: practitioners?,
            patients: patients?,
            appointments: appointments?,
        };

        for (kind, failure) in outcome.failures() {
            warn!(kind, error = %failure, "directory load incomplete");
        }
        info!(
            practitioners = self.practitioners().len(),
            patients = self.patients().len(),
            appointments = self.appointments().len(),
            "directory loaded"
        );
        Ok(outcome)
    }

    /// Spawn the cascade task that re-scopes availabilities on every
    /// practitioner change. Restarting replaces the previous task.
    pub async fn start_cascade(&self) {
        let child = self.inner.cancel.child_token();
        {
            let mut current = self.inner.cancel_child.lock().await;
            current.cancel();
            *current = child.clone();
        }

        let handle = self.cascade().spawn(self.inner.form.subscribe(), child);
        self.inner.task_handles.lock().await.push(handle);
        debug!("cascade started");
    }

    /// Stop background tasks and wait for them to finish.
    pub async fn shutdown(&self) {
        self.inner.cancel.cancel();

        let mut handles = self.inner.task_handles.lock().await;
        for handle in handles.drain(..) {
            let _ = handle.await;
        }
        debug!("booking client shut down");
    }

    // ── Booking ──────────────────────────────────────────────────

    /// Submit the current draft.
    ///
    /// Incomplete drafts fail locally with `ValidationFailed`; no store
    /// changes and no request is made.
    pub async fn book(&self) -> Result<FetchOutcome, CoreError> {
        let request = self.inner.form.submit()?;
        self.book_request(&request).await
    }

    /// Create an appointment, then refresh the appointment store.
    pub async fn book_request(&self, request: &BookingRequest) -> Result<FetchOutcome, CoreError> {
        info!(
            practitioner = %request.practitioner_id,
            patient = %request.patient_id,
            "booking appointment"
        );
        self.inner.appointments.create(request).await
    }

    // ── Derived views ────────────────────────────────────────────

    /// Appointments joined with their practitioners, in store order.
    pub fn appointment_views(&self) -> Vec<AppointmentView> {
        join_appointments(
            &self.appointments().select_all(),
            &self.practitioners().select_all(),
        )
    }

    /// Slot choices for the current draft.
    pub fn slot_options(&self) -> Option<SlotOptions> {
        SlotOptions::derive(&self.inner.form.draft(), self.availabilities())
    }
}

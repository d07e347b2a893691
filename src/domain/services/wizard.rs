//! Reservation wizard.
//!
//! The flow is a linear state machine driven by [`reduce`]:
//! day → vehicle/origin → start time → end time → confirm → outcome.
//! The reducer never performs I/O. Transitions that need the backend leave
//! an [`Effect`] in `pending`; [`ReservationWizard`] executes it and feeds
//! the answer back as an event.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};
use crate::domain::models::{
    reservation::{DayOccupancy, NewReservation, Reservation, ReservationPatch},
    spot::Spot,
    vehicle::Vehicle,
};
use crate::domain::ports::{Clock, ReservationRepository};
use crate::domain::services::planner::{end_options, fuse_label, slots_for_day, start_options};
use crate::domain::services::time_grid::TimeSlot;
use crate::error::AppError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Network(String),
    #[error("{0}")]
    Conflict(String),
}

impl From<AppError> for WizardError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Conflict(msg) => WizardError::Conflict(msg),
            AppError::Validation(msg) => WizardError::Validation(msg),
            other => WizardError::Network(other.user_message()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success(Reservation),
    Failure { message: String, retry_available: bool },
}

#[derive(Debug, Clone, PartialEq)]
pub enum WizardStep {
    SelectDay,
    SelectVehicleAndOrigin,
    SelectStartTime,
    SelectEndTime,
    Confirm,
    Outcome(Outcome),
}

impl WizardStep {
    pub fn index(&self) -> u8 {
        match self {
            WizardStep::SelectDay => 1,
            WizardStep::SelectVehicleAndOrigin => 2,
            WizardStep::SelectStartTime => 3,
            WizardStep::SelectEndTime => 4,
            WizardStep::Confirm => 5,
            WizardStep::Outcome(_) => 6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardMode {
    Create,
    Edit { reservation_id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditScope {
    Full,
    TimeOnly,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub day: Option<NaiveDate>,
    pub vehicle: Option<Vehicle>,
    pub origin: Option<String>,
    pub start_hour: Option<TimeSlot>,
    pub end_hour: Option<TimeSlot>,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyRequest {
    pub spot_id: String,
    pub day: NaiveDate,
    pub vehicle_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitRequest {
    Create(NewReservation),
    Update { id: String, patch: ReservationPatch },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    FetchOccupancy(OccupancyRequest),
    Submit(SubmitRequest),
}

#[derive(Debug, Clone, PartialEq)]
pub enum WizardEvent {
    SelectDay(NaiveDate),
    SelectVehicle(Vehicle),
    SetOrigin(String),
    SelectStart(TimeSlot),
    SelectEnd(TimeSlot),
    Advance,
    Back,
    OccupancyLoaded {
        request: OccupancyRequest,
        occupancy: DayOccupancy,
        now: DateTime<Utc>,
    },
    OccupancyFailed {
        request: OccupancyRequest,
        error: WizardError,
    },
    RetryFetch,
    Submit,
    SubmitSucceeded(Reservation),
    SubmitFailed(WizardError),
    Retry,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WizardState {
    pub step: WizardStep,
    pub mode: WizardMode,
    pub spot: Spot,
    pub driver_id: String,
    pub tz: Tz,
    pub selection: Selection,
    /// Planned labels for the selected day, kept while on steps 3 and 4.
    pub slots: Option<Vec<TimeSlot>>,
    pub pending: Option<Effect>,
    pub error: Option<WizardError>,
    pub retry_used: bool,
}

impl WizardState {
    pub fn new(spot: Spot, driver_id: impl Into<String>, tz: Tz) -> Self {
        Self {
            step: WizardStep::SelectDay,
            mode: WizardMode::Create,
            spot,
            driver_id: driver_id.into(),
            tz,
            selection: Selection::default(),
            slots: None,
            pending: None,
            error: None,
            retry_used: false,
        }
    }

    /// Seeds the wizard from an existing reservation. `TimeOnly` jumps
    /// straight to the start-time step for the reservation's own day.
    pub fn edit(spot: Spot, reservation: &Reservation, vehicle: Vehicle, scope: EditScope, tz: Tz) -> Self {
        let mut state = Self::new(spot, reservation.driver_id.clone(), tz);
        state.mode = WizardMode::Edit { reservation_id: reservation.id.clone() };
        state.selection.day = Some(reservation.start.with_timezone(&tz).date_naive());
        state.selection.vehicle = Some(vehicle);
        state.selection.origin = reservation.origin.clone();

        if scope == EditScope::TimeOnly {
            state.enter_start_step();
        }
        state
    }

    pub fn start_options(&self) -> Vec<TimeSlot> {
        self.slots.as_deref().map(start_options).unwrap_or_default()
    }

    pub fn end_options(&self) -> Vec<TimeSlot> {
        match (self.slots.as_deref(), self.selection.start_hour) {
            (Some(slots), Some(start)) => end_options(slots, start),
            _ => Vec::new(),
        }
    }

    /// Occupancy arrived but nothing is left to book on the chosen day.
    pub fn is_unbookable(&self) -> bool {
        self.step == WizardStep::SelectStartTime
            && self.slots.as_ref().is_some_and(|s| start_options(s).is_empty())
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    fn occupancy_request(&self) -> Option<OccupancyRequest> {
        Some(OccupancyRequest {
            spot_id: self.spot.id.clone(),
            day: self.selection.day?,
            vehicle_type: self.selection.vehicle.as_ref().map(|v| v.vehicle_type.clone()),
        })
    }

    fn enter_start_step(&mut self) {
        self.step = WizardStep::SelectStartTime;
        self.slots = None;
        self.error = None;
        self.pending = self.occupancy_request().map(Effect::FetchOccupancy);
    }

    fn excluded_reservation(&self) -> Option<&str> {
        match &self.mode {
            WizardMode::Edit { reservation_id } => Some(reservation_id.as_str()),
            WizardMode::Create => None,
        }
    }

    fn submit_request(&self) -> Result<SubmitRequest, WizardError> {
        let sel = &self.selection;
        let missing = || WizardError::Validation("Reservation details are incomplete".into());
        let vehicle = sel.vehicle.as_ref().ok_or_else(missing)?;
        let origin = sel.origin.clone().ok_or_else(missing)?;
        let start = sel.start_at.ok_or_else(missing)?;
        let end = sel.end_at.ok_or_else(missing)?;

        if end <= start {
            return Err(WizardError::Validation("End time must be after start time".into()));
        }

        Ok(match &self.mode {
            WizardMode::Create => SubmitRequest::Create(NewReservation {
                spot_id: self.spot.id.clone(),
                driver_id: self.driver_id.clone(),
                vehicle_id: vehicle.id.clone(),
                origin,
                start,
                end,
            }),
            WizardMode::Edit { reservation_id } => SubmitRequest::Update {
                id: reservation_id.clone(),
                patch: ReservationPatch {
                    vehicle_id: vehicle.id.clone(),
                    origin,
                    start,
                    end,
                },
            },
        })
    }

    fn reject(mut self, message: &str) -> Self {
        debug!(step = self.step.index(), "wizard rejected event: {}", message);
        self.error = Some(WizardError::Validation(message.to_string()));
        self
    }

    fn advance(mut self) -> Self {
        match self.step {
            WizardStep::SelectDay => {
                if self.selection.day.is_none() {
                    return self.reject("Select a day");
                }
                self.error = None;
                self.step = WizardStep::SelectVehicleAndOrigin;
            }
            WizardStep::SelectVehicleAndOrigin => {
                if self.selection.vehicle.is_none() {
                    return self.reject("Select a vehicle");
                }
                if self.selection.origin.as_deref().is_none_or(|o| o.trim().is_empty()) {
                    return self.reject("Inform the origin");
                }
                self.enter_start_step();
            }
            WizardStep::SelectStartTime => {
                if self.selection.start_hour.is_none() {
                    return self.reject("Select a start time");
                }
                self.error = None;
                self.step = WizardStep::SelectEndTime;
            }
            WizardStep::SelectEndTime => {
                if self.selection.end_hour.is_none() || self.selection.start_at.is_none() || self.selection.end_at.is_none() {
                    return self.reject("Select an end time");
                }
                self.error = None;
                self.step = WizardStep::Confirm;
            }
            _ => return self.reject("Nothing to advance to"),
        }
        self
    }

    fn back(mut self) -> Self {
        if matches!(self.pending, Some(Effect::Submit(_))) {
            return self;
        }
        self.error = None;
        match self.step {
            WizardStep::SelectVehicleAndOrigin => {
                self.selection.vehicle = None;
                self.selection.origin = None;
                self.step = WizardStep::SelectDay;
            }
            WizardStep::SelectStartTime => {
                self.selection.start_hour = None;
                self.selection.end_hour = None;
                self.selection.start_at = None;
                self.selection.end_at = None;
                self.slots = None;
                self.pending = None;
                self.step = WizardStep::SelectVehicleAndOrigin;
            }
            WizardStep::SelectEndTime => {
                self.selection.end_hour = None;
                self.selection.start_at = None;
                self.selection.end_at = None;
                self.step = WizardStep::SelectStartTime;
            }
            WizardStep::Confirm => {
                self.step = WizardStep::SelectEndTime;
            }
            WizardStep::SelectDay | WizardStep::Outcome(_) => {}
        }
        self
    }
}

/// Applies one event. Events that do not fit the current step leave the
/// state untouched, apart from a validation message where the user asked
/// for something invalid.
pub fn reduce(state: WizardState, event: WizardEvent) -> WizardState {
    let mut state = state;
    match event {
        WizardEvent::SelectDay(day) => {
            if state.step != WizardStep::SelectDay {
                return state.reject("The day can only be changed on the first step");
            }
            state.selection.day = Some(day);
            state.error = None;
            state
        }
        WizardEvent::SelectVehicle(vehicle) => {
            if state.step != WizardStep::SelectVehicleAndOrigin {
                return state.reject("The vehicle can only be changed on the second step");
            }
            state.selection.vehicle = Some(vehicle);
            state.error = None;
            state
        }
        WizardEvent::SetOrigin(origin) => {
            if state.step != WizardStep::SelectVehicleAndOrigin {
                return state.reject("The origin can only be changed on the second step");
            }
            state.selection.origin = Some(origin);
            state.error = None;
            state
        }
        WizardEvent::SelectStart(slot) => {
            if state.step != WizardStep::SelectStartTime || state.slots.is_none() {
                return state.reject("Start times are not available yet");
            }
            if !state.start_options().contains(&slot) {
                return state.reject("Start time is not available");
            }
            state.selection.start_hour = Some(slot);
            state.error = None;
            state
        }
        WizardEvent::SelectEnd(slot) => {
            if state.step != WizardStep::SelectEndTime {
                return state.reject("End time cannot be chosen now");
            }
            if !state.end_options().contains(&slot) {
                return state.reject("End time must be after the start time");
            }
            let (Some(day), Some(start)) = (state.selection.day, state.selection.start_hour) else {
                return state.reject("Select a start time");
            };
            let (Some(start_at), Some(end_at)) = (fuse_label(day, start, state.tz), fuse_label(day, slot, state.tz)) else {
                return state.reject("Selected time does not exist on this day");
            };
            state.selection.end_hour = Some(slot);
            state.selection.start_at = Some(start_at);
            state.selection.end_at = Some(end_at);
            state.error = None;
            state
        }
        WizardEvent::Advance => state.advance(),
        WizardEvent::Back => state.back(),
        WizardEvent::OccupancyLoaded { request, occupancy, now } => {
            if state.pending != Some(Effect::FetchOccupancy(request.clone())) {
                debug!(spot_id = %request.spot_id, day = %request.day, "discarding stale occupancy response");
                return state;
            }
            let slots = slots_for_day(
                &state.spot,
                request.day,
                &occupancy,
                state.excluded_reservation(),
                now,
                state.tz,
            );
            debug!(spot_id = %request.spot_id, day = %request.day, count = slots.len(), "planned slots");
            state.slots = Some(slots);
            state.pending = None;
            state.error = None;
            state
        }
        WizardEvent::OccupancyFailed { request, error } => {
            if state.pending != Some(Effect::FetchOccupancy(request.clone())) {
                debug!(spot_id = %request.spot_id, day = %request.day, "discarding stale occupancy failure");
                return state;
            }
            warn!(spot_id = %request.spot_id, day = %request.day, "occupancy lookup failed: {}", error);
            state.pending = None;
            state.slots = None;
            state.error = Some(error);
            state
        }
        WizardEvent::RetryFetch => {
            if state.step != WizardStep::SelectStartTime || state.slots.is_some() || state.pending.is_some() {
                return state;
            }
            state.enter_start_step();
            state
        }
        WizardEvent::Submit => {
            if state.step != WizardStep::Confirm || state.pending.is_some() {
                return state;
            }
            match state.submit_request() {
                Ok(request) => {
                    state.pending = Some(Effect::Submit(request));
                    state.error = None;
                    state
                }
                Err(e) => {
                    state.error = Some(e);
                    state
                }
            }
        }
        WizardEvent::SubmitSucceeded(reservation) => {
            if !matches!(state.pending, Some(Effect::Submit(_))) {
                return state;
            }
            info!(reservation_id = %reservation.id, "reservation confirmed");
            state.pending = None;
            state.error = None;
            state.step = WizardStep::Outcome(Outcome::Success(reservation));
            state
        }
        WizardEvent::SubmitFailed(error) => {
            if !matches!(state.pending, Some(Effect::Submit(_))) {
                return state;
            }
            warn!("reservation submit failed: {}", error);
            state.pending = None;
            state.step = WizardStep::Outcome(Outcome::Failure {
                message: error.to_string(),
                retry_available: !state.retry_used,
            });
            state.error = Some(error);
            state
        }
        WizardEvent::Retry => {
            if let WizardStep::Outcome(Outcome::Failure { retry_available: true, .. }) = state.step {
                state.retry_used = true;
                state.error = None;
                state.step = WizardStep::Confirm;
            }
            state
        }
    }
}

/// Drives a [`WizardState`] against the backend: every dispatched event is
/// reduced, then the pending effect, if any, is awaited and its answer
/// reduced in turn.
pub struct ReservationWizard {
    state: WizardState,
    reservation_repo: Arc<dyn ReservationRepository>,
    clock: Arc<dyn Clock>,
}

impl ReservationWizard {
    pub fn new(state: WizardState, reservation_repo: Arc<dyn ReservationRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { state, reservation_repo, clock }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn into_state(self) -> WizardState {
        self.state
    }

    /// Runs the effect left by the seeding constructor, e.g. the occupancy
    /// fetch of a time-only edit.
    pub async fn start(&mut self) -> &WizardState {
        self.run_pending().await;
        &self.state
    }

    pub async fn dispatch(&mut self, event: WizardEvent) -> &WizardState {
        self.apply(event);
        self.run_pending().await;
        &self.state
    }

    fn apply(&mut self, event: WizardEvent) {
        self.state = reduce(self.state.clone(), event);
    }

    async fn run_pending(&mut self) {
        while let Some(effect) = self.state.pending.clone() {
            let event = self.execute(effect).await;
            self.apply(event);
        }
    }

    async fn execute(&self, effect: Effect) -> WizardEvent {
        match effect {
            Effect::FetchOccupancy(request) => {
                let result = self.reservation_repo
                    .occupancy(&request.spot_id, request.day, request.vehicle_type.as_deref())
                    .await;
                match result {
                    Ok(occupancy) => WizardEvent::OccupancyLoaded { request, occupancy, now: self.clock.now() },
                    Err(e) => WizardEvent::OccupancyFailed { request, error: e.into() },
                }
            }
            Effect::Submit(SubmitRequest::Create(new_reservation)) => {
                match self.reservation_repo.create(&new_reservation).await {
                    Ok(reservation) => WizardEvent::SubmitSucceeded(reservation),
                    Err(e) => WizardEvent::SubmitFailed(e.into()),
                }
            }
            Effect::Submit(SubmitRequest::Update { id, patch }) => {
                match self.reservation_repo.update(&id, &patch).await {
                    Ok(reservation) => WizardEvent::SubmitSucceeded(reservation),
                    Err(e) => WizardEvent::SubmitFailed(e.into()),
                }
            }
        }
    }
}

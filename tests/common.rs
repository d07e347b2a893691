#![allow(dead_code)]

use vagas_planner::{
    api::router::create_router,
    config::Config,
    domain::models::{
        availability::{Availability, AvailabilityPatch, NewAvailability},
        blockage::Blockage,
        reservation::{DayOccupancy, NewReservation, Reservation, ReservationPatch, ReservationStatus},
        spot::{Address, Area, DayOfWeek, Spot, SpotSummary, SpotType, WeeklyOperation},
        vehicle::Vehicle,
    },
    domain::ports::{AvailabilityRepository, Clock, ReservationRepository, SpotRepository},
    error::AppError,
    state::AppState,
};
use async_trait::async_trait;
use axum::Router;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Arc, Mutex,
};

pub const MONDAY: &str = "2026-10-19";
pub const NOW: &str = "2026-10-19T09:15:00Z";

pub fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}

pub fn instant(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value).unwrap().with_timezone(&Utc)
}

pub fn time(value: &str) -> NaiveTime {
    NaiveTime::parse_from_str(value, "%H:%M").unwrap()
}

pub fn op(day: DayOfWeek, start: &str, end: &str) -> WeeklyOperation {
    WeeklyOperation { day, start: time(start), end: time(end) }
}

pub fn spot(id: &str, street: &str, area: Area, operations: Vec<WeeklyOperation>) -> Spot {
    Spot {
        id: id.to_string(),
        address: Address {
            street: street.to_string(),
            neighborhood: Some("Centro".to_string()),
            reference_number: Some(format!("{}-ref", id)),
        },
        spot_type: SpotType::Parallel,
        area,
        operations,
    }
}

pub fn summary(spot_id: &str, street: &str) -> SpotSummary {
    SpotSummary {
        id: spot_id.to_string(),
        address: Address {
            street: street.to_string(),
            neighborhood: None,
            reference_number: None,
        },
    }
}

pub fn reservation(id: &str, spot_id: &str, start: &str, end: &str, status: ReservationStatus) -> Reservation {
    reservation_on(id, spot_id, "Rua A", start, end, status)
}

pub fn reservation_on(id: &str, spot_id: &str, street: &str, start: &str, end: &str, status: ReservationStatus) -> Reservation {
    Reservation {
        id: id.to_string(),
        spot: summary(spot_id, street),
        driver_id: "driver-1".to_string(),
        vehicle_id: "truck-1".to_string(),
        origin: Some("Depot".to_string()),
        start: instant(start),
        end: instant(end),
        status,
    }
}

pub fn blockage(id: &str, spot_id: &str, start: &str, end: &str) -> Blockage {
    Blockage {
        id: id.to_string(),
        spot_id: spot_id.to_string(),
        start: instant(start),
        end: instant(end),
        reason: Some("maintenance".to_string()),
    }
}

pub fn availability(id: &str, spot_id: &str, street: &str, start: &str, end: &str) -> Availability {
    Availability {
        id: id.to_string(),
        spot: summary(spot_id, street),
        start: date(start),
        end: date(end),
    }
}

pub fn truck() -> Vehicle {
    Vehicle {
        id: "truck-1".to_string(),
        plate: "ABC1D23".to_string(),
        vehicle_type: "TRUCK".to_string(),
    }
}

/// Yellow spot open 08:00-12:00 on Mondays.
pub fn yellow_spot() -> Spot {
    spot("spot-1", "Rua A", Area::Yellow, vec![op(DayOfWeek::Monday, "08:00", "12:00")])
}

pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[derive(Default)]
pub struct MockSpotRepo {
    pub spots: Mutex<HashMap<String, Spot>>,
}

impl MockSpotRepo {
    pub fn insert(&self, spot: Spot) {
        self.spots.lock().unwrap().insert(spot.id.clone(), spot);
    }
}

#[async_trait]
impl SpotRepository for MockSpotRepo {
    async fn find_by_id(&self, spot_id: &str) -> Result<Option<Spot>, AppError> {
        Ok(self.spots.lock().unwrap().get(spot_id).cloned())
    }
}

#[derive(Default)]
pub struct MockReservationRepo {
    pub occupancy: Mutex<HashMap<(String, NaiveDate), DayOccupancy>>,
    pub reservations: Mutex<Vec<Reservation>>,
    pub created: Mutex<Vec<NewReservation>>,
    pub patched: Mutex<Vec<(String, ReservationPatch)>>,
    pub fail_occupancy: AtomicBool,
    pub conflicts_remaining: AtomicUsize,
    pub occupancy_calls: AtomicUsize,
}

impl MockReservationRepo {
    pub fn set_occupancy(&self, spot_id: &str, day: NaiveDate, occupancy: DayOccupancy) {
        self.occupancy.lock().unwrap().insert((spot_id.to_string(), day), occupancy);
    }

    pub fn fail_next_writes(&self, count: usize) {
        self.conflicts_remaining.store(count, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.occupancy_calls.load(Ordering::SeqCst)
    }

    fn take_conflict(&self) -> Result<(), AppError> {
        let remaining = self.conflicts_remaining.load(Ordering::SeqCst);
        if remaining > 0 {
            self.conflicts_remaining.store(remaining - 1, Ordering::SeqCst);
            return Err(AppError::Conflict("Spot already reserved for this time".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ReservationRepository for MockReservationRepo {
    async fn find_by_id(&self, id: &str) -> Result<Option<Reservation>, AppError> {
        Ok(self.reservations.lock().unwrap().iter().find(|r| r.id == id).cloned())
    }

    async fn occupancy(&self, spot_id: &str, date: NaiveDate, _vehicle_type: Option<&str>) -> Result<DayOccupancy, AppError> {
        self.occupancy_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_occupancy.load(Ordering::SeqCst) {
            return Err(AppError::Upstream("connection refused".to_string()));
        }
        Ok(self.occupancy
            .lock()
            .unwrap()
            .get(&(spot_id.to_string(), date))
            .cloned()
            .unwrap_or_default())
    }

    async fn list_by_range(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Reservation>, AppError> {
        Ok(self.reservations
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.start.date_naive() >= from && r.start.date_naive() <= to)
            .cloned()
            .collect())
    }

    async fn create(&self, reservation: &NewReservation) -> Result<Reservation, AppError> {
        self.take_conflict()?;
        let mut created = self.created.lock().unwrap();
        created.push(reservation.clone());
        Ok(Reservation {
            id: format!("res-{}", created.len()),
            spot: summary(&reservation.spot_id, "Rua A"),
            driver_id: reservation.driver_id.clone(),
            vehicle_id: reservation.vehicle_id.clone(),
            origin: Some(reservation.origin.clone()),
            start: reservation.start,
            end: reservation.end,
            status: ReservationStatus::Reserved,
        })
    }

    async fn update(&self, id: &str, patch: &ReservationPatch) -> Result<Reservation, AppError> {
        self.take_conflict()?;
        self.patched.lock().unwrap().push((id.to_string(), patch.clone()));
        let mut reservations = self.reservations.lock().unwrap();
        let existing = reservations
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(AppError::NotFound("Reservation not found".to_string()))?;
        existing.vehicle_id = patch.vehicle_id.clone();
        existing.origin = Some(patch.origin.clone());
        existing.start = patch.start;
        existing.end = patch.end;
        Ok(existing.clone())
    }
}

#[derive(Default)]
pub struct MockAvailabilityRepo {
    pub items: Mutex<Vec<Availability>>,
}

#[async_trait]
impl AvailabilityRepository for MockAvailabilityRepo {
    async fn list(&self) -> Result<Vec<Availability>, AppError> {
        Ok(self.items.lock().unwrap().clone())
    }

    async fn create(&self, new: &NewAvailability) -> Result<Vec<Availability>, AppError> {
        let mut items = self.items.lock().unwrap();
        let mut created = Vec::new();
        for spot_id in &new.spot_ids {
            let item = Availability {
                id: format!("av-{}", items.len() + 1),
                spot: summary(spot_id, "Rua A"),
                start: new.start,
                end: new.end,
            };
            items.push(item.clone());
            created.push(item);
        }
        Ok(created)
    }

    async fn update(&self, id: &str, patch: &AvailabilityPatch) -> Result<Availability, AppError> {
        let mut items = self.items.lock().unwrap();
        let item = items
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(AppError::NotFound("Availability not found".to_string()))?;
        item.start = patch.start;
        item.end = patch.end;
        Ok(item.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let mut items = self.items.lock().unwrap();
        let before = items.len();
        items.retain(|a| a.id != id);
        if items.len() == before {
            return Err(AppError::NotFound("Availability not found".to_string()));
        }
        Ok(())
    }
}

pub fn test_config() -> Config {
    Config {
        port: 0,
        backend_url: "http://localhost".to_string(),
        backend_token: "token".to_string(),
        timezone: "UTC".to_string(),
        backend_timeout_secs: 1,
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: Arc<AppState>,
    pub spots: Arc<MockSpotRepo>,
    pub reservations: Arc<MockReservationRepo>,
    pub availabilities: Arc<MockAvailabilityRepo>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::at(NOW)
    }

    pub fn at(now: &str) -> Self {
        let spots = Arc::new(MockSpotRepo::default());
        let reservations = Arc::new(MockReservationRepo::default());
        let availabilities = Arc::new(MockAvailabilityRepo::default());

        let state = Arc::new(AppState {
            config: test_config(),
            spot_repo: spots.clone(),
            reservation_repo: reservations.clone(),
            availability_repo: availabilities.clone(),
            clock: Arc::new(FixedClock(instant(now))),
        });

        let router = create_router(state.clone());

        Self {
            router,
            state,
            spots,
            reservations,
            availabilities,
        }
    }
}

pub async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap_or(Value::Null)
}

pub fn labels(slots: &[vagas_planner::domain::services::time_grid::TimeSlot]) -> Vec<String> {
    slots.iter().map(|s| s.label()).collect()
}

use chrono::{Duration, NaiveDate};
use chrono_tz::Tz;
use serde::Serialize;
use std::collections::BTreeMap;
use crate::domain::models::{availability::Availability, reservation::Reservation, spot::SpotSummary};

pub const GROUPED_COLOR: &str = "#6f42c1";
pub const SINGLE_COLOR: &str = "#0d6efd";

/// Anything the manager calendars can place under a street and a spot.
pub trait CalendarRecord {
    fn record_id(&self) -> &str;
    fn spot(&self) -> &SpotSummary;
}

impl CalendarRecord for Reservation {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn spot(&self) -> &SpotSummary {
        &self.spot
    }
}

impl CalendarRecord for Availability {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn spot(&self) -> &SpotSummary {
        &self.spot
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct SpotGroup<R> {
    pub spot_id: String,
    pub reference_number: Option<String>,
    pub records: Vec<R>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct StreetGroup<R> {
    pub street: String,
    pub spots: Vec<SpotGroup<R>>,
}

impl<R: CalendarRecord> StreetGroup<R> {
    pub fn find_record(&self, record_id: &str) -> Option<&R> {
        self.spots
            .iter()
            .flat_map(|s| s.records.iter())
            .find(|r| r.record_id() == record_id)
    }
}

/// One calendar event. `start`/`end` are the all-day range handed to the
/// calendar widget.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct CalendarGroup<R> {
    pub key: String,
    pub title: String,
    pub color: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub is_grouped: bool,
    pub streets: Vec<StreetGroup<R>>,
}

impl<R> CalendarGroup<R> {
    fn new(key: String, start: NaiveDate, end: NaiveDate, streets: Vec<StreetGroup<R>>) -> Self {
        let is_grouped = streets.len() > 1;
        let title = if is_grouped {
            format!("{} streets", streets.len())
        } else {
            streets.first().map(|s| s.street.clone()).unwrap_or_default()
        };
        let color = if is_grouped { GROUPED_COLOR } else { SINGLE_COLOR };

        Self {
            key,
            title,
            color: color.to_string(),
            start,
            end,
            is_grouped,
            streets,
        }
    }
}

/// Street → spot nesting, both levels ordered by name/id.
pub fn group_by_street<R: CalendarRecord + Clone>(records: &[R]) -> Vec<StreetGroup<R>> {
    let mut streets: BTreeMap<String, BTreeMap<String, SpotGroup<R>>> = BTreeMap::new();

    for record in records {
        let spot = record.spot();
        streets
            .entry(spot.address.street.clone())
            .or_default()
            .entry(spot.id.clone())
            .or_insert_with(|| SpotGroup {
                spot_id: spot.id.clone(),
                reference_number: spot.address.reference_number.clone(),
                records: Vec::new(),
            })
            .records
            .push(record.clone());
    }

    streets
        .into_iter()
        .map(|(street, spots)| StreetGroup {
            street,
            spots: spots.into_values().collect(),
        })
        .collect()
}

/// Reservation calendar: one event per local calendar date of `start`.
pub fn aggregate_reservations(records: &[Reservation], tz: Tz) -> Vec<CalendarGroup<Reservation>> {
    let mut by_date: BTreeMap<NaiveDate, Vec<Reservation>> = BTreeMap::new();
    for record in records {
        by_date
            .entry(record.start.with_timezone(&tz).date_naive())
            .or_default()
            .push(record.clone());
    }

    by_date
        .into_iter()
        .map(|(date, day_records)| {
            CalendarGroup::new(date.to_string(), date, date, group_by_street(&day_records))
        })
        .collect()
}

/// Availability calendar: one event per literal `(start, end)` pair. The
/// stored end date is pushed one day forward so the widget, which treats
/// the end as exclusive, still paints the last day.
pub fn aggregate_availabilities(records: &[Availability]) -> Vec<CalendarGroup<Availability>> {
    let mut by_interval: BTreeMap<(NaiveDate, NaiveDate), Vec<Availability>> = BTreeMap::new();
    for record in records {
        by_interval
            .entry((record.start, record.end))
            .or_default()
            .push(record.clone());
    }

    by_interval
        .into_iter()
        .map(|((start, end), interval_records)| {
            let key = interval_records
                .first()
                .map(Availability::interval_key)
                .unwrap_or_default();
            CalendarGroup::new(key, start, end + Duration::days(1), group_by_street(&interval_records))
        })
        .collect()
}

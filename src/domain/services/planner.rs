use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use std::collections::HashSet;
use crate::domain::models::{reservation::DayOccupancy, spot::Spot};
use crate::domain::services::occupancy::occupied_for_day;
use crate::domain::services::time_grid::{generate_day_slots, TimeSlot};

/// Bookable labels of `spot` on `day`.
///
/// `now` is the local wall-clock time, sampled once by the caller. When `day`
/// is today, labels at or before `now` are dropped. A day without an
/// operation, or whose operation is inverted, yields an empty list.
pub fn plan_day(day: NaiveDate, spot: &Spot, occupied: &[TimeSlot], now: NaiveDateTime) -> Vec<TimeSlot> {
    let taken: HashSet<TimeSlot> = occupied.iter().copied().collect();
    let is_today = now.date() == day;
    let now_time = now.time();

    let mut slots: Vec<TimeSlot> = spot
        .operations_on(day.weekday().into())
        .flat_map(generate_day_slots)
        .filter(|slot| !taken.contains(slot))
        .filter(|slot| !is_today || slot.as_time() > now_time)
        .collect();

    slots.sort();
    slots.dedup();
    slots
}

/// Full pipeline from a backend occupancy answer to the slot list: status
/// filter, area-capped occupancy, then [`plan_day`].
///
/// `exclude_reservation` removes a reservation from its own occupancy while
/// it is being edited.
pub fn slots_for_day(
    spot: &Spot,
    day: NaiveDate,
    occupancy: &DayOccupancy,
    exclude_reservation: Option<&str>,
    now: DateTime<Utc>,
    tz: Tz,
) -> Vec<TimeSlot> {
    let active = occupancy
        .reservations
        .iter()
        .filter(|r| r.status.occupies_time())
        .filter(|r| exclude_reservation != Some(r.id.as_str()));

    let occupied = occupied_for_day(day, active, &occupancy.blockages, spot.area, tz);

    plan_day(day, spot, &occupied, now.with_timezone(&tz).naive_local())
}

/// Labels that can open a reservation: every slot that still has a later
/// slot to end on.
pub fn start_options(slots: &[TimeSlot]) -> Vec<TimeSlot> {
    match slots.iter().max() {
        Some(last) => slots.iter().copied().filter(|s| s < last).collect(),
        None => Vec::new(),
    }
}

/// Labels that can close a reservation opened at `start`.
pub fn end_options(slots: &[TimeSlot], start: TimeSlot) -> Vec<TimeSlot> {
    slots
        .iter()
        .copied()
        .filter(|s| s.minute_of_day() > start.minute_of_day())
        .collect()
}

/// Joins a calendar day and a slot label into an instant in `tz`. `None`
/// when the local time does not exist or is ambiguous on that day.
pub fn fuse_label(day: NaiveDate, slot: TimeSlot, tz: Tz) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(&day.and_time(slot.as_time()))
        .single()
        .map(|dt| dt.with_timezone(&Utc))
}

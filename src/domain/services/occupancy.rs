use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;
use std::cmp::min;
use std::collections::BTreeSet;
use crate::domain::models::{blockage::Blockage, reservation::Reservation, spot::Area};
use crate::domain::services::time_grid::{TimeSlot, SLOT_MINUTES};

fn step() -> Duration {
    Duration::minutes(SLOT_MINUTES as i64)
}

// A reservation whose end does not follow its start is read as crossing
// midnight.
fn normalized_end(start: DateTime<Utc>, end: DateTime<Utc>) -> DateTime<Utc> {
    if end <= start { end + Duration::days(1) } else { end }
}

// Blockages are half-open, so `[t, t)` covers nothing. Only an end before
// the start crosses midnight.
fn normalized_blockage_end(start: DateTime<Utc>, end: DateTime<Utc>) -> DateTime<Utc> {
    if end < start { end + Duration::days(1) } else { end }
}

/// Instants from `start` in half-hour steps up to `end`. When `within` is
/// given, only steps inside `[lo, hi)` are produced; the cursor still
/// starts on `start`'s grid.
fn walk(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    include_end: bool,
    within: Option<(DateTime<Utc>, DateTime<Utc>)>,
) -> Vec<DateTime<Utc>> {
    let step = step();
    let mut cursor = start;
    let mut stop = end;

    if let Some((lo, hi)) = within {
        if lo > start {
            let step_secs = step.num_seconds();
            let skipped = ((lo - start).num_seconds() + step_secs - 1) / step_secs;
            cursor = start + Duration::seconds(skipped * step_secs);
        }
        if hi <= end {
            stop = hi;
        }
    }
    let include_stop = include_end && stop == end;

    let mut instants = Vec::new();
    while cursor < stop || (include_stop && cursor == stop) {
        instants.push(cursor);
        cursor += step;
    }
    instants
}

fn labels(instants: Vec<DateTime<Utc>>, tz: Tz) -> Vec<TimeSlot> {
    let mut out: Vec<TimeSlot> = instants
        .into_iter()
        .map(|t| TimeSlot::floor(t.with_timezone(&tz).time()))
        .collect();
    out.dedup();
    out
}

fn reservation_instants(
    reservation: &Reservation,
    cap: Option<Duration>,
    within: Option<(DateTime<Utc>, DateTime<Utc>)>,
) -> Vec<DateTime<Utc>> {
    let mut end = normalized_end(reservation.start, reservation.end);
    if let Some(cap) = cap {
        end = min(end, reservation.start + cap);
    }
    walk(reservation.start, end, true, within)
}

fn blockage_instants(blockage: &Blockage, within: Option<(DateTime<Utc>, DateTime<Utc>)>) -> Vec<DateTime<Utc>> {
    walk(blockage.start, normalized_blockage_end(blockage.start, blockage.end), false, within)
}

// Wide enough to hold the local day in any zone; `on_day` trims the rest.
fn day_window(day: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let midnight = day.and_time(NaiveTime::MIN).and_utc();
    (midnight - Duration::days(1), midnight + Duration::days(2))
}

/// Labels held by a reservation, walking `[start, end]` in half-hour steps.
pub fn occupied_from_reservation(reservation: &Reservation, tz: Tz) -> Vec<TimeSlot> {
    labels(reservation_instants(reservation, None, None), tz)
}

/// Same walk as [`occupied_from_reservation`], stopped at
/// `start + area.max_duration()` when the stored end runs past it.
pub fn occupied_from_reservation_capped_by_area(reservation: &Reservation, area: Area, tz: Tz) -> Vec<TimeSlot> {
    labels(reservation_instants(reservation, Some(area.max_duration()), None), tz)
}

/// Labels covered by a blockage. The end instant is excluded.
pub fn occupied_from_blockage(blockage: &Blockage, tz: Tz) -> Vec<TimeSlot> {
    labels(blockage_instants(blockage, None), tz)
}

/// Everything a spot cannot offer on `day`. Callers pass only reservations
/// whose status still occupies time; instants outside `day` are dropped so
/// an overnight booking does not leak into the following day's labels.
pub fn occupied_for_day<'a>(
    day: NaiveDate,
    reservations: impl IntoIterator<Item = &'a Reservation>,
    blockages: &[Blockage],
    area: Area,
    tz: Tz,
) -> Vec<TimeSlot> {
    let mut occupied = BTreeSet::new();
    let window = Some(day_window(day));

    let on_day = |t: &DateTime<Utc>| t.with_timezone(&tz).date_naive() == day;

    for reservation in reservations {
        let instants: Vec<_> = reservation_instants(reservation, Some(area.max_duration()), window)
            .into_iter()
            .filter(on_day)
            .collect();
        occupied.extend(labels(instants, tz));
    }

    for blockage in blockages {
        let instants: Vec<_> = blockage_instants(blockage, window).into_iter().filter(on_day).collect();
        occupied.extend(labels(instants, tz));
    }

    occupied.into_iter().collect()
}

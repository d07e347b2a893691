mod common;

use common::{labels, op, time};
use vagas_planner::domain::models::spot::DayOfWeek;
use vagas_planner::domain::services::time_grid::{generate_day_slots, TimeSlot, SLOT_MINUTES};

#[test]
fn test_day_slots_cover_window_inclusively() {
    let slots = generate_day_slots(&op(DayOfWeek::Monday, "08:00", "12:00"));

    assert_eq!(slots.len(), 9);
    assert_eq!(slots.first().unwrap().label(), "08:00");
    assert_eq!(slots.last().unwrap().label(), "12:00");

    for pair in slots.windows(2) {
        assert_eq!(pair[1].minute_of_day() - pair[0].minute_of_day(), SLOT_MINUTES);
    }
}

#[test]
fn test_unaligned_bounds_round_down() {
    let slots = generate_day_slots(&op(DayOfWeek::Monday, "08:10", "09:45"));
    assert_eq!(labels(&slots), vec!["08:00", "08:30", "09:00", "09:30"]);
}

#[test]
fn test_inverted_window_is_empty() {
    assert!(generate_day_slots(&op(DayOfWeek::Friday, "18:00", "07:00")).is_empty());
}

#[test]
fn test_single_instant_window() {
    let slots = generate_day_slots(&op(DayOfWeek::Friday, "07:00", "07:00"));
    assert_eq!(labels(&slots), vec!["07:00"]);
}

#[test]
fn test_late_window_stops_at_last_half_hour() {
    let slots = generate_day_slots(&op(DayOfWeek::Sunday, "22:00", "23:59"));
    assert_eq!(labels(&slots), vec!["22:00", "22:30", "23:00", "23:30"]);
}

#[test]
fn test_floor_policy() {
    assert_eq!(TimeSlot::floor(time("10:00")).label(), "10:00");
    assert_eq!(TimeSlot::floor(time("10:29")).label(), "10:00");
    assert_eq!(TimeSlot::floor(time("10:30")).label(), "10:30");
    assert_eq!(TimeSlot::floor(time("10:59")).label(), "10:30");
}

#[test]
fn test_label_parsing() {
    let slot: TimeSlot = "09:30".parse().unwrap();
    assert_eq!(slot.minute_of_day(), 570);
    assert_eq!(slot.as_time(), time("09:30"));

    assert!("09:15".parse::<TimeSlot>().is_err(), "off-grid labels are rejected");
    assert!("9h30".parse::<TimeSlot>().is_err());
    assert!("24:00".parse::<TimeSlot>().is_err());
}

#[test]
fn test_slot_serializes_as_label() {
    let slot: TimeSlot = "07:00".parse().unwrap();
    assert_eq!(serde_json::to_string(&slot).unwrap(), "\"07:00\"");

    let parsed: Result<TimeSlot, _> = serde_json::from_str("\"07:45\"");
    assert!(parsed.is_err());
}

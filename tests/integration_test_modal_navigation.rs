mod common;

use common::availability;
use vagas_planner::domain::models::availability::Availability;
use vagas_planner::domain::services::calendar::{aggregate_availabilities, CalendarGroup};
use vagas_planner::domain::services::modal::{ModalEvent, ModalLevel, ModalNavigator, ModalView};

fn groups() -> Vec<CalendarGroup<Availability>> {
    aggregate_availabilities(&[
        availability("a1", "s1", "Rua A", "2026-11-02", "2026-11-06"),
        availability("a2", "s2", "Rua B", "2026-11-02", "2026-11-06"),
        availability("a3", "s3", "Rua C", "2026-11-09", "2026-11-09"),
    ])
}

fn grouped() -> CalendarGroup<Availability> {
    groups().remove(0)
}

fn single() -> CalendarGroup<Availability> {
    groups().remove(1)
}

#[test]
fn test_single_street_opens_on_spot_list() {
    let nav = ModalNavigator::new().apply(ModalEvent::Open(single()));
    assert_eq!(nav.level(), Some(ModalLevel::SpotList));
    match nav.view() {
        ModalView::SpotList(street) => assert_eq!(street.street, "Rua C"),
        other => panic!("unexpected view {:?}", other),
    }

    let nav = nav.apply(ModalEvent::Back);
    assert_eq!(nav.level(), Some(ModalLevel::Group));

    // Nothing above the group.
    let nav = nav.apply(ModalEvent::Back);
    assert_eq!(nav.level(), Some(ModalLevel::Group));
}

#[test]
fn test_grouped_event_full_drill_down_and_back() {
    let nav = ModalNavigator::new().apply(ModalEvent::Open(grouped()));
    assert_eq!(nav.level(), Some(ModalLevel::StreetList));

    let nav = nav.apply(ModalEvent::SelectStreet("Rua B".to_string()));
    assert_eq!(nav.level(), Some(ModalLevel::SpotList));

    let nav = nav.apply(ModalEvent::SelectRecord("a2".to_string()));
    match nav.view() {
        ModalView::SingleRecord(record) => assert_eq!(record.id, "a2"),
        other => panic!("unexpected view {:?}", other),
    }

    let nav = nav.apply(ModalEvent::Back);
    assert_eq!(nav.level(), Some(ModalLevel::SpotList));
    let nav = nav.apply(ModalEvent::Back);
    assert_eq!(nav.level(), Some(ModalLevel::StreetList));
    let nav = nav.apply(ModalEvent::Back);
    assert_eq!(nav.level(), Some(ModalLevel::Group));
}

#[test]
fn test_expand_reenters_from_group() {
    let nav = ModalNavigator::new()
        .apply(ModalEvent::Open(grouped()))
        .apply(ModalEvent::Back)
        .apply(ModalEvent::Expand);

    match nav.view() {
        ModalView::StreetList { title, streets } => {
            assert_eq!(title, "2 streets");
            assert_eq!(streets.len(), 2);
        }
        other => panic!("unexpected view {:?}", other),
    }
}

#[test]
fn test_unknown_selection_keeps_current_view() {
    let nav = ModalNavigator::new()
        .apply(ModalEvent::Open(grouped()))
        .apply(ModalEvent::SelectStreet("Rua Z".to_string()));
    assert_eq!(nav.level(), Some(ModalLevel::StreetList));

    let nav = nav
        .apply(ModalEvent::SelectStreet("Rua A".to_string()))
        .apply(ModalEvent::SelectRecord("a2".to_string()));
    assert_eq!(nav.level(), Some(ModalLevel::SpotList));
}

#[test]
fn test_close_resets_navigation() {
    let nav = ModalNavigator::new()
        .apply(ModalEvent::Open(grouped()))
        .apply(ModalEvent::SelectStreet("Rua A".to_string()))
        .apply(ModalEvent::Close);

    assert!(!nav.is_open());
    assert_eq!(nav.level(), None);
    assert_eq!(nav, ModalNavigator::default());

    let nav = nav.apply(ModalEvent::Back);
    assert!(!nav.is_open());
}

#[test]
fn test_reopening_forgets_previous_path() {
    let nav = ModalNavigator::new()
        .apply(ModalEvent::Open(grouped()))
        .apply(ModalEvent::SelectStreet("Rua A".to_string()))
        .apply(ModalEvent::Open(single()))
        .apply(ModalEvent::Back);

    match nav.view() {
        ModalView::Group(group) => assert_eq!(group.title, "Rua C"),
        other => panic!("unexpected view {:?}", other),
    }
}

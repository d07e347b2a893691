//! Drill-down modal shared by the reservation and availability calendars.
//!
//! Each level may be entered directly from the calendar, so the place to
//! return to is recorded per level when it is entered instead of being
//! popped from a stack.

use std::collections::HashMap;
use crate::domain::services::calendar::{CalendarGroup, CalendarRecord, StreetGroup};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModalLevel {
    Group,
    StreetList,
    SpotList,
    SingleRecord,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModalView<R> {
    Closed,
    Group(CalendarGroup<R>),
    StreetList { title: String, streets: Vec<StreetGroup<R>> },
    SpotList(StreetGroup<R>),
    SingleRecord(R),
}

impl<R> ModalView<R> {
    pub fn level(&self) -> Option<ModalLevel> {
        match self {
            ModalView::Closed => None,
            ModalView::Group(_) => Some(ModalLevel::Group),
            ModalView::StreetList { .. } => Some(ModalLevel::StreetList),
            ModalView::SpotList(_) => Some(ModalLevel::SpotList),
            ModalView::SingleRecord(_) => Some(ModalLevel::SingleRecord),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModalEvent<R> {
    /// Calendar event clicked.
    Open(CalendarGroup<R>),
    /// Re-enter the group shown on the `Group` level.
    Expand,
    SelectStreet(String),
    SelectRecord(String),
    Back,
    Close,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModalNavigator<R> {
    view: ModalView<R>,
    back_to: HashMap<ModalLevel, ModalView<R>>,
}

impl<R> Default for ModalNavigator<R> {
    fn default() -> Self {
        Self {
            view: ModalView::Closed,
            back_to: HashMap::new(),
        }
    }
}

impl<R: CalendarRecord + Clone> ModalNavigator<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> &ModalView<R> {
        &self.view
    }

    pub fn level(&self) -> Option<ModalLevel> {
        self.view.level()
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.view, ModalView::Closed)
    }

    pub fn apply(self, event: ModalEvent<R>) -> Self {
        reduce(self, event)
    }

    fn enter(&mut self, next: ModalView<R>) {
        if let Some(level) = next.level() {
            let previous = std::mem::replace(&mut self.view, ModalView::Closed);
            self.back_to.insert(level, previous);
        }
        self.view = next;
    }

    // Grouped events list streets first; a single-street event goes straight
    // to its spots.
    fn expand(&mut self, group: CalendarGroup<R>) {
        if group.is_grouped {
            let title = group.title.clone();
            let streets = group.streets.clone();
            self.view = ModalView::Group(group);
            self.enter(ModalView::StreetList { title, streets });
        } else if let Some(street) = group.streets.first().cloned() {
            self.view = ModalView::Group(group);
            self.enter(ModalView::SpotList(street));
        } else {
            self.view = ModalView::Group(group);
        }
    }
}

pub fn reduce<R: CalendarRecord + Clone>(nav: ModalNavigator<R>, event: ModalEvent<R>) -> ModalNavigator<R> {
    let mut nav = nav;
    match event {
        ModalEvent::Open(group) => {
            nav.back_to.clear();
            nav.expand(group);
        }
        ModalEvent::Expand => {
            if let ModalView::Group(group) = &nav.view {
                let group = group.clone();
                nav.expand(group);
            }
        }
        ModalEvent::SelectStreet(street) => {
            let next = match &nav.view {
                ModalView::StreetList { streets, .. } => {
                    streets.iter().find(|s| s.street == street).cloned()
                }
                _ => None,
            };
            if let Some(street_group) = next {
                nav.enter(ModalView::SpotList(street_group));
            }
        }
        ModalEvent::SelectRecord(record_id) => {
            let next = match &nav.view {
                ModalView::SpotList(street_group) => street_group.find_record(&record_id).cloned(),
                _ => None,
            };
            if let Some(record) = next {
                nav.enter(ModalView::SingleRecord(record));
            }
        }
        ModalEvent::Back => {
            let previous = nav.view.level().and_then(|level| nav.back_to.remove(&level));
            if let Some(previous) = previous {
                nav.view = previous;
            }
        }
        ModalEvent::Close => {
            nav = ModalNavigator::default();
        }
    }
    nav
}

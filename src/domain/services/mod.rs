pub mod time_grid;
pub mod occupancy;
pub mod planner;
pub mod wizard;
pub mod calendar;
pub mod modal;

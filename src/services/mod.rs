pub mod activities;
pub mod calendar;
pub mod store;
pub mod trips;

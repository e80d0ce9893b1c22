//! Core library for gridcal, a month-grid calendar.
//!
//! - `event`: events, drafts and the all-day/timed split
//! - `store`: the event store, mirrored to a `kv::KeyValueStore`
//! - `month_grid`, `day_sort`, `view`: what a month looks like on screen
//! - `overflow`: "+N more" collapsing for height-constrained day cells
//! - `form`, `modal`: the event form and modal lifecycle controllers

pub mod config;
pub mod day_sort;
pub mod error;
pub mod event;
pub mod form;
pub mod kv;
pub mod modal;
pub mod month_grid;
pub mod overflow;
pub mod store;
pub mod view;

pub use error::{CalResult, CalendarError};
pub use event::{ClockTime, Event, EventColor, EventDraft, EventTiming};
pub use store::EventStore;

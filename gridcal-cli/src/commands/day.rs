use anyhow::Result;
use chrono::NaiveDate;
use gridcal_core::EventStore;
use gridcal_core::kv::FileStore;
use gridcal_core::view::short_date;
use owo_colors::OwoColorize;

use crate::render::Render;

/// Every event on `date`, including the ones the grid collapses.
pub fn run(store: &EventStore<FileStore>, date: NaiveDate) -> Result<()> {
    let events = store.events_on(date);

    println!("{}", short_date(date).bold());

    if events.is_empty() {
        println!("  {}", "No events".dimmed());
        return Ok(());
    }

    for event in &events {
        println!("  {}", event.render());
    }

    Ok(())
}

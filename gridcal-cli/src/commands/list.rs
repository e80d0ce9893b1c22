use anyhow::Result;
use chrono::NaiveDate;
use gridcal_core::EventStore;
use gridcal_core::kv::FileStore;
use owo_colors::OwoColorize;

use crate::render::Render;

pub fn run(store: &EventStore<FileStore>) -> Result<()> {
    let mut dates: Vec<NaiveDate> = store.list().iter().map(|e| e.date).collect();
    dates.sort();
    dates.dedup();

    if dates.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    for (i, date) in dates.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", date.format("%a %b %-d %Y").bold());

        for event in store.events_on(*date) {
            println!("  {}", event.render());
        }
    }

    Ok(())
}

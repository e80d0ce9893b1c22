use anyhow::{Result, anyhow};
use gridcal_core::form::EventForm;
use gridcal_core::kv::FileStore;
use gridcal_core::{EventColor, EventStore};
use owo_colors::OwoColorize;

use crate::render::Render;

/// Fields to change; `None` keeps the current value.
pub struct EventChanges {
    pub name: Option<String>,
    pub all_day: Option<bool>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub color: Option<EventColor>,
}

pub fn run(store: &mut EventStore<FileStore>, id: &str, changes: EventChanges) -> Result<()> {
    let event = store
        .get(id)
        .cloned()
        .ok_or_else(|| anyhow!("Event '{}' not found", id))?;

    let mut form = EventForm::edit(event);
    if let Some(name) = changes.name {
        form.name = name;
    }
    if let Some(all_day) = changes.all_day {
        form.all_day = all_day;
    }
    if let Some(start) = changes.start {
        form.start_time = start;
    }
    if let Some(end) = changes.end {
        form.end_time = end;
    }
    if let Some(color) = changes.color {
        form.color = color;
    }

    let action = form.submit()?;
    let event = action
        .apply(store)?
        .ok_or_else(|| anyhow!("Event '{}' not found", id))?;

    println!("{} {}", "Updated".yellow(), event.render());
    Ok(())
}

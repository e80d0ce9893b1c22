use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use gridcal_core::form::EventForm;
use gridcal_core::kv::FileStore;
use gridcal_core::{EventColor, EventStore};
use owo_colors::OwoColorize;

use crate::render::Render;

pub struct NewEvent {
    pub name: String,
    pub date: NaiveDate,
    pub all_day: bool,
    pub start: Option<String>,
    pub end: Option<String>,
    pub color: Option<EventColor>,
}

pub fn run(store: &mut EventStore<FileStore>, new: NewEvent) -> Result<()> {
    let mut form = EventForm::create(new.date);
    form.name = new.name;
    form.all_day = new.all_day;
    form.start_time = new.start.unwrap_or_default();
    form.end_time = new.end.unwrap_or_default();
    if let Some(color) = new.color {
        form.color = color;
    }

    let action = form.submit()?;
    let event = action
        .apply(store)?
        .ok_or_else(|| anyhow!("Event was not created"))?;

    println!("{} {}", "Created".green(), event.render());
    Ok(())
}

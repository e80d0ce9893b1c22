use anyhow::{Result, anyhow};
use gridcal_core::EventStore;
use gridcal_core::form::EventForm;
use gridcal_core::kv::FileStore;
use owo_colors::OwoColorize;

use crate::render::Render;

pub fn run(store: &mut EventStore<FileStore>, id: &str) -> Result<()> {
    let event = store
        .get(id)
        .cloned()
        .ok_or_else(|| anyhow!("Event '{}' not found", id))?;

    let mut form = EventForm::edit(event.clone());
    if let Some(action) = form.delete() {
        action.apply(store)?;
    }

    println!("{} {}", "Deleted".red(), event.render());
    Ok(())
}

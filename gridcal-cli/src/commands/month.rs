use anyhow::Result;
use chrono::Local;
use gridcal_core::EventStore;
use gridcal_core::config::GridcalConfig;
use gridcal_core::kv::FileStore;
use gridcal_core::view::{MonthCursor, MonthView};

use crate::render::{GridStyle, render_month};

pub fn run(store: &EventStore<FileStore>, config: &GridcalConfig, cursor: MonthCursor) -> Result<()> {
    let today = Local::now().date_naive();
    let view = MonthView::build(cursor, today, config.week_start, store.list());

    println!("{}", render_month(&view, &GridStyle::from_config(config)));
    Ok(())
}

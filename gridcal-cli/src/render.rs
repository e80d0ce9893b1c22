//! Terminal rendering for gridcal types.
//!
//! This module provides extension traits that add colored terminal rendering
//! to gridcal-core types using owo_colors, and the month grid itself.

use chrono::Datelike;
use gridcal_core::config::GridcalConfig;
use gridcal_core::event::{Event, EventColor, EventTiming};
use gridcal_core::overflow::{OverflowContainer, StackedLayout};
use gridcal_core::view::{DayCell, MonthView, time_range_label};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for EventColor {
    fn render(&self) -> String {
        paint(*self, self.as_str())
    }
}

impl Render for Event {
    fn render(&self) -> String {
        format!(
            "{} {:<11} {} {}",
            paint(self.color, "●"),
            time_range_label(self),
            self.name,
            self.id.dimmed()
        )
    }
}

fn paint(color: EventColor, text: &str) -> String {
    match color {
        EventColor::Red => text.red().to_string(),
        EventColor::Green => text.green().to_string(),
        EventColor::Blue => text.blue().to_string(),
    }
}

/// Truncate or pad `text` to exactly `width` characters.
fn fit_width(text: &str, width: usize) -> String {
    let truncated: String = text.chars().take(width).collect();
    format!("{:<width$}", truncated)
}

/// Cell dimensions for the month grid.
pub struct GridStyle {
    pub cell_width: usize,
    pub cell_lines: usize,
}

impl GridStyle {
    pub fn from_config(config: &GridcalConfig) -> Self {
        GridStyle {
            cell_width: (config.cell_width as usize).max(6),
            cell_lines: (config.cell_lines as usize).max(1),
        }
    }
}

pub fn render_month(view: &MonthView, style: &GridStyle) -> String {
    let width = style.cell_width;
    let row_width = width * 7 + 6;
    let mut lines = Vec::new();

    lines.push(format!("{:^row_width$}", view.title).bold().to_string());

    for (row, week) in view.weeks().enumerate() {
        if row == 0 {
            let names: Vec<String> = week
                .iter()
                .map(|cell| {
                    let name = cell.weekday.map(|d| d.to_string()).unwrap_or_default();
                    fit_width(&name, width).dimmed().to_string()
                })
                .collect();
            lines.push(names.join(" "));
        }

        lines.push("─".repeat(row_width).dimmed().to_string());

        let numbers: Vec<String> = week.iter().map(|cell| day_number(cell, width)).collect();
        lines.push(numbers.join(" "));

        let bodies: Vec<Vec<String>> = week.iter().map(|cell| cell_body(cell, style)).collect();
        for line in 0..style.cell_lines {
            let row: Vec<&str> = bodies.iter().map(|body| body[line].as_str()).collect();
            lines.push(row.join(" "));
        }
    }

    lines.join("\n")
}

fn day_number(cell: &DayCell, width: usize) -> String {
    let number = fit_width(&cell.date.day().to_string(), width);

    if cell.is_today {
        number.bold().reversed().to_string()
    } else if !cell.in_month || cell.is_past {
        number.dimmed().to_string()
    } else {
        number
    }
}

/// The event lines of a cell, collapsed to fit `cell_lines` with a
/// "+N more" line when needed. Always exactly `cell_lines` entries.
fn cell_body(cell: &DayCell, style: &GridStyle) -> Vec<String> {
    let width = style.cell_width;

    let mut layout = StackedLayout::new(vec![1; cell.events.len()], style.cell_lines as u32)
        .with_indicator_height(1);
    let mut container = OverflowContainer::new();
    let overflow = container.remeasure(&mut layout);

    let mut lines: Vec<String> = layout
        .visible_indices()
        .into_iter()
        .map(|i| event_line(&cell.events[i], width))
        .collect();

    if overflow > 0 {
        lines.push(fit_width(&format!("+{} more", overflow), width).dimmed().to_string());
    }

    lines.resize(style.cell_lines, " ".repeat(width));
    lines
}

fn event_line(event: &Event, width: usize) -> String {
    match event.timing {
        EventTiming::AllDay => paint(event.color, &fit_width(&event.name, width)).reversed().to_string(),
        EventTiming::Timed { start, .. } => {
            let rest = fit_width(&format!("{} {}", start, event.name), width.saturating_sub(2));
            format!("{} {}", paint(event.color, "●"), rest)
        }
    }
}

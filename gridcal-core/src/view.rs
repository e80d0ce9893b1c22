//! Month view model: navigation and the per-day cells a host renders.

use std::collections::HashMap;

use chrono::{Datelike, Local, Months, NaiveDate, Weekday};

use crate::day_sort::sort_day_events;
use crate::event::{Event, EventTiming};
use crate::month_grid::{WeekStart, first_of_month, month_grid};

/// The month currently on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthCursor {
    month: NaiveDate,
}

impl MonthCursor {
    pub fn new(date: NaiveDate) -> Self {
        MonthCursor {
            month: first_of_month(date),
        }
    }

    pub fn today() -> Self {
        Self::new(Local::now().date_naive())
    }

    /// First day of the selected month.
    pub fn month(&self) -> NaiveDate {
        self.month
    }

    pub fn next(&mut self) {
        self.shift(1);
    }

    pub fn prev(&mut self) {
        self.shift(-1);
    }

    /// Move by `months` (negative goes back). Stays put at the ends of the
    /// representable range.
    pub fn shift(&mut self, months: i32) {
        let amount = Months::new(months.unsigned_abs());
        let shifted = if months >= 0 {
            self.month.checked_add_months(amount)
        } else {
            self.month.checked_sub_months(amount)
        };
        if let Some(month) = shifted {
            self.month = month;
        }
    }

    /// e.g. "June 2024"
    pub fn title(&self) -> String {
        self.month.format("%B %Y").to_string()
    }
}

/// One cell of the month grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub in_month: bool,
    pub is_past: bool,
    pub is_today: bool,
    /// Set on the first row only.
    pub weekday: Option<Weekday>,
    /// All-day first, then by start time.
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthView {
    pub title: String,
    pub cells: Vec<DayCell>,
}

impl MonthView {
    pub fn build(cursor: MonthCursor, today: NaiveDate, week_start: WeekStart, events: &[Event]) -> Self {
        let month = cursor.month();

        let mut by_day: HashMap<NaiveDate, Vec<Event>> = HashMap::new();
        for event in events {
            by_day.entry(event.date).or_default().push(event.clone());
        }

        let cells = month_grid(month, week_start)
            .into_iter()
            .enumerate()
            .map(|(index, date)| DayCell {
                date,
                in_month: first_of_month(date) == month,
                is_past: date < today,
                is_today: date == today,
                weekday: (index < 7).then(|| date.weekday()),
                events: by_day.get(&date).map(|day| sort_day_events(day)).unwrap_or_default(),
            })
            .collect();

        MonthView {
            title: cursor.title(),
            cells,
        }
    }

    pub fn weeks(&self) -> impl Iterator<Item = &[DayCell]> {
        self.cells.chunks(7)
    }

    pub fn cell(&self, date: NaiveDate) -> Option<&DayCell> {
        self.cells.iter().find(|c| c.date == date)
    }
}

/// "all-day" or the start time, as shown in front of an event name.
pub fn time_label(event: &Event) -> String {
    match event.timing {
        EventTiming::AllDay => "all-day".to_string(),
        EventTiming::Timed { start, .. } => start.to_string(),
    }
}

/// Full time range, e.g. "09:00-10:30".
pub fn time_range_label(event: &Event) -> String {
    match event.timing {
        EventTiming::AllDay => "all-day".to_string(),
        EventTiming::Timed { start, end } => format!("{}-{}", start, end),
    }
}

/// Short date used in modal titles, e.g. "6/1/24".
pub fn short_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{ClockTime, EventColor, EventDraft};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event(id: &str, on: NaiveDate, timing: EventTiming) -> Event {
        Event::from_draft(id, EventDraft::new(id, on, EventColor::Red, timing).unwrap())
    }

    fn at(start: &str, end: &str) -> EventTiming {
        let start: ClockTime = start.parse().unwrap();
        let end: ClockTime = end.parse().unwrap();
        EventTiming::timed(start, end).unwrap()
    }

    #[test]
    fn cursor_navigates_months() {
        let mut cursor = MonthCursor::new(date(2024, 1, 31));
        assert_eq!(cursor.month(), date(2024, 1, 1));
        assert_eq!(cursor.title(), "January 2024");

        cursor.next();
        assert_eq!(cursor.month(), date(2024, 2, 1));

        cursor.prev();
        cursor.prev();
        assert_eq!(cursor.month(), date(2023, 12, 1));

        cursor.shift(13);
        assert_eq!(cursor.month(), date(2025, 1, 1));
    }

    #[test]
    fn cells_carry_month_and_today_flags() {
        let today = date(2024, 6, 12);
        let view = MonthView::build(MonthCursor::new(today), today, WeekStart::Sunday, &[]);

        assert_eq!(view.title, "June 2024");
        assert_eq!(view.cells.len(), 42);

        let may = view.cell(date(2024, 5, 26)).unwrap();
        assert!(!may.in_month);
        assert!(may.is_past);
        assert_eq!(may.weekday, Some(Weekday::Sun));

        let cell = view.cell(today).unwrap();
        assert!(cell.in_month);
        assert!(cell.is_today);
        assert!(!cell.is_past);
        assert_eq!(cell.weekday, None);

        assert_eq!(view.weeks().count(), 6);
        assert!(view.weeks().all(|w| w[0].date.weekday() == Weekday::Sun));
    }

    #[test]
    fn events_are_bucketed_and_sorted_per_day() {
        let day = date(2024, 6, 1);
        let events = vec![
            event("lunch", day, at("12:00", "13:00")),
            event("elsewhere", date(2024, 6, 2), EventTiming::AllDay),
            event("trip", day, EventTiming::AllDay),
        ];

        let view = MonthView::build(MonthCursor::new(day), day, WeekStart::Sunday, &events);
        let ids: Vec<&str> = view.cell(day).unwrap().events.iter().map(|e| e.id.as_str()).collect();

        assert_eq!(ids, ["trip", "lunch"]);
        assert_eq!(view.cell(date(2024, 6, 3)).unwrap().events.len(), 0);
    }

    #[test]
    fn labels() {
        let day = date(2024, 6, 1);
        assert_eq!(time_label(&event("a", day, EventTiming::AllDay)), "all-day");
        assert_eq!(time_label(&event("b", day, at("09:05", "10:00"))), "09:05");
        assert_eq!(time_range_label(&event("c", day, at("09:05", "10:00"))), "09:05-10:00");
        assert_eq!(short_date(day), "6/1/24");
    }
}

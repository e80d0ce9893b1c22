//! Ordering of the events that share a calendar day.

use std::cmp::Ordering;

use crate::event::{Event, EventTiming};

/// All-day events first, then timed events by start time. Ties keep their
/// input order. Returns a new vector; the input is left as is.
pub fn sort_day_events(events: &[Event]) -> Vec<Event> {
    let mut sorted = events.to_vec();
    sorted.sort_by(|a, b| compare_timing(&a.timing, &b.timing));
    sorted
}

fn compare_timing(a: &EventTiming, b: &EventTiming) -> Ordering {
    match (a, b) {
        (EventTiming::AllDay, EventTiming::AllDay) => Ordering::Equal,
        (EventTiming::AllDay, EventTiming::Timed { .. }) => Ordering::Less,
        (EventTiming::Timed { .. }, EventTiming::AllDay) => Ordering::Greater,
        (EventTiming::Timed { start: a, .. }, EventTiming::Timed { start: b, .. }) => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{ClockTime, EventColor, EventDraft};
    use chrono::NaiveDate;

    fn event(id: &str, timing: EventTiming) -> Event {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let draft = EventDraft::new(id, date, EventColor::Red, timing).unwrap();
        Event::from_draft(id, draft)
    }

    fn timed(start: &str, end: &str) -> EventTiming {
        let start: ClockTime = start.parse().unwrap();
        let end: ClockTime = end.parse().unwrap();
        EventTiming::timed(start, end).unwrap()
    }

    fn ids(events: &[Event]) -> Vec<&str> {
        events.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn all_day_events_come_first() {
        let events = vec![
            event("late", timed("18:00", "19:00")),
            event("trip", EventTiming::AllDay),
            event("early", timed("08:00", "09:00")),
            event("holiday", EventTiming::AllDay),
        ];

        let sorted = sort_day_events(&events);
        assert_eq!(ids(&sorted), ["trip", "holiday", "early", "late"]);
    }

    #[test]
    fn timed_events_sort_by_minute_of_day() {
        let events = vec![
            event("930", timed("09:30", "10:00")),
            event("905", timed("09:05", "10:00")),
            event("1000", timed("10:00", "10:30")),
            event("959", timed("09:59", "10:30")),
        ];

        let sorted = sort_day_events(&events);
        assert_eq!(ids(&sorted), ["905", "930", "959", "1000"]);
    }

    #[test]
    fn equal_start_times_keep_input_order() {
        let events = vec![
            event("b", timed("09:00", "11:00")),
            event("a", timed("09:00", "10:00")),
            event("c", timed("09:00", "09:30")),
        ];

        let sorted = sort_day_events(&events);
        assert_eq!(ids(&sorted), ["b", "a", "c"]);
    }

    #[test]
    fn input_is_not_modified() {
        let events = vec![
            event("late", timed("18:00", "19:00")),
            event("trip", EventTiming::AllDay),
        ];
        let before = events.clone();

        let _ = sort_day_events(&events);
        assert_eq!(events, before);
    }

    #[test]
    fn empty_day_sorts_to_empty() {
        assert!(sort_day_events(&[]).is_empty());
    }
}

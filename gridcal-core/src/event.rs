//! Calendar event types.
//!
//! An event is either all-day or timed, and the two shapes are kept apart by
//! `EventTiming` rather than by optional fields. The flat `allday`/`startTime`/
//! `endTime` layout only exists in the stored JSON form.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{CalResult, CalendarError};

/// Fixed event colour palette. The first entry is the default for new events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventColor {
    Red,
    Green,
    Blue,
}

impl EventColor {
    pub const ALL: [EventColor; 3] = [EventColor::Red, EventColor::Green, EventColor::Blue];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventColor::Red => "red",
            EventColor::Green => "green",
            EventColor::Blue => "blue",
        }
    }
}

impl Default for EventColor {
    fn default() -> Self {
        EventColor::ALL[0]
    }
}

impl fmt::Display for EventColor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventColor {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventColor::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                CalendarError::InvalidEvent(format!(
                    "Unknown color '{}'. Expected one of: red, green, blue",
                    s
                ))
            })
    }
}

/// A wall-clock time of day ("HH:MM"), ordered by minute of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime {
    minutes: u16,
}

impl ClockTime {
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(ClockTime {
            minutes: (hour * 60 + minute) as u16,
        })
    }

    pub fn hour(&self) -> u32 {
        u32::from(self.minutes / 60)
    }

    pub fn minute(&self) -> u32 {
        u32::from(self.minutes % 60)
    }

    pub fn minute_of_day(&self) -> u32 {
        u32::from(self.minutes)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for ClockTime {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CalendarError::InvalidEvent(format!("Invalid time '{}'. Expected HH:MM", s));

        let (hour, minute) = s.trim().split_once(':').ok_or_else(invalid)?;
        if hour.is_empty() || hour.len() > 2 || minute.len() != 2 {
            return Err(invalid());
        }
        let hour: u32 = hour.parse().map_err(|_| invalid())?;
        let minute: u32 = minute.parse().map_err(|_| invalid())?;

        ClockTime::new(hour, minute).ok_or_else(invalid)
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Whether an event spans the whole day or runs between two times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventTiming {
    AllDay,
    Timed { start: ClockTime, end: ClockTime },
}

impl EventTiming {
    /// Build a timed variant. The end may equal the start but not precede it.
    pub fn timed(start: ClockTime, end: ClockTime) -> CalResult<Self> {
        if end < start {
            return Err(CalendarError::InvalidEvent(format!(
                "End time {} is before start time {}",
                end, start
            )));
        }
        Ok(EventTiming::Timed { start, end })
    }

    pub fn is_all_day(&self) -> bool {
        matches!(self, EventTiming::AllDay)
    }

    pub fn start(&self) -> Option<ClockTime> {
        match self {
            EventTiming::AllDay => None,
            EventTiming::Timed { start, .. } => Some(*start),
        }
    }
}

/// Event content without an identity: what gets submitted for creation, or as
/// the replacement content of an edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    pub name: String,
    pub date: NaiveDate,
    pub color: EventColor,
    pub timing: EventTiming,
}

impl EventDraft {
    pub fn new(
        name: impl Into<String>,
        date: NaiveDate,
        color: EventColor,
        timing: EventTiming,
    ) -> CalResult<Self> {
        let draft = EventDraft {
            name: name.into(),
            date,
            color,
            timing,
        };
        draft.validate()?;
        Ok(draft)
    }

    /// Check the invariants `new` enforces. The fields are public, so the
    /// event store re-checks every draft it is handed.
    pub fn validate(&self) -> CalResult<()> {
        if self.name.trim().is_empty() {
            return Err(CalendarError::InvalidEvent("Event name is empty".into()));
        }
        if let EventTiming::Timed { start, end } = self.timing {
            EventTiming::timed(start, end)?;
        }
        Ok(())
    }
}

/// A stored calendar event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredEvent", into = "StoredEvent")]
pub struct Event {
    pub id: String,
    pub name: String,
    pub date: NaiveDate,
    pub color: EventColor,
    pub timing: EventTiming,
}

impl Event {
    pub fn from_draft(id: impl Into<String>, draft: EventDraft) -> Self {
        Event {
            id: id.into(),
            name: draft.name,
            date: draft.date,
            color: draft.color,
            timing: draft.timing,
        }
    }

    /// The event's content, without its id.
    pub fn draft(&self) -> EventDraft {
        EventDraft {
            name: self.name.clone(),
            date: self.date,
            color: self.color,
            timing: self.timing,
        }
    }

    pub fn is_on(&self, date: NaiveDate) -> bool {
        self.date == date
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

// =============================================================================
// Stored form
// =============================================================================

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredEvent {
    id: String,
    name: String,
    #[serde(with = "stored_date")]
    date: NaiveDate,
    color: EventColor,
    allday: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    start_time: Option<ClockTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    end_time: Option<ClockTime>,
}

impl TryFrom<StoredEvent> for Event {
    type Error = CalendarError;

    fn try_from(stored: StoredEvent) -> Result<Self, Self::Error> {
        let timing = match (stored.allday, stored.start_time, stored.end_time) {
            (true, None, None) => EventTiming::AllDay,
            (false, Some(start), Some(end)) => EventTiming::timed(start, end)?,
            _ => {
                return Err(CalendarError::InvalidEvent(format!(
                    "Event '{}' has inconsistent allday/time fields",
                    stored.id
                )));
            }
        };

        let draft = EventDraft::new(stored.name, stored.date, stored.color, timing)?;
        Ok(Event::from_draft(stored.id, draft))
    }
}

impl From<Event> for StoredEvent {
    fn from(event: Event) -> Self {
        let (allday, start_time, end_time) = match event.timing {
            EventTiming::AllDay => (true, None, None),
            EventTiming::Timed { start, end } => (false, Some(start), Some(end)),
        };

        StoredEvent {
            id: event.id,
            name: event.name,
            date: event.date,
            color: event.color,
            allday,
            start_time,
            end_time,
        }
    }
}

/// Dates are written as `YYYY-MM-DD`. RFC 3339 timestamps are also accepted on
/// read and mapped to the local calendar day.
mod stored_date {
    use chrono::{DateTime, Local, NaiveDate};
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let s = String::deserialize(deserializer)?;

        if let Ok(date) = NaiveDate::parse_from_str(&s, FORMAT) {
            return Ok(date);
        }

        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Local).date_naive())
            .map_err(|_| serde::de::Error::custom(format!("invalid date '{}'", s)))
    }
}

//! Event form controller.
//!
//! A form either creates an event on a given day or edits an existing event;
//! the two modes never mix. Field values are kept as the user typed them and
//! only turned into an `EventDraft` on submit.

use chrono::NaiveDate;
use thiserror::Error;
use tracing::debug;

use crate::error::CalResult;
use crate::event::{ClockTime, Event, EventColor, EventDraft, EventTiming};
use crate::kv::KeyValueStore;
use crate::modal::ModalLifecycle;
use crate::store::EventStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create { date: NaiveDate },
    Edit { event: Event },
}

/// Why a submission was blocked.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormRejection {
    #[error("Form is not open")]
    NotOpen,

    #[error("Name is required")]
    MissingName,

    #[error("Start and end time are required unless the event is all-day")]
    MissingTime,

    #[error("Invalid time '{0}'. Expected HH:MM")]
    InvalidTime(String),

    #[error("End time must not be before start time")]
    EndBeforeStart,
}

/// What an accepted form asks the event store to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    Create(EventDraft),
    Update { id: String, draft: EventDraft },
    Delete { id: String },
}

impl FormAction {
    /// Perform the action. Returns the created or updated event.
    pub fn apply<K: KeyValueStore>(self, store: &mut EventStore<K>) -> CalResult<Option<Event>> {
        match self {
            FormAction::Create(draft) => store.add(draft).map(Some),
            FormAction::Update { id, draft } => {
                store.edit(&id, draft)?;
                Ok(store.get(&id).cloned())
            }
            FormAction::Delete { id } => store.delete(&id).map(|_| None),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EventForm {
    mode: FormMode,
    modal: ModalLifecycle,
    pub name: String,
    pub all_day: bool,
    pub start_time: String,
    pub end_time: String,
    pub color: EventColor,
}

impl EventForm {
    /// An empty, open form for a new event on `date`.
    pub fn create(date: NaiveDate) -> Self {
        EventForm {
            mode: FormMode::Create { date },
            modal: ModalLifecycle::opened(),
            name: String::new(),
            all_day: false,
            start_time: String::new(),
            end_time: String::new(),
            color: EventColor::default(),
        }
    }

    /// An open form pre-filled from `event`.
    pub fn edit(event: Event) -> Self {
        let (all_day, start_time, end_time) = match event.timing {
            EventTiming::AllDay => (true, String::new(), String::new()),
            EventTiming::Timed { start, end } => (false, start.to_string(), end.to_string()),
        };

        EventForm {
            name: event.name.clone(),
            all_day,
            start_time,
            end_time,
            color: event.color,
            modal: ModalLifecycle::opened(),
            mode: FormMode::Edit { event },
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn modal(&self) -> &ModalLifecycle {
        &self.modal
    }

    pub fn modal_mut(&mut self) -> &mut ModalLifecycle {
        &mut self.modal
    }

    pub fn date(&self) -> NaiveDate {
        match &self.mode {
            FormMode::Create { date } => *date,
            FormMode::Edit { event } => event.date,
        }
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Create { .. } => "Add Event",
            FormMode::Edit { .. } => "Edit Event",
        }
    }

    pub fn can_delete(&self) -> bool {
        matches!(self.mode, FormMode::Edit { .. })
    }

    /// Lower bound for the end-time input: the current start time, if any.
    pub fn min_end_time(&self) -> Option<ClockTime> {
        if self.all_day {
            return None;
        }
        self.start_time.parse().ok()
    }

    pub fn cancel(&mut self) {
        self.modal.request_close();
    }

    /// Validate the fields. On success the form closes and the returned
    /// action carries the draft; on rejection nothing changes.
    pub fn submit(&mut self) -> Result<FormAction, FormRejection> {
        if !self.modal.is_open() {
            return Err(FormRejection::NotOpen);
        }

        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormRejection::MissingName);
        }

        let timing = self.timing()?;
        let draft = EventDraft::new(name, self.date(), self.color, timing)
            .map_err(|_| FormRejection::MissingName)?;

        let action = match &self.mode {
            FormMode::Create { .. } => FormAction::Create(draft),
            FormMode::Edit { event } => FormAction::Update {
                id: event.id.clone(),
                draft,
            },
        };

        debug!(title = self.title(), "form submitted");
        self.modal.request_close();
        Ok(action)
    }

    /// Delete the edited event and close. `None` in create mode.
    pub fn delete(&mut self) -> Option<FormAction> {
        let FormMode::Edit { event } = &self.mode else {
            return None;
        };
        let id = event.id.clone();

        self.modal.request_close();
        Some(FormAction::Delete { id })
    }

    fn timing(&self) -> Result<EventTiming, FormRejection> {
        if self.all_day {
            return Ok(EventTiming::AllDay);
        }

        let start = self.start_time.trim();
        let end = self.end_time.trim();
        if start.is_empty() || end.is_empty() {
            return Err(FormRejection::MissingTime);
        }

        let start: ClockTime = start
            .parse()
            .map_err(|_| FormRejection::InvalidTime(start.to_string()))?;
        let end: ClockTime = end
            .parse()
            .map_err(|_| FormRejection::InvalidTime(end.to_string()))?;

        EventTiming::timed(start, end).map_err(|_| FormRejection::EndBeforeStart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;
    use crate::modal::ModalState;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn timed_form(start: &str, end: &str) -> EventForm {
        let mut form = EventForm::create(date(2024, 6, 1));
        form.name = "Standup".into();
        form.start_time = start.into();
        form.end_time = end.into();
        form
    }

    #[test]
    fn empty_name_is_rejected_and_form_stays_open() {
        let mut form = EventForm::create(date(2024, 6, 1));
        form.all_day = true;
        form.name = "   ".into();

        assert_eq!(form.submit(), Err(FormRejection::MissingName));
        assert!(form.modal().is_open());
    }

    #[test]
    fn all_day_ignores_empty_times() {
        let mut form = EventForm::create(date(2024, 6, 1));
        form.name = "Trip".into();
        form.all_day = true;
        form.color = EventColor::Blue;

        let action = form.submit().unwrap();
        let FormAction::Create(draft) = action else {
            panic!("expected a create action");
        };
        assert_eq!(draft.name, "Trip");
        assert_eq!(draft.timing, EventTiming::AllDay);
        assert_eq!(draft.color, EventColor::Blue);
        assert_eq!(form.modal().state(), ModalState::Closing);
    }

    #[test]
    fn timed_requires_both_times() {
        assert_eq!(timed_form("", "10:00").submit(), Err(FormRejection::MissingTime));
        assert_eq!(timed_form("09:00", "").submit(), Err(FormRejection::MissingTime));
        assert_eq!(timed_form("", "").submit(), Err(FormRejection::MissingTime));
    }

    #[test]
    fn timed_rejects_bad_times() {
        assert_eq!(
            timed_form("9am", "10:00").submit(),
            Err(FormRejection::InvalidTime("9am".into()))
        );
        assert_eq!(timed_form("10:00", "09:00").submit(), Err(FormRejection::EndBeforeStart));
    }

    #[test]
    fn timed_submission_builds_timed_draft() {
        let mut form = timed_form("09:00", "09:15");
        let FormAction::Create(draft) = form.submit().unwrap() else {
            panic!("expected a create action");
        };

        assert_eq!(draft.timing.start(), "09:00".parse().ok());
        assert_eq!(draft.date, date(2024, 6, 1));
        assert_eq!(draft.color, EventColor::Red);
    }

    #[test]
    fn closed_form_cannot_submit_twice() {
        let mut form = timed_form("09:00", "09:15");
        assert!(form.submit().is_ok());
        assert_eq!(form.submit(), Err(FormRejection::NotOpen));
    }

    #[test]
    fn edit_prefills_and_updates_in_place() {
        let mut store = EventStore::open(MemoryStore::new()).unwrap();
        let mut create = timed_form("09:00", "09:15");
        create.color = EventColor::Green;
        create.submit().unwrap().apply(&mut store).unwrap();
        let event = store.list()[0].clone();

        let mut form = EventForm::edit(event.clone());
        assert_eq!(form.title(), "Edit Event");
        assert_eq!(form.name, "Standup");
        assert_eq!(form.start_time, "09:00");
        assert_eq!(form.end_time, "09:15");
        assert_eq!(form.color, EventColor::Green);
        assert_eq!(form.date(), date(2024, 6, 1));

        form.name = "Retro".into();
        form.all_day = true;
        form.submit().unwrap().apply(&mut store).unwrap();

        let edited = store.get(&event.id).unwrap();
        assert_eq!(edited.name, "Retro");
        assert_eq!(edited.timing, EventTiming::AllDay);
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn delete_only_in_edit_mode() {
        let mut store = EventStore::open(MemoryStore::new()).unwrap();
        let mut create = EventForm::create(date(2024, 6, 1));
        assert!(!create.can_delete());
        assert_eq!(create.delete(), None);

        create.name = "Trip".into();
        create.all_day = true;
        create.submit().unwrap().apply(&mut store).unwrap();
        let event = store.list()[0].clone();

        let mut form = EventForm::edit(event);
        assert!(form.can_delete());
        form.delete().unwrap().apply(&mut store).unwrap();
        assert!(store.list().is_empty());
        assert!(!form.modal().is_open());
    }

    #[test]
    fn cancel_closes_without_an_action() {
        let mut form = timed_form("09:00", "10:00");
        form.cancel();
        assert_eq!(form.modal().state(), ModalState::Closing);

        form.modal_mut().animation_finished();
        assert!(!form.modal().is_rendered());
        assert_eq!(form.submit(), Err(FormRejection::NotOpen));
    }

    #[test]
    fn min_end_time_follows_start() {
        let mut form = timed_form("09:30", "");
        assert_eq!(form.min_end_time(), "09:30".parse().ok());

        form.all_day = true;
        assert_eq!(form.min_end_time(), None);
    }
}

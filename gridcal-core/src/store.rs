//! The event store: the canonical event collection, mirrored to a key-value
//! store after every mutation.

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::day_sort::sort_day_events;
use crate::error::{CalResult, CalendarError};
use crate::event::{Event, EventDraft};
use crate::kv::KeyValueStore;

/// Key the collection is stored under.
pub const EVENTS_KEY: &str = "CalenderEvents";

/// Copy of the stored text, written when some of it could not be loaded.
pub const EVENTS_BACKUP_KEY: &str = "CalenderEvents.bak";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&[Event])>;

pub struct EventStore<K: KeyValueStore> {
    kv: K,
    events: Vec<Event>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl<K: KeyValueStore> EventStore<K> {
    /// Load the collection from `kv`. A missing entry gives an empty store.
    /// Records that can't be read are logged and skipped; if anything was
    /// skipped, the stored text is first copied to `EVENTS_BACKUP_KEY` so the
    /// next mutation doesn't destroy it.
    pub fn open(mut kv: K) -> CalResult<Self> {
        let events = match kv.get(EVENTS_KEY)? {
            None => Vec::new(),
            Some(json) => {
                let (events, complete) = parse_events(&json);
                if !complete {
                    if let Err(e) = kv.set(EVENTS_BACKUP_KEY, &json) {
                        warn!(key = EVENTS_BACKUP_KEY, error = %e, "could not back up stored events");
                    }
                }
                events
            }
        };

        debug!(count = events.len(), "loaded events");

        Ok(EventStore {
            kv,
            events,
            listeners: Vec::new(),
            next_subscription: 0,
        })
    }

    pub fn list(&self) -> &[Event] {
        &self.events
    }

    pub fn get(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    /// The events on `date`, all-day first and then by start time.
    pub fn events_on(&self, date: NaiveDate) -> Vec<Event> {
        let day: Vec<Event> = self.events.iter().filter(|e| e.is_on(date)).cloned().collect();
        sort_day_events(&day)
    }

    pub fn add(&mut self, draft: EventDraft) -> CalResult<Event> {
        draft.validate()?;
        let id = self.fresh_id();
        let event = Event::from_draft(id, draft);

        let mut events = self.events.clone();
        events.push(event.clone());
        self.commit(events)?;

        debug!(id = %event.id, "added event");
        Ok(event)
    }

    /// Replace the content of event `id`, keeping its id.
    pub fn edit(&mut self, id: &str, draft: EventDraft) -> CalResult<()> {
        draft.validate()?;
        let index = self.position(id)?;

        let mut events = self.events.clone();
        events[index] = Event::from_draft(id, draft);
        self.commit(events)?;

        debug!(id, "edited event");
        Ok(())
    }

    pub fn delete(&mut self, id: &str) -> CalResult<()> {
        self.position(id)?;

        let events = self.events.iter().filter(|e| e.id != id).cloned().collect();
        self.commit(events)?;

        debug!(id, "deleted event");
        Ok(())
    }

    /// Register a callback that receives the full collection after every
    /// committed mutation.
    pub fn subscribe(&mut self, listener: impl FnMut(&[Event]) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if `id` wasn't subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    pub fn into_inner(self) -> K {
        self.kv
    }

    fn position(&self, id: &str) -> CalResult<usize> {
        self.events
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| CalendarError::EventNotFound(id.to_string()))
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = uuid::Uuid::new_v4().to_string();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    /// Persist `events`, then make them current and notify listeners.
    fn commit(&mut self, events: Vec<Event>) -> CalResult<()> {
        let json =
            serde_json::to_string(&events).map_err(|e| CalendarError::Serialization(e.to_string()))?;
        self.kv.set(EVENTS_KEY, &json)?;

        self.events = events;
        for (_, listener) in &mut self.listeners {
            listener(&self.events);
        }
        Ok(())
    }
}

/// Parse the stored array record by record. The flag is false if the text or
/// any record in it was unreadable.
fn parse_events(json: &str) -> (Vec<Event>, bool) {
    let records = match serde_json::from_str::<Vec<serde_json::Value>>(json) {
        Ok(records) => records,
        Err(e) => {
            warn!(key = EVENTS_KEY, error = %e, "discarding unreadable stored events");
            return (Vec::new(), false);
        }
    };

    let total = records.len();
    let events: Vec<Event> = records
        .into_iter()
        .filter_map(|record| match serde_json::from_value::<Event>(record) {
            Ok(event) => Some(event),
            Err(e) => {
                warn!(error = %e, "skipping invalid stored event");
                None
            }
        })
        .collect();

    let complete = events.len() == total;
    (events, complete)
}

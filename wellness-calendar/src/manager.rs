use std::fmt;
use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use log::debug;

use crate::recipe::{sample_recipes, Recipe};
use crate::structs::{CalendarEvent, EventId, EventKind};

/// Length of every event created through [`CalendarManager::schedule_meal`].
pub const MEAL_DURATION_MINUTES: i64 = 30;

// (title, kind, hour, minute, duration in minutes)
const SEED_EVENTS: &[(&str, EventKind, u32, u32, i64)] = &[
    ("Morning run", EventKind::Workout, 7, 0, 45),
    ("Deep work", EventKind::Work, 9, 30, 150),
    ("Journal", EventKind::FreeWrite, 13, 0, 20),
    ("Pick up groceries", EventKind::Todo, 17, 30, 30),
    ("Wind down & sleep", EventKind::Sleep, 22, 30, 90),
];

/// Immutable view of the event list published after every mutation.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub revision: u64,
    pub events: Arc<Vec<CalendarEvent>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&Snapshot) + Send + Sync>;

/// Session-scoped store of calendar events, kept in insertion order.
pub struct CalendarManager {
    events: Arc<Vec<CalendarEvent>>,
    revision: u64,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl Default for CalendarManager {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CalendarManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalendarManager")
            .field("events", &self.events.len())
            .field("revision", &self.revision)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl CalendarManager {
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: Arc::new(Vec::new()),
            revision: 0,
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// A store pre-filled with a typical day on `today`, including one meal
    /// linked to the sample recipe catalog.
    #[must_use]
    pub fn seeded(today: NaiveDate) -> Self {
        let mut manager = Self::new();

        for &(title, kind, hour, minute, minutes) in SEED_EVENTS {
            let Some(start) = today.and_hms_opt(hour, minute, 0) else {
                continue;
            };
            let end = start + Duration::minutes(minutes);
            manager.add_event(CalendarEvent::new(title, kind, start, end));
        }

        if let (Some(recipe), Some(start)) = (sample_recipes().first(), today.and_hms_opt(8, 0, 0))
        {
            manager.schedule_meal(recipe, start);
        }

        manager
    }

    /// Appends `event` without any ordering or uniqueness check.
    pub fn add_event(&mut self, event: CalendarEvent) -> EventId {
        let id = event.id();
        debug!(
            "Adding {} event {id} '{}' on {}",
            event.kind, event.title, event.date
        );

        Arc::make_mut(&mut self.events).push(event);
        self.revision += 1;
        self.publish();

        id
    }

    /// Adds a 30 minute meal starting at `start`, linked to `recipe`.
    pub fn schedule_meal(&mut self, recipe: &Recipe, start: NaiveDateTime) -> EventId {
        let end = start + Duration::minutes(MEAL_DURATION_MINUTES);
        let event = CalendarEvent::new(recipe.title.clone(), EventKind::Meal, start, end)
            .with_recipe(recipe.id.clone());

        self.add_event(event)
    }

    #[must_use]
    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    /// Events bucketed under `date`, in insertion order.
    pub fn events_on(&self, date: NaiveDate) -> impl Iterator<Item = &CalendarEvent> + '_ {
        self.events.iter().filter(move |event| event.date == date)
    }

    #[must_use]
    pub fn event(&self, id: EventId) -> Option<&CalendarEvent> {
        self.events.iter().find(|event| event.id() == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            revision: self.revision,
            events: Arc::clone(&self.events),
        }
    }

    /// Registers `observer` to receive a snapshot after every mutation.
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&Snapshot) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(subscription, _)| *subscription != id);
        self.observers.len() != before
    }

    fn publish(&mut self) {
        if self.observers.is_empty() {
            return;
        }

        let snapshot = self.snapshot();
        for (_, observer) in &mut self.observers {
            observer(&snapshot);
        }
    }
}

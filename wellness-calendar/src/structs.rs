use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{Duration, NaiveDate, NaiveDateTime};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::recipe::RecipeId;

static NEXT_EVENT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique event identifier, handed out when an event is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(transparent))]
pub struct EventId(u64);

impl EventId {
    fn next() -> Self {
        Self(NEXT_EVENT_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum EventKind {
    Meal,
    Workout,
    Work,
    Sleep,
    FreeWrite,
    Todo,
}

impl EventKind {
    pub const ALL: [EventKind; 6] = [
        EventKind::Meal,
        EventKind::Workout,
        EventKind::Work,
        EventKind::Sleep,
        EventKind::FreeWrite,
        EventKind::Todo,
    ];

    /// Hex color the kind is drawn with, both for day blocks and month dots.
    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            EventKind::Meal => "#FF9500",
            EventKind::Workout => "#34C759",
            EventKind::Work => "#007AFF",
            EventKind::Sleep => "#AF52DE",
            EventKind::FreeWrite => "#FFCC00",
            EventKind::Todo => "#FF3B30",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            EventKind::Meal => "Meal",
            EventKind::Workout => "Workout",
            EventKind::Work => "Work",
            EventKind::Sleep => "Sleep",
            EventKind::FreeWrite => "Free write",
            EventKind::Todo => "To-do",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A titled, typed, time-boxed calendar entry.
///
/// `end >= start` is not checked, and `date` (the day the event is bucketed
/// under) is allowed to differ from `start`'s calendar day.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct CalendarEvent {
    id: EventId,
    pub title: String,
    pub kind: EventKind,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub date: NaiveDate,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    linked_recipe_id: Option<RecipeId>,
}

impl CalendarEvent {
    /// Creates an event bucketed under `start`'s calendar day.
    pub fn new<S: Into<String>>(
        title: S,
        kind: EventKind,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Self {
        Self {
            id: EventId::next(),
            title: title.into(),
            kind,
            start,
            end,
            date: start.date(),
            linked_recipe_id: None,
        }
    }

    /// Buckets the event under `date` instead of its start day.
    #[must_use]
    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    pub(crate) fn with_recipe(mut self, recipe_id: RecipeId) -> Self {
        self.linked_recipe_id = Some(recipe_id);
        self
    }

    #[must_use]
    pub fn id(&self) -> EventId {
        self.id
    }

    #[must_use]
    pub fn linked_recipe_id(&self) -> Option<&RecipeId> {
        self.linked_recipe_id.as_ref()
    }

    /// Signed duration; negative when `end` precedes `start`.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 10, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn ids_are_unique() {
        let a = CalendarEvent::new("a", EventKind::Work, at(9, 0), at(10, 0));
        let b = CalendarEvent::new("a", EventKind::Work, at(9, 0), at(10, 0));
        assert_ne!(a.id(), b.id());
        assert_eq!(a.clone().id(), a.id());
    }

    #[test]
    fn date_defaults_to_start_day_and_can_be_overridden() {
        let event = CalendarEvent::new("late", EventKind::Sleep, at(23, 0), at(23, 30));
        assert_eq!(event.date, at(0, 0).date());

        let moved = event.on(NaiveDate::from_ymd_opt(2024, 10, 2).unwrap());
        assert_eq!(moved.date, NaiveDate::from_ymd_opt(2024, 10, 2).unwrap());
        assert_eq!(moved.start, at(23, 0));
    }

    #[test]
    fn negative_duration_is_kept() {
        let event = CalendarEvent::new("backwards", EventKind::Todo, at(10, 0), at(9, 0));
        assert_eq!(event.duration().num_minutes(), -60);
        assert!(event.linked_recipe_id().is_none());
    }

    #[test]
    fn every_kind_has_a_distinct_color() {
        let mut colors = EventKind::ALL.map(EventKind::color).to_vec();
        colors.sort_unstable();
        colors.dedup();
        assert_eq!(colors.len(), EventKind::ALL.len());
    }
}

use chrono::{NaiveDate, NaiveDateTime, Timelike};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::recipe::RecipeCatalog;
use crate::routes::{destination, Destination};
use crate::structs::{CalendarEvent, EventId, EventKind};

pub const HOURS_PER_DAY: u32 = 24;
pub const DEFAULT_HOUR_HEIGHT: f32 = 60.0;

/// Geometry of the 24-row hourly timeline a single day is laid out on.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DayGrid {
    /// Pixel height of one hour row.
    pub hour_height: f32,
    /// Floor applied to every block so short events stay visible.
    pub min_height: f32,
}

impl Default for DayGrid {
    fn default() -> Self {
        Self::new(DEFAULT_HOUR_HEIGHT)
    }
}

/// A positioned event block. Blocks may overlap; later blocks draw on top.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct EventBlock {
    pub id: EventId,
    pub title: String,
    pub kind: EventKind,
    pub color: &'static str,
    pub offset: f32,
    pub height: f32,
    pub destination: Option<Destination>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct DayLayout {
    pub date: NaiveDate,
    pub hour_height: f32,
    pub total_height: f32,
    pub blocks: Vec<EventBlock>,
    /// Offset of the current-time line, only when `date` is today.
    pub now_marker: Option<f32>,
    /// Scroll position centering the current hour, only when `date` is today.
    pub scroll_target: Option<f32>,
}

impl DayGrid {
    /// Grid with the minimum block height set to a third of an hour row.
    #[must_use]
    pub fn new(hour_height: f32) -> Self {
        Self {
            hour_height,
            min_height: hour_height / 3.0,
        }
    }

    #[must_use]
    pub fn with_min_height(mut self, min_height: f32) -> Self {
        self.min_height = min_height;
        self
    }

    #[must_use]
    pub fn total_height(&self) -> f32 {
        HOURS_PER_DAY as f32 * self.hour_height
    }

    /// Vertical offset of a wall-clock time; seconds are ignored.
    #[must_use]
    pub fn offset<T: Timelike>(&self, time: &T) -> f32 {
        (time.hour() as f32 + time.minute() as f32 / 60.0) * self.hour_height
    }

    /// Block height for the span `start..end`, never below `min_height`.
    #[must_use]
    pub fn height(&self, start: NaiveDateTime, end: NaiveDateTime) -> f32 {
        let seconds = (end - start).num_seconds();
        (seconds as f32 / 3600.0 * self.hour_height).max(self.min_height)
    }

    #[must_use]
    pub fn now_marker(&self, date: NaiveDate, now: NaiveDateTime) -> Option<f32> {
        (now.date() == date).then(|| self.offset(&now))
    }

    /// Scroll offset that centers the current hour row in a viewport of
    /// `viewport_height`, clamped to the scrollable range.
    #[must_use]
    pub fn scroll_target(
        &self,
        date: NaiveDate,
        now: NaiveDateTime,
        viewport_height: f32,
    ) -> Option<f32> {
        if now.date() != date {
            return None;
        }

        let row_center = (now.hour() as f32 + 0.5) * self.hour_height;
        let max_scroll = (self.total_height() - viewport_height).max(0.0);
        Some((row_center - viewport_height / 2.0).clamp(0.0, max_scroll))
    }

    #[must_use]
    pub fn block<C>(&self, event: &CalendarEvent, catalog: &C) -> EventBlock
    where
        C: RecipeCatalog + ?Sized,
    {
        EventBlock {
            id: event.id(),
            title: event.title.clone(),
            kind: event.kind,
            color: event.kind.color(),
            offset: self.offset(&event.start),
            height: self.height(event.start, event.end),
            destination: destination(event, catalog),
        }
    }

    /// Lays out `events` for `date`. Events are positioned by their start
    /// time of day only, so the caller decides which events belong to `date`.
    pub fn layout<'a, I, C>(
        &self,
        date: NaiveDate,
        events: I,
        catalog: &C,
        now: NaiveDateTime,
        viewport_height: f32,
    ) -> DayLayout
    where
        I: IntoIterator<Item = &'a CalendarEvent>,
        C: RecipeCatalog + ?Sized,
    {
        DayLayout {
            date,
            hour_height: self.hour_height,
            total_height: self.total_height(),
            blocks: events
                .into_iter()
                .map(|event| self.block(event, catalog))
                .collect(),
            now_marker: self.now_marker(date, now),
            scroll_target: self.scroll_target(date, now, viewport_height),
        }
    }
}

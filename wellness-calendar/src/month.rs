use std::collections::HashMap;

use chrono::{Datelike, Months, NaiveDate, Weekday};

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::structs::{CalendarEvent, EventKind};

/// Upper bound on event dots drawn in a single day cell.
pub const MAX_DOTS: usize = 3;

const DAYS_PER_WEEK: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct DayCell {
    pub date: NaiveDate,
    /// Kinds of the first [`MAX_DOTS`] events on this day, in insertion order.
    pub dots: Vec<EventKind>,
    pub is_selected: bool,
    pub is_today: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize),
    serde(tag = "type", rename_all = "snake_case")
)]
pub enum MonthCell {
    Empty,
    Day(DayCell),
}

impl MonthCell {
    #[must_use]
    pub fn day(&self) -> Option<&DayCell> {
        match self {
            MonthCell::Empty => None,
            MonthCell::Day(cell) => Some(cell),
        }
    }
}

/// A month padded to whole weeks, one row per week.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct MonthMatrix {
    pub year: i32,
    pub month: u32,
    pub first_weekday: Weekday,
    pub rows: Vec<Vec<MonthCell>>,
}

impl MonthMatrix {
    pub fn cells(&self) -> impl Iterator<Item = &MonthCell> + '_ {
        self.rows.iter().flatten()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthGrid {
    /// Weekday shown in the first column.
    pub first_weekday: Weekday,
}

impl Default for MonthGrid {
    fn default() -> Self {
        Self {
            first_weekday: Weekday::Sun,
        }
    }
}

impl MonthGrid {
    #[must_use]
    pub fn starting_on(first_weekday: Weekday) -> Self {
        Self { first_weekday }
    }

    /// Column of `date` relative to the first weekday.
    #[must_use]
    pub fn column(&self, date: NaiveDate) -> usize {
        let day = date.weekday().num_days_from_monday();
        let first = self.first_weekday.num_days_from_monday();
        ((day + 7 - first) % 7) as usize
    }

    /// Days of the month with `None` padding in front (up to the first
    /// day's column) and at the end (up to a full week).
    #[must_use]
    pub fn padded_days(&self, year: i32, month: u32) -> Option<Vec<Option<NaiveDate>>> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let len = days_in_month(year, month)?;

        let mut days = vec![None; self.column(first)];
        days.extend(first.iter_days().take(len as usize).map(Some));

        let trailing = (DAYS_PER_WEEK - days.len() % DAYS_PER_WEEK) % DAYS_PER_WEEK;
        days.resize(days.len() + trailing, None);

        Some(days)
    }

    /// Builds the annotated matrix for `year`/`month`, or `None` when the
    /// month does not exist.
    pub fn matrix<'a, I>(
        &self,
        year: i32,
        month: u32,
        events: I,
        selected: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Option<MonthMatrix>
    where
        I: IntoIterator<Item = &'a CalendarEvent>,
    {
        let days = self.padded_days(year, month)?;

        let mut dots: HashMap<NaiveDate, Vec<EventKind>> = HashMap::new();
        for event in events {
            let day = dots.entry(event.date).or_default();
            if day.len() < MAX_DOTS {
                day.push(event.kind);
            }
        }

        let rows = days
            .chunks(DAYS_PER_WEEK)
            .map(|week| {
                week.iter()
                    .map(|day| match day {
                        None => MonthCell::Empty,
                        Some(date) => MonthCell::Day(DayCell {
                            date: *date,
                            dots: dots.remove(date).unwrap_or_default(),
                            is_selected: selected == Some(*date),
                            is_today: *date == today,
                        }),
                    })
                    .collect()
            })
            .collect();

        Some(MonthMatrix {
            year,
            month,
            first_weekday: self.first_weekday,
            rows,
        })
    }
}

#[must_use]
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = first.checked_add_months(Months::new(1))?;
    u32::try_from(next.signed_duration_since(first).num_days()).ok()
}

#[must_use]
pub fn next_month(year: i32, month: u32) -> Option<(i32, u32)> {
    let next = NaiveDate::from_ymd_opt(year, month, 1)?.checked_add_months(Months::new(1))?;
    Some((next.year(), next.month()))
}

#[must_use]
pub fn previous_month(year: i32, month: u32) -> Option<(i32, u32)> {
    let prev = NaiveDate::from_ymd_opt(year, month, 1)?.checked_sub_months(Months::new(1))?;
    Some((prev.year(), prev.month()))
}

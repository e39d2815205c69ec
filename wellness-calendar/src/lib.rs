mod clock;
mod day;
mod manager;
mod month;
mod recipe;
mod routes;
mod structs;

#[cfg(feature = "ics")]
mod ics;

pub use clock::{Clock, FixedClock, SystemClock};
pub use day::{DayGrid, DayLayout, EventBlock, DEFAULT_HOUR_HEIGHT, HOURS_PER_DAY};
pub use manager::{CalendarManager, Snapshot, SubscriptionId, MEAL_DURATION_MINUTES};
pub use month::{
    days_in_month, next_month, previous_month, DayCell, MonthCell, MonthGrid, MonthMatrix, MAX_DOTS,
};
pub use recipe::{sample_recipes, Recipe, RecipeCatalog, RecipeId};
pub use routes::{destination, Destination};
pub use structs::{CalendarEvent, EventId, EventKind};

#[cfg(feature = "ics")]
pub use crate::ics::to_ics;

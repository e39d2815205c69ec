use std::collections::HashMap;
use std::sync::Arc;

use log::info;
use tokio::sync::RwLock;
use wellness_calendar::{
    sample_recipes, CalendarManager, Clock, DayGrid, MonthGrid, Recipe, RecipeId,
};

use crate::cli::Args;

pub type SharedState = Arc<AppState>;

/// Everything one server session shares between requests.
pub struct AppState {
    pub calendar: RwLock<CalendarManager>,
    pub recipes: HashMap<RecipeId, Recipe>,
    pub grid: DayGrid,
    pub month: MonthGrid,
    pub clock: Box<dyn Clock + Send + Sync>,
}

impl AppState {
    pub fn new<C>(args: &Args, clock: C) -> SharedState
    where
        C: Clock + Send + Sync + 'static,
    {
        let mut calendar = if args.seed {
            CalendarManager::seeded(clock.today())
        } else {
            CalendarManager::new()
        };

        calendar.subscribe(|snapshot| {
            info!(
                "Calendar updated to revision {} ({} events)",
                snapshot.revision,
                snapshot.events.len()
            );
        });

        let recipes = sample_recipes()
            .iter()
            .map(|recipe| (recipe.id.clone(), recipe.clone()))
            .collect();

        Arc::new(Self {
            calendar: RwLock::new(calendar),
            recipes,
            grid: args.grid,
            month: MonthGrid::starting_on(args.week_start),
            clock: Box::new(clock),
        })
    }
}

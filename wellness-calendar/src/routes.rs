use std::collections::HashMap;

use once_cell::sync::Lazy;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::recipe::{Recipe, RecipeCatalog};
use crate::structs::{CalendarEvent, EventKind};

/// Detail view an event opens when tapped.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize),
    serde(tag = "view", content = "recipe", rename_all = "snake_case")
)]
pub enum Destination {
    RecipeDetail(Recipe),
    WorkoutSession,
    SleepSchedule,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    RecipeDetail,
    WorkoutSession,
    SleepSchedule,
}

static ROUTES: Lazy<HashMap<EventKind, Route>> = Lazy::new(|| {
    HashMap::from([
        (EventKind::Meal, Route::RecipeDetail),
        (EventKind::Workout, Route::WorkoutSession),
        (EventKind::Sleep, Route::SleepSchedule),
    ])
});

/// Resolves where `event` navigates to. Meals only route when their linked
/// recipe is present in `catalog`.
pub fn destination<C>(event: &CalendarEvent, catalog: &C) -> Option<Destination>
where
    C: RecipeCatalog + ?Sized,
{
    match ROUTES.get(&event.kind)? {
        Route::RecipeDetail => event
            .linked_recipe_id()
            .and_then(|id| catalog.recipe(id))
            .cloned()
            .map(Destination::RecipeDetail),
        Route::WorkoutSession => Some(Destination::WorkoutSession),
        Route::SleepSchedule => Some(Destination::SleepSchedule),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::manager::CalendarManager;
    use crate::recipe::sample_recipes;

    fn event(kind: EventKind) -> CalendarEvent {
        let start = NaiveDate::from_ymd_opt(2024, 10, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        CalendarEvent::new("event", kind, start, start)
    }

    #[test]
    fn kinds_without_a_view_have_no_destination() {
        for kind in [EventKind::Work, EventKind::FreeWrite, EventKind::Todo] {
            assert_eq!(destination(&event(kind), sample_recipes()), None);
        }
    }

    #[test]
    fn workout_and_sleep_route_to_their_views() {
        assert_eq!(
            destination(&event(EventKind::Workout), sample_recipes()),
            Some(Destination::WorkoutSession)
        );
        assert_eq!(
            destination(&event(EventKind::Sleep), sample_recipes()),
            Some(Destination::SleepSchedule)
        );
    }

    #[test]
    fn meals_need_a_resolvable_recipe() {
        assert_eq!(destination(&event(EventKind::Meal), sample_recipes()), None);

        let recipe = &sample_recipes()[1];
        let mut manager = CalendarManager::new();
        let id = manager.schedule_meal(recipe, event(EventKind::Meal).start);
        let meal = manager.event(id).unwrap();

        assert_eq!(
            destination(meal, sample_recipes()),
            Some(Destination::RecipeDetail(recipe.clone()))
        );

        let empty: &[Recipe] = &[];
        assert_eq!(destination(meal, empty), None);
    }
}

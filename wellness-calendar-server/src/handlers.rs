use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use wellness_calendar::{
    to_ics, CalendarEvent, DayLayout, EventKind, MonthMatrix, RecipeCatalog, RecipeId,
};

use crate::state::SharedState;

const DEFAULT_VIEWPORT_HEIGHT: f32 = 600.0;

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/events", get(list_events).post(create_event))
        .route("/meals", post(schedule_meal))
        .route("/day", get(day_layout))
        .route("/month", get(month_matrix))
        .route("/calendar.ics", get(export_calendar))
        .fallback(|| async { (StatusCode::NOT_FOUND, "Not found") })
        .with_state(state)
}

#[derive(Deserialize)]
struct EventsQuery {
    date: Option<NaiveDate>,
}

async fn list_events(
    State(state): State<SharedState>,
    Query(query): Query<EventsQuery>,
) -> Json<Vec<CalendarEvent>> {
    let calendar = state.calendar.read().await;

    let events: Vec<CalendarEvent> = match query.date {
        Some(date) => calendar.events_on(date).cloned().collect(),
        None => calendar.events().to_vec(),
    };

    Json(events)
}

#[derive(Deserialize)]
struct NewEvent {
    title: String,
    kind: EventKind,
    start: NaiveDateTime,
    end: NaiveDateTime,
    // Bucket day, defaults to the start day
    date: Option<NaiveDate>,
}

async fn create_event(
    State(state): State<SharedState>,
    Json(new): Json<NewEvent>,
) -> (StatusCode, Json<CalendarEvent>) {
    let mut event = CalendarEvent::new(new.title, new.kind, new.start, new.end);
    if let Some(date) = new.date {
        event = event.on(date);
    }

    state.calendar.write().await.add_event(event.clone());

    (StatusCode::CREATED, Json(event))
}

#[derive(Deserialize)]
struct MealRequest {
    recipe_id: RecipeId,
    start: NaiveDateTime,
}

async fn schedule_meal(
    State(state): State<SharedState>,
    Json(request): Json<MealRequest>,
) -> Response {
    let Some(recipe) = state.recipes.recipe(&request.recipe_id) else {
        return (StatusCode::NOT_FOUND, "Unknown recipe").into_response();
    };

    let mut calendar = state.calendar.write().await;
    let id = calendar.schedule_meal(recipe, request.start);

    match calendar.event(id) {
        Some(event) => (StatusCode::CREATED, Json(event)).into_response(),
        None => (StatusCode::INTERNAL_SERVER_ERROR, "Meal was not stored").into_response(),
    }
}

#[derive(Deserialize)]
struct DayQuery {
    date: Option<NaiveDate>,
    viewport: Option<f32>,
}

async fn day_layout(
    State(state): State<SharedState>,
    Query(query): Query<DayQuery>,
) -> Json<DayLayout> {
    let now = state.clock.now();
    let date = query.date.unwrap_or(now.date());
    let viewport = query.viewport.unwrap_or(DEFAULT_VIEWPORT_HEIGHT);

    let calendar = state.calendar.read().await;
    Json(
        state
            .grid
            .layout(date, calendar.events_on(date), &state.recipes, now, viewport),
    )
}

#[derive(Deserialize)]
struct MonthQuery {
    year: Option<i32>,
    month: Option<u32>,
    selected: Option<NaiveDate>,
}

async fn month_matrix(
    State(state): State<SharedState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<MonthMatrix>, (StatusCode, &'static str)> {
    let today = state.clock.today();
    let year = query.year.unwrap_or(today.year());
    let month = query.month.unwrap_or(today.month());

    let calendar = state.calendar.read().await;
    state
        .month
        .matrix(year, month, calendar.events(), query.selected, today)
        .map(Json)
        .ok_or((StatusCode::BAD_REQUEST, "Invalid year or month"))
}

async fn export_calendar(State(state): State<SharedState>) -> Response {
    let calendar = state.calendar.read().await;
    let body = to_ics(env!("CARGO_PKG_NAME"), calendar.events()).to_string();

    ([("content-type", "text/calendar")], body).into_response()
}

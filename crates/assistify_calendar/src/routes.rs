// --- File: crates/assistify_calendar/src/routes.rs ---

use crate::handlers::{
    confirm_schedule_handler, create_event_handler, delete_event_handler, get_events_handler,
    get_free_slots_handler, smart_schedule_handler, update_event_handler, CalendarState,
};
use assistify_common::services::{BoxedError, EventSource};
use assistify_config::AppConfig;
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

/// Creates a router containing all routes for the calendar feature.
///
/// The caller supplies the event source (usually obtained from the service
/// factory) so tests can hand in a mock and the backend wires the Google
/// implementation exactly once.
pub fn routes(config: Arc<AppConfig>, source: Arc<dyn EventSource<Error = BoxedError>>) -> Router {
    let state = Arc::new(CalendarState::new(config, source));

    Router::new()
        .route("/calendar/events", get(get_events_handler))
        .route("/calendar/free-slots", get(get_free_slots_handler))
        .route("/calendar/schedule", post(smart_schedule_handler))
        .route("/calendar/confirm-schedule", post(confirm_schedule_handler))
        .route("/calendar/create", post(create_event_handler))
        .route("/calendar/update/{event_id}", put(update_event_handler))
        .route("/calendar/delete/{event_id}", delete(delete_event_handler))
        .with_state(state)
}

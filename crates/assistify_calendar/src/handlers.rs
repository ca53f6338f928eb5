// File: crates/assistify_calendar/src/handlers.rs
use crate::logic::{
    scan_range, AvailabilityEngine, ConfirmScheduleResponse, ConfirmedEvent, CreateEventRequest,
    EventCreatedResponse, EventDto, EventUpdatedResponse, EventsQuery, EventsResponse,
    FreeSlotDto, FreeSlotsQuery, FreeSlotsResponse, MessageResponse, SchedulerError,
    SmartScheduleRequest, SmartScheduleResponse, UpdateEventRequest, WorkingHours,
    DEFAULT_SCAN_DAYS, DEFAULT_SLOT_DURATION_MINUTES, MAX_LISTED_SLOTS,
};
use assistify_common::services::{BoxedError, EventChanges, EventSource, NewEvent};
use assistify_common::HttpStatusCode;
use assistify_config::{AppConfig, CalendarConfig};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;
use tracing::{error, info};

// Shared state needed by the calendar handlers
#[derive(Clone)]
pub struct CalendarState {
    pub config: Arc<AppConfig>,
    pub source: Arc<dyn EventSource<Error = BoxedError>>,
    pub engine: AvailabilityEngine,
}

impl CalendarState {
    pub fn new(config: Arc<AppConfig>, source: Arc<dyn EventSource<Error = BoxedError>>) -> Self {
        let engine = AvailabilityEngine::new(source.clone());
        Self {
            config,
            source,
            engine,
        }
    }
}

/// Checks the runtime flag and returns the calendar config section.
fn ensure_enabled(state: &CalendarState) -> Result<&CalendarConfig, (StatusCode, String)> {
    if !state.config.use_calendar {
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            "Calendar service is disabled.".to_string(),
        ));
    }
    state.config.calendar.as_ref().ok_or_else(|| {
        info!("Calendar configuration missing in AppConfig.");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Server configuration error: calendar config missing.".to_string(),
        )
    })
}

/// Maps an engine error to the HTTP response pair via the shared taxonomy.
fn scheduler_error_response(err: SchedulerError) -> (StatusCode, String) {
    (
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        err.to_string(),
    )
}

fn configured_working_hours(
    config: &CalendarConfig,
) -> Result<WorkingHours, (StatusCode, String)> {
    WorkingHours::new(
        config.work_start_hour.unwrap_or(9),
        config.work_end_hour.unwrap_or(17),
    )
    .map_err(|e| {
        error!("Invalid working hours in config: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Server configuration error: invalid working hours.".to_string(),
        )
    })
}

/// Handler to list upcoming calendar events.
///
/// Unlike the free-slot computation this listing is not fail-open: the caller
/// asked for the events themselves, so an upstream failure is reported.
#[axum::debug_handler]
pub async fn get_events_handler(
    State(state): State<Arc<CalendarState>>,
    Query(query): Query<EventsQuery>,
) -> Result<Json<EventsResponse>, (StatusCode, String)> {
    ensure_enabled(&state)?;

    let days = query.days.unwrap_or(DEFAULT_SCAN_DAYS);
    if days <= 0 {
        return Err((
            StatusCode::BAD_REQUEST,
            "days must be positive".to_string(),
        ));
    }

    let (time_min, time_max) = scan_range(days);
    match state.source.fetch_events(time_min, time_max).await {
        Ok(events) => Ok(Json(EventsResponse {
            events: events.into_iter().map(EventDto::from).collect(),
        })),
        Err(e) => {
            error!("Error fetching calendar events: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch calendar events. Please check your calendar connection."
                    .to_string(),
            ))
        }
    }
}

/// Handler to get available time slots.
#[axum::debug_handler]
pub async fn get_free_slots_handler(
    State(state): State<Arc<CalendarState>>,
    Query(query): Query<FreeSlotsQuery>,
) -> Result<Json<FreeSlotsResponse>, (StatusCode, String)> {
    let calendar_config = ensure_enabled(&state)?;
    let hours = configured_working_hours(calendar_config)?;

    let duration = query.duration.unwrap_or(DEFAULT_SLOT_DURATION_MINUTES);
    let days = query.days.unwrap_or(DEFAULT_SCAN_DAYS);
    if days <= 0 {
        return Err((
            StatusCode::BAD_REQUEST,
            "days must be positive".to_string(),
        ));
    }

    let slots = state
        .engine
        .find_free_slots(duration, Some(scan_range(days)), hours)
        .await
        .map_err(scheduler_error_response)?;

    Ok(Json(FreeSlotsResponse {
        free_slots: slots
            .iter()
            .take(MAX_LISTED_SLOTS)
            .map(FreeSlotDto::from)
            .collect(),
    }))
}

/// Handler to propose a schedule for a new event.
///
/// Returns a suggestion and alternatives; nothing is written to the calendar
/// until the caller confirms.
#[axum::debug_handler]
pub async fn smart_schedule_handler(
    State(state): State<Arc<CalendarState>>,
    Json(payload): Json<SmartScheduleRequest>,
) -> Result<Json<SmartScheduleResponse>, (StatusCode, String)> {
    ensure_enabled(&state)?;

    let summary = payload.summary.trim();
    if summary.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "Event title is required".to_string(),
        ));
    }

    let duration = payload
        .duration_minutes
        .unwrap_or(DEFAULT_SLOT_DURATION_MINUTES);

    match state
        .engine
        .smart_schedule(summary, duration, payload.description, payload.location)
        .await
    {
        Ok(proposal) => Ok(Json(SmartScheduleResponse::from(proposal))),
        Err(e @ SchedulerError::NoSlotsAvailable) => {
            info!("Smart schedule found no slots for '{}'", summary);
            Err(scheduler_error_response(e))
        }
        Err(e) => Err(scheduler_error_response(e)),
    }
}

fn validated_new_event(
    summary: &str,
    start_time: String,
    end_time: String,
    description: Option<String>,
    location: Option<String>,
) -> Result<NewEvent, (StatusCode, String)> {
    if summary.is_empty() || start_time.is_empty() || end_time.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "Title, start time, and end time are required".to_string(),
        ));
    }
    Ok(NewEvent {
        summary: summary.to_string(),
        start_time,
        end_time,
        description,
        location,
    })
}

/// Handler to create a new calendar event directly.
#[axum::debug_handler]
pub async fn create_event_handler(
    State(state): State<Arc<CalendarState>>,
    Json(payload): Json<CreateEventRequest>,
) -> Result<Json<EventCreatedResponse>, (StatusCode, String)> {
    ensure_enabled(&state)?;

    let event = validated_new_event(
        payload.summary.trim(),
        payload.start_time,
        payload.end_time,
        payload.description,
        payload.location,
    )?;

    match state.source.create_event(event).await {
        Ok(result) => Ok(Json(EventCreatedResponse {
            message: "Event created successfully".to_string(),
            event_id: result.event_id.unwrap_or_default(),
            event_link: result.html_link.unwrap_or_default(),
        })),
        Err(e) => {
            error!("Error creating calendar event: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to create calendar event".to_string(),
            ))
        }
    }
}

/// Handler to confirm a previously proposed schedule and create the event.
#[axum::debug_handler]
pub async fn confirm_schedule_handler(
    State(state): State<Arc<CalendarState>>,
    Json(payload): Json<CreateEventRequest>,
) -> Result<Json<ConfirmScheduleResponse>, (StatusCode, String)> {
    ensure_enabled(&state)?;

    let summary = payload.summary.trim().to_string();
    let event = validated_new_event(
        &summary,
        payload.start_time.clone(),
        payload.end_time.clone(),
        payload.description,
        payload.location,
    )?;

    match state.source.create_event(event).await {
        Ok(result) => Ok(Json(ConfirmScheduleResponse {
            message: "Event scheduled successfully!".to_string(),
            event: ConfirmedEvent {
                id: result.event_id.unwrap_or_default(),
                summary,
                start: payload.start_time,
                end: payload.end_time,
                link: result.html_link.unwrap_or_default(),
            },
        })),
        Err(e) => {
            error!("Error confirming schedule: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to schedule event".to_string(),
            ))
        }
    }
}

/// Handler to update an existing calendar event.
#[axum::debug_handler]
pub async fn update_event_handler(
    State(state): State<Arc<CalendarState>>,
    Path(event_id): Path<String>,
    Json(payload): Json<UpdateEventRequest>,
) -> Result<Json<EventUpdatedResponse>, (StatusCode, String)> {
    ensure_enabled(&state)?;

    let changes = EventChanges {
        summary: payload.summary,
        start_time: payload.start_time,
        end_time: payload.end_time,
        description: payload.description,
        location: payload.location,
    };

    match state.source.update_event(&event_id, changes).await {
        Ok(result) => Ok(Json(EventUpdatedResponse {
            message: "Event updated successfully".to_string(),
            event_id: result.event_id.unwrap_or(event_id),
        })),
        Err(e) => {
            error!("Error updating calendar event: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to update calendar event".to_string(),
            ))
        }
    }
}

/// Handler to delete a calendar event.
#[axum::debug_handler]
pub async fn delete_event_handler(
    State(state): State<Arc<CalendarState>>,
    Path(event_id): Path<String>,
) -> Result<Json<MessageResponse>, (StatusCode, String)> {
    ensure_enabled(&state)?;

    match state.source.delete_event(&event_id).await {
        Ok(()) => Ok(Json(MessageResponse {
            message: "Event deleted successfully".to_string(),
        })),
        Err(e) => {
            error!("Error deleting calendar event: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to delete calendar event".to_string(),
            ))
        }
    }
}

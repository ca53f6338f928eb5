// File: crates/assistify_calendar/src/doc.rs

#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::logic::{
    ConfirmScheduleResponse, ConfirmedEvent, CreateEventRequest, EventCreatedResponse, EventDto,
    EventUpdatedResponse, EventsResponse, FreeSlotDto, FreeSlotsResponse, MessageResponse,
    SmartScheduleRequest, SmartScheduleResponse, SuggestedSchedule, UpdateEventRequest,
};

#[utoipa::path(
    get,
    path = "/calendar/events",
    params(
        ("days" = Option<i64>, Query, description = "Number of days to list, starting today", example = 7)
    ),
    responses(
        (status = 200, description = "Upcoming events", body = EventsResponse),
        (status = 500, description = "Calendar unreachable", body = String)
    )
)]
fn doc_get_events_handler() {}

#[utoipa::path(
    get,
    path = "/calendar/free-slots",
    params(
        ("duration" = Option<i64>, Query, description = "Minimum slot length in minutes", example = 60),
        ("days" = Option<i64>, Query, description = "Number of days to scan, starting today", example = 7)
    ),
    responses(
        (status = 200, description = "Available time slots", body = FreeSlotsResponse),
        (status = 400, description = "Invalid duration or day count", body = String)
    )
)]
fn doc_get_free_slots_handler() {}

#[utoipa::path(
    post,
    path = "/calendar/schedule",
    request_body(content = SmartScheduleRequest, example = json!({
        "summary": "Project kickoff",
        "duration_minutes": 45,
        "description": "First sync with the team",
        "location": "Video call"
    })),
    responses(
        (status = 200, description = "Schedule proposal", body = SmartScheduleResponse),
        (status = 400, description = "Missing title or no available time slots", body = String)
    )
)]
fn doc_smart_schedule_handler() {}

#[utoipa::path(
    post,
    path = "/calendar/confirm-schedule",
    request_body = CreateEventRequest,
    responses(
        (status = 200, description = "Event scheduled", body = ConfirmScheduleResponse),
        (status = 400, description = "Missing required fields", body = String),
        (status = 500, description = "Event creation failed", body = String)
    )
)]
fn doc_confirm_schedule_handler() {}

#[utoipa::path(
    post,
    path = "/calendar/create",
    request_body(content = CreateEventRequest, example = json!({
        "summary": "Dentist",
        "start_time": "2025-05-15T10:00:00Z",
        "end_time": "2025-05-15T11:00:00Z"
    })),
    responses(
        (status = 200, description = "Event created", body = EventCreatedResponse),
        (status = 400, description = "Missing required fields", body = String),
        (status = 500, description = "Event creation failed", body = String)
    )
)]
fn doc_create_event_handler() {}

#[utoipa::path(
    put,
    path = "/calendar/update/{event_id}",
    params(
        ("event_id" = String, Path, description = "The ID of the event to update")
    ),
    request_body = UpdateEventRequest,
    responses(
        (status = 200, description = "Event updated", body = EventUpdatedResponse),
        (status = 500, description = "Event update failed", body = String)
    )
)]
fn doc_update_event_handler() {}

#[utoipa::path(
    delete,
    path = "/calendar/delete/{event_id}",
    params(
        ("event_id" = String, Path, description = "The ID of the event to delete")
    ),
    responses(
        (status = 200, description = "Event deleted", body = MessageResponse),
        (status = 500, description = "Event deletion failed", body = String)
    )
)]
fn doc_delete_event_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        doc_get_events_handler,
        doc_get_free_slots_handler,
        doc_smart_schedule_handler,
        doc_confirm_schedule_handler,
        doc_create_event_handler,
        doc_update_event_handler,
        doc_delete_event_handler
    ),
    components(
        schemas(
            EventsResponse,
            EventDto,
            FreeSlotsResponse,
            FreeSlotDto,
            SmartScheduleRequest,
            SmartScheduleResponse,
            SuggestedSchedule,
            CreateEventRequest,
            EventCreatedResponse,
            ConfirmScheduleResponse,
            ConfirmedEvent,
            UpdateEventRequest,
            EventUpdatedResponse,
            MessageResponse
        )
    ),
    tags(
        (name = "calendar", description = "Calendar scheduling API")
    ),
    servers(
        (url = "/api", description = "Main API prefix")
    )
)]
pub struct CalendarApiDoc;

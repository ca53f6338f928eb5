// --- File: crates/assistify_calendar/src/service.rs ---
//! Google Calendar event source implementation.
//!
//! This module provides an implementation of the EventSource trait on top of
//! the Google Calendar API.

use crate::auth::HubType;
use assistify_common::services::{
    BoxFuture, CalendarEvent, EventChanges, EventResult, EventSource, NewEvent,
};
use assistify_common::{external_service_error, AssistifyError, HttpStatusCode};
use chrono::{DateTime, TimeZone, Utc};
use google_calendar3::api::{Event, EventDateTime};
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

/// Errors that can occur when talking to Google Calendar.
#[derive(Error, Debug)]
pub enum CalendarSourceError {
    #[error("Google API Error: {0}")]
    ApiError(#[from] google_calendar3::Error),
    #[error("Failed to parse time: {0}")]
    TimeParseError(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Convert CalendarSourceError to AssistifyError
impl From<CalendarSourceError> for AssistifyError {
    fn from(err: CalendarSourceError) -> Self {
        match err {
            CalendarSourceError::ApiError(e) => external_service_error("Google Calendar", e),
            CalendarSourceError::TimeParseError(msg) => AssistifyError::ParseError(msg),
            CalendarSourceError::ValidationError(msg) => AssistifyError::ValidationError(msg),
        }
    }
}

impl HttpStatusCode for CalendarSourceError {
    fn status_code(&self) -> u16 {
        match self {
            CalendarSourceError::ApiError(_) => 502,
            CalendarSourceError::TimeParseError(_) => 400,
            CalendarSourceError::ValidationError(_) => 400,
        }
    }
}

/// Google Calendar event source.
///
/// One instance always speaks for exactly one calendar: the calendar
/// identifier is fixed at construction time rather than passed per call.
pub struct GoogleEventSource {
    calendar_hub: Arc<HubType>,
    calendar_id: String,
}

impl GoogleEventSource {
    /// Create a new Google Calendar event source for the given calendar.
    pub fn new(calendar_hub: Arc<HubType>, calendar_id: impl Into<String>) -> Self {
        Self {
            calendar_hub,
            calendar_id: calendar_id.into(),
        }
    }
}

fn parse_rfc3339(field: &str, value: &str) -> Result<DateTime<Utc>, CalendarSourceError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| CalendarSourceError::TimeParseError(format!("Invalid {}: {}", field, e)))
}

// Date-only boundaries are widened to the whole stored day, so an all-day
// event covers every date it touches.
fn event_start(event: &Event) -> Option<DateTime<Utc>> {
    let boundary = event.start.as_ref()?;
    if let Some(dt) = boundary.date_time {
        return Some(dt.with_timezone(&Utc));
    }
    boundary
        .date
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

fn event_end(event: &Event) -> Option<DateTime<Utc>> {
    let boundary = event.end.as_ref()?;
    if let Some(dt) = boundary.date_time {
        return Some(dt.with_timezone(&Utc));
    }
    boundary
        .date
        .and_then(|d| d.and_hms_opt(23, 59, 59))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

impl EventSource for GoogleEventSource {
    type Error = CalendarSourceError;

    /// Retrieves events intersecting `[time_min, time_max]`, expanded from
    /// recurrences by the upstream API and ordered by start time ascending.
    ///
    /// Cancelled events and events without usable start/end information are
    /// skipped.
    fn fetch_events(
        &self,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
    ) -> BoxFuture<'_, Vec<CalendarEvent>, Self::Error> {
        let calendar_hub = self.calendar_hub.clone();
        let calendar_id = self.calendar_id.clone();

        Box::pin(async move {
            let (_response, events_list) = calendar_hub
                .events()
                .list(&calendar_id)
                .time_min(time_min)
                .time_max(time_max)
                .single_events(true) // Expand recurring events
                .order_by("startTime")
                .doit()
                .await?;

            let mut events = Vec::new();

            if let Some(items) = events_list.items {
                for event in items {
                    if event.status.as_deref() == Some("cancelled") {
                        continue;
                    }

                    let (start_time, end_time) = match (event_start(&event), event_end(&event)) {
                        (Some(start), Some(end)) => (start, end),
                        _ => {
                            warn!(
                                "Skipping event with missing start/end: {:?}",
                                event.id
                            );
                            continue;
                        }
                    };

                    events.push(CalendarEvent {
                        event_id: event.id.unwrap_or_default(),
                        summary: event.summary.unwrap_or_default(),
                        start_time,
                        end_time,
                        description: event.description,
                        location: event.location,
                    });
                }
            }

            // Sort for easier downstream processing
            events.sort_by_key(|event| event.start_time);
            Ok(events)
        })
    }

    /// Creates a new calendar event.
    ///
    /// Start and end times are parsed from RFC3339 and the end must lie after
    /// the start before any API call is made.
    fn create_event(&self, event: NewEvent) -> BoxFuture<'_, EventResult, Self::Error> {
        let calendar_hub = self.calendar_hub.clone();
        let calendar_id = self.calendar_id.clone();

        Box::pin(async move {
            let start_dt = parse_rfc3339("start_time", &event.start_time)?;
            let end_dt = parse_rfc3339("end_time", &event.end_time)?;

            if end_dt <= start_dt {
                return Err(CalendarSourceError::ValidationError(
                    "End time must be after start time".to_string(),
                ));
            }

            let new_event = Event {
                summary: Some(event.summary),
                description: event.description,
                location: event.location,
                start: Some(EventDateTime {
                    date_time: Some(start_dt),
                    time_zone: Some("UTC".to_string()), // Store event times in UTC
                    ..Default::default()
                }),
                end: Some(EventDateTime {
                    date_time: Some(end_dt),
                    time_zone: Some("UTC".to_string()),
                    ..Default::default()
                }),
                ..Default::default()
            };

            let (_response, created_event) = calendar_hub
                .events()
                .insert(new_event, &calendar_id)
                .doit()
                .await?;

            Ok(EventResult {
                event_id: created_event.id,
                status: created_event
                    .status
                    .unwrap_or_else(|| "confirmed".to_string()),
                html_link: created_event.html_link,
            })
        })
    }

    /// Applies a partial update; only the supplied fields are patched.
    fn update_event(
        &self,
        event_id: &str,
        changes: EventChanges,
    ) -> BoxFuture<'_, EventResult, Self::Error> {
        let calendar_hub = self.calendar_hub.clone();
        let calendar_id = self.calendar_id.clone();
        let event_id = event_id.to_string();

        Box::pin(async move {
            let start_dt = changes
                .start_time
                .as_deref()
                .map(|value| parse_rfc3339("start_time", value))
                .transpose()?;
            let end_dt = changes
                .end_time
                .as_deref()
                .map(|value| parse_rfc3339("end_time", value))
                .transpose()?;

            if let (Some(start), Some(end)) = (start_dt, end_dt) {
                if end <= start {
                    return Err(CalendarSourceError::ValidationError(
                        "End time must be after start time".to_string(),
                    ));
                }
            }

            let patch = Event {
                summary: changes.summary,
                description: changes.description,
                location: changes.location,
                start: start_dt.map(|dt| EventDateTime {
                    date_time: Some(dt),
                    time_zone: Some("UTC".to_string()),
                    ..Default::default()
                }),
                end: end_dt.map(|dt| EventDateTime {
                    date_time: Some(dt),
                    time_zone: Some("UTC".to_string()),
                    ..Default::default()
                }),
                ..Default::default()
            };

            let (_response, updated) = calendar_hub
                .events()
                .patch(patch, &calendar_id, &event_id)
                .doit()
                .await?;

            Ok(EventResult {
                event_id: updated.id,
                status: updated.status.unwrap_or_else(|| "confirmed".to_string()),
                html_link: updated.html_link,
            })
        })
    }

    /// Deletes an event. An event that is already gone counts as deleted.
    fn delete_event(&self, event_id: &str) -> BoxFuture<'_, (), Self::Error> {
        let calendar_hub = self.calendar_hub.clone();
        let calendar_id = self.calendar_id.clone();
        let event_id = event_id.to_string();

        Box::pin(async move {
            let delete_result = calendar_hub
                .events()
                .delete(&calendar_id, &event_id)
                .doit()
                .await;

            match delete_result {
                Ok(_) => Ok(()),
                Err(e) if e.to_string().contains("404") => Ok(()),
                Err(e) => Err(CalendarSourceError::ApiError(e)),
            }
        })
    }
}

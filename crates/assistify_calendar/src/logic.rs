// --- File: crates/assistify_calendar/src/logic.rs ---
use assistify_common::services::{BoxedError, CalendarEvent, EventSource};
use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

// --- Error Handling ---
use assistify_common::{not_found, validation_error, AssistifyError, HttpStatusCode};
use thiserror::Error;
#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error("no available time slots found")]
    NoSlotsAvailable,
    #[error("Duration must be positive, got {0} minutes")]
    InvalidDuration(i64),
    #[error("End of the date range lies before its start")]
    InvalidDateRange,
    #[error("Working hours {0}:00-{1}:00 do not form a valid daily window")]
    InvalidWorkingHours(u32, u32),
}

/// Convert SchedulerError to AssistifyError
impl From<SchedulerError> for AssistifyError {
    fn from(err: SchedulerError) -> Self {
        match err {
            SchedulerError::NoSlotsAvailable => not_found("no available time slots found"),
            other => validation_error(other),
        }
    }
}

impl HttpStatusCode for SchedulerError {
    fn status_code(&self) -> u16 {
        match self {
            // Reported as a client error, not a server fault: the message is
            // shown to the user as-is.
            SchedulerError::NoSlotsAvailable => 400,
            SchedulerError::InvalidDuration(_) => 400,
            SchedulerError::InvalidDateRange => 400,
            SchedulerError::InvalidWorkingHours(_, _) => 400,
        }
    }
}

/// Slots scanned per request when the caller gives no explicit range.
pub const DEFAULT_SCAN_DAYS: i64 = 7;
/// Slot length assumed when a request omits one.
pub const DEFAULT_SLOT_DURATION_MINUTES: i64 = 60;
/// How many alternatives a schedule proposal carries at most.
pub const MAX_ALTERNATIVE_SLOTS: usize = 5;
/// Cap on the free-slot listing endpoint.
pub const MAX_LISTED_SLOTS: usize = 20;

// --- Data Structures ---

/// The daily clock range during which availability is evaluated.
///
/// Applies identically to every weekday; Saturdays and Sundays are never
/// scanned. Outside this range time is neither free nor busy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct WorkingHours {
    /// First hour of the working day on a 24-hour clock.
    pub start_hour: u32,
    /// First hour after the working day, up to and including 24.
    pub end_hour: u32,
}

impl Default for WorkingHours {
    fn default() -> Self {
        Self {
            start_hour: 9,
            end_hour: 17,
        }
    }
}

impl WorkingHours {
    pub fn new(start_hour: u32, end_hour: u32) -> Result<Self, SchedulerError> {
        let hours = Self {
            start_hour,
            end_hour,
        };
        hours.validate()?;
        Ok(hours)
    }

    fn validate(&self) -> Result<(), SchedulerError> {
        if self.start_hour < self.end_hour && self.end_hour <= 24 {
            Ok(())
        } else {
            Err(SchedulerError::InvalidWorkingHours(
                self.start_hour,
                self.end_hour,
            ))
        }
    }
}

/// A maximal gap between busy intervals within one day's working window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FreeSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Always equals `end - start` in whole minutes.
    pub duration_minutes: i64,
}

/// A scheduling suggestion for a new event.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleProposal {
    pub summary: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub suggested_start: DateTime<Utc>,
    pub suggested_end: DateTime<Utc>,
    /// Head of the full free-slot list; the first entry repeats the slot the
    /// suggestion was taken from.
    pub alternatives: Vec<FreeSlot>,
}

// --- Request / Response types for the calendar routes ---

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams, ToSchema))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct FreeSlotsQuery {
    /// Minimum slot length in minutes
    #[cfg_attr(feature = "openapi", schema(example = 60))]
    pub duration: Option<i64>,
    /// Number of days to scan, starting today
    #[cfg_attr(feature = "openapi", schema(example = 7))]
    pub days: Option<i64>,
}

#[derive(Serialize, Debug, Clone)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct FreeSlotDto {
    #[cfg_attr(feature = "openapi", schema(example = "2025-05-05T09:00:00+00:00"))]
    pub start: String, // ISO 8601 format
    #[cfg_attr(feature = "openapi", schema(example = "2025-05-05T10:00:00+00:00"))]
    pub end: String, // ISO 8601 format
    #[cfg_attr(feature = "openapi", schema(example = 60))]
    pub duration_minutes: i64,
}

impl From<&FreeSlot> for FreeSlotDto {
    fn from(slot: &FreeSlot) -> Self {
        Self {
            start: slot.start.to_rfc3339(),
            end: slot.end.to_rfc3339(),
            duration_minutes: slot.duration_minutes,
        }
    }
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct FreeSlotsResponse {
    pub free_slots: Vec<FreeSlotDto>,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams, ToSchema))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct EventsQuery {
    /// Number of days to list, starting today
    #[cfg_attr(feature = "openapi", schema(example = 7))]
    pub days: Option<i64>,
}

#[derive(Serialize, Debug, Clone)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct EventDto {
    pub event_id: String,
    pub summary: String,
    pub start: String, // ISO 8601 format
    pub end: String,   // ISO 8601 format
    pub description: Option<String>,
    pub location: Option<String>,
}

impl From<CalendarEvent> for EventDto {
    fn from(event: CalendarEvent) -> Self {
        Self {
            event_id: event.event_id,
            summary: event.summary,
            start: event.start_time.to_rfc3339(),
            end: event.end_time.to_rfc3339(),
            description: event.description,
            location: event.location,
        }
    }
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct EventsResponse {
    pub events: Vec<EventDto>,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SmartScheduleRequest {
    pub summary: String,
    pub duration_minutes: Option<i64>,
    pub description: Option<String>,
    pub location: Option<String>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SuggestedSchedule {
    pub start: String, // ISO 8601 format
    pub end: String,   // ISO 8601 format
    pub summary: String,
    pub description: Option<String>,
    pub location: Option<String>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SmartScheduleResponse {
    pub suggested_schedule: SuggestedSchedule,
    pub alternative_slots: Vec<FreeSlotDto>,
}

impl From<ScheduleProposal> for SmartScheduleResponse {
    fn from(proposal: ScheduleProposal) -> Self {
        Self {
            suggested_schedule: SuggestedSchedule {
                start: proposal.suggested_start.to_rfc3339(),
                end: proposal.suggested_end.to_rfc3339(),
                summary: proposal.summary,
                description: proposal.description,
                location: proposal.location,
            },
            alternative_slots: proposal.alternatives.iter().map(FreeSlotDto::from).collect(),
        }
    }
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CreateEventRequest {
    pub summary: String,
    pub start_time: String, // ISO 8601 format string
    pub end_time: String,   // ISO 8601 format string
    pub description: Option<String>,
    pub location: Option<String>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct EventCreatedResponse {
    pub message: String,
    pub event_id: String,
    pub event_link: String,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct UpdateEventRequest {
    pub summary: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct EventUpdatedResponse {
    pub message: String,
    pub event_id: String,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ConfirmedEvent {
    pub id: String,
    pub summary: String,
    pub start: String, // ISO 8601 format
    pub end: String,   // ISO 8601 format
    pub link: String,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ConfirmScheduleResponse {
    pub message: String,
    pub event: ConfirmedEvent,
}

// --- Availability Logic ---

/// Scan window starting at the given number of days from the beginning of the
/// current UTC day.
pub fn scan_range(days: i64) -> (DateTime<Utc>, DateTime<Utc>) {
    let today = Utc.from_utc_datetime(&Utc::now().date_naive().and_hms_opt(0, 0, 0).unwrap());
    (today, today + Duration::days(days))
}

fn is_weekend(day: NaiveDate) -> bool {
    matches!(day.weekday(), Weekday::Sat | Weekday::Sun)
}

fn day_window(day: NaiveDate, hours: WorkingHours) -> (DateTime<Utc>, DateTime<Utc>) {
    let midnight = Utc.from_utc_datetime(&day.and_hms_opt(0, 0, 0).unwrap());
    (
        midnight + Duration::hours(i64::from(hours.start_hour)),
        midnight + Duration::hours(i64::from(hours.end_hour)),
    )
}

fn push_gap(
    slots: &mut Vec<FreeSlot>,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    duration_minutes: i64,
) {
    let gap_minutes = (end - start).num_minutes();
    if gap_minutes >= duration_minutes {
        slots.push(FreeSlot {
            start,
            end,
            duration_minutes: gap_minutes,
        });
    }
}

/// Computes all free slots of at least `duration_minutes` within
/// `[range_start, range_end)`, honoring working hours and skipping weekends.
///
/// Events are matched to a day by date overlap, not by timestamp overlap: an
/// event whose stored dates merely touch a day blocks the clipped part of
/// that day's window. A date-only event widened to full days therefore blanks
/// the working window of every day it spans.
pub fn compute_free_slots(
    events: &[CalendarEvent],
    duration_minutes: i64,
    range_start: DateTime<Utc>,
    range_end: DateTime<Utc>,
    hours: WorkingHours,
) -> Vec<FreeSlot> {
    let mut slots = Vec::new();
    let mut day = range_start.date_naive();
    let last_day = range_end.date_naive();

    while day < last_day {
        let next = match day.succ_opt() {
            Some(next) => next,
            None => break,
        };
        if is_weekend(day) {
            day = next;
            continue;
        }

        let (day_start, day_end) = day_window(day, hours);

        let mut busy: Vec<(DateTime<Utc>, DateTime<Utc>)> = events
            .iter()
            .filter(|event| {
                event.start_time.date_naive() <= day && day <= event.end_time.date_naive()
            })
            .map(|event| {
                (
                    event.start_time.clamp(day_start, day_end),
                    event.end_time.clamp(day_start, day_end),
                )
            })
            .collect();
        busy.sort_by_key(|(start, _)| *start);

        // Sweep the window left to right. Overlapping events need no merge
        // pass: the cursor only ever moves forward.
        let mut cursor = day_start;
        for (busy_start, busy_end) in busy {
            if busy_start > cursor {
                push_gap(&mut slots, cursor, busy_start, duration_minutes);
            }
            cursor = cursor.max(busy_end);
        }
        if cursor < day_end {
            push_gap(&mut slots, cursor, day_end, duration_minutes);
        }

        day = next;
    }

    debug!(
        "Found {} free slot(s) of >= {} minute(s) between {} and {}",
        slots.len(),
        duration_minutes,
        range_start,
        range_end
    );
    slots
}

/// Stateless availability computation over an [`EventSource`].
///
/// Each call fetches, computes and returns; nothing is cached or persisted,
/// so any number of invocations may run concurrently.
#[derive(Clone)]
pub struct AvailabilityEngine {
    source: Arc<dyn EventSource<Error = BoxedError>>,
}

impl AvailabilityEngine {
    pub fn new(source: Arc<dyn EventSource<Error = BoxedError>>) -> Self {
        Self { source }
    }

    /// Finds free slots of at least `duration_minutes` in the given range
    /// (defaults: today at 00:00 UTC, seven days).
    ///
    /// Invalid input is rejected. A failed event fetch is not: the calendar
    /// degrades to "no information" and the empty-calendar answer is returned
    /// so the assistant UI is never blocked by upstream trouble.
    pub async fn find_free_slots(
        &self,
        duration_minutes: i64,
        range: Option<(DateTime<Utc>, DateTime<Utc>)>,
        hours: WorkingHours,
    ) -> Result<Vec<FreeSlot>, SchedulerError> {
        if duration_minutes <= 0 {
            return Err(SchedulerError::InvalidDuration(duration_minutes));
        }
        hours.validate()?;
        let (range_start, range_end) = range.unwrap_or_else(|| scan_range(DEFAULT_SCAN_DAYS));
        if range_end < range_start {
            return Err(SchedulerError::InvalidDateRange);
        }

        let events = match self.source.fetch_events(range_start, range_end).await {
            Ok(events) => events,
            Err(err) => {
                warn!("Event fetch failed, treating the window as free: {}", err);
                Vec::new()
            }
        };

        Ok(compute_free_slots(
            &events,
            duration_minutes,
            range_start,
            range_end,
            hours,
        ))
    }

    /// Proposes a start/end for a new event of `duration_minutes`, scanning
    /// the default window with default working hours.
    ///
    /// The suggestion is duration-trimmed, so it can end before the free
    /// window it was taken from does. The alternatives are the first
    /// [`MAX_ALTERNATIVE_SLOTS`] entries of the full slot list, which repeats
    /// the slot chosen as primary.
    pub async fn smart_schedule(
        &self,
        summary: &str,
        duration_minutes: i64,
        description: Option<String>,
        location: Option<String>,
    ) -> Result<ScheduleProposal, SchedulerError> {
        let slots = self
            .find_free_slots(duration_minutes, None, WorkingHours::default())
            .await?;
        let first = slots.first().ok_or(SchedulerError::NoSlotsAvailable)?;

        let suggested_start = first.start;
        let suggested_end = suggested_start + Duration::minutes(duration_minutes);

        Ok(ScheduleProposal {
            summary: summary.to_string(),
            description,
            location,
            suggested_start,
            suggested_end,
            alternatives: slots.into_iter().take(MAX_ALTERNATIVE_SLOTS).collect(),
        })
    }
}

// --- File: crates/assistify_common/src/services.rs ---
//! Service abstractions for external services.
//!
//! This module provides trait definitions for external services used by the
//! application. These traits allow for dependency injection and easier testing
//! by decoupling the application logic from specific implementations of
//! external services.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// A wrapper error type that implements std::error::Error for Box<dyn std::error::Error + Send + Sync>
#[derive(Debug)]
pub struct BoxedError(pub Box<dyn StdError + Send + Sync>);

impl fmt::Display for BoxedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StdError for BoxedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

impl From<Box<dyn StdError + Send + Sync>> for BoxedError {
    fn from(err: Box<dyn StdError + Send + Sync>) -> Self {
        BoxedError(err)
    }
}

/// A trait for reading and mutating events in an external calendar.
///
/// The calendar identifier is part of the implementation's construction, not
/// of the call sites: one `EventSource` instance always speaks for exactly one
/// calendar. Implementations must be safe for concurrent reads.
pub trait EventSource: Send + Sync {
    /// Error type returned by event source operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Get all events whose interval intersects `[time_min, time_max]`,
    /// ordered by start time ascending.
    fn fetch_events(
        &self,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
    ) -> BoxFuture<'_, Vec<CalendarEvent>, Self::Error>;

    /// Create a new event.
    fn create_event(&self, event: NewEvent) -> BoxFuture<'_, EventResult, Self::Error>;

    /// Apply a partial update to an existing event. Only the supplied fields
    /// change.
    fn update_event(
        &self,
        event_id: &str,
        changes: EventChanges,
    ) -> BoxFuture<'_, EventResult, Self::Error>;

    /// Delete an event. Deleting an event that no longer exists is a success.
    fn delete_event(&self, event_id: &str) -> BoxFuture<'_, (), Self::Error>;
}

/// Adapter that erases a concrete `EventSource` error type into `BoxedError`,
/// so callers can hold `Arc<dyn EventSource<Error = BoxedError>>`.
pub struct BoxedEventSource<S>(pub Arc<S>);

impl<S: EventSource> EventSource for BoxedEventSource<S> {
    type Error = BoxedError;

    fn fetch_events(
        &self,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
    ) -> BoxFuture<'_, Vec<CalendarEvent>, Self::Error> {
        let inner = &self.0;
        Box::pin(async move {
            inner
                .fetch_events(time_min, time_max)
                .await
                .map_err(|e| BoxedError(Box::new(e)))
        })
    }

    fn create_event(&self, event: NewEvent) -> BoxFuture<'_, EventResult, Self::Error> {
        let inner = &self.0;
        Box::pin(async move {
            inner
                .create_event(event)
                .await
                .map_err(|e| BoxedError(Box::new(e)))
        })
    }

    fn update_event(
        &self,
        event_id: &str,
        changes: EventChanges,
    ) -> BoxFuture<'_, EventResult, Self::Error> {
        let event_id = event_id.to_string();
        let inner = &self.0;
        Box::pin(async move {
            inner
                .update_event(&event_id, changes)
                .await
                .map_err(|e| BoxedError(Box::new(e)))
        })
    }

    fn delete_event(&self, event_id: &str) -> BoxFuture<'_, (), Self::Error> {
        let event_id = event_id.to_string();
        let inner = &self.0;
        Box::pin(async move {
            inner
                .delete_event(&event_id)
                .await
                .map_err(|e| BoxedError(Box::new(e)))
        })
    }
}

/// A factory for creating service instances.
///
/// This trait provides methods for creating instances of the external services
/// the application depends on.
pub trait ServiceFactory: Send + Sync {
    /// Get the calendar event source, if one is configured.
    fn event_source(&self) -> Option<Arc<dyn EventSource<Error = BoxedError>>>;
}

/// An event read from the external calendar.
///
/// Timestamps are UTC. Date-only (all-day) events are widened by the source
/// implementation to 00:00:00--23:59:59 on their stored dates, so a multi-day
/// event covers every date it touches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// The ID of the event.
    pub event_id: String,
    /// The summary or title of the event.
    pub summary: String,
    /// The start time of the event.
    pub start_time: DateTime<Utc>,
    /// The end time of the event. Always after `start_time`.
    pub end_time: DateTime<Utc>,
    /// An optional description of the event.
    pub description: Option<String>,
    /// An optional location of the event.
    pub location: Option<String>,
}

/// Data for an event to be created.
///
/// Times are RFC3339 strings; the source implementation parses and validates
/// them before talking to the upstream API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEvent {
    /// The summary or title of the event.
    pub summary: String,
    /// The start time of the event.
    pub start_time: String,
    /// The end time of the event.
    pub end_time: String,
    /// An optional description of the event.
    pub description: Option<String>,
    /// An optional location of the event.
    pub location: Option<String>,
}

/// A partial update to an existing event. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventChanges {
    pub summary: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
}

/// Represents the result of an event mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventResult {
    /// The ID of the event.
    pub event_id: Option<String>,
    /// The status of the event.
    pub status: String,
    /// A browser link to the event, when the upstream API provides one.
    pub html_link: Option<String>,
}

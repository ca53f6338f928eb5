// --- File: crates/services/assistify_backend/src/service_factory.rs ---
//! Service factory implementation.
//!
//! This module provides the ServiceFactory implementation for the backend
//! service. The factory initializes external services based on the runtime
//! configuration and hands them out behind trait objects, so the rest of the
//! application never touches concrete API clients directly.
use assistify_calendar::{auth::create_calendar_hub, service::GoogleEventSource};
use assistify_common::services::{BoxedError, BoxedEventSource, EventSource, ServiceFactory};
use assistify_common::{is_calendar_enabled, log_result};
use assistify_config::AppConfig;
use std::sync::Arc;
use tracing::info;

/// Service factory for the backend.
///
/// Initializes the calendar event source when the runtime flag and the
/// calendar config section are both present. A failed initialization disables
/// the calendar routes instead of aborting startup.
pub struct AssistifyServiceFactory {
    /// Configuration the factory was created from. Kept so future services
    /// can be initialized lazily against the same snapshot.
    #[allow(dead_code)]
    config: Arc<AppConfig>,
    event_source: Option<Arc<dyn EventSource<Error = BoxedError>>>,
}

impl AssistifyServiceFactory {
    /// Create a new service factory.
    pub async fn new(config: Arc<AppConfig>) -> Self {
        let mut factory = Self {
            config: config.clone(),
            event_source: None,
        };

        if is_calendar_enabled(&config) {
            info!("ℹ️ Initializing Google Calendar event source...");
            let calendar_config = config.calendar.as_ref().unwrap();
            let hub_result = log_result(
                create_calendar_hub(calendar_config).await,
                "✅ Google Calendar event source initialized.",
                "🚨 Failed to initialize Google Calendar event source",
            );
            match hub_result {
                Ok(hub) => {
                    let calendar_id = calendar_config
                        .calendar_id
                        .clone()
                        .unwrap_or_else(|| "primary".to_string());
                    let source = GoogleEventSource::new(Arc::new(hub), calendar_id);
                    factory.event_source = Some(Arc::new(BoxedEventSource(Arc::new(source))));
                }
                Err(_) => {
                    info!("ℹ️ Calendar routes disabled for this run.");
                }
            }
        } else {
            info!("ℹ️ Calendar feature disabled via runtime config or missing calendar config section.");
        }

        factory
    }
}

impl ServiceFactory for AssistifyServiceFactory {
    fn event_source(&self) -> Option<Arc<dyn EventSource<Error = BoxedError>>> {
        self.event_source.clone()
    }
}

//! Tests for the calendar event source contract.

#[cfg(test)]
mod tests {
    use crate::service::mock::MockEventSource;
    use crate::service::CalendarSourceError;
    use assistify_common::services::{EventChanges, EventSource, NewEvent};
    use assistify_common::{AssistifyError, HttpStatusCode};
    use chrono::{Duration, Utc};

    #[tokio::test]
    async fn test_create_and_fetch_events() {
        let source = MockEventSource::new();

        let now = Utc::now();
        let start_time = now + Duration::hours(1);
        let end_time = start_time + Duration::hours(1);

        let result = source
            .create_event(NewEvent {
                summary: "Test Event".to_string(),
                start_time: start_time.to_rfc3339(),
                end_time: end_time.to_rfc3339(),
                description: Some("This is a test event".to_string()),
                location: None,
            })
            .await
            .unwrap();

        assert!(result.event_id.is_some());
        assert_eq!(result.status, "confirmed");

        let events = source
            .fetch_events(now, now + Duration::hours(3))
            .await
            .unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].summary, "Test Event");
        assert_eq!(
            events[0].description.as_deref(),
            Some("This is a test event")
        );
    }

    #[tokio::test]
    async fn test_update_then_delete_event() {
        let source = MockEventSource::new();
        let now = Utc::now();

        let result = source
            .create_event(NewEvent {
                summary: "Before".to_string(),
                start_time: (now + Duration::hours(1)).to_rfc3339(),
                end_time: (now + Duration::hours(2)).to_rfc3339(),
                description: None,
                location: None,
            })
            .await
            .unwrap();
        let event_id = result.event_id.unwrap();

        source
            .update_event(
                &event_id,
                EventChanges {
                    summary: Some("After".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let events = source
            .fetch_events(now, now + Duration::hours(3))
            .await
            .unwrap();
        assert_eq!(events[0].summary, "After");

        source.delete_event(&event_id).await.unwrap();

        let events = source
            .fetch_events(now, now + Duration::hours(3))
            .await
            .unwrap();
        assert!(events.is_empty());
    }

    #[tokio::test]
    async fn test_create_event_rejects_malformed_times() {
        let source = MockEventSource::new();

        let result = source
            .create_event(NewEvent {
                summary: "Broken".to_string(),
                start_time: "not-a-timestamp".to_string(),
                end_time: "2025-05-15T11:00:00Z".to_string(),
                description: None,
                location: None,
            })
            .await;

        assert!(matches!(
            result,
            Err(CalendarSourceError::TimeParseError(_))
        ));
    }

    #[test]
    fn test_source_errors_map_to_shared_taxonomy() {
        let err = CalendarSourceError::TimeParseError("Invalid start_time".to_string());
        assert_eq!(err.status_code(), 400);
        assert!(matches!(
            AssistifyError::from(err),
            AssistifyError::ParseError(_)
        ));

        let err =
            CalendarSourceError::ValidationError("End time must be after start time".to_string());
        assert_eq!(err.status_code(), 400);
        assert_eq!(AssistifyError::from(err).status_code(), 400);
    }
}

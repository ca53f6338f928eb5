#[cfg(test)]
mod tests {
    use crate::routes::routes;
    use crate::service::mock::MockEventSource;
    use assistify_common::services::BoxedEventSource;
    use assistify_config::{AppConfig, CalendarConfig, ServerConfig};
    use std::sync::Arc;

    fn mock_config(use_calendar: bool) -> Arc<AppConfig> {
        Arc::new(AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            use_calendar,
            calendar: Some(CalendarConfig {
                calendar_id: Some("primary".to_string()),
                key_path: Some("test_key.json".to_string()),
                work_start_hour: None,
                work_end_hour: None,
            }),
        })
    }

    #[tokio::test]
    async fn test_routes_build_with_mock_source() {
        let source = Arc::new(BoxedEventSource(Arc::new(MockEventSource::new())));

        // Router construction must not touch the source or the network.
        let _router = routes(mock_config(true), source);
    }

    #[tokio::test]
    async fn test_routes_build_when_feature_disabled() {
        // The runtime flag is checked per request by the handlers, so the
        // router itself builds either way.
        let source = Arc::new(BoxedEventSource(Arc::new(MockEventSource::new())));

        let _router = routes(mock_config(false), source);
    }
}

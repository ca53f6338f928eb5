// File: services/assistify_backend/src/main.rs
use assistify_calendar::routes as calendar_routes;
use assistify_common::services::ServiceFactory;
use assistify_config::load_config;
use axum::{routing::get, Router};
use std::sync::Arc;
use tokio::net::TcpListener;

mod service_factory;
use service_factory::AssistifyServiceFactory;

#[tokio::main]
async fn main() {
    let config = Arc::new(load_config().expect("Failed to load config"));
    assistify_common::logging::init();

    let service_factory = AssistifyServiceFactory::new(config.clone()).await;

    let mut api_router = Router::new().route("/", get(|| async { "Welcome to Assistify API!" }));

    if let Some(event_source) = service_factory.event_source() {
        api_router = api_router.merge(calendar_routes::routes(config.clone(), event_source));
    }

    #[allow(unused_mut)] // for the openapi feature it needs to be mutable
    let mut app = Router::new().nest("/api", api_router);

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        use assistify_calendar::doc::CalendarApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        // Define the merged OpenAPI documentation struct
        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Assistify API",
                version = "0.1.0",
                description = "Assistify scheduling service API docs",
                license(name = "MIT", url = "https://opensource.org/licenses/MIT")
            ),
            components(),
            tags( (name = "Assistify", description = "Core service endpoints")),
            servers( (url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(CalendarApiDoc::openapi());
        println!("📖 Adding Swagger UI at /api/docs");

        let swagger_ui =
            SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc.clone());
        app = app.merge(swagger_ui);
    }

    // Bind and serve
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await.unwrap();
    println!("Starting server at http://{}", addr);
    println!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .unwrap();
}

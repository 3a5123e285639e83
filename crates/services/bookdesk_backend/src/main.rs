// File: services/bookdesk_backend/src/main.rs
use bookdesk_backend::{build_app, build_store};
use bookdesk_common::logging;
use bookdesk_config::load_config;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let config = match load_config() {
        Ok(config) => Arc::new(config),
        Err(e) => {
            eprintln!("Failed to load config: {}", e);
            return ExitCode::FAILURE;
        }
    };
    logging::init_from_name(&config.log_level);

    let store = match build_store(&config).await {
        Ok(store) => Arc::new(store),
        Err(e) => {
            logging::log_error(&e, "Failed to prepare the schedule store");
            return ExitCode::FAILURE;
        }
    };

    #[allow(unused_mut)] // only the openapi feature merges into it
    let mut app = build_app(config.clone(), store);

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        use bookdesk_schedule::doc::ScheduleApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Bookdesk API",
                version = "0.1.0",
                description = "Admin API for appointment dates and service requests",
                license(name = "MIT", url = "https://opensource.org/licenses/MIT")
            ),
            servers( (url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(ScheduleApiDoc::openapi());
        info!("Adding Swagger UI at /api/docs");

        let swagger_ui = SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc);
        app = app.merge(swagger_ui);
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    if let Err(e) = axum::serve(listener, app.into_make_service()).await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

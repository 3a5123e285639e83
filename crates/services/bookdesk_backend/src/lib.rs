// File: services/bookdesk_backend/src/lib.rs
//! Application assembly for the bookdesk server: the admin page at `/` with
//! its controller script, the API under `/api`, and optional static files
//! under `/static`.

use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use bookdesk_config::AppConfig;
use bookdesk_console::{render_regions, RuLocale, ViewModel};
use bookdesk_schedule::logic::{list_available_dates, list_requests, load_seed_requests};
use bookdesk_schedule::page::{render_admin_page, PageRegions};
use bookdesk_schedule::{routes as schedule_routes, InMemoryScheduleStore, ScheduleError, ScheduleStore};
use chrono::Utc;
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tracing::{info, warn};

/// Where the page loads its controller script from.
pub const SCRIPT_PATH: &str = "/admin.js";

/// Controller script driving the admin page against `/api`.
pub const ADMIN_SCRIPT: &str = include_str!("../static/admin.js");

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn ScheduleStore>,
    pub locale: RuLocale,
}

/// Builds the in-memory store, seeding requests when a seed file is configured.
pub async fn build_store(config: &AppConfig) -> Result<InMemoryScheduleStore, ScheduleError> {
    match &config.schedule.seed_requests_path {
        Some(path) => {
            let requests = load_seed_requests(Path::new(path)).await?;
            info!("Seeded {} service requests from {}", requests.len(), path);
            Ok(InMemoryScheduleStore::with_requests(requests))
        }
        None => Ok(InMemoryScheduleStore::new()),
    }
}

fn locale_for(config: &AppConfig) -> RuLocale {
    RuLocale::from_zone_name(&config.console.time_zone).unwrap_or_else(|e| {
        warn!("{}; falling back to Europe/Moscow", e);
        RuLocale::default()
    })
}

/// Renders the admin page with both lists already filled in.
#[axum::debug_handler]
async fn index_handler(State(state): State<Arc<AppState>>) -> Html<String> {
    let now = Utc::now();
    let mut view = ViewModel::default();

    match list_available_dates(state.store.as_ref(), now).await {
        Ok(dates) => view.replace_dates(dates),
        Err(e) => warn!("Admin page rendered without dates: {}", e),
    }
    match list_requests(state.store.as_ref()).await {
        Ok(requests) => view.requests = Some(requests),
        Err(e) => warn!("Admin page rendered without requests: {}", e),
    }

    let rendered = render_regions(&view, &state.locale);
    let regions = PageRegions {
        dates_grid: rendered.dates_grid,
        requests_list: rendered.requests_list,
        notice: rendered.notice,
        script_src: Some(SCRIPT_PATH.to_string()),
        time_zone: Some(state.locale.time_zone().name().to_string()),
    };
    let today = now.with_timezone(&state.locale.time_zone()).date_naive();
    Html(render_admin_page(today, &regions))
}

async fn admin_script_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        ADMIN_SCRIPT,
    )
}

/// Full application router.
pub fn build_app(config: Arc<AppConfig>, store: Arc<dyn ScheduleStore>) -> Router {
    let state = Arc::new(AppState {
        locale: locale_for(&config),
        config: config.clone(),
        store: store.clone(),
    });

    let mut app = Router::new()
        .route("/", get(index_handler))
        .route(SCRIPT_PATH, get(admin_script_handler))
        .with_state(state)
        .nest("/api", schedule_routes(config.clone(), store));

    if let Some(dir) = &config.server.static_dir {
        info!("Serving static files from {} at /static", dir);
        app = app.nest_service("/static", ServeDir::new(dir));
    }

    app
}

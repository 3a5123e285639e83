// Tests for the assembled application router.

use axum::{body::Body, http::Request, Router};
use bookdesk_backend::{build_app, build_store, ADMIN_SCRIPT, SCRIPT_PATH};
use bookdesk_config::AppConfig;
use bookdesk_schedule::InMemoryScheduleStore;
use http::StatusCode;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

async fn call(app: &Router, method: &str, uri: &str, body: Option<serde_json::Value>) -> (StatusCode, String) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn test_index_page_renders_current_dates() {
    let app = build_app(Arc::new(AppConfig::default()), Arc::new(InMemoryScheduleStore::new()));

    let (status, page) = call(&app, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("id=\"datesGrid\""));
    assert!(page.contains("Заявок пока нет"));
    assert!(page.contains(&format!("<script src=\"{}\"></script>", SCRIPT_PATH)));
    assert!(page.contains("data-time-zone=\"Europe/Moscow\""));

    let (status, _) = call(&app, "POST", "/api/add-date", Some(json!({"type": "week"}))).await;
    assert_eq!(status, StatusCode::OK);

    let (_, page) = call(&app, "GET", "/", None).await;
    assert_eq!(page.matches("Свободных слотов: 9 из 9").count(), 7);
}

/// Names of the functions called from inline `onclick`/`onchange` handlers.
fn handler_names(html: &str) -> Vec<String> {
    let mut names = Vec::new();
    for attr in ["onclick=\"", "onchange=\""] {
        for (start, _) in html.match_indices(attr) {
            let rest = &html[start + attr.len()..];
            let name: String = rest.chars().take_while(|c| c.is_alphanumeric() || *c == '_').collect();
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }
    names
}

#[tokio::test]
async fn test_every_page_handler_is_defined_by_the_script() {
    let app = build_app(Arc::new(AppConfig::default()), Arc::new(InMemoryScheduleStore::new()));
    call(&app, "POST", "/api/add-date", Some(json!({"type": "week"}))).await;

    let (status, script) = call(&app, "GET", SCRIPT_PATH, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(script, ADMIN_SCRIPT);

    let (_, page) = call(&app, "GET", "/", None).await;
    let mut names = handler_names(&page);
    names.extend(handler_names(ADMIN_SCRIPT));
    for expected in ["addNextWeek", "deleteSelected", "toggleSelectAll", "editSlots", "deleteDate"] {
        assert!(names.iter().any(|name| name == expected), "page lacks {}", expected);
    }
    for name in names {
        let defined = ADMIN_SCRIPT.contains(&format!("function {}(", name));
        assert!(defined, "{} is not defined by {}", name, SCRIPT_PATH);
    }
    for path in ["/dates", "/add-date", "/delete-date", "/update-slots", "/requests"] {
        assert!(ADMIN_SCRIPT.contains(&format!("'{}'", path)), "script never calls {}", path);
    }
}

#[tokio::test]
async fn test_static_dir_served_when_configured() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("logo.txt"), "bookdesk").unwrap();
    let mut config = AppConfig::default();
    config.server.static_dir = Some(dir.path().display().to_string());
    let app = build_app(Arc::new(config), Arc::new(InMemoryScheduleStore::new()));

    let (status, body) = call(&app, "GET", "/static/logo.txt", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "bookdesk");
}

#[tokio::test]
async fn test_store_without_seed_is_empty() {
    let store = build_store(&AppConfig::default()).await.unwrap();
    let app = build_app(Arc::new(AppConfig::default()), Arc::new(store));
    let (status, body) = call(&app, "GET", "/api/requests", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "[]");
}

#[tokio::test]
async fn test_missing_seed_file_fails() {
    let mut config = AppConfig::default();
    config.schedule.seed_requests_path = Some("/nonexistent/requests.json".to_string());
    assert!(build_store(&config).await.is_err());
}

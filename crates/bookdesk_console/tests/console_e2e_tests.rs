// Drives the console over HTTP against a live schedule service.

use axum::Router;
use bookdesk_common::HTTP_CLIENT;
use bookdesk_config::AppConfig;
use bookdesk_console::{ActionOutcome, AdminConsole, HttpAdminApi, RuLocale, ScriptedDialogs};
use bookdesk_schedule::{routes, InMemoryScheduleStore};
use std::sync::Arc;
use tokio::net::TcpListener;

async fn spawn_server() -> String {
    let app = Router::new().nest(
        "/api",
        routes(Arc::new(AppConfig::default()), Arc::new(InMemoryScheduleStore::new())),
    );
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_week_edit_and_bulk_delete_round() {
    let base_url = spawn_server().await;
    let api = HttpAdminApi::new(HTTP_CLIENT.clone(), base_url);
    let mut console = AdminConsole::new(api, ScriptedDialogs::answering([true]), RuLocale::default());

    console.init().await.unwrap();
    assert!(console.view().cards().is_empty());
    assert!(console.render().requests_list.contains("Заявок пока нет"));

    console.add_next_week().await.unwrap();
    assert_eq!(console.view().cards().len(), 7);
    assert!(console.render().dates_grid.contains("Свободных слотов: 9 из 9"));

    let first = console.view().cards()[0].entry.id.clone();
    console.edit_slots(&first).await.unwrap();
    console.set_slot_checked(0, true);
    console.set_slot_checked(8, true);
    console.save_slots(&first).await.unwrap();
    assert!(!console.view().modal_visible);
    let card = &console.view().cards()[0];
    assert_eq!(card.entry.id, first);
    assert_eq!(card.entry.free_slots(), 7);

    let doomed: Vec<String> = console.view().cards()[..3]
        .iter()
        .map(|card| card.entry.id.clone())
        .collect();
    for id in &doomed {
        console.toggle_date_selection(id, true);
    }
    assert_eq!(console.delete_selected().await.unwrap(), ActionOutcome::Completed);
    assert_eq!(console.view().cards().len(), 4);
    assert!(console
        .view()
        .cards()
        .iter()
        .all(|card| !doomed.contains(&card.entry.id)));
}

#[tokio::test]
async fn test_unreachable_server_sets_notice() {
    // bind then drop to get a port nobody listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = HttpAdminApi::new(HTTP_CLIENT.clone(), format!("http://{}", addr));
    let mut console = AdminConsole::new(api, ScriptedDialogs::default(), RuLocale::default());

    assert!(console.init().await.is_err());
    assert!(console.render().notice.contains("notice error"));
    assert!(console.dialogs().alerts().is_empty());
}

#[cfg(test)]
mod tests {
    use crate::routes::routes;
    use crate::store::{InMemoryScheduleStore, ScheduleStore};
    use axum::{body::Body, http::Request, Router};
    use bookdesk_common::models::{DateEntry, ServiceRequest};
    use bookdesk_config::AppConfig;
    use http::StatusCode;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app_with_store(store: Arc<InMemoryScheduleStore>) -> Router {
        routes(Arc::new(AppConfig::default()), store)
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(match body {
                Some(value) => Body::from(value.to_string()),
                None => Body::empty(),
            })
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    async fn list_dates(app: &Router) -> Vec<DateEntry> {
        let (status, body) = send(app, "GET", "/dates", None).await;
        assert_eq!(status, StatusCode::OK);
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_add_week_then_list() {
        let app = app_with_store(Arc::new(InMemoryScheduleStore::new()));

        let (status, body) = send(&app, "POST", "/add-date", Some(json!({"type": "week"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.is_empty());

        let dates = list_dates(&app).await;
        assert_eq!(dates.len(), 7);
        assert!(dates.windows(2).all(|pair| pair[0].date <= pair[1].date));
        assert!(dates.iter().all(|d| d.is_active && d.total_slots() == 9 && d.free_slots() == 9));
    }

    #[tokio::test]
    async fn test_add_custom_date_generates_range() {
        let app = app_with_store(Arc::new(InMemoryScheduleStore::new()));
        let body = json!({
            "type": "custom",
            "date": "2099-05-04",
            "startTime": "10:00",
            "endTime": "12:00",
            "interval": 30
        });
        let (status, _) = send(&app, "POST", "/add-date", Some(body)).await;
        assert_eq!(status, StatusCode::OK);

        let dates = list_dates(&app).await;
        assert_eq!(dates.len(), 1);
        let times: Vec<&str> = dates[0].time_slots.iter().map(|s| s.time.as_str()).collect();
        assert_eq!(times, vec!["10:00", "10:30", "11:00", "11:30"]);
    }

    #[tokio::test]
    async fn test_add_custom_date_requires_date() {
        let app = app_with_store(Arc::new(InMemoryScheduleStore::new()));
        let (status, _) = send(
            &app,
            "POST",
            "/add-date",
            Some(json!({"type": "custom", "date": "", "startTime": "09:00", "endTime": "10:00"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            "POST",
            "/add-date",
            Some(json!({"type": "custom", "date": "04/05/2099"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(list_dates(&app).await.is_empty());
    }

    #[tokio::test]
    async fn test_delete_date_hides_it() {
        let app = app_with_store(Arc::new(InMemoryScheduleStore::new()));
        send(&app, "POST", "/add-date", Some(json!({"type": "week"}))).await;
        let dates = list_dates(&app).await;

        let (status, _) = send(&app, "POST", "/delete-date", Some(json!({"id": dates[0].id}))).await;
        assert_eq!(status, StatusCode::OK);

        let remaining = list_dates(&app).await;
        assert_eq!(remaining.len(), 6);
        assert!(remaining.iter().all(|d| d.id != dates[0].id));
    }

    #[tokio::test]
    async fn test_delete_date_rejects_bad_and_unknown_ids() {
        let app = app_with_store(Arc::new(InMemoryScheduleStore::new()));

        let (status, body) = send(&app, "POST", "/delete-date", Some(json!({"id": "d1"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(error["error"]["code"], 400);

        let unknown = uuid::Uuid::new_v4().to_string();
        let (status, _) = send(&app, "POST", "/delete-date", Some(json!({"id": unknown}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_slots_by_index() {
        let app = app_with_store(Arc::new(InMemoryScheduleStore::new()));
        send(
            &app,
            "POST",
            "/add-date",
            Some(json!({"type": "custom", "date": "2099-01-01", "startTime": "10:00", "endTime": "13:00", "interval": 60})),
        )
        .await;
        let id = list_dates(&app).await[0].id.clone();

        let body = json!({
            "dateId": id,
            "slots": [
                {"index": 0, "is_booked": true},
                {"index": 1, "is_booked": false},
                {"index": 2, "is_booked": true},
                {"index": 7, "is_booked": true}
            ]
        });
        let (status, _) = send(&app, "POST", "/update-slots", Some(body)).await;
        assert_eq!(status, StatusCode::OK);

        let entry = &list_dates(&app).await[0];
        let booked: Vec<bool> = entry.time_slots.iter().map(|s| s.is_booked).collect();
        assert_eq!(booked, vec![true, false, true]);
        assert_eq!(entry.free_slots(), 1);
    }

    #[tokio::test]
    async fn test_requests_listing() {
        let request: ServiceRequest = serde_json::from_value(json!({
            "name": "Анна",
            "contact": "+7 900 000-00-00",
            "volvo_model": "XC90",
            "year": "2019",
            "problem": "Стук в подвеске",
            "created_at": "2025-01-15T10:30:00Z",
            "status": "completed"
        }))
        .unwrap();
        let store = Arc::new(InMemoryScheduleStore::with_requests(vec![request]));
        assert_eq!(store.all_requests().await.unwrap().len(), 1);
        let app = app_with_store(store);

        let (status, body) = send(&app, "GET", "/requests", None).await;
        assert_eq!(status, StatusCode::OK);
        let listed: Vec<ServiceRequest> = serde_json::from_slice(&body).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].volvo_model, "XC90");
        assert!(!listed[0].id.is_empty());
    }

    #[tokio::test]
    async fn test_huge_custom_interval_does_not_fail_the_request() {
        let app = app_with_store(Arc::new(InMemoryScheduleStore::new()));
        let body = json!({
            "type": "custom",
            "date": "2099-05-04",
            "startTime": "00:01",
            "endTime": "10:00",
            "interval": i64::MAX
        });
        let (status, _) = send(&app, "POST", "/add-date", Some(body)).await;
        assert_eq!(status, StatusCode::OK);

        let dates = list_dates(&app).await;
        let times: Vec<&str> = dates[0].time_slots.iter().map(|s| s.time.as_str()).collect();
        assert_eq!(times, vec!["00:01"]);
    }

    #[tokio::test]
    async fn test_submit_then_book_a_slot() {
        let app = app_with_store(Arc::new(InMemoryScheduleStore::new()));
        let custom = json!({
            "type": "custom",
            "date": "2099-05-04",
            "startTime": "10:00",
            "endTime": "12:00",
            "interval": 60
        });
        send(&app, "POST", "/add-date", Some(custom)).await;
        let date_id = list_dates(&app).await[0].id.clone();

        let (status, body) = send(
            &app,
            "POST",
            "/requests",
            Some(json!({"name": "Анна", "contact": "@anna", "volvo_model": "XC60"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let created: ServiceRequest = serde_json::from_slice(&body).unwrap();
        assert_eq!(created.status, "in_progress");
        assert_eq!(created.stage, 4);

        let booking = json!({"requestId": created.id, "dateId": date_id, "time": "11:00"});
        let (status, body) = send(&app, "POST", "/book", Some(booking.clone())).await;
        assert_eq!(status, StatusCode::OK);
        let booked: ServiceRequest = serde_json::from_slice(&body).unwrap();
        assert_eq!(booked.status, "completed");
        assert_eq!(booked.stage, 5);
        assert_eq!(
            booked.appointment_date.unwrap().to_rfc3339(),
            "2099-05-04T11:00:00+00:00"
        );

        let entry = &list_dates(&app).await[0];
        assert!(!entry.time_slots[0].is_booked);
        assert!(entry.time_slots[1].is_booked);

        // the request is closed now
        let (status, _) = send(&app, "POST", "/book", Some(booking)).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_booking_errors() {
        let app = app_with_store(Arc::new(InMemoryScheduleStore::new()));
        send(&app, "POST", "/add-date", Some(json!({"type": "week"}))).await;
        let date_id = list_dates(&app).await[0].id.clone();

        let (status, _) = send(&app, "POST", "/requests", Some(json!({"name": "Олег"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, body) = send(
            &app,
            "POST",
            "/requests",
            Some(json!({"name": "Олег", "contact": "+7 901"})),
        )
        .await;
        let first: ServiceRequest = serde_json::from_slice(&body).unwrap();
        let (_, body) = send(
            &app,
            "POST",
            "/requests",
            Some(json!({"name": "Ира", "contact": "+7 902"})),
        )
        .await;
        let second: ServiceRequest = serde_json::from_slice(&body).unwrap();

        let book = |request_id: &str, date_id: &str, time: &str| {
            json!({"requestId": request_id, "dateId": date_id, "time": time})
        };
        let (status, _) = send(&app, "POST", "/book", Some(book("missing", &date_id, "09:00"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(&app, "POST", "/book", Some(book(&first.id, "bad", "09:00"))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = send(&app, "POST", "/book", Some(book(&first.id, &date_id, "08:00"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, "POST", "/book", Some(book(&first.id, &date_id, "09:00"))).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app, "POST", "/book", Some(book(&second.id, &date_id, "09:00"))).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, body) =
            send(&app, "POST", "/cancel-request", Some(json!({"id": second.id}))).await;
        assert_eq!(status, StatusCode::OK);
        let cancelled: ServiceRequest = serde_json::from_slice(&body).unwrap();
        assert_eq!(cancelled.status, "cancelled");
        let (status, _) =
            send(&app, "POST", "/cancel-request", Some(json!({"id": second.id}))).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_post_only_routes_reject_get() {
        let app = app_with_store(Arc::new(InMemoryScheduleStore::new()));
        let (status, _) = send(&app, "GET", "/add-date", None).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }
}

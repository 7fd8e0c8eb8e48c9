//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint through the router.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use entry_service::{api::create_router, models::Entry, AppState};
use serde_json::Value;
use std::time::Duration;
use tower::ServiceExt;
use uuid::Uuid;

// == Helper Functions ==

fn create_test_app() -> (AppState, Router) {
    create_test_app_with_ttl(Duration::from_secs(30))
}

fn create_test_app_with_ttl(ttl: Duration) -> (AppState, Router) {
    let state = AppState::in_memory(ttl).unwrap();
    let app = create_router(state.clone());
    (state, app)
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_is_empty(body: Body) -> bool {
    axum::body::to_bytes(body, usize::MAX).await.unwrap().is_empty()
}

async fn send(app: &Router, method: &str, uri: &str, json: Option<&str>) -> axum::response::Response {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match json {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.clone().oneshot(builder.body(body).unwrap()).await.unwrap()
}

async fn create_entry(app: &Router, text: &str) {
    let body = serde_json::json!({ "text": text }).to_string();
    let response = send(app, "POST", "/new", Some(&body)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

async fn list_all(app: &Router) -> Vec<Value> {
    let response = send(app, "GET", "/all", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_to_json(response.into_body())
        .await
        .as_array()
        .unwrap()
        .clone()
}

fn iso(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

// == POST /new and GET /entry/:uuid ==

#[tokio::test]
async fn test_create_then_get_returns_same_text() {
    let (state, app) = create_test_app();

    let response = send(&app, "POST", "/new", Some(r#"{"text":"round trip"}"#)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert!(body_is_empty(response.into_body()).await);

    let id = state.store.list_all().unwrap()[0].uuid;
    let response = send(&app, "GET", &format!("/entry/{id}"), None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["uuid"].as_str().unwrap(), id.to_string());
    assert_eq!(json["text"].as_str().unwrap(), "round trip");
}

#[tokio::test]
async fn test_created_ids_are_fresh() {
    let (state, app) = create_test_app();
    for i in 0..10 {
        create_entry(&app, &format!("entry-{i}")).await;
    }

    let mut ids: Vec<Uuid> = state
        .store
        .list_all()
        .unwrap()
        .into_iter()
        .map(|entry| entry.uuid)
        .collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 10);
}

#[tokio::test]
async fn test_create_without_text_is_rejected() {
    let (_, app) = create_test_app();
    let response = send(&app, "POST", "/new", Some(r#"{"body":"wrong field"}"#)).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_get_missing_entry_is_not_found() {
    let (_, app) = create_test_app();
    let response = send(&app, "GET", &format!("/entry/{}", Uuid::new_v4()), None).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["error"], "No entry with such uuid found");
}

#[tokio::test]
async fn test_get_with_malformed_uuid() {
    let (_, app) = create_test_app();
    let response = send(&app, "GET", "/entry/12345", None).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// == GET /entries/:count ==

#[tokio::test]
async fn test_entries_count_and_offset() {
    let (_, app) = create_test_app();
    for i in 0..5 {
        create_entry(&app, &format!("entry-{i}")).await;
    }

    for count in 0..8 {
        let response = send(&app, "GET", &format!("/entries/{count}"), None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_to_json(response.into_body()).await;
        assert!(json.as_array().unwrap().len() <= count);
    }

    let response = send(&app, "GET", "/entries/2?offset=3", None).await;
    let json = body_to_json(response.into_body()).await;
    let texts: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["text"].as_str().unwrap())
        .collect();
    assert_eq!(texts, vec!["entry-3", "entry-4"]);
}

#[tokio::test]
async fn test_entries_negative_count_or_offset() {
    let (_, app) = create_test_app();

    let response = send(&app, "GET", "/entries/-3", None).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = send(&app, "GET", "/entries/3?offset=-1", None).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// == GET /by_filters ==

#[tokio::test]
async fn test_by_filters_inverted_range_fails() {
    let (_, app) = create_test_app();
    let start = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();

    let uri = format!(
        "/by_filters?start_datetime={}&end_datetime={}",
        iso(start),
        iso(end)
    );
    let response = send(&app, "GET", &uri, None).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["error"], "Start date must be less than end date");
}

#[tokio::test]
async fn test_by_filters_returns_entries_inside_range() {
    let (state, app) = create_test_app();
    let entries: Vec<Entry> = (1..=5)
        .map(|day| {
            Entry::with_timestamp(
                format!("day-{day}"),
                Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap(),
            )
        })
        .collect();
    for entry in &entries {
        state.store.insert(entry).unwrap();
    }

    let start = entries[1].creation_datetime;
    let end = entries[3].creation_datetime;
    let uri = format!(
        "/by_filters?start_datetime={}&end_datetime={}",
        iso(start),
        iso(end)
    );
    let response = send(&app, "GET", &uri, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    let texts: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["text"].as_str().unwrap())
        .collect();
    assert_eq!(texts, vec!["day-2", "day-3", "day-4"]);
}

#[tokio::test]
async fn test_by_filters_without_start_uses_end_only() {
    let (state, app) = create_test_app();
    for day in 1..=3 {
        let entry = Entry::with_timestamp(
            format!("day-{day}"),
            Utc.with_ymd_and_hms(2024, 3, day, 0, 0, 0).unwrap(),
        );
        state.store.insert(&entry).unwrap();
    }

    let response = send(&app, "GET", "/by_filters?end_datetime=2024-03-02T00:00:00", None).await;
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json.as_array().unwrap().len(), 2);

    let response = send(&app, "GET", "/by_filters", None).await;
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_by_filters_invalid_timestamp() {
    let (_, app) = create_test_app();
    let response = send(&app, "GET", "/by_filters?start_datetime=last-week", None).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// == PUT /update/:uuid ==

#[tokio::test]
async fn test_update_then_get_returns_new_text() {
    let (state, app) = create_test_app();
    create_entry(&app, "before").await;
    let id = state.store.list_all().unwrap()[0].uuid;

    let body = format!(r#"{{"entry":{{"uuid":"{id}","text":"after"}}}}"#);
    let response = send(&app, "PUT", &format!("/update/{id}"), Some(&body)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_is_empty(response.into_body()).await);

    let response = send(&app, "GET", &format!("/entry/{id}"), None).await;
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["text"], "after");
}

#[tokio::test]
async fn test_update_unknown_id_is_silent() {
    let (state, app) = create_test_app();
    let response = send(
        &app,
        "PUT",
        &format!("/update/{}", Uuid::new_v4()),
        Some(r#"{"entry":{"text":"ghost"}}"#),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(state.store.list_all().unwrap().is_empty());
}

// == DELETE /:uuid ==

#[tokio::test]
async fn test_delete_twice_then_not_found() {
    let (state, app) = create_test_app();
    create_entry(&app, "short lived").await;
    let id = state.store.list_all().unwrap()[0].uuid;

    for _ in 0..2 {
        let response = send(&app, "DELETE", &format!("/{id}"), None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = send(&app, "GET", &format!("/entry/{id}"), None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

// == Response Cache ==

#[tokio::test]
async fn test_end_to_end_with_cache_expiry() {
    let ttl = Duration::from_millis(200);
    let (_, app) = create_test_app_with_ttl(ttl);

    for i in 0..5 {
        create_entry(&app, &format!("e2e-{i}")).await;
    }
    let all = list_all(&app).await;
    assert_eq!(all.len(), 5);

    for entry in &all {
        let uri = format!("/{}", entry["uuid"].as_str().unwrap());
        let response = send(&app, "DELETE", &uri, None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    tokio::time::sleep(ttl + Duration::from_millis(100)).await;
    assert!(list_all(&app).await.is_empty());
}

#[tokio::test]
async fn test_list_all_is_stale_until_expiry() {
    let ttl = Duration::from_millis(200);
    let (_, app) = create_test_app_with_ttl(ttl);

    create_entry(&app, "first").await;
    assert_eq!(list_all(&app).await.len(), 1);

    create_entry(&app, "second").await;
    assert_eq!(list_all(&app).await.len(), 1, "cached body is served");

    tokio::time::sleep(ttl + Duration::from_millis(100)).await;
    assert_eq!(list_all(&app).await.len(), 2, "recomputed after expiry");
}

#[tokio::test]
async fn test_by_filters_is_cached_per_parameters() {
    let (state, app) = create_test_app();
    let day = |d| Utc.with_ymd_and_hms(2024, 3, d, 0, 0, 0).unwrap();
    state
        .store
        .insert(&Entry::with_timestamp("early", day(1)))
        .unwrap();

    let uri_a = format!("/by_filters?start_datetime={}", iso(day(1)));
    let first = body_to_json(send(&app, "GET", &uri_a, None).await.into_body()).await;
    assert_eq!(first.as_array().unwrap().len(), 1);

    state
        .store
        .insert(&Entry::with_timestamp("later", day(2)))
        .unwrap();

    let again = body_to_json(send(&app, "GET", &uri_a, None).await.into_body()).await;
    assert_eq!(again.as_array().unwrap().len(), 1, "same parameters hit the cache");

    let uri_b = format!("/by_filters?start_datetime={}", iso(day(2)));
    let other = body_to_json(send(&app, "GET", &uri_b, None).await.into_body()).await;
    assert_eq!(other.as_array().unwrap().len(), 1);
    assert_eq!(other[0]["text"], "later");

    let stats = state.cache.read().await.stats();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 2);
}

// == Malformed Input ==

async fn assert_unprocessable_with_json_error(response: axum::response::Response) {
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_to_json(response.into_body()).await;
    assert!(
        json["error"].as_str().is_some_and(|message| !message.is_empty()),
        "expected a JSON error message, got {json}"
    );
}

#[tokio::test]
async fn test_new_with_broken_json_body() {
    let (_, app) = create_test_app();
    let response = send(&app, "POST", "/new", Some("{not json")).await;
    assert_unprocessable_with_json_error(response).await;
}

#[tokio::test]
async fn test_new_without_content_type() {
    let (_, app) = create_test_app();
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/new")
                .body(Body::from(r#"{"text":"no header"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_unprocessable_with_json_error(response).await;
}

#[tokio::test]
async fn test_entries_with_non_numeric_count() {
    let (_, app) = create_test_app();
    let response = send(&app, "GET", "/entries/abc", None).await;
    assert_unprocessable_with_json_error(response).await;
}

#[tokio::test]
async fn test_entries_with_non_numeric_offset() {
    let (_, app) = create_test_app();
    let response = send(&app, "GET", "/entries/3?offset=x", None).await;
    assert_unprocessable_with_json_error(response).await;
}

#[tokio::test]
async fn test_update_with_broken_json_body() {
    let (_, app) = create_test_app();
    let uri = format!("/update/{}", Uuid::new_v4());
    let response = send(&app, "PUT", &uri, Some("{bad")).await;
    assert_unprocessable_with_json_error(response).await;
}

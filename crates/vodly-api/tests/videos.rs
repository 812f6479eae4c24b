//! Router tests for the video record endpoints.

mod common;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use tower::ServiceExt;
use uuid::Uuid;

use vodly_models::VideoRecord;

use common::*;

fn json_request(method: Method, uri: String, token: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: Method, uri: String, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn create_video_returns_the_new_record() {
    let user_id = Uuid::new_v4();

    let mut store = MockStore::new();
    store
        .expect_create()
        .withf(move |r: &VideoRecord| {
            r.user_id == user_id && r.title == "launch footage" && r.video_url.is_none()
        })
        .times(1)
        .returning(|_| Ok(()));

    let app = app(store, MockStorage::new(), MockMedia::new());
    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/videos".to_string(),
            &token_for(user_id),
            serde_json::json!({ "title": "launch footage" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["title"], "launch footage");
    assert_eq!(json["user_id"], user_id.to_string());
    assert!(json["video_url"].is_null());
}

#[tokio::test]
async fn create_video_rejects_blank_titles() {
    let mut store = MockStore::new();
    store.expect_create().never();

    let app = app(store, MockStorage::new(), MockMedia::new());
    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/videos".to_string(),
            &token_for(Uuid::new_v4()),
            serde_json::json!({ "title": "   " }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_returns_only_the_callers_videos() {
    let user_id = Uuid::new_v4();
    let records = vec![record_owned_by(user_id), record_owned_by(user_id)];

    let mut store = MockStore::new();
    let listed = records.clone();
    store
        .expect_list_for_user()
        .withf(move |id| *id == user_id)
        .times(1)
        .returning(move |_| Ok(listed.clone()));

    let app = app(store, MockStorage::new(), MockMedia::new());
    let response = app
        .oneshot(empty_request(
            Method::GET,
            "/api/videos".to_string(),
            &token_for(user_id),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["videos"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn get_video_enforces_ownership() {
    let owner = Uuid::new_v4();
    let record = record_owned_by(owner);
    let video_id = record.id;

    let mut store = MockStore::new();
    store.expect_get().returning(move |_| Ok(Some(record.clone())));

    let app = app(store, MockStorage::new(), MockMedia::new());
    let response = app
        .oneshot(empty_request(
            Method::GET,
            format!("/api/videos/{video_id}"),
            &token_for(Uuid::new_v4()),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn delete_removes_the_stored_object_and_the_record() {
    let user_id = Uuid::new_v4();
    let mut record = record_owned_by(user_id);
    record.video_url = Some("https://cdn.example.com/landscape/abc123.mp4".to_string());
    let video_id = record.id;

    let mut store = MockStore::new();
    store.expect_get().returning(move |_| Ok(Some(record.clone())));
    store
        .expect_delete()
        .withf(move |id| *id == video_id)
        .times(1)
        .returning(|_| Ok(true));

    let mut storage = MockStorage::new();
    storage
        .expect_delete()
        .withf(|key| key == "landscape/abc123.mp4")
        .times(1)
        .returning(|_| Ok(()));

    let app = app(store, storage, MockMedia::new());
    let response = app
        .oneshot(empty_request(
            Method::DELETE,
            format!("/api/videos/{video_id}"),
            &token_for(user_id),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["deleted"], true);
    assert_eq!(json["video_id"], video_id.to_string());
}

#[tokio::test]
async fn delete_without_a_stored_object_skips_storage() {
    let user_id = Uuid::new_v4();
    let record = record_owned_by(user_id);
    let video_id = record.id;

    let mut store = MockStore::new();
    store.expect_get().returning(move |_| Ok(Some(record.clone())));
    store.expect_delete().returning(|_| Ok(true));

    let mut storage = MockStorage::new();
    storage.expect_delete().never();

    let app = app(store, storage, MockMedia::new());
    let response = app
        .oneshot(empty_request(
            Method::DELETE,
            format!("/api/videos/{video_id}"),
            &token_for(user_id),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn malformed_video_id_is_a_bad_request() {
    let app = app(MockStore::new(), MockStorage::new(), MockMedia::new());
    let response = app
        .oneshot(empty_request(
            Method::GET,
            "/api/videos/not-a-uuid".to_string(),
            &token_for(Uuid::new_v4()),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

use super::*;
use crate::backend::Table;
use crate::backend::memory::Op;
use crate::routes::api_routes;
use crate::routes::test_support::{request, send};
use crate::state::test_helpers;
use axum::http::Method;
use serde_json::{Value, json};

fn beach_body(categories: Value) -> Value {
    json!({
        "basics": {
            "name": "Beach",
            "destination": "Miami",
            "start_date": "2025-06-01",
            "end_date": "2025-06-07"
        },
        "invitees": [],
        "categories": categories
    })
}

fn default_categories() -> Value {
    serde_json::to_value(model::CategoryDraft::defaults()).unwrap()
}

#[tokio::test]
async fn create_answers_created_with_trip_id() {
    let (state, backend, _user, token) = test_helpers::signed_in_app_state().await;
    let req = request(Method::POST, "/api/trips", Some(&token), Some(beach_body(default_categories())));
    let (status, _, json) = send(api_routes(state), req).await;

    assert_eq!(status, StatusCode::CREATED);
    let trip_id = json["trip_id"].as_str().unwrap();
    assert_eq!(backend.rows(Table::Trips).await[0]["id"], trip_id);
    assert_eq!(backend.rows(Table::Categories).await.len(), 5);
}

#[tokio::test]
async fn create_without_categories_is_bad_request_and_silent() {
    let (state, backend, _user, token) = test_helpers::signed_in_app_state().await;
    let req = request(Method::POST, "/api/trips", Some(&token), Some(beach_body(json!([]))));
    let (status, _, json) = send(api_routes(state), req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Please select at least one category");
    assert!(backend.calls().await.is_empty());
}

#[tokio::test]
async fn create_requires_session() {
    let (state, _backend) = test_helpers::memory_app_state();
    let req = request(Method::POST, "/api/trips", None, Some(beach_body(default_categories())));
    let (status, _, _) = send(api_routes(state), req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn list_returns_created_trip() {
    let (state, _backend, _user, token) = test_helpers::signed_in_app_state().await;
    let router = api_routes(state);
    let req = request(Method::POST, "/api/trips", Some(&token), Some(beach_body(default_categories())));
    send(router.clone(), req).await;

    let (status, _, json) = send(router, request(Method::GET, "/api/trips", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().map(Vec::len), Some(1));
    assert_eq!(json[0]["destination"], "Miami");
}

#[tokio::test]
async fn detail_of_missing_trip_is_404() {
    let (state, _backend, _user, token) = test_helpers::signed_in_app_state().await;
    let (status, _, json) = send(api_routes(state), request(Method::GET, "/api/trips/nope", Some(&token), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Trip not found");
}

#[tokio::test]
async fn detail_for_non_member_is_403() {
    let (state, backend, _user, token) = test_helpers::signed_in_app_state().await;
    let router = api_routes(state);
    let req = request(Method::POST, "/api/trips", Some(&token), Some(beach_body(default_categories())));
    let (_, _, created) = send(router.clone(), req).await;
    let trip_id = created["trip_id"].as_str().unwrap().to_owned();

    let stranger = backend.add_user("stranger@example.com", "pw", None).await;
    let stranger_token = backend.issue_token(&stranger.id).await;
    let uri = format!("/api/trips/{trip_id}");
    let (status, _, _) = send(router, request(Method::GET, &uri, Some(&stranger_token), None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn detail_and_board_for_member() {
    let (state, backend, _user, token) = test_helpers::signed_in_app_state().await;
    let router = api_routes(state);
    let req = request(Method::POST, "/api/trips", Some(&token), Some(beach_body(default_categories())));
    let (_, _, created) = send(router.clone(), req).await;
    let trip_id = created["trip_id"].as_str().unwrap().to_owned();

    let (status, _, detail) = send(router.clone(), request(Method::GET, &format!("/api/trips/{trip_id}"), Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["member_count"], 1);
    assert_eq!(detail["categories"][0]["category"]["name"], "Lodging");
    assert_eq!(detail["categories"][0]["task_count"], 0);

    let category_id = detail["categories"][0]["category"]["id"].as_str().unwrap().to_owned();
    backend.clear_calls().await;
    let uri = format!("/api/trips/{trip_id}/categories/{category_id}");
    let (status, _, board) = send(router, request(Method::GET, &uri, Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(board["trip"]["name"], "Beach");
    assert_eq!(board["tasks"], json!([]));
    assert_eq!(board["members"][0]["full_name"], "Ada");
    assert_eq!(backend.calls_to(Op::Select, Table::Tasks).await.len(), 1);
}

#[tokio::test]
async fn board_for_unknown_category_is_404() {
    let (state, _backend, _user, token) = test_helpers::signed_in_app_state().await;
    let uri = "/api/trips/t/categories/missing";
    let (status, _, json) = send(api_routes(state), request(Method::GET, uri, Some(&token), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Category not found");
}

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use complaint_cell::create_complaint_router;
use shared_utils::test_utils::{MockStoreResponses, TestConfig};

fn test_router(store_url: &str) -> Router {
    create_complaint_router(TestConfig::with_store(store_url).to_arc())
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn post_complaint_returns_complaint_envelope() {
    let mock_server = MockServer::start().await;
    let app = test_router(&mock_server.uri());

    Mock::given(method("POST"))
        .and(path("/rest/v1/complaints"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            MockStoreResponses::complaint_row(1, 7, "Long waiting time")
        ])))
        .mount(&mock_server)
        .await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/complaint",
            json!({ "user_id": 7, "subject": "Long waiting time" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Complaint created successfully");
    assert_eq!(body["complaint"]["subject"], "Long waiting time");
    assert_eq!(body["complaint"]["status"], "Open");
}

#[tokio::test]
async fn get_complaints_empty_collection_is_not_found() {
    let mock_server = MockServer::start().await;
    let app = test_router(&mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/rest/v1/complaints"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/complaints")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = response_json(response).await;
    assert_eq!(body["message"], "No complaints found");
}

#[tokio::test]
async fn get_complaint_with_non_numeric_id_is_bad_request() {
    let mock_server = MockServer::start().await;
    let app = test_router(&mock_server.uri());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/complaint/abc")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Invalid ID");
}

#[tokio::test]
async fn put_complaint_returns_bare_record() {
    let mock_server = MockServer::start().await;
    let app = test_router(&mock_server.uri());

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/complaints"))
        .and(query_param("complaint_id", "eq.1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "complaint_id": 1,
            "user_id": 7,
            "related_appointment_id": null,
            "subject": "Long waiting time",
            "description": null,
            "status": "Resolved"
        }])))
        .mount(&mock_server)
        .await;

    let response = app
        .oneshot(json_request(
            "PUT",
            "/complaint/1",
            json!({ "status": "Resolved" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["complaint_id"], 1);
    assert_eq!(body["status"], "Resolved");
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn delete_complaint_with_non_numeric_id_is_bad_request() {
    let mock_server = MockServer::start().await;
    let app = test_router(&mock_server.uri());

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/complaint/abc")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // Guarded here, unlike the appointment and payment deletes.
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Invalid ID");
}

#[tokio::test]
async fn delete_complaint_answers_no_content() {
    let mock_server = MockServer::start().await;
    let app = test_router(&mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/rest/v1/complaints"))
        .and(query_param("complaint_id", "eq.1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreResponses::complaint_row(1, 7, "Long waiting time")
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/complaints"))
        .and(query_param("complaint_id", "eq.1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreResponses::complaint_row(1, 7, "Long waiting time")
        ])))
        .mount(&mock_server)
        .await;

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/complaint/1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

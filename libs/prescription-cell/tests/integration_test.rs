use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use prescription_cell::create_prescription_router;
use shared_utils::test_utils::{MockStoreResponses, TestConfig};

fn test_router(store_url: &str) -> Router {
    create_prescription_router(TestConfig::with_store(store_url).to_arc())
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
async fn post_prescription_returns_created_envelope() {
    let mock_server = MockServer::start().await;
    let app = test_router(&mock_server.uri());

    Mock::given(method("POST"))
        .and(path("/rest/v1/prescriptions"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!([MockStoreResponses::prescription_row(1, 4, 2, 7)])),
        )
        .mount(&mock_server)
        .await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/prescription",
            json!({ "appointment_id": 4, "doctor_id": 2, "patient_id": 7 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Prescription created successfully");
    assert_eq!(body["data"]["appointment_id"], 4);
}

#[tokio::test]
async fn get_prescriptions_empty_collection_is_not_found() {
    let mock_server = MockServer::start().await;
    let app = test_router(&mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/rest/v1/prescriptions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/prescriptions")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // Empty listings 404 here where appointments and payments answer 200.
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = response_json(response).await;
    assert_eq!(body["message"], "No prescriptions found");
}

#[tokio::test]
async fn get_prescriptions_returns_rows_when_present() {
    let mock_server = MockServer::start().await;
    let app = test_router(&mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/rest/v1/prescriptions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreResponses::prescription_row(1, 4, 2, 7),
            MockStoreResponses::prescription_row(2, 5, 2, 8)
        ])))
        .mount(&mock_server)
        .await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/prescriptions")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn get_prescription_with_non_numeric_id_is_bad_request() {
    let mock_server = MockServer::start().await;
    let app = test_router(&mock_server.uri());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/prescription/abc")
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
async fn put_prescription_with_non_numeric_id_is_bad_request() {
    let mock_server = MockServer::start().await;
    let app = test_router(&mock_server.uri());

    let response = app
        .oneshot(json_request(
            "PUT",
            "/prescription/abc",
            json!({ "notes": "2 tablets, once daily" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Invalid ID");
}

#[tokio::test]
async fn delete_prescription_with_non_numeric_id_is_bad_request() {
    let mock_server = MockServer::start().await;
    let app = test_router(&mock_server.uri());

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/prescription/abc")
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
async fn delete_prescription_answers_no_content() {
    let mock_server = MockServer::start().await;
    let app = test_router(&mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/rest/v1/prescriptions"))
        .and(query_param("prescription_id", "eq.1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([MockStoreResponses::prescription_row(1, 4, 2, 7)])),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/prescriptions"))
        .and(query_param("prescription_id", "eq.1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([MockStoreResponses::prescription_row(1, 4, 2, 7)])),
        )
        .mount(&mock_server)
        .await;

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/prescription/1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

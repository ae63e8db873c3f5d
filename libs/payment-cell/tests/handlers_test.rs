use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use assert_matches::assert_matches;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use payment_cell::handlers::{
    create_payment, delete_payment, get_payment_by_id, update_payment,
};
use shared_models::error::AppError;
use shared_utils::test_utils::{MockStoreResponses, TestConfig};

#[tokio::test]
async fn create_payment_returns_created_envelope() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_store(&mock_server.uri()).to_arc();

    Mock::given(method("POST"))
        .and(path("/rest/v1/payments"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!([MockStoreResponses::payment_row(1, 4, 500)])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = create_payment(
        State(config),
        Json(json!({ "appointment_id": 4, "amount": 500 })),
    )
    .await;

    let (status, Json(body)) = result.expect("creation should succeed");
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Payment created");
    assert_eq!(body["data"]["payment_id"], 1);
    assert_eq!(body["data"]["amount"], 500);
}

#[tokio::test]
async fn create_payment_with_missing_amount_is_rejected_before_the_store() {
    let config = TestConfig::default().to_arc();

    let result = create_payment(State(config), Json(json!({ "appointment_id": 4 }))).await;

    assert_matches!(result.unwrap_err(), AppError::Validation(_));
}

#[tokio::test]
async fn get_payment_by_id_rejects_non_numeric_id() {
    let config = TestConfig::default().to_arc();

    let result = get_payment_by_id(State(config), Path("abc".to_string())).await;

    assert_matches!(result.unwrap_err(), AppError::Validation(msg) => {
        assert_eq!(msg, "Invalid ID");
    });
}

#[tokio::test]
async fn update_payment_non_numeric_id_is_internal_error() {
    let config = TestConfig::default().to_arc();

    let result = update_payment(
        State(config),
        Path("abc".to_string()),
        Json(json!({ "payment_status": "Paid" })),
    )
    .await;

    // Update skips the id guard the read path has.
    assert_matches!(result.unwrap_err(), AppError::Internal(_));
}

#[tokio::test]
async fn update_payment_wraps_record_in_envelope() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_store(&mock_server.uri()).to_arc();

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/payments"))
        .and(query_param("payment_id", "eq.1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([MockStoreResponses::payment_row(1, 4, 500)])),
        )
        .mount(&mock_server)
        .await;

    let result = update_payment(
        State(config),
        Path("1".to_string()),
        Json(json!({ "payment_status": "Paid" })),
    )
    .await;

    let Json(body) = result.expect("update should succeed");
    assert_eq!(body["message"], "Payment updated");
    assert_eq!(body["data"]["payment_id"], 1);
}

#[tokio::test]
async fn update_payment_missing_row_is_not_found() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_store(&mock_server.uri()).to_arc();

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/payments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let result = update_payment(
        State(config),
        Path("99".to_string()),
        Json(json!({ "payment_status": "Paid" })),
    )
    .await;

    assert_matches!(result.unwrap_err(), AppError::NotFound(msg) => {
        assert_eq!(msg, "Payment not found");
    });
}

#[tokio::test]
async fn delete_payment_non_numeric_id_is_internal_error() {
    let config = TestConfig::default().to_arc();

    let result = delete_payment(State(config), Path("abc".to_string())).await;

    assert_matches!(result.unwrap_err(), AppError::Internal(_));
}

#[tokio::test]
async fn delete_payment_missing_row_is_not_found() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_store(&mock_server.uri()).to_arc();

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/payments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let result = delete_payment(State(config), Path("99".to_string())).await;

    assert_matches!(result.unwrap_err(), AppError::NotFound(msg) => {
        assert_eq!(msg, "Payment not found");
    });
}

#[tokio::test]
async fn delete_payment_answers_no_content() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_store(&mock_server.uri()).to_arc();

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/payments"))
        .and(query_param("payment_id", "eq.1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([MockStoreResponses::payment_row(1, 4, 500)])),
        )
        .mount(&mock_server)
        .await;

    let result = delete_payment(State(config), Path("1".to_string())).await;

    assert_eq!(result.expect("delete should succeed"), StatusCode::NO_CONTENT);
}

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{CreatePaymentRequest, UpdatePaymentRequest};
use crate::services::PaymentService;

#[axum::debug_handler]
pub async fn create_payment(
    State(config): State<Arc<AppConfig>>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let request: CreatePaymentRequest =
        serde_json::from_value(body).map_err(|e| AppError::Validation(e.to_string()))?;
    let service = PaymentService::new(&config);

    let Some(payment) = service.create(request).await? else {
        return Err(AppError::Internal("Payment not created".to_string()));
    };

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Payment created", "data": payment })),
    ))
}

#[axum::debug_handler]
pub async fn get_payments(State(config): State<Arc<AppConfig>>) -> Result<Json<Value>, AppError> {
    let service = PaymentService::new(&config);
    let payments = service.list().await?;

    Ok(Json(json!({ "data": payments })))
}

#[axum::debug_handler]
pub async fn get_payment_by_id(
    State(config): State<Arc<AppConfig>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id = id
        .parse::<i32>()
        .map_err(|_| AppError::Validation("Invalid ID".to_string()))?;
    let service = PaymentService::new(&config);

    let Some(payment) = service.get(id).await? else {
        return Err(AppError::NotFound("Payment not found".to_string()));
    };

    Ok(Json(json!({ "data": payment })))
}

#[axum::debug_handler]
pub async fn update_payment(
    State(config): State<Arc<AppConfig>>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, AppError> {
    // No id guard on update; a non-numeric id surfaces as an internal error.
    let id = id
        .parse::<i32>()
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let request: UpdatePaymentRequest =
        serde_json::from_value(body).map_err(|e| AppError::Validation(e.to_string()))?;
    let service = PaymentService::new(&config);

    let Some(updated) = service.update(id, request).await? else {
        return Err(AppError::NotFound("Payment not found".to_string()));
    };

    Ok(Json(json!({ "message": "Payment updated", "data": updated })))
}

#[axum::debug_handler]
pub async fn delete_payment(
    State(config): State<Arc<AppConfig>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = id
        .parse::<i32>()
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let service = PaymentService::new(&config);

    if service.delete(id).await?.is_none() {
        return Err(AppError::NotFound("Payment not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

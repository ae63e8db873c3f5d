use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{Appointment, CreateAppointmentRequest, UpdateAppointmentRequest};
use crate::services::AppointmentService;

#[axum::debug_handler]
pub async fn create_appointment(
    State(config): State<Arc<AppConfig>>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let request: CreateAppointmentRequest =
        serde_json::from_value(body).map_err(|e| AppError::Validation(e.to_string()))?;
    let service = AppointmentService::new(&config);

    let Some(appointment) = service.create(request).await? else {
        return Err(AppError::Internal("Appointment not created".to_string()));
    };

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Appointment created", "data": appointment })),
    ))
}

#[axum::debug_handler]
pub async fn get_appointments(
    State(config): State<Arc<AppConfig>>,
) -> Result<Json<Value>, AppError> {
    let service = AppointmentService::new(&config);
    let appointments = service.list().await?;

    Ok(Json(json!({ "data": appointments })))
}

#[axum::debug_handler]
pub async fn get_appointment_by_id(
    State(config): State<Arc<AppConfig>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id = id
        .parse::<i32>()
        .map_err(|_| AppError::Validation("Invalid ID".to_string()))?;
    let service = AppointmentService::new(&config);

    let Some(appointment) = service.get(id).await? else {
        return Err(AppError::NotFound("Appointment not found".to_string()));
    };

    Ok(Json(json!({ "data": appointment })))
}

/// Update keeps its odd failure contract: a missing row answers 404, but
/// every other failure (bad id included) answers an empty 204.
#[axum::debug_handler]
pub async fn update_appointment(
    State(config): State<Arc<AppConfig>>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    match try_update(&config, &id, body).await {
        Ok(Some(updated)) => (
            StatusCode::OK,
            Json(json!({ "message": "Appointment updated", "data": updated })),
        )
            .into_response(),
        Ok(None) => AppError::NotFound("Appointment not found".to_string()).into_response(),
        Err(_) => StatusCode::NO_CONTENT.into_response(),
    }
}

async fn try_update(
    config: &Arc<AppConfig>,
    id: &str,
    body: Value,
) -> Result<Option<Appointment>, AppError> {
    let id = id
        .parse::<i32>()
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let request: UpdateAppointmentRequest =
        serde_json::from_value(body).map_err(|e| AppError::Validation(e.to_string()))?;

    AppointmentService::new(config).update(id, request).await
}

#[axum::debug_handler]
pub async fn delete_appointment(
    State(config): State<Arc<AppConfig>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    // No id guard on delete; a non-numeric id surfaces as an internal error.
    let id = id
        .parse::<i32>()
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let service = AppointmentService::new(&config);

    if service.delete(id).await?.is_none() {
        return Err(AppError::NotFound("Appointment not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{CreatePrescriptionRequest, UpdatePrescriptionRequest};
use crate::services::PrescriptionService;

#[axum::debug_handler]
pub async fn create_prescription(
    State(config): State<Arc<AppConfig>>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let request: CreatePrescriptionRequest =
        serde_json::from_value(body).map_err(|e| AppError::Validation(e.to_string()))?;
    let service = PrescriptionService::new(&config);

    let Some(prescription) = service.create(request).await? else {
        return Err(AppError::Validation("Prescription not created".to_string()));
    };

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Prescription created successfully", "data": prescription })),
    ))
}

/// An empty collection answers 404 here, unlike the 200-with-empty-array
/// the appointment and payment listings give.
#[axum::debug_handler]
pub async fn get_prescriptions(
    State(config): State<Arc<AppConfig>>,
) -> Result<Json<Value>, AppError> {
    let service = PrescriptionService::new(&config);
    let prescriptions = service.list().await?;

    if prescriptions.is_empty() {
        return Err(AppError::NotFound("No prescriptions found".to_string()));
    }

    Ok(Json(json!({ "data": prescriptions })))
}

#[axum::debug_handler]
pub async fn get_prescription_by_id(
    State(config): State<Arc<AppConfig>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id = id
        .parse::<i32>()
        .map_err(|_| AppError::Validation("Invalid ID".to_string()))?;
    let service = PrescriptionService::new(&config);

    let Some(prescription) = service.get(id).await? else {
        return Err(AppError::NotFound("Prescription not found".to_string()));
    };

    Ok(Json(json!({ "data": prescription })))
}

#[axum::debug_handler]
pub async fn update_prescription(
    State(config): State<Arc<AppConfig>>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, AppError> {
    let id = id
        .parse::<i32>()
        .map_err(|_| AppError::Validation("Invalid ID".to_string()))?;
    let request: UpdatePrescriptionRequest =
        serde_json::from_value(body).map_err(|e| AppError::Validation(e.to_string()))?;
    let service = PrescriptionService::new(&config);

    let Some(updated) = service.update(id, request).await? else {
        return Err(AppError::NotFound("Prescription not found".to_string()));
    };

    Ok(Json(
        json!({ "message": "Prescription updated successfully", "data": updated }),
    ))
}

#[axum::debug_handler]
pub async fn delete_prescription(
    State(config): State<Arc<AppConfig>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = id
        .parse::<i32>()
        .map_err(|_| AppError::Validation("Invalid ID".to_string()))?;
    let service = PrescriptionService::new(&config);

    // Existence is checked up front so a miss answers 404, not 400.
    if service.get(id).await?.is_none() {
        return Err(AppError::NotFound("Prescription not found".to_string()));
    }
    if service.delete(id).await?.is_none() {
        return Err(AppError::Validation("Prescription not deleted".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

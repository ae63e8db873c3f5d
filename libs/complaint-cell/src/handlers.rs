use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{CreateComplaintRequest, UpdateComplaintRequest};
use crate::services::ComplaintService;

#[axum::debug_handler]
pub async fn create_complaint(
    State(config): State<Arc<AppConfig>>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let request: CreateComplaintRequest =
        serde_json::from_value(body).map_err(|e| AppError::Validation(e.to_string()))?;
    let service = ComplaintService::new(&config);

    let Some(complaint) = service.create(request).await? else {
        return Err(AppError::Validation("Complaint not created".to_string()));
    };

    // The created record rides under "complaint", not the usual "data".
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Complaint created successfully", "complaint": complaint })),
    ))
}

#[axum::debug_handler]
pub async fn get_complaints(State(config): State<Arc<AppConfig>>) -> Result<Json<Value>, AppError> {
    let service = ComplaintService::new(&config);
    let complaints = service.list().await?;

    if complaints.is_empty() {
        return Err(AppError::NotFound("No complaints found".to_string()));
    }

    Ok(Json(json!({ "data": complaints })))
}

#[axum::debug_handler]
pub async fn get_complaint_by_id(
    State(config): State<Arc<AppConfig>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id = id
        .parse::<i32>()
        .map_err(|_| AppError::Validation("Invalid ID".to_string()))?;
    let service = ComplaintService::new(&config);

    let Some(complaint) = service.get(id).await? else {
        return Err(AppError::NotFound("Complaint not found".to_string()));
    };

    Ok(Json(json!({ "data": complaint })))
}

#[axum::debug_handler]
pub async fn update_complaint(
    State(config): State<Arc<AppConfig>>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, AppError> {
    let id = id
        .parse::<i32>()
        .map_err(|_| AppError::Validation("Invalid ID".to_string()))?;
    let request: UpdateComplaintRequest =
        serde_json::from_value(body).map_err(|e| AppError::Validation(e.to_string()))?;
    let service = ComplaintService::new(&config);

    let Some(updated) = service.update(id, request).await? else {
        return Err(AppError::NotFound("Complaint not found".to_string()));
    };

    // Bare record, no envelope.
    Ok(Json(json!(updated)))
}

#[axum::debug_handler]
pub async fn delete_complaint(
    State(config): State<Arc<AppConfig>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = id
        .parse::<i32>()
        .map_err(|_| AppError::Validation("Invalid ID".to_string()))?;
    let service = ComplaintService::new(&config);

    // Existence is checked up front so a miss answers 404, not 400.
    if service.get(id).await?.is_none() {
        return Err(AppError::NotFound("Complaint not found".to_string()));
    }
    if service.delete(id).await?.is_none() {
        return Err(AppError::Validation("Complaint not deleted".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

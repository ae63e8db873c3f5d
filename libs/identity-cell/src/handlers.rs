use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{Duration, Utc};
use serde_json::{json, Map, Value};

use shared_config::AppConfig;
use shared_models::auth::TokenClaims;
use shared_models::error::AppError;
use shared_utils::{jwt, password};

use crate::models::{
    AccountKind, CreateDoctorRequest, CreateUserRequest, LoginRequest, UpdateDoctorRequest,
    UpdateUserRequest, VerifyRequest,
};
use crate::services::IdentityService;

fn parse_id(raw: &str) -> Result<i32, AppError> {
    raw.parse()
        .map_err(|_| AppError::Validation("Invalid ID".to_string()))
}

/// Body decoding shared by the typed handlers; a missing or mistyped field
/// answers 400 rather than a body rejection.
fn decode_body<T: serde::de::DeserializeOwned>(body: Value) -> Result<T, AppError> {
    serde_json::from_value(body).map_err(|e| AppError::Validation(e.to_string()))
}

async fn login_account(
    config: &Arc<AppConfig>,
    kind: AccountKind,
    request: LoginRequest,
) -> Result<Json<Value>, AppError> {
    let service = IdentityService::new(config);

    let Some(credentials) = service.login_lookup(kind, &request.email).await? else {
        return Err(AppError::NotFound(format!("{} not found", kind.label())));
    };

    if !credentials.is_verified.unwrap_or(false) {
        return Err(AppError::Forbidden(
            "Please verify your account first.".to_string(),
        ));
    }

    let password_ok = password::verify_password(&request.password, &credentials.password)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    if !password_ok {
        return Err(AppError::Auth("Invalid credentials".to_string()));
    }

    let now = Utc::now();
    let (user_id, doctor_id) = match kind {
        AccountKind::User => (Some(credentials.id), None),
        AccountKind::Doctor => (None, Some(credentials.id)),
    };
    let claims = TokenClaims {
        sub: credentials.id.to_string(),
        user_id,
        doctor_id,
        email: credentials.email.clone(),
        role: kind.role_name().to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::hours(jwt::SESSION_TTL_HOURS)).timestamp(),
    };
    let token = jwt::sign_token(&claims, &config.jwt_secret).map_err(AppError::Internal)?;

    let mut account = Map::new();
    account.insert(kind.id_column().to_string(), json!(credentials.id));
    account.insert("email".to_string(), json!(credentials.email));

    let mut body = Map::new();
    body.insert("message".to_string(), json!("Login successful"));
    body.insert("token".to_string(), json!(token));
    body.insert(kind.role_name().to_string(), Value::Object(account));

    Ok(Json(Value::Object(body)))
}

#[axum::debug_handler]
pub async fn create_user(
    State(config): State<Arc<AppConfig>>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let request: CreateUserRequest = decode_body(body)?;
    let service = IdentityService::new(&config);

    let Some(user) = service.register_user(request).await? else {
        return Err(AppError::Validation("User not created".to_string()));
    };

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "User created successfully,Verification code sent to Email",
            "user": user
        })),
    ))
}

#[axum::debug_handler]
pub async fn verify_user(
    State(config): State<Arc<AppConfig>>,
    Json(request): Json<VerifyRequest>,
) -> Result<Json<Value>, AppError> {
    if request.email.is_empty() || request.code.is_empty() {
        return Err(AppError::Validation("Invalid credentials".to_string()));
    }

    let service = IdentityService::new(&config);

    // Store faults fold into the same rejection here; the doctor flow
    // surfaces them as internal errors instead.
    match service
        .verify(AccountKind::User, &request.email, &request.code)
        .await
    {
        Ok(Some(_)) => Ok(Json(json!({ "message": "User verified successfully" }))),
        _ => Err(AppError::Validation("Invalid credentials".to_string())),
    }
}

#[axum::debug_handler]
pub async fn login_user(
    State(config): State<Arc<AppConfig>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<Value>, AppError> {
    login_account(&config, AccountKind::User, request).await
}

#[axum::debug_handler]
pub async fn get_users(
    State(config): State<Arc<AppConfig>>,
) -> Result<Json<Value>, AppError> {
    let service = IdentityService::new(&config);
    let users = service.list_users().await?;

    Ok(Json(json!({ "data": users })))
}

#[axum::debug_handler]
pub async fn get_user_by_id(
    State(config): State<Arc<AppConfig>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id = parse_id(&id)?;
    let service = IdentityService::new(&config);

    let Some(user) = service.get_user(id).await? else {
        return Err(AppError::NotFound("User not found".to_string()));
    };

    Ok(Json(json!({ "data": user })))
}

#[axum::debug_handler]
pub async fn update_user(
    State(config): State<Arc<AppConfig>>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, AppError> {
    let id = parse_id(&id)?;
    let request: UpdateUserRequest = decode_body(body)?;
    let service = IdentityService::new(&config);

    let Some(updated) = service.update_user(id, request).await? else {
        return Err(AppError::NotFound("User not found".to_string()));
    };

    // The user update answers with the bare record, no envelope.
    Ok(Json(json!(updated)))
}

#[axum::debug_handler]
pub async fn delete_user(
    State(config): State<Arc<AppConfig>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id = parse_id(&id)?;
    let service = IdentityService::new(&config);

    if service.delete_user(id).await?.is_none() {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    Ok(Json(json!({ "message": "User deleted successfully" })))
}

#[axum::debug_handler]
pub async fn create_doctor(
    State(config): State<Arc<AppConfig>>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let request: CreateDoctorRequest = decode_body(body)?;
    let service = IdentityService::new(&config);

    let Some(doctor) = service.register_doctor(request).await? else {
        return Err(AppError::Validation("Doctor not created".to_string()));
    };

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Doctor created successfully. Verification code sent to email.",
            "doctor": doctor
        })),
    ))
}

#[axum::debug_handler]
pub async fn verify_doctor(
    State(config): State<Arc<AppConfig>>,
    Json(request): Json<VerifyRequest>,
) -> Result<Json<Value>, AppError> {
    if request.email.is_empty() || request.code.is_empty() {
        return Err(AppError::Validation("Invalid credentials".to_string()));
    }

    let service = IdentityService::new(&config);

    match service
        .verify(AccountKind::Doctor, &request.email, &request.code)
        .await?
    {
        Some(_) => Ok(Json(json!({ "message": "Doctor verified successfully" }))),
        None => Err(AppError::Validation("Invalid credentials".to_string())),
    }
}

#[axum::debug_handler]
pub async fn login_doctor(
    State(config): State<Arc<AppConfig>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<Value>, AppError> {
    login_account(&config, AccountKind::Doctor, request).await
}

#[axum::debug_handler]
pub async fn get_doctors(
    State(config): State<Arc<AppConfig>>,
) -> Result<Json<Value>, AppError> {
    let service = IdentityService::new(&config);
    let doctors = service.list_doctors().await?;

    Ok(Json(json!({ "data": doctors })))
}

#[axum::debug_handler]
pub async fn get_doctor_by_id(
    State(config): State<Arc<AppConfig>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id = parse_id(&id)?;
    let service = IdentityService::new(&config);

    let Some(doctor) = service.get_doctor(id).await? else {
        return Err(AppError::NotFound("Doctor not found".to_string()));
    };

    Ok(Json(json!({ "data": doctor })))
}

#[axum::debug_handler]
pub async fn update_doctor(
    State(config): State<Arc<AppConfig>>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, AppError> {
    let id = parse_id(&id)?;
    let request: UpdateDoctorRequest = decode_body(body)?;
    let service = IdentityService::new(&config);

    let Some(updated) = service.update_doctor(id, request).await? else {
        return Err(AppError::NotFound("Doctor not found".to_string()));
    };

    Ok(Json(json!({ "message": "Doctor updated", "data": updated })))
}

#[axum::debug_handler]
pub async fn delete_doctor(
    State(config): State<Arc<AppConfig>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id = parse_id(&id)?;
    let service = IdentityService::new(&config);

    if service.delete_doctor(id).await?.is_none() {
        return Err(AppError::NotFound("Doctor not found".to_string()));
    }

    Ok(Json(json!({ "message": "Doctor deleted successfully" })))
}

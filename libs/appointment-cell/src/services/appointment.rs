use chrono::Utc;
use serde_json::{json, Map, Value};
use tracing::debug;

use shared_config::AppConfig;
use shared_database::store::{Store, StoreError};
use shared_models::error::AppError;

use crate::models::{Appointment, CreateAppointmentRequest, UpdateAppointmentRequest};

const TABLE: &str = "appointments";

pub struct AppointmentService {
    store: Store,
}

fn store_error(err: StoreError) -> AppError {
    AppError::Internal(err.to_string())
}

fn decode(row: Value) -> Result<Appointment, AppError> {
    serde_json::from_value(row).map_err(|e| AppError::Internal(e.to_string()))
}

impl AppointmentService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: Store::new(config),
        }
    }

    pub async fn create(
        &self,
        request: CreateAppointmentRequest,
    ) -> Result<Option<Appointment>, AppError> {
        let now = Utc::now().to_rfc3339();

        let mut row = Map::new();
        row.insert("user_id".to_string(), json!(request.user_id));
        row.insert("doctor_id".to_string(), json!(request.doctor_id));
        row.insert(
            "appointment_date".to_string(),
            json!(request.appointment_date),
        );
        row.insert("time_slot".to_string(), json!(request.time_slot));
        if let Some(total_amount) = request.total_amount {
            row.insert("total_amount".to_string(), json!(total_amount));
        }
        // Omitted when unset so the store default (Pending) applies.
        if let Some(status) = request.appointment_status {
            row.insert("appointment_status".to_string(), json!(status));
        }
        row.insert("created_at".to_string(), json!(now));
        row.insert("updated_at".to_string(), json!(now));

        let rows = self
            .store
            .insert(TABLE, Value::Object(row))
            .await
            .map_err(store_error)?;
        debug!(
            "Appointment created for user {} with doctor {}",
            request.user_id, request.doctor_id
        );
        rows.into_iter().next().map(decode).transpose()
    }

    pub async fn list(&self) -> Result<Vec<Appointment>, AppError> {
        let rows = self.store.select_all(TABLE).await.map_err(store_error)?;
        rows.into_iter().map(decode).collect()
    }

    pub async fn get(&self, id: i32) -> Result<Option<Appointment>, AppError> {
        let rows = self
            .store
            .select_eq(TABLE, "appointment_id", id)
            .await
            .map_err(store_error)?;
        rows.into_iter().next().map(decode).transpose()
    }

    pub async fn update(
        &self,
        id: i32,
        request: UpdateAppointmentRequest,
    ) -> Result<Option<Appointment>, AppError> {
        let mut changes = Map::new();
        if let Some(user_id) = request.user_id {
            changes.insert("user_id".to_string(), json!(user_id));
        }
        if let Some(doctor_id) = request.doctor_id {
            changes.insert("doctor_id".to_string(), json!(doctor_id));
        }
        if let Some(appointment_date) = request.appointment_date {
            changes.insert("appointment_date".to_string(), json!(appointment_date));
        }
        if let Some(time_slot) = request.time_slot {
            changes.insert("time_slot".to_string(), json!(time_slot));
        }
        if let Some(total_amount) = request.total_amount {
            changes.insert("total_amount".to_string(), json!(total_amount));
        }
        if let Some(status) = request.appointment_status {
            changes.insert("appointment_status".to_string(), json!(status));
        }
        changes.insert("updated_at".to_string(), json!(Utc::now().to_rfc3339()));

        let rows = self
            .store
            .update_eq(TABLE, "appointment_id", id, Value::Object(changes))
            .await
            .map_err(store_error)?;
        rows.into_iter().next().map(decode).transpose()
    }

    pub async fn delete(&self, id: i32) -> Result<Option<Appointment>, AppError> {
        let rows = self
            .store
            .delete_eq(TABLE, "appointment_id", id)
            .await
            .map_err(store_error)?;
        rows.into_iter().next().map(decode).transpose()
    }
}

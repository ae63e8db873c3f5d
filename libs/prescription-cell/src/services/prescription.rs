use chrono::Utc;
use serde_json::{json, Map, Value};
use tracing::debug;

use shared_config::AppConfig;
use shared_database::store::{Store, StoreError};
use shared_models::error::AppError;

use crate::models::{CreatePrescriptionRequest, Prescription, UpdatePrescriptionRequest};

const TABLE: &str = "prescriptions";

pub struct PrescriptionService {
    store: Store,
}

fn store_error(err: StoreError) -> AppError {
    AppError::Internal(err.to_string())
}

fn decode(row: Value) -> Result<Prescription, AppError> {
    serde_json::from_value(row).map_err(|e| AppError::Internal(e.to_string()))
}

impl PrescriptionService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: Store::new(config),
        }
    }

    pub async fn create(
        &self,
        request: CreatePrescriptionRequest,
    ) -> Result<Option<Prescription>, AppError> {
        let now = Utc::now().to_rfc3339();

        let mut row = Map::new();
        row.insert("appointment_id".to_string(), json!(request.appointment_id));
        row.insert("doctor_id".to_string(), json!(request.doctor_id));
        row.insert("patient_id".to_string(), json!(request.patient_id));
        if let Some(notes) = request.notes {
            row.insert("notes".to_string(), json!(notes));
        }
        row.insert("created_at".to_string(), json!(now));
        row.insert("updated_at".to_string(), json!(now));

        let rows = self
            .store
            .insert(TABLE, Value::Object(row))
            .await
            .map_err(store_error)?;
        debug!(
            "Prescription created for appointment {} by doctor {}",
            request.appointment_id, request.doctor_id
        );
        rows.into_iter().next().map(decode).transpose()
    }

    pub async fn list(&self) -> Result<Vec<Prescription>, AppError> {
        let rows = self.store.select_all(TABLE).await.map_err(store_error)?;
        rows.into_iter().map(decode).collect()
    }

    pub async fn get(&self, id: i32) -> Result<Option<Prescription>, AppError> {
        let rows = self
            .store
            .select_eq(TABLE, "prescription_id", id)
            .await
            .map_err(store_error)?;
        rows.into_iter().next().map(decode).transpose()
    }

    pub async fn update(
        &self,
        id: i32,
        request: UpdatePrescriptionRequest,
    ) -> Result<Option<Prescription>, AppError> {
        let mut changes = Map::new();
        if let Some(appointment_id) = request.appointment_id {
            changes.insert("appointment_id".to_string(), json!(appointment_id));
        }
        if let Some(doctor_id) = request.doctor_id {
            changes.insert("doctor_id".to_string(), json!(doctor_id));
        }
        if let Some(patient_id) = request.patient_id {
            changes.insert("patient_id".to_string(), json!(patient_id));
        }
        if let Some(notes) = request.notes {
            changes.insert("notes".to_string(), json!(notes));
        }
        changes.insert("updated_at".to_string(), json!(Utc::now().to_rfc3339()));

        let rows = self
            .store
            .update_eq(TABLE, "prescription_id", id, Value::Object(changes))
            .await
            .map_err(store_error)?;
        rows.into_iter().next().map(decode).transpose()
    }

    pub async fn delete(&self, id: i32) -> Result<Option<Prescription>, AppError> {
        let rows = self
            .store
            .delete_eq(TABLE, "prescription_id", id)
            .await
            .map_err(store_error)?;
        rows.into_iter().next().map(decode).transpose()
    }
}

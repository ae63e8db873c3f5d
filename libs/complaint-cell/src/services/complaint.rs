use chrono::Utc;
use serde_json::{json, Map, Value};
use tracing::debug;

use shared_config::AppConfig;
use shared_database::store::{Store, StoreError};
use shared_models::error::AppError;

use crate::models::{Complaint, CreateComplaintRequest, UpdateComplaintRequest};

const TABLE: &str = "complaints";

pub struct ComplaintService {
    store: Store,
}

fn store_error(err: StoreError) -> AppError {
    AppError::Internal(err.to_string())
}

fn decode(row: Value) -> Result<Complaint, AppError> {
    serde_json::from_value(row).map_err(|e| AppError::Internal(e.to_string()))
}

impl ComplaintService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: Store::new(config),
        }
    }

    pub async fn create(
        &self,
        request: CreateComplaintRequest,
    ) -> Result<Option<Complaint>, AppError> {
        let now = Utc::now().to_rfc3339();

        let mut row = Map::new();
        row.insert("user_id".to_string(), json!(request.user_id));
        if let Some(related_appointment_id) = request.related_appointment_id {
            row.insert(
                "related_appointment_id".to_string(),
                json!(related_appointment_id),
            );
        }
        row.insert("subject".to_string(), json!(request.subject));
        if let Some(description) = request.description {
            row.insert("description".to_string(), json!(description));
        }
        // Omitted when unset so the store default (Open) applies.
        if let Some(status) = request.status {
            row.insert("status".to_string(), json!(status));
        }
        row.insert("created_at".to_string(), json!(now));
        row.insert("updated_at".to_string(), json!(now));

        let rows = self
            .store
            .insert(TABLE, Value::Object(row))
            .await
            .map_err(store_error)?;
        debug!("Complaint filed by user {}", request.user_id);
        rows.into_iter().next().map(decode).transpose()
    }

    pub async fn list(&self) -> Result<Vec<Complaint>, AppError> {
        let rows = self.store.select_all(TABLE).await.map_err(store_error)?;
        rows.into_iter().map(decode).collect()
    }

    pub async fn get(&self, id: i32) -> Result<Option<Complaint>, AppError> {
        let rows = self
            .store
            .select_eq(TABLE, "complaint_id", id)
            .await
            .map_err(store_error)?;
        rows.into_iter().next().map(decode).transpose()
    }

    pub async fn update(
        &self,
        id: i32,
        request: UpdateComplaintRequest,
    ) -> Result<Option<Complaint>, AppError> {
        let mut changes = Map::new();
        if let Some(user_id) = request.user_id {
            changes.insert("user_id".to_string(), json!(user_id));
        }
        if let Some(related_appointment_id) = request.related_appointment_id {
            changes.insert(
                "related_appointment_id".to_string(),
                json!(related_appointment_id),
            );
        }
        if let Some(subject) = request.subject {
            changes.insert("subject".to_string(), json!(subject));
        }
        if let Some(description) = request.description {
            changes.insert("description".to_string(), json!(description));
        }
        if let Some(status) = request.status {
            changes.insert("status".to_string(), json!(status));
        }
        changes.insert("updated_at".to_string(), json!(Utc::now().to_rfc3339()));

        let rows = self
            .store
            .update_eq(TABLE, "complaint_id", id, Value::Object(changes))
            .await
            .map_err(store_error)?;
        rows.into_iter().next().map(decode).transpose()
    }

    pub async fn delete(&self, id: i32) -> Result<Option<Complaint>, AppError> {
        let rows = self
            .store
            .delete_eq(TABLE, "complaint_id", id)
            .await
            .map_err(store_error)?;
        rows.into_iter().next().map(decode).transpose()
    }
}

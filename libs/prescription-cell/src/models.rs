use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Medication notes written by a doctor against a booked appointment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prescription {
    pub prescription_id: i32,
    pub appointment_id: i32,
    pub doctor_id: i32,
    pub patient_id: i32,
    pub notes: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePrescriptionRequest {
    pub appointment_id: i32,
    pub doctor_id: i32,
    pub patient_id: i32,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePrescriptionRequest {
    pub appointment_id: Option<i32>,
    pub doctor_id: Option<i32>,
    pub patient_id: Option<i32>,
    pub notes: Option<String>,
}

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub appointment_id: i32,
    pub user_id: i32,
    pub doctor_id: i32,
    pub appointment_date: NaiveDate,
    pub time_slot: String,
    pub total_amount: Option<i32>,
    pub appointment_status: Option<AppointmentStatus>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAppointmentRequest {
    pub user_id: i32,
    pub doctor_id: i32,
    pub appointment_date: NaiveDate,
    pub time_slot: String,
    pub total_amount: Option<i32>,
    pub appointment_status: Option<AppointmentStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAppointmentRequest {
    pub user_id: Option<i32>,
    pub doctor_id: Option<i32>,
    pub appointment_date: Option<NaiveDate>,
    pub time_slot: Option<String>,
    pub total_amount: Option<i32>,
    pub appointment_status: Option<AppointmentStatus>,
}

use chrono::{DateTime, NaiveDate, Utc};
use robokademi_core::PaginationMeta;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Lifecycle of a course registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl RegistrationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationStatus::Pending => "pending",
            RegistrationStatus::Confirmed => "confirmed",
            RegistrationStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Registration {
    pub id: Uuid,
    pub student_id: Uuid,
    pub course_id: Uuid,
    pub registered_on: NaiveDate,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRegistrationDto {
    pub student_id: Uuid,
    pub course_id: Uuid,
    /// Defaults to today when omitted.
    pub registered_on: Option<NaiveDate>,
    /// Defaults to pending when omitted.
    pub status: Option<RegistrationStatus>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateRegistrationDto {
    pub registered_on: Option<NaiveDate>,
    pub status: Option<RegistrationStatus>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RegistrationFilterParams {
    pub student_id: Option<Uuid>,
    pub course_id: Option<Uuid>,
    pub status: Option<RegistrationStatus>,
    #[serde(flatten)]
    pub pagination: robokademi_core::PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedRegistrationsResponse {
    pub data: Vec<Registration>,
    pub meta: PaginationMeta,
}

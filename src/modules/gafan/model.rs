use chrono::{DateTime, NaiveDate, Utc};
use robokademi_core::PaginationMeta;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A "gafan" partnership program running at a partner school.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct GafanProgram {
    pub id: Uuid,
    pub name: String,
    pub school_id: Option<Uuid>,
    pub starts_on: Option<NaiveDate>,
    pub ends_on: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateGafanProgramDto {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    pub school_id: Option<Uuid>,
    pub starts_on: Option<NaiveDate>,
    pub ends_on: Option<NaiveDate>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateGafanProgramDto {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    pub school_id: Option<Uuid>,
    pub starts_on: Option<NaiveDate>,
    pub ends_on: Option<NaiveDate>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GafanFilterParams {
    pub search: Option<String>,
    pub school_id: Option<Uuid>,
    #[serde(flatten)]
    pub pagination: robokademi_core::PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedGafanResponse {
    pub data: Vec<GafanProgram>,
    pub meta: PaginationMeta,
}

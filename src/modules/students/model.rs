//! Student domain models and DTOs.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::modules::value_types::Gender;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Student {
    pub id: Uuid,
    pub name: String,
    pub gender: String,
    pub dob: NaiveDate,
    pub contact_details: String,
    pub fees_paid: f64,
    /// Class the student is enrolled in, if any
    pub class_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a student. `class_id`, when present, must resolve to an
/// existing class.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateStudentDto {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub gender: Gender,
    pub dob: NaiveDate,
    #[validate(length(min = 1))]
    pub contact_details: String,
    #[validate(range(min = 0.0, message = "fees_paid must be non-negative"))]
    pub fees_paid: f64,
    pub class_id: Option<Uuid>,
}

/// DTO for partially updating a student. Absent fields are left unchanged.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateStudentDto {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub gender: Option<Gender>,
    pub dob: Option<NaiveDate>,
    #[validate(length(min = 1))]
    pub contact_details: Option<String>,
    #[validate(range(min = 0.0, message = "fees_paid must be non-negative"))]
    pub fees_paid: Option<f64>,
    pub class_id: Option<Uuid>,
}

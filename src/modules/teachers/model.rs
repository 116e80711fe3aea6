//! Teacher domain models and DTOs.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::modules::value_types::Gender;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Teacher {
    pub id: Uuid,
    pub name: String,
    pub gender: String,
    pub dob: NaiveDate,
    pub contact_details: String,
    pub salary: f64,
    /// Class this teacher is assigned to, if any
    pub assigned_class_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a teacher. `assigned_class_id`, when present, must
/// resolve to an existing class.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateTeacherDto {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub gender: Gender,
    pub dob: NaiveDate,
    #[validate(length(min = 1))]
    pub contact_details: String,
    #[validate(range(min = 0.0, message = "salary must be non-negative"))]
    pub salary: f64,
    pub assigned_class_id: Option<Uuid>,
}

/// DTO for partially updating a teacher. Absent fields are left unchanged.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateTeacherDto {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub gender: Option<Gender>,
    pub dob: Option<NaiveDate>,
    #[validate(length(min = 1))]
    pub contact_details: Option<String>,
    #[validate(range(min = 0.0, message = "salary must be non-negative"))]
    pub salary: Option<f64>,
    pub assigned_class_id: Option<Uuid>,
}

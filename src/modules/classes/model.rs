//! Class domain models and DTOs.
//!
//! A class optionally references the teacher in charge of it. Students point
//! back at the class they are enrolled in; the class does not own them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Class {
    pub id: Uuid,
    pub name: String,
    pub year: i32,
    /// Teacher in charge, if one is assigned
    pub teacher_id: Option<Uuid>,
    /// Fee charged per enrolled student
    pub student_fees: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a class. `teacher_id`, when present, must resolve to an
/// existing teacher.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateClassDto {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub year: i32,
    pub teacher_id: Option<Uuid>,
    #[validate(range(min = 0.0, message = "student_fees must be non-negative"))]
    pub student_fees: f64,
}

/// DTO for partially updating a class. Absent fields are left unchanged.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateClassDto {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub year: Option<i32>,
    pub teacher_id: Option<Uuid>,
    #[validate(range(min = 0.0, message = "student_fees must be non-negative"))]
    pub student_fees: Option<f64>,
}

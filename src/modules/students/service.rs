use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::utils::errors::AppError;

use super::model::{CreateStudentDto, Student, UpdateStudentDto};

pub struct StudentService;

impl StudentService {
    /// Referential check run before any write that sets `class_id`. Nothing
    /// is persisted when the reference does not resolve.
    async fn ensure_class_exists(db: &PgPool, class_id: Uuid) -> Result<(), AppError> {
        sqlx::query_scalar::<_, Uuid>("SELECT id FROM classes WHERE id = $1")
            .bind(class_id)
            .fetch_optional(db)
            .await
            .context("Failed to resolve class reference")
            .map_err(AppError::database)?
            .ok_or_else(|| {
                AppError::bad_request(format!("Referenced class {} does not exist", class_id))
            })?;

        Ok(())
    }

    #[instrument(skip(db, dto))]
    pub async fn create_student(db: &PgPool, dto: CreateStudentDto) -> Result<Student, AppError> {
        if let Some(class_id) = dto.class_id {
            Self::ensure_class_exists(db, class_id).await?;
        }

        let student = sqlx::query_as::<_, Student>(
            "INSERT INTO students (name, gender, dob, contact_details, fees_paid, class_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id, name, gender, dob, contact_details, fees_paid, class_id,
                       created_at, updated_at",
        )
        .bind(&dto.name)
        .bind(dto.gender.as_str())
        .bind(dto.dob)
        .bind(&dto.contact_details)
        .bind(dto.fees_paid)
        .bind(dto.class_id)
        .fetch_one(db)
        .await
        .context("Failed to create student")
        .map_err(AppError::database)?;

        Ok(student)
    }

    #[instrument(skip(db))]
    pub async fn get_students(db: &PgPool) -> Result<Vec<Student>, AppError> {
        let students = sqlx::query_as::<_, Student>(
            "SELECT id, name, gender, dob, contact_details, fees_paid, class_id,
                    created_at, updated_at
             FROM students
             ORDER BY created_at",
        )
        .fetch_all(db)
        .await
        .context("Failed to fetch students")
        .map_err(AppError::database)?;

        Ok(students)
    }

    #[instrument(skip(db))]
    pub async fn get_student(db: &PgPool, id: Uuid) -> Result<Student, AppError> {
        let student = sqlx::query_as::<_, Student>(
            "SELECT id, name, gender, dob, contact_details, fees_paid, class_id,
                    created_at, updated_at
             FROM students
             WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch student")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found("Student not found"))?;

        Ok(student)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_student(
        db: &PgPool,
        id: Uuid,
        dto: UpdateStudentDto,
    ) -> Result<Student, AppError> {
        let existing = Self::get_student(db, id).await?;

        if let Some(class_id) = dto.class_id {
            Self::ensure_class_exists(db, class_id).await?;
        }

        let name = dto.name.unwrap_or(existing.name);
        let gender = dto
            .gender
            .map(|g| g.as_str().to_string())
            .unwrap_or(existing.gender);
        let dob = dto.dob.unwrap_or(existing.dob);
        let contact_details = dto.contact_details.unwrap_or(existing.contact_details);
        let fees_paid = dto.fees_paid.unwrap_or(existing.fees_paid);
        let class_id = dto.class_id.or(existing.class_id);

        let student = sqlx::query_as::<_, Student>(
            "UPDATE students
             SET name = $1, gender = $2, dob = $3, contact_details = $4, fees_paid = $5,
                 class_id = $6, updated_at = NOW()
             WHERE id = $7
             RETURNING id, name, gender, dob, contact_details, fees_paid, class_id,
                       created_at, updated_at",
        )
        .bind(&name)
        .bind(&gender)
        .bind(dob)
        .bind(&contact_details)
        .bind(fees_paid)
        .bind(class_id)
        .bind(id)
        .fetch_one(db)
        .await
        .context("Failed to update student")
        .map_err(AppError::database)?;

        Ok(student)
    }

    #[instrument(skip(db))]
    pub async fn delete_student(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("Failed to delete student")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Student not found"));
        }

        Ok(())
    }
}

use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::utils::errors::AppError;

use super::model::{CreateTeacherDto, Teacher, UpdateTeacherDto};

pub struct TeacherService;

impl TeacherService {
    /// Referential check run before any write that sets `assigned_class_id`.
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
    pub async fn create_teacher(db: &PgPool, dto: CreateTeacherDto) -> Result<Teacher, AppError> {
        if let Some(class_id) = dto.assigned_class_id {
            Self::ensure_class_exists(db, class_id).await?;
        }

        let teacher = sqlx::query_as::<_, Teacher>(
            "INSERT INTO teachers (name, gender, dob, contact_details, salary, assigned_class_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id, name, gender, dob, contact_details, salary, assigned_class_id,
                       created_at, updated_at",
        )
        .bind(&dto.name)
        .bind(dto.gender.as_str())
        .bind(dto.dob)
        .bind(&dto.contact_details)
        .bind(dto.salary)
        .bind(dto.assigned_class_id)
        .fetch_one(db)
        .await
        .context("Failed to create teacher")
        .map_err(AppError::database)?;

        Ok(teacher)
    }

    #[instrument(skip(db))]
    pub async fn get_teachers(db: &PgPool) -> Result<Vec<Teacher>, AppError> {
        let teachers = sqlx::query_as::<_, Teacher>(
            "SELECT id, name, gender, dob, contact_details, salary, assigned_class_id,
                    created_at, updated_at
             FROM teachers
             ORDER BY created_at",
        )
        .fetch_all(db)
        .await
        .context("Failed to fetch teachers")
        .map_err(AppError::database)?;

        Ok(teachers)
    }

    #[instrument(skip(db))]
    pub async fn get_teacher(db: &PgPool, id: Uuid) -> Result<Teacher, AppError> {
        let teacher = sqlx::query_as::<_, Teacher>(
            "SELECT id, name, gender, dob, contact_details, salary, assigned_class_id,
                    created_at, updated_at
             FROM teachers
             WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch teacher")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found("Teacher not found"))?;

        Ok(teacher)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_teacher(
        db: &PgPool,
        id: Uuid,
        dto: UpdateTeacherDto,
    ) -> Result<Teacher, AppError> {
        let existing = Self::get_teacher(db, id).await?;

        if let Some(class_id) = dto.assigned_class_id {
            Self::ensure_class_exists(db, class_id).await?;
        }

        let name = dto.name.unwrap_or(existing.name);
        let gender = dto
            .gender
            .map(|g| g.as_str().to_string())
            .unwrap_or(existing.gender);
        let dob = dto.dob.unwrap_or(existing.dob);
        let contact_details = dto.contact_details.unwrap_or(existing.contact_details);
        let salary = dto.salary.unwrap_or(existing.salary);
        let assigned_class_id = dto.assigned_class_id.or(existing.assigned_class_id);

        let teacher = sqlx::query_as::<_, Teacher>(
            "UPDATE teachers
             SET name = $1, gender = $2, dob = $3, contact_details = $4, salary = $5,
                 assigned_class_id = $6, updated_at = NOW()
             WHERE id = $7
             RETURNING id, name, gender, dob, contact_details, salary, assigned_class_id,
                       created_at, updated_at",
        )
        .bind(&name)
        .bind(&gender)
        .bind(dob)
        .bind(&contact_details)
        .bind(salary)
        .bind(assigned_class_id)
        .bind(id)
        .fetch_one(db)
        .await
        .context("Failed to update teacher")
        .map_err(AppError::database)?;

        Ok(teacher)
    }

    /// Deletes a teacher. Blocked with a conflict while any class still
    /// references the teacher, mirroring the class-deletion policy.
    #[instrument(skip(db))]
    pub async fn delete_teacher(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        Self::get_teacher(db, id).await?;

        let reference_count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM classes WHERE teacher_id = $1")
                .bind(id)
                .fetch_one(db)
                .await
                .context("Failed to count teacher references")
                .map_err(AppError::database)?;

        if reference_count > 0 {
            return Err(AppError::conflict(
                "Teacher is still referenced by classes",
            ));
        }

        sqlx::query("DELETE FROM teachers WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_foreign_key_violation() {
                        return AppError::conflict("Teacher is still referenced by classes");
                    }
                }
                AppError::database(anyhow::Error::from(e))
            })?;

        Ok(())
    }
}

use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::utils::errors::AppError;

use super::model::{Class, CreateClassDto, UpdateClassDto};

pub struct ClassService;

impl ClassService {
    /// Referential check run before any write that sets `teacher_id`.
    async fn ensure_teacher_exists(db: &PgPool, teacher_id: Uuid) -> Result<(), AppError> {
        sqlx::query_scalar::<_, Uuid>("SELECT id FROM teachers WHERE id = $1")
            .bind(teacher_id)
            .fetch_optional(db)
            .await
            .context("Failed to resolve teacher reference")
            .map_err(AppError::database)?
            .ok_or_else(|| {
                AppError::bad_request(format!("Referenced teacher {} does not exist", teacher_id))
            })?;

        Ok(())
    }

    #[instrument(skip(db, dto))]
    pub async fn create_class(db: &PgPool, dto: CreateClassDto) -> Result<Class, AppError> {
        if let Some(teacher_id) = dto.teacher_id {
            Self::ensure_teacher_exists(db, teacher_id).await?;
        }

        let class = sqlx::query_as::<_, Class>(
            "INSERT INTO classes (name, year, teacher_id, student_fees)
             VALUES ($1, $2, $3, $4)
             RETURNING id, name, year, teacher_id, student_fees, created_at, updated_at",
        )
        .bind(&dto.name)
        .bind(dto.year)
        .bind(dto.teacher_id)
        .bind(dto.student_fees)
        .fetch_one(db)
        .await
        .context("Failed to create class")
        .map_err(AppError::database)?;

        Ok(class)
    }

    #[instrument(skip(db))]
    pub async fn get_classes(db: &PgPool) -> Result<Vec<Class>, AppError> {
        let classes = sqlx::query_as::<_, Class>(
            "SELECT id, name, year, teacher_id, student_fees, created_at, updated_at
             FROM classes
             ORDER BY created_at",
        )
        .fetch_all(db)
        .await
        .context("Failed to fetch classes")
        .map_err(AppError::database)?;

        Ok(classes)
    }

    #[instrument(skip(db))]
    pub async fn get_class(db: &PgPool, id: Uuid) -> Result<Class, AppError> {
        let class = sqlx::query_as::<_, Class>(
            "SELECT id, name, year, teacher_id, student_fees, created_at, updated_at
             FROM classes
             WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch class")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found("Class not found"))?;

        Ok(class)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_class(
        db: &PgPool,
        id: Uuid,
        dto: UpdateClassDto,
    ) -> Result<Class, AppError> {
        let existing = Self::get_class(db, id).await?;

        if let Some(teacher_id) = dto.teacher_id {
            Self::ensure_teacher_exists(db, teacher_id).await?;
        }

        let name = dto.name.unwrap_or(existing.name);
        let year = dto.year.unwrap_or(existing.year);
        let teacher_id = dto.teacher_id.or(existing.teacher_id);
        let student_fees = dto.student_fees.unwrap_or(existing.student_fees);

        let class = sqlx::query_as::<_, Class>(
            "UPDATE classes
             SET name = $1, year = $2, teacher_id = $3, student_fees = $4, updated_at = NOW()
             WHERE id = $5
             RETURNING id, name, year, teacher_id, student_fees, created_at, updated_at",
        )
        .bind(&name)
        .bind(year)
        .bind(teacher_id)
        .bind(student_fees)
        .bind(id)
        .fetch_one(db)
        .await
        .context("Failed to update class")
        .map_err(AppError::database)?;

        Ok(class)
    }

    /// Deletes a class. Deletion is blocked with a conflict while any student
    /// or teacher still references the class; the same rule applies to both
    /// reference kinds.
    #[instrument(skip(db))]
    pub async fn delete_class(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        Self::get_class(db, id).await?;

        let reference_count = sqlx::query_scalar::<_, i64>(
            "SELECT (SELECT COUNT(*) FROM students WHERE class_id = $1)
                  + (SELECT COUNT(*) FROM teachers WHERE assigned_class_id = $1)",
        )
        .bind(id)
        .fetch_one(db)
        .await
        .context("Failed to count class references")
        .map_err(AppError::database)?;

        if reference_count > 0 {
            return Err(AppError::conflict(
                "Class is still referenced by students or teachers",
            ));
        }

        sqlx::query("DELETE FROM classes WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    // a reference created between the check and the delete
                    if db_err.is_foreign_key_violation() {
                        return AppError::conflict(
                            "Class is still referenced by students or teachers",
                        );
                    }
                }
                AppError::database(anyhow::Error::from(e))
            })?;

        Ok(())
    }
}

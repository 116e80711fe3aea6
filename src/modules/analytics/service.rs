use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::utils::errors::AppError;

use super::model::{FinancialSummary, GenderDistribution};

pub struct AnalyticsService;

impl AnalyticsService {
    /// Gender head-count for one class. Unknown class ids are a 404, not an
    /// empty distribution.
    #[instrument(skip(db))]
    pub async fn gender_distribution(
        db: &PgPool,
        class_id: Uuid,
    ) -> Result<GenderDistribution, AppError> {
        sqlx::query_scalar::<_, Uuid>("SELECT id FROM classes WHERE id = $1")
            .bind(class_id)
            .fetch_optional(db)
            .await
            .context("Failed to fetch class")
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found("Class not found"))?;

        let rows = sqlx::query_as::<_, (String, i64)>(
            "SELECT gender, COUNT(*)
             FROM students
             WHERE class_id = $1
             GROUP BY gender",
        )
        .bind(class_id)
        .fetch_all(db)
        .await
        .context("Failed to aggregate genders")
        .map_err(AppError::database)?;

        let mut distribution = GenderDistribution {
            male: 0,
            female: 0,
            other: 0,
        };

        for (gender, count) in rows {
            match gender.as_str() {
                "male" => distribution.male = count,
                "female" => distribution.female = count,
                _ => distribution.other += count,
            }
        }

        Ok(distribution)
    }

    /// School-wide totals, recomputed from the full current data set.
    #[instrument(skip(db))]
    pub async fn financial_summary(db: &PgPool) -> Result<FinancialSummary, AppError> {
        let total_salaries =
            sqlx::query_scalar::<_, f64>("SELECT COALESCE(SUM(salary), 0)::float8 FROM teachers")
                .fetch_one(db)
                .await
                .context("Failed to total salaries")
                .map_err(AppError::database)?;

        let total_fees = sqlx::query_scalar::<_, f64>(
            "SELECT COALESCE(SUM(c.student_fees * COALESCE(sc.cnt, 0)), 0)::float8
             FROM classes c
             LEFT JOIN (
                 SELECT class_id, COUNT(*) AS cnt
                 FROM students
                 GROUP BY class_id
             ) sc ON sc.class_id = c.id",
        )
        .fetch_one(db)
        .await
        .context("Failed to total fees")
        .map_err(AppError::database)?;

        Ok(FinancialSummary {
            total_salaries,
            total_fees,
            net_balance: total_fees - total_salaries,
        })
    }
}

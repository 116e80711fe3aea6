use anyhow::Context;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::utils::errors::AppError;
use crate::utils::jwt::create_access_token;
use crate::utils::password::{hash_password, verify_password};

use super::model::{LoginRequest, LoginResponse, Principal, RegisterRequestDto};

pub struct AuthService;

impl AuthService {
    #[instrument(skip(db, dto))]
    pub async fn register(db: &PgPool, dto: RegisterRequestDto) -> Result<Principal, AppError> {
        let existing = sqlx::query_scalar::<_, Uuid>("SELECT id FROM principals WHERE email = $1")
            .bind(&dto.email)
            .fetch_optional(db)
            .await
            .context("Failed to check for existing principal")
            .map_err(AppError::database)?;

        if existing.is_some() {
            return Err(AppError::conflict(format!(
                "Account with email {} already exists",
                dto.email
            )));
        }

        let password_hash = hash_password(&dto.password)?;

        let principal = sqlx::query_as::<_, Principal>(
            "INSERT INTO principals (email, password_hash, role)
             VALUES ($1, $2, $3)
             RETURNING id, email, role, created_at",
        )
        .bind(&dto.email)
        .bind(&password_hash)
        .bind(dto.role.as_str())
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                // unique violation from a concurrent registration
                if db_err.is_unique_violation() {
                    return AppError::conflict(format!(
                        "Account with email {} already exists",
                        dto.email
                    ));
                }
            }
            AppError::database(anyhow::Error::from(e))
        })?;

        Ok(principal)
    }

    #[instrument(skip(db, dto, jwt_config))]
    pub async fn login(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        #[derive(sqlx::FromRow)]
        struct PrincipalWithPassword {
            id: Uuid,
            email: String,
            role: String,
            password_hash: String,
            created_at: DateTime<Utc>,
        }

        let principal = sqlx::query_as::<_, PrincipalWithPassword>(
            "SELECT id, email, role, password_hash, created_at FROM principals WHERE email = $1",
        )
        .bind(&dto.email)
        .fetch_optional(db)
        .await
        .context("Failed to fetch principal")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::unauthorized("Invalid credentials"))?;

        let is_valid = verify_password(&dto.password, &principal.password_hash)?;

        if !is_valid {
            return Err(AppError::unauthorized("Invalid credentials"));
        }

        // The role supplied at login must match the stored role. A mismatch is
        // a verification failure, never a silent role override.
        if principal.role != dto.role.as_str() {
            return Err(AppError::unauthorized("Invalid credentials"));
        }

        let access_token = create_access_token(principal.id, &principal.email, dto.role, jwt_config)?;

        Ok(LoginResponse {
            access_token,
            user: Principal {
                id: principal.id,
                email: principal.email,
                role: principal.role,
                created_at: principal.created_at,
            },
        })
    }
}

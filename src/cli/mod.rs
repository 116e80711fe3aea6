//! Administrative CLI commands.

pub mod seeder;

use anyhow::{Context, bail};
use sqlx::PgPool;
use uuid::Uuid;

use crate::modules::auth::model::Role;
use crate::utils::password::hash_password;

/// Creates an admin principal directly in the database. Used to bootstrap
/// the first account before the API has any admin to call it with.
pub async fn create_admin(pool: &PgPool, email: &str, password: &str) -> anyhow::Result<Uuid> {
    let existing = sqlx::query_scalar::<_, Uuid>("SELECT id FROM principals WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await
        .context("Failed to check for existing principal")?;

    if existing.is_some() {
        bail!("An account with email {} already exists", email);
    }

    let password_hash =
        hash_password(password).map_err(|e| anyhow::anyhow!("{}", e.error))?;

    let id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO principals (email, password_hash, role)
         VALUES ($1, $2, $3)
         RETURNING id",
    )
    .bind(email)
    .bind(&password_hash)
    .bind(Role::Admin.as_str())
    .fetch_one(pool)
    .await
    .context("Failed to insert admin principal")?;

    Ok(id)
}

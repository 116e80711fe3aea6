//! Role-based authorization for Axum.
//!
//! The allowed-role set for each operation is declared where the operation is
//! registered: either as a route layer built from [`require_roles`], or as a
//! typed extractor ([`RequireAdmin`], [`RequireStaff`], [`RequireAuthenticated`])
//! in the handler signature. A valid token with a role outside the set is
//! rejected with 403; a missing or invalid token never reaches the check.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};

use crate::middleware::auth::AuthUser;
use crate::modules::auth::model::Role;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Class/Teacher/Student write operations.
pub const ADMIN_ONLY: &[Role] = &[Role::Admin];
/// Teacher and Student read operations.
pub const STAFF: &[Role] = &[Role::Admin, Role::Teacher];
/// Class read operations.
pub const ANY_ROLE: &[Role] = &[Role::Admin, Role::Teacher, Role::Student];

/// Checks that the authenticated principal's role is in the allowed set.
pub fn check_any_role(auth_user: &AuthUser, allowed_roles: &[Role]) -> Result<(), AppError> {
    let role = auth_user.role()?;

    if !allowed_roles.contains(&role) {
        return Err(AppError::forbidden(format!(
            "Access denied. Required roles: {:?}, but user has role: {:?}",
            allowed_roles, role
        )));
    }

    Ok(())
}

/// Middleware that gates a route group on an allowed-role set.
///
/// Use via [`axum::middleware::from_fn_with_state`] with one of the named
/// helpers below, so the role set is visible at router registration time.
pub async fn require_roles(
    State(state): State<AppState>,
    req: Request,
    next: Next,
    allowed_roles: &'static [Role],
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await?;
    check_any_role(&auth_user, allowed_roles)?;

    Ok(next.run(Request::from_parts(parts, body)).await)
}

pub async fn require_admin(
    state: State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    require_roles(state, req, next, ADMIN_ONLY).await
}

pub async fn require_staff(
    state: State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    require_roles(state, req, next, STAFF).await
}

pub async fn require_authenticated(
    state: State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    require_roles(state, req, next, ANY_ROLE).await
}

/// Extractor gating a single handler on `{admin}`.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_user = AuthUser::from_request_parts(parts, state).await?;
        check_any_role(&auth_user, ADMIN_ONLY)?;
        Ok(RequireAdmin(auth_user))
    }
}

/// Extractor gating a single handler on `{admin, teacher}`.
#[derive(Debug, Clone)]
pub struct RequireStaff(pub AuthUser);

impl FromRequestParts<AppState> for RequireStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_user = AuthUser::from_request_parts(parts, state).await?;
        check_any_role(&auth_user, STAFF)?;
        Ok(RequireStaff(auth_user))
    }
}

/// Extractor gating a single handler on any known role.
#[derive(Debug, Clone)]
pub struct RequireAuthenticated(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuthenticated {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_user = AuthUser::from_request_parts(parts, state).await?;
        check_any_role(&auth_user, ANY_ROLE)?;
        Ok(RequireAuthenticated(auth_user))
    }
}

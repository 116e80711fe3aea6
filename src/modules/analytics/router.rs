use axum::{Router, middleware, routing::get};

use crate::middleware::role::{require_admin, require_authenticated};
use crate::state::AppState;

use super::controller::{get_financial_summary, get_gender_distribution};

/// Analytics routes with their allowed-role sets attached at registration:
/// the per-class gender view follows the Class read policy (any role), the
/// financial summary is admin-only.
pub fn init_analytics_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/classes/{id}/genders", get(get_gender_distribution))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_authenticated,
        ))
        .merge(
            Router::new()
                .route("/financial-summary", get(get_financial_summary))
                .route_layer(middleware::from_fn_with_state(state, require_admin)),
        )
}

//! Admin dashboard routes.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use mandi_common::error::AppError;
use mandi_engine::stats::DashboardStats;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/admin/stats", get(dashboard_stats))
}

/// GET /api/admin/stats — counts for the dashboard header.
async fn dashboard_stats(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<DashboardStats>, AppError> {
    let stats = DashboardStats::gather(&state.pool).await?;
    Ok(Json(stats))
}

//! Lead routes. The welcome popup posts here without auth; the back
//! office reads and works the pipeline.

use axum::extract::{Path, State};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use uuid::Uuid;

use mandi_common::error::AppError;
use mandi_common::types::Lead;
use mandi_engine::leads::{CreateLeadParams, LeadService, UpdateLeadParams};

use crate::middleware::auth::AuthUser;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/leads", post(create_lead))
        .route("/api/leads", get(list_leads))
        .route("/api/leads/{id}", put(update_lead))
        .route("/api/leads/{id}", delete(delete_lead))
}

/// POST /api/leads — capture a lead (public).
async fn create_lead(
    State(state): State<AppState>,
    Json(params): Json<CreateLeadParams>,
) -> Result<Json<Lead>, AppError> {
    let lead = LeadService::create(&state.pool, &params).await?;
    Ok(Json(lead))
}

/// GET /api/leads — all leads for the admin table.
async fn list_leads(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Vec<Lead>>, AppError> {
    let leads = LeadService::list(&state.pool).await?;
    Ok(Json(leads))
}

/// PUT /api/leads/:id — update pipeline status.
async fn update_lead(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(params): Json<UpdateLeadParams>,
) -> Result<Json<Lead>, AppError> {
    let lead = LeadService::update(&state.pool, id, &params).await?;
    Ok(Json(lead))
}

/// DELETE /api/leads/:id
async fn delete_lead(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let deleted = LeadService::delete(&state.pool, id).await?;
    if deleted {
        Ok(Json(serde_json::json!({"deleted": true})))
    } else {
        Err(AppError::NotFound(format!("Lead {} not found", id)))
    }
}

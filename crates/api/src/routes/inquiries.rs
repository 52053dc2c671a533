//! Seller inquiry routes — the "sell your vehicle" form and its admin
//! back-office, plus the registration-number lookups.
//!
//! The public lookup exposes only a reduced summary of the RTO record;
//! the authenticated lookup returns the full provider record.

use std::collections::HashMap;

use axum::extract::{Multipart, Path, State};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use uuid::Uuid;

use mandi_common::error::AppError;
use mandi_common::types::{RtoVehicleDetails, RtoVehicleSummary, SellerInquiry};
use mandi_engine::inquiries::{
    CreateInquiryParams, InquiryService, MAX_PHOTOS, UpdateInquiryParams,
};

use crate::middleware::auth::AuthUser;
use crate::routes::form;
use crate::state::AppState;
use crate::uploads;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/seller-inquiries", post(create_inquiry))
        .route("/api/seller-inquiries", get(list_inquiries))
        .route("/api/seller-inquiries/{id}", get(get_inquiry))
        .route("/api/seller-inquiries/{id}", put(update_inquiry))
        .route("/api/seller-inquiries/{id}", delete(delete_inquiry))
        .route("/api/seller-inquiries/lookup/{reg_no}", get(lookup))
        .route(
            "/api/seller-inquiries/public-lookup/{reg_no}",
            get(public_lookup),
        )
}

/// POST /api/seller-inquiries — a seller submits their vehicle (public,
/// multipart with photos and an optional RC card scan).
async fn create_inquiry(
    State(mut state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<SellerInquiry>, AppError> {
    let mut fields: HashMap<String, String> = HashMap::new();
    let mut photos: Vec<String> = Vec::new();
    let mut rc_card: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Upload(format!("Malformed multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "photos" => {
                if photos.len() >= MAX_PHOTOS {
                    return Err(AppError::Validation(format!(
                        "At most {} photos are accepted",
                        MAX_PHOTOS
                    )));
                }
                photos.push(uploads::store_image(&state.config.upload_dir, field).await?);
            }
            "rcCard" => {
                rc_card = Some(uploads::store_image(&state.config.upload_dir, field).await?);
            }
            _ => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Upload(format!("Unreadable field '{}': {}", name, e)))?;
                fields.insert(name, value);
            }
        }
    }

    let reg_no = form::required(&fields, "regNo")?;

    // Best-effort provider lookup so the back office sees the RTO record
    // alongside the submission. A lookup failure never blocks the
    // submission itself.
    let rto_details = if state.rto.is_configured() {
        match state.rto.lookup(&mut state.redis, &reg_no).await {
            Ok(details) => serde_json::to_value(&details).ok(),
            Err(e) => {
                tracing::debug!(reg_no = %reg_no, error = %e, "RTO lookup at submission failed");
                None
            }
        }
    } else {
        None
    };

    let params = CreateInquiryParams {
        name: form::required(&fields, "name")?,
        phone: form::required(&fields, "phone")?,
        reg_no,
        km_driven: form::parse_required(&fields, "kmDriven")?,
        demand: form::parse_required(&fields, "demand")?,
        vehicle_type: form::parse_enum(&fields, "type")?,
        photos,
        rc_card,
        rto_details,
    };

    let inquiry = InquiryService::create(&state.pool, &params).await?;
    Ok(Json(inquiry))
}

/// GET /api/seller-inquiries — all inquiries for the admin table.
async fn list_inquiries(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Vec<SellerInquiry>>, AppError> {
    let inquiries = InquiryService::list(&state.pool).await?;
    Ok(Json(inquiries))
}

/// GET /api/seller-inquiries/:id
async fn get_inquiry(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<SellerInquiry>, AppError> {
    let inquiry = InquiryService::get(&state.pool, id).await?;
    Ok(Json(inquiry))
}

/// PUT /api/seller-inquiries/:id — update pipeline status.
async fn update_inquiry(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(params): Json<UpdateInquiryParams>,
) -> Result<Json<SellerInquiry>, AppError> {
    let inquiry = InquiryService::update(&state.pool, id, &params).await?;
    Ok(Json(inquiry))
}

/// DELETE /api/seller-inquiries/:id
async fn delete_inquiry(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let deleted = InquiryService::delete(&state.pool, id).await?;
    if deleted {
        Ok(Json(serde_json::json!({"deleted": true})))
    } else {
        Err(AppError::NotFound(format!("Inquiry {} not found", id)))
    }
}

/// GET /api/seller-inquiries/lookup/:reg_no — full RTO record (admin).
async fn lookup(
    State(mut state): State<AppState>,
    _auth: AuthUser,
    Path(reg_no): Path<String>,
) -> Result<Json<RtoVehicleDetails>, AppError> {
    let details = state.rto.lookup(&mut state.redis, &reg_no).await?;
    Ok(Json(details))
}

/// GET /api/seller-inquiries/public-lookup/:reg_no — reduced record for
/// the sell-your-vehicle form (public).
async fn public_lookup(
    State(mut state): State<AppState>,
    Path(reg_no): Path<String>,
) -> Result<Json<RtoVehicleSummary>, AppError> {
    let details = state.rto.lookup(&mut state.redis, &reg_no).await?;
    Ok(Json(RtoVehicleSummary::from(&details)))
}

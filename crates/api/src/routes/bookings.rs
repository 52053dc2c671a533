//! Booking routes. Creation is the public storefront surface; everything
//! else is back-office.

use axum::extract::{Path, State};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use uuid::Uuid;

use mandi_common::error::AppError;
use mandi_common::types::Booking;
use mandi_engine::bookings::{
    BookingService, BookingWithVehicle, CreateBookingParams, UpdateBookingParams,
};

use crate::middleware::auth::AuthUser;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/bookings", post(create_booking))
        .route("/api/bookings", get(list_bookings))
        .route("/api/bookings/{id}", get(get_booking))
        .route("/api/bookings/{id}", put(update_booking))
        .route("/api/bookings/{id}", delete(delete_booking))
}

/// POST /api/bookings — a customer requests a booking (public).
async fn create_booking(
    State(state): State<AppState>,
    Json(params): Json<CreateBookingParams>,
) -> Result<Json<Booking>, AppError> {
    let booking = BookingService::create(&state.pool, &params).await?;
    Ok(Json(booking))
}

/// GET /api/bookings — all bookings for the admin table.
async fn list_bookings(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Vec<BookingWithVehicle>>, AppError> {
    let bookings = BookingService::list(&state.pool).await?;
    Ok(Json(bookings))
}

/// GET /api/bookings/:id
async fn get_booking(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingWithVehicle>, AppError> {
    let booking = BookingService::get(&state.pool, id).await?;
    Ok(Json(booking))
}

/// PUT /api/bookings/:id — advance status or edit notes.
async fn update_booking(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(params): Json<UpdateBookingParams>,
) -> Result<Json<Booking>, AppError> {
    let booking = BookingService::update(&state.pool, id, &params).await?;
    Ok(Json(booking))
}

/// DELETE /api/bookings/:id
async fn delete_booking(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let deleted = BookingService::delete(&state.pool, id).await?;
    if deleted {
        Ok(Json(serde_json::json!({"deleted": true})))
    } else {
        Err(AppError::NotFound(format!("Booking {} not found", id)))
    }
}

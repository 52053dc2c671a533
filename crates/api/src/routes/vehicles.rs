//! Vehicle catalog routes.
//!
//! Browsing is public; mutations require an authenticated admin. New
//! listings arrive as multipart forms carrying the image files alongside
//! the text fields.

use std::collections::HashMap;

use axum::extract::{Multipart, Path, Query, State};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use uuid::Uuid;

use mandi_common::error::AppError;
use mandi_common::types::Vehicle;
use mandi_engine::vehicles::{
    CreateVehicleParams, UpdateVehicleParams, VehicleFilter, VehicleService,
};

use crate::middleware::auth::AuthUser;
use crate::routes::form;
use crate::state::AppState;
use crate::uploads;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/vehicles", get(list_vehicles))
        .route("/api/vehicles", post(create_vehicle))
        .route("/api/vehicles/{id}", get(get_vehicle))
        .route("/api/vehicles/{id}", put(update_vehicle))
        .route("/api/vehicles/{id}", delete(delete_vehicle))
}

/// GET /api/vehicles — list listings matching the storefront filters.
async fn list_vehicles(
    State(state): State<AppState>,
    Query(filter): Query<VehicleFilter>,
) -> Result<Json<Vec<Vehicle>>, AppError> {
    let vehicles = VehicleService::list(&state.pool, &filter).await?;
    Ok(Json(vehicles))
}

/// GET /api/vehicles/:id — a single listing.
async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vehicle>, AppError> {
    let vehicle = VehicleService::get(&state.pool, id).await?;
    Ok(Json(vehicle))
}

/// POST /api/vehicles — create a listing from the admin's multipart form.
async fn create_vehicle(
    State(state): State<AppState>,
    _auth: AuthUser,
    mut multipart: Multipart,
) -> Result<Json<Vehicle>, AppError> {
    let mut fields: HashMap<String, String> = HashMap::new();
    let mut images: Vec<String> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Upload(format!("Malformed multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == "images" {
            images.push(uploads::store_image(&state.config.upload_dir, field).await?);
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| AppError::Upload(format!("Unreadable field '{}': {}", name, e)))?;
            fields.insert(name, value);
        }
    }

    let params = CreateVehicleParams {
        title: form::required(&fields, "title")?,
        vehicle_type: form::parse_enum(&fields, "type")?,
        brand: form::required(&fields, "brand")?,
        model: form::required(&fields, "model")?,
        year: form::parse_required(&fields, "year")?,
        price: form::parse_required(&fields, "price")?,
        original_price: form::parse_optional(&fields, "originalPrice")?,
        mileage: form::required(&fields, "mileage")?,
        km_driven: form::parse_optional(&fields, "kmDriven")?,
        fuel_type: form::parse_enum(&fields, "fuelType")?,
        transmission: form::parse_enum(&fields, "transmission")?,
        description: form::optional(&fields, "description").unwrap_or_default(),
        features: form::parse_features(&fields, "features"),
        status: form::parse_enum_optional(&fields, "status")?,
        owner_count: form::parse_optional(&fields, "ownerCount")?,
        location: form::optional(&fields, "location"),
        featured: form::parse_bool(&fields, "featured"),
        images,
    };

    let vehicle = VehicleService::create(&state.pool, &params).await?;
    Ok(Json(vehicle))
}

/// PUT /api/vehicles/:id — partial update.
async fn update_vehicle(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(params): Json<UpdateVehicleParams>,
) -> Result<Json<Vehicle>, AppError> {
    let vehicle = VehicleService::update(&state.pool, id, &params).await?;
    Ok(Json(vehicle))
}

/// DELETE /api/vehicles/:id
async fn delete_vehicle(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let deleted = VehicleService::delete(&state.pool, id).await?;
    if deleted {
        Ok(Json(serde_json::json!({"deleted": true})))
    } else {
        Err(AppError::NotFound(format!("Vehicle {} not found", id)))
    }
}

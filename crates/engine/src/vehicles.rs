//! Vehicle catalog service — CRUD operations for marketplace listings.
//!
//! Listings are what the storefront browses and the back office manages.
//! The list operation carries the storefront's filter set (type, fuel,
//! transmission, price ceiling) so filtering happens in SQL, not in the
//! client.

use sqlx::PgPool;
use uuid::Uuid;

use mandi_common::error::AppError;
use mandi_common::types::{FuelType, Transmission, Vehicle, VehicleStatus, VehicleType};

/// Service layer for vehicle CRUD operations.
pub struct VehicleService;

/// Storefront filter set for listing vehicles. All fields optional;
/// an empty filter returns the whole catalog, newest first.
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VehicleFilter {
    #[serde(rename = "type")]
    pub vehicle_type: Option<VehicleType>,
    pub fuel_type: Option<FuelType>,
    pub transmission: Option<Transmission>,
    pub max_price: Option<i64>,
    pub status: Option<VehicleStatus>,
    pub featured: Option<bool>,
}

/// Parameters for creating a new listing. Assembled by the API layer
/// from the admin's multipart form; `images` holds the stored upload
/// paths.
#[derive(Debug, Clone)]
pub struct CreateVehicleParams {
    pub title: String,
    pub vehicle_type: VehicleType,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub price: i64,
    pub original_price: Option<i64>,
    pub mileage: String,
    pub km_driven: Option<i64>,
    pub fuel_type: FuelType,
    pub transmission: Transmission,
    pub description: String,
    pub features: Vec<String>,
    pub status: Option<VehicleStatus>,
    pub owner_count: Option<i32>,
    pub location: Option<String>,
    pub featured: bool,
    pub images: Vec<String>,
}

/// Parameters for a partial update of an existing listing.
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateVehicleParams {
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub vehicle_type: Option<VehicleType>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub price: Option<i64>,
    pub original_price: Option<i64>,
    pub mileage: Option<String>,
    pub km_driven: Option<i64>,
    pub fuel_type: Option<FuelType>,
    pub transmission: Option<Transmission>,
    pub description: Option<String>,
    pub features: Option<Vec<String>>,
    pub status: Option<VehicleStatus>,
    pub owner_count: Option<i32>,
    pub location: Option<String>,
    pub featured: Option<bool>,
    pub images: Option<Vec<String>>,
}

impl VehicleService {
    /// Create a new listing.
    pub async fn create(pool: &PgPool, params: &CreateVehicleParams) -> Result<Vehicle, AppError> {
        if params.price <= 0 {
            return Err(AppError::Validation("price must be positive".to_string()));
        }
        if params.year < 1950 {
            return Err(AppError::Validation(format!(
                "Implausible model year {}",
                params.year
            )));
        }

        let original_price = params.original_price.unwrap_or(params.price);
        let discount = derive_discount(params.price, original_price);
        let status = params.status.unwrap_or(VehicleStatus::Available);
        let id = Uuid::new_v4();

        let vehicle: Vehicle = sqlx::query_as(
            r#"
            INSERT INTO vehicles (
                id, title, vehicle_type, brand, model, year, price, original_price,
                discount, mileage, km_driven, fuel_type, transmission, description,
                images, features, status, owner_count, location, featured
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                    $15, $16, $17, $18, $19, $20)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&params.title)
        .bind(params.vehicle_type)
        .bind(&params.brand)
        .bind(&params.model)
        .bind(params.year)
        .bind(params.price)
        .bind(original_price)
        .bind(discount)
        .bind(&params.mileage)
        .bind(params.km_driven)
        .bind(params.fuel_type)
        .bind(params.transmission)
        .bind(&params.description)
        .bind(serde_json::json!(params.images))
        .bind(serde_json::json!(params.features))
        .bind(status)
        .bind(params.owner_count)
        .bind(&params.location)
        .bind(params.featured)
        .fetch_one(pool)
        .await?;

        tracing::info!(
            vehicle_id = %vehicle.id,
            title = %params.title,
            price = params.price,
            "Vehicle listed"
        );

        Ok(vehicle)
    }

    /// List vehicles matching the storefront filter, newest first.
    pub async fn list(pool: &PgPool, filter: &VehicleFilter) -> Result<Vec<Vehicle>, AppError> {
        let vehicles: Vec<Vehicle> = sqlx::query_as(
            r#"
            SELECT * FROM vehicles
            WHERE ($1::text IS NULL OR vehicle_type = $1)
              AND ($2::text IS NULL OR fuel_type = $2)
              AND ($3::text IS NULL OR transmission = $3)
              AND ($4::bigint IS NULL OR price <= $4)
              AND ($5::text IS NULL OR status = $5)
              AND ($6::boolean IS NULL OR featured = $6)
            ORDER BY created_at DESC
            "#,
        )
        .bind(filter.vehicle_type.map(|t| t.to_string()))
        .bind(filter.fuel_type.map(|f| f.to_string()))
        .bind(filter.transmission.map(|t| t.to_string()))
        .bind(filter.max_price)
        .bind(filter.status.map(|s| s.to_string()))
        .bind(filter.featured)
        .fetch_all(pool)
        .await?;

        Ok(vehicles)
    }

    /// Get a single listing by ID.
    pub async fn get(pool: &PgPool, vehicle_id: Uuid) -> Result<Vehicle, AppError> {
        let vehicle: Vehicle = sqlx::query_as("SELECT * FROM vehicles WHERE id = $1")
            .bind(vehicle_id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Vehicle {} not found", vehicle_id)))?;

        Ok(vehicle)
    }

    /// Partially update a listing. Absent fields keep their stored values;
    /// the discount is re-derived whenever either price changes.
    pub async fn update(
        pool: &PgPool,
        vehicle_id: Uuid,
        params: &UpdateVehicleParams,
    ) -> Result<Vehicle, AppError> {
        let existing = Self::get(pool, vehicle_id).await?;

        let price = params.price.unwrap_or(existing.price);
        if price <= 0 {
            return Err(AppError::Validation("price must be positive".to_string()));
        }
        let original_price = params.original_price.unwrap_or(existing.original_price);
        let discount = derive_discount(price, original_price);

        let images = params
            .images
            .as_ref()
            .map(|i| serde_json::json!(i))
            .unwrap_or(existing.images);
        let features = params
            .features
            .as_ref()
            .map(|f| serde_json::json!(f))
            .unwrap_or(existing.features);

        let vehicle: Vehicle = sqlx::query_as(
            r#"
            UPDATE vehicles
            SET title = $1, vehicle_type = $2, brand = $3, model = $4, year = $5,
                price = $6, original_price = $7, discount = $8, mileage = $9,
                km_driven = $10, fuel_type = $11, transmission = $12,
                description = $13, images = $14, features = $15, status = $16,
                owner_count = $17, location = $18, featured = $19, updated_at = now()
            WHERE id = $20
            RETURNING *
            "#,
        )
        .bind(params.title.as_ref().unwrap_or(&existing.title))
        .bind(params.vehicle_type.unwrap_or(existing.vehicle_type))
        .bind(params.brand.as_ref().unwrap_or(&existing.brand))
        .bind(params.model.as_ref().unwrap_or(&existing.model))
        .bind(params.year.unwrap_or(existing.year))
        .bind(price)
        .bind(original_price)
        .bind(discount)
        .bind(params.mileage.as_ref().unwrap_or(&existing.mileage))
        .bind(params.km_driven.or(existing.km_driven))
        .bind(params.fuel_type.unwrap_or(existing.fuel_type))
        .bind(params.transmission.unwrap_or(existing.transmission))
        .bind(params.description.as_ref().unwrap_or(&existing.description))
        .bind(images)
        .bind(features)
        .bind(params.status.unwrap_or(existing.status))
        .bind(params.owner_count.or(existing.owner_count))
        .bind(params.location.as_ref().or(existing.location.as_ref()))
        .bind(params.featured.unwrap_or(existing.featured))
        .bind(vehicle_id)
        .fetch_one(pool)
        .await?;

        tracing::info!(vehicle_id = %vehicle_id, "Vehicle updated");

        Ok(vehicle)
    }

    /// Delete a listing. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, vehicle_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(vehicle_id)
            .execute(pool)
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::info!(vehicle_id = %vehicle_id, "Vehicle deleted");
        }
        Ok(deleted)
    }
}

/// Percentage off the original price, rounded to the nearest point.
/// Zero when the listing is not discounted.
fn derive_discount(price: i64, original_price: i64) -> i32 {
    if original_price > price && original_price > 0 {
        (((original_price - price) as f64 / original_price as f64) * 100.0).round() as i32
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discount_derivation() {
        assert_eq!(derive_discount(450_000, 500_000), 10);
        assert_eq!(derive_discount(500_000, 500_000), 0);
        assert_eq!(derive_discount(500_000, 450_000), 0);
        assert_eq!(derive_discount(475_000, 500_000), 5);
        assert_eq!(derive_discount(100, 0), 0);
    }
}

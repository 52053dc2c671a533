//! Booking service — customer booking requests against listed vehicles.
//!
//! Bookings arrive from the public storefront (no auth) and are worked
//! by the back office: status advances pending → contacted → completed,
//! or is cancelled.

use sqlx::PgPool;
use uuid::Uuid;

use mandi_common::error::AppError;
use mandi_common::types::{Booking, BookingStatus};

use crate::leads::is_valid_phone;

/// Service layer for booking CRUD operations.
pub struct BookingService;

/// Parameters for creating a booking (public surface).
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingParams {
    pub vehicle_id: Uuid,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub message: Option<String>,
    pub offered_price: Option<i64>,
    pub preferred_contact_time: Option<String>,
}

/// Parameters for the back office updating a booking.
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateBookingParams {
    pub status: Option<BookingStatus>,
    pub notes: Option<String>,
}

/// A booking joined with its vehicle's title for the admin table.
#[derive(Debug, Clone, serde::Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BookingWithVehicle {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub booking: Booking,
    pub vehicle_title: Option<String>,
}

impl BookingService {
    /// Create a booking for a listed vehicle.
    pub async fn create(pool: &PgPool, params: &CreateBookingParams) -> Result<Booking, AppError> {
        if params.customer_name.trim().is_empty() {
            return Err(AppError::Validation("customerName is required".to_string()));
        }
        if !is_valid_phone(&params.customer_phone) {
            return Err(AppError::Validation(
                "customerPhone must be a 10-digit mobile number".to_string(),
            ));
        }
        if !params.customer_email.contains('@') {
            return Err(AppError::Validation("customerEmail is invalid".to_string()));
        }

        // The referenced listing must exist; surface a clean 404 instead
        // of a foreign-key error.
        let exists: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM vehicles WHERE id = $1")
            .bind(params.vehicle_id)
            .fetch_optional(pool)
            .await?;
        if exists.is_none() {
            return Err(AppError::NotFound(format!(
                "Vehicle {} not found",
                params.vehicle_id
            )));
        }

        let id = Uuid::new_v4();
        let booking: Booking = sqlx::query_as(
            r#"
            INSERT INTO bookings (
                id, vehicle_id, customer_name, customer_email, customer_phone,
                message, offered_price, status, preferred_contact_time
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(params.vehicle_id)
        .bind(params.customer_name.trim())
        .bind(params.customer_email.trim())
        .bind(&params.customer_phone)
        .bind(&params.message)
        .bind(params.offered_price)
        .bind(BookingStatus::Pending)
        .bind(&params.preferred_contact_time)
        .fetch_one(pool)
        .await?;

        tracing::info!(
            booking_id = %booking.id,
            vehicle_id = %params.vehicle_id,
            "Booking received"
        );

        Ok(booking)
    }

    /// List all bookings, newest first, with the vehicle title joined in.
    pub async fn list(pool: &PgPool) -> Result<Vec<BookingWithVehicle>, AppError> {
        let bookings: Vec<BookingWithVehicle> = sqlx::query_as(
            r#"
            SELECT b.*, v.title AS vehicle_title
            FROM bookings b
            LEFT JOIN vehicles v ON b.vehicle_id = v.id
            ORDER BY b.created_at DESC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(bookings)
    }

    /// Get a single booking by ID.
    pub async fn get(pool: &PgPool, booking_id: Uuid) -> Result<BookingWithVehicle, AppError> {
        let booking: BookingWithVehicle = sqlx::query_as(
            r#"
            SELECT b.*, v.title AS vehicle_title
            FROM bookings b
            LEFT JOIN vehicles v ON b.vehicle_id = v.id
            WHERE b.id = $1
            "#,
        )
        .bind(booking_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Booking {} not found", booking_id)))?;

        Ok(booking)
    }

    /// Update a booking's status and/or admin notes.
    pub async fn update(
        pool: &PgPool,
        booking_id: Uuid,
        params: &UpdateBookingParams,
    ) -> Result<Booking, AppError> {
        let existing: Booking = sqlx::query_as("SELECT * FROM bookings WHERE id = $1")
            .bind(booking_id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking {} not found", booking_id)))?;

        let status = params.status.unwrap_or(existing.status);
        let notes = params.notes.clone().or(existing.notes);

        let booking: Booking = sqlx::query_as(
            r#"
            UPDATE bookings
            SET status = $1, notes = $2, updated_at = now()
            WHERE id = $3
            RETURNING *
            "#,
        )
        .bind(status)
        .bind(&notes)
        .bind(booking_id)
        .fetch_one(pool)
        .await?;

        tracing::info!(booking_id = %booking_id, status = %status, "Booking updated");

        Ok(booking)
    }

    /// Delete a booking. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, booking_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(booking_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

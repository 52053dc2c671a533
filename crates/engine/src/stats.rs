//! Dashboard statistics — the aggregate counts shown at the top of the
//! admin dashboard.

use sqlx::PgPool;

use mandi_common::error::AppError;
use mandi_common::types::{BookingStatus, VehicleStatus};

/// Aggregate counts for the admin dashboard header.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_vehicles: i64,
    pub available_vehicles: i64,
    pub total_bookings: i64,
    pub pending_bookings: i64,
    pub total_leads: i64,
    pub total_inquiries: i64,
}

impl DashboardStats {
    /// Gather the counts in one round trip.
    pub async fn gather(pool: &PgPool) -> Result<Self, AppError> {
        let row: (i64, i64, i64, i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT
                (SELECT count(*) FROM vehicles),
                (SELECT count(*) FROM vehicles WHERE status = $1),
                (SELECT count(*) FROM bookings),
                (SELECT count(*) FROM bookings WHERE status = $2),
                (SELECT count(*) FROM leads),
                (SELECT count(*) FROM seller_inquiries)
            "#,
        )
        .bind(VehicleStatus::Available)
        .bind(BookingStatus::Pending)
        .fetch_one(pool)
        .await?;

        Ok(Self {
            total_vehicles: row.0,
            available_vehicles: row.1,
            total_bookings: row.2,
            pending_bookings: row.3,
            total_leads: row.4,
            total_inquiries: row.5,
        })
    }
}

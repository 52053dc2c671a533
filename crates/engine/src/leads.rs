//! Lead service — contacts captured by the storefront welcome popup.
//!
//! A lead is just a name and a mobile number plus where it came from.
//! The back office moves leads through new → contacted → interested →
//! converted (or closed).

use sqlx::PgPool;
use uuid::Uuid;

use mandi_common::error::AppError;
use mandi_common::types::{Lead, LeadStatus};

/// Source recorded when the caller does not say where the lead came from.
const DEFAULT_SOURCE: &str = "popup";

/// Service layer for lead CRUD operations.
pub struct LeadService;

/// Parameters for capturing a lead (public surface).
#[derive(Debug, Clone, serde::Deserialize)]
pub struct CreateLeadParams {
    pub name: String,
    pub phone: String,
    pub source: Option<String>,
}

/// Parameters for the back office updating a lead.
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(default)]
pub struct UpdateLeadParams {
    pub status: Option<LeadStatus>,
}

impl LeadService {
    /// Capture a new lead.
    pub async fn create(pool: &PgPool, params: &CreateLeadParams) -> Result<Lead, AppError> {
        if params.name.trim().is_empty() {
            return Err(AppError::Validation("name is required".to_string()));
        }
        if !is_valid_phone(&params.phone) {
            return Err(AppError::Validation(
                "phone must be a 10-digit mobile number".to_string(),
            ));
        }

        let source = params
            .source
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(DEFAULT_SOURCE);

        let id = Uuid::new_v4();
        let lead: Lead = sqlx::query_as(
            r#"
            INSERT INTO leads (id, name, phone, source, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(params.name.trim())
        .bind(&params.phone)
        .bind(source)
        .bind(LeadStatus::New)
        .fetch_one(pool)
        .await?;

        tracing::info!(lead_id = %lead.id, source = %source, "Lead captured");

        Ok(lead)
    }

    /// List all leads, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Lead>, AppError> {
        let leads: Vec<Lead> = sqlx::query_as("SELECT * FROM leads ORDER BY created_at DESC")
            .fetch_all(pool)
            .await?;

        Ok(leads)
    }

    /// Update a lead's pipeline status.
    pub async fn update(
        pool: &PgPool,
        lead_id: Uuid,
        params: &UpdateLeadParams,
    ) -> Result<Lead, AppError> {
        let existing: Lead = sqlx::query_as("SELECT * FROM leads WHERE id = $1")
            .bind(lead_id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Lead {} not found", lead_id)))?;

        let status = params.status.unwrap_or(existing.status);

        let lead: Lead = sqlx::query_as(
            r#"
            UPDATE leads
            SET status = $1, updated_at = now()
            WHERE id = $2
            RETURNING *
            "#,
        )
        .bind(status)
        .bind(lead_id)
        .fetch_one(pool)
        .await?;

        Ok(lead)
    }

    /// Delete a lead. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, lead_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM leads WHERE id = $1")
            .bind(lead_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// A valid customer phone number is exactly ten ASCII digits.
pub fn is_valid_phone(phone: &str) -> bool {
    phone.len() == 10 && phone.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_validation() {
        assert!(is_valid_phone("9876543210"));
        assert!(!is_valid_phone("987654321"));
        assert!(!is_valid_phone("98765432101"));
        assert!(!is_valid_phone("98765 4321"));
        assert!(!is_valid_phone("98765asdfg"));
        assert!(!is_valid_phone(""));
    }
}

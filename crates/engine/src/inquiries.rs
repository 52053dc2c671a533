//! Seller inquiry service — "sell your vehicle" submissions.
//!
//! A submission names the seller, the vehicle's registration number, how
//! far it has run and what the seller wants for it, plus photos and an
//! optional RC card scan. Registration numbers are normalized and
//! validated against the Indian plate shape before anything is stored.

use sqlx::PgPool;
use uuid::Uuid;

use mandi_common::error::AppError;
use mandi_common::types::{InquiryStatus, SellerInquiry, VehicleType};

use crate::leads::is_valid_phone;

/// Maximum number of photos accepted per submission.
pub const MAX_PHOTOS: usize = 5;

/// Service layer for seller inquiry CRUD operations.
pub struct InquiryService;

/// Parameters for a seller submission (public surface). Assembled by the
/// API layer from the multipart form; `photos` and `rc_card` hold stored
/// upload paths.
#[derive(Debug, Clone)]
pub struct CreateInquiryParams {
    pub name: String,
    pub phone: String,
    pub reg_no: String,
    pub km_driven: i64,
    pub demand: i64,
    pub vehicle_type: VehicleType,
    pub photos: Vec<String>,
    pub rc_card: Option<String>,
    pub rto_details: Option<serde_json::Value>,
}

/// Parameters for the back office updating an inquiry.
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(default)]
pub struct UpdateInquiryParams {
    pub status: Option<InquiryStatus>,
}

impl InquiryService {
    /// Record a seller submission.
    pub async fn create(
        pool: &PgPool,
        params: &CreateInquiryParams,
    ) -> Result<SellerInquiry, AppError> {
        if params.name.trim().is_empty() {
            return Err(AppError::Validation("name is required".to_string()));
        }
        if !is_valid_phone(&params.phone) {
            return Err(AppError::Validation(
                "phone must be a 10-digit mobile number".to_string(),
            ));
        }

        let reg_no = normalize_reg_no(&params.reg_no);
        if !is_valid_reg_no(&reg_no) {
            return Err(AppError::Validation(format!(
                "'{}' is not a valid registration number (e.g. MP09CD1234)",
                params.reg_no
            )));
        }

        if params.km_driven < 0 {
            return Err(AppError::Validation("kmDriven cannot be negative".to_string()));
        }
        if params.demand <= 0 {
            return Err(AppError::Validation("demand must be positive".to_string()));
        }
        if params.photos.len() > MAX_PHOTOS {
            return Err(AppError::Validation(format!(
                "At most {} photos are accepted",
                MAX_PHOTOS
            )));
        }

        let id = Uuid::new_v4();
        let inquiry: SellerInquiry = sqlx::query_as(
            r#"
            INSERT INTO seller_inquiries (
                id, name, phone, reg_no, km_driven, demand, vehicle_type,
                photos, rc_card, rto_details, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(params.name.trim())
        .bind(&params.phone)
        .bind(&reg_no)
        .bind(params.km_driven)
        .bind(params.demand)
        .bind(params.vehicle_type)
        .bind(serde_json::json!(params.photos))
        .bind(&params.rc_card)
        .bind(&params.rto_details)
        .bind(InquiryStatus::New)
        .fetch_one(pool)
        .await?;

        tracing::info!(
            inquiry_id = %inquiry.id,
            reg_no = %reg_no,
            demand = params.demand,
            "Seller inquiry received"
        );

        Ok(inquiry)
    }

    /// List all inquiries, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<SellerInquiry>, AppError> {
        let inquiries: Vec<SellerInquiry> =
            sqlx::query_as("SELECT * FROM seller_inquiries ORDER BY created_at DESC")
                .fetch_all(pool)
                .await?;

        Ok(inquiries)
    }

    /// Get a single inquiry by ID.
    pub async fn get(pool: &PgPool, inquiry_id: Uuid) -> Result<SellerInquiry, AppError> {
        let inquiry: SellerInquiry = sqlx::query_as("SELECT * FROM seller_inquiries WHERE id = $1")
            .bind(inquiry_id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Inquiry {} not found", inquiry_id)))?;

        Ok(inquiry)
    }

    /// Update an inquiry's pipeline status.
    pub async fn update(
        pool: &PgPool,
        inquiry_id: Uuid,
        params: &UpdateInquiryParams,
    ) -> Result<SellerInquiry, AppError> {
        let existing = Self::get(pool, inquiry_id).await?;
        let status = params.status.unwrap_or(existing.status);

        let inquiry: SellerInquiry = sqlx::query_as(
            r#"
            UPDATE seller_inquiries
            SET status = $1, updated_at = now()
            WHERE id = $2
            RETURNING *
            "#,
        )
        .bind(status)
        .bind(inquiry_id)
        .fetch_one(pool)
        .await?;

        tracing::info!(inquiry_id = %inquiry_id, status = %status, "Inquiry updated");

        Ok(inquiry)
    }

    /// Delete an inquiry. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, inquiry_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM seller_inquiries WHERE id = $1")
            .bind(inquiry_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Uppercase and strip all whitespace, the canonical plate form.
pub fn normalize_reg_no(reg_no: &str) -> String {
    reg_no
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Indian plate shape: two letters, two digits, one or two letters,
/// four digits (e.g. MP09CD1234). Input is expected pre-normalized.
pub fn is_valid_reg_no(reg_no: &str) -> bool {
    let bytes = reg_no.as_bytes();
    let n = bytes.len();
    if n != 9 && n != 10 {
        return false;
    }
    let letters_mid = n - 8; // 1 or 2
    let is_upper = |b: u8| b.is_ascii_uppercase();
    let is_digit = |b: u8| b.is_ascii_digit();

    bytes[..2].iter().all(|&b| is_upper(b))
        && bytes[2..4].iter().all(|&b| is_digit(b))
        && bytes[4..4 + letters_mid].iter().all(|&b| is_upper(b))
        && bytes[4 + letters_mid..].iter().all(|&b| is_digit(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_reg_no() {
        assert_eq!(normalize_reg_no("mp 09 cd 5645"), "MP09CD5645");
        assert_eq!(normalize_reg_no("MP09CD5645"), "MP09CD5645");
        assert_eq!(normalize_reg_no(" ka01 m 1234 "), "KA01M1234");
    }

    #[test]
    fn test_valid_reg_numbers() {
        assert!(is_valid_reg_no("MP09CD5645"));
        assert!(is_valid_reg_no("KA01M1234"));
        assert!(is_valid_reg_no("DL05AB0001"));
    }

    #[test]
    fn test_invalid_reg_numbers() {
        assert!(!is_valid_reg_no(""));
        assert!(!is_valid_reg_no("MP09CD56456")); // too long
        assert!(!is_valid_reg_no("MP9CD5645")); // one district digit
        assert!(!is_valid_reg_no("M109CD5645")); // digit in state code
        assert!(!is_valid_reg_no("MP09CDE545")); // three series letters
        assert!(!is_valid_reg_no("mp09cd5645")); // not normalized
        assert!(!is_valid_reg_no("MP09CD564A")); // letter in number
    }
}

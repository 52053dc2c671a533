use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of vehicle listed on the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    Car,
    Bike,
    Commercial,
}

impl std::fmt::Display for VehicleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VehicleType::Car => write!(f, "car"),
            VehicleType::Bike => write!(f, "bike"),
            VehicleType::Commercial => write!(f, "commercial"),
        }
    }
}

/// Fuel type, using the labels the storefront displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text")]
pub enum FuelType {
    Petrol,
    Diesel,
    Electric,
    Hybrid,
    #[serde(rename = "CNG")]
    #[sqlx(rename = "CNG")]
    Cng,
}

impl std::fmt::Display for FuelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FuelType::Petrol => write!(f, "Petrol"),
            FuelType::Diesel => write!(f, "Diesel"),
            FuelType::Electric => write!(f, "Electric"),
            FuelType::Hybrid => write!(f, "Hybrid"),
            FuelType::Cng => write!(f, "CNG"),
        }
    }
}

/// Gearbox type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text")]
pub enum Transmission {
    Manual,
    Automatic,
    #[serde(rename = "Semi-Automatic")]
    #[sqlx(rename = "Semi-Automatic")]
    SemiAutomatic,
}

impl std::fmt::Display for Transmission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Transmission::Manual => write!(f, "Manual"),
            Transmission::Automatic => write!(f, "Automatic"),
            Transmission::SemiAutomatic => write!(f, "Semi-Automatic"),
        }
    }
}

/// Listing lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum VehicleStatus {
    Available,
    Sold,
    Reserved,
}

impl std::fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VehicleStatus::Available => write!(f, "available"),
            VehicleStatus::Sold => write!(f, "sold"),
            VehicleStatus::Reserved => write!(f, "reserved"),
        }
    }
}

/// Test-drive / purchase booking state, advanced by the back office.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Contacted,
    Completed,
    Cancelled,
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookingStatus::Pending => write!(f, "pending"),
            BookingStatus::Contacted => write!(f, "contacted"),
            BookingStatus::Completed => write!(f, "completed"),
            BookingStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Lead-capture pipeline state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    New,
    Contacted,
    Interested,
    Converted,
    Closed,
}

impl std::fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeadStatus::New => write!(f, "new"),
            LeadStatus::Contacted => write!(f, "contacted"),
            LeadStatus::Interested => write!(f, "interested"),
            LeadStatus::Converted => write!(f, "converted"),
            LeadStatus::Closed => write!(f, "closed"),
        }
    }
}

/// Seller inquiry pipeline state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum InquiryStatus {
    New,
    Contacted,
    Completed,
    Rejected,
}

impl std::fmt::Display for InquiryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InquiryStatus::New => write!(f, "new"),
            InquiryStatus::Contacted => write!(f, "contacted"),
            InquiryStatus::Completed => write!(f, "completed"),
            InquiryStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// Back-office role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AdminRole {
    Admin,
    Superadmin,
}

impl std::fmt::Display for AdminRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdminRole::Admin => write!(f, "admin"),
            AdminRole::Superadmin => write!(f, "superadmin"),
        }
    }
}

/// A vehicle listing.
///
/// `images` and `features` are JSON arrays of strings; image entries are
/// `/uploads/...` paths produced by the upload handler.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: Uuid,
    pub title: String,
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub price: i64,
    pub original_price: i64,
    /// Percentage off the original price, derived at write time.
    pub discount: i32,
    pub mileage: String,
    pub km_driven: Option<i64>,
    pub fuel_type: FuelType,
    pub transmission: Transmission,
    pub description: String,
    pub images: serde_json::Value,
    pub features: serde_json::Value,
    pub status: VehicleStatus,
    pub owner_count: Option<i32>,
    pub location: Option<String>,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A customer booking request against a listed vehicle.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub message: Option<String>,
    pub offered_price: Option<i64>,
    pub status: BookingStatus,
    pub preferred_contact_time: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A lead captured from the storefront welcome popup.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub source: String,
    pub status: LeadStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A "sell your vehicle" submission.
///
/// `photos` is a JSON array of `/uploads/...` paths (at most five);
/// `rto_details` caches the provider record fetched when the submission
/// was made, so the back office can review it without a fresh lookup.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SellerInquiry {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub reg_no: String,
    pub km_driven: i64,
    /// Seller's asking price in whole rupees.
    pub demand: i64,
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
    pub photos: serde_json::Value,
    pub rc_card: Option<String>,
    pub rto_details: Option<serde_json::Value>,
    pub status: InquiryStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A back-office user.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: AdminRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Full registration record returned by the external RTO data provider.
///
/// Field names mirror the provider's wire format. Missing fields
/// deserialize to their defaults so a partial provider response still
/// produces a usable record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RtoVehicleDetails {
    pub reg_no: String,
    pub make: String,
    pub model: String,
    pub variant: String,
    pub variant_display_name: String,
    pub year: String,
    pub fuel_type: String,
    pub transmission_type: String,
    pub body_type: String,
    pub color: String,
    pub registered_place: String,
    pub registered_at: String,
    pub rc_status: String,
    pub rc_owner_count: String,
    pub rc_owner_name_masked: String,
    pub insurance_company: String,
    pub insurance_up_to: String,
    pub fitness_up_to: String,
    pub tax_up_to: String,
    pub manufacturing_month_yr: String,
    pub regn_year: String,
    pub seat_cap: String,
    pub vehicle_category: String,
    pub hypothecation: bool,
    pub financier: String,
}

/// Reduced registration record exposed on the public lookup endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RtoVehicleSummary {
    pub reg_no: String,
    pub make: String,
    pub model: String,
    pub variant: String,
    pub year: String,
    pub fuel_type: String,
}

impl From<&RtoVehicleDetails> for RtoVehicleSummary {
    fn from(details: &RtoVehicleDetails) -> Self {
        Self {
            reg_no: details.reg_no.clone(),
            make: details.make.clone(),
            model: details.model.clone(),
            variant: details.variant.clone(),
            year: details.year.clone(),
            fuel_type: details.fuel_type.clone(),
        }
    }
}

//! Helpers for reading the text fields of a multipart form into typed
//! values, with validation errors naming the offending field.

use std::collections::HashMap;
use std::str::FromStr;

use serde::de::DeserializeOwned;

use mandi_common::error::AppError;

pub(crate) fn required(fields: &HashMap<String, String>, name: &str) -> Result<String, AppError> {
    fields
        .get(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::Validation(format!("{} is required", name)))
}

pub(crate) fn optional(fields: &HashMap<String, String>, name: &str) -> Option<String> {
    fields
        .get(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub(crate) fn parse_required<T: FromStr>(
    fields: &HashMap<String, String>,
    name: &str,
) -> Result<T, AppError> {
    required(fields, name)?
        .parse()
        .map_err(|_| AppError::Validation(format!("{} is not a valid number", name)))
}

pub(crate) fn parse_optional<T: FromStr>(
    fields: &HashMap<String, String>,
    name: &str,
) -> Result<Option<T>, AppError> {
    match optional(fields, name) {
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| AppError::Validation(format!("{} is not a valid number", name))),
        None => Ok(None),
    }
}

/// Parse a text field into one of the domain enums via its serde name
/// (e.g. "car", "Petrol", "Semi-Automatic").
pub(crate) fn parse_enum<T: DeserializeOwned>(
    fields: &HashMap<String, String>,
    name: &str,
) -> Result<T, AppError> {
    let raw = required(fields, name)?;
    serde_json::from_value(serde_json::Value::String(raw.clone()))
        .map_err(|_| AppError::Validation(format!("'{}' is not a valid {}", raw, name)))
}

pub(crate) fn parse_enum_optional<T: DeserializeOwned>(
    fields: &HashMap<String, String>,
    name: &str,
) -> Result<Option<T>, AppError> {
    match optional(fields, name) {
        Some(raw) => serde_json::from_value(serde_json::Value::String(raw.clone()))
            .map(Some)
            .map_err(|_| AppError::Validation(format!("'{}' is not a valid {}", raw, name))),
        None => Ok(None),
    }
}

pub(crate) fn parse_bool(fields: &HashMap<String, String>, name: &str) -> bool {
    matches!(
        optional(fields, name).as_deref(),
        Some("true") | Some("1") | Some("on")
    )
}

/// Features arrive either as a JSON array string or comma-separated.
pub(crate) fn parse_features(fields: &HashMap<String, String>, name: &str) -> Vec<String> {
    let Some(raw) = fields.get(name) else {
        return Vec::new();
    };
    if let Ok(list) = serde_json::from_str::<Vec<String>>(raw) {
        return list;
    }
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mandi_common::types::{FuelType, Transmission, VehicleType};

    fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_required_and_optional() {
        let f = fields(&[("title", " Swift VXI "), ("blank", "  ")]);
        assert_eq!(required(&f, "title").unwrap(), "Swift VXI");
        assert!(required(&f, "blank").is_err());
        assert!(required(&f, "missing").is_err());
        assert_eq!(optional(&f, "blank"), None);
    }

    #[test]
    fn test_numeric_parsing() {
        let f = fields(&[("price", "450000"), ("year", "twenty18")]);
        assert_eq!(parse_required::<i64>(&f, "price").unwrap(), 450_000);
        assert!(parse_required::<i32>(&f, "year").is_err());
        assert_eq!(parse_optional::<i64>(&f, "kmDriven").unwrap(), None);
    }

    #[test]
    fn test_enum_parsing() {
        let f = fields(&[
            ("type", "car"),
            ("fuelType", "CNG"),
            ("transmission", "Semi-Automatic"),
            ("bad", "rocket"),
        ]);
        assert_eq!(parse_enum::<VehicleType>(&f, "type").unwrap(), VehicleType::Car);
        assert_eq!(parse_enum::<FuelType>(&f, "fuelType").unwrap(), FuelType::Cng);
        assert_eq!(
            parse_enum::<Transmission>(&f, "transmission").unwrap(),
            Transmission::SemiAutomatic
        );
        assert!(parse_enum::<VehicleType>(&f, "bad").is_err());
    }

    #[test]
    fn test_features_both_shapes() {
        let json = fields(&[("features", r#"["ABS","Airbags"]"#)]);
        assert_eq!(parse_features(&json, "features"), vec!["ABS", "Airbags"]);

        let csv = fields(&[("features", "ABS, Airbags, ")]);
        assert_eq!(parse_features(&csv, "features"), vec!["ABS", "Airbags"]);

        let none = fields(&[]);
        assert!(parse_features(&none, "features").is_empty());
    }

    #[test]
    fn test_bool_parsing() {
        let f = fields(&[("featured", "true"), ("flag", "no")]);
        assert!(parse_bool(&f, "featured"));
        assert!(!parse_bool(&f, "flag"));
        assert!(!parse_bool(&f, "missing"));
    }
}

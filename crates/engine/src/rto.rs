//! RTO lookup — registration-number lookups against the external data
//! provider, with Redis-cached responses.
//!
//! Provider lookups are metered, so every successful response is cached
//! under `rto:lookup:<REGNO>` with a TTL (default one day). A cache hit
//! never touches the provider.

use redis::AsyncCommands;
use redis::aio::ConnectionManager;

use mandi_common::config::AppConfig;
use mandi_common::error::AppError;
use mandi_common::types::RtoVehicleDetails;

use crate::inquiries::{is_valid_reg_no, normalize_reg_no};

/// Client for the external RTO data provider.
#[derive(Debug, Clone)]
pub struct RtoClient {
    http: reqwest::Client,
    api_url: Option<String>,
    api_key: Option<String>,
    cache_ttl_secs: u64,
}

impl RtoClient {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: config.rto_api_url.clone(),
            api_key: config.rto_api_key.clone(),
            cache_ttl_secs: config.rto_cache_ttl_secs,
        }
    }

    /// Whether a provider URL and key are configured.
    pub fn is_configured(&self) -> bool {
        self.api_url.is_some() && self.api_key.is_some()
    }

    /// Look up a registration number, serving from cache when possible.
    pub async fn lookup(
        &self,
        redis: &mut ConnectionManager,
        reg_no: &str,
    ) -> Result<RtoVehicleDetails, AppError> {
        let reg_no = normalize_reg_no(reg_no);
        if !is_valid_reg_no(&reg_no) {
            return Err(AppError::Validation(format!(
                "'{}' is not a valid registration number",
                reg_no
            )));
        }

        let key = cache_key(&reg_no);
        let cached: Option<String> = redis.get(&key).await?;
        if let Some(raw) = cached {
            // A corrupt cache entry falls through to a fresh lookup.
            if let Ok(details) = serde_json::from_str::<RtoVehicleDetails>(&raw) {
                tracing::debug!(reg_no = %reg_no, "RTO lookup served from cache");
                return Ok(details);
            }
        }

        let details = self.fetch_from_provider(&reg_no).await?;

        if let Ok(raw) = serde_json::to_string(&details) {
            // SET key raw EX ttl — best effort; a cache write failure
            // must not fail the lookup itself.
            let write: Result<(), redis::RedisError> = redis::cmd("SET")
                .arg(&key)
                .arg(raw)
                .arg("EX")
                .arg(self.cache_ttl_secs)
                .query_async(redis)
                .await;
            if let Err(e) = write {
                tracing::warn!(reg_no = %reg_no, error = %e, "Failed to cache RTO lookup");
            }
        }

        Ok(details)
    }

    async fn fetch_from_provider(&self, reg_no: &str) -> Result<RtoVehicleDetails, AppError> {
        let (Some(api_url), Some(api_key)) = (&self.api_url, &self.api_key) else {
            return Err(AppError::Config(
                "RTO provider is not configured (RTO_API_URL / RTO_API_KEY)".to_string(),
            ));
        };

        let url = format!("{}/{}", api_url.trim_end_matches('/'), reg_no);
        let response = self
            .http
            .get(&url)
            .header("x-api-key", api_key)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("RTO provider request failed: {}", e)))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(format!(
                "No RTO record found for {}",
                reg_no
            )));
        }
        if !response.status().is_success() {
            return Err(AppError::Upstream(format!(
                "RTO provider returned {}",
                response.status()
            )));
        }

        let details: RtoVehicleDetails = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Unreadable RTO provider response: {}", e)))?;

        tracing::info!(reg_no = %reg_no, make = %details.make, "RTO lookup fetched from provider");

        Ok(details)
    }
}

fn cache_key(reg_no: &str) -> String {
    format!("rto:lookup:{}", reg_no)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(url: Option<&str>, key: Option<&str>) -> RtoClient {
        RtoClient {
            http: reqwest::Client::new(),
            api_url: url.map(String::from),
            api_key: key.map(String::from),
            cache_ttl_secs: 60,
        }
    }

    #[test]
    fn test_is_configured() {
        assert!(client(Some("https://rto.example"), Some("k")).is_configured());
        assert!(!client(Some("https://rto.example"), None).is_configured());
        assert!(!client(None, Some("k")).is_configured());
        assert!(!client(None, None).is_configured());
    }

    #[test]
    fn test_cache_key_shape() {
        assert_eq!(cache_key("MP09CD5645"), "rto:lookup:MP09CD5645");
    }
}

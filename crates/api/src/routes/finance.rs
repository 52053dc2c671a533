//! Finance routes — EMI quotes over the calculator core.

use axum::extract::Query;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use mandi_common::error::AppError;
use mandi_engine::emi::{DEFAULT_PRICE, EmiCalculator};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/finance/emi", get(emi_quote))
}

/// Query parameters for an EMI quote. Everything is optional; omitted
/// values fall back to the calculator's seeds, and out-of-range values
/// are clamped the same way the sliders clamp them.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmiQuoteParams {
    pub price: Option<i64>,
    pub down_payment: Option<i64>,
    pub annual_rate: Option<f64>,
    pub tenure_months: Option<u32>,
}

/// An EMI quote: the effective (post-clamp) parameters plus the result.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmiQuote {
    pub price: i64,
    pub down_payment: i64,
    pub annual_rate: f64,
    pub tenure_months: u32,
    pub principal: i64,
    pub monthly_installment: i64,
}

/// GET /api/finance/emi — compute a quote (public).
async fn emi_quote(Query(params): Query<EmiQuoteParams>) -> Result<Json<EmiQuote>, AppError> {
    let mut calc = EmiCalculator::with_default_price(params.price.unwrap_or(DEFAULT_PRICE));
    if let Some(down_payment) = params.down_payment {
        calc.set_down_payment(down_payment);
    }
    if let Some(rate) = params.annual_rate {
        calc.set_annual_rate(rate);
    }
    if let Some(tenure) = params.tenure_months {
        calc.set_tenure_months(tenure);
    }

    Ok(Json(EmiQuote {
        price: calc.price(),
        down_payment: calc.down_payment(),
        annual_rate: calc.annual_rate_percent(),
        tenure_months: calc.tenure_months(),
        principal: calc.principal(),
        monthly_installment: calc.monthly_installment(),
    }))
}

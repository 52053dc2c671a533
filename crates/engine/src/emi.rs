//! EMI calculator — fixed-rate amortization quotes for vehicle financing.
//!
//! The monthly installment follows the standard closed-form amortization
//! formula over the financed principal (price minus down payment). A
//! `EmiCalculator` holds one live parameter set and recomputes the
//! installment inside every setter, so the exposed value can never be
//! stale relative to the inputs.
//!
//! State is a single in-memory parameter set per calculator instance.
//! Nothing is persisted — a quote exists only for the session that
//! requested it.

/// Default vehicle price seeding a calculator with no fixed price.
pub const DEFAULT_PRICE: i64 = 500_000;

/// Default annual interest rate in percent.
pub const DEFAULT_ANNUAL_RATE: f64 = 10.5;

/// Default loan tenure in months.
pub const DEFAULT_TENURE_MONTHS: u32 = 36;

/// Annual interest rate bounds in percent.
pub const MIN_ANNUAL_RATE: f64 = 5.0;
pub const MAX_ANNUAL_RATE: f64 = 20.0;

/// Tenure bounds in months (1 to 7 years).
pub const MIN_TENURE_MONTHS: u32 = 12;
pub const MAX_TENURE_MONTHS: u32 = 84;

/// Seed down payment as a fraction of the vehicle price.
const DOWN_PAYMENT_FRACTION: f64 = 0.20;

/// Compute the fixed monthly installment for an amortizing loan.
///
/// - `price`, `down_payment`: whole-rupee amounts; the financed principal
///   is their difference.
/// - `annual_rate_percent`: nominal annual rate, e.g. `10.5` for 10.5% p.a.
/// - `tenure_months`: loan term in months.
///
/// Returns the installment rounded to the nearest rupee. A non-positive
/// principal or a zero-month term yields `0`; a zero rate falls back to
/// equal division of the principal, so the result is always finite.
pub fn compute_monthly_installment(
    price: i64,
    down_payment: i64,
    annual_rate_percent: f64,
    tenure_months: u32,
) -> i64 {
    let principal = price - down_payment;
    if principal <= 0 || tenure_months == 0 {
        return 0;
    }

    let monthly_rate = annual_rate_percent / 12.0 / 100.0;
    let principal = principal as f64;

    if monthly_rate == 0.0 {
        return (principal / tenure_months as f64).round() as i64;
    }

    let growth = (1.0 + monthly_rate).powi(tenure_months as i32);
    let emi = principal * monthly_rate * growth / (growth - 1.0);
    emi.round() as i64
}

/// Parse a free-form amount field, treating empty or non-numeric input
/// as zero. Fractional entries round to the nearest rupee.
pub fn parse_amount(input: &str) -> i64 {
    let trimmed = input.trim();
    if let Ok(v) = trimmed.parse::<i64>() {
        return v;
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => v.round() as i64,
        _ => 0,
    }
}

/// Seed down payment for a price: 20%, rounded to the nearest rupee.
fn seed_down_payment(price: i64) -> i64 {
    (price as f64 * DOWN_PAYMENT_FRACTION).round() as i64
}

/// Live EMI calculator backing the finance widget.
///
/// Two operating modes, chosen at construction and never changed:
///
/// - *fixed price* — the price comes from a specific vehicle listing and
///   is not user-editable ([`EmiCalculator::with_fixed_price`]);
/// - *free price* — the price itself is an input, seeded from a default
///   ([`EmiCalculator::new`] / [`EmiCalculator::with_default_price`]).
///
/// Invariant: the down payment never exceeds the current price. When a
/// price change would break that, the down payment resets to 20% of the
/// new price.
#[derive(Debug, Clone)]
pub struct EmiCalculator {
    price: i64,
    down_payment: i64,
    annual_rate_percent: f64,
    tenure_months: u32,
    fixed_price: bool,
    emi: i64,
}

impl EmiCalculator {
    /// Free-price calculator seeded with [`DEFAULT_PRICE`].
    pub fn new() -> Self {
        Self::with_default_price(DEFAULT_PRICE)
    }

    /// Free-price calculator seeded with a caller-supplied default price.
    pub fn with_default_price(default_price: i64) -> Self {
        Self::seeded(default_price.max(0), false)
    }

    /// Fixed-price calculator anchored to a vehicle's listed price.
    pub fn with_fixed_price(price: i64) -> Self {
        Self::seeded(price.max(0), true)
    }

    fn seeded(price: i64, fixed_price: bool) -> Self {
        let mut calc = Self {
            price,
            down_payment: seed_down_payment(price),
            annual_rate_percent: DEFAULT_ANNUAL_RATE,
            tenure_months: DEFAULT_TENURE_MONTHS,
            fixed_price,
            emi: 0,
        };
        calc.recompute();
        calc
    }

    /// The current monthly installment. Always consistent with the
    /// current parameters — every setter recomputes before returning.
    pub fn monthly_installment(&self) -> i64 {
        self.emi
    }

    /// The financed amount, never negative.
    pub fn principal(&self) -> i64 {
        (self.price - self.down_payment).max(0)
    }

    pub fn price(&self) -> i64 {
        self.price
    }

    pub fn down_payment(&self) -> i64 {
        self.down_payment
    }

    pub fn annual_rate_percent(&self) -> f64 {
        self.annual_rate_percent
    }

    pub fn tenure_months(&self) -> u32 {
        self.tenure_months
    }

    pub fn is_fixed_price(&self) -> bool {
        self.fixed_price
    }

    /// Edit the price. Only meaningful in free-price mode; a fixed-price
    /// calculator ignores the edit. If the existing down payment would
    /// exceed the new price, it resets to 20% of the new price.
    pub fn set_price(&mut self, price: i64) {
        if self.fixed_price {
            return;
        }
        self.price = price.max(0);
        if self.down_payment > self.price {
            self.down_payment = seed_down_payment(self.price);
        }
        self.recompute();
    }

    /// Refresh the externally-supplied price of a fixed-price calculator
    /// (the anchoring listing changed). The down payment reseeds to 20%
    /// of the new price. Ignored in free-price mode.
    pub fn apply_fixed_price(&mut self, price: i64) {
        if !self.fixed_price {
            return;
        }
        self.price = price.max(0);
        self.down_payment = seed_down_payment(self.price);
        self.recompute();
    }

    /// Set the down payment, clamped to `[0, price]`.
    pub fn set_down_payment(&mut self, down_payment: i64) {
        self.down_payment = down_payment.clamp(0, self.price);
        self.recompute();
    }

    /// Set the annual rate, clamped to the slider bounds. Non-finite
    /// input leaves the rate unchanged.
    pub fn set_annual_rate(&mut self, annual_rate_percent: f64) {
        if annual_rate_percent.is_finite() {
            self.annual_rate_percent = annual_rate_percent.clamp(MIN_ANNUAL_RATE, MAX_ANNUAL_RATE);
        }
        self.recompute();
    }

    /// Set the tenure in months, clamped to the slider bounds.
    pub fn set_tenure_months(&mut self, tenure_months: u32) {
        self.tenure_months = tenure_months.clamp(MIN_TENURE_MONTHS, MAX_TENURE_MONTHS);
        self.recompute();
    }

    fn recompute(&mut self) {
        self.emi = compute_monthly_installment(
            self.price,
            self.down_payment,
            self.annual_rate_percent,
            self.tenure_months,
        );
    }
}

impl Default for EmiCalculator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Expected values below come from evaluating the amortization formula
    // directly; they are pinned, not re-derived in the assertions.

    #[test]
    fn test_concrete_scenario() {
        // price 500k, 20% down, 10.5% p.a., 36 months
        // principal 400 000, monthly rate 0.00875
        assert_eq!(compute_monthly_installment(500_000, 100_000, 10.5, 36), 13_001);
    }

    #[test]
    fn test_low_rate_short_tenure_boundary() {
        assert_eq!(compute_monthly_installment(200_000, 0, 5.0, 12), 17_121);
    }

    #[test]
    fn test_zero_rate_falls_back_to_linear_division() {
        assert_eq!(compute_monthly_installment(120_000, 0, 0.0, 12), 10_000);
        // Non-divisible term still rounds to the nearest rupee
        assert_eq!(compute_monthly_installment(120_000, 0, 0.0, 7), 17_143);
    }

    #[test]
    fn test_zero_principal_yields_zero() {
        assert_eq!(compute_monthly_installment(500_000, 500_000, 10.5, 36), 0);
        assert_eq!(compute_monthly_installment(500_000, 600_000, 10.5, 36), 0);
        assert_eq!(compute_monthly_installment(0, 0, 10.5, 36), 0);
    }

    #[test]
    fn test_zero_tenure_yields_zero() {
        assert_eq!(compute_monthly_installment(500_000, 100_000, 10.5, 0), 0);
    }

    #[test]
    fn test_non_negative_across_domain() {
        for price in [50_000i64, 200_000, 500_000, 1_200_000] {
            for dp_pct in [0.0, 0.2, 0.5, 1.0] {
                let dp = (price as f64 * dp_pct) as i64;
                for rate in [5.0, 10.5, 20.0] {
                    for tenure in [12u32, 36, 60, 84] {
                        let emi = compute_monthly_installment(price, dp, rate, tenure);
                        assert!(
                            emi >= 0,
                            "negative EMI for price={price} dp={dp} rate={rate} tenure={tenure}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_monotonic_in_down_payment() {
        let mut prev = i64::MAX;
        for dp in (0..=500_000).step_by(50_000) {
            let emi = compute_monthly_installment(500_000, dp, 10.5, 36);
            assert!(emi <= prev, "EMI increased when down payment rose to {dp}");
            prev = emi;
        }
    }

    #[test]
    fn test_monotonic_in_rate() {
        let mut prev = 0;
        let mut rate = MIN_ANNUAL_RATE;
        while rate <= MAX_ANNUAL_RATE {
            let emi = compute_monthly_installment(500_000, 100_000, rate, 36);
            assert!(emi >= prev, "EMI decreased when rate rose to {rate}");
            prev = emi;
            rate += 0.5;
        }
    }

    #[test]
    fn test_monotonic_in_tenure() {
        let mut prev = i64::MAX;
        for tenure in (MIN_TENURE_MONTHS..=MAX_TENURE_MONTHS).step_by(6) {
            let emi = compute_monthly_installment(500_000, 100_000, 10.5, tenure);
            assert!(emi <= prev, "EMI increased when tenure rose to {tenure}");
            prev = emi;
        }
    }

    #[test]
    fn test_idempotent() {
        let a = compute_monthly_installment(750_000, 150_000, 12.0, 60);
        let b = compute_monthly_installment(750_000, 150_000, 12.0, 60);
        assert_eq!(a, b);
        assert_eq!(a, 13_347);
    }

    #[test]
    fn test_parse_amount_tolerates_junk() {
        assert_eq!(parse_amount("450000"), 450_000);
        assert_eq!(parse_amount("  450000 "), 450_000);
        assert_eq!(parse_amount("123.9"), 124);
        assert_eq!(parse_amount(""), 0);
        assert_eq!(parse_amount("abc"), 0);
        assert_eq!(parse_amount("NaN"), 0);
    }

    #[test]
    fn test_free_price_seeds() {
        let calc = EmiCalculator::new();
        assert!(!calc.is_fixed_price());
        assert_eq!(calc.price(), 500_000);
        assert_eq!(calc.down_payment(), 100_000);
        assert_eq!(calc.annual_rate_percent(), 10.5);
        assert_eq!(calc.tenure_months(), 36);
        assert_eq!(calc.monthly_installment(), 13_001);
    }

    #[test]
    fn test_fixed_price_seeds_and_ignores_price_edits() {
        let mut calc = EmiCalculator::with_fixed_price(800_000);
        assert!(calc.is_fixed_price());
        assert_eq!(calc.down_payment(), 160_000);
        assert_eq!(calc.monthly_installment(), 20_802);

        calc.set_price(100_000);
        assert_eq!(calc.price(), 800_000);
        assert_eq!(calc.monthly_installment(), 20_802);
    }

    #[test]
    fn test_fixed_price_refresh_reseeds_down_payment() {
        let mut calc = EmiCalculator::with_fixed_price(800_000);
        calc.set_down_payment(400_000);

        calc.apply_fixed_price(500_000);
        assert_eq!(calc.price(), 500_000);
        assert_eq!(calc.down_payment(), 100_000);
        assert_eq!(calc.monthly_installment(), 13_001);
    }

    #[test]
    fn test_price_drop_reseeds_down_payment_when_exceeded() {
        let mut calc = EmiCalculator::new(); // dp = 100 000
        calc.set_price(80_000);
        assert_eq!(calc.down_payment(), 16_000);
        assert_eq!(
            calc.monthly_installment(),
            compute_monthly_installment(80_000, 16_000, 10.5, 36)
        );
    }

    #[test]
    fn test_price_change_keeps_valid_down_payment() {
        let mut calc = EmiCalculator::new(); // dp = 100 000
        calc.set_price(600_000);
        assert_eq!(calc.down_payment(), 100_000);
        assert_eq!(calc.monthly_installment(), 16_251);
    }

    #[test]
    fn test_down_payment_clamps_to_price() {
        let mut calc = EmiCalculator::new();
        calc.set_down_payment(900_000);
        assert_eq!(calc.down_payment(), 500_000);
        assert_eq!(calc.monthly_installment(), 0);

        calc.set_down_payment(-5);
        assert_eq!(calc.down_payment(), 0);
        assert_eq!(calc.monthly_installment(), 16_251);
    }

    #[test]
    fn test_rate_and_tenure_clamp_to_bounds() {
        let mut calc = EmiCalculator::new();

        calc.set_annual_rate(25.0);
        assert_eq!(calc.annual_rate_percent(), 20.0);
        assert_eq!(calc.monthly_installment(), 14_865);

        calc.set_annual_rate(1.0);
        assert_eq!(calc.annual_rate_percent(), 5.0);
        assert_eq!(calc.monthly_installment(), 11_988);

        calc.set_annual_rate(f64::NAN);
        assert_eq!(calc.annual_rate_percent(), 5.0);

        calc.set_annual_rate(10.5);
        calc.set_tenure_months(6);
        assert_eq!(calc.tenure_months(), 12);
        assert_eq!(calc.monthly_installment(), 35_259);

        calc.set_tenure_months(120);
        assert_eq!(calc.tenure_months(), 84);
        assert_eq!(calc.monthly_installment(), 6_744);
    }

    #[test]
    fn test_empty_price_entry_treated_as_zero() {
        let mut calc = EmiCalculator::new();
        calc.set_price(parse_amount(""));
        assert_eq!(calc.price(), 0);
        assert_eq!(calc.down_payment(), 0);
        assert_eq!(calc.monthly_installment(), 0);
    }

    #[test]
    fn test_every_setter_recomputes() {
        let mut calc = EmiCalculator::new();

        calc.set_down_payment(0);
        assert_eq!(calc.monthly_installment(), 16_251);

        calc.set_annual_rate(5.0);
        assert_eq!(
            calc.monthly_installment(),
            compute_monthly_installment(500_000, 0, 5.0, 36)
        );

        calc.set_tenure_months(12);
        assert_eq!(
            calc.monthly_installment(),
            compute_monthly_installment(500_000, 0, 5.0, 12)
        );

        calc.set_price(200_000);
        assert_eq!(calc.monthly_installment(), 17_121);
    }
}

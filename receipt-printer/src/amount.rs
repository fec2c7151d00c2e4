//! Fixed-precision number formatting for receipts
//!
//! Amounts arrive precomputed; the only thing done here is turning them into
//! text. Rounding works on the exact binary value of the `f64` and resolves
//! ties away from zero, so `1.005` prints `1.00` (it is stored slightly below)
//! while `0.125` prints `0.13`.

use rust_decimal::{Decimal, RoundingStrategy};

/// Format `value` with exactly `decimals` fractional digits
///
/// `NaN` and infinities come out as `NaN`, `Infinity` and `-Infinity`.
/// Negative zero prints without a sign.
pub fn fixed(value: f64, decimals: u32) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let magnitude = value.abs();

    let digits = match Decimal::from_f64_retain(magnitude) {
        Some(exact) => {
            let mut rounded =
                exact.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
            rounded.rescale(decimals);
            rounded.to_string()
        }
        // Beyond Decimal's range; no fractional digits survive in an f64 here
        None => format!("{:.*}", decimals as usize, magnitude),
    };

    format!("{}{}", sign, digits)
}

/// Currency symbol followed by the amount with two decimals
pub fn money(amount: f64, currency: &str) -> String {
    format!("{}{}", currency, fixed(amount, 2))
}

/// Percentage rate as printed in tax labels (one decimal)
pub fn percent(value: f64) -> String {
    format!("{}%", fixed(value, 1))
}

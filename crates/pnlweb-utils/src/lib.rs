//! Formatting helpers shared by every report view

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Currency glyph prefixed to every formatted amount
pub const CURRENCY_SYMBOL: &str = "\u{20b1}";

/// Format a number with thousands separators
pub fn format_number<T: ToString>(n: T) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    let mut count = 0;
    for c in s.chars().rev() {
        if count == 3 {
            result.push(',');
            count = 0;
        }
        result.push(c);
        count += 1;
    }
    result.chars().rev().collect()
}

/// Format an amount as `₱1,234.56`.
///
/// Negative amounts are formatted by absolute value with a leading `-`.
/// Cents are rounded half-up on the shortest decimal form of the float, so
/// `0.995` carries into the whole part and renders as `₱1.00`.
pub fn format_currency(amount: f64) -> String {
    if amount < 0.0 {
        return format!("-{}", format_currency(-amount));
    }

    let rounded = to_decimal(amount).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let whole = rounded.trunc();
    let cents = ((rounded - whole) * Decimal::ONE_HUNDRED).to_u32().unwrap_or(0);

    format!(
        "{}{}.{:02}",
        CURRENCY_SYMBOL,
        format_number(whole.to_u128().unwrap_or(0)),
        cents
    )
}

/// Format a percentage with one decimal place, e.g. `42.5%`
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Format a list-report amount cell, e.g. `PHP 1250.00`
pub fn format_amount(currency: &str, amount: f64) -> String {
    if currency.is_empty() {
        format!("{:.2}", amount)
    } else {
        format!("{} {:.2}", currency, amount)
    }
}

fn to_decimal(amount: f64) -> Decimal {
    if !amount.is_finite() {
        return Decimal::ZERO;
    }
    // `f64`'s Display is the shortest round-tripping form, which keeps
    // 1234567.005 as written instead of 1234567.00499999...
    Decimal::from_str(&amount.to_string())
        .or_else(|_| Decimal::try_from(amount))
        .unwrap_or(Decimal::ZERO)
}

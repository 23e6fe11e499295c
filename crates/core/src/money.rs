//! Money helpers: rounding at the wire boundary and display formatting.

use rust_decimal::{Decimal, RoundingStrategy};

/// Currency symbol shown in front of amounts (Guatemalan quetzal).
pub const CURRENCY_SYMBOL: &str = "Q";

/// Round a unit price to 2 decimal places, half away from zero.
///
/// Prices are kept exact in the draft; this is only applied when an order is
/// shaped for submission or when an amount is displayed.
pub fn round_price(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Render an amount as `Q1,234.50`.
///
/// Always two decimals, comma thousands separator, leading `-` for negatives.
pub fn format_currency(amount: Decimal) -> String {
    let mut rounded = round_price(amount.abs());
    rounded.rescale(2);
    let text = rounded.to_string();
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{CURRENCY_SYMBOL}{grouped}.{frac_part}")
}

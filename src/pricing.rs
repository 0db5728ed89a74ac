use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Shown in place of the cart total until the page has hydrated.
pub const TOTAL_PLACEHOLDER: &str = "0.00";

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("amount is out of range")]
pub struct AmountOverflow;

/// Unit price after the item's own discount.
///
/// The percent is clamped to `0..=100`, so the result never leaves `[0, price]`.
pub fn discounted_unit_price(price: Decimal, discount_percent: Option<Decimal>) -> Decimal {
    match discount_percent {
        Some(percent) if !percent.is_zero() => {
            let percent = percent.clamp(Decimal::ZERO, HUNDRED);
            // Dividing first keeps the discount at or below `price`.
            price - price / HUNDRED * percent
        }
        _ => price,
    }
}

/// `unit_price × quantity` less `percent`, rounded to cents.
pub fn line_total(
    unit_price: Decimal,
    quantity: u32,
    percent: Option<Decimal>,
) -> Result<Decimal, AmountOverflow> {
    let gross = unit_price
        .checked_mul(Decimal::from(quantity))
        .ok_or(AmountOverflow)?;
    Ok(round_money(discounted_unit_price(gross, percent)))
}

pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Two-decimal text form of an amount, e.g. `90` -> `"90.00"`.
pub fn to_fixed(value: Decimal) -> String {
    format!("{:.2}", round_money(value))
}

/// Groups the integer part in thousands: `"1234567.50"` -> `"1 234 567.50"`.
/// Anything that is not a plain number is returned untouched.
pub fn format_price(text: &str) -> String {
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (unsigned, None),
    };
    let is_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !is_digits(int_part) || frac_part.is_some_and(|f| !is_digits(f)) {
        return text.to_string();
    }

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

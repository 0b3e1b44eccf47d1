use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Parse user-entered numeric text. Blank or malformed input yields `None`.
pub fn parse_decimal(input: &str) -> Option<Decimal> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// Parse user-entered numeric text, treating anything unparsable as zero.
pub fn parse_amount(input: &str) -> Decimal {
    parse_decimal(input).unwrap_or(Decimal::ZERO)
}

/// Round to cents, half away from zero.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// `quantity * unit_price * (1 - discount_percent / 100)`, rounded to cents.
///
/// A product too large for `Decimal` counts as zero, like any other input
/// that cannot be turned into a number.
pub fn line_amount(quantity: Decimal, unit_price: Decimal, discount_percent: Decimal) -> Decimal {
    let factor = discount_percent
        .checked_div(Decimal::ONE_HUNDRED)
        .and_then(|fraction| Decimal::ONE.checked_sub(fraction));
    quantity
        .checked_mul(unit_price)
        .zip(factor)
        .and_then(|(gross, factor)| gross.checked_mul(factor))
        .map(round_money)
        .unwrap_or(Decimal::ZERO)
}

/// Sum of money amounts, saturating at the bounds of `Decimal`.
pub fn sum_money<I>(amounts: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    amounts
        .into_iter()
        .fold(Decimal::ZERO, |total, amount| total.saturating_add(amount))
}

/// Format a money amount with two decimal places and thousands separators
pub fn format_money(value: Decimal, currency_symbol: &str) -> String {
    let rounded = format!("{:.2}", round_money(value));
    let (sign, unsigned) = match rounded.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rounded.as_str()),
    };
    let (whole, frac) = unsigned.split_once('.').unwrap_or((unsigned, "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}{currency_symbol}{grouped}.{frac}")
}

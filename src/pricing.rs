//! Prices

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, iso};
use thiserror::Error;

use crate::items::LineItem;

/// Currency every price in the marketplace is quoted in.
pub const CURRENCY: &iso::Currency = iso::BRL;

/// Errors that can occur while converting prices for display.
#[derive(Debug, Error, PartialEq)]
pub enum PriceError {
    /// The amount has no representation in minor units.
    #[error("amount {0} is out of range")]
    OutOfRange(Decimal),
}

/// Price of `quantity` units at `unit_price`, or `None` when it does not fit
/// a [`Decimal`].
pub fn line_total(unit_price: Decimal, quantity: u32) -> Option<Decimal> {
    unit_price.checked_mul(Decimal::from(quantity))
}

/// Calculates the total price of a list of line items, saturating at
/// [`Decimal::MAX`].
pub fn total_price(items: &[LineItem]) -> Decimal {
    items
        .iter()
        .fold(Decimal::ZERO, |total, item| total.saturating_add(item.total_price))
}

/// Converts a decimal amount to money in the marketplace currency.
///
/// # Errors
///
/// Returns [`PriceError::OutOfRange`] when the amount does not fit in minor units.
pub fn to_money(amount: Decimal) -> Result<Money<'static, iso::Currency>, PriceError> {
    let minor = amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(|cents| cents.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|cents| cents.to_i64())
        .ok_or(PriceError::OutOfRange(amount))?;

    Ok(Money::from_minor(minor, CURRENCY))
}

/// Human readable price, falling back to a plain two-decimal amount.
pub fn format_price(amount: Decimal) -> String {
    to_money(amount).map_or_else(|_| format!("{amount:.2}"), |money| money.to_string())
}

/// Reads a free-form price input the way the price fields do: every
/// non-digit is dropped and the remaining digits are read as cents.
pub fn parse_price_input(raw: &str) -> Decimal {
    let cents = raw
        .chars()
        .filter_map(|c| c.to_digit(10))
        .fold(Decimal::ZERO, |acc, digit| {
            acc.checked_mul(Decimal::TEN)
                .and_then(|acc| acc.checked_add(Decimal::from(digit)))
                .unwrap_or(acc)
        });

    cents / Decimal::ONE_HUNDRED
}

#[cfg(test)]
mod tests {
    use rust_decimal::dec;

    use crate::{
        catalog::{Event, TicketType},
        ids::TypedId,
    };

    use super::*;

    fn item(price: Decimal, quantity: u32) -> LineItem {
        LineItem {
            event_id: TypedId::<Event>::new(1),
            event_name: "Festival".to_string(),
            ticket_type_id: TypedId::<TicketType>::new(quantity.into()),
            ticket_name: "Pista".to_string(),
            price,
            quantity,
            total_price: line_total(price, quantity).unwrap_or_default(),
        }
    }

    #[test]
    fn line_total_multiplies_unit_price() {
        assert_eq!(line_total(dec!(10.50), 3), Some(dec!(31.50)));
        assert_eq!(line_total(dec!(10.50), 0), Some(Decimal::ZERO));
    }

    #[test]
    fn line_total_overflow_is_none() {
        let huge = Decimal::from_i128_with_scale(10_i128.pow(20), 0);

        assert_eq!(line_total(huge, 1_000_000_000), None);
        assert_eq!(line_total(Decimal::MAX, 2), None);
    }

    #[test]
    fn total_price_sums_line_totals() {
        let items = [item(dec!(10), 2), item(dec!(5.25), 4)];

        assert_eq!(total_price(&items), dec!(41));
    }

    #[test]
    fn total_price_of_no_lines_is_zero() {
        assert_eq!(total_price(&[]), Decimal::ZERO);
    }

    #[test]
    fn total_price_saturates_instead_of_overflowing() {
        let mut first = item(dec!(1), 1);
        let mut second = item(dec!(1), 2);

        first.total_price = Decimal::MAX;
        second.total_price = Decimal::MAX;

        assert_eq!(total_price(&[first, second]), Decimal::MAX);
    }

    #[test]
    fn to_money_rounds_to_cents() -> testresult::TestResult {
        let money = to_money(dec!(12.345))?;

        assert_eq!(money, Money::from_minor(1235, CURRENCY));

        Ok(())
    }

    #[test]
    fn to_money_rejects_amounts_outside_minor_units() {
        let amount = Decimal::MAX;

        assert_eq!(to_money(amount), Err(PriceError::OutOfRange(amount)));
    }

    #[test]
    fn parse_price_input_reads_digits_as_cents() {
        assert_eq!(parse_price_input("R$ 12,50"), dec!(12.50));
        assert_eq!(parse_price_input("1.999"), dec!(19.99));
        assert_eq!(parse_price_input("abc"), Decimal::ZERO);
        assert_eq!(parse_price_input(""), Decimal::ZERO);
    }
}

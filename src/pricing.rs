//! Order totals
//!
//! The pure projection from a cart snapshot to its derived totals: subtotal,
//! delivery fee or waiver, grand total. Recomputed fresh from every snapshot,
//! never mutated in place, never persisted.

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    cart::{Cart, LineItem},
    shipping::{ShippingError, ShippingPolicy},
};

/// Errors that can occur while calculating order totals.
#[derive(Debug, Error, PartialEq)]
pub enum TotalsError {
    /// A monetary amount overflows minor-unit arithmetic.
    #[error("monetary amount overflows minor-unit arithmetic")]
    AmountOverflow,

    /// Wrapped delivery policy error (policy and cart priced in different currencies).
    #[error(transparent)]
    Shipping(#[from] ShippingError),
}

/// Derived totals for one cart snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderTotals<'a> {
    /// Sum over the cart of unit price times quantity
    subtotal: Money<'a, Currency>,

    /// Delivery fee, zero once the free-delivery threshold is met
    shipping: Money<'a, Currency>,

    /// Whether the free-delivery threshold was met
    free_shipping: bool,

    /// Subtotal plus delivery fee
    total: Money<'a, Currency>,
}

impl<'a> OrderTotals<'a> {
    /// Sum over the cart of unit price times quantity.
    #[must_use]
    pub fn subtotal(&self) -> Money<'a, Currency> {
        self.subtotal
    }

    /// Delivery fee charged for this order.
    #[must_use]
    pub fn shipping(&self) -> Money<'a, Currency> {
        self.shipping
    }

    /// Whether the free-delivery threshold was met.
    #[must_use]
    pub fn free_shipping(&self) -> bool {
        self.free_shipping
    }

    /// Subtotal plus delivery fee.
    #[must_use]
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }
}

/// Convert an amount to minor units for the exponent-2 currencies the shop
/// prices in.
pub(crate) fn minor_units(money: &Money<'_, Currency>) -> Option<i64> {
    money
        .amount()
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|value| value.round_dp(0).to_i64())
}

/// The extended price of a single line (unit price times quantity).
///
/// # Errors
///
/// Returns [`TotalsError::AmountOverflow`] if the extended price cannot be
/// represented in minor units.
pub fn line_total<'a>(line: &LineItem<'a>) -> Result<Money<'a, Currency>, TotalsError> {
    let unit_minor = minor_units(line.unit_price()).ok_or(TotalsError::AmountOverflow)?;

    let total_minor = unit_minor
        .checked_mul(i64::from(line.quantity()))
        .ok_or(TotalsError::AmountOverflow)?;

    Ok(Money::from_minor(total_minor, line.unit_price().currency()))
}

/// Project a cart snapshot into its derived totals.
///
/// Deterministic and side-effect free: the cart is read once and never
/// mutated, and the same snapshot with the same policy always produces the
/// same totals. An empty cart yields a zero subtotal with the flat fee still
/// applied (unless the policy's threshold is itself zero).
///
/// # Errors
///
/// - [`TotalsError::AmountOverflow`]: a line total or the running sum cannot
///   be represented in minor units.
/// - [`TotalsError::Shipping`]: the policy currency differs from the cart
///   currency.
pub fn order_totals<'a>(
    cart: &Cart<'a>,
    policy: &ShippingPolicy<'a>,
) -> Result<OrderTotals<'a>, TotalsError> {
    let currency = cart.currency();

    let subtotal_minor = cart.iter().try_fold(0_i64, |acc, line| {
        let unit_minor = minor_units(line.unit_price()).ok_or(TotalsError::AmountOverflow)?;

        let line_minor = unit_minor
            .checked_mul(i64::from(line.quantity()))
            .ok_or(TotalsError::AmountOverflow)?;

        acc.checked_add(line_minor)
            .ok_or(TotalsError::AmountOverflow)
    })?;

    let subtotal = Money::from_minor(subtotal_minor, currency);
    let delivery = policy.fee_for_subtotal(&subtotal)?;

    let fee_minor = minor_units(&delivery.fee()).ok_or(TotalsError::AmountOverflow)?;

    let total_minor = subtotal_minor
        .checked_add(fee_minor)
        .ok_or(TotalsError::AmountOverflow)?;

    Ok(OrderTotals {
        subtotal,
        shipping: delivery.fee(),
        free_shipping: delivery.waived(),
        total: Money::from_minor(total_minor, currency),
    })
}

//! Delivery policy
//!
//! The fixed business rule for delivery pricing: a flat fee, waived once the
//! order subtotal meets the free-delivery threshold. Both amounts are
//! configuration, loaded from a fixture or supplied by the caller, never
//! literals inside the totals computation.

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, prelude::FromPrimitive};
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::pricing::minor_units;

/// Errors related to the delivery policy.
#[derive(Debug, Error, PartialEq)]
pub enum ShippingError {
    /// The flat fee and the free-delivery threshold are priced in different
    /// currencies (fee currency, threshold currency).
    #[error("Flat fee has currency {0}, but free-delivery threshold has currency {1}")]
    PolicyCurrencyMismatch(&'static str, &'static str),

    /// A subtotal was quoted in a different currency than the policy
    /// (subtotal currency, policy currency).
    #[error("Subtotal has currency {0}, but the delivery policy is priced in {1}")]
    CurrencyMismatch(&'static str, &'static str),

    /// An amount overflows minor-unit arithmetic.
    #[error("delivery amount overflows minor-unit arithmetic")]
    AmountOverflow,
}

/// Outcome of the delivery fee decision for one subtotal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeliveryFee<'a> {
    fee: Money<'a, Currency>,
    waived: bool,
}

impl<'a> DeliveryFee<'a> {
    /// The fee charged: the policy's flat fee, or zero when waived.
    #[must_use]
    pub fn fee(&self) -> Money<'a, Currency> {
        self.fee
    }

    /// Whether the free-delivery threshold was met.
    #[must_use]
    pub fn waived(&self) -> bool {
        self.waived
    }
}

/// Delivery policy: a flat fee with a free-delivery threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct ShippingPolicy<'a> {
    flat_fee: Money<'a, Currency>,
    free_threshold: Money<'a, Currency>,
}

impl<'a> ShippingPolicy<'a> {
    /// Create a new policy.
    ///
    /// # Errors
    ///
    /// Returns [`ShippingError::PolicyCurrencyMismatch`] if the fee and the
    /// threshold are priced in different currencies.
    pub fn new(
        flat_fee: Money<'a, Currency>,
        free_threshold: Money<'a, Currency>,
    ) -> Result<Self, ShippingError> {
        if flat_fee.currency() != free_threshold.currency() {
            return Err(ShippingError::PolicyCurrencyMismatch(
                flat_fee.currency().iso_alpha_code,
                free_threshold.currency().iso_alpha_code,
            ));
        }

        Ok(Self {
            flat_fee,
            free_threshold,
        })
    }

    /// The flat delivery fee.
    pub fn flat_fee(&self) -> &Money<'a, Currency> {
        &self.flat_fee
    }

    /// The subtotal at which delivery becomes free.
    pub fn free_threshold(&self) -> &Money<'a, Currency> {
        &self.free_threshold
    }

    /// The currency the policy is priced in.
    pub fn currency(&self) -> &'a Currency {
        self.flat_fee.currency()
    }

    /// Decide the delivery fee for a subtotal.
    ///
    /// The threshold is inclusive: a subtotal exactly at the threshold is
    /// delivered free.
    ///
    /// # Errors
    ///
    /// - [`ShippingError::CurrencyMismatch`]: the subtotal is quoted in a
    ///   different currency than the policy.
    /// - [`ShippingError::AmountOverflow`]: an amount cannot be represented
    ///   in minor units.
    pub fn fee_for_subtotal(
        &self,
        subtotal: &Money<'a, Currency>,
    ) -> Result<DeliveryFee<'a>, ShippingError> {
        let (subtotal_minor, threshold_minor) = self.compared_minors(subtotal)?;

        if subtotal_minor >= threshold_minor {
            Ok(DeliveryFee {
                fee: Money::from_minor(0, self.currency()),
                waived: true,
            })
        } else {
            Ok(DeliveryFee {
                fee: self.flat_fee,
                waived: false,
            })
        }
    }

    /// Amount still to spend before delivery is free. Zero once the
    /// threshold is met.
    ///
    /// # Errors
    ///
    /// Same conditions as [`ShippingPolicy::fee_for_subtotal`].
    pub fn remaining_for_free(
        &self,
        subtotal: &Money<'a, Currency>,
    ) -> Result<Money<'a, Currency>, ShippingError> {
        let (subtotal_minor, threshold_minor) = self.compared_minors(subtotal)?;

        Ok(Money::from_minor(
            threshold_minor.saturating_sub(subtotal_minor).max(0),
            self.currency(),
        ))
    }

    /// Fraction of the free-delivery threshold covered by a subtotal,
    /// capped at 100%. A zero threshold counts as fully covered.
    ///
    /// # Errors
    ///
    /// Same conditions as [`ShippingPolicy::fee_for_subtotal`].
    pub fn progress_toward_free(
        &self,
        subtotal: &Money<'a, Currency>,
    ) -> Result<Percentage, ShippingError> {
        let (subtotal_minor, threshold_minor) = self.compared_minors(subtotal)?;

        if threshold_minor <= 0 {
            return Ok(Percentage::from(1.0));
        }

        // The ratio is taken in decimal space to avoid integer truncation.
        let subtotal_dec = Decimal::from_i64(subtotal_minor).unwrap_or(Decimal::ZERO);
        let threshold_dec = Decimal::from_i64(threshold_minor).unwrap_or(Decimal::ONE);

        let ratio = (subtotal_dec / threshold_dec).clamp(Decimal::ZERO, Decimal::ONE);

        Ok(Percentage::from(ratio))
    }

    fn compared_minors(
        &self,
        subtotal: &Money<'a, Currency>,
    ) -> Result<(i64, i64), ShippingError> {
        if subtotal.currency() != self.currency() {
            return Err(ShippingError::CurrencyMismatch(
                subtotal.currency().iso_alpha_code,
                self.currency().iso_alpha_code,
            ));
        }

        let subtotal_minor = minor_units(subtotal).ok_or(ShippingError::AmountOverflow)?;

        let threshold_minor =
            minor_units(&self.free_threshold).ok_or(ShippingError::AmountOverflow)?;

        Ok((subtotal_minor, threshold_minor))
    }
}

//! Shipping Fixtures

use rusty_money::Money;
use serde::Deserialize;

use crate::{
    fixtures::{FixtureError, products::parse_price},
    shipping::ShippingPolicy,
};

/// Delivery policy in YAML
#[derive(Debug, Deserialize)]
pub struct ShippingFixture {
    /// Flat delivery fee (e.g., "300.00 RUB")
    pub flat_fee: String,

    /// Free-delivery threshold (e.g., "2000.00 RUB")
    pub free_threshold: String,
}

impl TryFrom<ShippingFixture> for ShippingPolicy<'_> {
    type Error = FixtureError;

    fn try_from(fixture: ShippingFixture) -> Result<Self, Self::Error> {
        let (fee_minor, fee_currency) = parse_price(&fixture.flat_fee)?;
        let (threshold_minor, threshold_currency) = parse_price(&fixture.free_threshold)?;

        Ok(ShippingPolicy::new(
            Money::from_minor(fee_minor, fee_currency),
            Money::from_minor(threshold_minor, threshold_currency),
        )?)
    }
}

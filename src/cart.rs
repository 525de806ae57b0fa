//! Cart

use std::fmt;

use rust_decimal::Decimal;
use rustc_hash::FxHashSet;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

/// Opaque product identifier, stable per product and unique within a cart.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ItemId(String);

impl ItemId {
    /// Create an id from any string-like token.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Errors related to cart construction or lookup.
#[derive(Debug, Error)]
pub enum CartError {
    /// A line's currency differs from the cart currency (index, line currency, cart currency).
    #[error("Line {0} has currency {1}, but cart has currency {2}")]
    CurrencyMismatch(usize, &'static str, &'static str),

    /// A line reuses an item id already present in the cart.
    #[error("Line {0} reuses item id {1}")]
    DuplicateItemId(usize, ItemId),

    /// A line has a quantity of zero.
    #[error("Line {0} has a quantity of zero")]
    ZeroQuantity(usize),

    /// A line has a negative unit price.
    #[error("Line {0} has a negative unit price")]
    NegativeUnitPrice(usize),

    /// A line was not found in the cart.
    #[error("Line {0} not found")]
    LineNotFound(usize),
}

/// One product line in a cart.
#[derive(Clone, Debug, PartialEq)]
pub struct LineItem<'a> {
    id: ItemId,
    name: String,
    unit_price: Money<'a, Currency>,
    quantity: u32,
}

impl<'a> LineItem<'a> {
    /// Create a new line.
    pub fn new(
        id: ItemId,
        name: impl Into<String>,
        unit_price: Money<'a, Currency>,
        quantity: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            unit_price,
            quantity,
        }
    }

    /// Returns the item id of the line.
    pub fn id(&self) -> &ItemId {
        &self.id
    }

    /// Returns the display label of the line.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the unit price of the line.
    pub fn unit_price(&self) -> &Money<'a, Currency> {
        &self.unit_price
    }

    /// Returns the quantity of the line.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}

/// Cart
///
/// An ordered collection of line items priced in a single currency. A cart
/// that exists is well-formed: the caller contract (quantity at least one,
/// non-negative unit prices, unique item ids, one currency throughout) is
/// checked at construction, so downstream consumers never re-validate.
#[derive(Debug)]
pub struct Cart<'a> {
    lines: Vec<LineItem<'a>>,
    currency: &'static Currency,
}

impl<'a> Cart<'a> {
    /// Create a new empty cart.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            lines: Vec::new(),
            currency,
        }
    }

    /// Create a new cart with the given lines.
    ///
    /// # Errors
    ///
    /// Returns a `CartError` if any line violates the caller contract:
    /// mismatched currency, zero quantity, negative unit price, or a
    /// duplicated item id.
    pub fn with_lines(
        lines: impl Into<Vec<LineItem<'a>>>,
        currency: &'static Currency,
    ) -> Result<Self, CartError> {
        let lines = lines.into();

        let mut seen_ids: FxHashSet<ItemId> = FxHashSet::default();

        lines.iter().enumerate().try_for_each(|(i, line)| {
            let line_currency = line.unit_price().currency();

            if line_currency != currency {
                return Err(CartError::CurrencyMismatch(
                    i,
                    line_currency.iso_alpha_code,
                    currency.iso_alpha_code,
                ));
            }

            if line.quantity() == 0 {
                return Err(CartError::ZeroQuantity(i));
            }

            if *line.unit_price().amount() < Decimal::ZERO {
                return Err(CartError::NegativeUnitPrice(i));
            }

            if !seen_ids.insert(line.id().clone()) {
                return Err(CartError::DuplicateItemId(i, line.id().clone()));
            }

            Ok(())
        })?;

        Ok(Cart { lines, currency })
    }

    /// Get a line from the cart.
    ///
    /// # Errors
    ///
    /// Returns a `CartError::LineNotFound` if the line is not found.
    pub fn get_line(&'a self, line: usize) -> Result<&'a LineItem<'a>, CartError> {
        self.lines.get(line).ok_or(CartError::LineNotFound(line))
    }

    /// Iterate over the lines in the cart.
    pub fn iter(&self) -> impl Iterator<Item = &LineItem<'_>> {
        self.lines.iter()
    }

    /// Get the number of lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn unit_count(&self) -> u64 {
        self.lines
            .iter()
            .map(|line| u64::from(line.quantity()))
            .sum()
    }

    /// Get the currency of the cart.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

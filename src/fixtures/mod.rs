//! Fixtures
//!
//! On-disk YAML fixture sets for the demo storefront and the integration
//! tests: a product catalog, a cart, a delivery policy and the storefront
//! content, loaded by set name from `<base>/<category>/<name>.yml`.

use std::{fs, path::PathBuf};

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use thiserror::Error;

use crate::{
    cart::{Cart, CartError, ItemId, LineItem},
    content::StorefrontContent,
    fixtures::{carts::CartFixture, products::CatalogProduct},
    shipping::{ShippingError, ShippingPolicy},
};

pub mod carts;
pub mod products;
pub mod shipping;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// A cart line requests zero units
    #[error("Cart line for product {0} has a quantity of zero")]
    ZeroQuantity(String),

    /// Currency mismatch within the fixture set
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// No products loaded yet
    #[error("No products loaded yet; currency unknown")]
    NoCurrency,

    /// No cart lines loaded
    #[error("No cart lines loaded; cannot create cart")]
    NoLines,

    /// Not enough cart lines in fixture
    #[error("Not enough cart lines in fixture, available: {available}, requested: {requested}")]
    NotEnoughLines {
        /// Number of lines defined in the fixture
        available: usize,
        /// Number of lines requested
        requested: usize,
    },

    /// No delivery policy loaded
    #[error("No delivery policy loaded")]
    NoShippingPolicy,

    /// Cart creation error
    #[error("Failed to create cart: {0}")]
    Cart(#[from] CartError),

    /// Delivery policy error
    #[error("Failed to create delivery policy: {0}")]
    Shipping(#[from] ShippingError),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture<'a> {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Catalog keyed by product fixture key
    catalog: FxHashMap<String, CatalogProduct<'a>>,

    /// Pre-built cart lines (reference catalog products by key)
    lines: Vec<LineItem<'a>>,

    /// Delivery policy for the set
    policy: Option<ShippingPolicy<'a>>,

    /// Storefront content for the set
    content: StorefrontContent,

    /// Currency for the fixture set
    currency: Option<&'static Currency>,
}

impl<'a> Fixture<'a> {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            catalog: FxHashMap::default(),
            lines: Vec::new(),
            policy: None,
            content: StorefrontContent::default(),
            currency: None,
        }
    }

    /// Load the product catalog from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or if there are
    /// currency mismatches.
    pub fn load_products(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("products").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: products::ProductsFixture = serde_norway::from_str(&contents)?;

        for (key, product_fixture) in fixture.products {
            let product: CatalogProduct<'static> = product_fixture.try_into()?;
            let currency = product.price.currency();

            if let Some(existing_currency) = self.currency {
                if existing_currency != currency {
                    return Err(FixtureError::CurrencyMismatch(
                        existing_currency.iso_alpha_code.to_string(),
                        currency.iso_alpha_code.to_string(),
                    ));
                }
            } else {
                self.currency = Some(currency);
            }

            self.catalog.insert(key, product);
        }

        Ok(self)
    }

    /// Load a cart from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, if a referenced
    /// product doesn't exist, or if a line requests zero units.
    pub fn load_cart(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("carts").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: CartFixture = serde_norway::from_str(&contents)?;

        for line in fixture.lines {
            let product = self
                .catalog
                .get(&line.product)
                .ok_or_else(|| FixtureError::ProductNotFound(line.product.clone()))?;

            if line.quantity == 0 {
                return Err(FixtureError::ZeroQuantity(line.product));
            }

            self.lines.push(LineItem::new(
                ItemId::new(line.product),
                product.name.clone(),
                product.price,
                line.quantity,
            ));
        }

        Ok(self)
    }

    /// Load the delivery policy from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// policy currency differs from the catalog currency.
    pub fn load_shipping(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("shipping").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: shipping::ShippingFixture = serde_norway::from_str(&contents)?;

        let policy: ShippingPolicy<'a> = fixture.try_into()?;

        if let Some(existing_currency) = self.currency
            && existing_currency != policy.currency()
        {
            return Err(FixtureError::CurrencyMismatch(
                existing_currency.iso_alpha_code.to_string(),
                policy.currency().iso_alpha_code.to_string(),
            ));
        }

        self.policy = Some(policy);

        Ok(self)
    }

    /// Load the storefront content from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_content(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("content").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;

        self.content = serde_norway::from_str(&contents)?;

        Ok(self)
    }

    /// Load a complete fixture set (products, cart, shipping and content
    /// with the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture
            .load_products(name)?
            .load_cart(name)?
            .load_shipping(name)?
            .load_content(name)?;

        Ok(fixture)
    }

    /// Get a catalog product by its fixture key
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found.
    pub fn product(&self, key: &str) -> Result<&CatalogProduct<'a>, FixtureError> {
        self.catalog
            .get(key)
            .ok_or_else(|| FixtureError::ProductNotFound(key.to_string()))
    }

    /// Get all loaded cart lines
    pub fn lines(&self) -> &[LineItem<'a>] {
        &self.lines
    }

    /// Create a cart from the loaded lines
    ///
    /// # Errors
    ///
    /// Returns an error if no lines are loaded or if cart creation fails.
    pub fn cart(&self, n: Option<usize>) -> Result<Cart<'a>, FixtureError> {
        let currency = self.currency.ok_or(FixtureError::NoCurrency)?;

        if self.lines.is_empty() {
            return Err(FixtureError::NoLines);
        }

        if let Some(n) = n
            && n > self.lines.len()
        {
            return Err(FixtureError::NotEnoughLines {
                requested: n,
                available: self.lines.len(),
            });
        }

        let lines: Vec<LineItem<'_>> = self
            .lines
            .iter()
            .take(n.unwrap_or(self.lines.len()))
            .cloned()
            .collect();

        Ok(Cart::with_lines(lines, currency)?)
    }

    /// Get the loaded delivery policy
    ///
    /// # Errors
    ///
    /// Returns an error if no delivery policy has been loaded yet.
    pub fn shipping_policy(&self) -> Result<&ShippingPolicy<'a>, FixtureError> {
        self.policy.as_ref().ok_or(FixtureError::NoShippingPolicy)
    }

    /// Get the loaded storefront content
    pub fn content(&self) -> &StorefrontContent {
        &self.content
    }

    /// Get the currency
    ///
    /// # Errors
    ///
    /// Returns an error if no products have been loaded yet.
    pub fn currency(&self) -> Result<&'static Currency, FixtureError> {
        self.currency.ok_or(FixtureError::NoCurrency)
    }
}

impl Default for Fixture<'_> {
    fn default() -> Self {
        Self::new()
    }
}

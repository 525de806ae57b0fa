//! Fruitbox
//!
//! Fruitbox is the pricing and checkout-summary core of a fruit gift-box storefront:
//! a validated cart model, a pure order-totals calculator with a configurable
//! free-delivery policy, an injected analytics capability and the text form of the
//! order summary widget.

pub mod analytics;
pub mod cart;
pub mod content;
pub mod fixtures;
pub mod prelude;
pub mod pricing;
pub mod shipping;
pub mod summary;

//! Fruitbox prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    analytics::{
        AnalyticsEvent, AnalyticsSink, LateBoundSink, LogSink, MemorySink, NoopSink, ParamValue,
        events,
    },
    cart::{Cart, CartError, ItemId, LineItem},
    content::{BenefitCard, StorefrontContent},
    fixtures::{Fixture, FixtureError},
    pricing::{OrderTotals, TotalsError, line_total, order_totals},
    shipping::{DeliveryFee, ShippingError, ShippingPolicy},
    summary::{OrderSummary, SummaryError},
};

//! Storefront events
//!
//! Typed constructors for the events the storefront reports. Each returns a
//! plain [`AnalyticsEvent`]; delivery is whatever sink the caller injects.

use rusty_money::{Money, iso::Currency};

use crate::{
    analytics::{AnalyticsEvent, ParamValue},
    cart::Cart,
    pricing::OrderTotals,
};

fn amount(money: Money<'_, Currency>) -> ParamValue {
    ParamValue::Amount(*money.amount())
}

fn count(value: usize) -> ParamValue {
    ParamValue::Integer(i64::try_from(value).unwrap_or(i64::MAX))
}

/// The storefront landing page was shown.
pub fn storefront_viewed() -> AnalyticsEvent {
    AnalyticsEvent::new("storefront_viewed")
}

/// The marquee banner was clicked through.
pub fn promo_banner_clicked(slug: &str) -> AnalyticsEvent {
    AnalyticsEvent::new("promo_banner_clicked")
        .with_param("slug", ParamValue::Text(slug.to_string()))
}

/// The order summary widget was rendered for a cart snapshot.
pub fn order_summary_viewed(cart: &Cart<'_>, totals: &OrderTotals<'_>) -> AnalyticsEvent {
    AnalyticsEvent::new("order_summary_viewed")
        .with_param("lines", count(cart.len()))
        .with_param(
            "units",
            ParamValue::Integer(i64::try_from(cart.unit_count()).unwrap_or(i64::MAX)),
        )
        .with_param("subtotal", amount(totals.subtotal()))
        .with_param(
            "free_delivery",
            ParamValue::Integer(i64::from(totals.free_shipping())),
        )
        .with_param("total", amount(totals.total()))
}

/// Checkout was begun from the order summary.
pub fn checkout_started(cart: &Cart<'_>, totals: &OrderTotals<'_>) -> AnalyticsEvent {
    AnalyticsEvent::new("checkout_started")
        .with_param("lines", count(cart.len()))
        .with_param("total", amount(totals.total()))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rusty_money::{Money, iso::RUB};
    use testresult::TestResult;

    use crate::{
        cart::{ItemId, LineItem},
        pricing::order_totals,
        shipping::ShippingPolicy,
    };

    use super::*;

    fn cart_and_totals() -> TestResult<(Cart<'static>, OrderTotals<'static>)> {
        let cart = Cart::with_lines(
            [
                LineItem::new(
                    ItemId::new("citrus_box"),
                    "Citrus Sunshine Box",
                    Money::from_minor(50_000, RUB),
                    2,
                ),
                LineItem::new(
                    ItemId::new("berry_box"),
                    "Berry Medley Box",
                    Money::from_minor(30_000, RUB),
                    1,
                ),
            ],
            RUB,
        )?;

        let policy = ShippingPolicy::new(
            Money::from_minor(30_000, RUB),
            Money::from_minor(200_000, RUB),
        )?;

        let totals = order_totals(&cart, &policy)?;

        Ok((cart, totals))
    }

    #[test]
    fn storefront_viewed_has_no_params() {
        let event = storefront_viewed();

        assert_eq!(event.name(), "storefront_viewed");
        assert!(event.params().is_empty());
    }

    #[test]
    fn promo_banner_clicked_carries_slug() {
        let event = promo_banner_clicked("free-delivery");

        assert_eq!(
            event.param("slug"),
            Some(&ParamValue::Text("free-delivery".to_string()))
        );
    }

    #[test]
    fn order_summary_viewed_carries_cart_shape_and_totals() -> TestResult {
        let (cart, totals) = cart_and_totals()?;

        let event = order_summary_viewed(&cart, &totals);

        assert_eq!(event.name(), "order_summary_viewed");
        assert_eq!(event.param("lines"), Some(&ParamValue::Integer(2)));
        assert_eq!(event.param("units"), Some(&ParamValue::Integer(3)));
        assert_eq!(
            event.param("subtotal"),
            Some(&ParamValue::Amount(Decimal::new(130_000, 2)))
        );
        assert_eq!(event.param("free_delivery"), Some(&ParamValue::Integer(0)));
        assert_eq!(
            event.param("total"),
            Some(&ParamValue::Amount(Decimal::new(160_000, 2)))
        );

        Ok(())
    }

    #[test]
    fn checkout_started_carries_the_grand_total() -> TestResult {
        let (cart, totals) = cart_and_totals()?;

        let event = checkout_started(&cart, &totals);

        assert_eq!(event.name(), "checkout_started");
        assert_eq!(event.param("lines"), Some(&ParamValue::Integer(2)));
        assert_eq!(
            event.param("total"),
            Some(&ParamValue::Amount(Decimal::new(160_000, 2)))
        );

        Ok(())
    }
}

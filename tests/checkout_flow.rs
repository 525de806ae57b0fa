//! Integration test for the `gift_boxes` fixture set: totals, the
//! free-delivery threshold and the rendered order summary.
//!
//! Expected totals for the full fixture cart (delivery policy: flat fee
//! 300.00 ₽, free from 2000.00 ₽):
//!
//! 1. Orchard Classic Box: 890.00 ₽ × 1 =  890.00 ₽ (89000 kopecks)
//! 2. Citrus Sunshine Box: 1200.00 ₽ × 2 = 2400.00 ₽ (240000 kopecks)
//! 3. Berry Medley Box:    1450.00 ₽ × 1 = 1450.00 ₽ (145000 kopecks)
//!
//! Subtotal: 4740.00 ₽ (474000 kopecks), which clears the 2000.00 ₽
//! threshold, so delivery is free and the total equals the subtotal.
//!
//! The one-line prefix of the same cart (just the Orchard Classic Box)
//! stays under the threshold: 890.00 ₽ + 300.00 ₽ delivery = 1190.00 ₽.

use std::sync::Arc;

use fruitbox::{
    analytics::{AnalyticsEvent, AnalyticsSink, LateBoundSink, MemorySink, ParamValue, events},
    fixtures::Fixture,
    pricing::order_totals,
    summary::OrderSummary,
};
use rust_decimal::Decimal;
use rusty_money::{Money, iso::RUB};
use testresult::TestResult;

#[test]
fn full_fixture_cart_rides_free() -> TestResult {
    let fixture = Fixture::from_set("gift_boxes")?;

    let cart = fixture.cart(None)?;
    let totals = order_totals(&cart, fixture.shipping_policy()?)?;

    assert_eq!(totals.subtotal(), Money::from_minor(474_000, RUB));
    assert_eq!(totals.shipping(), Money::from_minor(0, RUB));
    assert!(totals.free_shipping());
    assert_eq!(totals.total(), Money::from_minor(474_000, RUB));

    Ok(())
}

#[test]
fn one_line_prefix_pays_the_flat_fee() -> TestResult {
    let fixture = Fixture::from_set("gift_boxes")?;

    let cart = fixture.cart(Some(1))?;
    let totals = order_totals(&cart, fixture.shipping_policy()?)?;

    assert_eq!(totals.subtotal(), Money::from_minor(89_000, RUB));
    assert_eq!(totals.shipping(), Money::from_minor(30_000, RUB));
    assert!(!totals.free_shipping());
    assert_eq!(totals.total(), Money::from_minor(119_000, RUB));

    Ok(())
}

#[test]
fn totals_recompute_identically_from_the_same_snapshot() -> TestResult {
    let fixture = Fixture::from_set("gift_boxes")?;

    let cart = fixture.cart(None)?;
    let policy = fixture.shipping_policy()?;

    // Pure projection: rendering between computations changes nothing.
    let first = order_totals(&cart, policy)?;

    let mut sink = Vec::new();
    OrderSummary::new(&cart, &first, policy).write_to(&mut sink)?;

    let second = order_totals(&cart, policy)?;

    assert_eq!(first, second);

    Ok(())
}

#[test]
fn summary_renders_the_fixture_cart() -> TestResult {
    let fixture = Fixture::from_set("gift_boxes")?;

    let cart = fixture.cart(None)?;
    let policy = fixture.shipping_policy()?;
    let totals = order_totals(&cart, policy)?;

    let mut out = Vec::new();
    OrderSummary::new(&cart, &totals, policy).write_to(&mut out)?;

    let output = String::from_utf8(out)?;

    assert!(output.contains("Orchard Classic Box"));
    assert!(output.contains("Citrus Sunshine Box"));
    assert!(output.contains("Berry Medley Box"));
    assert!(output.contains("Subtotal:"));
    assert!(output.contains("Delivery:"));
    assert!(output.contains("Total:"));
    assert!(output.contains("Free delivery unlocked."));

    Ok(())
}

#[test]
fn summary_below_threshold_names_the_missing_amount() -> TestResult {
    let fixture = Fixture::from_set("gift_boxes")?;

    let cart = fixture.cart(Some(1))?;
    let policy = fixture.shipping_policy()?;
    let totals = order_totals(&cart, policy)?;

    let mut out = Vec::new();
    OrderSummary::new(&cart, &totals, policy).write_to(&mut out)?;

    let output = String::from_utf8(out)?;

    assert!(output.contains("more for free delivery"));
    assert!(output.contains("(45% there)"));

    Ok(())
}

#[test]
fn checkout_events_reach_the_attached_client() -> TestResult {
    let fixture = Fixture::from_set("gift_boxes")?;

    let cart = fixture.cart(None)?;
    let totals = order_totals(&cart, fixture.shipping_policy()?)?;

    let counter = LateBoundSink::new(97_210_834);
    let memory = Arc::new(MemorySink::new());

    // Recorded before the client is attached: dropped with a warning.
    counter.record(&events::storefront_viewed());

    assert!(counter.attach(memory.clone()));

    counter.record(&events::order_summary_viewed(&cart, &totals));
    counter.record(&events::checkout_started(&cart, &totals));

    let recorded = memory.events();
    let names = counter_names(&recorded);

    assert_eq!(names, vec!["order_summary_viewed", "checkout_started"]);

    let summary_event = memory
        .events()
        .into_iter()
        .find(|event| event.name() == "order_summary_viewed")
        .ok_or("order_summary_viewed not recorded")?;

    assert_eq!(summary_event.param("lines"), Some(&ParamValue::Integer(3)));
    assert_eq!(summary_event.param("units"), Some(&ParamValue::Integer(4)));
    assert_eq!(
        summary_event.param("subtotal"),
        Some(&ParamValue::Amount(Decimal::new(474_000, 2)))
    );
    assert_eq!(
        summary_event.param("free_delivery"),
        Some(&ParamValue::Integer(1))
    );

    Ok(())
}

fn counter_names(recorded: &[AnalyticsEvent]) -> Vec<&str> {
    recorded.iter().map(AnalyticsEvent::name).collect()
}

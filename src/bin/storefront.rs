//! Storefront Demo
//!
//! Renders the marquee banner, the benefit cards and the order summary for a
//! fixture set, reporting analytics events through a log-backed counter.
//!
//! Use `-f` to load a fixture set by name
//! Use `-n` to limit the number of cart lines
//! Use `-c` to set the analytics counter id

use std::{
    io::{self, Write},
    sync::Arc,
};

use anyhow::Result;
use clap::Parser;
use fruitbox::{
    analytics::{AnalyticsSink, LateBoundSink, LogSink, events},
    fixtures::Fixture,
    pricing::order_totals,
    summary::OrderSummary,
};
use tracing_subscriber::EnvFilter;

/// Arguments for the storefront demo
#[derive(Debug, Parser)]
struct StorefrontArgs {
    /// Fixture set to use for the catalog, cart, delivery policy and content
    #[clap(short, long, default_value = "gift_boxes")]
    fixture: String,

    /// Number of cart lines to include
    #[clap(short, long)]
    n: Option<usize>,

    /// Numeric site id of the analytics counter
    #[clap(short, long, default_value_t = 97_210_834)]
    counter: u64,
}

/// Storefront demo
pub fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = StorefrontArgs::parse();

    let analytics = LateBoundSink::new(args.counter);
    analytics.attach(Arc::new(LogSink::new()));

    let fixture = Fixture::from_set(&args.fixture)?;
    let cart = fixture.cart(args.n)?;
    let policy = fixture.shipping_policy()?;
    let totals = order_totals(&cart, policy)?;

    analytics.record(&events::storefront_viewed());

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    let content = fixture.content();

    writeln!(handle, "{}", content.marquee_line("  •  "))?;

    for card in content.benefits() {
        writeln!(handle, "\n{}\n  {}", card.title(), card.blurb())?;
    }

    OrderSummary::new(&cart, &totals, policy).write_to(&mut handle)?;

    analytics.record(&events::order_summary_viewed(&cart, &totals));

    Ok(())
}

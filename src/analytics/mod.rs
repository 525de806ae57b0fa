//! Analytics capability
//!
//! Storefront events are reported through an injected [`AnalyticsSink`]
//! rather than a module-level global client. Every sink is fire-and-forget:
//! recording never blocks, never fails the caller, and carries no delivery
//! guarantee. [`LateBoundSink`] models the third-party counter the shop
//! reports to: a fixed numeric site id whose client is initialised
//! out-of-band, dropping events with a local warning until it is attached.

use std::{
    fmt,
    sync::{Arc, Mutex, OnceLock, PoisonError},
};

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;

pub mod events;

/// A single event parameter value.
#[derive(Clone, Debug, PartialEq)]
pub enum ParamValue {
    /// Free-form text.
    Text(String),

    /// Integral count.
    Integer(i64),

    /// Monetary amount in major currency units.
    Amount(Decimal),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Text(text) => f.write_str(text),
            ParamValue::Integer(value) => write!(f, "{value}"),
            ParamValue::Amount(amount) => write!(f, "{amount}"),
        }
    }
}

/// A named storefront event with its parameter map.
#[derive(Clone, Debug, PartialEq)]
pub struct AnalyticsEvent {
    name: String,
    params: FxHashMap<String, ParamValue>,
}

impl AnalyticsEvent {
    /// Create an event with no parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: FxHashMap::default(),
        }
    }

    /// Add a parameter to the event.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: ParamValue) -> Self {
        self.params.insert(key.into(), value);
        self
    }

    /// The event name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The event parameters.
    pub fn params(&self) -> &FxHashMap<String, ParamValue> {
        &self.params
    }

    /// Look up a single parameter.
    pub fn param(&self, key: &str) -> Option<&ParamValue> {
        self.params.get(key)
    }
}

/// Capability for recording storefront analytics events.
///
/// Fire-and-forget: implementations must never block or fail the caller,
/// and make no delivery guarantees.
pub trait AnalyticsSink {
    /// Record a single event.
    fn record(&self, event: &AnalyticsEvent);
}

/// Sink that discards every event.
#[derive(Debug, Default)]
pub struct NoopSink;

impl AnalyticsSink for NoopSink {
    fn record(&self, _event: &AnalyticsEvent) {}
}

/// Sink that keeps recorded events in memory, for tests and local inspection.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<AnalyticsEvent>>,
}

impl MemorySink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events recorded so far, in order.
    #[must_use]
    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of events recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Check if no events have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AnalyticsSink for MemorySink {
    fn record(&self, event: &AnalyticsEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}

/// Sink that emits events through the `tracing` pipeline.
#[derive(Debug, Default)]
pub struct LogSink;

impl LogSink {
    /// Create a new sink.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl AnalyticsSink for LogSink {
    fn record(&self, event: &AnalyticsEvent) {
        let mut params: Vec<String> = event
            .params()
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect();

        // Map iteration order is arbitrary; sort for stable log lines.
        params.sort_unstable();

        tracing::info!(event = %event.name(), params = %params.join(" "), "analytics event");
    }
}

/// Counter-backed sink whose client is initialised out-of-band.
///
/// The counter is identified by a fixed numeric site id. Events recorded
/// before a client is attached are dropped with a local warning; they are
/// never an error for the caller.
pub struct LateBoundSink {
    counter_id: u64,
    client: OnceLock<Arc<dyn AnalyticsSink + Send + Sync>>,
}

impl LateBoundSink {
    /// Create a sink for the given counter id, with no client attached.
    #[must_use]
    pub fn new(counter_id: u64) -> Self {
        Self {
            counter_id,
            client: OnceLock::new(),
        }
    }

    /// The numeric site id of the counter.
    #[must_use]
    pub fn counter_id(&self) -> u64 {
        self.counter_id
    }

    /// Attach the underlying client. Only the first attachment wins;
    /// returns whether this call attached it.
    pub fn attach(&self, client: Arc<dyn AnalyticsSink + Send + Sync>) -> bool {
        self.client.set(client).is_ok()
    }

    /// Whether a client has been attached.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.client.get().is_some()
    }
}

impl fmt::Debug for LateBoundSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LateBoundSink")
            .field("counter_id", &self.counter_id)
            .field("attached", &self.is_attached())
            .finish()
    }
}

impl AnalyticsSink for LateBoundSink {
    fn record(&self, event: &AnalyticsEvent) {
        match self.client.get() {
            Some(client) => client.record(event),
            None => tracing::warn!(
                counter_id = self.counter_id,
                event = %event.name(),
                "analytics client not initialised; event dropped"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_builder_collects_params() {
        let event = AnalyticsEvent::new("order_summary_viewed")
            .with_param("lines", ParamValue::Integer(3))
            .with_param("source", ParamValue::Text("cart".to_string()));

        assert_eq!(event.name(), "order_summary_viewed");
        assert_eq!(event.params().len(), 2);
        assert_eq!(event.param("lines"), Some(&ParamValue::Integer(3)));
        assert_eq!(event.param("missing"), None);
    }

    #[test]
    fn param_value_display_forms() {
        assert_eq!(format!("{}", ParamValue::Text("cart".to_string())), "cart");
        assert_eq!(format!("{}", ParamValue::Integer(42)), "42");
        assert_eq!(
            format!("{}", ParamValue::Amount(Decimal::new(130_000, 2))),
            "1300.00"
        );
    }

    #[test]
    fn memory_sink_records_in_order() {
        let sink = MemorySink::new();

        assert!(sink.is_empty());

        sink.record(&AnalyticsEvent::new("first"));
        sink.record(&AnalyticsEvent::new("second"));

        let events = sink.events();

        assert_eq!(sink.len(), 2);
        assert_eq!(events.first().map(AnalyticsEvent::name), Some("first"));
        assert_eq!(events.last().map(AnalyticsEvent::name), Some("second"));
    }

    #[test]
    fn noop_sink_discards_events() {
        let sink = NoopSink;

        // Nothing observable; recording simply must not panic.
        sink.record(&AnalyticsEvent::new("ignored"));
    }

    #[test]
    fn late_bound_sink_drops_events_until_attached() {
        let late = LateBoundSink::new(97_210_834);
        let memory = Arc::new(MemorySink::new());

        assert!(!late.is_attached());

        late.record(&AnalyticsEvent::new("dropped"));

        assert!(late.attach(memory.clone()));
        assert!(late.is_attached());

        late.record(&AnalyticsEvent::new("delivered"));

        assert_eq!(memory.len(), 1);
        assert_eq!(
            memory.events().first().map(AnalyticsEvent::name),
            Some("delivered")
        );
    }

    #[test]
    fn late_bound_sink_attaches_only_once() {
        let late = LateBoundSink::new(97_210_834);
        let first = Arc::new(MemorySink::new());
        let second = Arc::new(MemorySink::new());

        assert!(late.attach(first.clone()));
        assert!(!late.attach(second.clone()));

        late.record(&AnalyticsEvent::new("delivered"));

        assert_eq!(first.len(), 1);
        assert!(second.is_empty());
    }

    #[test]
    fn late_bound_sink_debug_reports_attachment() {
        let late = LateBoundSink::new(7);

        let unattached = format!("{late:?}");
        late.attach(Arc::new(NoopSink));
        let attached = format!("{late:?}");

        assert!(unattached.contains("attached: false"));
        assert!(attached.contains("attached: true"));
    }
}

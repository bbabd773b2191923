use std::sync::Mutex;

use tracing::info;

use crate::events::AnalyticsEvent;

/// Destination for analytics events. Implementations must not block for long
/// and must swallow their own failures.
pub trait AnalyticsSink: Send + Sync {
    fn track(&self, event: &AnalyticsEvent);
}

/// Emits each event as a structured `tracing` record, for a log pipeline to
/// forward.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl AnalyticsSink for TracingSink {
    fn track(&self, event: &AnalyticsEvent) {
        let properties = serde_json::to_string(&event.properties).unwrap_or_default();
        info!(
            analytics.event = %event.name,
            analytics.properties = %properties,
            "analytics event"
        );
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl AnalyticsSink for NoopSink {
    fn track(&self, _event: &AnalyticsEvent) {}
}

/// Keeps events in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<AnalyticsEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<AnalyticsEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl AnalyticsSink for MemorySink {
    fn track(&self, event: &AnalyticsEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event.clone()),
            Err(poisoned) => poisoned.into_inner().push(event.clone()),
        }
    }
}

//! fallguard-analytics
//!
//! Product analytics events. Events are named, carry a flat property bag,
//! and are handed to an [`sink::AnalyticsSink`] fire-and-forget: tracking
//! never fails the request that produced the event.

pub mod error;
pub mod events;
pub mod sink;

pub use events::{AnalyticsEvent, PropertyValue};
pub use sink::{AnalyticsSink, MemorySink, NoopSink, TracingSink};

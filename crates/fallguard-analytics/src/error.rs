use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalyticsError {
    #[error("invalid event name '{0}': expected snake_case, at most 64 characters")]
    InvalidEventName(String),

    #[error("invalid property name '{0}'")]
    InvalidPropertyName(String),

    #[error("event name '{0}' is reserved for server-side events")]
    ReservedEventName(String),
}

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::AnalyticsError;

const MAX_NAME_LEN: usize = 64;

/// Emitted by the service when an assessment is scored.
pub const ASSESSMENT_COMPLETED: &str = "assessment_completed";
/// Emitted by the service when a lead is stored.
pub const LEAD_SUBMITTED: &str = "lead_submitted";

/// Names only the service may emit. Client posts using them are rejected.
pub const SERVER_EVENTS: [&str; 2] = [ASSESSMENT_COMPLETED, LEAD_SUBMITTED];

/// A scalar property value. Nested objects are not allowed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum PropertyValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Bool(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Number(value)
    }
}

impl From<u32> for PropertyValue {
    fn from(value: u32) -> Self {
        PropertyValue::Number(f64::from(value))
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Text(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::Text(value)
    }
}

/// A named product analytics event, e.g. `assessment_completed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnalyticsEvent {
    pub name: String,
    #[serde(default)]
    pub properties: BTreeMap<String, PropertyValue>,
}

impl AnalyticsEvent {
    pub fn new(name: impl Into<String>) -> Result<Self, AnalyticsError> {
        let name = name.into();
        if !is_snake_case(&name) {
            return Err(AnalyticsError::InvalidEventName(name));
        }
        Ok(Self {
            name,
            properties: BTreeMap::new(),
        })
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Check an event received from outside the process (e.g. posted by the
    /// web client) against the same rules [`new`](Self::new) enforces.
    pub fn validate(&self) -> Result<(), AnalyticsError> {
        if !is_snake_case(&self.name) {
            return Err(AnalyticsError::InvalidEventName(self.name.clone()));
        }
        if let Some(key) = self.properties.keys().find(|k| !is_snake_case(k)) {
            return Err(AnalyticsError::InvalidPropertyName(key.clone()));
        }
        Ok(())
    }

    /// [`validate`](Self::validate), and additionally refuse the names in
    /// [`SERVER_EVENTS`] so client traffic cannot pose as server events.
    pub fn validate_client(&self) -> Result<(), AnalyticsError> {
        self.validate()?;
        if SERVER_EVENTS.contains(&self.name.as_str()) {
            return Err(AnalyticsError::ReservedEventName(self.name.clone()));
        }
        Ok(())
    }
}

fn is_snake_case(name: &str) -> bool {
    name.len() <= MAX_NAME_LEN
        && name.starts_with(|c: char| c.is_ascii_lowercase())
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

//! Analytics events. Events are only logged; there is no collector.

use serde::Serialize;
use serde_json::{Map, Value, json};

/// A named event with free-form properties.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsEvent {
    pub name: String,
    pub properties: Map<String, Value>,
}

impl AnalyticsEvent {
    pub fn new(name: impl Into<String>, properties: Map<String, Value>) -> Self {
        Self {
            name: name.into(),
            properties,
        }
    }

    fn with(name: &str, properties: Value) -> Self {
        let properties = match properties {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self::new(name, properties)
    }

    #[must_use]
    pub fn page_view(title: &str, location: &str) -> Self {
        Self::with(
            "page_view",
            json!({ "page_title": title, "page_location": location }),
        )
    }

    /// Recorded after every non-empty filter pass.
    #[must_use]
    pub fn search(query: &str, results: usize) -> Self {
        Self::with("search", json!({ "query": query, "results": results }))
    }

    /// `elapsed_ms` is rounded to whole milliseconds.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn page_load_time(elapsed_ms: f64) -> Self {
        let load_time = if elapsed_ms.is_finite() && elapsed_ms >= 0.0 {
            json!(elapsed_ms.round() as u64)
        } else {
            Value::Null
        };
        Self::with("page_load_time", json!({ "load_time": load_time }))
    }

    #[must_use]
    pub fn javascript_error(message: &str, filename: &str, line: u32) -> Self {
        Self::with(
            "javascript_error",
            json!({
                "error_message": message,
                "error_filename": filename,
                "error_line": line,
            }),
        )
    }

    /// Property bag rendered as compact JSON.
    #[must_use]
    pub fn properties_json(&self) -> String {
        Value::Object(self.properties.clone()).to_string()
    }
}

/// Destination for analytics events.
pub trait EventSink {
    fn record(&self, event: &AnalyticsEvent);
}

/// Writes each event to the log at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl EventSink for LogSink {
    fn record(&self, event: &AnalyticsEvent) {
        log::info!(
            target: "analytics",
            "Tracking event: {} {}",
            event.name,
            event.properties_json()
        );
    }
}

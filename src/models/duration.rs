//! Metric duration decoding.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A duration value as returned by the metrics service.
///
/// Depending on the service's serialization config, durations arrive
/// either as ISO-8601 strings restricted to hour/minute components
/// ("PT4H30M") or as a plain number of seconds. Decoding is lenient:
/// anything else normalizes to zero hours instead of failing, so a
/// malformed payload can never take the charts down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricDuration {
    /// Plain number of seconds.
    Seconds(f64),

    /// ISO-8601 duration string, e.g. "PT4H30M".
    Iso(String),

    /// Anything else the service might send (null, objects, ...).
    Other(serde_json::Value),
}

impl Default for MetricDuration {
    fn default() -> Self {
        MetricDuration::Seconds(0.0)
    }
}

impl MetricDuration {
    /// Normalize to hours. Total: malformed input yields `0.0`.
    pub fn hours(&self) -> f64 {
        match self {
            MetricDuration::Seconds(secs) => secs / 3600.0,
            MetricDuration::Iso(text) => iso_hours(text),
            MetricDuration::Other(_) => 0.0,
        }
    }
}

impl From<f64> for MetricDuration {
    fn from(seconds: f64) -> Self {
        MetricDuration::Seconds(seconds)
    }
}

impl From<&str> for MetricDuration {
    fn from(text: &str) -> Self {
        MetricDuration::Iso(text.to_string())
    }
}

/// Extract hours from a `PT`-prefixed ISO-8601 duration string.
///
/// Only hour and minute components are recognized. Strings without the
/// `PT` prefix, and components that fail to parse, count as zero.
fn iso_hours(text: &str) -> f64 {
    if !text.starts_with("PT") {
        return 0.0;
    }

    let hours = capture_int(hours_re(), text);
    let minutes = capture_int(minutes_re(), text);

    hours as f64 + minutes as f64 / 60.0
}

fn capture_int(re: &Regex, text: &str) -> u64 {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

fn hours_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)H").expect("valid hours regex"))
}

fn minutes_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)M").expect("valid minutes regex"))
}

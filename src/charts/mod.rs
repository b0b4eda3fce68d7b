//! Chart series projection.
//!
//! Pure functions deriving chart-ready series from a completed scan
//! result. Nothing here is cached or persisted; series are recomputed
//! on demand from the current scan state.

use serde::Serialize;

use crate::models::DoraMetricsResult;
use crate::scan::ScanState;

/// One labeled point in a chart series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

impl ChartPoint {
    fn new(label: &str, value: f64) -> Self {
        Self {
            label: label.to_string(),
            value,
        }
    }
}

/// Lead time for changes: one point, in hours.
pub fn lead_time_series(result: &DoraMetricsResult) -> Vec<ChartPoint> {
    vec![ChartPoint::new(
        "Lead Time (Hours)",
        result.lead_time_for_changes.hours(),
    )]
}

/// Deployment frequency: one point, deployments per day as given.
pub fn deployment_frequency_series(result: &DoraMetricsResult) -> Vec<ChartPoint> {
    vec![ChartPoint::new("Avg / Day", result.deployment_frequency)]
}

/// Change-failure split: two points that always sum to exactly 100.
///
/// The rate is clamped to 0-100 before the subtraction so malformed
/// upstream data cannot break the invariant.
pub fn change_failure_series(result: &DoraMetricsResult) -> Vec<ChartPoint> {
    let failure = result.change_failure_rate.clamp(0.0, 100.0);
    vec![
        ChartPoint::new("Success", 100.0 - failure),
        ChartPoint::new("Failure", failure),
    ]
}

/// Time to restore service: one point, in hours.
pub fn restore_time_series(result: &DoraMetricsResult) -> Vec<ChartPoint> {
    vec![ChartPoint::new(
        "MTTR (Hours)",
        result.time_to_restore_service.hours(),
    )]
}

/// The four series bundled for the rendering boundary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub lead_time: Vec<ChartPoint>,
    pub deployment_frequency: Vec<ChartPoint>,
    pub change_failure: Vec<ChartPoint>,
    pub restore_time: Vec<ChartPoint>,
}

impl ChartData {
    /// Project a completed result.
    pub fn from_result(result: &DoraMetricsResult) -> Self {
        Self {
            lead_time: lead_time_series(result),
            deployment_frequency: deployment_frequency_series(result),
            change_failure: change_failure_series(result),
            restore_time: restore_time_series(result),
        }
    }

    /// Project the current scan state.
    ///
    /// Anything but `Success` yields the zero-valued placeholder
    /// shapes, so renderers never see an empty or missing series.
    pub fn from_state(state: &ScanState) -> Self {
        match state.result() {
            Some(result) => Self::from_result(result),
            None => Self::placeholder(),
        }
    }

    fn placeholder() -> Self {
        Self::from_result(&DoraMetricsResult::default())
    }
}

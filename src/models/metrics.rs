//! Wire types shared with the metrics service.

use serde::{Deserialize, Serialize};

use super::{MetricDuration, TimeWindow};

/// Body of `POST /api/metrics/scan`.
///
/// Built fresh for every scan attempt and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRequest {
    pub repo_url: String,
    pub time_window: TimeWindow,
}

impl ScanRequest {
    pub fn new(repo_url: impl Into<String>, time_window: TimeWindow) -> Self {
        Self {
            repo_url: repo_url.into(),
            time_window,
        }
    }
}

/// The four DORA indicators for one repository and window.
///
/// Every field tolerates absence on the wire; missing values decode to
/// their zero forms so the charts always have something to show.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DoraMetricsResult {
    pub lead_time_for_changes: MetricDuration,

    /// Deployments per day, already normalized by the service.
    pub deployment_frequency: f64,

    /// Percentage, nominally 0-100.
    pub change_failure_rate: f64,

    pub time_to_restore_service: MetricDuration,
}

/// Body of `GET /api/health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_scan_request_wire_format() {
        let request = ScanRequest::new(
            "https://github.com/helm/helm",
            TimeWindow::from_dates("2023-01-01", "2023-12-31").unwrap(),
        );

        let json = serde_json::to_string(&request).unwrap();

        assert!(json.contains(r#""repoUrl":"https://github.com/helm/helm""#));
        assert!(json.contains(r#""timeWindow""#));
        assert!(json.contains("2023-01-01T00:00:00Z"));
        assert!(json.contains("2023-12-31T23:59:59Z"));
    }

    #[test]
    fn test_result_deserializes_iso_durations() {
        let json = r#"{
            "leadTimeForChanges": "PT26H30M",
            "deploymentFrequency": 1.5,
            "changeFailureRate": 12.5,
            "timeToRestoreService": "PT45M"
        }"#;

        let result: DoraMetricsResult = serde_json::from_str(json).unwrap();

        assert_eq!(result.lead_time_for_changes.hours(), 26.5);
        assert_eq!(result.deployment_frequency, 1.5);
        assert_eq!(result.change_failure_rate, 12.5);
        assert_eq!(result.time_to_restore_service.hours(), 0.75);
    }

    #[test]
    fn test_result_deserializes_numeric_durations() {
        let json = r#"{
            "leadTimeForChanges": 7200,
            "deploymentFrequency": 0.2,
            "changeFailureRate": 0,
            "timeToRestoreService": 1800
        }"#;

        let result: DoraMetricsResult = serde_json::from_str(json).unwrap();

        assert_eq!(result.lead_time_for_changes.hours(), 2.0);
        assert_eq!(result.time_to_restore_service.hours(), 0.5);
    }

    #[test]
    fn test_result_tolerates_missing_fields() {
        let result: DoraMetricsResult = serde_json::from_str("{}").unwrap();

        assert_eq!(result, DoraMetricsResult::default());
        assert_eq!(result.lead_time_for_changes.hours(), 0.0);
        assert_eq!(result.deployment_frequency, 0.0);
    }

    #[test]
    fn test_result_tolerates_malformed_durations() {
        let json = r#"{
            "leadTimeForChanges": null,
            "timeToRestoreService": {"unexpected": true}
        }"#;

        let result: DoraMetricsResult = serde_json::from_str(json).unwrap();

        assert_eq!(result.lead_time_for_changes.hours(), 0.0);
        assert_eq!(result.time_to_restore_service.hours(), 0.0);
    }

    #[test]
    fn test_health_status_round_trip() {
        let json = r#"{"status": "UP"}"#;
        let health: HealthStatus = serde_json::from_str(json).unwrap();

        assert_eq!(health.status, "UP");
    }
}

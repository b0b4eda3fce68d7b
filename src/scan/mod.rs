//! Scan orchestrator.
//!
//! Owns the lifecycle of a metrics scan: idle → loading →
//! (success | failed). Consumers read state snapshots or subscribe to
//! change notifications; only the orchestrator writes.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::client::MetricsApi;
use crate::models::{DoraMetricsResult, ScanRequest, TimeWindow};

/// Input rejected before any remote call is made.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("Repository URL must not be empty")]
    EmptyRepoUrl,
}

/// Phase of the scan lifecycle. Exactly one variant holds at a time.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ScanState {
    #[default]
    Idle,
    Loading,
    Success(DoraMetricsResult),
    Failed(String),
}

impl ScanState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ScanState::Loading)
    }

    /// The completed result, if the last scan succeeded.
    pub fn result(&self) -> Option<&DoraMetricsResult> {
        match self {
            ScanState::Success(result) => Some(result),
            _ => None,
        }
    }

    /// The failure message, if the last scan failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            ScanState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Drives scans against the metrics service and tracks their state.
///
/// Several scans may be started back to back; each carries a sequence
/// token and only the most recently issued scan's outcome is ever
/// visible. A stale resolution, however late it arrives, is discarded.
pub struct ScanOrchestrator {
    api: Arc<dyn MetricsApi>,
    state_tx: watch::Sender<ScanState>,
    latest: Arc<AtomicU64>,
}

impl ScanOrchestrator {
    /// Create an orchestrator in the `Idle` state.
    pub fn new(api: Arc<dyn MetricsApi>) -> Self {
        let (state_tx, _) = watch::channel(ScanState::Idle);
        Self {
            api,
            state_tx,
            latest: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Snapshot of the current phase.
    pub fn state(&self) -> ScanState {
        self.state_tx.borrow().clone()
    }

    /// Watch for phase changes.
    pub fn subscribe(&self) -> watch::Receiver<ScanState> {
        self.state_tx.subscribe()
    }

    /// Start a scan for the given repository and window.
    ///
    /// Rejects an empty repository URL without touching state or the
    /// network. Otherwise clears any previous result or error, enters
    /// `Loading`, and issues exactly one call to the metrics service.
    /// The phase leaves `Loading` on every resolution path.
    pub fn start_scan(&self, repo_url: &str, window: TimeWindow) -> Result<(), InputError> {
        if repo_url.is_empty() {
            return Err(InputError::EmptyRepoUrl);
        }

        let token = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        commit_state(&self.state_tx, &self.latest, token, ScanState::Loading);

        let request = ScanRequest::new(repo_url, window);
        info!("Starting scan {} for {}", token, request.repo_url);

        let api = Arc::clone(&self.api);
        let state_tx = self.state_tx.clone();
        let latest = Arc::clone(&self.latest);

        tokio::spawn(async move {
            let next = match api.scan(&request).await {
                Ok(result) => {
                    info!("Scan {} completed for {}", token, request.repo_url);
                    ScanState::Success(result)
                }
                Err(e) => {
                    error!("Scan {} failed: {}", token, e);
                    ScanState::Failed(e.scan_message())
                }
            };
            commit_state(&state_tx, &latest, token, next);
        });

        Ok(())
    }
}

/// Commit a state transition unless a newer scan has been issued.
///
/// The token check runs inside the watch channel's critical section,
/// so commits are serialized and a stale resolution leaves the newer
/// scan's state untouched.
fn commit_state(
    tx: &watch::Sender<ScanState>,
    latest: &AtomicU64,
    token: u64,
    next: ScanState,
) {
    tx.send_if_modified(|state| {
        if token != latest.load(Ordering::SeqCst) {
            warn!("Discarding stale resolution for scan {}", token);
            return false;
        }
        *state = next;
        true
    });
}

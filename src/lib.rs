//! # Dorascope
//!
//! Client-side orchestration for DORA metrics scans.
//!
//! Given a repository URL and a time window, the crate issues a scan
//! request to a remote metrics service, tracks the asynchronous
//! lifecycle of the request, and projects the returned indicators
//! into chart-ready series.
//!
//! ## Architecture
//!
//! - **models**: Wire types (scan request/result, time windows, durations)
//! - **client**: HTTP client for the metrics service
//! - **scan**: Scan lifecycle orchestration (idle/loading/success/failed)
//! - **charts**: Chart series projection from completed results
//! - **config**: Configuration loading and validation

pub mod charts;
pub mod client;
pub mod config;
pub mod models;
pub mod scan;

pub use models::*;

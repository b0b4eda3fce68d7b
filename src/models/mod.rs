//! Core data models for the scan client.

mod duration;
mod metrics;
mod window;

pub use duration::*;
pub use metrics::*;
pub use window::*;

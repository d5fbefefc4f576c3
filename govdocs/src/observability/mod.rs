//! Logging and metrics.

pub mod logging;
pub mod metrics;

pub use logging::{LogFormat, LogSettings, init_logging};
pub use metrics::init_metrics;

//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Router and site shell produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stderr (stdout is left to CLI output)
//!     → Metrics endpoint (Prometheus scrape)
//! ```

pub mod logging;
pub mod metrics;

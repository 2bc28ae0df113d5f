//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via `tracing`)
//!     → metrics.rs (counters, gauges)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured fields, never interpolated strings
//! - Request ID flows through the HTTP layer spans
//! - Metrics are cheap (atomic increments); without an installed
//!   recorder every call is a no-op

pub mod logging;
pub mod metrics;

//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Route table build, dispatcher, HTTP adapter produce:
//!     → logging.rs (structured log events, pretty or JSON)
//!     → metrics.rs (request counters and latency histograms)
//!
//! Consumers:
//!     → stdout (log aggregation)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured fields instead of formatted messages
//! - Request ID attached to the per-request span by the HTTP layer
//! - Metrics are cheap; recording without an installed exporter is a no-op

pub mod logging;
pub mod metrics;

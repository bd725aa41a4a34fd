//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! middleware + handlers produce:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (request counters)
//!
//! Consumers:
//!     → stdout via tracing-subscriber fmt layer
//!     → Prometheus scrape endpoint (optional)
//! ```

pub mod logging;
pub mod metrics;

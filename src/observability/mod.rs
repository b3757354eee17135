//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Request middleware opens a `request` span (request_id = 8 chars)
//!     → correlation.rs (span field → span extension)
//!     → format.rs (UTC+8 timestamp, level, [request_id], message)
//!     → logging.rs (rotating file sink + console sink)
//!
//! Handler outcomes
//!     → metrics.rs (counters, histogram; optional Prometheus endpoint)
//! ```
//!
//! # Design Decisions
//! - Every line carries a correlation tag; `SYSTEM` outside requests
//! - Subscriber built from an explicit `LoggingConfig`, installed once
//! - Metrics are cheap and disabled unless configured

pub mod correlation;
pub mod format;
pub mod logging;
pub mod metrics;

pub use correlation::{request_span, CorrelationLayer, SYSTEM_REQUEST_ID};
pub use logging::{init_logging, LoggingError, LoggingGuard};

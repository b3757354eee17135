//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (assign request ID, open request span)
//!     → handler.rs (decode body, run conversion)
//!     → response.rs (envelope or {"detail": ...} with status)
//!     → Send to client
//! ```

pub mod handler;
pub mod request;
pub mod response;
pub mod server;

pub use request::{ConvertRequest, RequestId, X_REQUEST_ID};
pub use response::{ApiError, ConvertResponse, ErrorBody, HealthStatus};
pub use server::{AppState, HttpServer, ServerError};

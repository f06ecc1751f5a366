//! HTTP adapter subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (assign x-request-id)
//!     → method check (GET only, otherwise 405 with no body)
//!     → Dispatcher::dispatch(path + query)
//!     → response.rs (document text or error document, status code)
//!     → Send to client
//! ```
//!
//! # Design Decisions
//! - The adapter is the only place dispatch errors become status codes
//! - Every response carries the request ID of its request
//! - Requests are bounded by the configured timeout

pub mod request;
pub mod response;
pub mod server;

pub use request::{UuidRequestId, X_REQUEST_ID};
pub use server::HttpServer;

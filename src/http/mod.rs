//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID assigned and propagated)
//!     → handler: OPTIONS → pre-flight, otherwise → aggregation pipeline
//!     → response.rs (document or error envelope)
//!     → CORS headers on every response
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{request_id, X_REQUEST_ID};
pub use server::HttpServer;

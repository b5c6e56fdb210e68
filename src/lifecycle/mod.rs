//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Validated config → metrics exporter → bind listener → serve
//!
//! Shutdown (shutdown.rs):
//!     Trigger → stop accepting → finish in-flight requests → exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The listener binds last, after everything it depends on is ready

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;

//! Subscription rendering subsystem.
//!
//! # Data Flow
//! ```text
//! AggregateSet
//!     → subscription.rs (metadata preamble + entry lines)
//!     → fallback.rs (redirect / status page script)
//!     → SubscriptionDocument (response body)
//! ```
//!
//! # Design Decisions
//! - Rendering is pure except for the embedded render timestamp
//! - The preamble layout is consumed by proxy clients and must stay stable

pub mod fallback;
pub mod subscription;

pub use subscription::{metadata, render, render_at, SubscriptionDocument};

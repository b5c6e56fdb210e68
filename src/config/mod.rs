//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML), optional
//!     → loader.rs (parse & deserialize, or defaults)
//!     → validation.rs (semantic checks)
//!     → AggregatorConfig (validated, immutable)
//!     → shared via Arc to the server and pipeline
//! ```
//!
//! # Design Decisions
//! - Config is loaded once at process start and never mutated
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_or_default, ConfigError};
pub use schema::AggregatorConfig;
pub use schema::BrandingConfig;
pub use schema::FetchConfig;
pub use schema::IndexConfig;
pub use schema::ListenerConfig;
pub use schema::SubscriptionConfig;

//! Proxy subscription aggregator library.

pub mod config;
pub mod fetch;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod pipeline;
pub mod render;

pub use config::schema::AggregatorConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use pipeline::Aggregator;

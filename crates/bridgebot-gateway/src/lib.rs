//! HTTP transport for the bridge.
//!
//! Serves one webhook route per registered subscriber plus a couple of
//! operational endpoints, and drives the dispatch engine for every
//! message a subscriber parses out of a delivery. Embedding applications
//! are expected to initialize `tracing` themselves.

pub mod app;
pub mod http;
pub mod serve;

pub use app::{build_router, AppState};
pub use serve::serve;

//! Sentiment analysis page controller.
//!
//! Drives a two-tab page (single text and batch) against the `/analyze` and
//! `/batch-analyze` endpoints. The same controller runs in the browser over the live DOM
//! and natively over [`dom::MemoryDocument`].

/// Wire types, error mapping and HTTP transports.
pub mod api;
/// Client settings.
pub mod config;
/// Tabs, input guards and the per-mode request state machine.
pub mod controller;
/// Document abstraction and node trees.
pub mod dom;
/// Tracing setup.
pub mod logging;
/// Result panel renderers.
pub mod render;

#[cfg(not(target_arch = "wasm32"))]
pub mod app_dirs;
#[cfg(not(target_arch = "wasm32"))]
mod http_client;
#[cfg(target_arch = "wasm32")]
mod web;

pub use config::ClientConfig;
pub use controller::{Mode, PanelState, SentimentController};
#[cfg(not(target_arch = "wasm32"))]
pub use controller::HeadlessSession;
pub use dom::{Document, MemoryDocument};

//! Client configuration: backend location, batch limit and transport bounds.

mod errors;
#[cfg(not(target_arch = "wasm32"))]
mod io;
mod types;

pub use errors::ConfigError;
#[cfg(not(target_arch = "wasm32"))]
pub use io::{config_path, load_from_path, load_or_default};
pub use types::{ClientConfig, DEFAULT_NATIVE_BASE_URL, MAX_BATCH_ITEMS_CEILING};

/// Default filename used to store the client configuration.
pub const CONFIG_FILE_NAME: &str = "sentipanel.toml";

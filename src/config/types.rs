use serde::{Deserialize, Serialize};
use url::Url;

use super::ConfigError;

/// Backend address used by the native runner when no `base_url` is configured.
pub const DEFAULT_NATIVE_BASE_URL: &str = "http://127.0.0.1:5000";

/// Upper bound accepted for `max_batch_items`.
pub const MAX_BATCH_ITEMS_CEILING: usize = 1000;

const DEFAULT_MAX_BATCH_ITEMS: usize = 100;
const DEFAULT_MAX_RESPONSE_BYTES: usize = 4 * 1024 * 1024;
const MIN_RESPONSE_BYTES: usize = 1024;

/// Client settings loaded from `sentipanel.toml`.
///
/// Config keys (TOML): `base_url`, `max_batch_items`, `max_response_bytes`,
/// `connect_timeout_secs`, `read_timeout_secs`. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Backend origin. Empty means same-origin in the browser and
    /// [`DEFAULT_NATIVE_BASE_URL`] for the native runner.
    pub base_url: String,
    /// Largest batch accepted before the user is asked to trim it.
    pub max_batch_items: usize,
    pub max_response_bytes: usize,
    pub connect_timeout_secs: u64,
    pub read_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            max_batch_items: DEFAULT_MAX_BATCH_ITEMS,
            max_response_bytes: DEFAULT_MAX_RESPONSE_BYTES,
            connect_timeout_secs: 10,
            read_timeout_secs: 30,
        }
    }
}

impl ClientConfig {
    /// Clamp values into their supported ranges.
    pub fn normalized(self) -> Self {
        Self {
            base_url: self.base_url.trim().to_string(),
            max_batch_items: self.max_batch_items.clamp(1, MAX_BATCH_ITEMS_CEILING),
            max_response_bytes: self.max_response_bytes.max(MIN_RESPONSE_BYTES),
            connect_timeout_secs: self.connect_timeout_secs.max(1),
            read_timeout_secs: self.read_timeout_secs.max(1),
        }
    }

    /// Resolve the configured base URL, using `fallback` when none is set.
    pub fn base_url_or(&self, fallback: &str) -> Result<Url, ConfigError> {
        let raw = match self.base_url.trim() {
            "" => fallback,
            configured => configured,
        };
        Url::parse(raw).map_err(|source| ConfigError::InvalidBaseUrl {
            url: raw.to_string(),
            source,
        })
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn timeouts(&self) -> crate::http_client::Timeouts {
        let defaults = crate::http_client::Timeouts::default();
        crate::http_client::Timeouts {
            connect: std::time::Duration::from_secs(self.connect_timeout_secs),
            read: std::time::Duration::from_secs(self.read_timeout_secs),
            write: defaults.write,
        }
    }
}

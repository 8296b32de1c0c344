use std::path::{Path, PathBuf};

use serde::de::Error as SerdeDeError;

use crate::app_dirs;

use super::{CONFIG_FILE_NAME, ClientConfig, ConfigError};

/// Resolve the configuration file path, ensuring the parent directory exists.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    let dir = app_dirs::app_root_dir().map_err(map_app_dir_error)?;
    Ok(dir.join(CONFIG_FILE_NAME))
}

/// Load configuration from the app directory, returning defaults if the file is missing.
pub fn load_or_default() -> Result<ClientConfig, ConfigError> {
    load_from_path(&config_path()?)
}

/// Load configuration from an explicit path, returning defaults if it does not exist.
pub fn load_from_path(path: &Path) -> Result<ClientConfig, ConfigError> {
    if !path.exists() {
        tracing::debug!("No config at {}; using defaults", path.display());
        return Ok(ClientConfig::default());
    }
    let bytes = std::fs::read(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8(bytes).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source: SerdeDeError::custom(source),
    })?;
    let config: ClientConfig = toml::from_str(&text).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(config.normalized())
}

fn map_app_dir_error(error: app_dirs::AppDirError) -> ConfigError {
    match error {
        app_dirs::AppDirError::NoBaseDir => ConfigError::NoConfigDir,
        app_dirs::AppDirError::CreateDir { path, source } => ConfigError::CreateDir { path, source },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = load_from_path(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "base_url = \"http://10.0.0.2:8080\"\nmax_batch_items = 25\n").unwrap();
        let config = load_from_path(&path).unwrap();
        assert_eq!(config.base_url, "http://10.0.0.2:8080");
        assert_eq!(config.max_batch_items, 25);
        assert_eq!(config.read_timeout_secs, 30);
    }

    #[test]
    fn malformed_file_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "max_batch_items = \"many\"").unwrap();
        let err = load_from_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseToml { .. }));
        assert!(err.to_string().contains(CONFIG_FILE_NAME));
    }

    #[test]
    fn load_or_default_reads_from_app_root() {
        let dir = tempdir().unwrap();
        let _guard = app_dirs::ConfigBaseGuard::set(dir.path().to_path_buf());
        let root = dir.path().join(app_dirs::APP_DIR_NAME);
        std::fs::create_dir_all(&root).unwrap();
        std::fs::write(root.join(CONFIG_FILE_NAME), "max_batch_items = 7\n").unwrap();
        let config = load_or_default().unwrap();
        assert_eq!(config.max_batch_items, 7);
    }
}

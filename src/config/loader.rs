use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{AppError, AppResult, ConfigError};

use super::types::ConfigFile;

/// Config files picked up from the working directory when `--config` is absent,
/// in lookup order.
pub(crate) const DEFAULT_CONFIG_FILES: [&str; 2] = ["stress.toml", "stress.json"];

/// Serialization format of a config file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    pub(crate) fn from_path(path: &Path) -> AppResult<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| AppError::config(ConfigError::MissingExtension))?;
        match ext.to_ascii_lowercase().as_str() {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            _ => Err(AppError::config(ConfigError::UnsupportedExtension {
                ext: ext.to_owned(),
            })),
        }
    }

    fn parse<T: DeserializeOwned>(self, content: &str, path: &Path) -> AppResult<T> {
        let path = path.to_path_buf();
        match self {
            Self::Toml => toml::from_str(content)
                .map_err(|source| AppError::config(ConfigError::ParseToml { path, source })),
            Self::Json => serde_json::from_str(content)
                .map_err(|source| AppError::config(ConfigError::ParseJson { path, source })),
        }
    }
}

/// Loads the `--config` file, or the first default file in the working directory.
///
/// # Errors
///
/// Returns an error when the config file cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> AppResult<Option<ConfigFile>> {
    match path {
        Some(path) => load_config_file(Path::new(path)).map(Some),
        None => find_default_config(Path::new("."))
            .map(|path| load_config_file(&path))
            .transpose(),
    }
}

/// First of [`DEFAULT_CONFIG_FILES`] present as a regular file in `dir`.
pub(crate) fn find_default_config(dir: &Path) -> Option<PathBuf> {
    DEFAULT_CONFIG_FILES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

pub(crate) fn load_config_file(path: &Path) -> AppResult<ConfigFile> {
    let format = ConfigFormat::from_path(path)?;
    debug!("Loading {:?} config from {}", format, path.display());
    let content = std::fs::read_to_string(path).map_err(|err| {
        AppError::config(ConfigError::ReadConfig {
            path: path.to_path_buf(),
            source: err,
        })
    })?;
    format.parse(&content, path)
}

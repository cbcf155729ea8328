mod watch;

use std::{
    fs,
    path::{Path, PathBuf},
};

pub use clockface_proto::config::*;
pub use watch::{ConfigEvent, subscription};

use log::{info, warn};
use masterror::AppError;
use shellexpand::full;

/// Failures while locating or decoding the configuration file.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The path could not be expanded (unknown variable, missing home).
    Expand { path: PathBuf, context: String },
    /// An explicitly requested file does not exist.
    Missing { path: PathBuf },
    Read { path: PathBuf, context: String },
    Parse { path: PathBuf, context: String },
    Validation(ConfigValidationError),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Expand { path, context } => {
                write!(f, "failed to expand config path {:?}: {}", path, context)
            }
            Self::Missing { path } => write!(f, "config file does not exist: {}", path.display()),
            Self::Read { path, context } => {
                write!(f, "failed to read config at {:?}: {}", path, context)
            }
            Self::Parse { path, context } => {
                write!(f, "failed to parse config at {:?}: {}", path, context)
            }
            Self::Validation(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigValidationError> for ConfigError {
    fn from(err: ConfigValidationError) -> Self {
        Self::Validation(err)
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Missing { .. } => AppError::not_found(err.to_string()),
            ConfigError::Parse { .. } | ConfigError::Validation(_) => {
                AppError::bad_request(err.to_string())
            }
            ConfigError::Expand { .. } | ConfigError::Read { .. } => {
                AppError::internal(err.to_string())
            }
        }
    }
}

/// Resolves the config path and loads it.
///
/// An explicit path must exist. The default path may be absent, in which case
/// its parent directory is created so the file can be watched. Unreadable or
/// invalid content never fails here: defaults are used instead.
pub fn get_config(path: Option<PathBuf>) -> Result<(Config, PathBuf), ConfigError> {
    match path {
        Some(path) => {
            info!("Config path provided {path:?}");
            let expanded = expand_path(&path)?;

            if !expanded.exists() {
                return Err(ConfigError::Missing { path: expanded });
            }

            Ok((load_or_default(&expanded), expanded))
        }
        None => {
            let expanded = expand_path(Path::new(DEFAULT_CONFIG_FILE_PATH))?;

            if let Some(parent) = expanded.parent()
                && !parent.exists()
                && let Err(err) = fs::create_dir_all(parent)
            {
                warn!("Failed to create config directory {parent:?}: {err}");
            }

            Ok((load_or_default(&expanded), expanded))
        }
    }
}

fn expand_path(path: &Path) -> Result<PathBuf, ConfigError> {
    let raw = path.to_string_lossy();
    let expanded = full(&raw).map_err(|err| ConfigError::Expand {
        path: path.to_path_buf(),
        context: err.to_string(),
    })?;

    Ok(PathBuf::from(expanded.into_owned()))
}

/// Reads, decodes and validates the file at `path`.
pub fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path).map_err(|err| ConfigError::Read {
        path: path.to_path_buf(),
        context: err.to_string(),
    })?;

    info!("Decoding config file {path:?}");

    let config: Config = toml::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        context: err.to_string(),
    })?;

    config.validate()?;

    info!("Config file loaded successfully");
    Ok(config)
}

/// [`read_config`], falling back to [`Config::default`] with a warning.
pub fn load_or_default(path: &Path) -> Config {
    read_config(path).unwrap_or_else(|err| {
        warn!("{err}, using default configuration");
        Config::default()
    })
}

use std::{
    fmt::Display,
    fs,
    io,
    path::{Path, PathBuf},
};

pub use dialclock_proto::config::*;

use log::{info, warn};
use shellexpand::full;

pub mod manager;
pub mod watch;

pub use manager::{
    ConfigApplied, ConfigDegradation, ConfigImpact, ConfigManager, ConfigManagerError,
    ConfigUpdateError,
};
pub use watch::{ConfigEvent, subscription};

/// Failures while resolving the configuration location.
#[derive(Debug)]
pub enum ConfigPathError {
    /// Environment or home expansion failed.
    Expand { path: String, context: String },
    /// An explicitly requested file does not exist.
    Missing { path: PathBuf },
    /// The default configuration directory could not be created.
    CreateDir { path: PathBuf, source: io::Error },
}

impl Display for ConfigPathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Expand { path, context } => {
                write!(f, "failed to expand config path {path}: {context}")
            }
            Self::Missing { path } => write!(f, "config file does not exist: {}", path.display()),
            Self::CreateDir { path, source } => {
                write!(f, "failed to create config directory {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigPathError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::CreateDir { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Failures while loading a configuration file.
#[derive(Debug)]
pub enum ConfigReadError {
    Read { path: PathBuf, source: io::Error },
    Parse { path: PathBuf, source: toml::de::Error },
}

impl Display for ConfigReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => write!(f, "failed to read {path:?}: {source}"),
            Self::Parse { path, source } => write!(f, "failed to parse {path:?}: {source}"),
        }
    }
}

impl std::error::Error for ConfigReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}

/// Resolves the configuration path and loads the configuration found there.
///
/// An unreadable, malformed or invalid file falls back to the defaults; only a
/// missing explicitly requested file is an error.
pub fn get_config(path: Option<PathBuf>) -> Result<(Config, PathBuf), ConfigPathError> {
    match path {
        Some(path) => {
            info!("Config path provided {path:?}");
            let expanded = expand_path(&path)?;

            if !expanded.exists() {
                return Err(ConfigPathError::Missing { path: expanded });
            }

            Ok((load_or_default(&expanded), expanded))
        }
        None => {
            let expanded = expand_path(Path::new(DEFAULT_CONFIG_FILE_PATH))?;

            if let Some(parent) = expanded.parent()
                && !parent.exists()
            {
                fs::create_dir_all(parent).map_err(|source| ConfigPathError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }

            Ok((load_or_default(&expanded), expanded))
        }
    }
}

pub fn expand_path(path: &Path) -> Result<PathBuf, ConfigPathError> {
    let str_path = path.to_string_lossy();
    let expanded = full(&str_path).map_err(|err| ConfigPathError::Expand {
        path:    str_path.to_string(),
        context: err.to_string(),
    })?;

    Ok(PathBuf::from(expanded.into_owned()))
}

pub fn read_config(path: &Path) -> Result<Config, ConfigReadError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigReadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    info!("Decoding config file {path:?}");

    toml::from_str(&content).map_err(|source| ConfigReadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn load_or_default(path: &Path) -> Config {
    let config = match read_config(path) {
        Ok(config) => config,
        Err(ConfigReadError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
            info!("No config file at {path:?}, using defaults");
            return Config::default();
        }
        Err(err) => {
            warn!("{err}");
            return Config::default();
        }
    };

    match config.validate() {
        Ok(()) => {
            info!("Config file loaded successfully");
            config
        }
        Err(err) => {
            warn!("Invalid configuration, using defaults: {err}");
            Config::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn explicit_missing_file_is_an_error() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let path = temp_dir.path().join("absent.toml");

        assert!(matches!(get_config(Some(path)), Err(ConfigPathError::Missing { .. })));
    }

    #[test]
    fn explicit_file_is_loaded() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[clock]\ninitial_mode = \"analog\"\n").expect("write config");

        let (config, resolved) = get_config(Some(path.clone())).expect("config loads");

        assert_eq!(resolved, path);
        assert_eq!(config.clock.initial_mode, ClockMode::Analog);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "clock = [").expect("write config");

        let (config, _) = get_config(Some(path)).expect("path resolves");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[clock]\nswipe_threshold = -5.0\n").expect("write config");

        let (config, _) = get_config(Some(path)).expect("path resolves");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn read_errors_carry_the_path() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let path = temp_dir.path().join("config.toml");

        match read_config(&path) {
            Err(ConfigReadError::Read { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn expands_home_directory() {
        let expanded = expand_path(Path::new("~/clock.toml")).expect("expands");
        assert!(!expanded.to_string_lossy().starts_with('~'));
    }
}

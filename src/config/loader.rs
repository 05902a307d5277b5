use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::{MethodOrderConfig, CONFIG_FILE_NAME};
use crate::errors::{Error, Result};

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Pure function to read config file contents
pub(crate) fn read_config_file(path: &Path) -> std::io::Result<String> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Pure function to parse and validate config from TOML string
pub fn parse_and_validate_config(contents: &str) -> Result<MethodOrderConfig> {
    let config = toml::from_str::<MethodOrderConfig>(contents)?;
    config.validate().map_err(Error::configuration)?;
    Ok(config)
}

/// Load and validate one specific config file
pub fn load_config_from(path: &Path) -> Result<MethodOrderConfig> {
    let contents = read_config_file(path)?;
    let config = toml::from_str::<MethodOrderConfig>(&contents)?;
    config
        .validate()
        .map_err(|message| Error::configuration_in(message, path))?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Try one candidate path, logging anything other than a missing file
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<MethodOrderConfig> {
    match load_config_from(config_path) {
        Ok(config) => Some(config),
        Err(Error::Io(e)) => {
            handle_read_error(config_path, &e);
            None
        }
        Err(e) => {
            log::warn!(
                "Ignoring invalid config file {}: {}",
                config_path.display(),
                e
            );
            None
        }
    }
}

/// Handle file read errors with appropriate logging
pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // Only log actual errors, not "file not found"
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// Pure function to generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search `start` and its ancestors for the config file
pub fn find_config_from(start: PathBuf) -> MethodOrderConfig {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            MethodOrderConfig::default()
        })
}

pub fn load_config() -> MethodOrderConfig {
    match std::env::current_dir() {
        Ok(current) => find_config_from(current),
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            MethodOrderConfig::default()
        }
    }
}

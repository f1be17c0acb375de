use std::{env, fs, path::{Path, PathBuf}};

use serde_json::Value;
use tracing::debug;

use super::{error::ConfigError, model::Configuration, schema};

/// Resolves a relative config argument against the current working directory.
pub fn get_config_path_cwd(config_arg: &Path) -> PathBuf {
    if config_arg.is_absolute() {
        return config_arg.to_path_buf();
    }
    match env::current_dir() {
        Ok(cwd) => cwd.join(config_arg),
        Err(_) => config_arg.to_path_buf(),
    }
}

/// Validates an already parsed document and materializes it.
pub fn config_from_value(path: &str, document: Value) -> Result<Configuration, ConfigError> {
    let violations = schema::validate(&document);
    if !violations.is_empty() {
        return Err(ConfigError::Invalid {
            path: path.to_string(),
            violations,
        });
    }

    serde_json::from_value(document).map_err(|source| ConfigError::Malformed {
        path: path.to_string(),
        source,
    })
}

/// Parses and validates configuration text. `origin` names the source in errors.
pub fn config_from_str(origin: &str, content: &str) -> Result<Configuration, ConfigError> {
    let document: Value = serde_json::from_str(content).map_err(|source| ConfigError::Malformed {
        path: origin.to_string(),
        source,
    })?;
    config_from_value(origin, document)
}

/// Reads, parses and validates the configuration file at `path`.
pub fn load_config(path: &Path) -> Result<Configuration, ConfigError> {
    let origin = path.display().to_string();
    let file_content = fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
        path: origin.clone(),
        source,
    })?;

    let config = config_from_str(&origin, &file_content)?;
    debug!(
        path = %origin,
        handlers = config.handlers.len(),
        "Configuration loaded"
    );
    Ok(config)
}

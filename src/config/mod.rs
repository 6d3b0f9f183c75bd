//! Configuration Management
//!
//! This module loads the database credentials the Connection Manager needs:
//! server host, database name, user and password (plus an optional port).
//!
//! # Configuration Locations
//! - Local: `./config.json` (per-project, next to the binary's working dir)
//! - Global: `~/.config/catequesis/config.json` (per-user)
//!
//! # Resolution Precedence
//! 1. Explicit `--config` path (highest priority)
//! 2. Local `./config.json`
//! 3. Global `~/.config/catequesis/config.json`
//!
//! The file is read exactly once at startup; there is no hot-reload.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CatequesisError, Result};

const CONFIG_FILE: &str = "config.json";

/// Database connection credentials
///
/// WARNING: `password` is sensitive; it is never logged and never included
/// in error messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DbConfig {
    /// Server hostname
    pub server: String,

    /// Database (schema) name
    pub database: String,

    /// Username
    pub user: String,

    /// Password
    pub password: String,

    /// Server port, defaults to the MySQL port when the file omits it
    #[serde(default = "default_port")]
    pub port: u16,
}

const fn default_port() -> u16 {
    3306
}

/// Get the path of the local config file (`./config.json`)
pub fn local_config_path() -> Result<PathBuf> {
    let current_dir = std::env::current_dir().map_err(|e| {
        CatequesisError::config(format!("could not determine current directory: {e}"))
    })?;

    Ok(current_dir.join(CONFIG_FILE))
}

/// Get the path of the global config file (`~/.config/catequesis/config.json`)
pub fn global_config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| CatequesisError::config("could not determine user config directory"))?;

    Ok(config_dir.join("catequesis").join(CONFIG_FILE))
}

/// Load credentials from a specific file
pub fn load(path: &Path) -> Result<DbConfig> {
    let contents = fs::read_to_string(path).map_err(|e| {
        CatequesisError::config(format!("could not read config file '{}': {e}", path.display()))
    })?;

    serde_json::from_str::<DbConfig>(&contents).map_err(|e| {
        CatequesisError::config(format!("invalid config file '{}': {e}", path.display()))
    })
}

/// Resolve credentials with precedence: explicit path, local file, global file
///
/// Errors if an explicit path is given but unreadable, or if neither the
/// local nor the global file exists.
pub fn resolve(explicit: Option<&Path>) -> Result<DbConfig> {
    if let Some(path) = explicit {
        return load(path);
    }

    let local = local_config_path()?;
    if local.exists() {
        return load(&local);
    }

    let global = global_config_path()?;
    if global.exists() {
        return load(&global);
    }

    Err(CatequesisError::config(format!(
        "no config file found; create '{}' or '{}'",
        local.display(),
        global.display()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_config(contents: &str) -> PathBuf {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
        let path = std::env::temp_dir().join(format!("catequesis_config_{nanos}.json"));
        fs::write(&path, contents).expect("failed to write temp config");
        path
    }

    #[test]
    fn test_load_full_config() {
        let path = temp_config(
            r#"{"server": "db.parroquia.ec", "database": "academico",
                "user": "catequista", "password": "secreto", "port": 3307}"#,
        );

        let config = load(&path).unwrap();
        assert_eq!(config.server, "db.parroquia.ec");
        assert_eq!(config.database, "academico");
        assert_eq!(config.user, "catequista");
        assert_eq!(config.password, "secreto");
        assert_eq!(config.port, 3307);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_load_defaults_port() {
        let path = temp_config(
            r#"{"server": "localhost", "database": "academico",
                "user": "root", "password": ""}"#,
        );

        let config = load(&path).unwrap();
        assert_eq!(config.port, 3306);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_load_missing_file() {
        let result = load(Path::new("/nonexistent/config.json"));
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_load_invalid_json() {
        let path = temp_config("{not json");

        let result = load(&path);
        assert!(result.is_err());
        assert!(result.unwrap_err().message().contains("invalid config file"));

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_load_missing_field() {
        let path = temp_config(r#"{"server": "localhost"}"#);

        let result = load(&path);
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().error_code(), "CONFIG_ERROR");

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_resolve_explicit_path_wins() {
        let path = temp_config(
            r#"{"server": "explicit", "database": "academico",
                "user": "u", "password": "p"}"#,
        );

        let config = resolve(Some(path.as_path())).unwrap();
        assert_eq!(config.server, "explicit");

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_resolve_explicit_missing_is_error() {
        let result = resolve(Some(Path::new("/nonexistent/config.json")));
        assert!(result.is_err());
    }
}

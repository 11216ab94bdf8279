//! Configuration loading for notelink.
//!
//! A single TOML file (`notelink.toml`, by default at the vault root or
//! the current directory) with the vault root, folder exclusions, and
//! logging level. Absence of a config file is fine: everything has a
//! default.

use std::path::{Path, PathBuf};
use std::{env, fs};

use serde::Deserialize;
use thiserror::Error;

/// Default config file name, looked up in the current directory.
pub const CONFIG_FILE: &str = "notelink.toml";

const CONFIG_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found at {0}")]
    NotFound(String),

    #[error("failed to read config file {0}: {1}")]
    ReadError(String, #[source] std::io::Error),

    #[error("failed to parse TOML in {0}: {1}")]
    ParseError(String, #[source] toml::de::Error),

    #[error("version {0} is unsupported (expected {CONFIG_VERSION})")]
    BadVersion(u32),
}

/// On-disk config shape.
#[derive(Debug, Deserialize)]
struct ConfigFileData {
    #[serde(default = "default_version")]
    version: u32,
    vault_root: Option<PathBuf>,
    #[serde(default)]
    excluded_folders: Vec<PathBuf>,
    #[serde(default)]
    logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level() }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

/// Resolved configuration with all defaults applied.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Root of the note folder to index.
    pub vault_root: PathBuf,
    /// Folders (relative to the root) the index never looks into.
    pub excluded_folders: Vec<PathBuf>,
    pub logging: LoggingConfig,
}

impl ResolvedConfig {
    fn defaults() -> Self {
        Self {
            vault_root: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            excluded_folders: Vec::new(),
            logging: LoggingConfig::default(),
        }
    }
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration.
    ///
    /// An explicit `config_path` must exist; otherwise `notelink.toml` in
    /// the current directory is used when present, and built-in defaults
    /// when not. `vault_override` wins over whatever the file says.
    pub fn load(
        config_path: Option<&Path>,
        vault_override: Option<&Path>,
    ) -> Result<ResolvedConfig, ConfigError> {
        let mut resolved = match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path.display().to_string()));
                }
                Self::load_file(path)?
            }
            None => {
                let default = PathBuf::from(CONFIG_FILE);
                if default.exists() {
                    Self::load_file(&default)?
                } else {
                    ResolvedConfig::defaults()
                }
            }
        };

        if let Some(vault) = vault_override {
            resolved.vault_root = vault.to_path_buf();
        }
        Ok(resolved)
    }

    fn load_file(path: &Path) -> Result<ResolvedConfig, ConfigError> {
        let s = fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.display().to_string(), e))?;

        let data: ConfigFileData = toml::from_str(&s)
            .map_err(|e| ConfigError::ParseError(path.display().to_string(), e))?;

        if data.version != CONFIG_VERSION {
            return Err(ConfigError::BadVersion(data.version));
        }

        let defaults = ResolvedConfig::defaults();
        Ok(ResolvedConfig {
            vault_root: data.vault_root.unwrap_or(defaults.vault_root),
            excluded_folders: data.excluded_folders,
            logging: data.logging,
        })
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_load_full_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notelink.toml");
        fs::write(
            &path,
            r#"
version = 1
vault_root = "/tmp/notes"
excluded_folders = ["templates", "archive/old"]

[logging]
level = "debug"
"#,
        )
        .unwrap();

        let cfg = ConfigLoader::load(Some(&path), None).unwrap();
        assert_eq!(cfg.vault_root, PathBuf::from("/tmp/notes"));
        assert_eq!(cfg.excluded_folders.len(), 2);
        assert_eq!(cfg.logging.level, "debug");
    }

    #[test]
    fn test_vault_override_wins() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notelink.toml");
        fs::write(&path, "vault_root = \"/tmp/from-file\"\n").unwrap();

        let cfg =
            ConfigLoader::load(Some(&path), Some(Path::new("/tmp/override"))).unwrap();
        assert_eq!(cfg.vault_root, PathBuf::from("/tmp/override"));
    }

    #[test]
    fn test_missing_explicit_config_errors() {
        let result = ConfigLoader::load(Some(Path::new("/nonexistent/notelink.toml")), None);
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_bad_version_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notelink.toml");
        fs::write(&path, "version = 99\n").unwrap();

        let result = ConfigLoader::load(Some(&path), None);
        assert!(matches!(result, Err(ConfigError::BadVersion(99))));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notelink.toml");
        fs::write(&path, "").unwrap();

        let cfg = ConfigLoader::load(Some(&path), None).unwrap();
        assert!(cfg.excluded_folders.is_empty());
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn test_malformed_toml_errors() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notelink.toml");
        fs::write(&path, "vault_root = [not toml").unwrap();

        let result = ConfigLoader::load(Some(&path), None);
        assert!(matches!(result, Err(ConfigError::ParseError(_, _))));
    }
}

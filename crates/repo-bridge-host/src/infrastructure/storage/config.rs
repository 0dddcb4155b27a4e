//! TOML-based configuration for the host binary.
//!
//! Example file:
//!
//! ```toml
//! [bridge]
//! channel = "repo_bridge/channel"
//! select_method = "select"
//! dismiss_method = "dismiss"
//!
//! [logging]
//! level = "info"
//! ```
//!
//! Every field has a serde default, so an empty file, a partial file, or no
//! file at all yields a working configuration.

use std::path::{Path, PathBuf};

use repo_bridge_core::protocol::messages::{DEFAULT_CHANNEL_NAME, METHOD_DISMISS, METHOD_SELECT};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::dispatch::MethodRoutes;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialized to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A method name was blank or the two routes collide.
    #[error("invalid bridge routes: {0}")]
    InvalidRoutes(String),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level host configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HostConfig {
    #[serde(default)]
    pub bridge: BridgeSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

/// Channel and method-name settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BridgeSection {
    /// Name of the fixed channel the module invokes methods on.
    ///
    /// The stdio transport carries exactly one channel, so this is a label
    /// for logs only.  Nothing is routed by it.
    #[serde(default = "default_channel")]
    pub channel: String,
    /// Method name routed to `select`.
    #[serde(default = "default_select_method")]
    pub select_method: String,
    /// Method name routed to `dismiss`.
    #[serde(default = "default_dismiss_method")]
    pub dismiss_method: String,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingSection {
    /// `tracing` filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_channel() -> String {
    DEFAULT_CHANNEL_NAME.to_string()
}
fn default_select_method() -> String {
    METHOD_SELECT.to_string()
}
fn default_dismiss_method() -> String {
    METHOD_DISMISS.to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for BridgeSection {
    fn default() -> Self {
        Self {
            channel: default_channel(),
            select_method: default_select_method(),
            dismiss_method: default_dismiss_method(),
        }
    }
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl BridgeSection {
    /// Validated dispatcher routes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRoutes`] if a method name is blank or
    /// both routes use the same name.
    pub fn routes(&self) -> Result<MethodRoutes, ConfigError> {
        let select = self.select_method.trim();
        let dismiss = self.dismiss_method.trim();
        if select.is_empty() || dismiss.is_empty() {
            return Err(ConfigError::InvalidRoutes(
                "method names must not be empty".to_string(),
            ));
        }
        if select == dismiss {
            return Err(ConfigError::InvalidRoutes(format!(
                "select and dismiss both use `{select}`"
            )));
        }
        Ok(MethodRoutes {
            select: select.to_string(),
            dismiss: dismiss.to_string(),
        })
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Loads `HostConfig` from `path`, returning defaults if the file does not
/// exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config(path: &Path) -> Result<HostConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HostConfig::default()),
        Err(source) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Persists `config` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system failures or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_config(path: &Path, config: &HostConfig) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("repo-bridge-test-{}-{name}", std::process::id()))
            .join("config.toml")
    }

    #[test]
    fn test_default_config_uses_standard_method_names() {
        let cfg = HostConfig::default();
        assert_eq!(cfg.bridge.select_method, "select");
        assert_eq!(cfg.bridge.dismiss_method, "dismiss");
        assert_eq!(cfg.bridge.channel, "repo_bridge/channel");
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn test_empty_toml_yields_defaults() {
        let cfg: HostConfig = toml::from_str("").expect("empty TOML must parse");
        assert_eq!(cfg, HostConfig::default());
    }

    #[test]
    fn test_partial_toml_fills_missing_fields() {
        // Arrange
        let text = "[bridge]\nselect_method = \"selectRepository\"\n";

        // Act
        let cfg: HostConfig = toml::from_str(text).unwrap();

        // Assert
        assert_eq!(cfg.bridge.select_method, "selectRepository");
        assert_eq!(cfg.bridge.dismiss_method, "dismiss");
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn test_malformed_toml_is_a_parse_error() {
        let path = temp_path("malformed");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "[bridge\nchannel = ").unwrap();

        let result = load_config(&path);

        assert!(matches!(result, Err(ConfigError::Parse(_))));
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let path = temp_path("missing");
        assert_eq!(load_config(&path).unwrap(), HostConfig::default());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        // Arrange
        let path = temp_path("roundtrip");
        let mut cfg = HostConfig::default();
        cfg.bridge.channel = "custom/channel".to_string();
        cfg.logging.level = "debug".to_string();

        // Act
        save_config(&path, &cfg).expect("save must succeed");
        let loaded = load_config(&path).expect("load must succeed");

        // Assert
        assert_eq!(loaded, cfg);
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_routes_are_trimmed() {
        let section = BridgeSection {
            select_method: "  pick ".to_string(),
            ..BridgeSection::default()
        };
        let routes = section.routes().unwrap();
        assert_eq!(routes.select, "pick");
        assert_eq!(routes.dismiss, "dismiss");
    }

    #[test]
    fn test_blank_route_is_rejected() {
        let section = BridgeSection {
            dismiss_method: " ".to_string(),
            ..BridgeSection::default()
        };
        assert!(matches!(section.routes(), Err(ConfigError::InvalidRoutes(_))));
    }

    #[test]
    fn test_colliding_routes_are_rejected() {
        let section = BridgeSection {
            select_method: "go".to_string(),
            dismiss_method: "go".to_string(),
            ..BridgeSection::default()
        };
        assert!(matches!(section.routes(), Err(ConfigError::InvalidRoutes(_))));
    }
}

//! Policy configuration loading.

use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "SAFEKUBECTL_CONFIG";

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// How dangerous operations are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Always ask before running a dangerous operation.
    #[default]
    Confirm,
    /// Print the warning and carry on, unless a protected scope is involved.
    WarnOnly,
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub mode: Mode,
    /// Operations that trigger a warning.
    pub dangerous_operations: Vec<String>,
    /// Namespaces that always require confirmation.
    pub protected_namespaces: Vec<String>,
    /// Clusters (context names) that always require confirmation.
    pub protected_clusters: Vec<String>,
    pub audit: AuditConfig,
}

/// Audit logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    pub enabled: bool,
    pub path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: Mode::Confirm,
            dangerous_operations: [
                "delete", "apply", "patch", "edit", "update", "rollout", "drain", "exec",
                "cordon", "taint",
            ]
            .map(String::from)
            .to_vec(),
            protected_namespaces: vec!["kube-system".to_string()],
            protected_clusters: vec![],
            audit: AuditConfig::default(),
        }
    }
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: home_dir().join(".safekubectl").join("audit.log"),
        }
    }
}

impl Config {
    /// Load configuration from [`CONFIG_ENV`] or `~/.safekubectl/config.yaml`.
    ///
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();
        tracing::debug!(path = %path.display(), "loading config");
        Self::load_from(&path)
    }

    /// Load configuration from `path`, overlaying it onto the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        Self::from_yaml(&content).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse a YAML document, overlaying it onto the defaults.
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document is valid and means "all defaults".
        let mut config: Config = serde_yaml::from_str::<Option<Config>>(content)?.unwrap_or_default();
        config.audit.path = expand_home(&config.audit.path);
        Ok(config)
    }

    fn config_path() -> PathBuf {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return PathBuf::from(path);
        }
        home_dir().join(".safekubectl").join("config.yaml")
    }
}

/// The queries the danger evaluator makes against a policy.
pub trait Policy {
    fn mode(&self) -> Mode;
    fn is_dangerous_operation(&self, operation: &str) -> bool;
    fn is_protected_namespace(&self, namespace: &str) -> bool;
    fn is_protected_cluster(&self, cluster: &str) -> bool;

    /// Confirm mode, or either scope is protected.
    fn requires_confirmation(&self, namespace: &str, cluster: &str) -> bool {
        self.mode() == Mode::Confirm
            || self.is_protected_namespace(namespace)
            || self.is_protected_cluster(cluster)
    }
}

impl Policy for Config {
    fn mode(&self) -> Mode {
        self.mode
    }

    fn is_dangerous_operation(&self, operation: &str) -> bool {
        self.dangerous_operations.iter().any(|op| op == operation)
    }

    fn is_protected_namespace(&self, namespace: &str) -> bool {
        self.protected_namespaces.iter().any(|ns| ns == namespace)
    }

    fn is_protected_cluster(&self, cluster: &str) -> bool {
        self.protected_clusters.iter().any(|c| c == cluster)
    }
}

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_default()
}

/// Expand a leading `~` to the home directory.
fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}

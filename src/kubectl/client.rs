//! Running the real kubectl binary.

use std::io;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use thiserror::Error;

/// Cluster name reported when the current context cannot be determined.
pub const UNKNOWN_CLUSTER: &str = "<unknown>";

/// Environment variable naming the kubectl binary to wrap.
pub const KUBECTL_ENV: &str = "SAFEKUBECTL_KUBECTL";

/// Errors from executing kubectl.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("kubectl not found in PATH")]
    NotFound,

    #[error("failed to run kubectl: {0}")]
    Spawn(#[source] io::Error),
}

/// The wrapped CLI: cluster queries plus the execution delegate.
pub trait Kubectl {
    /// Name of the current context, or [`UNKNOWN_CLUSTER`].
    fn current_cluster(&self) -> String;

    /// Default namespace of `context` (the current one when `None`), or an
    /// empty string if it has none or cannot be read.
    fn context_namespace(&self, context: Option<&str>) -> String;

    /// Run kubectl with `args` and return its exit code.
    fn execute(&self, args: &[String]) -> Result<i32, ExecError>;
}

/// kubectl as found on `PATH`, or at [`KUBECTL_ENV`].
#[derive(Debug, Clone)]
pub struct SystemKubectl {
    binary: PathBuf,
}

impl SystemKubectl {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn from_env() -> Self {
        let binary = std::env::var_os(KUBECTL_ENV).unwrap_or_else(|| "kubectl".into());
        Self::new(binary)
    }

    /// Run a read-only kubectl query and return its trimmed stdout.
    fn query(&self, args: &[&str]) -> Option<String> {
        let output = Command::new(&self.binary)
            .args(args)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .ok()?;
        if !output.status.success() {
            tracing::debug!(?args, status = %output.status, "kubectl query failed");
            return None;
        }
        Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl Kubectl for SystemKubectl {
    fn current_cluster(&self) -> String {
        self.query(&["config", "current-context"])
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| UNKNOWN_CLUSTER.to_string())
    }

    fn context_namespace(&self, context: Option<&str>) -> String {
        let mut args = vec![
            "config",
            "view",
            "--minify",
            "-o",
            "jsonpath={.contexts[0].context.namespace}",
        ];
        if let Some(context) = context {
            args.extend(["--context", context]);
        }
        self.query(&args).unwrap_or_default()
    }

    fn execute(&self, args: &[String]) -> Result<i32, ExecError> {
        let status = Command::new(&self.binary)
            .args(args)
            .status()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => ExecError::NotFound,
                _ => ExecError::Spawn(e),
            })?;
        // Killed by a signal: no code to relay.
        Ok(status.code().unwrap_or(1))
    }
}

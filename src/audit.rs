//! Audit logging of dangerous operations.

use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use crate::output::redact_secrets;
use crate::verdict::{ResourceVerdict, Verdict};

/// What the audited command targeted.
#[derive(Debug, Clone)]
pub enum Target {
    /// A command with its resource on the command line.
    Command {
        resource: String,
        namespace: String,
    },
    /// A command whose resources came from manifests, as `Kind/name@namespace`.
    Manifests(Vec<String>),
}

/// An audit log entry.
#[derive(Debug, Clone)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    /// Whether kubectl was run.
    pub executed: bool,
    /// Whether the user was asked and agreed, or was not asked at all.
    pub confirmed: bool,
    pub operation: String,
    pub cluster: String,
    pub target: Target,
    /// The kubectl arguments with secrets redacted.
    pub command: String,
}

impl AuditEntry {
    /// Create an entry for a single-command verdict.
    pub fn new(verdict: &Verdict, args: &[String], confirmed: bool, executed: bool) -> Self {
        Self {
            timestamp: Utc::now(),
            executed,
            confirmed,
            operation: verdict.operation.clone(),
            cluster: verdict.cluster.clone(),
            target: Target::Command {
                resource: verdict.resource.clone(),
                namespace: verdict.namespace.clone(),
            },
            command: redact_secrets(&args.join(" ")),
        }
    }

    /// Create an entry for a manifest-driven verdict.
    pub fn for_resources(
        verdict: &ResourceVerdict,
        args: &[String],
        confirmed: bool,
        executed: bool,
    ) -> Self {
        let resources = verdict
            .resources
            .iter()
            .map(|r| format!("{}/{}@{}", r.kind, r.name, r.namespace_or_default()))
            .collect();
        Self {
            timestamp: Utc::now(),
            executed,
            confirmed,
            operation: verdict.operation.clone(),
            cluster: verdict.cluster.clone(),
            target: Target::Manifests(resources),
            command: redact_secrets(&args.join(" ")),
        }
    }
}

impl fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.executed { "EXECUTED" } else { "DENIED" };
        write!(
            f,
            "[{}] {} | operation={}",
            self.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
            status,
            self.operation,
        )?;
        match &self.target {
            Target::Command {
                resource,
                namespace,
            } => write!(
                f,
                " resource={resource} namespace={namespace} cluster={}",
                self.cluster
            )?,
            Target::Manifests(resources) => write!(
                f,
                " cluster={} resources=[{}]",
                self.cluster,
                resources.join(",")
            )?,
        }
        write!(
            f,
            " confirmed={} command=\"{}\"",
            self.confirmed,
            // One entry per line.
            self.command.replace('\n', " ")
        )
    }
}

/// Audit logger for appending entries to a file.
pub struct AuditLogger {
    file: File,
}

impl AuditLogger {
    /// Open or create an audit log file, creating its directory if needed.
    pub fn open(path: &Path) -> io::Result<Self> {
        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { file })
    }

    /// Write an audit entry to the log.
    pub fn log(&mut self, entry: &AuditEntry) -> io::Result<()> {
        writeln!(self.file, "{entry}")?;
        self.file.flush()
    }
}

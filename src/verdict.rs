//! Verdict types produced by danger analysis.

use std::fmt;

use crate::manifest::Resource;

/// Why a command was flagged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reason {
    DangerousOperation(String),
    AllNamespaces,
    ProtectedNamespace(String),
    ProtectedCluster(String),
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reason::DangerousOperation(op) => write!(f, "dangerous operation: {op}"),
            Reason::AllNamespaces => f.write_str("AFFECTS ALL NAMESPACES (-A/--all-namespaces)"),
            Reason::ProtectedNamespace(ns) => write!(f, "protected namespace: {ns}"),
            Reason::ProtectedCluster(cluster) => write!(f, "protected cluster: {cluster}"),
        }
    }
}

/// The result of analyzing a single kubectl command.
#[derive(Debug, Clone, Default)]
pub struct Verdict {
    pub is_dangerous: bool,
    pub requires_confirmation: bool,
    /// The operation addresses nodes and has no namespace.
    pub is_node_scoped: bool,
    pub is_all_namespaces: bool,
    pub is_dry_run: bool,
    pub operation: String,
    /// Display form of the target, e.g. `pod/nginx`.
    pub resource: String,
    /// Display form of the namespace; `default` when none was given.
    pub namespace: String,
    pub cluster: String,
    /// In the order they were found.
    pub reasons: Vec<Reason>,
}

/// The result of analyzing a command whose targets come from manifests.
#[derive(Debug, Clone, Default)]
pub struct ResourceVerdict {
    pub is_dangerous: bool,
    pub requires_confirmation: bool,
    pub operation: String,
    pub cluster: String,
    pub resources: Vec<Resource>,
    pub reasons: Vec<Reason>,
}

impl Verdict {
    /// Check if the user has to answer a prompt.
    pub fn blocks(&self) -> bool {
        self.is_dangerous && self.requires_confirmation
    }
}

impl ResourceVerdict {
    /// Check if the user has to answer a prompt.
    pub fn blocks(&self) -> bool {
        self.is_dangerous && self.requires_confirmation
    }
}

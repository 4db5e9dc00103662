//! Danger analysis of a single parsed command.

use crate::config::Policy;
use crate::kubectl::ParsedCommand;
use crate::verdict::{Reason, Verdict};

/// Analyze a parsed kubectl command against `policy`.
///
/// `cluster` is the context the command will run against.
pub fn evaluate(cmd: &ParsedCommand, cluster: &str, policy: &impl Policy) -> Verdict {
    let namespace = cmd.namespace_display();
    let is_node_scoped = cmd.is_node_scoped();

    let mut verdict = Verdict {
        operation: cmd.operation.clone(),
        resource: cmd.resource_display(),
        namespace: namespace.to_string(),
        cluster: cluster.to_string(),
        is_node_scoped,
        is_all_namespaces: cmd.all_namespaces,
        is_dry_run: cmd.dry_run,
        ..Default::default()
    };

    // Dry runs have no side effects.
    if cmd.dry_run {
        return verdict;
    }

    // Safe operations pass silently, even in protected scopes.
    if !policy.is_dangerous_operation(&cmd.operation) {
        return verdict;
    }

    verdict.is_dangerous = true;
    verdict
        .reasons
        .push(Reason::DangerousOperation(cmd.operation.clone()));

    if cmd.all_namespaces {
        verdict.reasons.push(Reason::AllNamespaces);
        verdict.requires_confirmation = true;
    }

    // Node operations have no namespace even if `-n` was passed.
    if !cmd.all_namespaces && !is_node_scoped && policy.is_protected_namespace(namespace) {
        verdict
            .reasons
            .push(Reason::ProtectedNamespace(namespace.to_string()));
    }
    if policy.is_protected_cluster(cluster) {
        verdict
            .reasons
            .push(Reason::ProtectedCluster(cluster.to_string()));
    }

    if !verdict.requires_confirmation {
        verdict.requires_confirmation = policy.requires_confirmation(namespace, cluster);
    }

    verdict
}

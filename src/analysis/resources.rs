//! Danger analysis of manifest-driven commands.

use crate::config::{Mode, Policy};
use crate::manifest::Resource;
use crate::verdict::{Reason, ResourceVerdict};

/// Analyze `operation` applied to resources resolved from manifests.
///
/// Protected namespaces are reported once each, in first-seen order.
pub fn evaluate_resources(
    operation: &str,
    resources: &[Resource],
    cluster: &str,
    policy: &impl Policy,
) -> ResourceVerdict {
    let mut verdict = ResourceVerdict {
        operation: operation.to_string(),
        cluster: cluster.to_string(),
        resources: resources.to_vec(),
        ..Default::default()
    };

    if !policy.is_dangerous_operation(operation) {
        return verdict;
    }

    verdict.is_dangerous = true;
    verdict
        .reasons
        .push(Reason::DangerousOperation(operation.to_string()));

    let mut protected: Vec<&str> = Vec::new();
    for resource in resources {
        let namespace = resource.namespace_or_default();
        if policy.is_protected_namespace(namespace) && !protected.contains(&namespace) {
            protected.push(namespace);
        }
    }
    verdict.reasons.extend(
        protected
            .iter()
            .map(|ns| Reason::ProtectedNamespace(ns.to_string())),
    );

    let cluster_protected = policy.is_protected_cluster(cluster);
    if cluster_protected {
        verdict
            .reasons
            .push(Reason::ProtectedCluster(cluster.to_string()));
    }

    verdict.requires_confirmation =
        policy.mode() == Mode::Confirm || !protected.is_empty() || cluster_protected;

    verdict
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn policy(mode: Mode) -> Config {
        Config {
            mode,
            dangerous_operations: vec!["apply".to_string(), "delete".to_string()],
            protected_namespaces: ["a", "b", "istio-system"].map(String::from).to_vec(),
            protected_clusters: vec!["prod".to_string()],
            ..Default::default()
        }
    }

    fn resource(kind: &str, name: &str, namespace: &str) -> Resource {
        Resource {
            kind: kind.to_string(),
            name: name.to_string(),
            namespace: namespace.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_safe_operation() {
        let resources = vec![resource("Deployment", "web", "a")];
        let verdict = evaluate_resources("create", &resources, "prod", &policy(Mode::Confirm));
        assert!(!verdict.is_dangerous);
        assert!(!verdict.requires_confirmation);
        assert!(verdict.reasons.is_empty());
        assert_eq!(verdict.resources.len(), 1);
    }

    #[test]
    fn test_distinct_protected_namespaces() {
        let resources = vec![
            resource("Deployment", "one", "a"),
            resource("Service", "two", "a"),
            resource("ConfigMap", "three", "b"),
        ];
        let verdict = evaluate_resources("apply", &resources, "dev", &policy(Mode::WarnOnly));
        assert_eq!(
            verdict.reasons,
            vec![
                Reason::DangerousOperation("apply".into()),
                Reason::ProtectedNamespace("a".into()),
                Reason::ProtectedNamespace("b".into()),
            ]
        );
        assert!(verdict.requires_confirmation);
    }

    #[test]
    fn test_empty_namespace_is_default() {
        let mut config = policy(Mode::WarnOnly);
        config.protected_namespaces = vec!["default".to_string()];
        let resources = vec![resource("Pod", "p", "")];
        let verdict = evaluate_resources("apply", &resources, "dev", &config);
        assert_eq!(
            verdict.reasons[1],
            Reason::ProtectedNamespace("default".into())
        );
        assert!(verdict.requires_confirmation);
    }

    #[test]
    fn test_warn_only_unprotected() {
        let resources = vec![resource("Pod", "p", "dev")];
        let verdict = evaluate_resources("apply", &resources, "dev", &policy(Mode::WarnOnly));
        assert!(verdict.is_dangerous);
        assert!(!verdict.requires_confirmation);
    }

    #[test]
    fn test_confirm_mode() {
        let resources = vec![resource("Pod", "p", "dev")];
        let verdict = evaluate_resources("delete", &resources, "dev", &policy(Mode::Confirm));
        assert!(verdict.requires_confirmation);
        assert_eq!(verdict.reasons.len(), 1);
    }

    #[test]
    fn test_protected_cluster_last() {
        let resources = vec![resource("Deployment", "nginx", "istio-system")];
        let verdict = evaluate_resources("apply", &resources, "prod", &policy(Mode::WarnOnly));
        assert_eq!(
            verdict.reasons,
            vec![
                Reason::DangerousOperation("apply".into()),
                Reason::ProtectedNamespace("istio-system".into()),
                Reason::ProtectedCluster("prod".into()),
            ]
        );
        assert!(verdict.requires_confirmation);
    }

    #[test]
    fn test_no_resources() {
        let verdict = evaluate_resources("apply", &[], "dev", &policy(Mode::WarnOnly));
        assert!(verdict.is_dangerous);
        assert!(!verdict.requires_confirmation);
    }
}

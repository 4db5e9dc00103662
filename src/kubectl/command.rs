//! Structured view of one kubectl invocation.

/// A kubectl invocation reduced to what danger assessment needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCommand {
    /// Primary verb, e.g. `delete`. Empty when none was found.
    pub operation: String,
    /// Resource kind, e.g. `pod`. Empty when not determinable.
    pub resource_kind: String,
    /// Resource name. Only ever set together with `resource_kind`.
    pub resource_name: String,
    /// Value of `-n`/`--namespace`; `None` when the flag was absent.
    pub namespace: Option<String>,
    /// Value of `--context`; `None` means the current context.
    pub context: Option<String>,
    /// Manifest paths, directories or URLs from `-f`/`--filename`.
    pub file_inputs: Vec<String>,
    pub recursive: bool,
    pub all_namespaces: bool,
    /// The operation addresses nodes rather than namespaced resources.
    pub node_scoped: bool,
    pub dry_run: bool,
    /// The original tokens, verbatim.
    pub raw_args: Vec<String>,
}

impl ParsedCommand {
    /// `kind/name`, `kind`, or `<unknown>` when no kind was given.
    pub fn resource_display(&self) -> String {
        if self.resource_kind.is_empty() {
            return "<unknown>".to_string();
        }
        if self.resource_name.is_empty() {
            self.resource_kind.clone()
        } else {
            format!("{}/{}", self.resource_kind, self.resource_name)
        }
    }

    /// The namespace, with `default` standing in for an absent flag.
    pub fn namespace_display(&self) -> &str {
        self.namespace.as_deref().unwrap_or("default")
    }

    pub fn is_node_scoped(&self) -> bool {
        self.node_scoped
    }

    /// Record a positional token as kind, then name.
    pub(super) fn push_positional(&mut self, arg: &str) {
        if self.resource_kind.is_empty() {
            match arg.split_once('/') {
                Some(("", _)) => {}
                Some((kind, name)) => {
                    self.resource_kind = kind.to_string();
                    self.resource_name = name.to_string();
                }
                None => self.resource_kind = arg.to_string(),
            }
        } else if self.resource_name.is_empty() {
            self.resource_name = arg.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_display() {
        let mut cmd = ParsedCommand::default();
        assert_eq!(cmd.resource_display(), "<unknown>");

        cmd.resource_kind = "pod".to_string();
        assert_eq!(cmd.resource_display(), "pod");

        cmd.resource_name = "nginx".to_string();
        assert_eq!(cmd.resource_display(), "pod/nginx");
    }

    #[test]
    fn test_namespace_display() {
        let mut cmd = ParsedCommand::default();
        assert_eq!(cmd.namespace_display(), "default");

        cmd.namespace = Some("production".to_string());
        assert_eq!(cmd.namespace_display(), "production");
    }

    #[test]
    fn test_node_scoped() {
        for op in ["cordon", "uncordon", "drain", "taint"] {
            let cmd = crate::kubectl::parse(&[op.to_string(), "node-1".to_string()]);
            assert!(cmd.is_node_scoped(), "{op}");
        }
        let cmd = crate::kubectl::parse(&["delete".to_string(), "pod".to_string()]);
        assert!(!cmd.is_node_scoped());
        assert!(!ParsedCommand::default().is_node_scoped());
    }

    #[test]
    fn test_positional_slash_without_kind_is_ignored() {
        let mut cmd = ParsedCommand::default();
        cmd.push_positional("/nginx");
        assert!(cmd.resource_kind.is_empty());
        assert!(cmd.resource_name.is_empty());

        cmd.push_positional("pod");
        assert_eq!(cmd.resource_kind, "pod");
    }

    #[test]
    fn test_positional_trailing_slash_leaves_name_open() {
        let mut cmd = ParsedCommand::default();
        cmd.push_positional("pod/");
        cmd.push_positional("nginx");
        assert_eq!(cmd.resource_display(), "pod/nginx");
    }
}

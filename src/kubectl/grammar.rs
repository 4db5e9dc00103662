//! Static lookup tables describing the parts of kubectl's argument grammar
//! that matter for danger assessment.

/// The fixed tables the parser consults.
///
/// [`Grammar::KUBECTL`] is the table set used in production. Tests may build
/// their own to exercise the parser against alternate grammars.
#[derive(Debug, Clone, Copy)]
pub struct Grammar {
    /// Flags that consume the following token as their value.
    pub value_flags: &'static [&'static str],
    /// Operations that address whole nodes and have no namespace.
    pub node_scoped_operations: &'static [&'static str],
    /// Operations where `-f`/`--filename` names a manifest.
    pub file_input_operations: &'static [&'static str],
    /// Operations followed by a secondary verb, with the verbs they accept.
    pub subcommands: &'static [(&'static str, &'static [&'static str])],
}

/// Spellings of the manifest file flag.
pub const FILENAME_FLAGS: &[&str] = &["-f", "--filename"];
/// Spellings of the namespace flag.
pub const NAMESPACE_FLAGS: &[&str] = &["-n", "--namespace"];
/// Spellings of the context flag.
pub const CONTEXT_FLAGS: &[&str] = &["--context"];
/// Spellings of the directory recursion flag.
pub const RECURSIVE_FLAGS: &[&str] = &["-R", "--recursive"];
/// Spellings of the all-namespaces flag.
pub const ALL_NAMESPACES_FLAGS: &[&str] = &["-A", "--all-namespaces"];
/// The dry-run flag. May carry an attached value (`--dry-run=client`).
pub const DRY_RUN_FLAG: &str = "--dry-run";
/// Separator after which every token belongs to the wrapped payload.
pub const PAYLOAD_SEPARATOR: &str = "--";

impl Grammar {
    pub const KUBECTL: Grammar = Grammar {
        value_flags: &[
            "-n",
            "--namespace",
            "-f",
            "--filename",
            "-k",
            "--kustomize",
            "-l",
            "--selector",
            "-o",
            "--output",
            "--context",
            "--cluster",
            "--user",
            "--kubeconfig",
            "-c",
            "--container",
            "--field-selector",
            "--sort-by",
            "--template",
            "-p",
            "--patch",
            "--type",
            "--timeout",
            "--grace-period",
            "--tail",
            "--since",
            "--since-time",
            "--limit-bytes",
            "--address",
            "--image",
            "--replicas",
            "--for",
        ],
        node_scoped_operations: &["cordon", "uncordon", "drain", "taint"],
        // Other operations reuse `-f` for unrelated things (`logs -f` follows).
        file_input_operations: &[
            "apply", "delete", "create", "replace", "patch", "annotate", "label", "scale",
        ],
        subcommands: &[
            (
                "rollout",
                &["restart", "status", "undo", "history", "pause", "resume"],
            ),
            (
                "config",
                &[
                    "view",
                    "use-context",
                    "set-context",
                    "delete-context",
                    "get-contexts",
                    "current-context",
                ],
            ),
            (
                "set",
                &[
                    "image",
                    "env",
                    "resources",
                    "selector",
                    "serviceaccount",
                    "subject",
                ],
            ),
        ],
    };

    /// Whether `flag` consumes the token that follows it.
    ///
    /// A flag written in `flag=value` form is self-contained and never does,
    /// even when the bare flag is in the value table.
    pub fn takes_separate_value(&self, flag: &str) -> bool {
        !flag.contains('=') && self.value_flags.contains(&flag)
    }

    pub fn is_node_scoped(&self, operation: &str) -> bool {
        self.node_scoped_operations.contains(&operation)
    }

    pub fn uses_file_input(&self, operation: &str) -> bool {
        self.file_input_operations.contains(&operation)
    }

    /// Secondary verbs recognised after `operation`; empty if it has none.
    pub fn subcommands_for(&self, operation: &str) -> &'static [&'static str] {
        self.subcommands
            .iter()
            .find(|(op, _)| *op == operation)
            .map(|(_, subs)| *subs)
            .unwrap_or(&[])
    }
}

/// Value attached to one of `names` in `name=value` form.
pub fn attached_value<'a>(arg: &'a str, names: &[&str]) -> Option<&'a str> {
    names
        .iter()
        .find_map(|name| arg.strip_prefix(name)?.strip_prefix('='))
}

//! kubectl argument parsing.

use super::command::ParsedCommand;
use super::grammar::{
    ALL_NAMESPACES_FLAGS, CONTEXT_FLAGS, DRY_RUN_FLAG, FILENAME_FLAGS, Grammar, NAMESPACE_FLAGS,
    PAYLOAD_SEPARATOR, RECURSIVE_FLAGS, attached_value,
};

/// Parse kubectl arguments with the built-in grammar.
pub fn parse(args: &[String]) -> ParsedCommand {
    Grammar::KUBECTL.parse(args)
}

impl Grammar {
    /// Parse kubectl arguments into a [`ParsedCommand`].
    ///
    /// Never fails: anything unrecognised leaves the corresponding field empty.
    pub fn parse(&self, args: &[String]) -> ParsedCommand {
        let mut cmd = ParsedCommand {
            raw_args: args.to_vec(),
            ..Default::default()
        };

        // The operation decides how `-f` and the token after it are read, so
        // it has to be known before the leading global flags are consumed.
        let operation = self.find_operation(args);
        let collects_files = self.uses_file_input(&operation);
        let subcommands = self.subcommands_for(&operation);

        let mut seen_operation = false;
        let mut i = 0;
        while i < args.len() {
            let arg = args[i].as_str();

            if arg == PAYLOAD_SEPARATOR {
                break;
            }

            if arg.starts_with('-') {
                i += self.consume_flag(&mut cmd, arg, args.get(i + 1), collects_files);
                continue;
            }

            i += 1;
            if !seen_operation {
                seen_operation = true;
                cmd.operation = arg.to_string();
                if args.get(i).is_some_and(|next| subcommands.contains(&next.as_str())) {
                    i += 1;
                }
                continue;
            }

            cmd.push_positional(arg);
        }

        cmd.node_scoped = self.is_node_scoped(&cmd.operation);
        cmd
    }

    /// First non-flag token, skipping the values of flags that take one.
    fn find_operation(&self, args: &[String]) -> String {
        let mut i = 0;
        while i < args.len() {
            let arg = args[i].as_str();
            if arg == PAYLOAD_SEPARATOR {
                break;
            }
            if !arg.starts_with('-') {
                return arg.to_string();
            }
            i += if self.takes_separate_value(arg) && i + 1 < args.len() {
                2
            } else {
                1
            };
        }
        String::new()
    }

    /// Apply one flag to `cmd` and return how many tokens it used.
    fn consume_flag(
        &self,
        cmd: &mut ParsedCommand,
        arg: &str,
        next: Option<&String>,
        collects_files: bool,
    ) -> usize {
        if collects_files {
            if let Some(path) = attached_value(arg, FILENAME_FLAGS) {
                cmd.file_inputs.push(path.to_string());
                return 1;
            }
            if FILENAME_FLAGS.contains(&arg)
                && let Some(path) = next
            {
                cmd.file_inputs.push(path.clone());
                return 2;
            }
        }

        if RECURSIVE_FLAGS.contains(&arg) {
            cmd.recursive = true;
            return 1;
        }

        if ALL_NAMESPACES_FLAGS.contains(&arg) {
            cmd.all_namespaces = true;
            return 1;
        }

        if arg == DRY_RUN_FLAG || attached_value(arg, &[DRY_RUN_FLAG]).is_some() {
            cmd.dry_run = true;
            return 1;
        }

        if let Some(namespace) = attached_value(arg, NAMESPACE_FLAGS) {
            cmd.namespace = non_empty(namespace);
            return 1;
        }
        if NAMESPACE_FLAGS.contains(&arg)
            && let Some(namespace) = next
        {
            cmd.namespace = non_empty(namespace);
            return 2;
        }

        if let Some(context) = attached_value(arg, CONTEXT_FLAGS) {
            cmd.context = non_empty(context);
            return 1;
        }
        if CONTEXT_FLAGS.contains(&arg)
            && let Some(context) = next
        {
            cmd.context = non_empty(context);
            return 2;
        }

        // Never let another flag's value be read as the resource.
        if self.takes_separate_value(arg) && next.is_some() {
            2
        } else {
            1
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

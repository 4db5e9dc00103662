//! The interception loop: parse, resolve, evaluate, prompt, audit, execute.

use std::io::{self, BufRead, Write};
use thiserror::Error;

use crate::analysis::{evaluate, evaluate_resources};
use crate::audit::{AuditEntry, AuditLogger};
use crate::config::Config;
use crate::kubectl::{ExecError, Kubectl, ParsedCommand, parse};
use crate::manifest::{self, ManifestError};
use crate::output;

/// Errors that abort an invocation.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("failed to parse {source_ref}: {source}")]
    Manifest {
        source_ref: String,
        #[source]
        source: ManifestError,
    },

    #[error(transparent)]
    Exec(#[from] ExecError),

    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

/// One invocation of the wrapper.
///
/// Warnings and prompts go to `out`, non-fatal problems to `err`.
pub struct Runner<'a, K: Kubectl> {
    config: &'a Config,
    kubectl: &'a K,
    input: &'a mut dyn BufRead,
    out: &'a mut dyn Write,
    err: &'a mut dyn Write,
}

impl<'a, K: Kubectl> Runner<'a, K> {
    pub fn new(
        config: &'a Config,
        kubectl: &'a K,
        input: &'a mut dyn BufRead,
        out: &'a mut dyn Write,
        err: &'a mut dyn Write,
    ) -> Self {
        Self {
            config,
            kubectl,
            input,
            out,
            err,
        }
    }

    /// Check `args` and run kubectl with them unless the user declines.
    ///
    /// Returns the exit code to leave with: kubectl's, or 0 when aborted.
    pub fn run(&mut self, args: &[String]) -> Result<i32, RunError> {
        if args.is_empty() {
            return Ok(self.kubectl.execute(args)?);
        }

        let cmd = parse(args);
        tracing::debug!(?cmd, "parsed command");

        let cluster = match &cmd.context {
            Some(context) => context.clone(),
            None => self.kubectl.current_cluster(),
        };

        if !cmd.file_inputs.is_empty() && !cmd.dry_run {
            return self.run_with_manifests(&cmd, &cluster);
        }

        let verdict = evaluate(&cmd, &cluster, self.config);
        tracing::debug!(?verdict, "evaluated command");

        if !verdict.is_dangerous {
            return Ok(self.kubectl.execute(args)?);
        }

        output::display_warning(self.out, &verdict, args)?;

        if verdict.blocks() {
            if !output::ask_confirmation(self.input, self.out) {
                output::display_aborted(self.out)?;
                self.audit(AuditEntry::new(&verdict, args, false, false));
                return Ok(0);
            }
        } else {
            output::display_proceeding(self.out)?;
        }

        self.audit(AuditEntry::new(&verdict, args, true, true));
        Ok(self.kubectl.execute(args)?)
    }

    fn run_with_manifests(&mut self, cmd: &ParsedCommand, cluster: &str) -> Result<i32, RunError> {
        let mut resources = self.resolve_manifests(cmd)?;

        let fallback = match &cmd.namespace {
            Some(namespace) => namespace.clone(),
            None => self.kubectl.context_namespace(cmd.context.as_deref()),
        };
        let fallback = if fallback.is_empty() {
            "default".to_string()
        } else {
            fallback
        };
        for resource in &mut resources {
            if resource.namespace.is_empty() {
                resource.namespace = fallback.clone();
            }
        }

        let verdict = evaluate_resources(&cmd.operation, &resources, cluster, self.config);
        tracing::debug!(?verdict, "evaluated manifests");

        let args = &cmd.raw_args;
        if !verdict.is_dangerous {
            return Ok(self.kubectl.execute(args)?);
        }

        output::display_resource_warning(self.out, &verdict, args)?;

        if verdict.blocks() {
            if !output::ask_confirmation(self.input, self.out) {
                output::display_aborted(self.out)?;
                self.audit(AuditEntry::for_resources(&verdict, args, false, false));
                return Ok(0);
            }
        } else {
            output::display_proceeding(self.out)?;
        }

        self.audit(AuditEntry::for_resources(&verdict, args, true, true));
        Ok(self.kubectl.execute(args)?)
    }

    fn resolve_manifests(&mut self, cmd: &ParsedCommand) -> Result<Vec<manifest::Resource>, RunError> {
        let input = &mut *self.input;
        let out = &mut *self.out;
        let mut confirm_remote = |url: &str| {
            output::display_url_warning(out, url).is_ok() && output::ask_confirmation(input, out)
        };

        let mut resources = Vec::new();
        for source in &cmd.file_inputs {
            let found = manifest::resolve(source, cmd.recursive, &mut confirm_remote).map_err(
                |source_err| RunError::Manifest {
                    source_ref: source.clone(),
                    source: source_err,
                },
            )?;
            resources.extend(found);
        }
        Ok(resources)
    }

    /// Append to the audit log if enabled. Failures only warn.
    fn audit(&mut self, entry: AuditEntry) {
        if !self.config.audit.enabled {
            return;
        }
        let result =
            AuditLogger::open(&self.config.audit.path).and_then(|mut logger| logger.log(&entry));
        if let Err(e) = result {
            tracing::debug!(error = %e, path = %self.config.audit.path.display(), "audit write failed");
            // Nothing more to do if stderr is gone too.
            let _ = writeln!(self.err, "warning: failed to write audit log: {e}");
        }
    }
}

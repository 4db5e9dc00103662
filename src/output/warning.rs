//! Terminal rendering of warnings and status messages.

use std::io::{self, Write};

use crate::verdict::{ResourceVerdict, Verdict};

const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";
const WARNING_ICON: &str = "\u{26A0}\u{FE0F} ";

/// Show the danger warning for a single command.
pub fn display_warning(w: &mut dyn Write, verdict: &Verdict, args: &[String]) -> io::Result<()> {
    writeln!(w)?;
    header(w, "DANGEROUS OPERATION DETECTED")?;
    writeln!(w, "├── Operation: {RED}{}{RESET}", verdict.operation)?;
    writeln!(w, "├── Resource:  {}", verdict.resource)?;
    // Node operations have no namespace to show.
    if !verdict.is_node_scoped {
        writeln!(w, "├── Namespace: {}", verdict.namespace)?;
    }
    writeln!(w, "├── Cluster:   {}", verdict.cluster)?;
    writeln!(w, "├── Reasons:")?;
    for reason in &verdict.reasons {
        writeln!(w, "│   • {reason}")?;
    }
    writeln!(w, "└── Command:   kubectl {}", args.join(" "))?;
    writeln!(w)
}

/// Show the danger warning for a manifest-driven command.
pub fn display_resource_warning(
    w: &mut dyn Write,
    verdict: &ResourceVerdict,
    args: &[String],
) -> io::Result<()> {
    writeln!(w)?;
    header(w, "DANGEROUS OPERATION DETECTED")?;
    writeln!(w, "├── Operation: {RED}{}{RESET}", verdict.operation)?;
    writeln!(w, "├── Resources:")?;
    for resource in &verdict.resources {
        writeln!(
            w,
            "│   • {} (namespace: {})",
            resource,
            resource.namespace_or_default()
        )?;
    }
    writeln!(w, "├── Cluster:   {}", verdict.cluster)?;
    writeln!(w, "├── Reasons:")?;
    for reason in &verdict.reasons {
        writeln!(w, "│   • {reason}")?;
    }
    writeln!(w, "└── Command:   kubectl {}", args.join(" "))?;
    writeln!(w)
}

/// Warn that a manifest is about to be downloaded.
pub fn display_url_warning(w: &mut dyn Write, url: &str) -> io::Result<()> {
    writeln!(w)?;
    header(w, "REMOTE MANIFEST")?;
    writeln!(w, "├── URL: {url}")?;
    writeln!(w, "└── The manifest will be downloaded to check what it changes.")?;
    writeln!(w)
}

pub fn display_aborted(w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "Operation aborted.")
}

pub fn display_proceeding(w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "Proceeding with operation...")?;
    writeln!(w)
}

fn header(w: &mut dyn Write, title: &str) -> io::Result<()> {
    writeln!(w, "{YELLOW}{WARNING_ICON} {title}{RESET}")
}

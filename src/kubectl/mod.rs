//! kubectl argument grammar, parsing, and process control.

mod client;
mod command;
mod grammar;
mod parser;

pub use client::{ExecError, KUBECTL_ENV, Kubectl, SystemKubectl, UNKNOWN_CLUSTER};
pub use command::ParsedCommand;
pub use grammar::Grammar;
pub use parser::parse;

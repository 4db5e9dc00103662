//! safekubectl - a guard in front of kubectl.
//!
//! Parses a kubectl invocation, decides whether it is dangerous under the
//! configured policy, asks for confirmation when required and records the
//! outcome in an audit log before handing the arguments to the real kubectl.

pub mod analysis;
pub mod audit;
pub mod config;
pub mod kubectl;
pub mod logging;
pub mod manifest;
pub mod output;
pub mod runner;
pub mod verdict;

pub use analysis::{evaluate, evaluate_resources};
pub use config::{Config, Mode, Policy};
pub use kubectl::{Kubectl, ParsedCommand, SystemKubectl, parse};
pub use runner::{RunError, Runner};
pub use verdict::{Reason, ResourceVerdict, Verdict};

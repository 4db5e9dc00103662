//! Warnings, prompts and redaction of user-facing output.

mod prompt;
mod redaction;
mod warning;

pub use prompt::ask_confirmation;
pub use redaction::redact_secrets;
pub use warning::{
    display_aborted, display_proceeding, display_resource_warning, display_url_warning,
    display_warning,
};

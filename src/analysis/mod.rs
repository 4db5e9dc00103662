//! Danger analysis entry points.

mod command;
mod resources;

pub use command::evaluate;
pub use resources::evaluate_resources;

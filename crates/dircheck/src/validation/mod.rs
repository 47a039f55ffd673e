//! Warning model and the engine that runs checks.

mod check;
mod warning;

pub use check::{Check, CheckEngine, builtin_checks};
pub use warning::{EntityType, Severity, Warning};

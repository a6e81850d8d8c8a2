//! Bootstrap sequence, operator confirmation, and hand-off.
pub mod confirm;
mod startup;

pub use startup::{prepare, run_launch, RuntimeExit};

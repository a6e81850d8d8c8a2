//! Shared library modules providing error types, path helpers, process hand-off, and telemetry initialization.

pub mod errors;
pub mod paths;
pub mod process;
pub mod telemetry;

//! Launch configuration resolution and the bootstrap sequence around it.

pub mod bootstrap;
pub mod config;
pub mod resolve;
pub mod runtime;

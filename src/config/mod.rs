//! Configuration module
//!
//! CLI argument definitions and runtime configuration.

mod settings;

pub use settings::*;

//! Configuration management for the blacklist tool
//!
//! This module handles loading and merging configuration from the config
//! file, the environment and the command line.

pub mod loader;
pub mod settings;

pub use loader::ConfigLoader;
pub use settings::{CliOverrides, EndpointSettings, Settings};

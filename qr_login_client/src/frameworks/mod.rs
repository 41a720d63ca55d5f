// Frameworks layer: CLI, configuration, and runtime bootstrap.

pub mod app;
pub mod cli;
pub mod config;

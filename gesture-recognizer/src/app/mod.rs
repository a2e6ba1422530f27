//! Application Layer
//!
//! The `gesture-rec` command line and its TOML configuration file.

pub mod cli;
pub mod config;

pub use cli::{Cli, Commands, ConfigAction};
pub use config::{Config, FinalizeMode};

//! Command-Line Interface

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Gesture Recognizer - Classify multi-stroke pointer gestures against templates
#[derive(Parser, Debug)]
#[command(name = "gesture-rec")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify a gesture file against the template library
    Classify {
        /// Template file or directory (defaults to the configured path)
        #[arg(short, long)]
        templates: Option<PathBuf>,

        /// Gesture file (JSON list of points)
        #[arg(short, long)]
        gesture: PathBuf,

        /// Gate the result against this expected label
        #[arg(short, long)]
        expected: Option<String>,

        /// Print the N best matches instead of only the winner
        #[arg(long, default_value = "1")]
        top: usize,
    },

    /// Replay an input script through a full session
    Replay {
        /// Template file or directory (defaults to the configured path)
        #[arg(short, long)]
        templates: Option<PathBuf>,

        /// Input script file
        #[arg(short, long)]
        script: PathBuf,

        /// Seed for the gesture queue (overrides config)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Convert a gesture file into a replayable input script
    Script {
        /// Gesture file (JSON list of points)
        #[arg(short, long)]
        gesture: PathBuf,

        /// Output script file
        #[arg(short, long)]
        output: PathBuf,

        /// Release ticks appended after the last stroke
        #[arg(long, default_value = "0")]
        idle_ticks: u32,
    },

    /// List templates
    List {
        /// Template file or directory (defaults to the configured path)
        #[arg(short, long)]
        templates: Option<PathBuf>,
    },

    /// Add a gesture to a template file
    Add {
        /// Gesture file (JSON list of points)
        #[arg(short, long)]
        gesture: PathBuf,

        /// Template name
        #[arg(short, long)]
        name: String,

        /// Template file to append to (created if missing)
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Initialize configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// View configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Get a specific configuration value
    Get {
        /// Configuration key (e.g., "gate.threshold", "capture.region.width")
        key: String,
    },

    /// Print the default config file location
    Path,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

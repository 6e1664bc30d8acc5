//! CLI command definitions and parsing
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "pairfit",
    version,
    about = "Wardrobe matching engine for scanned clothing items",
    long_about = "Pairfit evaluates a scanned clothing item against a wardrobe snapshot: it \
                  scores every owned piece, classifies the overall verdict, assembles outfit \
                  combinations, and prints the resulting render model. Inputs are plain JSON \
                  records as produced by the upstream analysis and persistence layers."
)]
pub struct Cli {
    /// Global config file path (defaults to ~/.config/pairfit/config.toml)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full pipeline: matches, verdict, outfits, render model
    Evaluate {
        /// Path to the scanned-item JSON record
        scan: PathBuf,

        /// Path to the wardrobe snapshot JSON (array of items)
        #[arg(short, long)]
        wardrobe: Option<PathBuf>,

        /// User fit preference
        #[arg(long, value_parser = ["fitted", "relaxed", "no_preference"], default_value = "no_preference")]
        fit: String,

        /// Profile to use (e.g., "strict")
        #[arg(short, long)]
        profile: Option<String>,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Classify the scanned item's verdict only
    Classify {
        /// Path to the scanned-item JSON record
        scan: PathBuf,

        /// User fit preference
        #[arg(long, value_parser = ["fitted", "relaxed", "no_preference"], default_value = "no_preference")]
        fit: String,

        /// Number of items in the wardrobe (the tree needs only the count)
        #[arg(short = 'n', long, default_value = "0")]
        wardrobe_count: usize,
    },

    /// Assemble outfit combinations for one tier floor
    Combos {
        /// Path to the scanned-item JSON record
        scan: PathBuf,

        /// Path to the wardrobe snapshot JSON (array of items)
        #[arg(short, long)]
        wardrobe: PathBuf,

        /// Tier floor for slot filling
        #[arg(long, value_parser = ["high", "medium"], default_value = "high")]
        floor: String,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Validate configuration file
    Validate {
        /// Path to config file (defaults to standard location)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Initialize default configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

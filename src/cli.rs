use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "reelscan")]
#[command(author, version, about = "Movie and TV filename scanner")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse one or more filenames and display the extracted metadata
    Parse {
        /// Filenames to parse
        #[arg(required = true)]
        names: Vec<String>,

        /// Treat the names as DVD/Blu-ray folder images
        #[arg(long)]
        dir: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Walk library folders and parse every video found
    Scan {
        /// Folders or files to scan (uses the configured library paths if empty)
        paths: Vec<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Number of parser threads (defaults to one per CPU)
        #[arg(short = 'j', long)]
        threads: Option<usize>,
    },

    /// List the configured languages and their tokens
    Languages {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "reelposter")]
#[command(author, version, about = "Resolve media filenames to poster artwork")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// TMDB API key (overrides the config file)
    #[arg(long, global = true, env = "TMDB_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve one or more titles to poster URLs
    Resolve {
        /// Raw titles or filenames
        #[arg(required = true)]
        titles: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Show the states visited for each title
        #[arg(long)]
        trace: bool,
    },

    /// Parse a title and display the extracted fields
    Parse {
        /// Raw title or filename
        #[arg(required = true)]
        title: String,

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

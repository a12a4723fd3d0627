use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "yarnboard")]
#[command(about = "Save and load YarnBoard boards", long_about = None)]
#[command(version)]
pub struct Cli {
    /// trace|debug|info|warn|error (defaults to the build mode level)
    #[arg(long, global = true, env = "YARNBOARD_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Directory for rolling log files
    #[arg(long, global = true, env = "YARNBOARD_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Save board JSON read from a file or stdin
    Save {
        /// `yb` for a flat file, `sqlite` for a database file
        #[arg(long, default_value = "yb")]
        format: String,

        /// Board JSON file; stdin when omitted
        #[arg(long)]
        input: Option<PathBuf>,

        /// Destination; asks interactively when omitted
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Load a board and print the response envelope
    Load {
        /// Board file; asks interactively when omitted
        path: Option<PathBuf>,

        /// Print only the stored board JSON
        #[arg(long)]
        json_only: bool,
    },
}

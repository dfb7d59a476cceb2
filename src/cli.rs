//! Command-Line Interface

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Cutpath - rebuild continuous cutting trajectories from DXF drawings
#[derive(Parser, Debug)]
#[command(name = "cutpath")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (.toml or .json)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a drawing into an XY trajectory file
    Convert {
        /// Input DXF drawing
        input: PathBuf,

        /// Output text file (default: <output_directory>/<input stem>.txt)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Endpoint snapping tolerance in drawing units
        #[arg(short, long)]
        tolerance: Option<f64>,

        /// Also write an SVG preview to this path
        #[arg(long)]
        preview: Option<PathBuf>,
    },

    /// Run the pipeline and print statistics only
    Stats {
        /// Input DXF drawing
        input: PathBuf,

        /// Endpoint snapping tolerance in drawing units
        #[arg(short, long)]
        tolerance: Option<f64>,

        /// Print statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

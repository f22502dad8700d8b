pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "bindery")]
#[command(about = "Bind RSS/Atom feeds into a single EPUB", long_about = None)]
pub struct Cli {
    /// Path to the config file (default: ~/.config/bindery/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch all feeds and bind them into an EPUB
    Build {
        /// Feed list file, one URL per line (default: ~/.config/bindery/feeds.txt)
        #[arg(short, long)]
        feeds: Option<PathBuf>,

        /// Output directory for the EPUB (default: [output] dir from config)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List the configured feed sources
    Sources {
        /// Feed list file, one URL per line (default: ~/.config/bindery/feeds.txt)
        #[arg(short, long)]
        feeds: Option<PathBuf>,
    },
}

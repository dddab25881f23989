//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::enums::{ColorMode, LineEndingArg};

/// Decode, inspect and convert BBS-era ANSI art
#[derive(Parser, Debug)]
#[command(name = "ansi-art")]
#[command(version, about = "Decode, inspect and convert BBS-era ANSI art", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Config file path
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Canvas width in columns (overrides SAUCE and config)
    #[arg(long, short, global = true)]
    pub width: Option<usize>,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render to the terminal
    View {
        file: PathBuf,
        /// Colour depth (default from config)
        #[arg(long)]
        color: Option<ColorMode>,
    },
    /// Print plain text without colours
    Text {
        file: PathBuf,
        /// Keep trailing spaces and empty rows
        #[arg(long)]
        preserve_whitespace: bool,
    },
    /// Render to HTML
    Html {
        file: PathBuf,
        /// Output file (default: stdout)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Render to structured JSON
    Json {
        file: PathBuf,
        /// Single-line output
        #[arg(long)]
        compact: bool,
    },
    /// Show SAUCE metadata and dimensions
    Info { file: PathBuf },
    /// Strip window, mode and scroll-region sequences
    Clean {
        file: PathBuf,
        /// Output file (default: <name>_clean.<ext>)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Re-encode to minimal CP437 ANSI
    Convert {
        file: PathBuf,
        /// Output file
        #[arg(long, short)]
        output: PathBuf,
        /// Do not append a SAUCE record
        #[arg(long)]
        no_sauce: bool,
        /// Row separator
        #[arg(long, default_value = "crlf")]
        line_ending: LineEndingArg,
        /// Colour depth (default from config)
        #[arg(long)]
        color: Option<ColorMode>,
        /// Substitute for glyphs with no CP437 byte
        #[arg(long)]
        replacement: Option<char>,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Create default config file
    Init,
}

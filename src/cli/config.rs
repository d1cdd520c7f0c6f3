// CLI configuration
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use tagprobe::ParseOptions;

use crate::cli::output::OutputFormat;

/// Tagprobe - audio tag and stream property reader
#[derive(Parser, Debug)]
#[command(name = "tagprobe")]
#[command(about = "Read tags and stream properties from FLAC, MP3 and Ogg Vorbis files", long_about = None)]
#[command(version)]
#[command(author = "xwsjjctz <xwsjjctz@icloud.com>")]
pub struct Config {
    /// Output format
    #[arg(short, long, value_enum, default_value = "line", global = true)]
    pub format: OutputFormat,

    /// Quiet mode (only print parsed files, no skip messages)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (parser debug logging)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Bytes searched for the last page of an Ogg stream
    #[arg(long, value_name = "BYTES", default_value_t = ParseOptions::DEFAULT_OGG_TAIL_WINDOW, global = true)]
    pub ogg_window: u64,

    /// ID3 frames larger than this are skipped
    #[arg(long, value_name = "BYTES", default_value_t = ParseOptions::DEFAULT_MAX_FRAME_SIZE, global = true)]
    pub max_frame_size: u32,

    /// Bytes searched for the first MPEG frame after the ID3 tag
    #[arg(long, value_name = "BYTES", default_value_t = ParseOptions::DEFAULT_SYNC_SEARCH_WINDOW, global = true)]
    pub sync_window: u64,

    /// Subcommand
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print tags and stream properties of files, walking directories
    Read {
        /// Audio files or directories
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<PathBuf>,
    },

    /// Print the detected format of files, walking directories
    Detect {
        /// Audio files or directories
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<PathBuf>,
    },
}

impl Config {
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            ogg_tail_window: self.ogg_window,
            max_frame_size: self.max_frame_size,
            sync_search_window: self.sync_window,
        }
    }

    /// Log filter used when `RUST_LOG` is not set
    pub fn default_log_filter(&self) -> &'static str {
        if self.verbose {
            "tagprobe=debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        }
    }
}

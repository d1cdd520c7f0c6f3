// Output formatting for CLI

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;
use tagprobe::{Format, ParsedStream, Properties};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One summary line per file
    #[default]
    Line,
    /// Compact JSON, one object per line
    Json,
    /// Pretty-printed JSON
    Pretty,
}

/// Everything known about one parsed file, for JSON output
#[derive(Debug, Serialize)]
struct StreamReport<'a> {
    path: &'a Path,
    format: Format,
    encoder: &'a str,
    duration_secs: f64,
    bitrate_kbps: u32,
    bit_depth: u8,
    sample_rate_hz: u32,
    channels: u8,
    tags: BTreeMap<&'a str, &'a str>,
    properties: &'a Properties,
}

impl<'a> StreamReport<'a> {
    fn new(path: &'a Path, stream: &'a ParsedStream) -> Self {
        StreamReport {
            path,
            format: stream.format(),
            encoder: stream.encoder(),
            duration_secs: stream.duration().as_secs_f64(),
            bitrate_kbps: stream.bitrate_kbps(),
            bit_depth: stream.bit_depth(),
            sample_rate_hz: stream.sample_rate_hz(),
            channels: stream.channels(),
            tags: stream.tags().collect(),
            properties: stream.properties(),
        }
    }
}

/// `artist - album - title [#disc.track] [mm:ss] [format/kbps/bit/kHz] [publisher]`
pub fn summary_line(stream: &ParsedStream) -> String {
    let seconds = stream.duration().as_secs();
    format!(
        "{} - {} - {} [#{}.{:02}] [{:02}:{:02}] [{}/{}kbps/{}bit/{}kHz] [{}]",
        stream.artist(),
        stream.album(),
        stream.title(),
        stream.disc_number(),
        stream.track_number(),
        seconds / 60,
        seconds % 60,
        stream.format_name(),
        stream.bitrate_kbps(),
        stream.bit_depth(),
        stream.sample_rate_hz() / 1000,
        stream.publisher(),
    )
}

/// Format and output data
pub struct OutputFormatter {
    format: OutputFormat,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    /// Output one parsed stream
    pub fn output_stream(&self, path: &Path, stream: &ParsedStream, writer: &mut impl Write) -> Result<()> {
        match self.format {
            OutputFormat::Line => writeln!(writer, "{}", summary_line(stream))?,
            OutputFormat::Json => {
                serde_json::to_writer(&mut *writer, &StreamReport::new(path, stream))?;
                writeln!(writer)?;
            }
            OutputFormat::Pretty => {
                serde_json::to_writer_pretty(&mut *writer, &StreamReport::new(path, stream))?;
                writeln!(writer)?;
            }
        }
        Ok(())
    }

    /// Output the detected format of one file
    pub fn output_format(&self, path: &Path, format: Format, writer: &mut impl Write) -> Result<()> {
        match self.format {
            OutputFormat::Line => writeln!(writer, "{}: {}", path.display(), format)?,
            OutputFormat::Json | OutputFormat::Pretty => {
                let value = serde_json::json!({ "path": path, "format": format });
                writeln!(writer, "{value}")?;
            }
        }
        Ok(())
    }

    /// Report a file that was skipped
    pub fn print_skipped(&self, path: &Path, reason: &dyn std::fmt::Display) {
        if !self.quiet {
            eprintln!("tagprobe: {} : {}", reason, path.display());
        }
    }
}

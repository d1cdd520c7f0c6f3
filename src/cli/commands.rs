// CLI command implementations
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glob::{glob, Pattern};
use tagprobe::{ParseOptions, TagError};

use crate::cli::output::OutputFormatter;

/// Expand directories into the files below them, recursively
pub fn collect_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        let metadata = std::fs::metadata(path).with_context(|| format!("cannot access {}", path.display()))?;
        if !metadata.is_dir() {
            files.push(path.clone());
            continue;
        }

        let directory = path.to_str().with_context(|| format!("path is not valid UTF-8: {}", path.display()))?;
        let glob_pattern = format!("{}/**/*", Pattern::escape(directory));
        for entry in glob(&glob_pattern).with_context(|| format!("invalid glob pattern {glob_pattern}"))? {
            match entry {
                Ok(path) if path.is_file() => files.push(path),
                Ok(_) => {}
                Err(e) => tracing::warn!("error reading path: {e}"),
            }
        }
    }
    Ok(files)
}

/// Decide whether a parse failure skips the file or aborts the walk.
///
/// Unknown formats are skipped silently; unsupported, invalid and truncated
/// streams are reported and skipped.
fn skip_or_abort(path: &Path, error: TagError, formatter: &OutputFormatter) -> Result<()> {
    if error.is_unknown_format() {
        tracing::debug!(path = %path.display(), "not an audio file");
        return Ok(());
    }
    if error.is_unsupported_version() || error.is_invalid_stream() || error.is_end_of_stream() {
        formatter.print_skipped(path, &error);
        return Ok(());
    }
    Err(error).with_context(|| format!("failed to read {}", path.display()))
}

/// Read tags and properties from files
pub fn command_read(paths: &[PathBuf], options: &ParseOptions, formatter: &OutputFormatter) -> Result<()> {
    let stdout = io::stdout();
    let mut writer = stdout.lock();

    for path in collect_files(paths)? {
        match tagprobe::read_file(&path, options) {
            Ok(stream) => formatter.output_stream(&path, &stream, &mut writer)?,
            Err(e) => skip_or_abort(&path, e, formatter)?,
        }
    }

    writer.flush()?;
    Ok(())
}

/// Print the detected format of files
pub fn command_detect(paths: &[PathBuf], formatter: &OutputFormatter) -> Result<()> {
    let stdout = io::stdout();
    let mut writer = stdout.lock();

    for path in collect_files(paths)? {
        let mut file = std::fs::File::open(&path).with_context(|| format!("cannot open {}", path.display()))?;
        match tagprobe::detect_format(&mut file) {
            Ok(format) => formatter.output_format(&path, format, &mut writer)?,
            Err(e) => skip_or_abort(&path, e, formatter)?,
        }
    }

    writer.flush()?;
    Ok(())
}

// Error classifications returned by the parsers

use std::io;

/// Errors returned while classifying or parsing an audio stream.
///
/// The three domain kinds are recoverable for a caller walking many files
/// (skip the file and move on). [`TagError::Io`] carries failures of the
/// underlying stream, including a stream that ends early.
#[derive(Debug, thiserror::Error)]
pub enum TagError {
    /// No magic number matched
    #[error("unknown format: {details}")]
    UnknownFormat { details: String },

    /// The format was recognized but this version, layer or mode is not handled
    #[error("{format}: unsupported version: {details}")]
    UnsupportedVersion { format: &'static str, details: String },

    /// The stream violates the structure of its format
    #[error("{format}: invalid stream: {details}")]
    InvalidStream { format: &'static str, details: String },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl TagError {
    pub(crate) fn unsupported(format: &'static str, details: impl Into<String>) -> Self {
        TagError::UnsupportedVersion {
            format,
            details: details.into(),
        }
    }

    pub(crate) fn invalid(format: &'static str, details: impl Into<String>) -> Self {
        TagError::InvalidStream {
            format,
            details: details.into(),
        }
    }

    pub fn is_unknown_format(&self) -> bool {
        matches!(self, TagError::UnknownFormat { .. })
    }

    pub fn is_unsupported_version(&self) -> bool {
        matches!(self, TagError::UnsupportedVersion { .. })
    }

    pub fn is_invalid_stream(&self) -> bool {
        matches!(self, TagError::InvalidStream { .. })
    }

    /// True when the stream ended before the parser had what it needed
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, TagError::Io(e) if e.kind() == io::ErrorKind::UnexpectedEof)
    }

    /// Name of the format the error was raised for
    pub fn format_name(&self) -> &'static str {
        match self {
            TagError::UnknownFormat { .. } | TagError::Io(_) => "unknown",
            TagError::UnsupportedVersion { format, .. } | TagError::InvalidStream { format, .. } => *format,
        }
    }
}

pub type Result<T> = std::result::Result<T, TagError>;

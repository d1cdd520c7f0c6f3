//! Tagprobe - read tags and stream properties from FLAC, MP3 and Ogg Vorbis
//! streams without decoding audio.
//!
//! ```no_run
//! let stream = tagprobe::read_file("song.flac", &tagprobe::ParseOptions::default())?;
//! println!("{} - {} ({}s)", stream.artist(), stream.title(), stream.duration().as_secs());
//! # Ok::<(), tagprobe::TagError>(())
//! ```

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

pub mod error;
pub mod field_mapping;
pub mod flac;
pub mod id3;
pub mod mp3;
pub mod ogg;
pub mod options;
pub mod stream;
pub mod utils;

pub use error::{Result, TagError};
pub use flac::FlacProperties;
pub use mp3::Mp3Properties;
pub use ogg::VorbisProperties;
pub use options::ParseOptions;
pub use stream::{Format, ParsedStream, Properties};

/// Identify the container from the first 4 bytes, which are consumed.
///
/// For MP3 the fourth byte is the ID3 major version and is returned with
/// the format so the parser can pick up from there.
fn sniff<R: Read>(reader: &mut R) -> Result<(Format, [u8; 4])> {
    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic)?;

    let format = if &magic == flac::FLAC_SIGNATURE {
        Format::Flac
    } else if magic.starts_with(id3::ID3_SIGNATURE) {
        Format::Mp3
    } else if &magic == ogg::OGG_SIGNATURE {
        Format::OggVorbis
    } else {
        return Err(TagError::UnknownFormat {
            details: format!("unrecognized magic number {:02x?}", magic),
        });
    };
    tracing::debug!(%format, "detected format");
    Ok((format, magic))
}

/// Detect the container format, consuming at most 4 bytes
pub fn detect_format<R: Read>(reader: &mut R) -> Result<Format> {
    sniff(reader).map(|(format, _)| format)
}

/// Classify a stream and parse its tags and properties with default options
pub fn classify_and_parse<R: Read + Seek>(reader: &mut R) -> Result<ParsedStream> {
    classify_and_parse_with(reader, &ParseOptions::default())
}

/// Classify a stream and parse its tags and properties.
///
/// The stream must be positioned at the start of the file. It is read and
/// seeked but never closed.
pub fn classify_and_parse_with<R: Read + Seek>(reader: &mut R, options: &ParseOptions) -> Result<ParsedStream> {
    let (format, magic) = sniff(reader)?;
    match format {
        Format::Flac => flac::parse(reader),
        Format::Mp3 => mp3::parse(reader, magic[3], options),
        Format::OggVorbis => ogg::parse(reader, options),
    }
}

/// Open and parse a file
pub fn read_file<P: AsRef<Path>>(path: P, options: &ParseOptions) -> Result<ParsedStream> {
    let mut reader = BufReader::new(File::open(path)?);
    classify_and_parse_with(&mut reader, options)
}

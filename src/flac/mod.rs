// FLAC metadata handling module
//
// FLAC stream layout:
// - "fLaC" signature (consumed by the format sniffer)
// - STREAMINFO metadata block (always first)
// - any number of further metadata blocks, VORBIS_COMMENT among them
// - audio frames

pub mod metadata;
pub mod vorbis;

use std::io::{Cursor, Read, Seek, SeekFrom};
use std::time::Duration;

use serde::Serialize;

use crate::error::{Result, TagError};
use crate::stream::{ParsedStream, Properties};
use crate::utils::io::{read_vec, skip};

pub use metadata::{FlacMetadataBlockHeader, FlacMetadataBlockType, StreamInfo, FLAC_SIGNATURE};
pub use vorbis::VorbisComment;

pub const FORMAT_NAME: &str = "FLAC";

/// Stream properties of a FLAC file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlacProperties {
    pub min_block_size: u16,
    pub max_block_size: u16,
    pub min_frame_size: u32,
    pub max_frame_size: u32,
    pub sample_rate: u32,
    pub channels: u8,
    pub bits_per_sample: u8,
    pub total_samples: u64,
    pub md5: String,
    pub file_size: u64,
}

impl FlacProperties {
    /// Whole seconds of audio, truncated
    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs(self.total_samples / u64::from(self.sample_rate))
    }

    /// Average bitrate over the whole file in kbps (1 kbit = 1024 bits).
    /// Streams shorter than a second report 0.
    pub fn bitrate_kbps(&self) -> u32 {
        match self.duration().as_secs() {
            0 => 0,
            seconds => (self.file_size * 8 / seconds / 1024) as u32,
        }
    }
}

/// Parse a FLAC stream positioned just after its signature
pub fn parse<R: Read + Seek>(reader: &mut R) -> Result<ParsedStream> {
    let header = FlacMetadataBlockHeader::read(reader)?;
    if header.block_type != FlacMetadataBlockType::StreamInfo {
        return Err(TagError::invalid(
            FORMAT_NAME,
            format!("first metadata block must be STREAMINFO, found {:?}", header.block_type),
        ));
    }
    if header.is_last {
        return Err(TagError::invalid(FORMAT_NAME, "STREAMINFO must not be the last metadata block"));
    }
    if header.length < StreamInfo::SIZE {
        return Err(TagError::invalid(
            FORMAT_NAME,
            format!("STREAMINFO block is {} bytes, expected {}", header.length, StreamInfo::SIZE),
        ));
    }

    let info = StreamInfo::read(reader)?;
    skip(reader, i64::from(header.length - StreamInfo::SIZE))?;

    let comment = read_vorbis_comment(reader)?.unwrap_or_default();

    // The average bitrate needs the total size
    let file_size = reader.seek(SeekFrom::End(0))?;

    let properties = FlacProperties {
        min_block_size: info.min_block_size,
        max_block_size: info.max_block_size,
        min_frame_size: info.min_frame_size,
        max_frame_size: info.max_frame_size,
        sample_rate: info.sample_rate,
        channels: info.channels,
        bits_per_sample: info.bits_per_sample,
        total_samples: info.total_samples,
        md5: info.md5_hex(),
        file_size,
    };

    Ok(ParsedStream::new(
        comment.comments,
        comment.vendor_string,
        Properties::Flac(properties),
    ))
}

/// Walk the remaining metadata blocks up to the VORBIS_COMMENT block
fn read_vorbis_comment<R: Read + Seek>(reader: &mut R) -> Result<Option<VorbisComment>> {
    loop {
        let header = FlacMetadataBlockHeader::read(reader)?;
        match header.block_type {
            FlacMetadataBlockType::VorbisComment => {
                let block = read_vec(reader, header.length as usize)?;
                let comment = VorbisComment::read(&mut Cursor::new(block)).map_err(|e| {
                    TagError::invalid(FORMAT_NAME, format!("malformed VORBIS_COMMENT block: {e}"))
                })?;
                return Ok(Some(comment));
            }
            FlacMetadataBlockType::Invalid => {
                return Err(TagError::invalid(FORMAT_NAME, "metadata block type 127 is invalid"));
            }
            block_type => {
                tracing::trace!(?block_type, length = header.length, "skipping metadata block");
                skip(reader, i64::from(header.length))?;
            }
        }

        if header.is_last {
            tracing::debug!("no VORBIS_COMMENT block");
            return Ok(None);
        }
    }
}

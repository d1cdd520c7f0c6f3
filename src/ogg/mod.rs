// Ogg Vorbis support
//
// Ogg page header (27 bytes + segment table):
// - capture pattern "OggS" (4 bytes)
// - version, always 0 (1 byte)
// - header type: 1=continuation, 2=bos, 4=eos (1 byte)
// - granule position, LE (8 bytes)
// - bitstream serial number, LE (4 bytes)
// - page sequence number, LE (4 bytes)
// - CRC checksum (4 bytes)
// - number of segments (1 byte), then one lacing value per segment
//
// A Vorbis stream opens with three header packets: identification, comment
// and setup. The comment packet may span several pages. The granule position
// of the last page is the stream's length in samples.

pub mod page;
pub mod vorbis;

use std::io::{Read, Seek, SeekFrom};
use std::time::Duration;

use serde::Serialize;

use crate::error::{Result, TagError};
use crate::options::ParseOptions;
use crate::stream::{ParsedStream, Properties};
use crate::utils::io::read_vec;

pub use page::{OggPageHeader, PacketReader};
pub use vorbis::IdentificationHeader;

pub const FORMAT_NAME: &str = "Ogg Vorbis";

pub const OGG_SIGNATURE: &[u8; 4] = b"OggS";

pub(crate) const OGG_HEADER_TYPE_CONTINUATION: u8 = 0x01;
pub(crate) const OGG_HEADER_TYPE_BOS: u8 = 0x02;

/// Upper bound for a reassembled header packet
const MAX_HEADER_PACKET_SIZE: usize = 16 * 1024 * 1024;

/// Stream properties of an Ogg Vorbis file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VorbisProperties {
    pub vorbis_version: u32,
    pub channels: u8,
    pub sample_rate: u32,
    pub max_bitrate: i32,
    pub nominal_bitrate: i32,
    pub min_bitrate: i32,
    pub blocksize_0: u8,
    pub blocksize_1: u8,
    pub framing: bool,
    /// Samples per channel up to the end of the last page, 0 if unknown
    pub final_granule_position: u64,
}

impl VorbisProperties {
    /// Whole seconds of audio, truncated
    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs(self.final_granule_position / u64::from(self.sample_rate))
    }

    /// Nominal bitrate in kbps; unset (zero or negative) reads as 0
    pub fn bitrate_kbps(&self) -> u32 {
        self.nominal_bitrate.max(0) as u32 / 1000
    }
}

/// Parse an Ogg Vorbis stream positioned just after the first capture pattern
pub fn parse<R: Read + Seek>(reader: &mut R, options: &ParseOptions) -> Result<ParsedStream> {
    let first_page = OggPageHeader::read(reader, true)?;
    if first_page.header_type & OGG_HEADER_TYPE_BOS == 0 {
        tracing::debug!("first Ogg page lacks the beginning-of-stream flag");
    }

    let (ident, comment) = {
        let mut packets = PacketReader::new(&mut *reader, first_page, MAX_HEADER_PACKET_SIZE);
        let ident = IdentificationHeader::parse(&packets.next_packet()?)?;
        (ident, vorbis::parse_comment_header(&packets.next_packet()?)?)
    };

    let final_granule_position = final_granule_position(reader, options.ogg_tail_window)?;

    let properties = VorbisProperties {
        vorbis_version: ident.vorbis_version,
        channels: ident.channels,
        sample_rate: ident.sample_rate,
        max_bitrate: ident.max_bitrate,
        nominal_bitrate: ident.nominal_bitrate,
        min_bitrate: ident.min_bitrate,
        blocksize_0: ident.blocksize_0,
        blocksize_1: ident.blocksize_1,
        framing: ident.framing,
        final_granule_position,
    };

    Ok(ParsedStream::new(
        comment.comments,
        comment.vendor_string,
        Properties::OggVorbis(properties),
    ))
}

/// Granule position of the last page that starts within `window` bytes of
/// the end of the stream.
///
/// No capture pattern in the window is an error. A final page header that is
/// itself cut short reads as 0.
fn final_granule_position<R: Read + Seek>(reader: &mut R, window: u64) -> Result<u64> {
    let end = reader.seek(SeekFrom::End(0))?;
    let start = end.saturating_sub(window);
    reader.seek(SeekFrom::Start(start))?;
    let tail = read_vec(reader, (end - start) as usize)?;

    let index = tail
        .windows(OGG_SIGNATURE.len())
        .rposition(|w| w == OGG_SIGNATURE)
        .ok_or_else(|| TagError::invalid(FORMAT_NAME, "could not detect final Ogg page header"))?;

    match OggPageHeader::read(&mut &tail[index..], false) {
        Ok(page) => Ok(page.granule_position),
        Err(e) => {
            tracing::warn!(error = %e, offset = start + index as u64, "unreadable final Ogg page, duration unknown");
            Ok(0)
        }
    }
}

// Vorbis header packets carried in the first Ogg pages
//
// Every header packet starts with a type byte and the word "vorbis":
// - 1: identification header (version, channels, rates, block sizes)
// - 3: comment header (same layout as a FLAC VORBIS_COMMENT block, then a
//   framing bit)
// - 5: setup header (codebooks, not read)

use std::io::{self, Cursor, Read};

use crate::error::{Result, TagError};
use crate::flac::vorbis::VorbisComment;
use crate::ogg::FORMAT_NAME;
use crate::utils::io::{read_fields, read_le_u32, read_u8};

const VORBIS_WORD: &[u8; 6] = b"vorbis";

pub const PACKET_TYPE_IDENTIFICATION: u8 = 1;
pub const PACKET_TYPE_COMMENT: u8 = 3;

/// Vorbis identification header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentificationHeader {
    pub vorbis_version: u32,
    pub channels: u8,
    pub sample_rate: u32,
    pub max_bitrate: i32,
    pub nominal_bitrate: i32,
    pub min_bitrate: i32,
    /// Short window size as a power of two
    pub blocksize_0: u8,
    /// Long window size as a power of two
    pub blocksize_1: u8,
    pub framing: bool,
}

impl IdentificationHeader {
    pub fn parse(packet: &[u8]) -> Result<Self> {
        let body = common_header(packet, PACKET_TYPE_IDENTIFICATION)?;
        let header = Self::read(&mut Cursor::new(body))
            .map_err(|e| TagError::invalid(FORMAT_NAME, format!("truncated identification header: {e}")))?;

        if header.vorbis_version != 0 {
            return Err(TagError::invalid(
                FORMAT_NAME,
                format!("Vorbis version {}, expected 0", header.vorbis_version),
            ));
        }
        Ok(header)
    }

    fn read<R: Read>(reader: &mut R) -> io::Result<Self> {
        let vorbis_version = read_le_u32(reader)?;
        let channels = read_u8(reader)?;
        let sample_rate = read_le_u32(reader)?;
        let max_bitrate = read_le_u32(reader)? as i32;
        let nominal_bitrate = read_le_u32(reader)? as i32;
        let min_bitrate = read_le_u32(reader)? as i32;
        // blocksize_1 sits in the high nibble
        let [blocksize_1, blocksize_0] = read_fields(&mut *reader, [4, 4])?;
        let framing = read_u8(reader)? & 1 == 1;

        Ok(IdentificationHeader {
            vorbis_version,
            channels,
            sample_rate,
            max_bitrate,
            nominal_bitrate,
            min_bitrate,
            blocksize_0: blocksize_0 as u8,
            blocksize_1: blocksize_1 as u8,
            framing,
        })
    }
}

/// Parse the comment header packet. The trailing framing bit is not checked.
pub fn parse_comment_header(packet: &[u8]) -> Result<VorbisComment> {
    let body = common_header(packet, PACKET_TYPE_COMMENT)?;
    VorbisComment::read(&mut Cursor::new(body))
        .map_err(|e| TagError::invalid(FORMAT_NAME, format!("malformed comment header: {e}")))
}

/// Check the packet type and "vorbis" word, returning the rest of the packet
fn common_header(packet: &[u8], expected: u8) -> Result<&[u8]> {
    match packet {
        [packet_type, word @ ..] if word.starts_with(VORBIS_WORD) => {
            if *packet_type != expected {
                return Err(TagError::invalid(
                    FORMAT_NAME,
                    format!("expected header packet type {expected}, found {packet_type}"),
                ));
            }
            Ok(&word[VORBIS_WORD.len()..])
        }
        _ => Err(TagError::invalid(FORMAT_NAME, "header packet lacks the \"vorbis\" word")),
    }
}

#[cfg(test)]
pub(crate) fn identification_packet(channels: u8, sample_rate: u32, nominal_bitrate: i32) -> Vec<u8> {
    let mut packet = vec![PACKET_TYPE_IDENTIFICATION];
    packet.extend_from_slice(VORBIS_WORD);
    packet.extend_from_slice(&0u32.to_le_bytes());
    packet.push(channels);
    packet.extend_from_slice(&sample_rate.to_le_bytes());
    packet.extend_from_slice(&0i32.to_le_bytes());
    packet.extend_from_slice(&nominal_bitrate.to_le_bytes());
    packet.extend_from_slice(&0i32.to_le_bytes());
    packet.push(0xB8);
    packet.push(0x01);
    packet
}

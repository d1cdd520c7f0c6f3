// MPEG audio frame header

use std::io::{self, Read};

use serde::Serialize;

use crate::error::{Result, TagError};
use crate::mp3::FORMAT_NAME;
use crate::utils::io::read_fields;

/// MPEG1 Layer III bitrates in kbps, by bitrate index. Index 0 is "free
/// format", index 15 is invalid.
const BITRATES_V1_L3: [u32; 15] = [0, 32, 40, 48, 56, 64, 80, 96, 112, 128, 160, 192, 224, 256, 320];

/// MPEG1 sample rates in Hz, by sample-rate index. Index 3 is reserved.
const SAMPLE_RATES_V1: [u32; 3] = [44100, 48000, 32000];

const VERSION_ID_MPEG1: u64 = 3;
const LAYER_ID_III: u64 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChannelMode {
    Stereo,
    JointStereo,
    DualChannel,
    Mono,
}

impl ChannelMode {
    fn from_bits(bits: u64) -> Self {
        match bits {
            0 => ChannelMode::Stereo,
            1 => ChannelMode::JointStereo,
            2 => ChannelMode::DualChannel,
            _ => ChannelMode::Mono,
        }
    }

    pub fn channels(self) -> u8 {
        match self {
            ChannelMode::Mono => 1,
            _ => 2,
        }
    }
}

/// Decoded 32-bit MPEG1 Layer III frame header
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MpegFrameHeader {
    /// Bitrate from the header's table, 0 for free format
    pub bitrate: u32,
    pub sample_rate: u32,
    /// A CRC follows the header
    pub protected: bool,
    pub padding: bool,
    pub private: bool,
    pub channel_mode: ChannelMode,
    pub mode_extension: u8,
    pub copyright: bool,
    pub original: bool,
    pub emphasis: u8,
}

impl MpegFrameHeader {
    pub const SIZE: usize = 4;

    /// Decode the header bit-fields from the 4 bytes starting at the sync
    pub fn parse(bytes: [u8; 4]) -> Result<Self> {
        let [sync, version_id, layer_id, protection, bitrate_index, sample_rate_index, padding, private, channel_mode, mode_extension, copyright, original, emphasis] =
            read_fields(&bytes[..], [11, 2, 2, 1, 4, 2, 1, 1, 2, 2, 1, 1, 2])?;

        if sync != 0x7FF {
            return Err(TagError::invalid(FORMAT_NAME, "missing MPEG frame sync"));
        }
        if version_id != VERSION_ID_MPEG1 || layer_id != LAYER_ID_III {
            return Err(TagError::unsupported(
                FORMAT_NAME,
                format!(
                    "only MPEG1 Layer III is supported, found {} {}",
                    version_name(version_id),
                    layer_name(layer_id)
                ),
            ));
        }

        let bitrate = *BITRATES_V1_L3
            .get(bitrate_index as usize)
            .ok_or_else(|| TagError::invalid(FORMAT_NAME, "invalid MPEG bitrate index 15"))?;
        let sample_rate = *SAMPLE_RATES_V1
            .get(sample_rate_index as usize)
            .ok_or_else(|| TagError::invalid(FORMAT_NAME, "reserved MPEG sample rate index"))?;

        Ok(MpegFrameHeader {
            bitrate,
            sample_rate,
            protected: protection == 0,
            padding: padding == 1,
            private: private == 1,
            channel_mode: ChannelMode::from_bits(channel_mode),
            mode_extension: mode_extension as u8,
            copyright: copyright == 1,
            original: original == 1,
            emphasis: emphasis as u8,
        })
    }
}

fn version_name(version_id: u64) -> &'static str {
    match version_id {
        0 => "MPEG2.5",
        2 => "MPEG2",
        3 => "MPEG1",
        _ => "reserved version",
    }
}

fn layer_name(layer_id: u64) -> &'static str {
    match layer_id {
        1 => "Layer III",
        2 => "Layer II",
        3 => "Layer I",
        _ => "reserved layer",
    }
}

/// Find the first frame sync within `window` bytes of the current position.
///
/// Returns the 4 header bytes and up to `trailing` bytes that follow them,
/// which is where a Xing/Info header lives.
pub fn find_first_frame<R: Read>(reader: &mut R, window: u64, trailing: usize) -> Result<([u8; 4], Vec<u8>)> {
    let mut buffer = Vec::new();
    reader.by_ref().take(window).read_to_end(&mut buffer)?;

    let start = buffer
        .windows(2)
        .position(|pair| pair[0] == 0xFF && pair[1] & 0xE0 == 0xE0)
        .ok_or_else(|| {
            TagError::invalid(FORMAT_NAME, format!("no MPEG frame sync within {window} bytes"))
        })?;
    if start > 0 {
        tracing::debug!(offset = start, "skipped bytes before MPEG frame sync");
    }

    // The header or the bytes after it may run past the window
    let wanted = start + MpegFrameHeader::SIZE + trailing;
    if buffer.len() < wanted && buffer.len() as u64 == window {
        let more = wanted - buffer.len();
        let mut tail = Vec::new();
        reader.by_ref().take(more as u64).read_to_end(&mut tail)?;
        buffer.extend(tail);
    }

    let header_end = start + MpegFrameHeader::SIZE;
    if buffer.len() < header_end {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stream ends inside the MPEG frame header").into());
    }

    let mut header = [0u8; 4];
    header.copy_from_slice(&buffer[start..header_end]);
    let trailing_end = buffer.len().min(header_end + trailing);
    Ok((header, buffer[header_end..trailing_end].to_vec()))
}

// MP3 support: ID3v2 tags followed by MPEG1 Layer III audio
//
// Stream layout:
// - ID3v2 header, "ID3" + version (consumed by the sniffer) + flags + size
// - optional extended header
// - frames, then optional padding or footer
// - audio frames; the first may carry a Xing/Info header

pub mod frame;
pub mod xing;

use std::collections::HashMap;
use std::io::{Read, Seek};
use std::time::Duration;

use serde::Serialize;

use crate::error::Result;
use crate::field_mapping::StandardField;
use crate::id3::{frames, Id3v2Tag};
use crate::options::ParseOptions;
use crate::stream::{ParsedStream, Properties};

pub use frame::{ChannelMode, MpegFrameHeader};
pub use xing::XingHeader;

pub const FORMAT_NAME: &str = "MP3";

/// PCM samples in one MPEG1 Layer III frame
const SAMPLES_PER_FRAME: f64 = 1152.0;

/// Upper bound reported for VBR bitrates
const MAX_BITRATE_KBPS: u32 = 320;

/// Bytes after the frame header searched for a Xing/Info header
const XING_SEARCH_LEN: usize = 64;

/// Stream properties of an MP3 file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mp3Properties {
    /// ID3v2 (major, minor) version
    pub id3_version: (u8, u8),
    /// Bitrate from the first frame header
    pub bitrate: u32,
    pub sample_rate: u32,
    pub frame_header: MpegFrameHeader,
    pub xing: Option<XingHeader>,
    /// Value of the TLEN frame
    pub length_ms: Option<u64>,
}

impl Mp3Properties {
    pub fn channels(&self) -> u8 {
        self.frame_header.channel_mode.channels()
    }

    /// Duration from the VBR header's frame count, else from TLEN, else zero.
    /// CBR streams without either are not measured.
    pub fn duration(&self) -> Duration {
        if let Some(frames) = self.xing.as_ref().and_then(|x| x.frames) {
            return Duration::from_secs_f64(SAMPLES_PER_FRAME / f64::from(self.sample_rate) * f64::from(frames));
        }
        self.length_ms.map(Duration::from_millis).unwrap_or(Duration::ZERO)
    }

    /// Average bitrate from the VBR header, else the first frame's bitrate
    pub fn bitrate_kbps(&self) -> u32 {
        let Some(XingHeader { frames: Some(_), bytes: Some(bytes), .. }) = self.xing else {
            return self.bitrate;
        };

        let seconds = self.duration().as_secs_f64();
        if seconds == 0.0 {
            return self.bitrate;
        }
        let kbps = f64::from(bytes) * 8.0 / seconds / 1000.0;
        (kbps as u32).min(MAX_BITRATE_KBPS)
    }
}

/// Parse an MP3 stream positioned just after "ID3" and the major version byte
pub fn parse<R: Read + Seek>(reader: &mut R, major_version: u8, options: &ParseOptions) -> Result<ParsedStream> {
    let tag = Id3v2Tag::read(reader, major_version, options.max_frame_size)?;

    // user-defined frames go first so a standard frame always wins its key
    let (user, standard): (Vec<_>, Vec<_>) = tag.frames.iter().partition(|frame| frames::is_user_text(frame));
    let mut tags = HashMap::new();
    for frame in user.into_iter().chain(standard) {
        if let Some((name, value)) = frames::tag_entry(frame) {
            tags.insert(name, value);
        }
    }

    let (header_bytes, trailing) = frame::find_first_frame(reader, options.sync_search_window, XING_SEARCH_LEN)?;
    let frame_header = MpegFrameHeader::parse(header_bytes)?;
    let xing = XingHeader::find(&trailing);

    let length_ms = tags
        .get(StandardField::Length.as_str())
        .and_then(|value| value.trim().parse().ok());
    let encoder = tags.get(StandardField::Encoder.as_str()).cloned().unwrap_or_default();

    let properties = Mp3Properties {
        id3_version: tag.header.version,
        bitrate: frame_header.bitrate,
        sample_rate: frame_header.sample_rate,
        frame_header,
        xing,
        length_ms,
    };

    Ok(ParsedStream::new(tags, encoder, Properties::Mp3(properties)))
}

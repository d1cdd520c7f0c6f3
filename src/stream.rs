// Uniform read-only view over a parsed stream

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::field_mapping::{StandardField, ValueConverter};
use crate::flac::FlacProperties;
use crate::mp3::Mp3Properties;
use crate::ogg::VorbisProperties;

/// Container formats the sniffer recognizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Format {
    Flac,
    Mp3,
    OggVorbis,
}

impl Format {
    pub fn name(self) -> &'static str {
        match self {
            Format::Flac => crate::flac::FORMAT_NAME,
            Format::Mp3 => crate::mp3::FORMAT_NAME,
            Format::OggVorbis => crate::ogg::FORMAT_NAME,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Format-specific stream properties
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Properties {
    Flac(FlacProperties),
    Mp3(Mp3Properties),
    OggVorbis(VorbisProperties),
}

/// Tags and stream properties of one audio stream.
///
/// Produced only by a successful parse, never modified afterwards. Missing
/// text tags read as `""` and missing numeric tags as `0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedStream {
    tags: HashMap<String, String>,
    encoder: String,
    properties: Properties,
}

impl ParsedStream {
    pub(crate) fn new(tags: HashMap<String, String>, encoder: String, properties: Properties) -> Self {
        debug_assert!(tags.keys().all(|k| *k == k.to_uppercase()));
        ParsedStream {
            tags,
            encoder,
            properties,
        }
    }

    fn field(&self, field: StandardField) -> &str {
        self.raw_tag(field.as_str())
    }

    pub fn album(&self) -> &str {
        self.field(StandardField::Album)
    }

    pub fn album_artist(&self) -> &str {
        self.field(StandardField::AlbumArtist)
    }

    pub fn artist(&self) -> &str {
        self.field(StandardField::Artist)
    }

    pub fn comment(&self) -> &str {
        self.field(StandardField::Comment)
    }

    pub fn date(&self) -> &str {
        self.field(StandardField::Date)
    }

    /// Disc number, 0 when absent or not a plain number
    pub fn disc_number(&self) -> u32 {
        ValueConverter::number(self.field(StandardField::DiscNumber))
    }

    pub fn genre(&self) -> &str {
        self.field(StandardField::Genre)
    }

    /// Record label
    pub fn publisher(&self) -> &str {
        self.field(StandardField::Publisher)
    }

    pub fn title(&self) -> &str {
        self.field(StandardField::Title)
    }

    /// Track number; "N/M" yields N, anything non-numeric yields 0
    pub fn track_number(&self) -> u32 {
        ValueConverter::track_number(self.field(StandardField::TrackNumber))
    }

    /// Look up a tag by name. Names are stored uppercase; the lookup
    /// uppercases `name` as well. Returns `""` when the tag is absent.
    pub fn raw_tag(&self, name: &str) -> &str {
        self.tags
            .get(name)
            .or_else(|| self.tags.get(&name.to_uppercase()))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// All tags, in no particular order
    pub fn tags(&self) -> impl Iterator<Item = (&str, &str)> {
        self.tags.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Tool that produced the file, `""` if unknown
    pub fn encoder(&self) -> &str {
        &self.encoder
    }

    pub fn format(&self) -> Format {
        match self.properties {
            Properties::Flac(_) => Format::Flac,
            Properties::Mp3(_) => Format::Mp3,
            Properties::OggVorbis(_) => Format::OggVorbis,
        }
    }

    pub fn format_name(&self) -> &'static str {
        self.format().name()
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    pub fn bit_depth(&self) -> u8 {
        match &self.properties {
            Properties::Flac(p) => p.bits_per_sample,
            Properties::Mp3(_) | Properties::OggVorbis(_) => 16,
        }
    }

    pub fn bitrate_kbps(&self) -> u32 {
        match &self.properties {
            Properties::Flac(p) => p.bitrate_kbps(),
            Properties::Mp3(p) => p.bitrate_kbps(),
            Properties::OggVorbis(p) => p.bitrate_kbps(),
        }
    }

    pub fn channels(&self) -> u8 {
        match &self.properties {
            Properties::Flac(p) => p.channels,
            Properties::Mp3(p) => p.channels(),
            Properties::OggVorbis(p) => p.channels,
        }
    }

    pub fn duration(&self) -> Duration {
        match &self.properties {
            Properties::Flac(p) => p.duration(),
            Properties::Mp3(p) => p.duration(),
            Properties::OggVorbis(p) => p.duration(),
        }
    }

    pub fn sample_rate_hz(&self) -> u32 {
        match &self.properties {
            Properties::Flac(p) => p.sample_rate,
            Properties::Mp3(p) => p.sample_rate,
            Properties::OggVorbis(p) => p.sample_rate,
        }
    }
}

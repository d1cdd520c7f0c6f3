// Unified metadata field mapping
//
// Every format stores its tags under uppercase names in the parsed stream.
// Vorbis comments (FLAC, Ogg) already use these names; ID3v2 frames are
// translated from their frame IDs through the table below.

/// Standard metadata fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardField {
    Title,
    Artist,
    Album,
    AlbumArtist,
    Date,
    TrackNumber,
    DiscNumber,
    Genre,
    Comment,
    Publisher,
    Encoder,
    Length,
}

impl StandardField {
    /// Uppercase tag name the field is stored under
    pub fn as_str(&self) -> &'static str {
        match self {
            StandardField::Title => "TITLE",
            StandardField::Artist => "ARTIST",
            StandardField::Album => "ALBUM",
            StandardField::AlbumArtist => "ALBUMARTIST",
            StandardField::Date => "DATE",
            StandardField::TrackNumber => "TRACKNUMBER",
            StandardField::DiscNumber => "DISCNUMBER",
            StandardField::Genre => "GENRE",
            StandardField::Comment => "COMMENT",
            StandardField::Publisher => "PUBLISHER",
            StandardField::Encoder => "ENCODER",
            StandardField::Length => "LENGTH",
        }
    }
}

/// Format-specific field mappings
pub struct FieldMappings;

impl FieldMappings {
    /// Convert an ID3v2 frame ID (3-character v2.2 or 4-character v2.3/v2.4)
    /// to its standard field
    pub fn from_id3v2(frame_id: &str) -> Option<StandardField> {
        match frame_id {
            "TIT2" | "TT2" => Some(StandardField::Title),
            "TPE1" | "TP1" => Some(StandardField::Artist),
            "TALB" | "TAL" => Some(StandardField::Album),
            "TPE2" | "TP2" => Some(StandardField::AlbumArtist),
            "TDRC" | "TYER" | "TYE" => Some(StandardField::Date),
            "TRCK" | "TRK" => Some(StandardField::TrackNumber),
            "TPOS" | "TPA" => Some(StandardField::DiscNumber),
            "TCON" | "TCO" => Some(StandardField::Genre),
            "COMM" | "COM" => Some(StandardField::Comment),
            "TPUB" | "TPB" => Some(StandardField::Publisher),
            "TSSE" | "TSS" => Some(StandardField::Encoder),
            "TLEN" | "TLE" => Some(StandardField::Length),
            _ => None,
        }
    }
}

/// Numeric conversions for tag values
pub struct ValueConverter;

impl ValueConverter {
    /// Parse a track number, accepting the "N/M" form (e.g. "1/10" -> 1).
    /// Returns 0 for anything non-numeric.
    pub fn track_number(value: &str) -> u32 {
        value
            .split('/')
            .next()
            .and_then(|n| n.trim().parse().ok())
            .unwrap_or(0)
    }

    /// Parse a plain number, 0 when empty or non-numeric
    pub fn number(value: &str) -> u32 {
        value.trim().parse().unwrap_or(0)
    }
}

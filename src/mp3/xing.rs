// Xing / Info VBR header
//
// LAME and most other encoders put this in the side-information area of the
// first audio frame:
// - "Xing" (VBR) or "Info" (CBR) marker (4 bytes)
// - flags, big-endian (4 bytes): 0x1 frames, 0x2 bytes, 0x4 TOC, 0x8 quality
// - frame count, big-endian (4 bytes, if flagged)
// - stream size in bytes, big-endian (4 bytes, if flagged)

use serde::Serialize;

const FLAG_FRAMES: u32 = 0x1;
const FLAG_BYTES: u32 = 0x2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct XingHeader {
    /// "Xing" marks a VBR stream, "Info" a CBR one
    pub vbr: bool,
    pub frames: Option<u32>,
    pub bytes: Option<u32>,
}

impl XingHeader {
    /// Search the bytes that follow a frame header for a Xing or Info header
    pub fn find(region: &[u8]) -> Option<Self> {
        let offset = region.windows(4).position(|w| w == b"Xing" || w == b"Info")?;
        let vbr = &region[offset..offset + 4] == b"Xing";
        let mut fields = region[offset + 4..]
            .chunks_exact(4)
            .map(|chunk| u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]));

        let Some(flags) = fields.next() else {
            tracing::debug!("VBR header truncated before its flags");
            return None;
        };
        let frames = if flags & FLAG_FRAMES != 0 { fields.next() } else { None };
        let bytes = if flags & FLAG_BYTES != 0 { fields.next() } else { None };

        tracing::debug!(vbr, ?frames, ?bytes, "found VBR header");
        Some(XingHeader { vbr, frames, bytes })
    }
}

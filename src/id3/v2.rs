// ID3v2 tag implementation (versions 2.2, 2.3 and 2.4)

use std::io::{Cursor, Read, Seek, SeekFrom};

use crate::error::{Result, TagError};
use crate::mp3::FORMAT_NAME;
use crate::utils::io::{read_be_u32, read_fields, read_vec, skip, synchsafe};

/// ID3v2 header structure
#[derive(Debug, Clone, PartialEq)]
pub struct Id3v2Header {
    pub version: (u8, u8),
    pub unsynchronisation: bool,
    pub extended: bool,
    pub experimental: bool,
    pub footer: bool,
    /// Size field as stored; see [`Id3v2Header::tag_size`]
    pub size_field: u32,
}

/// ID3v2 frame structure
#[derive(Debug, Clone, PartialEq)]
pub struct Id3Frame {
    pub frame_id: String,
    pub flags: u16,
    pub data: Vec<u8>,
}

/// ID3v2 tag structure
#[derive(Debug)]
pub struct Id3v2Tag {
    pub header: Id3v2Header,
    pub frames: Vec<Id3Frame>,
}

impl Id3v2Header {
    pub const SIZE: u64 = 10;

    /// Read the rest of the header. The "ID3" identifier and the major
    /// version byte have already been consumed by the format sniffer.
    pub fn read_after_major<R: Read>(reader: &mut R, major: u8) -> Result<Self> {
        let [minor, unsynchronisation, extended, experimental, footer, _reserved, size_field] =
            read_fields(reader, [8, 1, 1, 1, 1, 4, 32])?;

        if !(2..=4).contains(&major) {
            return Err(TagError::unsupported(
                FORMAT_NAME,
                format!("unsupported ID3 version: 2.{major}.{minor}"),
            ));
        }

        // The three later flags only exist from 2.3 on
        let has_flags = major >= 3;
        let header = Id3v2Header {
            version: (major, minor as u8),
            unsynchronisation: unsynchronisation == 1,
            extended: has_flags && extended == 1,
            experimental: has_flags && experimental == 1,
            footer: footer == 1,
            size_field: size_field as u32,
        };

        if header.footer && major < 4 {
            return Err(TagError::invalid(
                FORMAT_NAME,
                format!("ID3 tag footer flag set on version 2.{major}"),
            ));
        }

        Ok(header)
    }

    /// Size of the tag after the header, excluding any footer
    pub fn tag_size(&self) -> u64 {
        u64::from(synchsafe(self.size_field))
    }

    fn frame_id_len(&self) -> usize {
        if self.version.0 == 2 {
            3
        } else {
            4
        }
    }

    fn frame_header_len(&self) -> u64 {
        if self.version.0 == 2 {
            6
        } else {
            10
        }
    }
}

impl Id3v2Tag {
    /// Read the header and every frame of the tag.
    ///
    /// On return the reader is positioned where audio data is expected:
    /// at the end of the tag, or at the frame sync byte if one interrupted
    /// the frame list. Frames larger than `max_frame_size` and attached
    /// pictures are skipped without being read.
    pub fn read<R: Read + Seek>(reader: &mut R, major: u8, max_frame_size: u32) -> Result<Self> {
        let header = Id3v2Header::read_after_major(reader, major)?;
        let frames_start = reader.stream_position()?;
        let tag_end = frames_start + header.tag_size();
        let audio_start = if header.footer {
            tag_end + Id3v2Header::SIZE
        } else {
            tag_end
        };

        let (frames, at_sync) = if header.unsynchronisation && header.version.0 < 4 {
            // Before 2.4 the whole body is unsynchronised, frame headers
            // included, and frame sizes count the restored bytes
            let body = remove_unsynchronisation(&read_vec(reader, header.tag_size() as usize)?);
            let end = body.len() as u64;
            let (frames, _) = read_frames(&mut Cursor::new(body), &header, end, max_frame_size)?;
            (frames, false)
        } else {
            read_frames(reader, &header, tag_end, max_frame_size)?
        };

        if !at_sync {
            reader.seek(SeekFrom::Start(audio_start))?;
        }

        Ok(Id3v2Tag { header, frames })
    }
}

/// Walk the frame list up to `end`. The flag is set when a frame sync byte
/// stopped the walk, in which case the reader is left on it.
fn read_frames<R: Read + Seek>(
    reader: &mut R,
    header: &Id3v2Header,
    end: u64,
    max_frame_size: u32,
) -> Result<(Vec<Id3Frame>, bool)> {
    if header.extended {
        skip_extended_header(reader, header)?;
    }

    let id_len = header.frame_id_len();
    let mut frames = Vec::new();

    while reader.stream_position()? + header.frame_header_len() <= end {
        let mut id = [0u8; 4];
        reader.read_exact(&mut id[..id_len])?;

        match id[0] {
            0 => {
                tracing::trace!("reached ID3 padding");
                break;
            }
            0xFF => {
                tracing::debug!("frame sync inside ID3 tag, stopping frame scan");
                skip(reader, -(id_len as i64))?;
                return Ok((frames, true));
            }
            _ => {}
        }

        let (size, flags) = match header.version.0 {
            2 => {
                let [size] = read_fields(&mut *reader, [24])?;
                (size as u32, 0)
            }
            3 => {
                let size = read_be_u32(reader)?;
                let [flags] = read_fields(&mut *reader, [16])?;
                (size, flags as u16)
            }
            _ => {
                let size = synchsafe(read_be_u32(reader)?);
                let [flags] = read_fields(&mut *reader, [16])?;
                (size, flags as u16)
            }
        };

        let frame_id = String::from_utf8_lossy(&id[..id_len]).into_owned();
        if frame_id == "APIC" || frame_id == "PIC" || size > max_frame_size {
            tracing::debug!(%frame_id, size, "skipping ID3 frame");
            skip(reader, i64::from(size))?;
            continue;
        }

        let data = read_vec(reader, size as usize)?;
        match frame_payload(header, flags, data) {
            Some(data) => frames.push(Id3Frame { frame_id, flags, data }),
            None => tracing::debug!(%frame_id, flags, "skipping compressed or encrypted ID3 frame"),
        }
    }

    Ok((frames, false))
}

fn skip_extended_header<R: Read + Seek>(reader: &mut R, header: &Id3v2Header) -> Result<()> {
    let size = read_be_u32(reader)?;
    let remaining = if header.version.0 >= 4 {
        // 2.4 stores a synchsafe size that counts the size field itself
        i64::from(synchsafe(size)) - 4
    } else {
        i64::from(size)
    };
    if remaining < 0 {
        return Err(TagError::invalid(
            FORMAT_NAME,
            format!("extended header size {size} is too small"),
        ));
    }
    tracing::trace!(remaining, "skipping ID3 extended header");
    skip(reader, remaining)?;
    Ok(())
}

/// Strip the extra frame header bytes and undo per-frame encodings.
/// `None` for frames whose payload cannot be interpreted as stored.
///
/// Tag-level unsynchronisation before 2.4 is undone by the caller.
fn frame_payload(header: &Id3v2Header, flags: u16, mut data: Vec<u8>) -> Option<Vec<u8>> {
    match header.version.0 {
        3 => {
            // compression, encryption
            if flags & 0x00C0 != 0 {
                return None;
            }
            // group identifier byte
            if flags & 0x0020 != 0 {
                data.drain(..data.len().min(1));
            }
        }
        4 => {
            // compression, encryption
            if flags & 0x000C != 0 {
                return None;
            }
            // group identifier byte, then the data length indicator
            if flags & 0x0040 != 0 {
                data.drain(..data.len().min(1));
            }
            if flags & 0x0001 != 0 {
                data.drain(..data.len().min(4));
            }
            if flags & 0x0002 != 0 || header.unsynchronisation {
                data = remove_unsynchronisation(&data);
            }
        }
        _ => {}
    }
    Some(data)
}

/// Replace every 0xFF 0x00 pair with 0xFF
fn remove_unsynchronisation(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len());
    let mut previous = 0u8;
    for &byte in data {
        if !(previous == 0xFF && byte == 0x00) {
            out.push(byte);
        }
        previous = byte;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Header bytes that follow "ID3" and the major version
    fn header_tail(minor: u8, flags: u8, size: u32) -> Vec<u8> {
        let mut data = vec![minor, flags];
        data.extend_from_slice(&size.to_be_bytes());
        data
    }

    fn text_frame_v3(id: &str, text: &str) -> Vec<u8> {
        let mut frame = id.as_bytes().to_vec();
        frame.extend_from_slice(&(text.len() as u32 + 1).to_be_bytes());
        frame.extend_from_slice(&[0, 0, 0]);
        frame.extend_from_slice(text.as_bytes());
        frame
    }

    #[test]
    fn test_header_flags() {
        let header = Id3v2Header::read_after_major(&mut Cursor::new(header_tail(0, 0x50, 0x0000_0201)), 4).unwrap();
        assert_eq!(header.version, (4, 0));
        assert!(header.extended);
        assert!(header.footer);
        assert!(!header.unsynchronisation);
        assert_eq!(header.size_field, 0x201);
        assert_eq!(header.tag_size(), 257);
    }

    #[test]
    fn test_v22_ignores_later_flags() {
        let header = Id3v2Header::read_after_major(&mut Cursor::new(header_tail(0, 0x40, 0)), 2).unwrap();
        assert!(!header.extended);
    }

    #[test]
    fn test_unsupported_major_version() {
        let err = Id3v2Header::read_after_major(&mut Cursor::new(header_tail(0, 0, 0)), 5).unwrap_err();
        assert!(err.is_unsupported_version());
        let err = Id3v2Header::read_after_major(&mut Cursor::new(header_tail(0, 0, 0)), 1).unwrap_err();
        assert!(err.is_unsupported_version());
    }

    #[test]
    fn test_footer_before_v24_is_invalid() {
        let err = Id3v2Header::read_after_major(&mut Cursor::new(header_tail(0, 0x10, 0)), 3).unwrap_err();
        assert!(err.is_invalid_stream());
    }

    #[test]
    fn test_v23_frames_and_padding() {
        let mut frames = text_frame_v3("TIT2", "Title");
        frames.extend(text_frame_v3("TPE1", "Artist"));
        frames.extend_from_slice(&[0; 20]);

        let mut data = header_tail(0, 0, frames.len() as u32);
        data.extend(&frames);
        data.extend_from_slice(&[0xFF, 0xFB, 0x90, 0x00]);

        let mut cursor = Cursor::new(data);
        let tag = Id3v2Tag::read(&mut cursor, 3, 1024).unwrap();
        assert_eq!(tag.frames.len(), 2);
        assert_eq!(tag.frames[0].frame_id, "TIT2");
        assert_eq!(tag.frames[1].data, b"\0Artist");
        // positioned after the padding
        assert_eq!(cursor.position(), 6 + frames.len() as u64);
    }

    #[test]
    fn test_sync_byte_is_pushed_back() {
        let mut frames = text_frame_v3("TIT2", "Title");
        let tag_size = frames.len() as u32 + 64;
        frames.extend_from_slice(&[0xFF, 0xFB, 0x90, 0x00]);

        let mut data = header_tail(0, 0, tag_size);
        data.extend(&frames);

        let mut cursor = Cursor::new(data);
        let tag = Id3v2Tag::read(&mut cursor, 3, 1024).unwrap();
        assert_eq!(tag.frames.len(), 1);
        assert_eq!(cursor.position(), 6 + frames.len() as u64 - 4);
    }

    #[test]
    fn test_large_frames_and_pictures_are_skipped() {
        let mut frames = text_frame_v3("APIC", "not really a picture");
        frames.extend(text_frame_v3("COMM", "far too long for the limit"));
        frames.extend(text_frame_v3("TALB", "Album"));

        let mut data = header_tail(0, 0, frames.len() as u32);
        data.extend(&frames);

        let tag = Id3v2Tag::read(&mut Cursor::new(data), 3, 16).unwrap();
        assert_eq!(tag.frames.len(), 1);
        assert_eq!(tag.frames[0].frame_id, "TALB");
    }

    #[test]
    fn test_v22_frames() {
        let mut frame = b"TT2".to_vec();
        frame.extend_from_slice(&[0, 0, 6, 0]);
        frame.extend_from_slice(b"Title");

        let mut data = header_tail(0, 0, frame.len() as u32);
        data.extend(&frame);

        let tag = Id3v2Tag::read(&mut Cursor::new(data), 2, 1024).unwrap();
        assert_eq!(tag.frames[0].frame_id, "TT2");
        assert_eq!(tag.frames[0].data, b"\0Title");
    }

    #[test]
    fn test_v23_extended_header() {
        let mut body = vec![0, 0, 0, 6, 0, 0, 0, 0, 0, 0];
        body.extend(text_frame_v3("TIT2", "Title"));

        let mut data = header_tail(0, 0x40, body.len() as u32);
        data.extend(&body);

        let tag = Id3v2Tag::read(&mut Cursor::new(data), 3, 1024).unwrap();
        assert_eq!(tag.frames.len(), 1);
        assert_eq!(tag.frames[0].frame_id, "TIT2");
    }

    #[test]
    fn test_remove_unsynchronisation() {
        assert_eq!(remove_unsynchronisation(&[0xFF, 0x00, 0xE0, 0x00]), vec![0xFF, 0xE0, 0x00]);
    }

    #[test]
    fn test_group_byte_is_stripped() {
        let v24 = Id3v2Header::read_after_major(&mut Cursor::new(header_tail(0, 0, 0)), 4).unwrap();
        let data = frame_payload(&v24, 0x0040, b"\x07\x03Title".to_vec()).unwrap();
        assert_eq!(data, b"\x03Title");

        // group byte comes before the data length indicator
        let data = frame_payload(&v24, 0x0041, b"\x07\0\0\0\x06\x03Title".to_vec()).unwrap();
        assert_eq!(data, b"\x03Title");

        let v23 = Id3v2Header::read_after_major(&mut Cursor::new(header_tail(0, 0, 0)), 3).unwrap();
        let data = frame_payload(&v23, 0x0020, b"\x07\0Title".to_vec()).unwrap();
        assert_eq!(data, b"\0Title");
    }

    #[test]
    fn test_v23_unsynchronised_tag_body() {
        // the frame holds 00 'A' FF E0 'B', stored with a 00 after the FF
        let mut frames = b"TIT2\0\0\0\x05\0\0\0A\xFF\0\xE0B".to_vec();
        frames.extend(text_frame_v3("TPE1", "Artist"));

        let mut data = header_tail(0, 0x80, frames.len() as u32);
        data.extend(&frames);

        let mut cursor = Cursor::new(data);
        let tag = Id3v2Tag::read(&mut cursor, 3, 1024).unwrap();
        assert_eq!(tag.frames.len(), 2);
        assert_eq!(tag.frames[0].data, b"\0A\xFF\xE0B");
        assert_eq!(tag.frames[1].frame_id, "TPE1");
        assert_eq!(tag.frames[1].data, b"\0Artist");
        assert_eq!(cursor.position(), 6 + frames.len() as u64);
    }
}

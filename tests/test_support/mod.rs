#![allow(dead_code)]
/// Builders for minimal but structurally complete audio streams.
/// In its own folder so it is not run as an integration test.
use std::io::Cursor;

use tagprobe::{ParseOptions, ParsedStream, Result};

pub fn parse(data: Vec<u8>) -> Result<ParsedStream> {
    tagprobe::classify_and_parse(&mut Cursor::new(data))
}

pub fn parse_with(data: Vec<u8>, options: &ParseOptions) -> Result<ParsedStream> {
    tagprobe::classify_and_parse_with(&mut Cursor::new(data), options)
}

/// Vendor string, comment count, then length-prefixed `KEY=VALUE` entries
pub fn vorbis_comment(vendor: &str, comments: &[&str]) -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(&(vendor.len() as u32).to_le_bytes());
    data.extend_from_slice(vendor.as_bytes());
    data.extend_from_slice(&(comments.len() as u32).to_le_bytes());
    for comment in comments {
        data.extend_from_slice(&(comment.len() as u32).to_le_bytes());
        data.extend_from_slice(comment.as_bytes());
    }
    data
}

// FLAC

pub const FLAC_STREAMINFO: u8 = 0;
pub const FLAC_PADDING: u8 = 1;
pub const FLAC_APPLICATION: u8 = 2;
pub const FLAC_VORBIS_COMMENT: u8 = 4;

pub fn flac_block(block_type: u8, is_last: bool, body: &[u8]) -> Vec<u8> {
    let mut data = vec![block_type | if is_last { 0x80 } else { 0 }];
    data.extend_from_slice(&(body.len() as u32).to_be_bytes()[1..]);
    data.extend_from_slice(body);
    data
}

/// 34-byte STREAMINFO body with 4096-sample blocks and a fixed MD5
pub fn streaminfo(sample_rate: u32, channels: u8, bits_per_sample: u8, total_samples: u64) -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(&4096u16.to_be_bytes());
    data.extend_from_slice(&4096u16.to_be_bytes());
    data.extend_from_slice(&14u32.to_be_bytes()[1..]);
    data.extend_from_slice(&8192u32.to_be_bytes()[1..]);
    let packed = (u64::from(sample_rate) << 44)
        | (u64::from(channels - 1) << 41)
        | (u64::from(bits_per_sample - 1) << 36)
        | total_samples;
    data.extend_from_slice(&packed.to_be_bytes());
    data.extend(0xA0..0xB0u8);
    data
}

pub fn flac(blocks: &[Vec<u8>]) -> Vec<u8> {
    let mut data = b"fLaC".to_vec();
    for block in blocks {
        data.extend_from_slice(block);
    }
    // a few bytes standing in for audio frames
    data.extend_from_slice(&[0xFF, 0xF8, 0x69, 0x08, 0x00, 0x00]);
    data
}

/// 44.1 kHz stereo 16-bit, 5 seconds, tagged with the given comments
pub fn flac_with_comments(comments: &[&str]) -> Vec<u8> {
    flac(&[
        flac_block(FLAC_STREAMINFO, false, &streaminfo(44100, 2, 16, 220_500)),
        flac_block(FLAC_VORBIS_COMMENT, true, &vorbis_comment("reference libFLAC 1.4.3 20230623", comments)),
    ])
}

// MP3

fn synchsafe(value: u32) -> [u8; 4] {
    [
        ((value >> 21) & 0x7F) as u8,
        ((value >> 14) & 0x7F) as u8,
        ((value >> 7) & 0x7F) as u8,
        (value & 0x7F) as u8,
    ]
}

/// UTF-8 text frame for ID3v2.4
pub fn text_frame_v4(id: &str, text: &str) -> Vec<u8> {
    let mut frame = id.as_bytes().to_vec();
    frame.extend_from_slice(&synchsafe(text.len() as u32 + 1));
    frame.extend_from_slice(&[0, 0]);
    frame.push(0x03);
    frame.extend_from_slice(text.as_bytes());
    frame
}

/// ISO-8859-1 text frame for ID3v2.3
pub fn text_frame_v3(id: &str, text: &str) -> Vec<u8> {
    let mut frame = id.as_bytes().to_vec();
    frame.extend_from_slice(&(text.len() as u32 + 1).to_be_bytes());
    frame.extend_from_slice(&[0, 0]);
    frame.push(0x00);
    frame.extend_from_slice(text.as_bytes());
    frame
}

/// ISO-8859-1 text frame for ID3v2.2
pub fn text_frame_v2(id: &str, text: &str) -> Vec<u8> {
    let mut frame = id.as_bytes().to_vec();
    frame.extend_from_slice(&(text.len() as u32 + 1).to_be_bytes()[1..]);
    frame.push(0x00);
    frame.extend_from_slice(text.as_bytes());
    frame
}

/// ID3v2 tag: header with a synchsafe size, the frames, then `padding` zero bytes
pub fn id3_tag(major: u8, flags: u8, body: &[u8], padding: usize) -> Vec<u8> {
    let mut data = b"ID3".to_vec();
    data.extend_from_slice(&[major, 0, flags]);
    data.extend_from_slice(&synchsafe((body.len() + padding) as u32));
    data.extend_from_slice(body);
    data.extend(std::iter::repeat(0u8).take(padding));
    data
}

/// MPEG1 Layer III, 320 kbps, 44.1 kHz, joint stereo
pub const MPEG_HEADER_320K: [u8; 4] = [0xFF, 0xFB, 0xE0, 0x64];

/// First audio frame: header, side information, optional Xing header
pub fn mpeg_frame(header: [u8; 4], xing: Option<(u32, u32)>) -> Vec<u8> {
    let mut data = header.to_vec();
    data.extend_from_slice(&[0u8; 32]);
    if let Some((frames, bytes)) = xing {
        data.extend_from_slice(b"Xing");
        data.extend_from_slice(&0x0000_000Fu32.to_be_bytes());
        data.extend_from_slice(&frames.to_be_bytes());
        data.extend_from_slice(&bytes.to_be_bytes());
        // TOC and quality
        data.extend_from_slice(&[0u8; 104]);
    }
    data.extend_from_slice(&[0u8; 64]);
    data
}

pub fn mp3(tag: Vec<u8>, frame: Vec<u8>) -> Vec<u8> {
    let mut data = tag;
    data.extend(frame);
    data
}

/// The ID3v2.4 frames used by the reference MP3 fixture
pub fn reference_id3v24_frames() -> Vec<u8> {
    [
        text_frame_v4("TPE1", "Artist"),
        text_frame_v4("TALB", "Album"),
        text_frame_v4("TIT2", "Title"),
        text_frame_v4("TRCK", "1"),
        text_frame_v4("TPOS", "1"),
        text_frame_v4("TCON", "Genre"),
        text_frame_v4("TDRC", "2014-01-01"),
        text_frame_v4("TSSE", "MP3FS"),
    ]
    .concat()
}

// Ogg

pub const OGG_CONTINUATION: u8 = 0x01;
pub const OGG_BOS: u8 = 0x02;
pub const OGG_EOS: u8 = 0x04;

pub fn ogg_page(header_type: u8, granule: u64, sequence: u32, lacing: &[u8], body: &[u8]) -> Vec<u8> {
    let mut data = b"OggS".to_vec();
    data.push(0);
    data.push(header_type);
    data.extend_from_slice(&granule.to_le_bytes());
    data.extend_from_slice(&0x1234_5678u32.to_le_bytes());
    data.extend_from_slice(&sequence.to_le_bytes());
    data.extend_from_slice(&[0u8; 4]);
    data.push(lacing.len() as u8);
    data.extend_from_slice(lacing);
    data.extend_from_slice(body);
    data
}

pub fn identification_packet(version: u32, channels: u8, sample_rate: u32, nominal_bitrate: i32) -> Vec<u8> {
    let mut packet = vec![1];
    packet.extend_from_slice(b"vorbis");
    packet.extend_from_slice(&version.to_le_bytes());
    packet.push(channels);
    packet.extend_from_slice(&sample_rate.to_le_bytes());
    packet.extend_from_slice(&0i32.to_le_bytes());
    packet.extend_from_slice(&nominal_bitrate.to_le_bytes());
    packet.extend_from_slice(&0i32.to_le_bytes());
    // blocksizes 2^11 and 2^8
    packet.push(0xB8);
    packet.push(0x01);
    packet
}

pub fn comment_packet(vendor: &str, comments: &[&str]) -> Vec<u8> {
    let mut packet = vec![3];
    packet.extend_from_slice(b"vorbis");
    packet.extend(vorbis_comment(vendor, comments));
    packet.push(0x01);
    packet
}

pub fn setup_packet() -> Vec<u8> {
    let mut packet = vec![5];
    packet.extend_from_slice(b"vorbis");
    packet.extend_from_slice(&[0x42, 0x43, 0x56, 0x01]);
    packet
}

/// Lay `packets` out over pages of at most `segments_per_page` segments,
/// then append a final audio page carrying `final_granule`.
pub fn ogg_stream(packets: &[Vec<u8>], segments_per_page: usize, final_granule: u64) -> Vec<u8> {
    let mut segments: Vec<&[u8]> = Vec::new();
    for packet in packets {
        let mut chunks = packet.chunks(255).collect::<Vec<_>>();
        if packet.len() % 255 == 0 {
            chunks.push(&[]);
        }
        segments.extend(chunks);
    }

    let mut data = Vec::new();
    let mut sequence = 0;
    let mut continued = false;
    for page_segments in segments.chunks(segments_per_page) {
        let lacing: Vec<u8> = page_segments.iter().map(|s| s.len() as u8).collect();
        let body = page_segments.concat();
        let mut header_type = if sequence == 0 { OGG_BOS } else { 0 };
        if continued {
            header_type |= OGG_CONTINUATION;
        }
        data.extend(ogg_page(header_type, 0, sequence, &lacing, &body));
        continued = lacing.last() == Some(&255);
        sequence += 1;
    }

    data.extend(ogg_page(OGG_EOS, final_granule, sequence, &[16], &[0x55; 16]));
    data
}

/// 44.1 kHz stereo at 192 kbps nominal, 5 seconds, tagged with the given comments
pub fn ogg_with_comments(comments: &[&str]) -> Vec<u8> {
    ogg_stream(
        &[
            identification_packet(0, 2, 44100, 192_000),
            comment_packet("Xiph.Org libVorbis I 20150105 (⛄⛄⛄⛄)", comments),
            setup_packet(),
        ],
        255,
        220_500,
    )
}

// FLAC metadata block implementation

use std::io::{self, Read};

use crate::utils::io::read_fields;

/// FLAC metadata block types
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlacMetadataBlockType {
    StreamInfo,
    Padding,
    Application,
    SeekTable,
    VorbisComment,
    CueSheet,
    Picture,
    Reserved(u8),
    Invalid,
}

impl FlacMetadataBlockType {
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            0 => FlacMetadataBlockType::StreamInfo,
            1 => FlacMetadataBlockType::Padding,
            2 => FlacMetadataBlockType::Application,
            3 => FlacMetadataBlockType::SeekTable,
            4 => FlacMetadataBlockType::VorbisComment,
            5 => FlacMetadataBlockType::CueSheet,
            6 => FlacMetadataBlockType::Picture,
            127 => FlacMetadataBlockType::Invalid,
            other => FlacMetadataBlockType::Reserved(other),
        }
    }
}

/// FLAC metadata block header
#[derive(Debug)]
pub struct FlacMetadataBlockHeader {
    pub is_last: bool,
    pub block_type: FlacMetadataBlockType,
    pub length: u32,
}

impl FlacMetadataBlockHeader {
    /// Read the 1+7+24 bit block header
    pub fn read<R: Read>(reader: &mut R) -> io::Result<Self> {
        let [is_last, block_type, length] = read_fields(reader, [1, 7, 24])?;

        Ok(FlacMetadataBlockHeader {
            is_last: is_last == 1,
            block_type: FlacMetadataBlockType::from_byte(block_type as u8),
            length: length as u32,
        })
    }
}

/// STREAMINFO block body
#[derive(Debug, Clone, PartialEq)]
pub struct StreamInfo {
    pub min_block_size: u16,
    pub max_block_size: u16,
    pub min_frame_size: u32,
    pub max_frame_size: u32,
    pub sample_rate: u32,
    /// Stored zero-based on the wire
    pub channels: u8,
    /// Stored zero-based on the wire
    pub bits_per_sample: u8,
    pub total_samples: u64,
    pub md5: [u8; 16],
}

impl StreamInfo {
    /// Size of the STREAMINFO body in bytes
    pub const SIZE: u32 = 34;

    pub fn read<R: Read>(reader: &mut R) -> io::Result<Self> {
        let [min_block, max_block, min_frame, max_frame, sample_rate, channels, bits_per_sample, total_samples] =
            read_fields(&mut *reader, [16, 16, 24, 24, 20, 3, 5, 36])?;

        let mut md5 = [0u8; 16];
        reader.read_exact(&mut md5)?;

        Ok(StreamInfo {
            min_block_size: min_block as u16,
            max_block_size: max_block as u16,
            min_frame_size: min_frame as u32,
            max_frame_size: max_frame as u32,
            sample_rate: sample_rate as u32,
            channels: channels as u8 + 1,
            bits_per_sample: bits_per_sample as u8 + 1,
            total_samples,
            md5,
        })
    }

    /// MD5 of the decoded audio as lowercase hex
    pub fn md5_hex(&self) -> String {
        self.md5.iter().map(|b| format!("{b:02x}")).collect()
    }
}

/// FLAC file signature
pub const FLAC_SIGNATURE: &[u8; 4] = b"fLaC";

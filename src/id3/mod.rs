// ID3 metadata handling module
pub mod frames;
pub mod v2;

pub use v2::{Id3Frame, Id3v2Header, Id3v2Tag};

// ID3v2 signature
pub const ID3_SIGNATURE: &[u8; 3] = b"ID3";

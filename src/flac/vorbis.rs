// Vorbis comment reader, shared by FLAC's VORBIS_COMMENT block and the Ogg
// Vorbis comment header

use std::collections::HashMap;
use std::io::{self, Read};

use crate::utils::io::{read_le_u32, read_vec};

/// Vorbis comment structure
#[derive(Debug, Default)]
pub struct VorbisComment {
    pub vendor_string: String,
    /// Comments keyed by their uppercased field name
    pub comments: HashMap<String, String>,
}

impl VorbisComment {
    /// Read Vorbis comment from reader
    pub fn read<R: Read>(reader: &mut R) -> io::Result<Self> {
        let vendor_length = read_le_u32(reader)? as usize;
        let vendor_string = String::from_utf8_lossy(&read_vec(reader, vendor_length)?).into_owned();

        let comment_count = read_le_u32(reader)?;
        let mut comments = HashMap::new();
        for _ in 0..comment_count {
            let comment_length = read_le_u32(reader)? as usize;
            let comment = read_vec(reader, comment_length)?;
            let comment = String::from_utf8_lossy(&comment);

            // FIELD=value, the value may itself contain '='
            match comment.split_once('=') {
                Some((field, value)) => {
                    comments.insert(field.to_uppercase(), value.to_string());
                }
                None => tracing::debug!(%comment, "ignoring vorbis comment without '='"),
            }
        }

        Ok(VorbisComment {
            vendor_string,
            comments,
        })
    }
}

/// Serialize a comment block; used to build fixtures in tests
#[cfg(test)]
pub(crate) fn comment_bytes(vendor: &str, comments: &[&str]) -> Vec<u8> {
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

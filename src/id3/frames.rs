// ID3 frame decoding

use crate::field_mapping::{FieldMappings, StandardField};
use crate::id3::v2::Id3Frame;
use crate::utils::encoding::{decode_text, split_terminated, TextEncoding};

/// Whether the frame is a user-defined text frame
pub fn is_user_text(frame: &Id3Frame) -> bool {
    matches!(frame.frame_id.as_str(), "TXXX" | "TXX")
}

/// Split a text frame payload into its values.
///
/// 2.4 separates multiple values with a terminator of the encoding's width,
/// and each UTF-16 value carries its own BOM, so values are decoded one by one.
fn text_values(mut payload: &[u8], encoding: TextEncoding) -> Vec<String> {
    let mut values = Vec::new();
    while !payload.is_empty() {
        let (value, rest) = split_terminated(payload, encoding);
        if !value.is_empty() {
            values.push(value);
        }
        payload = rest;
    }
    values
}

/// Turn a frame into a `(TAG NAME, value)` pair.
///
/// Known frames map to their standard field name. `TXXX` frames are keyed by
/// their description, other text frames by their frame ID. Comment frames
/// with a description are kept as `COMMENT:<DESCRIPTION>` so they do not
/// shadow the plain comment. Non-text frames yield `None`.
pub fn tag_entry(frame: &Id3Frame) -> Option<(String, String)> {
    let (&encoding, payload) = frame.data.split_first()?;
    let encoding = TextEncoding::from_byte(encoding);

    match frame.frame_id.as_str() {
        "TXXX" | "TXX" => {
            let (description, value) = split_terminated(payload, encoding);
            if description.is_empty() {
                return None;
            }
            Some((description.to_uppercase(), decode_text(value, encoding)))
        }
        "COMM" | "COM" => {
            // 3-byte language code precedes the description
            let payload = payload.get(3..)?;
            let (description, text) = split_terminated(payload, encoding);
            let text = decode_text(text, encoding);
            if description.is_empty() {
                Some((StandardField::Comment.as_str().to_string(), text))
            } else {
                Some((format!("COMMENT:{}", description.to_uppercase()), text))
            }
        }
        frame_id if frame_id.starts_with('T') => {
            let key = match FieldMappings::from_id3v2(frame_id) {
                Some(field) => field.as_str().to_string(),
                None => frame_id.to_string(),
            };
            Some((key, text_values(payload, encoding).join("; ")))
        }
        _ => None,
    }
}

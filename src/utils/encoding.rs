// Encoding utilities

use encoding_rs::{UTF_16BE, UTF_16LE, UTF_8, WINDOWS_1252};

/// ID3v2 text encoding byte
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextEncoding {
    Iso8859_1 = 0,
    Utf16 = 1,
    Utf16BE = 2,
    Utf8 = 3,
}

impl TextEncoding {
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            1 => TextEncoding::Utf16,
            2 => TextEncoding::Utf16BE,
            3 => TextEncoding::Utf8,
            _ => TextEncoding::Iso8859_1,
        }
    }

    /// Width of the string terminator in this encoding
    fn terminator_len(self) -> usize {
        match self {
            TextEncoding::Utf16 | TextEncoding::Utf16BE => 2,
            TextEncoding::Iso8859_1 | TextEncoding::Utf8 => 1,
        }
    }
}

/// Decode text with specified encoding, dropping trailing NULs
pub fn decode_text(data: &[u8], encoding: TextEncoding) -> String {
    let text = match encoding {
        TextEncoding::Iso8859_1 => WINDOWS_1252.decode(data).0,
        TextEncoding::Utf16 => match data {
            [0xFF, 0xFE, rest @ ..] => UTF_16LE.decode_without_bom_handling(rest).0,
            [0xFE, 0xFF, rest @ ..] => UTF_16BE.decode_without_bom_handling(rest).0,
            _ => UTF_16LE.decode_without_bom_handling(data).0,
        },
        TextEncoding::Utf16BE => UTF_16BE.decode_without_bom_handling(data).0,
        TextEncoding::Utf8 => UTF_8.decode(data).0,
    };
    text.trim_end_matches('\0').to_string()
}

/// Split off a terminated string from the front of `data`.
///
/// Returns the decoded string and the bytes following its terminator. For the
/// UTF-16 encodings the terminator is searched on 2-byte boundaries. Without a
/// terminator the whole input is the string and the remainder is empty.
pub fn split_terminated(data: &[u8], encoding: TextEncoding) -> (String, &[u8]) {
    let width = encoding.terminator_len();
    let end = data
        .chunks(width)
        .position(|unit| unit.len() == width && unit.iter().all(|&b| b == 0))
        .map(|index| index * width);

    match end {
        Some(end) => (decode_text(&data[..end], encoding), &data[end + width..]),
        None => (decode_text(data, encoding), &data[data.len()..]),
    }
}

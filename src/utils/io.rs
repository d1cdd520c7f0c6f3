// I/O utilities for reading audio files

use bitstream_io::{BigEndian, BitRead, BitReader};
use std::io::{self, Read, Seek, SeekFrom};

/// Read `N` unsigned bit-fields from `reader`, most significant bit first.
///
/// Each width must be in `1..=64`. Exactly `widths.iter().sum()` bits are
/// consumed; bytes are pulled from `reader` only as the fields need them, so
/// the position afterwards is the byte holding the last requested bit. Any
/// bits left over in that final byte are discarded.
///
/// ```ignore
/// let [is_last, block_type, length] = read_fields(&mut reader, [1, 7, 24])?;
/// ```
pub fn read_fields<R: Read, const N: usize>(reader: R, widths: [u32; N]) -> io::Result<[u64; N]> {
    if let Some(width) = widths.iter().find(|w| !(1..=64).contains(*w)) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("bit-field width {width} outside 1..=64"),
        ));
    }

    let mut bits = BitReader::endian(reader, BigEndian);
    let mut fields = [0u64; N];
    for (field, &width) in fields.iter_mut().zip(widths.iter()) {
        *field = bits.read_var::<u64>(width)?;
    }
    Ok(fields)
}

/// Read a single byte
pub fn read_u8<R: Read>(reader: &mut R) -> io::Result<u8> {
    let mut buffer = [0u8; 1];
    reader.read_exact(&mut buffer)?;
    Ok(buffer[0])
}

/// Read big-endian 32-bit integer
pub fn read_be_u32<R: Read>(reader: &mut R) -> io::Result<u32> {
    let mut buffer = [0u8; 4];
    reader.read_exact(&mut buffer)?;
    Ok(u32::from_be_bytes(buffer))
}

/// Read little-endian 32-bit integer
pub fn read_le_u32<R: Read>(reader: &mut R) -> io::Result<u32> {
    let mut buffer = [0u8; 4];
    reader.read_exact(&mut buffer)?;
    Ok(u32::from_le_bytes(buffer))
}

/// Read little-endian 64-bit integer
pub fn read_le_u64<R: Read>(reader: &mut R) -> io::Result<u64> {
    let mut buffer = [0u8; 8];
    reader.read_exact(&mut buffer)?;
    Ok(u64::from_le_bytes(buffer))
}

/// Decode a synchsafe integer (7 significant bits per byte)
pub fn synchsafe(value: u32) -> u32 {
    ((value & 0x7F00_0000) >> 3)
        | ((value & 0x007F_0000) >> 2)
        | ((value & 0x0000_7F00) >> 1)
        | (value & 0x0000_007F)
}

/// Read exactly `len` bytes into a new buffer.
///
/// The buffer grows with the data actually read, so a corrupt length field
/// cannot force a huge allocation up front.
pub fn read_vec<R: Read>(reader: &mut R, len: usize) -> io::Result<Vec<u8>> {
    let mut data = Vec::with_capacity(len.min(64 * 1024));
    reader.by_ref().take(len as u64).read_to_end(&mut data)?;
    if data.len() != len {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("expected {len} bytes, stream ended after {}", data.len()),
        ));
    }
    Ok(data)
}

/// Seek forward (or backward) relative to the current position
pub fn skip<R: Seek>(reader: &mut R, offset: i64) -> io::Result<u64> {
    reader.seek(SeekFrom::Current(offset))
}

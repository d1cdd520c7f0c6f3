use std::io::Read;

use crate::error::{Result, TagError};
use crate::ogg::{FORMAT_NAME, OGG_HEADER_TYPE_CONTINUATION, OGG_SIGNATURE};
use crate::utils::io::{read_le_u32, read_le_u64, read_u8, read_vec};

/// Ogg page header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OggPageHeader {
    pub version: u8,
    pub header_type: u8,
    pub granule_position: u64,
    pub bitstream_serial: u32,
    pub page_sequence: u32,
    pub checksum: u32,
    pub segment_table: Vec<u8>,
}

impl OggPageHeader {
    /// Fixed part of the header, before the segment table
    pub const SIZE: usize = 27;

    /// Read a page header including its segment table.
    ///
    /// With `skip_magic` the capture pattern is assumed to have been consumed
    /// already.
    pub fn read<R: Read>(reader: &mut R, skip_magic: bool) -> Result<Self> {
        if !skip_magic {
            let mut magic = [0u8; 4];
            reader.read_exact(&mut magic)?;
            if &magic != OGG_SIGNATURE {
                return Err(TagError::invalid(FORMAT_NAME, "missing Ogg capture pattern"));
            }
        }

        let version = read_u8(reader)?;
        if version != 0 {
            return Err(TagError::invalid(FORMAT_NAME, format!("Ogg page version {version}, expected 0")));
        }

        let header_type = read_u8(reader)?;
        let granule_position = read_le_u64(reader)?;
        let bitstream_serial = read_le_u32(reader)?;
        let page_sequence = read_le_u32(reader)?;
        let checksum = read_le_u32(reader)?;
        let segment_count = read_u8(reader)?;
        let segment_table = read_vec(reader, usize::from(segment_count))?;

        Ok(OggPageHeader {
            version,
            header_type,
            granule_position,
            bitstream_serial,
            page_sequence,
            checksum,
            segment_table,
        })
    }

    /// Total size of the page body
    pub fn data_size(&self) -> usize {
        self.segment_table.iter().map(|&x| usize::from(x)).sum()
    }

    pub fn is_continuation(&self) -> bool {
        self.header_type & OGG_HEADER_TYPE_CONTINUATION != 0
    }
}

/// Reassembles packets from consecutive pages.
///
/// A lacing value of 255 means the packet continues in the next segment,
/// possibly on the next page; anything smaller ends it.
pub struct PacketReader<R> {
    reader: R,
    segments: std::vec::IntoIter<u8>,
    max_packet_size: usize,
}

impl<R: Read> PacketReader<R> {
    /// Start reading packets from the body of the page whose header was just read
    pub fn new(reader: R, page: OggPageHeader, max_packet_size: usize) -> Self {
        PacketReader {
            reader,
            segments: page.segment_table.into_iter(),
            max_packet_size,
        }
    }

    pub fn next_packet(&mut self) -> Result<Vec<u8>> {
        let mut packet = Vec::new();
        loop {
            let Some(lacing) = self.segments.next() else {
                let page = OggPageHeader::read(&mut self.reader, false)?;
                if !packet.is_empty() && !page.is_continuation() {
                    return Err(TagError::invalid(
                        FORMAT_NAME,
                        format!("page {} does not continue the open packet", page.page_sequence),
                    ));
                }
                tracing::trace!(sequence = page.page_sequence, size = page.data_size(), "next Ogg page");
                self.segments = page.segment_table.into_iter();
                continue;
            };

            if packet.len() + usize::from(lacing) > self.max_packet_size {
                return Err(TagError::invalid(
                    FORMAT_NAME,
                    format!("header packet exceeds {} bytes", self.max_packet_size),
                ));
            }
            packet.extend(read_vec(&mut self.reader, usize::from(lacing))?);
            if lacing < 255 {
                return Ok(packet);
            }
        }
    }
}

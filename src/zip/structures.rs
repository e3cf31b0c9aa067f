use byteorder::{LittleEndian, ReadBytesExt};
use std::io::Cursor;

use crate::error::{ChatzipError, Result};

/// ZIP compression methods.
///
/// Chat exports only ever use stored or deflate; anything else is carried as
/// [`CompressionMethod::Unsupported`] so the caller can skip the entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMethod {
    Stored,
    Deflate,
    Unsupported(u16),
}

impl CompressionMethod {
    pub fn from_u16(value: u16) -> Self {
        match value {
            0 => CompressionMethod::Stored,
            8 => CompressionMethod::Deflate,
            _ => CompressionMethod::Unsupported(value),
        }
    }

    pub fn as_u16(&self) -> u16 {
        match self {
            CompressionMethod::Stored => 0,
            CompressionMethod::Deflate => 8,
            CompressionMethod::Unsupported(v) => *v,
        }
    }
}

/// End of Central Directory (EOCD) - 22 bytes minimum
#[derive(Debug)]
pub struct EndOfCentralDirectory {
    pub disk_number: u16,
    pub disk_with_cd: u16,
    pub disk_entries: u16,
    pub total_entries: u16,
    pub cd_size: u32,
    pub cd_offset: u32,
    pub comment_len: u16,
}

impl EndOfCentralDirectory {
    pub const SIGNATURE: &'static [u8] = b"PK\x05\x06";
    pub const SIZE: usize = 22;

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < Self::SIZE || &data[0..4] != Self::SIGNATURE {
            return Err(ChatzipError::EocdNotFound);
        }

        let mut cursor = Cursor::new(&data[4..]);

        Ok(Self {
            disk_number: cursor.read_u16::<LittleEndian>()?,
            disk_with_cd: cursor.read_u16::<LittleEndian>()?,
            disk_entries: cursor.read_u16::<LittleEndian>()?,
            total_entries: cursor.read_u16::<LittleEndian>()?,
            cd_size: cursor.read_u32::<LittleEndian>()?,
            cd_offset: cursor.read_u32::<LittleEndian>()?,
            comment_len: cursor.read_u16::<LittleEndian>()?,
        })
    }
}

/// Central Directory File Header (CDFH) - 46 bytes minimum
pub const CDFH_SIGNATURE: &[u8] = b"PK\x01\x02";
pub const CDFH_MIN_SIZE: usize = 46;

/// Local File Header (LFH) - 30 bytes
pub const LFH_SIGNATURE: &[u8] = b"PK\x03\x04";
pub const LFH_SIZE: usize = 30;

/// One central directory entry, immutable once parsed.
#[derive(Debug, Clone)]
pub struct CentralDirectoryEntry {
    pub file_name: String,
    pub compression_method: CompressionMethod,
    pub compressed_size: u32,
    pub uncompressed_size: u32,
    pub crc32: u32,
    pub local_header_offset: u32,
    pub is_directory: bool,
}

/// Decode an archive entry name: UTF-8 when valid, byte-wise Latin-1
/// otherwise. Never fails, so a single oddly-encoded name cannot abort a
/// central directory parse.
pub fn decode_entry_name(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compression_method_round_trips() {
        assert_eq!(CompressionMethod::from_u16(0), CompressionMethod::Stored);
        assert_eq!(CompressionMethod::from_u16(8), CompressionMethod::Deflate);
        assert_eq!(
            CompressionMethod::from_u16(12),
            CompressionMethod::Unsupported(12)
        );
        assert_eq!(CompressionMethod::Unsupported(99).as_u16(), 99);
    }

    #[test]
    fn eocd_from_bytes_reads_cd_fields() {
        let mut data = Vec::new();
        data.extend_from_slice(EndOfCentralDirectory::SIGNATURE);
        data.extend_from_slice(&0u16.to_le_bytes()); // disk number
        data.extend_from_slice(&0u16.to_le_bytes()); // disk with cd
        data.extend_from_slice(&3u16.to_le_bytes()); // disk entries
        data.extend_from_slice(&3u16.to_le_bytes()); // total entries
        data.extend_from_slice(&1234u32.to_le_bytes()); // cd size
        data.extend_from_slice(&5678u32.to_le_bytes()); // cd offset
        data.extend_from_slice(&0u16.to_le_bytes()); // comment len

        let eocd = EndOfCentralDirectory::from_bytes(&data).expect("parse");
        assert_eq!(eocd.total_entries, 3);
        assert_eq!(eocd.cd_size, 1234);
        assert_eq!(eocd.cd_offset, 5678);
        assert_eq!(eocd.comment_len, 0);
    }

    #[test]
    fn eocd_from_bytes_rejects_bad_signature() {
        let data = [0u8; 22];
        assert!(matches!(
            EndOfCentralDirectory::from_bytes(&data),
            Err(ChatzipError::EocdNotFound)
        ));
    }

    #[test]
    fn entry_name_decoding_utf8_and_latin1() {
        assert_eq!(decode_entry_name(b"inbox/sam_12345"), "inbox/sam_12345");
        // 0xE9 is 'é' in Latin-1 and invalid as a lone UTF-8 byte
        assert_eq!(decode_entry_name(&[b'r', 0xE9, b'p']), "r\u{e9}p");
    }
}

//! Low-level ZIP archive parser.
//!
//! This module handles the binary parsing of ZIP file structures,
//! reading from any source that implements the [`ReadAt`] trait.
//!
//! ## Parsing Strategy
//!
//! ZIP files are designed to be read from the end:
//! 1. Find the End of Central Directory (EOCD) at the file's tail
//! 2. Read the Central Directory to get metadata for all files
//! 3. For extraction, read each file's Local File Header and data
//!
//! Every read is a small, position-addressed range, so arbitrarily large
//! archives are handled without ever loading them whole. The memory ceilings
//! below are deliberate: the target hosts are memory-constrained, and an
//! archive that would blow past them must fail fast instead of degrading.

use byteorder::{LittleEndian, ReadBytesExt};
use log::{debug, warn};
use std::io::{Cursor, Read};
use std::sync::Arc;

use crate::error::{ChatzipError, Result};
use crate::io::{ReadAt, read_range};

use super::structures::*;

/// Tail window scanned for the EOCD signature. The EOCD record is 22 bytes
/// plus a comment of at most 64 KiB, so 128 KiB bounds the worst case with
/// margin.
pub const TAIL_SCAN_WINDOW: u64 = 128 * 1024;

/// Ceiling on the central directory size loaded into memory.
pub const MAX_CENTRAL_DIRECTORY_BYTES: u64 = 2 * 1024 * 1024;

/// Window read at a local header offset. The fixed header is 30 bytes; the
/// extra room tolerates long names and extra fields without a second read.
const LFH_WINDOW: u64 = 200;

/// Low-level ZIP file parser.
///
/// Generic over the reader type so the same code serves local files and
/// in-memory buffers. Typically used through
/// [`ZipExtractor`](super::ZipExtractor) rather than directly.
pub struct ZipParser<R: ReadAt> {
    /// The underlying data source
    reader: Arc<R>,
    /// Total size of the archive in bytes
    size: u64,
}

impl<R: ReadAt> ZipParser<R> {
    pub fn new(reader: Arc<R>) -> Self {
        let size = reader.size();
        Self { reader, size }
    }

    /// Find and parse the End of Central Directory record.
    ///
    /// Reads the last `min(128 KiB, size)` bytes and scans backward for the
    /// `PK\x05\x06` signature. A candidate only counts when its comment-length
    /// field matches the bytes remaining after it, which rules out a stray
    /// signature inside the archive comment.
    ///
    /// # Errors
    ///
    /// [`ChatzipError::EocdNotFound`] when no valid record exists in the
    /// window: the input is not a conformant non-ZIP64 ZIP, or is truncated.
    pub async fn find_eocd(&self) -> Result<(EndOfCentralDirectory, u64)> {
        let window = TAIL_SCAN_WINDOW.min(self.size);
        if (window as usize) < EndOfCentralDirectory::SIZE {
            return Err(ChatzipError::EocdNotFound);
        }

        let window_start = self.size - window;
        let buf = read_range(self.reader.as_ref(), window_start, window).await?;

        for i in (0..=buf.len() - EndOfCentralDirectory::SIZE).rev() {
            if &buf[i..i + 4] != EndOfCentralDirectory::SIGNATURE {
                continue;
            }
            let comment_len = u16::from_le_bytes([buf[i + 20], buf[i + 21]]) as usize;
            if comment_len == buf.len() - i - EndOfCentralDirectory::SIZE {
                let eocd =
                    EndOfCentralDirectory::from_bytes(&buf[i..i + EndOfCentralDirectory::SIZE])?;
                return Ok((eocd, window_start + i as u64));
            }
        }

        Err(ChatzipError::EocdNotFound)
    }

    /// List all entries in the archive's central directory, in archive order.
    ///
    /// The directory block is loaded with a single range read, capped at
    /// [`MAX_CENTRAL_DIRECTORY_BYTES`], then scanned sequentially. A byte
    /// position that does not carry the `PK\x01\x02` signature is treated as
    /// padding and skipped one byte at a time rather than aborting; malformed
    /// archives are routine share-intent inputs.
    pub async fn list_entries(&self) -> Result<Vec<CentralDirectoryEntry>> {
        let (eocd, _) = self.find_eocd().await?;

        let cd_size = u64::from(eocd.cd_size);
        if cd_size > MAX_CENTRAL_DIRECTORY_BYTES {
            return Err(ChatzipError::CentralDirectoryTooLarge {
                size: cd_size,
                limit: MAX_CENTRAL_DIRECTORY_BYTES,
            });
        }

        let cd_data = read_range(self.reader.as_ref(), u64::from(eocd.cd_offset), cd_size).await?;
        debug!(
            "central directory: {} bytes at offset {}, {} entries declared",
            eocd.cd_size, eocd.cd_offset, eocd.total_entries
        );

        Ok(self.scan_central_directory(&cd_data))
    }

    /// Sequentially decode central directory records from a loaded block.
    fn scan_central_directory(&self, block: &[u8]) -> Vec<CentralDirectoryEntry> {
        let mut entries = Vec::new();
        let mut pos = 0usize;

        while pos + CDFH_MIN_SIZE <= block.len() {
            if &block[pos..pos + 4] != CDFH_SIGNATURE {
                // Resync: advance one byte until the next record signature
                pos += 1;
                continue;
            }

            match self.parse_cdfh(&block[pos..]) {
                Some((entry, record_len)) => {
                    if let Some(entry) = self.validate_entry(entry) {
                        entries.push(entry);
                    }
                    pos += record_len;
                }
                None => {
                    // Record extends past the block: the directory is
                    // truncated, nothing further can be decoded
                    break;
                }
            }
        }

        entries
    }

    /// Parse one Central Directory File Header at the start of `record`.
    ///
    /// Returns the entry and the total record length (fixed header plus
    /// name, extra field, and comment), or `None` when the record is cut off
    /// by the end of the block.
    fn parse_cdfh(&self, record: &[u8]) -> Option<(CentralDirectoryEntry, usize)> {
        let mut cursor = Cursor::new(&record[4..]);

        let _version_made_by = cursor.read_u16::<LittleEndian>().ok()?;
        let _version_needed = cursor.read_u16::<LittleEndian>().ok()?;
        let _flags = cursor.read_u16::<LittleEndian>().ok()?;
        let compression_method = cursor.read_u16::<LittleEndian>().ok()?;
        let _last_mod_time = cursor.read_u16::<LittleEndian>().ok()?;
        let _last_mod_date = cursor.read_u16::<LittleEndian>().ok()?;
        let crc32 = cursor.read_u32::<LittleEndian>().ok()?;
        let compressed_size = cursor.read_u32::<LittleEndian>().ok()?;
        let uncompressed_size = cursor.read_u32::<LittleEndian>().ok()?;
        let file_name_len = cursor.read_u16::<LittleEndian>().ok()? as usize;
        let extra_len = cursor.read_u16::<LittleEndian>().ok()? as usize;
        let comment_len = cursor.read_u16::<LittleEndian>().ok()? as usize;
        let _disk_number_start = cursor.read_u16::<LittleEndian>().ok()?;
        let _internal_attrs = cursor.read_u16::<LittleEndian>().ok()?;
        let _external_attrs = cursor.read_u32::<LittleEndian>().ok()?;
        let local_header_offset = cursor.read_u32::<LittleEndian>().ok()?;

        let record_len = CDFH_MIN_SIZE + file_name_len + extra_len + comment_len;
        if record_len > record.len() {
            return None;
        }

        let mut file_name_bytes = vec![0u8; file_name_len];
        cursor.read_exact(&mut file_name_bytes).ok()?;
        let file_name = decode_entry_name(&file_name_bytes);
        let is_directory = file_name.ends_with('/');

        Some((
            CentralDirectoryEntry {
                file_name,
                compression_method: CompressionMethod::from_u16(compression_method),
                compressed_size,
                uncompressed_size,
                crc32,
                local_header_offset,
                is_directory,
            },
            record_len,
        ))
    }

    /// Enforce entry invariants: names carry no NUL and local header offsets
    /// lie inside the archive. Violations are skipped, not fatal.
    fn validate_entry(&self, entry: CentralDirectoryEntry) -> Option<CentralDirectoryEntry> {
        if entry.file_name.contains('\0') {
            warn!("skipping entry with embedded NUL in name");
            return None;
        }
        if u64::from(entry.local_header_offset) >= self.size {
            warn!(
                "skipping entry '{}': local header offset {} beyond archive size {}",
                entry.file_name, entry.local_header_offset, self.size
            );
            return None;
        }
        Some(entry)
    }

    /// Resolve the absolute byte range of an entry's compressed payload.
    ///
    /// The central directory knows the local header offset, but the exact
    /// payload start depends on the local header's own variable-length name
    /// and extra field, which may differ from the directory's copy. One
    /// windowed read at the header resolves both lengths.
    ///
    /// # Errors
    ///
    /// [`ChatzipError::LocalHeaderInvalid`] when the signature check fails,
    /// [`ChatzipError::OutOfBounds`] when the resolved payload range leaves
    /// the archive.
    pub async fn resolve_payload(&self, entry: &CentralDirectoryEntry) -> Result<(u64, u64)> {
        let offset = u64::from(entry.local_header_offset);
        let window = LFH_WINDOW.min(self.size.saturating_sub(offset));
        if window < LFH_SIZE as u64 {
            return Err(ChatzipError::LocalHeaderInvalid { offset });
        }

        let buf = read_range(self.reader.as_ref(), offset, window).await?;
        if &buf[0..4] != LFH_SIGNATURE {
            return Err(ChatzipError::LocalHeaderInvalid { offset });
        }

        let file_name_len = u64::from(u16::from_le_bytes([buf[26], buf[27]]));
        let extra_len = u64::from(u16::from_le_bytes([buf[28], buf[29]]));

        let payload_start = offset + LFH_SIZE as u64 + file_name_len + extra_len;
        let payload_len = u64::from(entry.compressed_size);
        if payload_start + payload_len > self.size {
            return Err(ChatzipError::OutOfBounds {
                offset: payload_start,
                length: payload_len,
                size: self.size,
            });
        }

        Ok((payload_start, payload_len))
    }

    /// Get a reference to the underlying reader.
    pub fn reader(&self) -> &Arc<R> {
        &self.reader
    }
}

use std::io::Read;
use std::sync::Arc;

use flate2::read::DeflateDecoder;
use log::warn;

use crate::error::{ChatzipError, Result};
use crate::io::{ReadAt, read_range};

use super::parser::ZipParser;
use super::structures::{CentralDirectoryEntry, CompressionMethod};

/// High-level archive reader: entry listing plus per-entry decompression.
///
/// Only one entry's compressed bytes are resident at a time; the archive
/// itself is never loaded whole.
pub struct ZipExtractor<R: ReadAt> {
    parser: ZipParser<R>,
}

impl<R: ReadAt> ZipExtractor<R> {
    pub fn new(reader: Arc<R>) -> Self {
        Self {
            parser: ZipParser::new(reader),
        }
    }

    /// List all entries in the archive, in archive order.
    pub async fn list_entries(&self) -> Result<Vec<CentralDirectoryEntry>> {
        self.parser.list_entries().await
    }

    /// Read and decompress one entry into memory.
    ///
    /// Stored entries are returned as-is; deflate entries are raw-inflated.
    ///
    /// # Errors
    ///
    /// [`ChatzipError::UnsupportedCompression`] for any other method; callers
    /// skip that entry rather than aborting unrelated work.
    pub async fn read_entry(&self, entry: &CentralDirectoryEntry) -> Result<Vec<u8>> {
        if let CompressionMethod::Unsupported(method) = entry.compression_method {
            return Err(ChatzipError::UnsupportedCompression { method });
        }

        let (payload_start, payload_len) = self.parser.resolve_payload(entry).await?;
        let compressed =
            read_range(self.parser.reader().as_ref(), payload_start, payload_len).await?;

        if entry.compression_method == CompressionMethod::Stored {
            return Ok(compressed);
        }

        let mut data = Vec::with_capacity(entry.uncompressed_size as usize);
        DeflateDecoder::new(compressed.as_slice()).read_to_end(&mut data)?;
        if data.len() as u64 != u64::from(entry.uncompressed_size) {
            warn!(
                "entry '{}': inflated to {} bytes, directory declared {}",
                entry.file_name,
                data.len(),
                entry.uncompressed_size
            );
        }
        Ok(data)
    }
}

mod local;
mod memory;

pub use local::LocalFileReader;
pub use memory::MemoryReader;

use async_trait::async_trait;

use crate::error::{ChatzipError, Result};

/// Trait for random access reading from an archive source.
///
/// This is the sole I/O seam of the pipeline: every central-directory,
/// local-header, and payload read goes through it, and its calls are the only
/// suspension points in an ingestion.
#[async_trait]
pub trait ReadAt: Send + Sync {
    /// Read data at the specified offset into the buffer
    async fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<usize>;

    /// Get the total size of the data source
    fn size(&self) -> u64;
}

/// Read exactly `length` bytes at `offset`, bounds-checked against the
/// source size before any I/O is issued.
pub async fn read_range<R: ReadAt + ?Sized>(
    reader: &R,
    offset: u64,
    length: u64,
) -> Result<Vec<u8>> {
    let size = reader.size();
    if offset.checked_add(length).is_none_or(|end| end > size) {
        return Err(ChatzipError::OutOfBounds {
            offset,
            length,
            size,
        });
    }

    let mut buf = vec![0u8; length as usize];
    let mut filled = 0usize;
    while filled < buf.len() {
        let n = reader
            .read_at(offset + filled as u64, &mut buf[filled..])
            .await?;
        if n == 0 {
            return Err(ChatzipError::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                format!(
                    "source ended {} bytes short of requested range",
                    buf.len() - filled
                ),
            )));
        }
        filled += n;
    }

    Ok(buf)
}

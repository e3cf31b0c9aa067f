use async_trait::async_trait;

use super::ReadAt;
use crate::error::Result;

/// In-memory archive buffer with random access support.
///
/// Backs the alternate input path where the caller already holds the whole
/// archive as bytes, and serves as the test double for everything layered on
/// [`ReadAt`].
pub struct MemoryReader {
    data: Vec<u8>,
}

impl MemoryReader {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }
}

#[async_trait]
impl ReadAt for MemoryReader {
    async fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<usize> {
        let start = (offset.min(self.data.len() as u64)) as usize;
        let end = (start + buf.len()).min(self.data.len());
        let n = end - start;
        buf[..n].copy_from_slice(&self.data[start..end]);
        Ok(n)
    }

    fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

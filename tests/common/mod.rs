//! In-memory ZIP writer for test archives.
//!
//! Writes the minimal structures the reader consumes: local file headers
//! with stored or raw-deflate payloads, a central directory, and an EOCD
//! record (optionally with a comment or padding between directory records).

#![allow(dead_code)]

use std::io::Write;

use flate2::Compression;
use flate2::write::DeflateEncoder;

struct PendingEntry {
    name: String,
    method: u16,
    crc32: u32,
    compressed_size: u32,
    uncompressed_size: u32,
    lfh_offset: u32,
}

pub struct BuiltZip {
    pub bytes: Vec<u8>,
    pub cd_offset: u32,
    pub cd_size: u32,
}

#[derive(Default)]
pub struct ZipBuilder {
    data: Vec<u8>,
    entries: Vec<PendingEntry>,
    comment: Vec<u8>,
    cd_padding: usize,
}

impl ZipBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an archive comment after the EOCD record.
    pub fn comment(mut self, comment: &str) -> Self {
        self.comment = comment.as_bytes().to_vec();
        self
    }

    /// Insert zero padding before each central directory record.
    pub fn cd_padding(mut self, padding: usize) -> Self {
        self.cd_padding = padding;
        self
    }

    pub fn add_stored(mut self, name: &str, content: &[u8]) -> Self {
        self.push_entry(name, 0, content, content, content.len() as u32);
        self
    }

    pub fn add_deflate(mut self, name: &str, content: &[u8]) -> Self {
        let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(content).expect("deflate write");
        let compressed = encoder.finish().expect("deflate finish");
        self.push_entry(name, 8, content, &compressed, content.len() as u32);
        self
    }

    /// Add an entry claiming an arbitrary compression method; the payload is
    /// written as given.
    pub fn add_with_method(mut self, name: &str, method: u16, payload: &[u8]) -> Self {
        self.push_entry(name, method, payload, payload, payload.len() as u32);
        self
    }

    fn push_entry(
        &mut self,
        name: &str,
        method: u16,
        original: &[u8],
        payload: &[u8],
        uncompressed_size: u32,
    ) {
        let mut crc = flate2::Crc::new();
        crc.update(original);

        let lfh_offset = self.data.len() as u32;

        // Local file header
        self.data.extend_from_slice(b"PK\x03\x04");
        self.data.extend_from_slice(&20u16.to_le_bytes()); // version needed
        self.data.extend_from_slice(&0u16.to_le_bytes()); // flags
        self.data.extend_from_slice(&method.to_le_bytes());
        self.data.extend_from_slice(&0u16.to_le_bytes()); // mod time
        self.data.extend_from_slice(&0u16.to_le_bytes()); // mod date
        self.data.extend_from_slice(&crc.sum().to_le_bytes());
        self.data
            .extend_from_slice(&(payload.len() as u32).to_le_bytes());
        self.data.extend_from_slice(&uncompressed_size.to_le_bytes());
        self.data
            .extend_from_slice(&(name.len() as u16).to_le_bytes());
        self.data.extend_from_slice(&0u16.to_le_bytes()); // extra len
        self.data.extend_from_slice(name.as_bytes());
        self.data.extend_from_slice(payload);

        self.entries.push(PendingEntry {
            name: name.to_string(),
            method,
            crc32: crc.sum(),
            compressed_size: payload.len() as u32,
            uncompressed_size,
            lfh_offset,
        });
    }

    pub fn finish(mut self) -> BuiltZip {
        let cd_offset = self.data.len() as u32;

        for entry in &self.entries {
            self.data.extend(std::iter::repeat_n(0u8, self.cd_padding));

            self.data.extend_from_slice(b"PK\x01\x02");
            self.data.extend_from_slice(&20u16.to_le_bytes()); // version made by
            self.data.extend_from_slice(&20u16.to_le_bytes()); // version needed
            self.data.extend_from_slice(&0u16.to_le_bytes()); // flags
            self.data.extend_from_slice(&entry.method.to_le_bytes());
            self.data.extend_from_slice(&0u16.to_le_bytes()); // mod time
            self.data.extend_from_slice(&0u16.to_le_bytes()); // mod date
            self.data.extend_from_slice(&entry.crc32.to_le_bytes());
            self.data
                .extend_from_slice(&entry.compressed_size.to_le_bytes());
            self.data
                .extend_from_slice(&entry.uncompressed_size.to_le_bytes());
            self.data
                .extend_from_slice(&(entry.name.len() as u16).to_le_bytes());
            self.data.extend_from_slice(&0u16.to_le_bytes()); // extra len
            self.data.extend_from_slice(&0u16.to_le_bytes()); // comment len
            self.data.extend_from_slice(&0u16.to_le_bytes()); // disk number
            self.data.extend_from_slice(&0u16.to_le_bytes()); // internal attrs
            self.data.extend_from_slice(&0u32.to_le_bytes()); // external attrs
            self.data.extend_from_slice(&entry.lfh_offset.to_le_bytes());
            self.data.extend_from_slice(entry.name.as_bytes());
        }

        let cd_size = self.data.len() as u32 - cd_offset;
        let count = self.entries.len() as u16;

        self.data.extend_from_slice(b"PK\x05\x06");
        self.data.extend_from_slice(&0u16.to_le_bytes()); // disk number
        self.data.extend_from_slice(&0u16.to_le_bytes()); // disk with cd
        self.data.extend_from_slice(&count.to_le_bytes());
        self.data.extend_from_slice(&count.to_le_bytes());
        self.data.extend_from_slice(&cd_size.to_le_bytes());
        self.data.extend_from_slice(&cd_offset.to_le_bytes());
        self.data
            .extend_from_slice(&(self.comment.len() as u16).to_le_bytes());
        self.data.extend_from_slice(&self.comment);

        BuiltZip {
            bytes: self.data,
            cd_offset,
            cd_size,
        }
    }
}

/// A shard file body with the given message objects.
pub fn shard(messages: &[serde_json::Value]) -> Vec<u8> {
    serde_json::json!({ "messages": messages })
        .to_string()
        .into_bytes()
}

/// A message object in export shape.
pub fn message(sender: &str, content: &str, timestamp_ms: i64) -> serde_json::Value {
    serde_json::json!({
        "sender_name": sender,
        "content": content,
        "timestamp_ms": timestamp_ms,
    })
}

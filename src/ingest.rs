//! Top-level ingestion pipeline: one archive handle, conversation listing,
//! and conversion of a chosen conversation into a transcript.

use std::sync::Arc;

use log::{debug, info};

use crate::chat::{self, ConversationFolder};
use crate::config::IngestConfig;
use crate::error::Result;
use crate::io::ReadAt;
use crate::zip::{CentralDirectoryEntry, ZipExtractor};

/// The conversations found under the first inbox marker that matched.
#[derive(Debug)]
pub struct ConversationListing {
    /// The marker that produced these folders
    pub marker: String,
    pub folders: Vec<ConversationFolder>,
}

/// Result of converting one conversation.
#[derive(Debug)]
pub struct Ingestion {
    /// The rendered transcript text
    pub transcript: String,
    /// Number of messages in the transcript
    pub message_count: usize,
    /// Shards skipped because their JSON was malformed
    pub skipped_shards: usize,
    /// Shard entries skipped for unsupported compression
    pub skipped_entries: usize,
    /// The inbox marker the conversation was found under
    pub marker: String,
}

/// One-archive ingestion pipeline.
///
/// Parses the central directory once at open; listing and conversion then
/// reuse the cached entries and only touch the archive for payload reads.
/// The archive handle is immutable, so distinct archives can be ingested
/// concurrently from independent `Ingestor`s.
pub struct Ingestor<R: ReadAt> {
    extractor: ZipExtractor<R>,
    entries: Vec<CentralDirectoryEntry>,
    config: IngestConfig,
}

impl<R: ReadAt> Ingestor<R> {
    /// Open an archive: locate the EOCD and load the central directory.
    pub async fn open(reader: Arc<R>, config: IngestConfig) -> Result<Self> {
        let extractor = ZipExtractor::new(reader);
        let entries = extractor.list_entries().await?;
        info!("archive opened: {} entries", entries.len());
        Ok(Self {
            extractor,
            entries,
            config,
        })
    }

    /// All central directory entries, in archive order.
    pub fn entries(&self) -> &[CentralDirectoryEntry] {
        &self.entries
    }

    /// List conversation folders.
    ///
    /// Markers are probed in configuration order and the first one that
    /// yields any folder wins; when none does, the listing carries the first
    /// marker and no folders (a valid, empty outcome).
    pub fn list_conversations(&self) -> ConversationListing {
        for marker in &self.config.markers {
            let folders = chat::build_index(&self.entries, marker);
            if !folders.is_empty() {
                debug!("marker '{}' matched {} folders", marker, folders.len());
                return ConversationListing {
                    marker: marker.clone(),
                    folders,
                };
            }
        }

        ConversationListing {
            marker: self.config.markers.first().cloned().unwrap_or_default(),
            folders: Vec::new(),
        }
    }

    /// Convert one conversation folder into a transcript.
    pub async fn convert(&self, folder_key: &str) -> Result<Ingestion> {
        let marker = self.list_conversations().marker;
        let outcome =
            chat::extract_conversation(&self.extractor, &self.entries, &marker, folder_key).await?;

        info!(
            "converted '{}': {} messages, {} shards skipped, {} entries skipped",
            folder_key,
            outcome.records.len(),
            outcome.skipped_shards,
            outcome.skipped_entries
        );

        Ok(Ingestion {
            transcript: chat::transcript::render(&outcome.records),
            message_count: outcome.records.len(),
            skipped_shards: outcome.skipped_shards,
            skipped_entries: outcome.skipped_entries,
            marker,
        })
    }
}

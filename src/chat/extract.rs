//! Message extraction and merging.
//!
//! Decodes every `message_*.json` shard of one conversation folder,
//! normalizes the records, and merges them into a single time-ordered
//! sequence. Per-shard failures are skipped and counted rather than aborting
//! the conversation: exports in the wild routinely contain one broken shard
//! among many good ones.

use log::{debug, warn};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{ChatzipError, Result};
use crate::io::ReadAt;
use crate::zip::{CentralDirectoryEntry, ZipExtractor};

use super::path::{self, ExportPath};

/// Sender fallback when `sender_name` is absent or not a string.
pub const UNKNOWN_SENDER: &str = "Unknown";

/// One normalized chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMessageRecord {
    pub sender: String,
    pub content: String,
    pub timestamp_ms: i64,
    /// Archive path of the shard this record came from, for diagnostics
    pub source_file: String,
}

/// Top-level shape of a message shard. A missing `messages` field is an
/// empty conversation slice, not an error.
#[derive(Debug, Deserialize)]
struct ShardFile {
    #[serde(default)]
    messages: Vec<Value>,
}

/// Result of merging one conversation folder.
#[derive(Debug, Default)]
pub struct MergeOutcome {
    /// All records, sorted ascending by timestamp (stable)
    pub records: Vec<RawMessageRecord>,
    /// Shards whose JSON could not be parsed
    pub skipped_shards: usize,
    /// Shard entries with an unsupported compression method
    pub skipped_entries: usize,
}

/// Normalize one decoded message element.
///
/// Coercion rules: non-string `sender_name` falls back to
/// [`UNKNOWN_SENDER`]; `content` may be a string or an object carrying a
/// `text` field, anything else becomes empty; non-numeric `timestamp_ms`
/// becomes 0. Nothing here ever fails.
pub fn normalize_record(value: &Value, source_file: &str) -> RawMessageRecord {
    let sender = value
        .get("sender_name")
        .and_then(Value::as_str)
        .unwrap_or(UNKNOWN_SENDER)
        .to_string();

    let content = match value.get("content") {
        Some(Value::String(s)) => s.clone(),
        Some(obj) => obj
            .get("text")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        None => String::new(),
    };

    let timestamp_ms = value
        .get("timestamp_ms")
        .and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f as i64)))
        .unwrap_or(0);

    RawMessageRecord {
        sender,
        content,
        timestamp_ms,
        source_file: source_file.to_string(),
    }
}

/// Select the message shards of one conversation folder, in archive order.
fn shard_entries<'a>(
    entries: &'a [CentralDirectoryEntry],
    marker: &str,
    folder_key: &str,
) -> Vec<&'a CentralDirectoryEntry> {
    entries
        .iter()
        .filter(|e| !e.is_directory)
        .filter(|e| {
            ExportPath::parse(&e.file_name, marker).is_some_and(|p| {
                p.folder_key() == Some(folder_key)
                    && p.shard_file().is_some_and(path::is_message_shard)
            })
        })
        .collect()
}

/// Extract, normalize, and merge all message shards of one conversation.
///
/// Records keep shard order, then in-shard order, for equal timestamps: the
/// sort is stable, so reruns produce byte-identical output even when
/// timestamps collide or are missing.
///
/// # Errors
///
/// [`ChatzipError::NoMessageShards`] when the folder has no
/// `message_*.json` entries. I/O and archive-structure errors propagate;
/// malformed shards and unsupported-compression entries are only counted.
pub async fn extract_conversation<R: ReadAt>(
    extractor: &ZipExtractor<R>,
    entries: &[CentralDirectoryEntry],
    marker: &str,
    folder_key: &str,
) -> Result<MergeOutcome> {
    let shards = shard_entries(entries, marker, folder_key);
    if shards.is_empty() {
        return Err(ChatzipError::NoMessageShards {
            folder: folder_key.to_string(),
        });
    }

    let mut outcome = MergeOutcome::default();

    for entry in shards {
        let bytes = match extractor.read_entry(entry).await {
            Ok(bytes) => bytes,
            Err(ChatzipError::UnsupportedCompression { method }) => {
                warn!(
                    "skipping shard '{}': unsupported compression method {}",
                    entry.file_name, method
                );
                outcome.skipped_entries += 1;
                continue;
            }
            Err(err) => return Err(err),
        };

        let text = String::from_utf8_lossy(&bytes);
        let shard: ShardFile = match serde_json::from_str(&text) {
            Ok(shard) => shard,
            Err(err) => {
                warn!("skipping malformed shard '{}': {}", entry.file_name, err);
                outcome.skipped_shards += 1;
                continue;
            }
        };

        debug!(
            "shard '{}': {} messages",
            entry.file_name,
            shard.messages.len()
        );
        outcome.records.extend(
            shard
                .messages
                .iter()
                .map(|m| normalize_record(m, &entry.file_name)),
        );
    }

    // Stable: ties keep shard order, then in-shard order
    outcome.records.sort_by_key(|r| r.timestamp_ms);

    Ok(outcome)
}

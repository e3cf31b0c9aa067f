//! Error types for chatzip.
//!
//! The taxonomy distinguishes errors that abort a whole ingestion (I/O,
//! arithmetic out of bounds, structurally broken archives) from per-entry and
//! per-shard conditions that the pipeline skips and counts instead of
//! propagating. See [`crate::chat::extract`] for the skip policy.

use std::io;

use thiserror::Error;

/// A specialized [`Result`] type for chatzip operations.
pub type Result<T> = std::result::Result<T, ChatzipError>;

/// The error type for all chatzip operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatzipError {
    /// A read against the underlying archive source could not be satisfied.
    /// Fatal: aborts the whole ingestion.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A requested byte range falls outside the archive. Indicates either a
    /// corrupt archive or a parser arithmetic bug; fatal.
    #[error("read of {length} bytes at offset {offset} exceeds archive size {size}")]
    OutOfBounds {
        /// Start of the requested range
        offset: u64,
        /// Length of the requested range
        length: u64,
        /// Total archive size
        size: u64,
    },

    /// No End of Central Directory signature in the tail scan window. The
    /// input is not a conformant (non-ZIP64) ZIP, or is truncated.
    #[error("not a valid ZIP archive: no end-of-central-directory record found")]
    EocdNotFound,

    /// The central directory exceeds the configured load ceiling. Resource
    /// guard for memory-constrained hosts; fatal and user-facing.
    #[error("central directory is {size} bytes, exceeding the {limit}-byte limit")]
    CentralDirectoryTooLarge {
        /// Declared central directory size
        size: u64,
        /// Configured ceiling
        limit: u64,
    },

    /// The local file header for an entry does not carry the expected
    /// signature. The archive does not conform to the expected layout; fatal.
    #[error("invalid local file header at offset {offset}")]
    LocalHeaderInvalid {
        /// Local header offset taken from the central directory
        offset: u64,
    },

    /// An entry uses a compression method other than stored or deflate.
    /// Per-entry: the caller skips the entry and continues.
    #[error("unsupported compression method {method} (only STORED and DEFLATE are supported)")]
    UnsupportedCompression {
        /// Raw method id from the central directory
        method: u16,
    },

    /// The selected conversation folder contains no `message_*.json` shards.
    /// Fatal for that folder selection only.
    #[error("no message_*.json shards found in conversation folder '{folder}'")]
    NoMessageShards {
        /// The folder key that was selected
        folder: String,
    },

    /// JSON decoding failed. Surfaces per-shard; the merger catches this,
    /// skips the shard, and counts it instead of aborting.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ChatzipError {
    /// Returns `true` for conditions the extraction pipeline skips per
    /// entry/shard rather than propagating.
    pub fn is_skippable(&self) -> bool {
        matches!(
            self,
            ChatzipError::UnsupportedCompression { .. } | ChatzipError::Json(_)
        )
    }

    /// Returns `true` if this error means the archive itself does not
    /// conform to the expected ZIP layout.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            ChatzipError::EocdNotFound | ChatzipError::LocalHeaderInvalid { .. }
        )
    }
}

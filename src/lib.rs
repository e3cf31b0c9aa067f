//! # chatzip
//!
//! Convert chat-export ZIP archives into plain-text transcripts using
//! memory-bounded range reads.
//!
//! Instagram and Facebook "Download Your Data" exports arrive as large ZIP
//! archives. This library catalogues such an archive with a handful of small
//! position-addressed reads (EOCD, central directory, per-entry local
//! headers), decompresses only the message shards of the conversation the
//! caller picks, and merges them into one chronologically ordered transcript.
//! The archive is never loaded whole, which keeps peak memory flat on
//! constrained devices no matter the archive size.
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use chatzip::{IngestConfig, Ingestor, LocalFileReader};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let reader = Arc::new(LocalFileReader::new(Path::new("export.zip"))?);
//!     let ingestor = Ingestor::open(reader, IngestConfig::default()).await?;
//!
//!     for folder in ingestor.list_conversations().folders {
//!         println!("{} ({})", folder.display_name, folder.folder_key);
//!     }
//!
//!     let ingestion = ingestor.convert("sam_12345").await?;
//!     println!("{}", ingestion.transcript);
//!     Ok(())
//! }
//! ```

pub mod chat;
pub mod cli;
pub mod config;
pub mod error;
pub mod ingest;
pub mod io;
pub mod zip;

pub use chat::{ConversationFolder, MergeOutcome, RawMessageRecord};
pub use cli::Cli;
pub use config::IngestConfig;
pub use error::{ChatzipError, Result};
pub use ingest::{ConversationListing, Ingestion, Ingestor};
pub use io::{LocalFileReader, MemoryReader, ReadAt};
pub use zip::{CentralDirectoryEntry, CompressionMethod, ZipExtractor, ZipParser};

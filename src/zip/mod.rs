//! ZIP archive parsing and per-entry extraction.
//!
//! The module is organized into three components:
//!
//! - [`structures`]: data structures for the ZIP format elements (EOCD,
//!   central directory entries, header constants)
//! - [`parser`]: low-level parsing of those structures from raw bytes
//! - [`extractor`]: per-entry read-and-decompress API
//!
//! A ZIP file consists of local file headers with compressed data for each
//! file, followed by a Central Directory cataloguing all entries, followed by
//! the End of Central Directory (EOCD) record. This implementation reads the
//! EOCD first (from the end of the file), then the Central Directory, so an
//! archive can be catalogued and selectively extracted with a handful of
//! small position-addressed reads.
//!
//! ## Limitations
//!
//! - No ZIP64 extensions
//! - No encryption support
//! - No multi-disk archive support
//! - No BZIP2, LZMA, or other compression methods beyond STORED and DEFLATE

mod extractor;
mod parser;
mod structures;

pub use extractor::ZipExtractor;
pub use parser::{MAX_CENTRAL_DIRECTORY_BYTES, TAIL_SCAN_WINDOW, ZipParser};
pub use structures::*;

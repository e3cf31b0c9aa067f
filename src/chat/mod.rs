//! Chat-export semantics layered on top of the ZIP reader.
//!
//! - [`path`]: typed parsing of export entry names against an inbox marker
//! - [`index`]: grouping entries into conversation folders
//! - [`extract`]: shard decoding, normalization, and time-ordered merging
//! - [`transcript`]: rendering the merged sequence as plain text

pub mod extract;
pub mod index;
pub mod path;
pub mod transcript;

pub use extract::{MergeOutcome, RawMessageRecord, UNKNOWN_SENDER, extract_conversation};
pub use index::{ConversationFolder, build_index};
pub use path::{ExportPath, display_name, is_message_shard};

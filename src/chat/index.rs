//! Conversation index: group archive entries by conversation folder.

use std::collections::HashSet;

use crate::zip::CentralDirectoryEntry;

use super::path::{self, ExportPath};

/// One conversation folder discovered under an inbox marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationFolder {
    /// Raw path segment, e.g. `sam_12345`
    pub folder_key: String,
    /// Folder key with any trailing `_<digits>` suffix stripped
    pub display_name: String,
}

/// Build the conversation index for one inbox marker.
///
/// Takes the path segment immediately following the marker as the folder
/// key, de-duplicated in encounter order. Segments containing a `.` are
/// files sitting at the inbox root, not conversation folders, and are
/// skipped. An empty result is a valid outcome: the archive simply has no
/// recognized conversation structure under this marker.
pub fn build_index(entries: &[CentralDirectoryEntry], marker: &str) -> Vec<ConversationFolder> {
    let mut seen = HashSet::new();
    let mut folders = Vec::new();

    for entry in entries {
        let Some(parsed) = ExportPath::parse(&entry.file_name, marker) else {
            continue;
        };
        let Some(key) = parsed.folder_key() else {
            continue;
        };
        if key.contains('.') {
            continue;
        }
        if seen.insert(key.to_string()) {
            folders.push(ConversationFolder {
                folder_key: key.to_string(),
                display_name: path::display_name(key),
            });
        }
    }

    folders
}

//! Typed export-path parsing.
//!
//! Export archives locate conversations under an inbox marker such as
//! `your_instagram_activity/messages/inbox`. Entry names are parsed into
//! explicit path segments once, and every downstream match works on those
//! segments instead of re-scanning strings.

/// The segments of an archive entry name that follow an inbox marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPath {
    segments: Vec<String>,
}

impl ExportPath {
    /// Parse an entry name against an inbox marker.
    ///
    /// The marker match is case-insensitive and must fall on a path-segment
    /// boundary. Returns `None` when the marker is absent.
    pub fn parse(entry_name: &str, marker: &str) -> Option<Self> {
        let marker = marker.trim_matches('/');
        let name_lower = entry_name.to_ascii_lowercase();
        let marker_lower = marker.to_ascii_lowercase();

        let pos = find_on_boundary(&name_lower, &marker_lower)?;
        let rest = &entry_name[pos + marker.len()..];

        Some(Self {
            segments: rest
                .split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        })
    }

    /// The path segment immediately following the marker, i.e. the
    /// conversation folder key.
    pub fn folder_key(&self) -> Option<&str> {
        self.segments.first().map(String::as_str)
    }

    /// The shard file name when this path is `<folder>/<file>` directly
    /// under the marker.
    pub fn shard_file(&self) -> Option<&str> {
        match self.segments.as_slice() {
            [_, file] => Some(file),
            _ => None,
        }
    }
}

/// Find `needle` in `haystack` such that the match is delimited by `/` (or
/// string start/end) on both sides. Candidates failing either boundary do
/// not end the search; a valid occurrence later in the name still matches.
/// Both inputs are pre-lowercased.
fn find_on_boundary(haystack: &str, needle: &str) -> Option<usize> {
    let mut from = 0;
    while let Some(rel) = haystack[from..].find(needle) {
        let pos = from + rel;
        let end = pos + needle.len();
        let left_ok = pos == 0 || haystack.as_bytes()[pos - 1] == b'/';
        let right_ok = end == haystack.len() || haystack.as_bytes()[end] == b'/';
        if left_ok && right_ok {
            return Some(pos);
        }
        from = pos + 1;
    }
    None
}

/// Whether a file name is a message shard (`message_*.json`,
/// case-insensitive).
pub fn is_message_shard(file_name: &str) -> bool {
    let lower = file_name.to_ascii_lowercase();
    lower.starts_with("message_") && lower.ends_with(".json")
}

/// Derive a human-readable conversation name from a folder key by stripping
/// one trailing `_<digits>` suffix. Pure and idempotent.
pub fn display_name(folder_key: &str) -> String {
    if let Some(idx) = folder_key.rfind('_') {
        let suffix = &folder_key[idx + 1..];
        if !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()) {
            return folder_key[..idx].to_string();
        }
    }
    folder_key.to_string()
}

//! Ingestion configuration.

/// Inbox markers probed by default, in probe order: Instagram, Facebook,
/// then the bare layout some exports use at the archive root.
pub const DEFAULT_MARKERS: [&str; 3] = [
    "your_instagram_activity/messages/inbox",
    "your_facebook_activity/messages/inbox",
    "messages/inbox",
];

/// Configuration for one ingestion.
///
/// The marker list is injected rather than hard-coded so new export
/// providers need no parser changes.
#[derive(Debug, Clone)]
pub struct IngestConfig {
    /// Inbox markers to probe, in order; the first yielding any
    /// conversation folder wins.
    pub markers: Vec<String>,
}

impl IngestConfig {
    pub fn new() -> Self {
        Self {
            markers: DEFAULT_MARKERS.iter().map(|m| (*m).to_string()).collect(),
        }
    }

    /// Replace the probe list with a single marker.
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.markers = vec![marker.into()];
        self
    }
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self::new()
    }
}

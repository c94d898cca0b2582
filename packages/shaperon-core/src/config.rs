//! Writer and reader configuration for file-backed streams.

/// Configuration for file-backed shape and index streams.
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Capacity of the buffered reader/writer wrapping the file, in bytes
    pub buffer_capacity: usize,
    /// Whether closing a file-backed writer also syncs the file to disk
    pub sync_on_close: bool,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: 64 * 1024,
            sync_on_close: true,
        }
    }
}

// Tunables for the parsers

/// Limits applied while parsing.
///
/// The defaults suit ordinary music files; [`ParseOptions::default`] is what
/// [`crate::classify_and_parse`] uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Bytes before the end of an Ogg stream searched for the final page
    pub ogg_tail_window: u64,
    /// ID3 frames larger than this are skipped instead of read
    pub max_frame_size: u32,
    /// Bytes after the ID3 tag searched for the first MPEG frame sync
    pub sync_search_window: u64,
}

impl ParseOptions {
    pub const DEFAULT_OGG_TAIL_WINDOW: u64 = 4096;
    pub const DEFAULT_MAX_FRAME_SIZE: u32 = 1024 * 1024;
    pub const DEFAULT_SYNC_SEARCH_WINDOW: u64 = 64 * 1024;
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            ogg_tail_window: Self::DEFAULT_OGG_TAIL_WINDOW,
            max_frame_size: Self::DEFAULT_MAX_FRAME_SIZE,
            sync_search_window: Self::DEFAULT_SYNC_SEARCH_WINDOW,
        }
    }
}

//! Sliding-window text splitting for bill documents.
//!
//! Bill text arrives as one large plain-text body per document. The splitter
//! cuts it into fixed-size character windows with a configurable overlap so
//! that sentences spanning a boundary remain visible to retrieval. Windows are
//! measured in characters rather than bytes, which keeps the cuts valid UTF-8
//! regardless of the input.

use super::types::SplitterError;

/// Default window size in characters.
pub const DEFAULT_CHUNK_SIZE: usize = 1000;
/// Default overlap between adjacent windows in characters.
pub const DEFAULT_CHUNK_OVERLAP: usize = 200;

/// Splits document text into overlapping character windows.
#[derive(Debug, Clone, Copy)]
pub struct TextSplitter {
    window: usize,
    overlap: usize,
}

impl TextSplitter {
    /// Create a splitter, validating that the overlap leaves forward progress.
    pub fn new(window: usize, overlap: usize) -> Result<Self, SplitterError> {
        if window == 0 {
            return Err(SplitterError::InvalidChunkSize);
        }
        if overlap >= window {
            return Err(SplitterError::InvalidOverlap { window, overlap });
        }
        Ok(Self { window, overlap })
    }

    /// Split `text` into overlapping windows.
    ///
    /// Adjacent windows share the final `overlap` characters of the previous
    /// window, and the last window may be shorter than the configured size.
    /// Empty input yields no windows.
    pub fn split(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }

        let chars: Vec<char> = text.chars().collect();
        let stride = self.window - self.overlap;
        let mut chunks = Vec::new();
        let mut start = 0;

        loop {
            let end = (start + self.window).min(chars.len());
            chunks.push(chars[start..end].iter().collect());
            if end == chars.len() {
                break;
            }
            start += stride;
        }

        chunks
    }
}

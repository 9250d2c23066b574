//! Completed frame type for the live-view stream

use std::sync::Arc;

/// One fully reassembled live-view frame
///
/// This is the fundamental data unit that flows out of the reassembly
/// engine. The image bytes are the accumulated frame payload with the
/// leading 2048-byte metadata block already stripped, so they start at
/// the image container itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedFrame {
    /// Index the camera assigned to this frame
    pub frame_index: u32,

    /// Image bytes (zero-copy via Arc)
    pub image: Arc<[u8]>,
}

impl CompletedFrame {
    /// Create a new completed frame from stripped image bytes
    pub fn new(frame_index: u32, image: Vec<u8>) -> Self {
        Self { frame_index, image: image.into() }
    }

    /// Length of the image payload in bytes
    pub fn len(&self) -> usize {
        self.image.len()
    }

    /// Whether the image payload is empty
    pub fn is_empty(&self) -> bool {
        self.image.is_empty()
    }
}

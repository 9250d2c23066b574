//! Delivery targets for completed frames.
//!
//! The receive loop hands every reassembled frame to a [`FrameSink`]. The
//! engine ships two: [`WatchSink`] publishes into a single-slot watch
//! channel where the newest frame overwrites any unconsumed predecessor,
//! and [`DirectorySink`] writes each frame to disk for offline inspection.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{trace, warn};

use crate::error::{CameraError, Result};
use crate::types::CompletedFrame;

/// Returned by [`FrameSink::deliver`] when the sink's consumers are gone
/// and the receive loop should stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkClosed;

impl std::fmt::Display for SinkClosed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("frame sink closed")
    }
}

impl std::error::Error for SinkClosed {}

/// Consumer of completed frames.
#[async_trait::async_trait]
pub trait FrameSink: Send + 'static {
    /// Deliver one completed frame.
    ///
    /// # Returns
    /// - `Ok(())` - Frame accepted (or a recoverable delivery problem was
    ///   logged by the sink itself)
    /// - `Err(SinkClosed)` - No consumer remains; the receive loop stops
    async fn deliver(&mut self, frame: CompletedFrame) -> Result<(), SinkClosed>;
}

/// Publishes frames into a watch channel.
///
/// The channel holds only the latest frame. A slow consumer never blocks
/// the receive loop; it simply skips the frames it was too late for.
pub struct WatchSink {
    tx: watch::Sender<Option<Arc<CompletedFrame>>>,
}

impl WatchSink {
    pub fn new(tx: watch::Sender<Option<Arc<CompletedFrame>>>) -> Self {
        Self { tx }
    }
}

#[async_trait::async_trait]
impl FrameSink for WatchSink {
    async fn deliver(&mut self, frame: CompletedFrame) -> Result<(), SinkClosed> {
        self.tx.send(Some(Arc::new(frame))).map_err(|_| SinkClosed)
    }
}

/// Writes each completed frame to `frame_{index}.jpg` under a directory.
///
/// Write failures are logged and skipped; a full disk should not take the
/// live view down.
pub struct DirectorySink {
    dir: PathBuf,
    written: u64,
}

impl DirectorySink {
    /// Create the sink, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .map_err(|source| CameraError::file_error(dir.clone(), source))?;
        Ok(Self { dir, written: 0 })
    }

    /// Number of frames written so far.
    pub fn written(&self) -> u64 {
        self.written
    }
}

#[async_trait::async_trait]
impl FrameSink for DirectorySink {
    async fn deliver(&mut self, frame: CompletedFrame) -> Result<(), SinkClosed> {
        let path = self.dir.join(format!("frame_{}.jpg", frame.frame_index));
        match tokio::fs::write(&path, frame.image.as_ref()).await {
            Ok(()) => {
                self.written += 1;
                trace!(path = %path.display(), len = frame.len(), "wrote frame");
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "failed to write frame");
            }
        }
        Ok(())
    }
}

//! Async live-view engine for Yi mirrorless cameras.
//!
//! Viewfinder reassembles the camera's UDP preview stream into whole frames
//! and drives the vendor HTTP interface that starts and stops streaming.
//!
//! # Features
//!
//! - **Frame Reassembly**: strictly ordered packet accumulation with
//!   newest-frame-wins recovery from loss and reordering
//! - **Single-Slot Delivery**: slow consumers always see the freshest
//!   preview instead of a growing backlog
//! - **Camera Control**: shutter, focus, file transfer and the streaming
//!   handshake over the vendor HTTP protocol (`commands` feature)
//! - **Performance**: zero-copy frame sharing via Arc
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use futures::StreamExt;
//! use viewfinder::{CommandClient, LiveViewConfig, UpdateRate, Viewfinder};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Join the camera's WiFi access point first
//!     let camera = CommandClient::default();
//!     let view = Viewfinder::connect(&camera, &LiveViewConfig::default()).await?;
//!
//!     let mut frames = Box::pin(view.subscribe(UpdateRate::Max(10)));
//!     while let Some(frame) = frames.next().await {
//!         println!("frame {} ({} bytes)", frame.frame_index, frame.len());
//!     }
//!
//!     view.stop().await?;
//!     Ok(())
//! }
//! ```

// Core types and error handling
pub mod assembler;
pub mod config;
mod error;
#[cfg_attr(any(test, feature = "benchmark"), path = "test_utils.rs")]
#[cfg(any(test, feature = "benchmark"))]
pub mod test_utils;
pub mod types;
pub mod wire;

// Stream-based receive architecture
pub mod connection;
pub mod control;
pub mod driver;
pub mod sink;
pub mod stream;

// Vendor HTTP command layer
#[cfg(feature = "commands")]
pub mod command;

// Core exports
pub use error::*;
pub use types::*;

pub use assembler::{AssemblerStats, DropReason, FrameAssembler, Ingest};
pub use config::{DEFAULT_LIVE_VIEW_PORT, LiveViewConfig};
pub use control::LiveViewControl;
pub use sink::{DirectorySink, FrameSink, SinkClosed, WatchSink};

// Main API exports
pub use connection::LiveView;

#[cfg(feature = "commands")]
pub use command::{CameraFile, CommandClient, DEFAULT_CAMERA_HOST, FileFilter, Resolution};

/// Unified entry point for camera live-view sessions.
///
/// This factory provides a consistent API whether the camera is driven over
/// its HTTP interface or something else already put it into streaming mode.
///
/// # Examples
///
/// ## Full session (camera handshake plus engine)
/// ```rust,no_run
/// use viewfinder::{CommandClient, LiveViewConfig, Viewfinder};
///
/// #[tokio::main]
/// async fn main() -> viewfinder::Result<()> {
///     let camera = CommandClient::default();
///     let view = Viewfinder::connect(&camera, &LiveViewConfig::default()).await?;
///     // Use view...
///     Ok(())
/// }
/// ```
///
/// ## Listen only
/// ```rust,no_run
/// use viewfinder::{LiveViewConfig, Viewfinder};
///
/// #[tokio::main]
/// async fn main() -> viewfinder::Result<()> {
///     let view = Viewfinder::start(&LiveViewConfig::default()).await?;
///     // Use view...
///     Ok(())
/// }
/// ```
pub struct Viewfinder;

impl Viewfinder {
    /// Start the receive engine without touching the camera.
    ///
    /// Useful when something else already opened the remote-control session,
    /// or when replaying captured traffic at the socket.
    ///
    /// # Errors
    ///
    /// Returns an error if the live-view socket cannot be bound.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use viewfinder::{LiveViewConfig, Viewfinder};
    ///
    /// # #[tokio::main]
    /// # async fn main() -> viewfinder::Result<()> {
    /// let view = Viewfinder::start(&LiveViewConfig::default()).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn start(config: &LiveViewConfig) -> Result<LiveView> {
        LiveView::start(config).await
    }

    /// Open a remote-control session on the camera and start the engine.
    ///
    /// The socket is bound before the camera is asked to stream so that the
    /// first datagrams are not lost. If the handshake fails the engine is
    /// wound down again and the error is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The live-view socket cannot be bound
    /// - The camera is unreachable or refuses the handshake
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use viewfinder::{CommandClient, LiveViewConfig, Viewfinder};
    ///
    /// # #[tokio::main]
    /// # async fn main() -> viewfinder::Result<()> {
    /// let camera = CommandClient::new("192.168.0.10");
    /// let view = Viewfinder::connect(&camera, &LiveViewConfig::default()).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn connect(
        control: &impl LiveViewControl,
        config: &LiveViewConfig,
    ) -> Result<LiveView> {
        let view = LiveView::start(config).await?;
        if let Err(error) = control.start_live_view().await {
            let _ = view.stop().await;
            return Err(error);
        }
        Ok(view)
    }
}

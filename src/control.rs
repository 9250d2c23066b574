//! Control trait for putting the camera into streaming mode

use crate::Result;

/// Trait for the camera-side half of a live-view session
///
/// The UDP engine only listens; the camera starts pushing preview frames
/// once a remote-control session is opened over its HTTP interface. This
/// trait abstracts that handshake so the engine can be driven by the real
/// vendor protocol or by a stand-in during tests.
#[async_trait::async_trait]
pub trait LiveViewControl: Send + Sync {
    /// Ask the camera to begin streaming preview frames
    ///
    /// Returns:
    /// - `Ok(())` - Camera acknowledged; datagrams should start arriving
    /// - `Err(e)` - Camera unreachable or refused the command
    async fn start_live_view(&self) -> Result<()>;

    /// Ask the camera to stop streaming preview frames
    ///
    /// In-flight datagrams may still arrive after this returns; the
    /// receive loop tolerates them.
    async fn stop_live_view(&self) -> Result<()>;
}

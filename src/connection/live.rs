//! Live view of the camera's preview stream

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use futures::{Stream, StreamExt};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::WatchStream;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::LiveViewConfig;
use crate::driver::{Driver, DriverHandle};
use crate::error::{CameraError, Result};
use crate::sink::WatchSink;
use crate::stream::ThrottleExt;
use crate::types::{CompletedFrame, UpdateRate};

/// Frames per second the camera streams previews at.
const NOMINAL_PREVIEW_HZ: f64 = 30.0;

/// Running live-view engine.
///
/// Owns the receive loop and exposes its output as a watch channel: the
/// newest frame always overwrites an unconsumed predecessor, so a slow
/// consumer sees fresh previews instead of a growing backlog.
#[derive(Debug)]
pub struct LiveView {
    /// Frame watch receiver
    frames: watch::Receiver<Option<Arc<CompletedFrame>>>,

    /// Cancellation token for stopping the receive loop
    cancel: CancellationToken,

    /// Receive loop task, present until `stop` consumes it
    worker: Option<JoinHandle<()>>,

    /// Join deadline for `stop`
    shutdown_timeout: Duration,

    /// Address the socket actually bound
    local_addr: SocketAddr,
}

impl LiveView {
    /// Bind the live-view socket and start receiving.
    ///
    /// This only starts the local half. The camera begins streaming once a
    /// remote-control session is opened, see
    /// [`LiveViewControl`](crate::control::LiveViewControl).
    pub async fn start(config: &LiveViewConfig) -> Result<Self> {
        info!("Starting live view");

        let (frame_tx, frame_rx) = watch::channel(None);
        let DriverHandle { cancel, worker, local_addr } =
            Driver::spawn(config, WatchSink::new(frame_tx)).await?;

        Ok(Self {
            frames: frame_rx,
            cancel,
            worker: Some(worker),
            shutdown_timeout: config.shutdown_timeout,
            local_addr,
        })
    }

    /// Subscribe to completed frames
    pub fn subscribe(&self, rate: UpdateRate) -> impl Stream<Item = Arc<CompletedFrame>> + 'static {
        // Create base frame stream from the watch channel.
        // Important: WatchStream yields the current value immediately. Until
        // the first frame lands that value is None. We skip leading Nones so
        // a fresh subscription waits instead of appearing to end; once a
        // frame has been seen, any None means the engine stopped.
        let frames = WatchStream::new(self.frames.clone())
            .skip_while(|opt| {
                let is_none = opt.is_none();
                async move { is_none }
            })
            .take_while(|opt| {
                let is_some = opt.is_some();
                async move { is_some }
            })
            .filter_map(|opt| async move { opt });

        // Apply rate control
        match rate.normalize(NOMINAL_PREVIEW_HZ) {
            UpdateRate::Native => frames.boxed(),
            UpdateRate::Max(hz) => {
                let interval = Duration::from_secs_f64(1.0 / hz as f64);
                frames.throttle(interval).boxed()
            }
        }
    }

    /// Get the most recent completed frame (if any)
    pub fn latest_frame(&self) -> Option<Arc<CompletedFrame>> {
        self.frames.borrow().clone()
    }

    /// Address the receive socket bound, useful when the port was 0
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stop the receive loop and wait for it to finish.
    ///
    /// The join is bounded by the configured shutdown timeout; a loop that
    /// fails to wind down in time yields [`CameraError::Timeout`].
    pub async fn stop(mut self) -> Result<()> {
        info!("Stopping live view");
        self.cancel.cancel();

        let Some(worker) = self.worker.take() else {
            return Ok(());
        };

        match tokio::time::timeout(self.shutdown_timeout, worker).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(join_error)) => Err(CameraError::engine_stopped(format!(
                "receive task failed to shut down cleanly: {join_error}"
            ))),
            Err(_) => Err(CameraError::Timeout { duration: self.shutdown_timeout }),
        }
    }
}

impl Drop for LiveView {
    fn drop(&mut self) {
        debug!("Dropping live view");
        // Cancel the receive loop on drop for clean shutdown
        self.cancel.cancel();
    }
}

//! Driver binds the live-view socket and runs the receive loop

use std::net::SocketAddr;

use tokio::net::UdpSocket;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

use crate::assembler::{FrameAssembler, Ingest};
use crate::config::LiveViewConfig;
use crate::error::{CameraError, Result};
use crate::sink::FrameSink;

/// Result of spawning the receive loop
#[derive(Debug)]
pub struct DriverHandle {
    /// Cancellation token for graceful shutdown
    pub cancel: CancellationToken,
    /// The receive loop task itself, for bounded joins on stop
    pub worker: JoinHandle<()>,
    /// Address the socket actually bound (relevant when the port was 0)
    pub local_addr: SocketAddr,
}

/// Driver binds the live-view socket and spawns the receive loop
///
/// The loop owns the socket and the frame assembler. Completed frames go to
/// the sink; everything else becomes a logged diagnostic and a counter.
pub struct Driver;

impl Driver {
    /// Bind the configured socket and spawn the receive loop feeding `sink`.
    ///
    /// Binding is the only fatal setup step. Once the task is running, every
    /// receive error is treated as transient and the loop keeps going until
    /// it is cancelled or the sink closes.
    pub async fn spawn<S>(config: &LiveViewConfig, sink: S) -> Result<DriverHandle>
    where
        S: FrameSink,
    {
        let addr = config.socket_addr();
        let socket = UdpSocket::bind(addr)
            .await
            .map_err(|source| CameraError::bind_failed(addr, source))?;
        let local_addr =
            socket.local_addr().map_err(|source| CameraError::bind_failed(addr, source))?;

        let cancel = CancellationToken::new();
        let cancel_recv = cancel.clone();
        let config = config.clone();

        let worker = tokio::spawn(async move {
            Self::receive_task(socket, config, sink, cancel_recv).await;
        });

        info!("Live-view receive task started on {}", local_addr);
        Ok(DriverHandle { cancel, worker, local_addr })
    }

    /// Receive task - reads datagrams and feeds the assembler
    async fn receive_task<S>(
        socket: UdpSocket,
        config: LiveViewConfig,
        mut sink: S,
        cancel: CancellationToken,
    ) where
        S: FrameSink,
    {
        let mut assembler = FrameAssembler::new();
        let mut buf = vec![0u8; config.recv_buffer_len];
        let mut datagram_count = 0u64;
        let mut error_count = 0u32;

        loop {
            // Check for cancellation between datagrams
            if cancel.is_cancelled() {
                info!("Receive task cancelled");
                break;
            }

            // The receive timeout doubles as a cancellation checkpoint while
            // the camera is silent
            let received = tokio::select! {
                _ = cancel.cancelled() => {
                    info!("Receive task cancelled during read");
                    break;
                }
                received = tokio::time::timeout(config.recv_timeout, socket.recv_from(&mut buf)) => received,
            };

            let (len, peer) = match received {
                Err(_elapsed) => {
                    trace!("No datagrams within timeout window");
                    continue;
                }
                Ok(Ok((len, peer))) => {
                    error_count = 0; // Reset error count on success
                    (len, peer)
                }
                Ok(Err(e)) => {
                    // Socket error - don't crash on transient failures
                    error_count += 1;
                    warn!("Receive error ({} consecutive): {}", error_count, e);

                    // Exponential backoff: 50ms, 100ms, 200ms, ...
                    let backoff =
                        std::time::Duration::from_millis(50 * (1 << error_count.min(5)));
                    tokio::select! {
                        _ = cancel.cancelled() => break,
                        _ = tokio::time::sleep(backoff) => {}
                    }
                    continue;
                }
            };

            datagram_count += 1;
            trace!(len, from = %peer, "Datagram received");

            if let Ingest::Completed(frame) = assembler.ingest(&buf[..len]) {
                if sink.deliver(frame).await.is_err() {
                    debug!("Frame consumer dropped, shutting down");
                    break;
                }
            }
        }

        let stats = assembler.stats();
        info!(
            "Receive task ended (datagrams {}, frames {}, malformed {}, gaps {}, incomplete {})",
            datagram_count, stats.frames, stats.malformed, stats.sequence_gaps, stats.incomplete
        );
    }
}

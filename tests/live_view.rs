//! End-to-end tests over loopback UDP
//!
//! These tests drive the public API the way an application would: facade
//! entry points, a stand-in camera control, subscriptions and teardown.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use futures::StreamExt;
use tokio::net::UdpSocket;
use viewfinder::driver::Driver;
use viewfinder::{
    CameraError, DirectorySink, LiveViewConfig, LiveViewControl, UpdateRate, Viewfinder,
};

const METADATA_LEN: usize = 2048;

/// Build one live-view datagram: three big-endian u32 header fields
/// (frame index, total packet count, packet index) and a payload slice.
fn datagram(frame_index: u32, total: u32, index: u32, payload: &[u8]) -> Vec<u8> {
    let mut raw = Vec::with_capacity(12 + payload.len());
    raw.extend_from_slice(&frame_index.to_be_bytes());
    raw.extend_from_slice(&total.to_be_bytes());
    raw.extend_from_slice(&index.to_be_bytes());
    raw.extend_from_slice(payload);
    raw
}

fn frame_payload(frame_index: u32, total_len: usize) -> Vec<u8> {
    let seed = frame_index as u8;
    (0..total_len).map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed)).collect()
}

fn frame_datagrams(frame_index: u32, packet_count: u32, total_len: usize) -> Vec<Vec<u8>> {
    let payload = frame_payload(frame_index, total_len);
    let count = packet_count as usize;
    let base = total_len / count;
    let remainder = total_len % count;

    let mut datagrams = Vec::with_capacity(count);
    let mut offset = 0;
    for index in 0..count {
        let chunk = base + usize::from(index < remainder);
        datagrams.push(datagram(
            frame_index,
            packet_count,
            index as u32,
            &payload[offset..offset + chunk],
        ));
        offset += chunk;
    }
    datagrams
}

async fn send_frame(target: SocketAddr, frame_index: u32, total_len: usize) -> Result<()> {
    let sender = UdpSocket::bind("127.0.0.1:0").await.context("bind sender socket")?;
    for raw in frame_datagrams(frame_index, 3, total_len) {
        sender.send_to(&raw, target).await.context("send datagram")?;
    }
    Ok(())
}

#[derive(Default)]
struct StubControl {
    started: AtomicU32,
    stopped: AtomicU32,
    refuse: bool,
}

#[async_trait::async_trait]
impl LiveViewControl for StubControl {
    async fn start_live_view(&self) -> viewfinder::Result<()> {
        if self.refuse {
            return Err(CameraError::command_failed("camera refused the handshake"));
        }
        self.started.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn stop_live_view(&self) -> viewfinder::Result<()> {
        self.stopped.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[tokio::test]
async fn listen_only_roundtrip() -> Result<()> {
    let _ = tracing_subscriber::fmt::try_init();

    let view = Viewfinder::start(&LiveViewConfig::ephemeral()).await?;
    let mut frames = Box::pin(view.subscribe(UpdateRate::Native));

    send_frame(view.local_addr(), 5, 6200).await?;

    let frame = tokio::time::timeout(Duration::from_secs(2), frames.next())
        .await
        .context("frame should arrive within two seconds")?
        .context("stream should not end while the engine runs")?;

    assert_eq!(frame.frame_index, 5);
    assert_eq!(frame.len(), 6200 - METADATA_LEN);
    assert_eq!(frame.image.as_ref(), &frame_payload(5, 6200)[METADATA_LEN..]);

    view.stop().await?;
    Ok(())
}

#[tokio::test]
async fn connect_runs_the_camera_handshake() -> Result<()> {
    let control = StubControl::default();

    let view = Viewfinder::connect(&control, &LiveViewConfig::ephemeral()).await?;
    assert_eq!(control.started.load(Ordering::SeqCst), 1);

    view.stop().await?;
    Ok(())
}

#[tokio::test]
async fn refused_handshake_fails_the_connect() {
    let control = StubControl { refuse: true, ..StubControl::default() };

    let err = Viewfinder::connect(&control, &LiveViewConfig::ephemeral())
        .await
        .expect_err("a refused handshake must fail the connect");
    assert!(matches!(err, CameraError::Command { .. }));
    assert_eq!(control.started.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn latest_frame_tracks_the_newest_delivery() -> Result<()> {
    let view = Viewfinder::start(&LiveViewConfig::ephemeral()).await?;

    for frame_index in 1..=3 {
        send_frame(view.local_addr(), frame_index, 4200).await?;
    }

    let deadline = Instant::now() + Duration::from_secs(2);
    loop {
        if view.latest_frame().is_some_and(|frame| frame.frame_index == 3) {
            break;
        }
        assert!(Instant::now() < deadline, "frame 3 never became the latest");
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    view.stop().await?;
    Ok(())
}

#[tokio::test]
async fn directory_sink_persists_frames() -> Result<()> {
    let _ = tracing_subscriber::fmt::try_init();

    let dir = tempfile::tempdir().context("create temp dir")?;
    let sink = DirectorySink::new(dir.path())?;
    let handle = Driver::spawn(&LiveViewConfig::ephemeral(), sink).await?;

    send_frame(handle.local_addr, 9, 4200).await?;

    let path = dir.path().join("frame_9.jpg");
    let deadline = Instant::now() + Duration::from_secs(2);
    while !path.exists() {
        assert!(Instant::now() < deadline, "frame file never appeared");
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    let bytes = std::fs::read(&path).context("read written frame")?;
    assert_eq!(bytes, &frame_payload(9, 4200)[METADATA_LEN..]);

    handle.cancel.cancel();
    tokio::time::timeout(Duration::from_secs(2), handle.worker)
        .await
        .context("receive loop should stop after cancellation")?
        .context("receive loop should not panic")?;
    Ok(())
}

//! Test utilities for synthetic live-view traffic
//!
//! This module provides builders for wire-format datagrams and whole frames
//! that are used across the crate's unit tests, integration tests and
//! benchmarks.

#![cfg(any(test, feature = "benchmark"))]

use crate::wire::HEADER_LEN;

/// Deterministic payload bytes for a synthetic frame.
///
/// The pattern is a pure function of `frame_index` and position, so tests
/// can regenerate the expected accumulated bytes without holding copies.
pub fn frame_payload(frame_index: u32, total_len: usize) -> Vec<u8> {
    let seed = frame_index as u8;
    (0..total_len).map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed)).collect()
}

/// Build one live-view datagram with the given header fields and payload.
pub fn datagram(
    frame_index: u32,
    total_packet_count: u32,
    packet_index: u32,
    payload: &[u8],
) -> Vec<u8> {
    let mut raw = Vec::with_capacity(HEADER_LEN + payload.len());
    raw.extend_from_slice(&frame_index.to_be_bytes());
    raw.extend_from_slice(&total_packet_count.to_be_bytes());
    raw.extend_from_slice(&packet_index.to_be_bytes());
    raw.extend_from_slice(payload);
    raw
}

/// Split a synthetic frame into its in-order datagrams.
///
/// The accumulated payload is `frame_payload(frame_index, total_len)` split
/// as evenly as possible across `packet_count` datagrams. `total_len` counts
/// the whole accumulated frame, including the leading 2048-byte metadata
/// block, so a frame only yields an image when `total_len > 2048`.
pub fn frame_datagrams(frame_index: u32, packet_count: u32, total_len: usize) -> Vec<Vec<u8>> {
    assert!(packet_count > 0, "a frame needs at least one packet");
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

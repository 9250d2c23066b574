//! Stateful reassembly of live-view frames from UDP datagrams.
//!
//! The camera sends each preview frame as a burst of numbered packets (see
//! [`crate::wire`]). [`FrameAssembler`] consumes raw datagrams one at a time
//! and tracks a single in-progress frame:
//!
//! - A datagram whose frame index differs from the in-progress frame starts
//!   a fresh buffer; whatever was accumulated is discarded. The newest frame
//!   always wins.
//! - Within a frame, packets must arrive strictly in order. A skipped or
//!   repeated index marks the frame invalid and every later packet of that
//!   frame is dropped until the index changes.
//! - A frame completes when its last-indexed packet is accepted. There is no
//!   checksum on the wire, so an unbroken index sequence is the only
//!   integrity signal.
//! - Completed frames shorter than the 2048-byte metadata block carry no
//!   image and are dropped with a diagnostic.
//!
//! Malformed datagrams (shorter than the header) are rejected before any
//! state is touched, so stray traffic cannot corrupt an in-progress frame.
//!
//! ```rust
//! use viewfinder::assembler::{FrameAssembler, Ingest};
//!
//! let mut assembler = FrameAssembler::new();
//!
//! // One-packet frame: header (frame 1, 1 packet, index 0) plus payload
//! let mut datagram = Vec::new();
//! datagram.extend_from_slice(&1u32.to_be_bytes());
//! datagram.extend_from_slice(&1u32.to_be_bytes());
//! datagram.extend_from_slice(&0u32.to_be_bytes());
//! datagram.extend_from_slice(&vec![0u8; 2049]);
//!
//! match assembler.ingest(&datagram) {
//!     Ingest::Completed(frame) => assert_eq!(frame.len(), 1),
//!     other => panic!("expected a completed frame, got {other:?}"),
//! }
//! ```

use tracing::{debug, trace};

use crate::types::CompletedFrame;
use crate::wire::{METADATA_OFFSET, Packet};

/// Outcome of feeding one datagram to the assembler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ingest {
    /// The packet was accepted; the frame is still being accumulated.
    Accumulating,
    /// The packet completed a frame with a usable image payload.
    Completed(CompletedFrame),
    /// The packet (or the frame it completed) was discarded.
    Dropped(DropReason),
}

/// Why a datagram or a finished frame was discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropReason {
    /// Datagram shorter than the wire header.
    Malformed { len: usize },
    /// Packet index broke the in-order sequence; the frame is now invalid.
    SequenceGap { frame_index: u32, expected: u32, got: u32 },
    /// Packet belongs to a frame already marked invalid by an earlier gap.
    Invalidated { frame_index: u32 },
    /// Frame completed but was too short to carry an image.
    Incomplete { frame_index: u32, len: usize },
}

/// Counters over everything the assembler has seen.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AssemblerStats {
    /// Well-formed packets ingested, accepted or not.
    pub packets: u64,
    /// Frames completed with an image payload.
    pub frames: u64,
    /// Datagrams rejected before parsing.
    pub malformed: u64,
    /// Out-of-order packets that invalidated a frame.
    pub sequence_gaps: u64,
    /// Packets dropped because their frame was already invalid.
    pub invalidated: u64,
    /// Frames completed without enough bytes for an image.
    pub incomplete: u64,
    /// In-progress frames discarded when a newer frame index arrived.
    pub abandoned: u64,
}

/// Accumulation state for the single in-progress frame.
#[derive(Debug)]
struct FrameBuffer {
    frame_index: u32,
    expected_next_packet_index: u32,
    accumulated: Vec<u8>,
    valid: bool,
}

impl FrameBuffer {
    fn start(frame_index: u32) -> Self {
        Self { frame_index, expected_next_packet_index: 0, accumulated: Vec::new(), valid: true }
    }
}

/// Reassembles preview frames from raw datagrams, one frame at a time.
#[derive(Debug, Default)]
pub struct FrameAssembler {
    buffer: Option<FrameBuffer>,
    stats: AssemblerStats,
}

impl FrameAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one raw datagram and report what happened to it.
    pub fn ingest(&mut self, datagram: &[u8]) -> Ingest {
        let packet = match Packet::parse(datagram) {
            Ok(packet) => packet,
            Err(_) => {
                self.stats.malformed += 1;
                trace!(len = datagram.len(), "dropping malformed datagram");
                return Ingest::Dropped(DropReason::Malformed { len: datagram.len() });
            }
        };
        self.stats.packets += 1;
        let header = packet.header;

        // Newest frame wins: any change of frame index restarts accumulation.
        let buffer = match &mut self.buffer {
            Some(buffer) if buffer.frame_index == header.frame_index => buffer,
            slot => {
                if let Some(old) = slot.take() {
                    if old.valid && !old.accumulated.is_empty() {
                        self.stats.abandoned += 1;
                        debug!(
                            abandoned = old.frame_index,
                            accumulated = old.accumulated.len(),
                            replacement = header.frame_index,
                            "discarding in-progress frame for newer frame index"
                        );
                    }
                }
                slot.insert(FrameBuffer::start(header.frame_index))
            }
        };

        if !buffer.valid {
            self.stats.invalidated += 1;
            return Ingest::Dropped(DropReason::Invalidated { frame_index: header.frame_index });
        }

        if header.packet_index != buffer.expected_next_packet_index {
            let expected = buffer.expected_next_packet_index;
            buffer.valid = false;
            self.stats.sequence_gaps += 1;
            debug!(
                frame_index = header.frame_index,
                expected,
                got = header.packet_index,
                "packet sequence gap, frame invalidated"
            );
            return Ingest::Dropped(DropReason::SequenceGap {
                frame_index: header.frame_index,
                expected,
                got: header.packet_index,
            });
        }

        buffer.accumulated.extend_from_slice(packet.payload);
        buffer.expected_next_packet_index = header.packet_index.wrapping_add(1);

        if header.is_last() {
            if let Some(finished) = self.buffer.replace(FrameBuffer::start(header.frame_index)) {
                return self.seal(finished);
            }
        }

        Ingest::Accumulating
    }

    /// Drop any in-progress frame. Counters are kept.
    pub fn reset(&mut self) {
        self.buffer = None;
    }

    /// Bytes accumulated for the in-progress frame, 0 when idle.
    pub fn pending_len(&self) -> usize {
        self.buffer.as_ref().map_or(0, |buffer| buffer.accumulated.len())
    }

    pub fn stats(&self) -> AssemblerStats {
        self.stats
    }

    fn seal(&mut self, buffer: FrameBuffer) -> Ingest {
        let len = buffer.accumulated.len();
        if len <= METADATA_OFFSET {
            self.stats.incomplete += 1;
            debug!(
                frame_index = buffer.frame_index,
                len, "frame completed without enough bytes for an image"
            );
            return Ingest::Dropped(DropReason::Incomplete { frame_index: buffer.frame_index, len });
        }

        self.stats.frames += 1;
        let mut image = buffer.accumulated;
        image.drain(..METADATA_OFFSET);
        trace!(frame_index = buffer.frame_index, image_len = image.len(), "frame completed");
        Ingest::Completed(CompletedFrame::new(buffer.frame_index, image))
    }
}

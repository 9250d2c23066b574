//! Live-view datagram wire format.
//!
//! While streaming, the camera emits each preview frame as a burst of UDP
//! datagrams. Every datagram carries a fixed 12-byte header followed by a
//! slice of the frame's payload:
//!
//! ```text
//! offset 0   u32 (big-endian)  frame_index
//! offset 4   u32 (big-endian)  total_packet_count
//! offset 8   u32 (big-endian)  packet_index
//! offset 12  payload bytes (arbitrary length)
//! ```
//!
//! Datagrams shorter than the header are malformed and are dropped without
//! touching reassembly state. The first 2048 bytes of a fully accumulated
//! frame are a non-image metadata block; the image container starts after it.
//!
//! ## Performance Characteristics
//!
//! - Binary parsing with explicit big-endian byte order handling
//! - Bounds checking on all header reads
//! - Zero allocation; the payload is a borrowed slice of the datagram

use crate::{CameraError, Result};

/// Size of the fixed datagram header in bytes.
pub const HEADER_LEN: usize = 12;

/// Size of the non-image metadata block prefixed to every completed frame.
pub const METADATA_OFFSET: usize = 2048;

/// Header of one live-view datagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacketHeader {
    /// Identifier shared by all datagrams of one preview frame.
    pub frame_index: u32,
    /// Number of datagrams composing the frame.
    pub total_packet_count: u32,
    /// Position of this datagram within the frame, starting at 0.
    pub packet_index: u32,
}

impl PacketHeader {
    /// Whether this packet is the final one of its frame.
    pub fn is_last(&self) -> bool {
        self.total_packet_count > 0 && self.packet_index == self.total_packet_count - 1
    }
}

/// One parsed live-view datagram: header plus a borrowed payload slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Packet<'a> {
    pub header: PacketHeader,
    pub payload: &'a [u8],
}

impl<'a> Packet<'a> {
    /// Parse one raw datagram.
    ///
    /// Returns [`CameraError::MalformedPacket`] when the datagram is shorter
    /// than the 12-byte header. Pure function of the input bytes; no state.
    pub fn parse(datagram: &'a [u8]) -> Result<Self> {
        if datagram.len() < HEADER_LEN {
            return Err(CameraError::malformed_packet(datagram.len()));
        }

        let frame_index = parse_u32_be(datagram, 0)?;
        let total_packet_count = parse_u32_be(datagram, 4)?;
        let packet_index = parse_u32_be(datagram, 8)?;

        Ok(Self {
            header: PacketHeader { frame_index, total_packet_count, packet_index },
            payload: &datagram[HEADER_LEN..],
        })
    }
}

fn parse_u32_be(data: &[u8], offset: usize) -> Result<u32> {
    if offset + 4 > data.len() {
        return Err(CameraError::Parse {
            context: "Datagram header parsing".to_string(),
            details: format!(
                "Insufficient data for u32 at offset {} (need 4 bytes, have {})",
                offset,
                data.len() - offset
            ),
        });
    }
    Ok(u32::from_be_bytes([data[offset], data[offset + 1], data[offset + 2], data[offset + 3]]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::datagram;
    use proptest::prelude::*;

    #[test]
    fn parses_header_fields_in_big_endian_order() {
        let raw = [
            0x00, 0x00, 0x01, 0x02, // frame_index = 258
            0x00, 0x00, 0x00, 0x03, // total_packet_count = 3
            0x00, 0x00, 0x00, 0x01, // packet_index = 1
            0xAA, 0xBB,
        ];
        let packet = Packet::parse(&raw).unwrap();
        assert_eq!(packet.header.frame_index, 258);
        assert_eq!(packet.header.total_packet_count, 3);
        assert_eq!(packet.header.packet_index, 1);
        assert_eq!(packet.payload, &[0xAA, 0xBB]);
    }

    #[test]
    fn header_only_datagram_has_empty_payload() {
        let raw = datagram(7, 1, 0, &[]);
        assert_eq!(raw.len(), HEADER_LEN);
        let packet = Packet::parse(&raw).unwrap();
        assert!(packet.payload.is_empty());
        assert!(packet.header.is_last());
    }

    #[test]
    fn short_datagram_is_malformed() {
        let raw = [0u8; 11];
        let err = Packet::parse(&raw).unwrap_err();
        assert!(matches!(err, CameraError::MalformedPacket { len: 11 }));

        let err = Packet::parse(&[]).unwrap_err();
        assert!(matches!(err, CameraError::MalformedPacket { len: 0 }));
    }

    #[test]
    fn last_packet_detection() {
        let mid = PacketHeader { frame_index: 1, total_packet_count: 3, packet_index: 1 };
        assert!(!mid.is_last());

        let last = PacketHeader { frame_index: 1, total_packet_count: 3, packet_index: 2 };
        assert!(last.is_last());

        // A zero-packet frame can never complete
        let degenerate = PacketHeader { frame_index: 1, total_packet_count: 0, packet_index: 0 };
        assert!(!degenerate.is_last());
    }

    proptest! {
        #[test]
        fn roundtrip_preserves_header_and_payload(
            frame_index in any::<u32>(),
            total in any::<u32>(),
            index in any::<u32>(),
            payload in prop::collection::vec(any::<u8>(), 0..2000)
        ) {
            let raw = datagram(frame_index, total, index, &payload);
            let packet = Packet::parse(&raw).unwrap();
            prop_assert_eq!(packet.header.frame_index, frame_index);
            prop_assert_eq!(packet.header.total_packet_count, total);
            prop_assert_eq!(packet.header.packet_index, index);
            prop_assert_eq!(packet.payload, payload.as_slice());
        }

        #[test]
        fn any_short_input_is_rejected(raw in prop::collection::vec(any::<u8>(), 0..HEADER_LEN)) {
            let err = Packet::parse(&raw).unwrap_err();
            let is_malformed = matches!(err, CameraError::MalformedPacket { .. });
            prop_assert!(is_malformed);
        }
    }
}

//! Core types for live-view frame representation.
//!
//! This module provides the data structures that flow through the frame
//! pipeline, from UDP reassembly to subscriber streams.
//!
//! ## Architecture
//!
//! - [`CompletedFrame`] represents one fully reassembled preview frame with
//!   zero-copy image data
//! - [`UpdateRate`] controls how often a subscriber sees new frames
//!
//! ## Performance Characteristics
//!
//! - Zero-copy frame sharing via Arc
//! - Cloning a frame never copies image bytes
//! - Rate normalization is a pure function, cheap to call per subscription
//!
//! ## Usage Example
//!
//! ```rust
//! use viewfinder::types::{CompletedFrame, UpdateRate};
//!
//! let frame = CompletedFrame::new(42, vec![0xFF, 0xD8, 0xFF]);
//! assert_eq!(frame.frame_index, 42);
//! assert_eq!(frame.len(), 3);
//!
//! // Clones share the same image allocation
//! let copy = frame.clone();
//! assert_eq!(copy.image, frame.image);
//!
//! // A 120Hz ceiling on a 30Hz preview stream needs no throttle
//! assert!(!UpdateRate::Max(120).needs_throttle(30.0));
//! assert!(UpdateRate::Max(10).needs_throttle(30.0));
//! ```

mod frame;
mod update_rate;

// Re-export all public types
pub use frame::CompletedFrame;
pub use update_rate::UpdateRate;

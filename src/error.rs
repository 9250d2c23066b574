//! Error types for live-view processing.
//!
//! This module provides error handling for the viewfinder library. All errors
//! implement the `std::error::Error` trait and include structured context for
//! debugging and recovery guidance.
//!
//! ## Error Categories
//!
//! - **Bind Errors**: Failure to bind the live-view UDP socket at startup
//! - **Wire Errors**: Malformed or truncated datagram headers
//! - **Command Errors**: Vendor HTTP command transport or status failures
//! - **File Errors**: Problems writing dumped frames to disk
//! - **Shutdown Errors**: Worker task not stopping within the join bound
//!
//! Per-packet stream conditions (sequence gaps, short frames) are not call
//! failures: the engine absorbs them and reports them as drop diagnostics,
//! see [`crate::assembler::DropReason`].
//!
//! ## Recovery and Retry
//!
//! Errors provide methods to determine if they are recoverable:
//!
//! ```rust
//! use viewfinder::CameraError;
//!
//! let error = CameraError::command_failed("camera unreachable");
//! if error.is_retryable() {
//!     for hint in error.recovery_suggestions() {
//!         println!("worth retrying: {hint}");
//!     }
//! }
//! ```
//!
//! ## Helper Constructors
//!
//! Use helper methods for common error scenarios:
//!
//! ```rust
//! use viewfinder::CameraError;
//! use std::path::PathBuf;
//!
//! // Frame dump I/O
//! let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only dir");
//! let file_error = CameraError::file_error(PathBuf::from("/frames/frame_5.jpg"), io_err);
//!
//! // Vendor command failures
//! let cmd_error = CameraError::command_failed("GetCameraStatus returned HTTP 500");
//!
//! // Truncated datagram
//! let wire_error = CameraError::malformed_packet(7);
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for live-view operations.
pub type Result<T, E = CameraError> = std::result::Result<T, E>;

/// Main error type for live-view operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CameraError {
    #[error("Failed to bind live-view socket on {addr}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed datagram: {len} bytes, header needs {}", crate::wire::HEADER_LEN)]
    MalformedPacket { len: usize },

    #[error("Parse error in {context}: {details}")]
    Parse { context: String, details: String },

    #[error("Operation timed out after {duration:?}")]
    Timeout { duration: Duration },

    #[error("Camera command failed: {reason}")]
    Command {
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Frame dump error: {path}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Live-view engine stopped unexpectedly: {reason}")]
    EngineStopped { reason: String },
}

impl CameraError {
    /// Returns whether this error is potentially recoverable through retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            CameraError::Command { .. } => true,
            CameraError::Timeout { .. } => true,
            CameraError::Bind { .. } => false,
            CameraError::MalformedPacket { .. } => false,
            CameraError::Parse { .. } => false,
            CameraError::File { .. } => false,
            CameraError::EngineStopped { .. } => false,
        }
    }

    /// Returns suggested recovery actions for this error.
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            CameraError::Bind { .. } => vec![
                "Check no other instance is bound to the live-view port",
                "Verify firewall rules allow UDP on the configured port",
                "Use port 0 to bind an ephemeral port for local testing",
            ],
            CameraError::MalformedPacket { .. } => vec![
                "Verify the camera firmware sends the 12-byte live-view header",
                "Check for unrelated traffic arriving on the live-view port",
            ],
            CameraError::Parse { .. } => vec![
                "Check datagram framing against the live-view header layout",
                "Verify source data integrity",
            ],
            CameraError::Timeout { .. } => vec![
                "Increase the shutdown join timeout",
                "Check system load",
                "Verify the frame sink is not blocking the worker",
            ],
            CameraError::Command { .. } => vec![
                "Check the Wi-Fi link to the camera",
                "Verify the camera's control endpoint address",
                "Confirm the camera is in remote-control mode",
                "Retry the command",
            ],
            CameraError::File { .. } => vec![
                "Check the output directory exists and is writable",
                "Ensure sufficient disk space",
                "Check file permissions",
            ],
            CameraError::EngineStopped { .. } => vec![
                "Restart the live-view session",
                "Check logs for the worker's exit cause",
            ],
        }
    }

    /// Helper constructor for socket bind failures.
    pub fn bind_failed(addr: SocketAddr, source: std::io::Error) -> Self {
        CameraError::Bind { addr, source }
    }

    /// Helper constructor for truncated datagrams.
    pub fn malformed_packet(len: usize) -> Self {
        CameraError::MalformedPacket { len }
    }

    /// Helper constructor for command failures.
    pub fn command_failed(reason: impl Into<String>) -> Self {
        CameraError::Command { reason: reason.into(), source: None }
    }

    /// Helper constructor for command failures with source.
    pub fn command_failed_with_source(
        reason: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        CameraError::Command { reason: reason.into(), source: Some(source) }
    }

    /// Helper constructor for frame dump errors with path context.
    pub fn file_error(path: PathBuf, source: std::io::Error) -> Self {
        CameraError::File { path, source }
    }

    /// Helper constructor for unexpected worker termination.
    pub fn engine_stopped(reason: impl Into<String>) -> Self {
        CameraError::EngineStopped { reason: reason.into() }
    }
}

#[cfg(feature = "commands")]
impl From<reqwest::Error> for CameraError {
    fn from(err: reqwest::Error) -> Self {
        CameraError::Command { reason: "HTTP transport failure".to_string(), source: Some(Box::new(err)) }
    }
}

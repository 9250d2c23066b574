//! Vendor HTTP command layer
//!
//! The camera exposes a small HTTP interface on its WiFi access point.
//! Every command is a JSON document sent as the `data` query parameter of a
//! GET request; see [`CommandClient`] for the catalog. The same interface
//! opens the remote-control session that makes the camera start streaming
//! preview frames, so [`CommandClient`] also implements
//! [`LiveViewControl`](crate::control::LiveViewControl).

mod client;
mod messages;

pub use client::{CommandClient, DEFAULT_CAMERA_HOST};
pub use messages::{CameraFile, FileFilter, Resolution};

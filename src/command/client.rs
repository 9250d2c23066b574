//! HTTP command client for the camera's vendor protocol

use std::time::Duration;

use tracing::debug;

use crate::control::LiveViewControl;
use crate::error::{CameraError, Result};

use super::messages::{
    AdjustManualFocus, BareCommand, DeleteFiles, FileListResponse, GetFile, GetFileList,
};
use super::{CameraFile, FileFilter, Resolution};

/// Factory-default address of the camera's WiFi access point.
pub const DEFAULT_CAMERA_HOST: &str = "192.168.0.10";

/// Request timeout for camera commands.
const COMMAND_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the camera's HTTP command interface
///
/// Commands are JSON documents passed in the `data` query parameter of a
/// GET request. The camera answers with HTTP 200 (JSON, or raw bytes for
/// file downloads); any other status is a command failure.
#[derive(Debug, Clone)]
pub struct CommandClient {
    host: String,
    http: reqwest::Client,
}

impl CommandClient {
    /// Create a client for a camera reachable at `host`.
    pub fn new(host: impl Into<String>) -> Self {
        let http = reqwest::Client::builder().timeout(COMMAND_TIMEOUT).build().unwrap_or_default();
        Self { host: host.into(), http }
    }

    /// Host this client talks to.
    pub fn host(&self) -> &str {
        &self.host
    }

    fn command_url(&self, payload: &impl serde::Serialize) -> Result<String> {
        let data = serde_json::to_string(payload).map_err(|source| {
            CameraError::command_failed_with_source("could not encode command", Box::new(source))
        })?;
        Ok(format!("http://{}/?data={}", self.host, data))
    }

    async fn send(&self, payload: &impl serde::Serialize) -> Result<reqwest::Response> {
        let url = self.command_url(payload)?;
        debug!(url = %url, "sending camera command");

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(CameraError::command_failed(format!("camera answered HTTP {status}")));
        }
        Ok(response)
    }

    /// Probe the camera and fetch its status document.
    ///
    /// The document's fields vary across firmware revisions, so it is
    /// returned as loose JSON. A successful round trip is itself the
    /// connectivity check.
    pub async fn camera_status(&self) -> Result<serde_json::Value> {
        let response = self.send(&BareCommand::CAMERA_STATUS).await?;
        Ok(response.json().await?)
    }

    /// List files stored on the camera.
    pub async fn list_files(&self, filter: FileFilter) -> Result<Vec<CameraFile>> {
        let response = self.send(&GetFileList::new(filter)).await?;
        let listing: FileListResponse = response.json().await?;
        Ok(listing.data)
    }

    /// Download one stored file in the requested rendition.
    pub async fn fetch_file(&self, path: &str, resolution: Resolution) -> Result<Vec<u8>> {
        let response = self.send(&GetFile::new(path, resolution)).await?;
        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }

    /// Delete stored files by path.
    pub async fn delete_files(
        &self,
        paths: impl IntoIterator<Item = impl Into<String>> + Send,
    ) -> Result<()> {
        let file_list: Vec<String> = paths.into_iter().map(Into::into).collect();
        self.send(&DeleteFiles::new(file_list)).await?;
        Ok(())
    }

    /// Trigger the shutter.
    pub async fn shoot_photo(&self) -> Result<()> {
        self.send(&BareCommand::SHOOT_PHOTO).await?;
        Ok(())
    }

    /// Run one autofocus pass.
    pub async fn focus(&self) -> Result<()> {
        self.send(&BareCommand::FOCUS).await?;
        Ok(())
    }

    /// Nudge manual focus by `steps`; the sign picks the direction.
    pub async fn adjust_manual_focus(&self, steps: i32) -> Result<()> {
        self.send(&AdjustManualFocus::new(steps)).await?;
        Ok(())
    }
}

impl Default for CommandClient {
    fn default() -> Self {
        Self::new(DEFAULT_CAMERA_HOST)
    }
}

#[async_trait::async_trait]
impl LiveViewControl for CommandClient {
    async fn start_live_view(&self) -> Result<()> {
        // Opening a remote-control session is what makes the camera start
        // pushing preview datagrams
        self.send(&BareCommand::START_REMOTE_CONTROL).await?;
        Ok(())
    }

    async fn stop_live_view(&self) -> Result<()> {
        self.send(&BareCommand::STOP_REMOTE_CONTROL).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_url_embeds_the_json_document() {
        let client = CommandClient::new("192.168.0.10");
        let url = client.command_url(&BareCommand::CAMERA_STATUS).unwrap();
        assert_eq!(url, r#"http://192.168.0.10/?data={"command":"GetCameraStatus"}"#);
    }

    #[test]
    fn default_client_targets_the_access_point_address() {
        let client = CommandClient::default();
        assert_eq!(client.host(), DEFAULT_CAMERA_HOST);
    }

    #[test]
    fn custom_host_is_used_verbatim() {
        let client = CommandClient::new("10.1.2.3");
        let url = client.command_url(&BareCommand::FOCUS).unwrap();
        assert!(url.starts_with("http://10.1.2.3/?data="));
    }

    #[tokio::test]
    #[ignore = "camera_required"]
    async fn live_camera_round_trip() {
        let _ = tracing_subscriber::fmt::try_init();

        let client = CommandClient::default();
        let status = client.camera_status().await.expect("camera should answer GetCameraStatus");
        tracing::info!("Camera status: {status}");

        client.start_live_view().await.expect("camera should open a remote-control session");
        client.stop_live_view().await.expect("camera should close the remote-control session");
    }
}

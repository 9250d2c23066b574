//! Vendor HTTP command payloads
//!
//! Every request is a JSON document passed in the `data` query parameter of
//! a GET to the camera. Field names and their order are part of the wire
//! contract, including the firmware's `resulotion` spelling.

use serde::{Deserialize, Serialize};

/// Which stored files to ask the camera for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFilter {
    All,
    Dng,
    Jpg,
}

impl FileFilter {
    pub(crate) fn request_value(self) -> &'static str {
        match self {
            FileFilter::All => "all",
            FileFilter::Dng => "DNG",
            FileFilter::Jpg => "JPG",
        }
    }
}

/// Rendition of a stored file to download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Full capture as written to the card
    Original,
    /// Mid-size preview
    MidThumb,
    /// Small thumbnail
    Thumbnail,
}

impl Resolution {
    pub(crate) fn request_value(self) -> &'static str {
        match self {
            Resolution::Original => "Original",
            Resolution::MidThumb => "MidThumb",
            Resolution::Thumbnail => "Thumbnail",
        }
    }
}

/// One entry in the camera's file listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CameraFile {
    /// Path on the camera's storage, e.g. `/DCIM/100MEDIA/YIM_0001.DNG`
    pub path: String,
    /// The camera's own type tag, `raw` or `jpg`
    pub filetype: String,
}

impl CameraFile {
    /// Whether this entry is a raw capture.
    pub fn is_raw(&self) -> bool {
        self.filetype == "raw"
    }

    /// Whether this entry is a picture file the camera can hand out.
    pub fn is_image(&self) -> bool {
        self.path.ends_with(".DNG") || self.path.ends_with(".JPG")
    }
}

/// Commands that carry no parameters beyond their name.
#[derive(Debug, Clone, Copy, Serialize)]
pub(crate) struct BareCommand {
    command: &'static str,
}

impl BareCommand {
    pub(crate) const CAMERA_STATUS: Self = Self { command: "GetCameraStatus" };
    pub(crate) const START_REMOTE_CONTROL: Self = Self { command: "StartRemoteControl" };
    pub(crate) const STOP_REMOTE_CONTROL: Self = Self { command: "StopRemoteControl" };
    pub(crate) const SHOOT_PHOTO: Self = Self { command: "ShootPhoto" };
    pub(crate) const FOCUS: Self = Self { command: "Focus" };
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct GetFileList {
    command: &'static str,
    range_start: &'static str,
    range_end: &'static str,
    filetype: &'static str,
}

impl GetFileList {
    pub(crate) fn new(filter: FileFilter) -> Self {
        Self {
            command: "GetFileList",
            range_start: "0",
            range_end: "999",
            filetype: filter.request_value(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct GetFile {
    command: &'static str,
    path: String,
    /// The firmware expects the field even when empty
    date: String,
    /// Firmware spells it this way
    #[serde(rename = "resulotion")]
    resolution: &'static str,
}

impl GetFile {
    pub(crate) fn new(path: impl Into<String>, resolution: Resolution) -> Self {
        Self {
            command: "GetFile",
            path: path.into(),
            date: String::new(),
            resolution: resolution.request_value(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct DeleteFiles {
    command: &'static str,
    file_list: Vec<String>,
}

impl DeleteFiles {
    pub(crate) fn new(file_list: Vec<String>) -> Self {
        Self { command: "DeleteFiles", file_list }
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct AdjustManualFocus {
    command: &'static str,
    /// Stringified signed step count, per firmware convention
    adjustment_value: String,
}

impl AdjustManualFocus {
    pub(crate) fn new(steps: i32) -> Self {
        Self { command: "AdjustMF", adjustment_value: steps.to_string() }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct FileListResponse {
    #[serde(default)]
    pub(crate) data: Vec<CameraFile>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json(payload: &impl Serialize) -> String {
        serde_json::to_string(payload).unwrap()
    }

    #[test]
    fn bare_commands_wire_format() {
        assert_eq!(json(&BareCommand::CAMERA_STATUS), r#"{"command":"GetCameraStatus"}"#);
        assert_eq!(json(&BareCommand::START_REMOTE_CONTROL), r#"{"command":"StartRemoteControl"}"#);
        assert_eq!(json(&BareCommand::STOP_REMOTE_CONTROL), r#"{"command":"StopRemoteControl"}"#);
        assert_eq!(json(&BareCommand::SHOOT_PHOTO), r#"{"command":"ShootPhoto"}"#);
        assert_eq!(json(&BareCommand::FOCUS), r#"{"command":"Focus"}"#);
    }

    #[test]
    fn file_list_request_wire_format() {
        assert_eq!(
            json(&GetFileList::new(FileFilter::All)),
            r#"{"command":"GetFileList","range_start":"0","range_end":"999","filetype":"all"}"#
        );
        assert_eq!(
            json(&GetFileList::new(FileFilter::Dng)),
            r#"{"command":"GetFileList","range_start":"0","range_end":"999","filetype":"DNG"}"#
        );
        assert_eq!(
            json(&GetFileList::new(FileFilter::Jpg)),
            r#"{"command":"GetFileList","range_start":"0","range_end":"999","filetype":"JPG"}"#
        );
    }

    #[test]
    fn get_file_request_preserves_firmware_spelling() {
        assert_eq!(
            json(&GetFile::new("/DCIM/100MEDIA/YIM_0001.DNG", Resolution::Original)),
            r#"{"command":"GetFile","path":"/DCIM/100MEDIA/YIM_0001.DNG","date":"","resulotion":"Original"}"#
        );
        assert_eq!(
            json(&GetFile::new("/DCIM/100MEDIA/YIM_0002.JPG", Resolution::Thumbnail)),
            r#"{"command":"GetFile","path":"/DCIM/100MEDIA/YIM_0002.JPG","date":"","resulotion":"Thumbnail"}"#
        );
    }

    #[test]
    fn delete_files_wire_format() {
        let request = DeleteFiles::new(vec!["/DCIM/a.DNG".to_string(), "/DCIM/b.JPG".to_string()]);
        assert_eq!(
            json(&request),
            r#"{"command":"DeleteFiles","file_list":["/DCIM/a.DNG","/DCIM/b.JPG"]}"#
        );
    }

    #[test]
    fn adjust_manual_focus_stringifies_steps() {
        assert_eq!(
            json(&AdjustManualFocus::new(-3)),
            r#"{"command":"AdjustMF","adjustment_value":"-3"}"#
        );
    }

    #[test]
    fn file_list_response_parses_the_data_array() {
        let body = r#"{
            "data": [
                {"path": "/DCIM/100MEDIA/YIM_0001.DNG", "filetype": "raw"},
                {"path": "/DCIM/100MEDIA/YIM_0001.JPG", "filetype": "jpg"},
                {"path": "/DCIM/100MEDIA/clip.SEC", "filetype": "sec"}
            ]
        }"#;

        let listing: FileListResponse = serde_json::from_str(body).unwrap();
        assert_eq!(listing.data.len(), 3);
        assert!(listing.data[0].is_raw());
        assert!(listing.data[0].is_image());
        assert!(!listing.data[1].is_raw());
        assert!(listing.data[1].is_image());
        assert!(!listing.data[2].is_image());
    }

    #[test]
    fn file_list_response_tolerates_missing_data() {
        let listing: FileListResponse = serde_json::from_str("{}").unwrap();
        assert!(listing.data.is_empty());
    }
}

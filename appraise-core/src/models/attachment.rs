//! Pending image attachment

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// An image attachment staged for upload.
///
/// Purely local until finalize: replacing it replaces the preview too,
/// and nothing is sent to the backend before the upload call.
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub mime: String,
}

impl Attachment {
    pub fn new(bytes: Vec<u8>, file_name: impl Into<String>, mime: impl Into<String>) -> Self {
        Self {
            bytes,
            file_name: file_name.into(),
            mime: mime.into(),
        }
    }

    /// Size in bytes of the staged payload
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Locally-rendered preview as a base64 data URL
    pub fn preview_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(&self.bytes))
    }
}

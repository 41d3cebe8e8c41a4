//! Upload adapter for the third-party media host.
//!
//! Files are classified client-side from their extension and posted as
//! multipart requests with an upload preset. Batches run concurrently and
//! report per-file results; one failed upload never aborts the rest, and no
//! retry is performed automatically.

use futures::future::join_all;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{RemoteError, RemoteResult};

/// Image extensions routed to the image handler.
const IMAGE_EXTENSIONS: [&str; 7] = ["jpg", "jpeg", "png", "gif", "webp", "bmp", "svg"];

/// Video extensions routed to the video handler.
const VIDEO_EXTENSIONS: [&str; 5] = ["mp4", "mov", "avi", "mkv", "webm"];

/// Remote handler a file is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceType {
    /// Image files.
    Image,
    /// Video files.
    Video,
    /// Unknown extensions, including documents; the remote host infers the
    /// type.
    Auto,
}

impl ResourceType {
    /// Classify a file by its extension, case-insensitively.
    #[must_use]
    pub fn from_file_name(name: &str) -> Self {
        let Some(extension) = name.rsplit('.').next().filter(|ext| *ext != name) else {
            return Self::Auto;
        };
        let extension = extension.to_lowercase();

        if IMAGE_EXTENSIONS.contains(&extension.as_str()) {
            Self::Image
        } else if VIDEO_EXTENSIONS.contains(&extension.as_str()) {
            Self::Video
        } else {
            Self::Auto
        }
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Image => write!(f, "image"),
            Self::Video => write!(f, "video"),
            Self::Auto => write!(f, "auto"),
        }
    }
}

/// A successfully uploaded file, normalized from the host's response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedMedia {
    /// Public URL of the uploaded file (secure URL preferred).
    pub url: String,
    /// File format reported by the host.
    pub format: Option<String>,
    /// Resource type the host stored the file as.
    pub resource_type: String,
}

/// Raw upload response from the media host.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
    url: Option<String>,
    format: Option<String>,
    resource_type: Option<String>,
}

/// Uploads files to the third-party media host.
#[derive(Debug, Clone)]
pub struct MediaUploader {
    http: Client,
    endpoint: String,
    upload_preset: String,
}

impl MediaUploader {
    /// Create an uploader posting to `endpoint` with the given preset.
    #[must_use]
    pub fn new(endpoint: impl Into<String>, upload_preset: impl Into<String>) -> Self {
        Self::with_http(Client::new(), endpoint, upload_preset)
    }

    /// Create an uploader reusing an existing `reqwest` client.
    #[must_use]
    pub fn with_http(
        http: Client,
        endpoint: impl Into<String>,
        upload_preset: impl Into<String>,
    ) -> Self {
        let endpoint = endpoint.into();
        Self {
            http,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            upload_preset: upload_preset.into(),
        }
    }

    /// Upload a single file.
    ///
    /// The file is routed by its pre-classified resource type; the response
    /// is normalized to an [`UploadedMedia`].
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or a
    /// response missing the uploaded URL.
    pub async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> RemoteResult<UploadedMedia> {
        let resource_type = ResourceType::from_file_name(file_name);
        let url = format!("{}/{resource_type}/upload", self.endpoint);
        debug!("uploading '{file_name}' as {resource_type}");

        let form = Form::new()
            .text("upload_preset", self.upload_preset.clone())
            .part(
                "file",
                Part::bytes(bytes).file_name(file_name.to_string()),
            );

        let response = self.http.post(url).multipart(form).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteError::from_status(status, &body));
        }

        let parsed: UploadResponse = response.json().await?;
        let url = parsed
            .secure_url
            .or(parsed.url)
            .ok_or_else(|| RemoteError::unexpected("upload response carried no URL"))?;

        Ok(UploadedMedia {
            url,
            format: parsed.format,
            resource_type: parsed
                .resource_type
                .unwrap_or_else(|| resource_type.to_string()),
        })
    }

    /// Upload a batch of files concurrently.
    ///
    /// Each file is uploaded independently with no completion-order
    /// guarantee; results are returned in input order. A failure in one file
    /// does not abort the others; callers collect successes and report
    /// failures per file.
    pub async fn upload_batch(
        &self,
        files: Vec<(String, Vec<u8>)>,
    ) -> Vec<RemoteResult<UploadedMedia>> {
        let uploads = files
            .into_iter()
            .map(|(name, bytes)| async move {
                let result = self.upload(&name, bytes).await;
                if let Err(err) = &result {
                    warn!("upload of '{name}' failed: {err}");
                }
                result
            })
            .collect::<Vec<_>>();

        join_all(uploads).await
    }
}

//! Local filesystem storage for uploaded images.
//!
//! The database keeps the POSIX path relative to the media root, the API renders
//! it as an absolute url under `/media/`.

use crate::utils::nice_id;
use image::{ImageFormat, ImageReader};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum MediaError {
    #[error(
        "Upload a valid image. The file you uploaded was either not an image or a corrupted image."
    )]
    InvalidImage,

    #[error("Media storage error: {0}")]
    Io(#[from] std::io::Error),
}

/// Sub folder of the media root an upload is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Photo,
    ProfileImage,
}

impl MediaKind {
    #[must_use]
    pub const fn folder(self) -> &'static str {
        match self {
            Self::Photo => "photos",
            Self::ProfileImage => "profile_images",
        }
    }
}

#[derive(Debug, Clone)]
pub struct MediaStorage {
    root: PathBuf,
    public_url: String,
    file_name_length: usize,
}

impl MediaStorage {
    #[must_use]
    pub fn new(root: PathBuf, public_url: &str, file_name_length: usize) -> Self {
        Self {
            root,
            public_url: public_url.trim_end_matches('/').to_owned(),
            file_name_length,
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute url of a stored file.
    #[must_use]
    pub fn url_for(&self, relative_path: &str) -> String {
        format!("{}/media/{}", self.public_url, relative_path)
    }

    /// Validates `bytes` as an image and writes it under the folder for `kind`.
    /// Returns the relative path to store in the database.
    pub async fn save_image(&self, kind: MediaKind, bytes: &[u8]) -> Result<String, MediaError> {
        let format = detect_image_format(bytes)?;
        let extension = format.extensions_str().first().copied().unwrap_or("img");
        let relative_path = format!(
            "{}/{}.{extension}",
            kind.folder(),
            nice_id(self.file_name_length)
        );

        fs::create_dir_all(self.root.join(kind.folder())).await?;
        fs::write(self.root.join(&relative_path), bytes).await?;
        debug!("Stored {} bytes at {}", bytes.len(), relative_path);

        Ok(relative_path)
    }

    /// Removes a stored file. Failures are logged, not returned.
    pub async fn remove(&self, relative_path: &str) {
        if let Err(e) = fs::remove_file(self.root.join(relative_path)).await {
            warn!("Could not remove media file {}: {}", relative_path, e);
        }
    }

    pub async fn remove_all(&self, relative_paths: &[String]) {
        for path in relative_paths {
            self.remove(path).await;
        }
    }
}

/// Sniffs the format of an uploaded image and checks that its header parses.
pub fn detect_image_format(bytes: &[u8]) -> Result<ImageFormat, MediaError> {
    let format = image::guess_format(bytes).map_err(|_| MediaError::InvalidImage)?;
    if !matches!(
        format,
        ImageFormat::Jpeg | ImageFormat::Png | ImageFormat::WebP | ImageFormat::Gif
    ) {
        return Err(MediaError::InvalidImage);
    }

    ImageReader::with_format(Cursor::new(bytes), format)
        .into_dimensions()
        .map_err(|_| MediaError::InvalidImage)?;

    Ok(format)
}

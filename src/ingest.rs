//! Image ingestion.
//!
//! Reads a user-selected image into a data-URL. The data-URL and the bare
//! base64 payload sent to the contrast service are two views of one string,
//! so they always describe the same file.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use thiserror::Error;

use crate::utils::mime;

/// Source of [`ImageAsset::id`].
static NEXT_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("`{path}` is not an image (detected {mime})")]
    NotImage { path: PathBuf, mime: &'static str },
}

/// An image held in memory as a data-URL.
///
/// Never mutated: selecting another file produces a new asset with a new id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    id: u64,
    name: String,
    mime: &'static str,
    data_url: String,
    /// Byte offset of the base64 payload inside `data_url`.
    payload_at: usize,
}

impl ImageAsset {
    pub fn from_bytes(name: impl Into<String>, mime: &'static str, bytes: &[u8]) -> Self {
        let prefix = format!("data:{mime};base64,");
        let payload_at = prefix.len();
        let mut data_url = prefix;
        BASE64.encode_string(bytes, &mut data_url);

        Self {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            name: name.into(),
            mime,
            data_url,
            payload_at,
        }
    }

    /// Unique per load; two loads of the same file get different ids.
    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn mime(&self) -> &'static str {
        self.mime
    }

    /// `data:<mime>;base64,<payload>` for the preview.
    #[inline]
    pub fn data_url(&self) -> &str {
        &self.data_url
    }

    /// Bare base64 payload for the contrast service.
    #[inline]
    pub fn base64(&self) -> &str {
        &self.data_url[self.payload_at..]
    }
}

/// Read `path` into an [`ImageAsset`].
///
/// `None` is a no-op: nothing was selected, so there is nothing to report.
pub async fn load(path: Option<&Path>) -> Result<Option<ImageAsset>, IngestError> {
    let Some(path) = path else {
        return Ok(None);
    };

    let mime = mime::from_path(path);
    if !mime::is_image(mime) {
        return Err(IngestError::NotImage {
            path: path.to_path_buf(),
            mime,
        });
    }

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|err| IngestError::Io(path.to_path_buf(), err))?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    crate::debug!("ingest"; "loaded {} ({} bytes, {})", name, bytes.len(), mime);
    Ok(Some(ImageAsset::from_bytes(name, mime, &bytes)))
}

//! `data:` URL codec.

use crate::ImageFormat;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use nithan_error::{NithanResult, StorageError, StorageErrorKind};
use std::fmt;
use std::path::Path;
use tracing::{debug, instrument};

/// A base64 `data:` URL split into MIME type and decoded bytes.
///
/// # Examples
///
/// ```
/// use nithan_storage::DataUrl;
///
/// let url = DataUrl::parse("data:image/png;base64,AAEC").unwrap();
/// assert_eq!(url.mime_type(), "image/png");
/// assert_eq!(url.data(), &[0, 1, 2]);
/// assert_eq!(url.to_string(), "data:image/png;base64,AAEC");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DataUrl {
    mime_type: String,
    data: Vec<u8>,
}

impl DataUrl {
    /// Wraps raw bytes.
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data,
        }
    }

    /// Parses `data:<mime>;base64,<payload>`.
    ///
    /// # Errors
    ///
    /// Fails on a missing `data:` prefix, a non-base64 encoding marker, or an
    /// undecodable payload.
    pub fn parse(url: &str) -> NithanResult<Self> {
        let invalid = |reason: &str| {
            StorageError::new(StorageErrorKind::InvalidDataUrl(format!(
                "{} ({})",
                reason,
                preview(url)
            )))
        };

        let rest = url.trim().strip_prefix("data:").ok_or_else(|| invalid("missing data: prefix"))?;
        let (header, payload) = rest.split_once(',').ok_or_else(|| invalid("missing comma"))?;
        let mime_type = header
            .strip_suffix(";base64")
            .ok_or_else(|| invalid("only base64 data URLs are supported"))?;

        let data = STANDARD
            .decode(payload.trim())
            .map_err(|e| invalid(&format!("base64: {}", e)))?;

        Ok(Self {
            mime_type: mime_type.to_string(),
            data,
        })
    }

    /// Reads an image file into a data URL, typed by its extension.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub async fn from_image_file(path: impl AsRef<Path>) -> NithanResult<Self> {
        let path = path.as_ref();
        let format = ImageFormat::from_path(path)?;
        let data = tokio::fs::read(path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileRead(format!("{}: {}", path.display(), e)))
        })?;
        debug!(format = %format, size = data.len(), "Loaded image");
        Ok(Self::new(format.mime_type(), data))
    }

    /// MIME type.
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Decoded bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Image format, if the MIME type is a supported image type.
    pub fn image_format(&self) -> NithanResult<ImageFormat> {
        ImageFormat::from_mime_type(&self.mime_type)
    }
}

impl fmt::Display for DataUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data:{};base64,{}", self.mime_type, STANDARD.encode(&self.data))
    }
}

fn preview(url: &str) -> String {
    url.chars().take(32).collect()
}

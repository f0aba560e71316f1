//! Image formats accepted for illustrations and logos.

use nithan_error::{NithanResult, StorageError, StorageErrorKind};
use std::path::Path;

/// Image format.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, strum::EnumIter, strum::Display,
)]
#[strum(serialize_all = "lowercase")]
pub enum ImageFormat {
    /// PNG
    Png,
    /// JPEG
    Jpeg,
    /// GIF
    Gif,
    /// WebP
    Webp,
    /// SVG
    Svg,
}

impl ImageFormat {
    /// MIME type.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Gif => "image/gif",
            ImageFormat::Webp => "image/webp",
            ImageFormat::Svg => "image/svg+xml",
        }
    }

    /// Preferred file extension, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Gif => "gif",
            ImageFormat::Webp => "webp",
            ImageFormat::Svg => "svg",
        }
    }

    /// Format for a MIME type. Parameters after `;` are ignored.
    ///
    /// ```
    /// use nithan_storage::ImageFormat;
    ///
    /// assert_eq!(ImageFormat::from_mime_type("image/jpeg").unwrap(), ImageFormat::Jpeg);
    /// assert!(ImageFormat::from_mime_type("audio/wav").is_err());
    /// ```
    pub fn from_mime_type(mime_type: &str) -> NithanResult<Self> {
        let essence = mime_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match essence.as_str() {
            "image/png" => Ok(ImageFormat::Png),
            "image/jpeg" | "image/jpg" => Ok(ImageFormat::Jpeg),
            "image/gif" => Ok(ImageFormat::Gif),
            "image/webp" => Ok(ImageFormat::Webp),
            "image/svg+xml" => Ok(ImageFormat::Svg),
            _ => Err(StorageError::new(StorageErrorKind::UnsupportedMediaType(
                mime_type.to_string(),
            ))
            .into()),
        }
    }

    /// Format implied by a file's extension.
    pub fn from_path(path: &Path) -> NithanResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "png" => Ok(ImageFormat::Png),
            "jpg" | "jpeg" => Ok(ImageFormat::Jpeg),
            "gif" => Ok(ImageFormat::Gif),
            "webp" => Ok(ImageFormat::Webp),
            "svg" => Ok(ImageFormat::Svg),
            _ => Err(StorageError::new(StorageErrorKind::UnsupportedMediaType(format!(
                "{} (expected png, jpg, gif, webp or svg)",
                path.display()
            )))
            .into()),
        }
    }
}

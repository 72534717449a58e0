// SPDX-License-Identifier: MIT

//! Receipt file storage.
//!
//! Uploaded receipts are stored flat under the configured upload
//! directory with a UUID prefix so colliding client filenames never
//! overwrite each other. Images are downscaled on ingest; anything the
//! image crate cannot decode is stored as received.

use std::path::{Path, PathBuf};

use image::imageops::FilterType;

use crate::error::AppError;

/// File extensions accepted for receipts.
const ALLOWED_EXTS: &[&str] = &["jpg", "jpeg", "png", "pdf"];

/// Long-edge cap for uploaded receipt images, in pixels.
const MAX_IMAGE_PIXELS: u32 = 2600;

const JPEG_QUALITY: u8 = 85;

/// Stores and serves receipt files.
#[derive(Clone)]
pub struct ReceiptStore {
    dir: PathBuf,
}

impl ReceiptStore {
    /// Create a store rooted at `dir`, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, AppError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("cannot create upload dir: {e}")))?;
        Ok(Self { dir })
    }

    /// Whether a client filename has an accepted extension.
    pub fn extension_allowed(filename: &str) -> bool {
        Path::new(&filename.to_lowercase())
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| ALLOWED_EXTS.contains(&ext))
    }

    /// Store an uploaded receipt and return the generated filename.
    pub async fn save(&self, original_name: &str, bytes: Vec<u8>) -> Result<String, AppError> {
        if !Self::extension_allowed(original_name) {
            return Err(AppError::BadRequest(
                "file type not allowed (jpg, jpeg, png, pdf)".to_string(),
            ));
        }

        let filename = format!(
            "{}_{}",
            uuid::Uuid::new_v4().simple(),
            sanitize_filename(original_name)
        );
        let path = self.dir.join(&filename);

        tokio::task::spawn_blocking(move || -> Result<(), AppError> {
            std::fs::write(&path, &bytes)
                .map_err(|e| AppError::Internal(anyhow::anyhow!("cannot store receipt: {e}")))?;
            downscale_if_image(&path);
            Ok(())
        })
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("blocking task failed: {e}")))??;

        tracing::debug!(filename = %filename, "Receipt stored");
        Ok(filename)
    }

    /// Read a stored receipt for serving. Returns the bytes and the
    /// content type derived from the extension.
    pub async fn read(&self, filename: &str) -> Result<(Vec<u8>, &'static str), AppError> {
        // Stored names are flat; anything that looks like a path is hostile.
        if filename.contains('/') || filename.contains('\\') || filename.contains("..") {
            return Err(AppError::BadRequest("invalid filename".to_string()));
        }

        let path = self.dir.join(filename);
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|_| AppError::NotFound(format!("Receipt {filename} not found")))?;

        Ok((bytes, content_type_for(filename)))
    }
}

/// Strip a client filename down to a safe flat name: path components
/// dropped, anything outside `[A-Za-z0-9._-]` replaced.
fn sanitize_filename(name: &str) -> String {
    let base = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(name);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let trimmed = cleaned.trim_matches('.');
    if trimmed.is_empty() {
        "receipt".to_string()
    } else {
        trimmed.to_string()
    }
}

fn content_type_for(filename: &str) -> &'static str {
    match Path::new(&filename.to_lowercase())
        .extension()
        .and_then(|e| e.to_str())
    {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}

/// Downscale an image to the pixel cap, re-encoding in place.
/// Best effort: files that fail to decode are left untouched.
fn downscale_if_image(path: &Path) {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());
    let is_image = matches!(ext.as_deref(), Some("jpg") | Some("jpeg") | Some("png"));
    if !is_image {
        return;
    }

    let img = match image::open(path) {
        Ok(img) => img,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "Receipt not decodable, stored as-is");
            return;
        }
    };

    let img = if img.width() > MAX_IMAGE_PIXELS || img.height() > MAX_IMAGE_PIXELS {
        img.resize(MAX_IMAGE_PIXELS, MAX_IMAGE_PIXELS, FilterType::Triangle)
    } else {
        img
    };

    let result = if matches!(ext.as_deref(), Some("png")) {
        img.save(path).map_err(anyhow::Error::from)
    } else {
        // JPEG re-encode at fixed quality
        std::fs::File::create(path)
            .map_err(anyhow::Error::from)
            .and_then(|file| {
                let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(
                    std::io::BufWriter::new(file),
                    JPEG_QUALITY,
                );
                encoder
                    .encode_image(&img.to_rgb8())
                    .map_err(anyhow::Error::from)
            })
    };

    if let Err(e) = result {
        tracing::warn!(path = %path.display(), error = %e, "Failed to re-encode receipt image");
    }
}

use bytes::Bytes;
use chrono::Utc;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::error::{AppError, Result};

/// Local file system blob store.
///
/// Uploaded bytes live flat under the configured root, keyed by a
/// server-generated stored filename, and are served back at
/// `/uploads/{filename}`.
pub struct BlobStore {
    root: PathBuf,
}

impl BlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Idempotent creation of the storage root, parents included.
    pub async fn ensure_root(&self) -> Result<()> {
        fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    /// Generate a collision-resistant stored filename for an upload.
    ///
    /// Shape: `{epoch-millis}-{token}-{sanitized-base}{ext}`. The random
    /// token keeps concurrent uploads of the same name from colliding within
    /// one millisecond.
    pub fn unique_name(original: &str) -> String {
        let (base, ext) = split_name(original);
        let millis = Utc::now().timestamp_millis();
        let token = Uuid::new_v4().simple().to_string();
        format!("{}-{}-{}{}", millis, &token[..8], sanitize(base), ext)
    }

    /// Write bytes under `root/name`, creating the root if needed. Overwrites
    /// silently if `name` already exists; no existence check is performed.
    pub async fn save(&self, name: &str, data: Bytes) -> Result<PathBuf> {
        self.ensure_root().await?;

        let full_path = self.root.join(name);
        let mut file = fs::File::create(&full_path).await?;
        file.write_all(&data).await?;
        file.flush().await?;

        tracing::debug!("Saved blob to {:?}", full_path);
        Ok(full_path)
    }

    /// Read a blob back.
    pub async fn read(&self, name: &str) -> Result<Bytes> {
        let full_path = self.root.join(name);

        let data = fs::read(&full_path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::NotFound(format!("File not found: {}", name))
            } else {
                AppError::Storage(format!("Failed to read file: {}", e))
            }
        })?;

        Ok(Bytes::from(data))
    }

    /// Remove a blob. Returns `true` if the file existed and was removed,
    /// `false` if it was already absent.
    pub async fn remove(&self, name: &str) -> Result<bool> {
        let full_path = self.root.join(name);

        match fs::remove_file(&full_path).await {
            Ok(()) => {
                tracing::debug!("Deleted blob {:?}", full_path);
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Public retrieval path for a stored filename.
    pub fn public_path(name: &str) -> String {
        format!("/uploads/{}", name)
    }
}

/// Split an original filename into base name and extension (dot included).
/// A leading dot is part of the base name, not an extension.
fn split_name(original: &str) -> (&str, &str) {
    match original.rfind('.') {
        Some(pos) if pos > 0 => (&original[..pos], &original[pos..]),
        _ => (original, ""),
    }
}

/// Replace anything outside `[A-Za-z0-9._-]` so the display name cannot
/// smuggle separators or shell metacharacters into the stored name.
fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Human-readable file size: powers of 1024, up to two decimals with
/// trailing zeros trimmed.
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    let exp = ((bytes as f64).ln() / 1024f64.ln()).floor() as usize;
    let exp = exp.min(UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(exp as i32);

    let mut rendered = format!("{:.2}", value);
    if rendered.contains('.') {
        rendered = rendered.trim_end_matches('0').trim_end_matches('.').to_string();
    }

    format!("{} {}", rendered, UNITS[exp])
}

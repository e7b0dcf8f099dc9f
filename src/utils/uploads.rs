//! Uploaded-attachment persistence. Files land under
//! `<upload_dir>/<folder>/<millis>-<original-name>` and are addressed by
//! the `/uploads/...` path stored in the owning row.

use chrono::Utc;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug)]
pub struct StoredFile {
    /// Path stored in the database and served over HTTP.
    pub public_path: String,
    pub disk_path: PathBuf,
}

/// Strips any path components a client may have smuggled into the
/// submitted file name.
fn sanitize_name(original: &str) -> String {
    let base = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(original)
        .trim();
    if base.is_empty() {
        "file".to_string()
    } else {
        base.to_string()
    }
}

pub fn store(
    upload_dir: &Path,
    folder: &str,
    original_name: &str,
    bytes: &[u8],
) -> io::Result<StoredFile> {
    let file_name = format!("{}-{}", Utc::now().timestamp_millis(), sanitize_name(original_name));

    let dir = upload_dir.join(folder);
    fs::create_dir_all(&dir)?;

    let disk_path = dir.join(&file_name);
    fs::write(&disk_path, bytes)?;

    Ok(StoredFile {
        public_path: format!("/uploads/{}/{}", folder, file_name),
        disk_path,
    })
}

/// Best-effort removal of a file whose owning row failed to persist.
pub fn discard(stored: &StoredFile) {
    if let Err(e) = fs::remove_file(&stored.disk_path) {
        warn!(error = %e, path = %stored.disk_path.display(), "Failed to remove orphaned upload");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_upload_dir(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "hr-records-uploads-{}-{}",
            tag,
            std::process::id()
        ))
    }

    #[test]
    fn store_writes_file_and_returns_public_path() {
        let dir = temp_upload_dir("store");
        let stored = store(&dir, "photos", "nour.jpg", b"jpeg bytes").unwrap();

        assert!(stored.public_path.starts_with("/uploads/photos/"));
        assert!(stored.public_path.ends_with("-nour.jpg"));
        assert_eq!(fs::read(&stored.disk_path).unwrap(), b"jpeg bytes");

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn store_strips_client_supplied_directories() {
        let dir = temp_upload_dir("sanitize");
        let stored = store(&dir, "docs", "../../etc/passwd", b"x").unwrap();

        assert!(stored.public_path.ends_with("-passwd"));
        assert!(stored.disk_path.starts_with(dir.join("docs")));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn discard_removes_the_file() {
        let dir = temp_upload_dir("discard");
        let stored = store(&dir, "docs", "cv.pdf", b"pdf").unwrap();
        assert!(stored.disk_path.exists());

        discard(&stored);
        assert!(!stored.disk_path.exists());

        fs::remove_dir_all(&dir).ok();
    }
}

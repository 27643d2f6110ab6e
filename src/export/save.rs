//! File save and size reporting.
//!
//! Writes export content to disk and reports the written size in bytes and
//! in human-readable form.

use crate::error::{ExportError, ExportResult};
use crate::models::SavedFile;
use std::fs;
use std::path::Path;
use tracing::debug;

const SIZE_UNITS: &[&str] = &["Bytes", "KB", "MB", "GB"];

/// Write `content` to `dir/filename` and report what was written.
///
/// `size_bytes` is the UTF-8 byte length of the content, which for
/// multi-byte text differs from its character count. Permission and
/// disk-space failures map to their dedicated error variants.
pub fn save_to_file(content: &str, filename: &str, dir: &Path) -> ExportResult<SavedFile> {
    let path = dir.join(filename);
    let bytes = content.as_bytes();
    fs::write(&path, bytes).map_err(|e| ExportError::save(&path, e))?;
    debug!(path = %path.display(), size_bytes = bytes.len(), "File written");
    Ok(SavedFile {
        filename: filename.to_string(),
        path,
        size_bytes: bytes.len() as u64,
    })
}

/// Render a byte count for humans: base-1024 units up to GB, two decimals
/// with trailing zeros dropped. Sizes beyond GB stay in GB.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let exponent = (bytes.ilog2() / 10).min(SIZE_UNITS.len() as u32 - 1);
    let value = bytes as f64 / 1024f64.powi(exponent as i32);
    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, SIZE_UNITS[exponent as usize])
}

/// Probe whether saving into `dir` can work at all.
///
/// Advisory only. Callers still attempt the save and handle failure through
/// the error path, since the probe races against the filesystem.
pub fn is_save_supported(dir: &Path) -> bool {
    dir.is_dir()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_writes_content_and_reports_size() {
        let dir = tempfile::tempdir().unwrap();
        let saved = save_to_file("id,name\r\n1,Alice\r\n", "out.csv", dir.path()).unwrap();

        assert_eq!(saved.filename, "out.csv");
        assert_eq!(saved.path, dir.path().join("out.csv"));
        assert_eq!(saved.size_bytes, 18);
        assert_eq!(fs::read_to_string(&saved.path).unwrap(), "id,name\r\n1,Alice\r\n");
    }

    #[test]
    fn test_save_counts_bytes_not_chars() {
        let dir = tempfile::tempdir().unwrap();
        let content = "名前\r\n日本語\r\n";
        let saved = save_to_file(content, "out.csv", dir.path()).unwrap();
        assert_eq!(saved.size_bytes, content.len() as u64);
        assert!(saved.size_bytes > content.chars().count() as u64);
    }

    #[test]
    fn test_save_into_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent");
        let err = save_to_file("x", "out.csv", &missing).unwrap_err();
        assert!(matches!(err, ExportError::Save { .. }));
        assert_eq!(err.code(), "EXPORT_FAILED");
    }

    #[test]
    fn test_format_file_size_unit_ladder() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(1), "1 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1023), "1023 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(2_464_154), "2.35 MB");
        assert_eq!(format_file_size(1_073_741_824), "1 GB");
    }

    #[test]
    fn test_format_file_size_stays_in_gb() {
        assert_eq!(format_file_size(5_497_558_138_880), "5120 GB");
    }

    #[test]
    fn test_format_file_size_rounds_at_unit_boundary() {
        // Just under 1 MB still renders in KB
        assert_eq!(format_file_size(1_048_575), "1024 KB");
    }

    #[test]
    fn test_is_save_supported() {
        let dir = tempfile::tempdir().unwrap();
        assert!(is_save_supported(dir.path()));
        assert!(!is_save_supported(&dir.path().join("absent")));

        let file = dir.path().join("a.txt");
        fs::write(&file, "x").unwrap();
        assert!(!is_save_supported(&file));
    }
}

//! Upload collaborator used by the image block editor.

use std::future::Future;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("no file selected")]
    NoFile,
    #[error("upload rejected: {0}")]
    Rejected(String),
    #[error("failed to store upload: {0}")]
    Io(#[from] std::io::Error),
}

/// A file chosen in the editor but not yet uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Stores a file and returns the public URL it is served from.
pub trait Uploader {
    fn upload(&self, file: &PendingFile) -> impl Future<Output = Result<String, UploadError>> + Send;
}

/// Reduce a client-supplied file name to a safe final path component.
pub fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned.to_string()
    }
}

/// Stored name of an upload: `<unix millis>-<sanitised name>`.
pub fn stored_file_name(unix_millis: i64, original: &str) -> String {
    format!("{unix_millis}-{}", sanitize_file_name(original))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_directories_and_odd_characters() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\photos\\site plan.png"), "site_plan.png");
        assert_eq!(sanitize_file_name(".hidden"), "hidden");
        assert_eq!(sanitize_file_name(""), "file");
    }

    #[test]
    fn keeps_arabic_names() {
        assert_eq!(sanitize_file_name("شعار.png"), "شعار.png");
    }

    #[test]
    fn stored_name_is_timestamp_prefixed() {
        assert_eq!(stored_file_name(1700000000000, "logo.svg"), "1700000000000-logo.svg");
    }
}

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

use jis_site_core::upload::{stored_file_name, PendingFile, UploadError, Uploader};

/// URL prefix uploaded files are served under.
pub const UPLOADS_ROUTE: &str = "/uploads";

/// Later timestamps tried when a stored name is already taken.
const NAME_ATTEMPTS: i64 = 16;

/// Uploads written to a local directory and served back by `ServeDir`.
#[derive(Debug, Clone)]
pub struct LocalUploads {
    dir: PathBuf,
}

impl LocalUploads {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the upload directory if it does not exist yet.
    pub async fn ensure_dir(&self) -> Result<(), UploadError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        Ok(())
    }

    /// Write `file` under the first free name from `unix_millis` onwards.
    /// Existing files are never overwritten.
    async fn store_at(&self, unix_millis: i64, file: &PendingFile) -> Result<String, UploadError> {
        for offset in 0..NAME_ATTEMPTS {
            let name = stored_file_name(unix_millis + offset, &file.file_name);
            let opened = OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(self.dir.join(&name))
                .await;
            match opened {
                Ok(mut out) => {
                    out.write_all(&file.bytes).await?;
                    out.flush().await?;
                    return Ok(name);
                }
                Err(error) if error.kind() == ErrorKind::AlreadyExists => {
                    tracing::debug!(file = %name, "upload name taken, trying the next one");
                }
                Err(error) => return Err(error.into()),
            }
        }
        Err(UploadError::Io(std::io::Error::new(
            ErrorKind::AlreadyExists,
            format!("no free name for {:?}", file.file_name),
        )))
    }
}

impl Uploader for LocalUploads {
    async fn upload(&self, file: &PendingFile) -> Result<String, UploadError> {
        self.ensure_dir().await?;
        let name = self
            .store_at(chrono::Utc::now().timestamp_millis(), file)
            .await?;
        tracing::info!(file = %name, bytes = file.bytes.len(), "stored upload");
        Ok(format!("{UPLOADS_ROUTE}/{name}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn writes_file_and_returns_public_url() {
        let dir = tempfile::tempdir().unwrap();
        let uploads = LocalUploads::new(dir.path().join("uploads"));
        let file = PendingFile {
            file_name: "site plan.png".into(),
            content_type: Some("image/png".into()),
            bytes: vec![1, 2, 3],
        };

        let url = uploads.upload(&file).await.unwrap();

        let name = url.strip_prefix("/uploads/").unwrap();
        assert!(name.ends_with("-site_plan.png"));
        let stored = tokio::fs::read(uploads.dir().join(name)).await.unwrap();
        assert_eq!(stored, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn same_name_in_the_same_millisecond_gets_its_own_file() {
        let dir = tempfile::tempdir().unwrap();
        let uploads = LocalUploads::new(dir.path());
        let first = PendingFile {
            file_name: "logo.png".into(),
            content_type: None,
            bytes: b"first".to_vec(),
        };
        let second = PendingFile {
            bytes: b"second".to_vec(),
            ..first.clone()
        };

        let a = uploads.store_at(1_700_000_000_000, &first).await.unwrap();
        let b = uploads.store_at(1_700_000_000_000, &second).await.unwrap();

        assert_eq!(a, "1700000000000-logo.png");
        assert_eq!(b, "1700000000001-logo.png");
        assert_eq!(tokio::fs::read(dir.path().join(&a)).await.unwrap(), b"first");
        assert_eq!(tokio::fs::read(dir.path().join(&b)).await.unwrap(), b"second");
    }
}

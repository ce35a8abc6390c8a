//! Whole-document JSON file store.
//!
//! Every mutation reads the entire document, changes it in memory and writes
//! the entire document back. There is no lock and no version check: two
//! writers that read the same state race, and the last save wins.

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::id::new_id;
use super::model::{SiteDocument, User};
use crate::auth::password::hash_password;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to seed admin user: {0}")]
    Seed(String),
}

/// Credentials for the admin created alongside a fresh document.
#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Open the store, creating a fresh document when the file is missing.
    pub async fn open_or_init(
        path: impl Into<PathBuf>,
        seed: Option<AdminSeed>,
    ) -> Result<Self, StoreError> {
        let store = Self::new(path);
        let exists = tokio::fs::try_exists(&store.path)
            .await
            .map_err(|source| store.io_error(source))?;
        if exists {
            return Ok(store);
        }

        if let Some(parent) = store.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| store.io_error(source))?;
        }

        let document = fresh_document(seed)?;
        store.save(&document).await?;
        tracing::info!(path = %store.path.display(), users = document.users.len(), "created new document store");
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the whole document.
    pub async fn load(&self) -> Result<SiteDocument, StoreError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| self.io_error(source))?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Replace the whole document.
    ///
    /// The new content is written to a sibling temp file and renamed over the
    /// original, so a failed write leaves the previous document in place.
    pub async fn save(&self, document: &SiteDocument) -> Result<(), StoreError> {
        let body = serde_json::to_string_pretty(document)?;
        let temp = self.temp_path();

        if let Err(source) = tokio::fs::write(&temp, body).await {
            return Err(StoreError::Io { path: temp, source });
        }
        if let Err(source) = tokio::fs::rename(&temp, &self.path).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(self.io_error(source));
        }
        Ok(())
    }

    /// Load, apply `change`, and save when it succeeds.
    ///
    /// Nothing is written when `change` returns an error.
    pub async fn update<T, E, F>(&self, change: F) -> Result<T, E>
    where
        F: FnOnce(&mut SiteDocument) -> Result<T, E>,
        E: From<StoreError>,
    {
        let mut document = self.load().await?;
        let value = change(&mut document)?;
        self.save(&document).await?;
        Ok(value)
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "db.json".to_string());
        self.path.with_file_name(format!(".{name}.{}.tmp", new_id()))
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

fn fresh_document(seed: Option<AdminSeed>) -> Result<SiteDocument, StoreError> {
    let mut document = SiteDocument {
        jwt_secret: format!("{}{}", new_id(), new_id()).replace('-', ""),
        ..SiteDocument::default()
    };

    if let Some(seed) = seed {
        let password = hash_password(&seed.password).map_err(|e| StoreError::Seed(e.to_string()))?;
        document.users.push(User {
            id: serde_json::Value::String(new_id()),
            username: seed.username,
            password,
        });
    }
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::model::Page;

    fn page(slug: &str, title: &str) -> Page {
        Page {
            slug: slug.into(),
            title: title.into(),
            content: vec![],
            extra: Default::default(),
        }
    }

    async fn seeded_store(dir: &tempfile::TempDir) -> JsonFileStore {
        let store = JsonFileStore::open_or_init(dir.path().join("db.json"), None)
            .await
            .unwrap();
        store
            .update(|doc| {
                doc.pages.push(page("about-us", "About"));
                doc.pages.push(page("careers", "Careers"));
                Ok::<_, StoreError>(())
            })
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn init_creates_empty_document_with_secret() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open_or_init(dir.path().join("nested/db.json"), None)
            .await
            .unwrap();

        let doc = store.load().await.unwrap();
        assert!(doc.pages.is_empty());
        assert!(doc.users.is_empty());
        assert_eq!(doc.jwt_secret.len(), 64);
    }

    #[tokio::test]
    async fn init_seeds_hashed_admin() {
        let dir = tempfile::tempdir().unwrap();
        let seed = AdminSeed {
            username: "admin".into(),
            password: "changeme".into(),
        };
        let store = JsonFileStore::open_or_init(dir.path().join("db.json"), Some(seed))
            .await
            .unwrap();

        let doc = store.load().await.unwrap();
        let admin = doc.user("admin").unwrap();
        assert!(admin.password.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn init_keeps_existing_document() {
        let dir = tempfile::tempdir().unwrap();
        let store = seeded_store(&dir).await;

        let reopened = JsonFileStore::open_or_init(store.path(), None).await.unwrap();
        assert_eq!(reopened.load().await.unwrap().pages.len(), 2);
    }

    #[tokio::test]
    async fn save_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        seeded_store(&dir).await;

        let mut entries = tokio::fs::read_dir(dir.path()).await.unwrap();
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await.unwrap() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        assert_eq!(names, vec!["db.json".to_string()]);
    }

    #[tokio::test]
    async fn failed_change_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = seeded_store(&dir).await;

        let result: Result<(), StoreError> = store
            .update(|doc| {
                doc.pages.clear();
                Err(StoreError::Seed("abort".into()))
            })
            .await;

        assert!(result.is_err());
        assert_eq!(store.load().await.unwrap().pages.len(), 2);
    }

    #[tokio::test]
    async fn corrupt_document_is_a_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.json");
        tokio::fs::write(&path, "{ not json").await.unwrap();

        let err = JsonFileStore::new(&path).load().await.unwrap_err();
        assert!(matches!(err, StoreError::Json(_)));
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = JsonFileStore::new(dir.path().join("absent.json"))
            .load()
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }

    #[tokio::test]
    async fn concurrent_writers_lose_updates() {
        let dir = tempfile::tempdir().unwrap();
        let store = seeded_store(&dir).await;

        // Both writers read the same state before either saves.
        let mut first = store.load().await.unwrap();
        let mut second = store.load().await.unwrap();

        first.pages[0].title = "About JIS".into();
        second.pages[1].title = "Join Us".into();

        store.save(&first).await.unwrap();
        store.save(&second).await.unwrap();

        let stored = store.load().await.unwrap();
        assert_eq!(stored.page("about-us").unwrap().title, "About");
        assert_eq!(stored.page("careers").unwrap().title, "Join Us");
    }
}

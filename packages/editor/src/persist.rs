//! # Persistence Boundary
//!
//! The store never knows where pages go. Save and publish operations take
//! a [`PagePersister`] per call; the store only sees success or failure.

use async_trait::async_trait;
use std::future::Future;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use vinyl_model::PageContent;

#[derive(Error, Debug)]
pub enum PersistError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Rejected by server: {0}")]
    Rejected(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid page: {0}")]
    Invalid(String),
}

/// Writes a page snapshot somewhere durable
#[async_trait]
pub trait PagePersister: Send + Sync {
    async fn persist(&self, page: &PageContent) -> Result<(), PersistError>;
}

/// Adapts an async closure into a persister
pub struct FnPersister<F> {
    f: F,
}

impl<F, Fut> FnPersister<F>
where
    F: Fn(PageContent) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), PersistError>> + Send + 'static,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait]
impl<F, Fut> PagePersister for FnPersister<F>
where
    F: Fn(PageContent) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), PersistError>> + Send + 'static,
{
    async fn persist(&self, page: &PageContent) -> Result<(), PersistError> {
        (self.f)(page.clone()).await
    }
}

/// Stores each page as `<slug>.json` inside a directory
#[derive(Debug, Clone)]
pub struct JsonFilePersister {
    dir: PathBuf,
}

impl JsonFilePersister {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File a page with this slug is written to
    pub fn path_for(&self, slug: &str) -> Result<PathBuf, PersistError> {
        let slug = slug.trim();
        if slug.is_empty() {
            return Err(PersistError::Invalid("slug is empty".to_string()));
        }
        if slug.contains(['/', '\\']) || slug.contains("..") {
            return Err(PersistError::Invalid(format!("slug '{}' is not a plain name", slug)));
        }
        Ok(self.dir.join(format!("{}.json", slug)))
    }
}

#[async_trait]
impl PagePersister for JsonFilePersister {
    async fn persist(&self, page: &PageContent) -> Result<(), PersistError> {
        let path = self.path_for(&page.slug)?;
        let json = serde_json::to_vec_pretty(page)?;

        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(&path, json).await?;

        debug!(path = %path.display(), page_id = %page.id, "Page written");
        Ok(())
    }
}

use async_trait::async_trait;
use serde_json::Value;

use souk_catalog::Category;

use crate::error::ApiError;

/// Seam over where marketplace data comes from, so the form engine and the
/// CLI behave identically against the network or captured payloads.
#[async_trait]
pub trait MarketSource: Send + Sync {
    async fn categories(&self) -> Result<Vec<Category>, ApiError>;

    /// Raw `categoryFields` body for one category slug.
    async fn category_fields(&self, slug: &str) -> Result<Value, ApiError>;
}

#[cfg(feature = "http")]
#[async_trait]
impl MarketSource for crate::client::ApiClient {
    async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        crate::client::ApiClient::categories(self).await
    }

    async fn category_fields(&self, slug: &str) -> Result<Value, ApiError> {
        crate::client::ApiClient::category_fields(self, slug).await
    }
}

/// Reads previously captured API payloads from a directory:
/// `categories.json` plus `categoryFields/{slug}.json`.
#[cfg(feature = "fs")]
#[derive(Debug, Clone)]
pub struct FileSource {
    root: std::path::PathBuf,
}

#[cfg(feature = "fs")]
impl FileSource {
    pub fn new(root: impl Into<std::path::PathBuf>) -> Self {
        Self { root: root.into() }
    }

    async fn read<T: serde::de::DeserializeOwned>(&self, relative: &str) -> Result<T, ApiError> {
        let path = self.root.join(relative);
        tracing::debug!(path = %path.display(), "reading captured payload");
        let raw = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| ApiError::Read {
                location: path.display().to_string(),
                source,
            })?;
        serde_json::from_str(&raw).map_err(|source| ApiError::Decode {
            location: path.display().to_string(),
            source,
        })
    }
}

#[cfg(feature = "fs")]
#[async_trait]
impl MarketSource for FileSource {
    async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        self.read("categories.json").await
    }

    async fn category_fields(&self, slug: &str) -> Result<Value, ApiError> {
        self.read(&format!("categoryFields/{slug}.json")).await
    }
}

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use souk_catalog::Category;

use crate::error::ApiError;

/// Production marketplace origin used when nothing overrides it.
pub const DEFAULT_ORIGIN: &str = "https://www.olx.com.lb";

/// Environment variable overriding the marketplace origin.
pub const ORIGIN_ENV_VAR: &str = "SOUK_ORIGIN";

/// Plain unauthenticated client for the two marketplace endpoints.
#[derive(Debug, Clone)]
pub struct ApiClient {
    origin: Url,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(origin: Url) -> Self {
        Self {
            origin,
            http: reqwest::Client::new(),
        }
    }

    /// Builds a client from `SOUK_ORIGIN`, falling back to the production
    /// origin.
    pub fn from_env() -> Result<Self, ApiError> {
        let raw = std::env::var(ORIGIN_ENV_VAR).unwrap_or_else(|_| DEFAULT_ORIGIN.to_string());
        Self::from_origin_str(&raw)
    }

    pub fn from_origin_str(raw: &str) -> Result<Self, ApiError> {
        let origin = raw
            .parse::<Url>()
            .map_err(|source| ApiError::InvalidOrigin {
                origin: raw.to_string(),
                source,
            })?;
        Ok(Self::new(origin))
    }

    pub fn origin(&self) -> &Url {
        &self.origin
    }

    /// Fetches the whole category tree.
    pub async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        let url = self.endpoint("api/categories")?;
        self.get_json(url).await
    }

    /// Fetches the raw posting-field body for one category slug; boundary
    /// normalization lives in souk-catalog.
    pub async fn category_fields(&self, slug: &str) -> Result<Value, ApiError> {
        let url = self.fields_url(slug)?;
        self.get_json(url).await
    }

    fn fields_url(&self, slug: &str) -> Result<Url, ApiError> {
        let mut url = self.endpoint("api/categoryFields")?;
        url.query_pairs_mut()
            .append_pair("categorySlugs", slug)
            .append_pair("includeChildCategories", "true")
            .append_pair("splitByCategoryIDs", "true")
            .append_pair("flatChoices", "true")
            .append_pair("groupChoicesBySection", "true")
            .append_pair("flat", "true");
        Ok(url)
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.origin
            .join(path)
            .map_err(|source| ApiError::InvalidOrigin {
                origin: format!("{}{path}", self.origin),
                source,
            })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        debug!(%url, "marketplace request");
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|source| ApiError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|source| ApiError::Request {
            url: url.to_string(),
            source,
        })?;
        serde_json::from_str(&body).map_err(|source| ApiError::Decode {
            location: url.to_string(),
            source,
        })
    }
}

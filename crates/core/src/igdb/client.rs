use anyhow::{Context, Result};
use reqwest::{
    blocking::{Client, ClientBuilder},
    header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION},
};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{IgdbError, MetadataSource, Query};
use crate::{
    config::AppConfig,
    download::untimed_client_builder,
    models::{Cover, Game, Genre, Id, Platform, ReleaseDate, Screenshot},
};

/// API credentials issued by the service.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Application client identifier.
    pub client_id: String,
    /// App access token sent as a bearer token.
    pub access_token: String,
}

/// Authenticated client for the IGDB v4 API.
#[derive(Debug, Clone)]
pub struct IgdbClient {
    http: Client,
    api_url: String,
    image_url: String,
    image_size: String,
    search_limit: u32,
}

impl IgdbClient {
    /// Build a client for the endpoints in `config`.
    pub fn new(credentials: &Credentials, config: &AppConfig) -> Result<Self> {
        Self::with_builder(untimed_client_builder(), credentials, config)
    }

    /// Build a client on top of a preconfigured HTTP builder.
    pub fn with_builder(
        builder: ClientBuilder,
        credentials: &Credentials,
        config: &AppConfig,
    ) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("client-id"),
            HeaderValue::from_str(&credentials.client_id).context("invalid client id")?,
        );
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", credentials.access_token))
            .context("invalid access token")?;
        bearer.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);

        let http = builder
            .default_headers(headers)
            .build()
            .context("failed to build metadata HTTP client")?;

        Ok(Self {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            image_url: config.image_url.trim_end_matches('/').to_string(),
            image_size: config.image_size.clone(),
            search_limit: config.search_limit,
        })
    }

    fn post<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        query: &Query,
    ) -> Result<Vec<T>, IgdbError> {
        let body = query.build();
        debug!(endpoint, %body, "querying metadata service");

        let response = self
            .http
            .post(format!("{}/{}", self.api_url, endpoint))
            .body(body)
            .send()?;
        let status = response.status();
        let text = response.text()?;
        if !status.is_success() {
            return Err(IgdbError::Status {
                endpoint,
                status: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str(&text).map_err(|source| IgdbError::Decode { endpoint, source })
    }

    fn get<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        id: Id,
        fields: &[&str],
    ) -> Result<T, IgdbError> {
        let query = Query::new().fields(fields).where_id(id);
        self.post::<T>(endpoint, &query)?
            .into_iter()
            .next()
            .ok_or(IgdbError::NotFound { endpoint, id })
    }
}

impl MetadataSource for IgdbClient {
    fn search_games(&self, name: &str) -> Result<Vec<Game>, IgdbError> {
        let query = Query::new()
            .search(name)
            .fields(&["*"])
            .limit(self.search_limit);
        self.post("games", &query)
    }

    fn platform(&self, id: Id) -> Result<Platform, IgdbError> {
        self.get("platforms", id, &["name"])
    }

    fn genre(&self, id: Id) -> Result<Genre, IgdbError> {
        self.get("genres", id, &["name"])
    }

    fn release_date(&self, id: Id) -> Result<ReleaseDate, IgdbError> {
        self.get("release_dates", id, &["human", "platform", "region", "date"])
    }

    fn cover(&self, id: Id) -> Result<Cover, IgdbError> {
        self.get("covers", id, &["image_id"])
    }

    fn screenshots(&self, ids: &[Id]) -> Result<Vec<Screenshot>, IgdbError> {
        let limit = u32::try_from(ids.len()).unwrap_or(u32::MAX);
        let query = Query::new().fields(&["image_id"]).where_ids(ids).limit(limit);
        self.post("screenshots", &query)
    }

    fn screenshot(&self, id: Id) -> Result<Screenshot, IgdbError> {
        self.get("screenshots", id, &["image_id"])
    }

    fn image_url(&self, image_id: &str) -> String {
        format!("{}/t_{}/{}.jpg", self.image_url, self.image_size, image_id)
    }
}

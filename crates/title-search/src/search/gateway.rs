use std::env;
use std::future::Future;

use super::domain::{SearchRequest, TitleSearchResult};

/// Where the bearer token comes from. Injected so the submission flow can be
/// exercised without a real storage mechanism.
pub trait CredentialStore: Send + Sync {
    fn token(&self) -> Option<String>;
}

const DEFAULT_TOKEN_VAR: &str = "API_TOKEN";

/// Reads the token from the process environment (populated from `.env` by
/// config loading). Blank values count as absent.
#[derive(Debug, Clone)]
pub struct EnvCredentialStore {
    variable: String,
}

impl EnvCredentialStore {
    pub fn new(variable: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
        }
    }
}

impl Default for EnvCredentialStore {
    fn default() -> Self {
        Self::new(DEFAULT_TOKEN_VAR)
    }
}

impl CredentialStore for EnvCredentialStore {
    fn token(&self) -> Option<String> {
        env::var(&self.variable)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }
}

/// Transport seam for the title search backend.
pub trait SearchGateway: Send + Sync {
    /// Submit a new search for processing.
    fn submit(
        &self,
        request: &SearchRequest,
        token: &str,
    ) -> impl Future<Output = Result<TitleSearchResult, SearchFailure>> + Send;

    /// Retrieve a previously initiated search by id.
    fn fetch(
        &self,
        search_id: &str,
        token: &str,
    ) -> impl Future<Output = Result<TitleSearchResult, SearchFailure>> + Send;
}

/// Why a submission produced no result.
#[derive(Debug, thiserror::Error)]
pub enum SearchFailure {
    #[error("no bearer token available from credential storage")]
    MissingCredentials,
    #[error("request could not be completed: {source}")]
    Transport {
        #[source]
        source: reqwest::Error,
    },
    #[error("service rejected the request with HTTP status {status}")]
    RejectedStatus { status: u16 },
    #[error("response body could not be decoded: {source}")]
    Decode {
        #[source]
        source: reqwest::Error,
    },
}

/// Production gateway speaking JSON over HTTP with bearer authentication.
///
/// Deliberately bare transport: no retries, no timeout, no cancellation of an
/// in-flight request.
#[derive(Debug, Clone)]
pub struct HttpSearchGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSearchGateway {
    pub fn new(config: &crate::config::ApiConfig) -> Self {
        Self::with_base_url(config.base_url.clone())
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn decode(response: reqwest::Response) -> Result<TitleSearchResult, SearchFailure> {
        let status = response.status();
        if !status.is_success() {
            // Non-2xx bodies are opaque; only the status is reported.
            return Err(SearchFailure::RejectedStatus {
                status: status.as_u16(),
            });
        }

        response
            .json::<TitleSearchResult>()
            .await
            .map_err(|source| SearchFailure::Decode { source })
    }
}

impl SearchGateway for HttpSearchGateway {
    async fn submit(
        &self,
        request: &SearchRequest,
        token: &str,
    ) -> Result<TitleSearchResult, SearchFailure> {
        let response = self
            .client
            .post(self.endpoint("/api/title-search/search"))
            .bearer_auth(token)
            .json(request)
            .send()
            .await
            .map_err(|source| SearchFailure::Transport { source })?;

        Self::decode(response).await
    }

    async fn fetch(
        &self,
        search_id: &str,
        token: &str,
    ) -> Result<TitleSearchResult, SearchFailure> {
        let response = self
            .client
            .get(self.endpoint(&format!("/api/title-search/search/{search_id}")))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|source| SearchFailure::Transport { source })?;

        Self::decode(response).await
    }
}

//! Main ApiClient

use std::sync::Arc;

use log::debug;
use reqwest::Client;
use reqwest::Method;
use reqwest::RequestBuilder;
use reqwest::header::ACCEPT;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::error::Error;
use crate::token::TokenStore;

const JSON: &str = "application/json";

/// Client for the Engage REST API.
///
/// This client is cheap to clone (uses `Arc` internally). Every request
/// carries JSON `Accept`/`Content-Type` headers, plus `Authorization: Bearer`
/// whenever the token store holds a token. There is no retry and no refresh.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    config: ApiConfig,
    tokens: Arc<dyn TokenStore>,
    http_client: Client,
}

impl ApiClient {
    pub fn new(config: ApiConfig, tokens: Arc<dyn TokenStore>) -> Self {
        Self::with_http_client(config, tokens, Client::new())
    }

    /// Uses a preconfigured HTTP client.
    pub fn with_http_client(config: ApiConfig, tokens: Arc<dyn TokenStore>, http_client: Client) -> Self {
        Self {
            inner: Arc::new(ApiClientInner {
                config,
                tokens,
                http_client,
            }),
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    /// The store the bearer token is read from.
    pub fn tokens(&self) -> &dyn TokenStore {
        self.inner.tokens.as_ref()
    }

    /// `GET` and decode the JSON response.
    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, Error> {
        let body = self.send(self.request(Method::GET, path)).await?;
        decode(&body)
    }

    /// `POST` a JSON body and decode the JSON response.
    pub async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, Error>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = self.send(self.request(Method::POST, path).json(body)).await?;
        decode(&body)
    }

    /// `POST` without a body, ignoring whatever comes back on success.
    pub async fn post_empty(&self, path: &str) -> Result<(), Error> {
        self.send(self.request(Method::POST, path)).await.map(drop)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.inner.config.endpoint(path);
        debug!("{method} {url}");
        self.inner
            .http_client
            .request(method, url)
            .header(ACCEPT, JSON)
            .header(CONTENT_TYPE, JSON)
    }

    /// Attaches auth and timeout, sends, and returns the body of a success.
    async fn send(&self, mut request: RequestBuilder) -> Result<String, Error> {
        if let Some(token) = self.inner.tokens.get().await? {
            request = request.bearer_auth(token);
        }

        let timeout = self.inner.config.timeout();
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| match timeout {
            Some(timeout) if e.is_timeout() => ApiError::Timeout(timeout),
            _ if e.is_builder() => ApiError::InvalidUrl(e.to_string()),
            _ => ApiError::Network(e),
        })?;

        let status = response.status();
        let body = response.text().await.map_err(ApiError::from)?;

        if status.is_success() {
            Ok(body)
        } else {
            debug!("request failed with {status}");
            Err(ApiError::from_response(status.as_u16(), &body).into())
        }
    }
}

fn decode<R: DeserializeOwned>(body: &str) -> Result<R, Error> {
    serde_json::from_str(body).map_err(|e| ApiError::parse_with_body(e.to_string(), body).into())
}

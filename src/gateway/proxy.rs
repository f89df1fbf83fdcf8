//! Upstream API client used by the gateway.
//!
//! One attempt per call, no retries. Every failure short of cancellation is
//! logged with its cause and reported to the caller as `Ok(None)`.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tokio_util::sync::CancellationToken;

use crate::gateway::auth::API_KEY_HEADER;
use crate::types::{Error, Result, UpstreamConfig};

/// Why a proxied call produced no result. Logged, never returned.
#[derive(Debug, thiserror::Error)]
enum UpstreamFailure {
    #[error("upstream responded with status {0}")]
    Status(StatusCode),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// JSON client bound to one upstream base URL and API key.
#[derive(Debug, Clone)]
pub struct ProxyClient {
    client: reqwest::Client,
    base_url: Url,
}

impl ProxyClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            Error::config(format!("invalid upstream base URL '{}': {}", config.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(Error::config(format!(
                "upstream base URL '{}' cannot carry a path",
                config.base_url
            )));
        }

        let mut api_key = HeaderValue::from_str(&config.api_key)
            .map_err(|_| Error::config("upstream API key is not a valid header value"))?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, api_key);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `GET` the endpoint built from `path` segments and `query` pairs.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &[&str],
        query: &[(&str, &str)],
        cancel: &CancellationToken,
    ) -> Result<Option<T>> {
        let url = self.endpoint(path, query);
        tracing::info!(endpoint = url.path(), "Making GET request to upstream API");
        let request = self.client.get(url.clone());
        self.dispatch("GET", &url, request, cancel).await
    }

    /// `POST` `body` as JSON to the endpoint built from `path` segments.
    pub async fn post_json<T, B>(
        &self,
        path: &[&str],
        body: &B,
        cancel: &CancellationToken,
    ) -> Result<Option<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(path, &[]);
        tracing::info!(endpoint = url.path(), "Making POST request to upstream API");
        let request = self.client.post(url.clone()).json(body);
        self.dispatch("POST", &url, request, cancel).await
    }

    /// Append percent-encoded `path` segments and `query` pairs to the base.
    fn endpoint(&self, path: &[&str], query: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();
        // `new` rejected cannot-be-a-base URLs.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(path);
        }
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        url
    }

    async fn dispatch<T: DeserializeOwned>(
        &self,
        method: &'static str,
        url: &Url,
        request: RequestBuilder,
        cancel: &CancellationToken,
    ) -> Result<Option<T>> {
        let endpoint = url.path();
        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                return Err(Error::cancelled(format!("{} {} was cancelled", method, endpoint)));
            }
            outcome = fetch::<T>(request) => outcome,
        };

        match outcome {
            Ok(value) => Ok(Some(value)),
            Err(UpstreamFailure::Status(status)) => {
                tracing::warn!(
                    method,
                    endpoint,
                    status = status.as_u16(),
                    "Upstream API request failed"
                );
                Ok(None)
            }
            Err(failure) => {
                tracing::error!(method, endpoint, error = %failure, "Error calling upstream API");
                Ok(None)
            }
        }
    }
}

async fn fetch<T: DeserializeOwned>(request: RequestBuilder) -> std::result::Result<T, UpstreamFailure> {
    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(UpstreamFailure::Status(status));
    }
    let body = response.bytes().await?;
    let value: Value = serde_json::from_slice(&body)?;
    Ok(serde_json::from_value(fold_field_names(value))?)
}

/// Lower-case the field names of a response document: the top-level object,
/// or each object of a top-level array. Nested values are left alone so
/// opaque payloads keep their keys.
pub fn fold_field_names(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(fold_object(map)),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| match item {
                    Value::Object(map) => Value::Object(fold_object(map)),
                    other => other,
                })
                .collect(),
        ),
        other => other,
    }
}

fn fold_object(map: Map<String, Value>) -> Map<String, Value> {
    map.into_iter()
        .map(|(key, value)| (key.to_lowercase(), value))
        .collect()
}

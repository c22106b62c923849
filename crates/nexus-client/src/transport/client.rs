//! Transport struct, request building, and response handling.

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::TransportError;

use super::config::EndpointConfig;

pub const CHAT_PATH: &str = "/api/v1/nexus/chat";
pub(crate) const API_KEY_HEADER: &str = "X-API-Key";

/// Longest slice of an error body kept in `TransportError::Status`.
const ERROR_BODY_LIMIT: usize = 200;

/// Authenticated HTTP transport. Cheap to clone; clones share the
/// underlying connection pool.
#[derive(Clone)]
pub struct HttpTransport {
    pub(crate) config: EndpointConfig,
    pub(crate) http: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: EndpointConfig) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .default_headers(Self::default_headers(&config)?)
            .build()
            .map_err(|e| TransportError::Network(format!("failed to build HTTP client: {e}")))?;
        let base_url = config.base_url.trim_end_matches('/').to_string();
        Ok(Self {
            config,
            http,
            base_url,
        })
    }

    pub fn config(&self) -> &EndpointConfig {
        &self.config
    }

    fn default_headers(config: &EndpointConfig) -> Result<HeaderMap, TransportError> {
        let mut key = HeaderValue::from_str(config.credential.expose()).map_err(|_| {
            TransportError::InvalidCredential("API key contains invalid header characters".into())
        })?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, key);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn get(&self, path: &str) -> RequestBuilder {
        self.http.get(self.url(path))
    }

    pub(crate) fn post(&self, path: &str) -> RequestBuilder {
        self.http.post(self.url(path))
    }

    /// `path` followed by `segments`, each percent-encoded as exactly one
    /// path segment. `None` if the base URL cannot carry a path.
    pub(crate) fn segment_url(&self, path: &str, segments: &[&str]) -> Option<Url> {
        let mut url = Url::parse(&self.url(path)).ok()?;
        url.path_segments_mut().ok()?.extend(segments);
        Some(url)
    }

    pub(crate) fn post_url(&self, url: Url) -> RequestBuilder {
        self.http.post(url)
    }

    /// Send the request and decode a JSON body from a 2xx response.
    pub(crate) async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, TransportError> {
        let response = self.dispatch(request).await?;
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        serde_json::from_slice(&bytes).map_err(|e| TransportError::Decode(e.to_string()))
    }

    /// Send the request and discard whatever body a 2xx response carries.
    pub(crate) async fn execute_discarding_body(
        &self,
        request: RequestBuilder,
    ) -> Result<(), TransportError> {
        self.dispatch(request).await.map(|_| ())
    }

    async fn dispatch(&self, request: RequestBuilder) -> Result<Response, TransportError> {
        let response = request.send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "NexusAI API response");
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let body = text.chars().take(ERROR_BODY_LIMIT).collect::<String>();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url)
            .field("timeout", &self.config.timeout)
            .finish()
    }
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Network(err.to_string())
    }
}

//! HTTP transport backed by `reqwest`

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use http::Method;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::error::{ConfigError, ConfigResult, ErrorResponse, TransportError};
use crate::transport::{Transport, TransportResponse};

/// Configuration for [`HttpTransport`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpTransportConfig {
    /// Base URL request paths are appended to
    pub base_url: String,
    /// Whole-request timeout
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
    /// Connection timeout
    #[serde(with = "humantime_serde")]
    pub connect_timeout: Duration,
    /// Headers sent with every request
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: Option<String>,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5601".to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            default_headers: HashMap::new(),
            user_agent: Some(concat!("beacon/", env!("CARGO_PKG_VERSION")).to_string()),
        }
    }
}

impl HttpTransportConfig {
    /// Config pointing at `base_url` with default timeouts
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Set the whole-request timeout
    #[must_use = "builder methods must be chained or built"]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Add a default header
    #[must_use = "builder methods must be chained or built"]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(name.into(), value.into());
        self
    }
}

/// [`Transport`] that issues real HTTP requests
///
/// - 2xx with an empty body yields a response without payload
/// - 2xx with a body yields its JSON, or the raw text as a JSON string
/// - any other status fails with an [`ErrorResponse`] attached
/// - connection errors and timeouts fail without a response
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpTransport {
    /// Build a transport from config
    pub fn new(config: HttpTransportConfig) -> ConfigResult<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;

        let mut headers = HeaderMap::new();
        for (name, value) in &config.default_headers {
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| ConfigError::InvalidHeader {
                    name: name.clone(),
                    reason: e.to_string(),
                })?;
            let header_value = HeaderValue::from_str(value).map_err(|e| ConfigError::InvalidHeader {
                name: name.clone(),
                reason: e.to_string(),
            })?;
            headers.insert(header_name, header_value);
        }

        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .default_headers(headers);
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }

        let client = builder.build().map_err(|e| ConfigError::ClientBuild {
            message: e.to_string(),
            source: Some(Box::new(e)),
        })?;

        Ok(Self { client, base_url })
    }

    /// Base URL paths are resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a request path
    ///
    /// Absolute URLs pass through; anything else is appended to the base
    /// URL, keeping the base path prefix.
    pub fn resolve(&self, path: &str) -> Result<Url, TransportError> {
        if path.starts_with("http://") || path.starts_with("https://") {
            return Url::parse(path).map_err(|e| TransportError::new(format!("invalid URL '{path}': {e}")));
        }
        let joined = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Url::parse(&joined).map_err(|e| TransportError::new(format!("invalid path '{path}': {e}")))
    }
}

/// Empty bodies decode to `None`; non-JSON text is kept as a string.
fn decode_body(bytes: &[u8]) -> Option<Value> {
    if bytes.is_empty() {
        return None;
    }
    Some(
        serde_json::from_slice(bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned())),
    )
}

#[async_trait]
impl Transport for HttpTransport {
    async fn dispatch(
        &self,
        method: &Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<TransportResponse, TransportError> {
        let url = self.resolve(path)?;

        let mut request = self.client.request(method.clone(), url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::new(format!("request timed out: {e}"))
            } else {
                TransportError::new(format!("request failed: {e}"))
            }
        })?;

        let status = response.status();
        let status_text = status.canonical_reason().unwrap_or_default().to_string();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| TransportError::new(format!("failed to read response body: {e}")))?;
        let data = decode_body(&bytes);

        if !status.is_success() {
            let mut error_response = ErrorResponse::new(status.as_u16()).with_status_text(status_text);
            error_response.body = data;
            return Err(TransportError::with_response(
                format!("Request failed with status code {}", status.as_u16()),
                error_response,
            ));
        }

        Ok(TransportResponse {
            status: status.as_u16(),
            status_text,
            data,
        })
    }
}

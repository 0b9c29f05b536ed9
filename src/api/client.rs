use crate::events::{ChangeFeed, ResourceChange};
use crate::types::{AppError, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Base URL used when no configuration says otherwise.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000/api";

/// Per-request options for [`ApiClient::request`].
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    /// Merged over the default JSON content type; entries here win.
    pub headers: HeaderMap,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::new(Method::GET)
    }
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            headers: HeaderMap::new(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// HTTP client for the restaurant REST API.
///
/// Every call is a single attempt: no retries, no timeouts, no caching.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    changes: Option<ChangeFeed>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http_client(reqwest::Client::new(), base_url)
    }

    pub fn with_http_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            changes: None,
        }
    }

    /// Publish a [`ResourceChange`] on `feed` after each successful mutation.
    pub fn with_change_feed(mut self, feed: ChangeFeed) -> Self {
        self.changes = Some(feed);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve a path against the base URL. Absolute URLs pass through.
    pub fn resolve(&self, path: &str) -> String {
        if path.starts_with("http") {
            path.to_string()
        } else {
            format!("{}{}", self.base_url, path)
        }
    }

    /// Issue one request and normalize the outcome.
    ///
    /// The body is always parsed as JSON, with an empty object standing in for
    /// anything unparseable. A non-2xx status becomes [`AppError::Api`] carrying
    /// the body's `error` string or the status text; a connection failure is
    /// [`AppError::Transport`].
    pub async fn request(&self, path: &str, options: RequestOptions) -> Result<Value> {
        let url = self.resolve(path);
        let RequestOptions {
            method,
            headers: extra_headers,
            query,
            body,
        } = options;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.extend(extra_headers);

        debug!(method = %method, url = %url, "Sending API request");

        let mut builder = self.http.request(method.clone(), &url).headers(headers);
        if !query.is_empty() {
            builder = builder.query(&query);
        }
        if let Some(body) = body {
            builder = builder.body(body.to_string());
        }

        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        let data: Value =
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::Object(Map::new()));

        if !status.is_success() {
            let message = data
                .get("error")
                .and_then(Value::as_str)
                .filter(|msg| !msg.is_empty())
                .map(str::to_owned)
                .unwrap_or_else(|| status_text(status));
            warn!(method = %method, url = %url, status = status.as_u16(), error = %message, "API request failed");
            return Err(AppError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(data)
    }

    /// [`request`](Self::request) followed by deserialization into `T`.
    pub(crate) async fn request_as<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T> {
        let data = self.request(path, options).await?;
        serde_json::from_value(data).map_err(|e| AppError::Decode(format!("{}: {}", path, e)))
    }

    /// [`request`](Self::request) for list endpoints. The body must be an
    /// array; records that do not decode as `T` are skipped with a warning so
    /// one bad row does not hide the rest.
    pub(crate) async fn request_list<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<Vec<T>> {
        let data = self.request(path, options).await?;
        let Value::Array(records) = data else {
            return Err(AppError::Decode(format!("{}: expected a list", path)));
        };
        Ok(decode_records(path, records))
    }

    pub(crate) fn publish(&self, change: ResourceChange) {
        if let Some(feed) = &self.changes {
            feed.publish(change);
        }
    }
}

fn decode_records<T: DeserializeOwned>(path: &str, records: Vec<Value>) -> Vec<T> {
    records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value(record) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!(path = %path, index, error = %e, "Skipping malformed record");
                None
            }
        })
        .collect()
}

fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_owned)
        .unwrap_or_else(|| status.as_str().to_string())
}

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use reqwest::{Client, Method, Request};
use serde_json::Value;
use url::Url;

use crate::config::{AppConfig, AuthConfig};
use crate::usecase::ports::api::{ApiError, ApiRequest, HttpMethod, Transport};

#[cfg(not(target_arch = "wasm32"))]
const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

/// The single HTTP client of the process. Base URL and credentials are fixed
/// at construction.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
}

impl HttpTransport {
    pub fn new(config: &AppConfig) -> Result<Self, ApiError> {
        let headers = default_headers(&config.auth)?;
        let builder = Client::builder().default_headers(headers);
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(REQUEST_TIMEOUT);
        let client = builder
            .build()
            .map_err(|err| ApiError::Config(err.to_string()))?;
        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
        })
    }

    pub fn url_for(&self, request: &ApiRequest) -> Result<Url, ApiError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = request.path.trim_start_matches('/');
        let mut url = Url::parse(&format!("{base}/{path}"))
            .map_err(|err| ApiError::InvalidInput(format!("{}: {err}", request.path)))?;
        if !request.params.is_empty() {
            let mut query = url.query_pairs_mut();
            for (key, value) in request.params.pairs() {
                query.append_pair(&key, &value);
            }
        }
        Ok(url)
    }

    pub fn build_request(&self, request: &ApiRequest) -> Result<Request, ApiError> {
        let method = match request.method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Delete => Method::DELETE,
        };
        let mut builder = self.client.request(method, self.url_for(request)?);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        builder
            .build()
            .map_err(|err| ApiError::InvalidInput(err.to_string()))
    }
}

fn default_headers(auth: &AuthConfig) -> Result<HeaderMap, ApiError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(
        HeaderName::from_static("ngrok-skip-browser-warning"),
        HeaderValue::from_static("true"),
    );
    if let Some((name, value)) = auth.header() {
        let mut value = HeaderValue::from_str(&value)
            .map_err(|_| ApiError::Config("credential contains invalid characters".to_string()))?;
        value.set_sensitive(true);
        headers.insert(HeaderName::from_static(name), value);
    }
    Ok(headers)
}

/// Empty bodies (204, bare POST acknowledgements) read as `null`.
pub fn parse_body(status: u16, text: &str) -> Result<Value, ApiError> {
    if !(200..300).contains(&status) {
        return Err(ApiError::Status {
            status,
            body: text.chars().take(512).collect(),
        });
    }
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(|err| ApiError::Decode(err.to_string()))
}

#[async_trait(?Send)]
impl Transport for HttpTransport {
    async fn execute(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let http_request = self.build_request(&request)?;
        tracing::debug!(method = %http_request.method(), url = %http_request.url(), "issuing request");
        let response = self
            .client
            .execute(http_request)
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        let result = parse_body(status, &text);
        if let Err(err) = &result {
            tracing::warn!(path = %request.path, error = %err, "request failed");
        }
        result
    }
}

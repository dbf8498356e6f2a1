//! HTTP transport implementation using reqwest.
//!
//! This adapter implements the `HttpTransport` port. Responses outside the
//! 2xx range come back as `TransportError::Status` with the full decoded
//! response attached.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, Method, Url};
use tracing::{debug, trace};

use sequent_application::ports::{HttpTransport, TransportError};
use sequent_domain::{HttpMethod, PreparedRequest, TestResponse};

use crate::http::{BodyBuildError, BuiltBody, build_body};

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("Sequent/", env!("CARGO_PKG_VERSION"));

/// HTTP transport backed by `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Creates a transport with default settings.
    ///
    /// Default configuration:
    /// - Follow redirects: up to 10
    /// - TLS verification: enabled
    /// - No request timeout beyond the network stack's own
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new() -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;

        Ok(Self { client })
    }

    /// Creates a transport around a custom reqwest client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
            HttpMethod::Head => Method::HEAD,
            HttpMethod::Options => Method::OPTIONS,
        }
    }

    /// Parses the target and appends the query pairs.
    fn target_url(request: &PreparedRequest) -> Result<Url, TransportError> {
        let mut url = Url::parse(&request.url)
            .map_err(|e| TransportError::InvalidUrl(format!("{e}: {}", request.url)))?;

        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.query);
        }

        Ok(url)
    }

    /// Maps reqwest errors to `TransportError`.
    fn map_error(error: &reqwest::Error) -> TransportError {
        if error.is_timeout() {
            return TransportError::Timeout;
        }

        if error.is_connect() {
            let host = error
                .url()
                .and_then(|u| u.host_str().map(str::to_string))
                .unwrap_or_else(|| "unknown".to_string());
            return TransportError::Connection(format!("{host}: {error}"));
        }

        if error.is_builder() {
            return TransportError::InvalidUrl(error.to_string());
        }

        TransportError::Other(error.to_string())
    }
}

impl From<BodyBuildError> for TransportError {
    fn from(error: BodyBuildError) -> Self {
        match error {
            BodyBuildError::FileRead { path, message }
            | BodyBuildError::InvalidMime { path, message } => Self::Upload { path, message },
            BodyBuildError::Serialization(message) => Self::Other(message),
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: &PreparedRequest) -> Result<TestResponse, TransportError> {
        let url = Self::target_url(request)?;
        let body = build_body(&request.payload).await?;

        let mut builder = self
            .client
            .request(Self::to_reqwest_method(request.method), url);

        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        if let Some(content_type) = body.content_type()
            && request.header("content-type").is_none()
        {
            builder = builder.header("Content-Type", content_type);
        }

        builder = match body {
            BuiltBody::None => builder,
            BuiltBody::Text { content, .. } => builder.body(content),
            BuiltBody::Multipart(form) => builder.multipart(form),
        };

        trace!(method = %request.method, url = %request.url, "sending request");
        let start = Instant::now();

        let response = builder.send().await.map_err(|e| Self::map_error(&e))?;
        let status = response.status().as_u16();

        let headers = fold_headers(response.headers());

        let bytes = response
            .bytes()
            .await
            .map_err(|e| TransportError::Other(format!("failed to read body: {e}")))?;

        let duration: Duration = start.elapsed();
        debug!(status, elapsed_ms = duration.as_millis(), "response received");

        let response = TestResponse::from_raw(status, headers, &bytes, duration);
        if response.status_code().is_success() {
            Ok(response)
        } else {
            Err(TransportError::Status(Box::new(response)))
        }
    }
}

/// Collects response headers, joining repeated values with `", "`.
fn fold_headers(headers: &reqwest::header::HeaderMap) -> HashMap<String, String> {
    let mut folded: HashMap<String, String> = HashMap::with_capacity(headers.keys_len());
    for (name, value) in headers {
        let value = value.to_str().unwrap_or("<binary>");
        folded
            .entry(name.to_string())
            .and_modify(|joined| {
                joined.push_str(", ");
                joined.push_str(value);
            })
            .or_insert_with(|| value.to_string());
    }
    folded
}

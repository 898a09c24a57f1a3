//! HTTP transport implementation.
//!
//! HTTP/1.1 and HTTP/2 over rustls using reqwest, authenticated with HTTP
//! basic auth from the merchant's API key and password.

use std::time::Duration;

use reqwest::{Client, Method};
use tracing::{debug, instrument};
use url::Url;

use super::config::{HttpConfig, HttpVersion};
use crate::{
    config::{Credentials, is_loopback},
    error::{RapidError, Result},
    transport::{RequestContext, Transport, TransportResponse},
};

/// Validates URL for security constraints.
///
/// Ensures the URL uses HTTPS and does not point to localhost.
fn validate_url(url: &Url) -> Result<()> {
    if url.scheme() != "https" {
        return Err(RapidError::TransportError("Only HTTPS URLs are allowed".to_owned()));
    }

    if is_loopback(url) {
        return Err(RapidError::TransportError("Localhost URLs are not allowed".to_owned()));
    }

    Ok(())
}

/// Rejects paths containing directory traversal sequences.
///
/// Only the part before `?` is checked; query values are already
/// percent-encoded by the endpoint resolver.
fn sanitize_path(path: &str) -> Result<&str> {
    let path_only = path.split_once('?').map_or(path, |(path, _)| path);
    if path_only.split('/').any(|segment| segment == "..") || path_only.contains("//") {
        return Err(RapidError::TransportError(
            "Invalid path: traversal sequences not allowed".to_owned(),
        ));
    }
    if !path.is_empty() && !path.starts_with('/') {
        return Err(RapidError::TransportError("Path must start with '/'".to_owned()));
    }
    Ok(path)
}

/// Validates header name and value for CRLF injection prevention.
fn validate_header(name: &str, value: &str) -> Result<()> {
    if name.contains('\r') || name.contains('\n') || name.contains('\0') {
        return Err(RapidError::TransportError(
            "Invalid header name: control characters not allowed".to_owned(),
        ));
    }
    if value.contains('\r') || value.contains('\n') || value.contains('\0') {
        return Err(RapidError::TransportError(
            "Invalid header value: control characters not allowed".to_owned(),
        ));
    }
    Ok(())
}

/// HTTP/1.1 and HTTP/2 transport using reqwest.
///
/// Supports automatic connection pooling, keep-alive, and HTTP/2 multiplexing.
/// Cloning is cheap and shares the connection pool.
///
/// # Examples
///
/// ```
/// use rapid_client::transport::{HttpConfig, HttpTransport, HttpVersion};
///
/// let config = HttpConfig {
///     pool_max_idle_per_host: 20,
///     timeout_secs: 60,
///     connect_timeout_secs: 15,
///     http_version: HttpVersion::Http2,
/// };
///
/// let transport = HttpTransport::with_config(&config).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    http_version: HttpVersion,
    timeout: Duration,
}

impl HttpTransport {
    /// Creates a new HTTP transport with default settings.
    ///
    /// Default configuration:
    /// - Pool max idle per host: 10
    /// - Timeout: 30 seconds
    /// - Connect timeout: 10 seconds
    /// - HTTP version: Auto (prefer HTTP/2)
    ///
    /// # Errors
    ///
    /// Returns error if the TLS backend cannot be initialised.
    pub fn new() -> Result<Self> {
        Self::with_config(&HttpConfig::default())
    }

    /// Creates HTTP transport with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client creation fails.
    pub fn with_config(config: &HttpConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .https_only(true);

        builder = match config.http_version {
            HttpVersion::Http1 => builder.http1_only(),
            HttpVersion::Http2 => builder.http2_prior_knowledge(),
            HttpVersion::Auto => builder,
        };

        let client = builder.build().map_err(RapidError::HttpError)?;

        Ok(Self { client, http_version: config.http_version, timeout: config.timeout() })
    }

    /// Maps a reqwest failure onto the transport error taxonomy.
    fn classify(&self, error: reqwest::Error) -> RapidError {
        if error.is_timeout() {
            RapidError::Timeout(self.timeout)
        } else if error.is_connect() {
            RapidError::Connection(error.to_string())
        } else {
            RapidError::HttpError(error)
        }
    }

    #[instrument(
        skip(self, credentials, ctx, method, body),
        fields(
            %method,
            base_url = ctx.base_url,
            path = ctx.path,
            operation = %ctx.operation
        )
    )]
    async fn execute_request(
        &self,
        credentials: &Credentials,
        ctx: RequestContext<'_>,
        method: Method,
        body: Option<&[u8]>,
    ) -> Result<TransportResponse> {
        let url = Url::parse(ctx.base_url)
            .map_err(|e| RapidError::TransportError(format!("invalid base_url: {e}")))?;

        validate_url(&url)?;

        let path = sanitize_path(ctx.path)?;

        for (key, value) in &ctx.headers {
            validate_header(key, value)?;
        }

        if url.host_str().is_none() {
            return Err(RapidError::TransportError(format!(
                "URL missing host: {}",
                ctx.base_url
            )));
        }

        let full_url = format!("{}{path}", ctx.base_url.trim_end_matches('/'));

        let mut request = self
            .client
            .request(method, &full_url)
            .basic_auth(credentials.api_key(), Some(credentials.password()));

        if let Some(content_type) = ctx.content_type {
            request = request.header("Content-Type", content_type);
        }

        for (key, value) in ctx.headers {
            request = request.header(key, value);
        }

        if let Some(body) = body {
            request = request.body(body.to_vec());
        }

        let response = request.send().await.map_err(|e| self.classify(e))?;

        let status = response.status().as_u16();

        let headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_owned()))
            .collect();

        let response_body = response.bytes().await.map_err(|e| self.classify(e))?.to_vec();

        debug!(status, body_len = response_body.len(), "gateway responded");

        Ok(TransportResponse { status, body: response_body, headers })
    }
}

impl Transport for HttpTransport {
    async fn get<'a>(
        &'a self,
        credentials: &'a Credentials,
        ctx: RequestContext<'a>,
    ) -> Result<TransportResponse> {
        self.execute_request(credentials, ctx, Method::GET, None).await
    }

    async fn post<'a>(
        &'a self,
        credentials: &'a Credentials,
        ctx: RequestContext<'a>,
        body: &'a [u8],
    ) -> Result<TransportResponse> {
        self.execute_request(credentials, ctx, Method::POST, Some(body)).await
    }

    fn protocol_name(&self) -> &'static str {
        match self.http_version {
            HttpVersion::Http1 => "http/1.1",
            HttpVersion::Http2 => "http/2",
            HttpVersion::Auto => "http",
        }
    }
}

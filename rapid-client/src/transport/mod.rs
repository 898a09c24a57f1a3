//! Wire transport abstraction.
//!
//! A [`Transport`] performs one authenticated HTTP exchange and hands back the
//! raw status and body, whatever the status is. Interpreting the status is
//! left to [`RapidClient`](crate::RapidClient); decoding the body is left to
//! the response mapper.
//!
//! # Architecture
//!
//! The transport layer separates protocol mechanics from gateway semantics:
//! - **Transport**: connection pooling, TLS, timeouts, authentication headers
//! - **Gateway**: request shaping, endpoint resolution, response classification
//!
//! Implement [`Transport`] to route requests through a proxy, record them in
//! tests, or replay canned responses.
//!
//! # Examples
//!
//! ```rust,no_run
//! use rapid_client::{
//!     config::Credentials,
//!     gateway::Operation,
//!     transport::{HttpTransport, RequestContext, Transport},
//! };
//!
//! # async fn example() -> rapid_client::error::Result<()> {
//! let transport = HttpTransport::new()?;
//! let credentials = Credentials::new("api-key", "password");
//!
//! let ctx = RequestContext {
//!     base_url: "https://api.sandbox.ewaypayments.com",
//!     path: "/Transaction/11929054",
//!     headers: vec![("X-EWAY-APIVERSION", "40")],
//!     content_type: None,
//!     operation: Operation::QueryTransaction,
//! };
//!
//! let response = transport.get(&credentials, ctx).await?;
//! println!("Status: {}", response.status);
//! # Ok(())
//! # }
//! ```

#[allow(
    redundant_imports,
    reason = "Future needed for RPITIT despite being in Edition 2024 prelude"
)]
use std::future::Future;

use crate::{config::Credentials, error::Result, gateway::Operation};

pub mod config;
pub mod http;

pub use config::{HttpConfig, HttpVersion};
pub use http::HttpTransport;

/// Request context for transport operations.
#[derive(Debug, Clone)]
pub struct RequestContext<'a> {
    /// Gateway base URL (e.g., <https://api.sandbox.ewaypayments.com>).
    pub base_url: &'a str,
    /// Request path, optionally with a query string (e.g., "/Transaction/42").
    pub path: &'a str,
    /// Additional HTTP headers to include.
    pub headers: Vec<(&'a str, &'a str)>,
    /// Content-Type header value (if applicable).
    pub content_type: Option<&'a str>,
    /// Gateway operation, for logging.
    pub operation: Operation,
}

/// Response from transport operations.
#[derive(Debug)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body bytes.
    pub body: Vec<u8>,
    /// Response headers.
    pub headers: Vec<(String, String)>,
}

impl TransportResponse {
    /// Returns true for 2xx statuses.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Wire transport.
///
/// Implementations must return `Ok` for every HTTP status the gateway answers
/// with, and `Err` only when no response was obtained: a timeout, a
/// connection failure, or a request rejected before sending.
///
/// Implementations are shared across concurrent calls and must not keep
/// per-request state.
pub trait Transport: Send + Sync {
    /// Executes a GET request.
    ///
    /// # Errors
    ///
    /// Returns error if the request could not be sent or no response arrived.
    fn get<'a>(
        &'a self,
        credentials: &'a Credentials,
        ctx: RequestContext<'a>,
    ) -> impl Future<Output = Result<TransportResponse>> + Send + 'a;

    /// Executes a POST request with body.
    ///
    /// # Errors
    ///
    /// Returns error if the request could not be sent or no response arrived.
    fn post<'a>(
        &'a self,
        credentials: &'a Credentials,
        ctx: RequestContext<'a>,
        body: &'a [u8],
    ) -> impl Future<Output = Result<TransportResponse>> + Send + 'a;

    /// Returns the protocol name for logging.
    ///
    /// Examples: "http/1.1", "http/2", "http"
    fn protocol_name(&self) -> &'static str;
}

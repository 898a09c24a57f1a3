//! Error types for the Rapid client.
//!
//! Only two situations raise an error: the caller asked for something the
//! client cannot send (validation), or no interpretable gateway response was
//! obtained (transport). A gateway that answers with decline or validation
//! codes is an expected business outcome and is returned as data, see
//! [`Outcome`](crate::model::Outcome).
//!
//! # Error Categories
//!
//! - **Validation** ([`RapidError::UnsupportedMethod`], [`RapidError::AmbiguousFilter`],
//!   [`RapidError::EmptyFilter`], [`RapidError::MissingField`], [`RapidError::InvalidInput`]):
//!   raised before any network call
//! - **Transport** ([`RapidError::HttpError`], [`RapidError::Timeout`],
//!   [`RapidError::Connection`], [`RapidError::Authentication`],
//!   [`RapidError::UnexpectedStatus`], [`RapidError::TransportError`])
//! - **Protocol** ([`RapidError::InvalidResponse`]): a 2xx body the codec cannot accept
//! - **Configuration** ([`RapidError::ConfigError`])
//!
//! # Examples
//!
//! ```
//! use rapid_client::error::{ErrorKind, RapidError};
//!
//! let err = RapidError::EmptyFilter;
//! assert_eq!(err.kind(), ErrorKind::Validation);
//! assert!(!err.is_transient());
//! ```

use std::time::Duration;

use thiserror::Error;

use crate::{gateway::Operation, model::PaymentMethod};

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, RapidError>;

/// Coarse classification of a [`RapidError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request was rejected locally and never sent.
    Validation,
    /// No gateway response could be obtained or accepted at the HTTP level.
    Transport,
    /// The gateway answered with a body that violates the wire contract.
    Protocol,
    /// The client configuration is unusable.
    Configuration,
}

/// Errors raised by the Rapid client.
///
/// # Error Recovery
///
/// - **Validation errors**: fix the request; retrying unchanged fails again
/// - **Transient transport errors** ([`Timeout`](Self::Timeout),
///   [`Connection`](Self::Connection)): the caller may retry, preferably with the same
///   idempotency key
/// - **Authentication**: check the API key and password for the selected environment
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Error)]
pub enum RapidError {
    /// The payment method is not valid for the requested operation.
    ///
    /// For example, a token customer cannot be created through
    /// [`PaymentMethod::Wallet`].
    #[error("payment method {method} is not supported for {operation}")]
    UnsupportedMethod {
        /// Method supplied by the caller.
        method: PaymentMethod,
        /// Operation it was used with.
        operation: Operation,
    },

    /// More than one transaction lookup discriminant was supplied.
    #[error("ambiguous transaction filter: {} supplied, expected exactly one", .0.join(", "))]
    AmbiguousFilter(Vec<&'static str>),

    /// No transaction lookup discriminant was supplied.
    #[error("empty transaction filter: supply one of transaction_id, access_code, invoice_number, invoice_reference")]
    EmptyFilter,

    /// A field required by the chosen payment method or operation is absent.
    #[error("{operation} requires {field}")]
    MissingField {
        /// Operation being built.
        operation: Operation,
        /// Name of the missing field.
        field: &'static str,
    },

    /// A supplied value is malformed.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// HTTP request failed inside reqwest.
    ///
    /// Covers TLS failures, malformed responses at the HTTP layer and other
    /// errors that are neither timeouts nor connection failures.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The request did not complete within the configured timeout.
    ///
    /// # Recovery
    ///
    /// The gateway may or may not have processed the request. Query the
    /// transaction (for example by invoice reference) before resending a payment.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The gateway could not be reached.
    #[error("connection to gateway failed: {0}")]
    Connection(String),

    /// The gateway rejected the credentials.
    #[error("gateway rejected credentials (HTTP {status})")]
    Authentication {
        /// HTTP status returned (401 or 403).
        status: u16,
    },

    /// The gateway returned a non-success HTTP status without a usable body.
    #[error("gateway returned unexpected HTTP status {status}")]
    UnexpectedStatus {
        /// HTTP status returned.
        status: u16,
    },

    /// Transport-level precondition failed (URL, path or header validation).
    #[error("transport error: {0}")]
    TransportError(String),

    /// The gateway response could not be decoded or broke the wire contract.
    #[error("invalid gateway response: {0}")]
    InvalidResponse(String),

    /// Client configuration is invalid.
    #[error("invalid configuration: {0}")]
    ConfigError(String),
}

impl RapidError {
    /// Returns the taxonomy bucket of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnsupportedMethod { .. }
            | Self::AmbiguousFilter(_)
            | Self::EmptyFilter
            | Self::MissingField { .. }
            | Self::InvalidInput(_) => ErrorKind::Validation,
            Self::HttpError(_)
            | Self::Timeout(_)
            | Self::Connection(_)
            | Self::Authentication { .. }
            | Self::UnexpectedStatus { .. }
            | Self::TransportError(_) => ErrorKind::Transport,
            Self::InvalidResponse(_) => ErrorKind::Protocol,
            Self::ConfigError(_) => ErrorKind::Configuration,
        }
    }

    /// Returns true for validation errors (nothing was sent).
    #[must_use]
    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }

    /// Returns true for transport errors.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        self.kind() == ErrorKind::Transport
    }

    /// Returns true when retrying the same request may succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Timeout(_) | Self::Connection(_) => true,
            Self::UnexpectedStatus { status } => *status >= 500,
            Self::HttpError(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}

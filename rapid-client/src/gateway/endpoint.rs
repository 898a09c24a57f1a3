//! Endpoint resolution.
//!
//! Paths default to the gateway's published REST routes and can be overridden
//! per endpoint from the `[endpoints]` table of the configuration. Templates
//! use `{id}` as the placeholder; substituted values are percent-encoded.

use serde::Deserialize;

use crate::error::{RapidError, Result};

/// Gateway endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Direct payments and direct token customer calls.
    Transaction,
    /// Transparent redirect access codes.
    AccessCodes,
    /// Responsive shared page access codes.
    AccessCodesShared,
    /// Transaction by ID or access code.
    QueryTransaction,
    /// Transaction by invoice number.
    QueryInvoiceNumber,
    /// Transaction by invoice reference.
    QueryInvoiceRef,
    /// Token customer by ID.
    QueryCustomer,
    /// Refund of a transaction.
    Refund,
    /// Capture of an authorisation.
    CapturePayment,
    /// Void of an authorisation.
    CancelAuthorisation,
    /// Settlement search.
    SettlementSearch,
}

impl Endpoint {
    /// Default path template.
    #[must_use]
    pub const fn default_template(self) -> &'static str {
        match self {
            Self::Transaction => "/Transaction",
            Self::AccessCodes => "/AccessCodes",
            Self::AccessCodesShared => "/AccessCodesShared",
            Self::QueryTransaction => "/Transaction/{id}",
            Self::QueryInvoiceNumber => "/Transaction/InvoiceNumber/{id}",
            Self::QueryInvoiceRef => "/Transaction/InvoiceRef/{id}",
            Self::QueryCustomer => "/Customer/{id}",
            Self::Refund => "/Transaction/{id}/Refund",
            Self::CapturePayment => "/CapturePayment",
            Self::CancelAuthorisation => "/CancelAuthorisation",
            Self::SettlementSearch => "/Search/Settlement",
        }
    }
}

/// Endpoint path overrides.
///
/// # Examples
///
/// ```toml
/// [endpoints]
/// query_customer = "/Customer/{id}"
/// settlement_search = "/Search/Settlement"
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct EndpointConfig {
    /// Direct payments (default: "/Transaction").
    pub transaction: Option<String>,

    /// Transparent redirect (default: "/AccessCodes").
    pub access_codes: Option<String>,

    /// Responsive shared page (default: "/AccessCodesShared").
    pub access_codes_shared: Option<String>,

    /// Transaction lookup template (default: "/Transaction/{id}").
    pub query_transaction: Option<String>,

    /// Invoice number lookup template (default: "/Transaction/InvoiceNumber/{id}").
    pub query_invoice_number: Option<String>,

    /// Invoice reference lookup template (default: "/Transaction/InvoiceRef/{id}").
    pub query_invoice_ref: Option<String>,

    /// Token customer lookup template (default: "/Customer/{id}").
    pub query_customer: Option<String>,

    /// Refund template (default: "/Transaction/{id}/Refund").
    pub refund: Option<String>,

    /// Capture (default: "/CapturePayment").
    pub capture_payment: Option<String>,

    /// Cancel authorisation (default: "/CancelAuthorisation").
    pub cancel_authorisation: Option<String>,

    /// Settlement search (default: "/Search/Settlement").
    pub settlement_search: Option<String>,
}

impl EndpointConfig {
    fn entries(&self) -> [(&'static str, Endpoint, Option<&String>); 11] {
        [
            ("transaction", Endpoint::Transaction, self.transaction.as_ref()),
            ("access_codes", Endpoint::AccessCodes, self.access_codes.as_ref()),
            ("access_codes_shared", Endpoint::AccessCodesShared, self.access_codes_shared.as_ref()),
            ("query_transaction", Endpoint::QueryTransaction, self.query_transaction.as_ref()),
            ("query_invoice_number", Endpoint::QueryInvoiceNumber, self.query_invoice_number.as_ref()),
            ("query_invoice_ref", Endpoint::QueryInvoiceRef, self.query_invoice_ref.as_ref()),
            ("query_customer", Endpoint::QueryCustomer, self.query_customer.as_ref()),
            ("refund", Endpoint::Refund, self.refund.as_ref()),
            ("capture_payment", Endpoint::CapturePayment, self.capture_payment.as_ref()),
            ("cancel_authorisation", Endpoint::CancelAuthorisation, self.cancel_authorisation.as_ref()),
            ("settlement_search", Endpoint::SettlementSearch, self.settlement_search.as_ref()),
        ]
    }

    /// Validates endpoint templates.
    ///
    /// Checks that endpoint templates:
    /// - Do not contain path traversal sequences (`..`, `//`)
    /// - Do not carry a query string (`?`)
    /// - Start with `/` (relative paths only)
    /// - Keep the `{id}` placeholder where the default has one
    ///
    /// # Errors
    ///
    /// Returns [`RapidError::ConfigError`] if any endpoint is invalid.
    pub fn validate(&self) -> Result<()> {
        for (name, endpoint, path) in self.entries() {
            if let Some(path) = path {
                validate_endpoint_path(name, path)?;
                if endpoint.default_template().contains("{id}") && !path.contains("{id}") {
                    return Err(RapidError::ConfigError(format!(
                        "endpoint '{name}' must contain the '{{id}}' placeholder: {path}"
                    )));
                }
            }
        }

        Ok(())
    }

    fn template(&self, endpoint: Endpoint) -> Option<&String> {
        self.entries()
            .into_iter()
            .find(|(_, candidate, _)| *candidate == endpoint)
            .and_then(|(_, _, path)| path)
    }
}

/// Validates an endpoint path template.
fn validate_endpoint_path(name: &str, path: &str) -> Result<()> {
    if path.contains("..") {
        return Err(RapidError::ConfigError(format!(
            "endpoint '{name}' contains path traversal sequence '..': {path}"
        )));
    }

    // Double slashes can be used for path confusion
    if path.contains("//") {
        return Err(RapidError::ConfigError(format!(
            "endpoint '{name}' contains double slash '//': {path}"
        )));
    }

    if path.contains('?') {
        return Err(RapidError::ConfigError(format!(
            "endpoint '{name}' must not contain a query string: {path}"
        )));
    }

    if !path.starts_with('/') {
        return Err(RapidError::ConfigError(format!(
            "endpoint '{name}' must start with '/': {path}"
        )));
    }

    Ok(())
}

/// Resolves endpoint paths from defaults and configured overrides.
#[derive(Debug, Clone, Default)]
pub struct EndpointResolver {
    config: EndpointConfig,
}

impl EndpointResolver {
    /// Creates a resolver over the given overrides.
    #[must_use]
    pub fn new(config: &EndpointConfig) -> Self {
        Self { config: config.clone() }
    }

    /// Returns the path for `endpoint`, substituting the percent-encoded `id`
    /// for every `{id}` placeholder.
    ///
    /// # Examples
    ///
    /// ```
    /// use rapid_client::gateway::{Endpoint, EndpointResolver};
    ///
    /// let resolver = EndpointResolver::default();
    /// assert_eq!(
    ///     resolver.resolve(Endpoint::QueryInvoiceRef, Some("INV 1/2")),
    ///     "/Transaction/InvoiceRef/INV%201%2F2"
    /// );
    /// assert_eq!(resolver.resolve(Endpoint::Transaction, None), "/Transaction");
    /// ```
    #[must_use]
    pub fn resolve(&self, endpoint: Endpoint, id: Option<&str>) -> String {
        let template =
            self.config.template(endpoint).map_or(endpoint.default_template(), String::as_str);
        match id {
            Some(id) => template.replace("{id}", &urlencoding::encode(id)),
            None => template.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let resolver = EndpointResolver::default();

        assert_eq!(resolver.resolve(Endpoint::Transaction, None), "/Transaction");
        assert_eq!(resolver.resolve(Endpoint::AccessCodes, None), "/AccessCodes");
        assert_eq!(resolver.resolve(Endpoint::AccessCodesShared, None), "/AccessCodesShared");
        assert_eq!(resolver.resolve(Endpoint::QueryTransaction, Some("42")), "/Transaction/42");
        assert_eq!(
            resolver.resolve(Endpoint::QueryInvoiceNumber, Some("INV-7")),
            "/Transaction/InvoiceNumber/INV-7"
        );
        assert_eq!(resolver.resolve(Endpoint::QueryCustomer, Some("9")), "/Customer/9");
        assert_eq!(resolver.resolve(Endpoint::Refund, Some("42")), "/Transaction/42/Refund");
        assert_eq!(resolver.resolve(Endpoint::CapturePayment, None), "/CapturePayment");
        assert_eq!(resolver.resolve(Endpoint::CancelAuthorisation, None), "/CancelAuthorisation");
        assert_eq!(resolver.resolve(Endpoint::SettlementSearch, None), "/Search/Settlement");
    }

    #[test]
    fn test_ids_are_percent_encoded() {
        let resolver = EndpointResolver::default();
        assert_eq!(
            resolver.resolve(Endpoint::QueryInvoiceRef, Some("../Customer/1")),
            "/Transaction/InvoiceRef/..%2FCustomer%2F1"
        );
        assert_eq!(
            resolver.resolve(Endpoint::QueryTransaction, Some("a?b=c")),
            "/Transaction/a%3Fb%3Dc"
        );
    }

    #[test]
    fn test_configured_override() {
        let config = EndpointConfig {
            query_customer: Some("/v2/Customer/{id}/Profile".to_owned()),
            transaction: Some("/v2/Transaction".to_owned()),
            ..Default::default()
        };
        let resolver = EndpointResolver::new(&config);

        assert_eq!(resolver.resolve(Endpoint::QueryCustomer, Some("5")), "/v2/Customer/5/Profile");
        assert_eq!(resolver.resolve(Endpoint::Transaction, None), "/v2/Transaction");
        assert_eq!(resolver.resolve(Endpoint::Refund, Some("5")), "/Transaction/5/Refund");
    }

    #[test]
    fn test_endpoint_config_from_toml() {
        let toml = r#"
            query_customer = "/Customer/{id}"
            settlement_search = "/Search/Settlement"
        "#;

        let config: EndpointConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.query_customer.as_deref(), Some("/Customer/{id}"));
        assert!(config.transaction.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_path_traversal_rejected() {
        let config = EndpointConfig { refund: Some("/../{id}/Refund".to_owned()), ..Default::default() };
        assert!(matches!(config.validate(), Err(RapidError::ConfigError(_))));
    }

    #[test]
    fn test_validate_double_slash_rejected() {
        let config = EndpointConfig { transaction: Some("//Transaction".to_owned()), ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_leading_slash_required() {
        let config = EndpointConfig { capture_payment: Some("CapturePayment".to_owned()), ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_query_string_rejected() {
        let config =
            EndpointConfig { settlement_search: Some("/Search?x=1".to_owned()), ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_placeholder_required() {
        let config = EndpointConfig { query_customer: Some("/Customer".to_owned()), ..Default::default() };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("{id}"));
    }
}

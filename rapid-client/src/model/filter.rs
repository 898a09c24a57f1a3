//! Transaction lookup filters.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical transaction lookup: exactly one discriminant.
///
/// Produced by [`QueryResolver`](crate::gateway::QueryResolver); the named
/// constructors build one directly for callers that already know which
/// lookup they want.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionFilter {
    /// Gateway transaction ID.
    TransactionId(u64),
    /// Access code issued for a hosted or redirect flow.
    AccessCode(String),
    /// Merchant invoice number.
    InvoiceNumber(String),
    /// Merchant invoice reference.
    InvoiceReference(String),
}

impl TransactionFilter {
    /// Looks up a transaction by gateway ID.
    #[must_use]
    pub fn by_id(transaction_id: u64) -> Self {
        Self::TransactionId(transaction_id)
    }

    /// Looks up a transaction by access code.
    pub fn by_access_code(access_code: impl Into<String>) -> Self {
        Self::AccessCode(access_code.into())
    }

    /// Looks up a transaction by invoice number.
    pub fn by_invoice_number(invoice_number: impl Into<String>) -> Self {
        Self::InvoiceNumber(invoice_number.into())
    }

    /// Looks up a transaction by invoice reference.
    pub fn by_invoice_reference(invoice_reference: impl Into<String>) -> Self {
        Self::InvoiceReference(invoice_reference.into())
    }

    /// Field name of the populated discriminant.
    #[must_use]
    pub const fn field_name(&self) -> &'static str {
        match self {
            Self::TransactionId(_) => "transaction_id",
            Self::AccessCode(_) => "access_code",
            Self::InvoiceNumber(_) => "invoice_number",
            Self::InvoiceReference(_) => "invoice_reference",
        }
    }
}

impl fmt::Display for TransactionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TransactionId(id) => write!(f, "transaction_id={id}"),
            Self::AccessCode(code) => write!(f, "access_code={code}"),
            Self::InvoiceNumber(number) => write!(f, "invoice_number={number}"),
            Self::InvoiceReference(reference) => write!(f, "invoice_reference={reference}"),
        }
    }
}

/// Loosely-typed lookup input, as read from config files or command lines.
///
/// Any number of fields may be set here; the resolver rejects anything other
/// than exactly one. A zero ID and blank strings count as not set. The ID is
/// an `i128` so every signed and unsigned integer up to 64 bits converts into
/// it without loss; the resolver rejects values outside the gateway's range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterParams {
    /// Gateway transaction ID.
    pub transaction_id: Option<i128>,
    /// Access code.
    pub access_code: Option<String>,
    /// Merchant invoice number.
    pub invoice_number: Option<String>,
    /// Merchant invoice reference.
    pub invoice_reference: Option<String>,
}

impl FilterParams {
    /// Filter on a transaction ID given as any integer up to 64 bits.
    pub fn transaction_id(id: impl Into<i128>) -> Self {
        Self { transaction_id: Some(id.into()), ..Self::default() }
    }

    /// Filter on an access code.
    pub fn access_code(access_code: impl Into<String>) -> Self {
        Self { access_code: Some(access_code.into()), ..Self::default() }
    }

    /// Filter on an invoice number.
    pub fn invoice_number(invoice_number: impl Into<String>) -> Self {
        Self { invoice_number: Some(invoice_number.into()), ..Self::default() }
    }

    /// Filter on an invoice reference.
    pub fn invoice_reference(invoice_reference: impl Into<String>) -> Self {
        Self { invoice_reference: Some(invoice_reference.into()), ..Self::default() }
    }
}

impl From<TransactionFilter> for FilterParams {
    fn from(filter: TransactionFilter) -> Self {
        match filter {
            TransactionFilter::TransactionId(id) => Self::transaction_id(id),
            TransactionFilter::AccessCode(code) => Self::access_code(code),
            TransactionFilter::InvoiceNumber(number) => Self::invoice_number(number),
            TransactionFilter::InvoiceReference(reference) => Self::invoice_reference(reference),
        }
    }
}

impl From<&TransactionFilter> for FilterParams {
    fn from(filter: &TransactionFilter) -> Self {
        filter.clone().into()
    }
}

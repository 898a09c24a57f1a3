//! Query Resolver.
//!
//! Every transaction lookup entry point funnels through
//! [`QueryResolver::resolve`], so that a lookup by ID given as `i32`, `u32`,
//! `i64` or `u64`, by access code, or through loose [`FilterParams`], produces the
//! same canonical [`TransactionFilter`] and therefore the same wire request.

use crate::{
    error::{RapidError, Result},
    model::{FilterParams, TransactionFilter},
};

/// Normalises loose lookup input into exactly one canonical discriminant.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryResolver;

impl QueryResolver {
    /// Resolves `params` into a [`TransactionFilter`].
    ///
    /// A zero transaction ID and blank strings count as not supplied. String
    /// values are trimmed.
    ///
    /// # Errors
    ///
    /// - [`RapidError::InvalidInput`] for a transaction ID that is negative or
    ///   wider than 64 bits, or a value that is a relative path segment (`.` or
    ///   `..`)
    /// - [`RapidError::AmbiguousFilter`] when more than one discriminant is set
    /// - [`RapidError::EmptyFilter`] when none is
    ///
    /// # Examples
    ///
    /// ```
    /// use rapid_client::{
    ///     gateway::QueryResolver,
    ///     model::{FilterParams, TransactionFilter},
    /// };
    ///
    /// let by_int = QueryResolver::resolve(&FilterParams::transaction_id(42_i32)).unwrap();
    /// let by_long = QueryResolver::resolve(&FilterParams::transaction_id(42_i64)).unwrap();
    /// assert_eq!(by_int, by_long);
    /// assert_eq!(by_int, TransactionFilter::TransactionId(42));
    /// ```
    pub fn resolve(params: &FilterParams) -> Result<TransactionFilter> {
        let transaction_id = normalize_id(params.transaction_id)?;
        let access_code = normalize_text("access_code", params.access_code.as_deref())?;
        let invoice_number = normalize_text("invoice_number", params.invoice_number.as_deref())?;
        let invoice_reference =
            normalize_text("invoice_reference", params.invoice_reference.as_deref())?;

        let supplied: Vec<&'static str> = [
            ("transaction_id", transaction_id.is_some()),
            ("access_code", access_code.is_some()),
            ("invoice_number", invoice_number.is_some()),
            ("invoice_reference", invoice_reference.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, present)| present.then_some(name))
        .collect();

        if supplied.len() > 1 {
            return Err(RapidError::AmbiguousFilter(supplied));
        }

        transaction_id
            .map(TransactionFilter::TransactionId)
            .or_else(|| access_code.map(TransactionFilter::AccessCode))
            .or_else(|| invoice_number.map(TransactionFilter::InvoiceNumber))
            .or_else(|| invoice_reference.map(TransactionFilter::InvoiceReference))
            .ok_or(RapidError::EmptyFilter)
    }
}

fn normalize_id(id: Option<i128>) -> Result<Option<u64>> {
    match id {
        None | Some(0) => Ok(None),
        Some(id) if id < 0 => {
            Err(RapidError::InvalidInput(format!("transaction_id must be positive, got {id}")))
        }
        Some(id) => u64::try_from(id).map(Some).map_err(|_| {
            RapidError::InvalidInput(format!("transaction_id {id} exceeds the 64-bit ID range"))
        }),
    }
}

fn normalize_text(field: &str, value: Option<&str>) -> Result<Option<String>> {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    if value == "." || value == ".." {
        return Err(RapidError::InvalidInput(format!("{field} must not be '{value}'")));
    }
    Ok(Some(value.to_owned()))
}

//! Gateway wire representation.
//!
//! Serde structs matching the gateway's JSON schema (PascalCase field names,
//! a handful of upper-case acronyms). Nothing here makes decisions: which
//! fields get populated is the request builder's job, and how a response is
//! classified is the mapper's.

mod request;
mod response;

pub(crate) use request::{
    CancelAuthorisationBody, CapturePaymentBody, RefundBody, TransactionBody, WireCustomer,
    WirePayment,
};
pub(crate) use response::{
    CustomerQueryWire, CreateResponseWire, RefundResponseWire, SettlementSearchWire,
    StatusResponseWire, TransactionQueryWire, WireSettlementSummary, WireSettlementTransaction,
    WireTransactionRecord,
};

/// Deserialises an ID the gateway may send as a number or a string.
///
/// Blank strings, `null` and zero read as `None`.
pub(crate) mod opt_u64 {
    use serde::{Deserialize, Deserializer, de::Error};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(u64),
        String(String),
    }

    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<NumberOrString>::deserialize(deserializer)?;
        let id = match value {
            None => None,
            Some(NumberOrString::Number(n)) => Some(n),
            Some(NumberOrString::String(s)) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.parse::<u64>().map_err(|e| {
                        D::Error::custom(format!("invalid numeric ID '{trimmed}': {e}"))
                    })?)
                }
            }
        };
        Ok(id.filter(|id| *id != 0))
    }
}

/// Deserialises a value the gateway may send as `null`, reading `null` as
/// the type's default.
pub(crate) mod null_default {
    use serde::{Deserialize, Deserializer};

    pub(crate) fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + Default,
    {
        Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
    }
}

//! Domain responses returned by [`RapidClient`](crate::RapidClient).
//!
//! Every response carries an [`Outcome`]. A gateway decline or validation
//! failure is an `Outcome::Failed` value, not an `Err`: business results are
//! data, and only local validation and transport faults use the error channel.

use serde::{Deserialize, Serialize};

use crate::model::{Customer, CustomerState, ErrorCode, Payment, PaymentMethod};

/// Information needed to finish a hosted or redirect card capture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Continuation {
    /// Gateway access code correlating the session with its result.
    pub access_code: String,
    /// Form target for [`PaymentMethod::TransparentRedirect`].
    pub form_action_url: Option<String>,
    /// Hosted page for [`PaymentMethod::ResponsiveShared`].
    pub shared_payment_url: Option<String>,
}

impl Continuation {
    /// URL the buyer should be sent to, if the gateway returned one.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.shared_payment_url.as_deref().or(self.form_action_url.as_deref())
    }
}

/// Gateway failure: the raw codes, in gateway order, and a readable summary.
///
/// A `Failure` always holds at least one code. Deserialising an empty list
/// fails, and the summary is rebuilt from the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FailureRecord")]
pub struct Failure {
    errors: Vec<ErrorCode>,
    summary: Option<String>,
}

#[derive(Deserialize)]
struct FailureRecord {
    errors: Vec<ErrorCode>,
}

impl TryFrom<FailureRecord> for Failure {
    type Error = &'static str;

    fn try_from(record: FailureRecord) -> Result<Self, Self::Error> {
        Self::new(record.errors).ok_or("a failure needs at least one error code")
    }
}

impl Failure {
    /// Builds a failure from gateway codes. Returns `None` for an empty list.
    ///
    /// The summary joins the catalogue descriptions of the codes that have one.
    #[must_use]
    pub fn new(errors: Vec<ErrorCode>) -> Option<Self> {
        if errors.is_empty() {
            return None;
        }
        let messages: Vec<&str> = errors.iter().filter_map(ErrorCode::message).collect();
        let summary = (!messages.is_empty()).then(|| messages.join("; "));
        Some(Self { errors, summary })
    }

    /// Gateway codes exactly as received.
    #[must_use]
    pub fn errors(&self) -> &[ErrorCode] {
        &self.errors
    }

    /// Readable summary, when at least one code is in the catalogue.
    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }
}

/// Classification of a gateway response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// The gateway accepted the request.
    Success,
    /// The buyer still has to enter card details out-of-band.
    Pending(Continuation),
    /// The gateway declined or rejected the request.
    Failed(Failure),
}

impl Outcome {
    /// True unless the outcome is [`Outcome::Failed`]. A pending flow is not a
    /// failure.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        !matches!(self, Self::Failed(_))
    }

    /// True for [`Outcome::Pending`].
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    /// Gateway codes; empty unless failed.
    #[must_use]
    pub fn errors(&self) -> &[ErrorCode] {
        match self {
            Self::Failed(failure) => failure.errors(),
            Self::Success | Self::Pending(_) => &[],
        }
    }

    /// Continuation of a pending flow.
    #[must_use]
    pub const fn continuation(&self) -> Option<&Continuation> {
        match self {
            Self::Pending(continuation) => Some(continuation),
            _ => None,
        }
    }

    /// Failure details.
    #[must_use]
    pub const fn failure(&self) -> Option<&Failure> {
        match self {
            Self::Failed(failure) => Some(failure),
            _ => None,
        }
    }
}

/// Caller-facing status of a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseStatus {
    /// Accepted by the gateway.
    Approved,
    /// Awaiting out-of-band card capture.
    Pending,
    /// Declined or rejected.
    Failed,
    /// An authorisation was voided.
    Cancelled,
}

/// Accessors shared by every response object.
pub trait GatewayResponse {
    /// Classification of the response.
    fn outcome(&self) -> &Outcome;

    /// False if and only if [`errors`](Self::errors) is non-empty.
    fn is_success(&self) -> bool {
        self.outcome().is_success()
    }

    /// Gateway codes, in gateway order.
    fn errors(&self) -> &[ErrorCode] {
        self.outcome().errors()
    }

    /// Caller-facing status.
    fn status(&self) -> ResponseStatus {
        match self.outcome() {
            Outcome::Success => ResponseStatus::Approved,
            Outcome::Pending(_) => ResponseStatus::Pending,
            Outcome::Failed(_) => ResponseStatus::Failed,
        }
    }
}

macro_rules! impl_gateway_response {
    ($($response:ty),+ $(,)?) => {
        $(
            impl GatewayResponse for $response {
                fn outcome(&self) -> &Outcome {
                    &self.outcome
                }
            }
        )+
    };
}

impl_gateway_response!(
    CreateTransactionResponse,
    CreateCustomerResponse,
    QueryCustomerResponse,
    QueryTransactionResponse,
    RefundResponse,
    CapturePaymentResponse,
    SettlementSearchResponse,
);

/// Result of [`create_transaction`](crate::RapidClient::create_transaction).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTransactionResponse {
    /// Classification.
    pub outcome: Outcome,
    /// Payment method the transaction was sent with.
    pub payment_method: PaymentMethod,
    /// Gateway transaction ID; absent for pending flows.
    pub transaction_id: Option<u64>,
    /// Issuer authorisation code.
    pub authorisation_code: Option<String>,
    /// Two-character bank response code.
    pub response_code: Option<String>,
    /// Response message codes (approval or decline).
    pub response_messages: Vec<ErrorCode>,
    /// Customer echoed by the gateway, card number masked.
    pub customer: Option<Customer>,
    /// Payment echoed by the gateway.
    pub payment: Option<Payment>,
}

/// Result of creating or updating a token customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateCustomerResponse {
    /// Classification.
    pub outcome: Outcome,
    /// Payment method the customer was sent with.
    pub payment_method: PaymentMethod,
    /// Customer state; `Pending` until a hosted flow completes.
    pub customer_state: Option<CustomerState>,
    /// Customer echoed by the gateway, with the assigned token ID.
    pub customer: Option<Customer>,
}

/// Result of [`query_customer`](crate::RapidClient::query_customer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryCustomerResponse {
    /// Classification.
    pub outcome: Outcome,
    /// Matching token customers.
    pub customers: Vec<Customer>,
}

/// A transaction returned by a lookup.
///
/// `approved` reflects the transaction's own result; a successful lookup of a
/// declined transaction is still a successful lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Gateway transaction ID.
    pub transaction_id: Option<u64>,
    /// Whether the transaction was approved.
    pub approved: bool,
    /// Whether the funds were captured; `false` for open authorisations.
    pub captured: Option<bool>,
    /// Issuer authorisation code.
    pub authorisation_code: Option<String>,
    /// Two-character bank response code.
    pub response_code: Option<String>,
    /// Response message codes.
    pub response_messages: Vec<ErrorCode>,
    /// Total amount in minor units.
    pub total_amount: u64,
    /// Merchant invoice number.
    pub invoice_number: Option<String>,
    /// Merchant invoice reference.
    pub invoice_reference: Option<String>,
    /// Token customer ID, if the transaction used or created one.
    pub token_customer_id: Option<u64>,
    /// Customer details, card number masked.
    pub customer: Option<Customer>,
}

/// Result of a transaction lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryTransactionResponse {
    /// Classification.
    pub outcome: Outcome,
    /// Matching transactions.
    pub transactions: Vec<TransactionRecord>,
}

/// Result of [`refund`](crate::RapidClient::refund).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefundResponse {
    /// Classification.
    pub outcome: Outcome,
    /// Gateway ID of the refund transaction.
    pub transaction_id: Option<u64>,
    /// Issuer authorisation code.
    pub authorisation_code: Option<String>,
    /// Two-character bank response code.
    pub response_code: Option<String>,
    /// Response message codes.
    pub response_messages: Vec<ErrorCode>,
    /// Refund echoed by the gateway.
    pub refund: Option<Payment>,
}

/// Result of [`capture_payment`](crate::RapidClient::capture_payment).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapturePaymentResponse {
    /// Classification.
    pub outcome: Outcome,
    /// Gateway ID of the capture transaction.
    pub transaction_id: Option<u64>,
    /// Two-character bank response code.
    pub response_code: Option<String>,
    /// Response message codes.
    pub response_messages: Vec<ErrorCode>,
}

/// Result of [`cancel_authorisation`](crate::RapidClient::cancel_authorisation).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancelAuthorisationResponse {
    /// Classification.
    pub outcome: Outcome,
    /// Gateway ID of the cancellation.
    pub transaction_id: Option<u64>,
    /// Two-character bank response code.
    pub response_code: Option<String>,
    /// Response message codes.
    pub response_messages: Vec<ErrorCode>,
}

impl GatewayResponse for CancelAuthorisationResponse {
    fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    fn status(&self) -> ResponseStatus {
        match self.outcome {
            Outcome::Success => ResponseStatus::Cancelled,
            Outcome::Pending(_) => ResponseStatus::Pending,
            Outcome::Failed(_) => ResponseStatus::Failed,
        }
    }
}

/// Per-currency settlement totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementSummary {
    /// Settlement batch identifier.
    pub settlement_id: Option<String>,
    /// ISO 4217 currency code.
    pub currency: Option<String>,
    /// Settlement date as reported by the gateway.
    pub settlement_date: Option<String>,
    /// Credits in minor units.
    pub total_credit: i64,
    /// Debits in minor units.
    pub total_debit: i64,
    /// Net total in minor units.
    pub total: i64,
}

/// A transaction included in a settlement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementTransaction {
    /// Settlement batch identifier.
    pub settlement_id: Option<String>,
    /// Gateway transaction ID.
    pub transaction_id: Option<u64>,
    /// Transaction timestamp as reported by the gateway.
    pub transaction_date_time: Option<String>,
    /// Card type code.
    pub card_type: Option<String>,
    /// Amount in minor units; negative for refunds.
    pub amount: i64,
    /// ISO 4217 currency code.
    pub currency: Option<String>,
    /// Gateway transaction type.
    pub transaction_type: Option<String>,
}

/// Result of [`search_settlements`](crate::RapidClient::search_settlements).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementSearchResponse {
    /// Classification.
    pub outcome: Outcome,
    /// Per-currency totals.
    pub summaries: Vec<SettlementSummary>,
    /// Settled transactions.
    pub transactions: Vec<SettlementTransaction>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(raw: &[&str]) -> Vec<ErrorCode> {
        raw.iter().copied().map(ErrorCode::from).collect()
    }

    #[test]
    fn test_failure_requires_codes() {
        assert!(Failure::new(Vec::new()).is_none());
        let failure = Failure::new(codes(&["D4405"])).unwrap();
        assert_eq!(failure.errors().len(), 1);
        assert_eq!(failure.summary(), Some("Do Not Honour"));
    }

    #[test]
    fn test_failed_outcome_deserialisation_keeps_invariant() {
        let err = serde_json::from_str::<Outcome>(r#"{"Failed":{"errors":[]}}"#).unwrap_err();
        assert!(err.to_string().contains("at least one error code"));

        let outcome = Outcome::Failed(Failure::new(codes(&["D4405"])).unwrap());
        let json = serde_json::to_string(&outcome).unwrap();
        assert_eq!(serde_json::from_str::<Outcome>(&json).unwrap(), outcome);
    }

    #[test]
    fn test_failure_summary_skips_unknown_codes() {
        let failure = Failure::new(codes(&["Z0001", "V6021", "V6022"])).unwrap();
        assert_eq!(failure.summary(), Some("Cardholder Name Required; Card Number Required"));

        let failure = Failure::new(codes(&["Z0001"])).unwrap();
        assert_eq!(failure.summary(), None);
    }

    #[test]
    fn test_pending_is_success_without_errors() {
        let outcome = Outcome::Pending(Continuation {
            access_code: "AC123".to_owned(),
            form_action_url: None,
            shared_payment_url: Some("https://secure.ewaypayments.com/sharedpage/AC123".to_owned()),
        });
        assert!(outcome.is_success());
        assert!(outcome.is_pending());
        assert!(outcome.errors().is_empty());
        assert_eq!(
            outcome.continuation().and_then(Continuation::url),
            Some("https://secure.ewaypayments.com/sharedpage/AC123")
        );
    }

    #[test]
    fn test_failed_outcome_exposes_errors() {
        let outcome = Outcome::Failed(Failure::new(codes(&["V6047"])).unwrap());
        assert!(!outcome.is_success());
        assert_eq!(outcome.errors(), codes(&["V6047"]).as_slice());
        assert!(outcome.continuation().is_none());
    }

    #[test]
    fn test_cancel_reports_cancelled() {
        let response = CancelAuthorisationResponse {
            outcome: Outcome::Success,
            transaction_id: Some(10),
            response_code: None,
            response_messages: Vec::new(),
        };
        assert_eq!(response.status(), ResponseStatus::Cancelled);
        assert!(response.is_success());
    }

    #[test]
    fn test_default_status_mapping() {
        let response = QueryCustomerResponse { outcome: Outcome::Success, customers: Vec::new() };
        assert_eq!(response.status(), ResponseStatus::Approved);

        let response = QueryCustomerResponse {
            outcome: Outcome::Failed(Failure::new(codes(&["V6040"])).unwrap()),
            customers: Vec::new(),
        };
        assert_eq!(response.status(), ResponseStatus::Failed);
        assert!(!response.is_success());
    }
}

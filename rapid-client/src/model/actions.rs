//! Follow-up actions on prior transactions and settlement searches.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{LineItem, Payment};

/// Refunds all or part of a prior transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Refund {
    /// Gateway ID of the transaction being refunded.
    pub transaction_id: u64,
    /// Refund amount and invoice details.
    pub refund: Payment,
    /// Refunded lines.
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    /// Free-form metadata.
    #[serde(default)]
    pub metadata: Vec<String>,
    /// Caller-supplied idempotency key, forwarded unchanged.
    pub idempotency_key: Option<String>,
}

impl Refund {
    /// Creates a refund of `amount` minor units against `transaction_id`.
    #[must_use]
    pub fn new(transaction_id: u64, amount: u64) -> Self {
        Self { transaction_id, refund: Payment::new(amount), ..Self::default() }
    }
}

/// Captures funds previously authorised with
/// [`PaymentMethod::Authorisation`](crate::model::PaymentMethod::Authorisation).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturePaymentRequest {
    /// Gateway ID of the authorisation.
    pub transaction_id: u64,
    /// Amount to capture and invoice details.
    pub payment: Payment,
    /// Caller-supplied idempotency key, forwarded unchanged.
    pub idempotency_key: Option<String>,
}

impl CapturePaymentRequest {
    /// Creates a capture of `amount` minor units against `transaction_id`.
    #[must_use]
    pub fn new(transaction_id: u64, amount: u64) -> Self {
        Self { transaction_id, payment: Payment::new(amount), idempotency_key: None }
    }
}

/// Voids an uncaptured authorisation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelAuthorisationRequest {
    /// Gateway ID of the authorisation.
    pub transaction_id: u64,
    /// Merchant's reason for cancelling. Recorded in the request span; the
    /// gateway has no field for it.
    pub reason: Option<String>,
    /// Caller-supplied idempotency key, forwarded unchanged.
    pub idempotency_key: Option<String>,
}

impl CancelAuthorisationRequest {
    /// Creates a cancellation of `transaction_id`.
    #[must_use]
    pub fn new(transaction_id: u64) -> Self {
        Self { transaction_id, ..Self::default() }
    }
}

/// Which parts of a settlement report to return.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportMode {
    /// Summaries and transactions.
    #[default]
    Both,
    /// Summaries only.
    SummaryOnly,
    /// Transactions only.
    TransactionOnly,
}

impl ReportMode {
    /// Wire name of the report mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Both => "Both",
            Self::SummaryOnly => "SummaryOnly",
            Self::TransactionOnly => "TransactionOnly",
        }
    }
}

/// Search for settlements.
///
/// Either a single `settlement_date` or a `start_date`/`end_date` range should be
/// given. A range whose start is after its end is rejected before sending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementSearchRequest {
    /// Parts of the report to return.
    #[serde(default)]
    pub report_mode: ReportMode,
    /// A single settlement date.
    pub settlement_date: Option<NaiveDate>,
    /// Start of a settlement date range (inclusive).
    pub start_date: Option<NaiveDate>,
    /// End of a settlement date range (inclusive).
    pub end_date: Option<NaiveDate>,
    /// Card type code (e.g. "VI", "MC", "ALL").
    pub card_type: Option<String>,
    /// ISO 4217 currency code.
    pub currency: Option<String>,
    /// Page number, starting at 1.
    pub page: Option<u32>,
    /// Results per page.
    pub page_size: Option<u32>,
}

impl SettlementSearchRequest {
    /// Searches a single settlement date.
    #[must_use]
    pub fn on(date: NaiveDate) -> Self {
        Self { settlement_date: Some(date), ..Self::default() }
    }

    /// Searches an inclusive range of settlement dates.
    #[must_use]
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start_date: Some(start), end_date: Some(end), ..Self::default() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refund_new() {
        let refund = Refund::new(11_929_054, 500);
        assert_eq!(refund.transaction_id, 11_929_054);
        assert_eq!(refund.refund.total_amount, 500);
        assert!(refund.idempotency_key.is_none());
    }

    #[test]
    fn test_settlement_search_constructors() {
        let day = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let search = SettlementSearchRequest::on(day);
        assert_eq!(search.settlement_date, Some(day));
        assert_eq!(search.report_mode, ReportMode::Both);

        let end = NaiveDate::from_ymd_opt(2026, 3, 31).unwrap();
        let search = SettlementSearchRequest::between(day, end);
        assert_eq!(search.start_date, Some(day));
        assert_eq!(search.end_date, Some(end));
        assert!(search.settlement_date.is_none());
    }

    #[test]
    fn test_report_mode_wire_names() {
        assert_eq!(ReportMode::SummaryOnly.as_str(), "SummaryOnly");
        assert_eq!(ReportMode::default().as_str(), "Both");
    }
}

//! Response Mapper.
//!
//! Decodes a 2xx gateway body into its domain response and classifies it.
//! The classification rule is the same for every operation:
//!
//! - the `Errors` list is split into codes, in gateway order
//! - where the gateway reports a `TransactionStatus`, a `false` status also
//!   contributes the non-approval codes of `ResponseMessage`, and falls back to
//!   [`UNKNOWN_GATEWAY_ERROR`] if that still leaves no code
//! - any code means [`Outcome::Failed`]; otherwise hosted flows are
//!   [`Outcome::Pending`] and everything else is [`Outcome::Success`]
//!
//! A body that is not valid JSON for its shape is a protocol error, not a
//! declined outcome.

use serde::de::DeserializeOwned;

use crate::{
    error::{RapidError, Result},
    model::{
        CancelAuthorisationResponse, CapturePaymentResponse, Continuation, CreateCustomerResponse,
        CreateTransactionResponse, Customer, CustomerState, ErrorCode, Failure, Outcome, Payment,
        PaymentMethod, QueryCustomerResponse, QueryTransactionResponse, RefundResponse,
        SettlementSearchResponse, SettlementSummary, SettlementTransaction, TransactionRecord,
        UNKNOWN_GATEWAY_ERROR,
    },
    wire::{
        CreateResponseWire, CustomerQueryWire, RefundResponseWire, SettlementSearchWire,
        StatusResponseWire, TransactionQueryWire, WireSettlementSummary,
        WireSettlementTransaction, WireTransactionRecord,
    },
};

use super::Operation;

fn decode<T: DeserializeOwned>(operation: Operation, body: &[u8]) -> Result<T> {
    serde_json::from_slice(body)
        .map_err(|e| RapidError::InvalidResponse(format!("cannot decode {operation} response: {e}")))
}

/// Gateway codes for a response.
///
/// `status` is `Some` only for operations whose response carries a
/// meaningful `TransactionStatus`.
fn collect_codes(
    errors: Option<&str>,
    status: Option<Option<bool>>,
    response_message: Option<&str>,
) -> Vec<ErrorCode> {
    let mut codes = errors.map(ErrorCode::parse_list).unwrap_or_default();

    if let Some(Some(false)) = status {
        for code in response_message.map(ErrorCode::parse_list).unwrap_or_default() {
            if !code.is_approval() && !codes.contains(&code) {
                codes.push(code);
            }
        }
        if codes.is_empty() {
            codes.push(ErrorCode::new(UNKNOWN_GATEWAY_ERROR));
        }
    }

    codes
}

fn outcome_of(codes: Vec<ErrorCode>) -> Outcome {
    Failure::new(codes).map_or(Outcome::Success, Outcome::Failed)
}

fn response_messages(response_message: Option<&str>) -> Vec<ErrorCode> {
    response_message.map(ErrorCode::parse_list).unwrap_or_default()
}

/// Turns a successful hosted-flow response into a continuation.
fn continuation(operation: Operation, wire: &CreateResponseWire) -> Result<Continuation> {
    let access_code = wire
        .access_code
        .as_deref()
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .ok_or_else(|| {
            RapidError::InvalidResponse(format!("{operation} response has no AccessCode"))
        })?;
    Ok(Continuation {
        access_code: access_code.to_owned(),
        form_action_url: wire.form_action_url.clone(),
        shared_payment_url: wire.shared_payment_url.clone(),
    })
}

/// Classifies a create/update response, promoting hosted successes to
/// [`Outcome::Pending`].
fn create_outcome(
    operation: Operation,
    method: PaymentMethod,
    wire: &CreateResponseWire,
    codes: Vec<ErrorCode>,
) -> Result<Outcome> {
    match outcome_of(codes) {
        Outcome::Success if method.is_hosted() => {
            Ok(Outcome::Pending(continuation(operation, wire)?))
        }
        outcome => Ok(outcome),
    }
}

/// Maps decoded gateway bodies to domain responses.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseMapper;

impl ResponseMapper {
    /// Maps a payment response.
    ///
    /// # Errors
    ///
    /// Returns [`RapidError::InvalidResponse`] if the body does not decode, or
    /// a hosted flow succeeded without an access code.
    pub fn create_transaction(method: PaymentMethod, body: &[u8]) -> Result<CreateTransactionResponse> {
        let operation = Operation::CreateTransaction;
        let wire: CreateResponseWire = decode(operation, body)?;

        let status = (!method.is_hosted()).then_some(wire.transaction_status);
        let codes =
            collect_codes(wire.errors.as_deref(), status, wire.response_message.as_deref());
        let outcome = create_outcome(operation, method, &wire, codes)?;

        Ok(CreateTransactionResponse {
            response_messages: response_messages(wire.response_message.as_deref()),
            outcome,
            payment_method: method,
            transaction_id: wire.transaction_id,
            authorisation_code: wire.authorisation_code,
            response_code: wire.response_code,
            customer: wire.customer.map(Customer::from),
            payment: wire.payment.map(Payment::from),
        })
    }

    /// Maps a token customer create or update response.
    ///
    /// # Errors
    ///
    /// As [`create_transaction`](Self::create_transaction).
    pub fn create_customer(
        operation: Operation,
        method: PaymentMethod,
        body: &[u8],
    ) -> Result<CreateCustomerResponse> {
        let wire: CreateResponseWire = decode(operation, body)?;

        let codes = collect_codes(wire.errors.as_deref(), None, None);
        let outcome = create_outcome(operation, method, &wire, codes)?;
        let customer_state = match outcome {
            Outcome::Success => Some(CustomerState::Active),
            Outcome::Pending(_) => Some(CustomerState::Pending),
            Outcome::Failed(_) => None,
        };

        Ok(CreateCustomerResponse {
            outcome,
            payment_method: method,
            customer_state,
            customer: wire.customer.map(Customer::from),
        })
    }

    /// Maps a token customer lookup.
    ///
    /// # Errors
    ///
    /// Returns [`RapidError::InvalidResponse`] if the body does not decode.
    pub fn query_customer(body: &[u8]) -> Result<QueryCustomerResponse> {
        let wire: CustomerQueryWire = decode(Operation::QueryCustomer, body)?;
        Ok(QueryCustomerResponse {
            outcome: outcome_of(collect_codes(wire.errors.as_deref(), None, None)),
            customers: wire.customers.into_iter().map(Customer::from).collect(),
        })
    }

    /// Maps a transaction lookup.
    ///
    /// The lookup itself succeeds when the gateway reports no `Errors`; whether
    /// each transaction was approved is on its [`TransactionRecord`].
    ///
    /// # Errors
    ///
    /// Returns [`RapidError::InvalidResponse`] if the body does not decode.
    pub fn query_transaction(body: &[u8]) -> Result<QueryTransactionResponse> {
        let wire: TransactionQueryWire = decode(Operation::QueryTransaction, body)?;
        Ok(QueryTransactionResponse {
            outcome: outcome_of(collect_codes(wire.errors.as_deref(), None, None)),
            transactions: wire.transactions.into_iter().map(TransactionRecord::from).collect(),
        })
    }

    /// Maps a refund response.
    ///
    /// # Errors
    ///
    /// Returns [`RapidError::InvalidResponse`] if the body does not decode.
    pub fn refund(body: &[u8]) -> Result<RefundResponse> {
        let wire: RefundResponseWire = decode(Operation::Refund, body)?;
        let codes = collect_codes(
            wire.errors.as_deref(),
            Some(wire.transaction_status),
            wire.response_message.as_deref(),
        );
        Ok(RefundResponse {
            outcome: outcome_of(codes),
            transaction_id: wire.transaction_id,
            authorisation_code: wire.authorisation_code,
            response_code: wire.response_code,
            response_messages: response_messages(wire.response_message.as_deref()),
            refund: wire.refund.map(Payment::from),
        })
    }

    /// Maps a capture response.
    ///
    /// # Errors
    ///
    /// Returns [`RapidError::InvalidResponse`] if the body does not decode.
    pub fn capture_payment(body: &[u8]) -> Result<CapturePaymentResponse> {
        let wire: StatusResponseWire = decode(Operation::CapturePayment, body)?;
        let codes = collect_codes(
            wire.errors.as_deref(),
            Some(wire.transaction_status),
            wire.response_message.as_deref(),
        );
        Ok(CapturePaymentResponse {
            outcome: outcome_of(codes),
            transaction_id: wire.transaction_id,
            response_code: wire.response_code,
            response_messages: response_messages(wire.response_message.as_deref()),
        })
    }

    /// Maps a cancel authorisation response.
    ///
    /// # Errors
    ///
    /// Returns [`RapidError::InvalidResponse`] if the body does not decode.
    pub fn cancel_authorisation(body: &[u8]) -> Result<CancelAuthorisationResponse> {
        let wire: StatusResponseWire = decode(Operation::CancelAuthorisation, body)?;
        let codes = collect_codes(
            wire.errors.as_deref(),
            Some(wire.transaction_status),
            wire.response_message.as_deref(),
        );
        Ok(CancelAuthorisationResponse {
            outcome: outcome_of(codes),
            transaction_id: wire.transaction_id,
            response_code: wire.response_code,
            response_messages: response_messages(wire.response_message.as_deref()),
        })
    }

    /// Maps a settlement search.
    ///
    /// # Errors
    ///
    /// Returns [`RapidError::InvalidResponse`] if the body does not decode.
    pub fn search_settlements(body: &[u8]) -> Result<SettlementSearchResponse> {
        let wire: SettlementSearchWire = decode(Operation::SearchSettlements, body)?;
        Ok(SettlementSearchResponse {
            outcome: outcome_of(collect_codes(wire.errors.as_deref(), None, None)),
            summaries: wire.settlement_summaries.into_iter().map(SettlementSummary::from).collect(),
            transactions: wire
                .settlement_transactions
                .into_iter()
                .map(SettlementTransaction::from)
                .collect(),
        })
    }
}

impl From<WireTransactionRecord> for TransactionRecord {
    fn from(wire: WireTransactionRecord) -> Self {
        Self {
            transaction_id: wire.transaction_id,
            approved: wire.transaction_status.unwrap_or(false),
            captured: wire.transaction_captured,
            authorisation_code: wire.authorisation_code,
            response_code: wire.response_code,
            response_messages: response_messages(wire.response_message.as_deref()),
            total_amount: wire.total_amount,
            invoice_number: wire.invoice_number,
            invoice_reference: wire.invoice_reference,
            token_customer_id: wire.token_customer_id,
            customer: wire.customer.map(Customer::from),
        }
    }
}

impl From<WireSettlementSummary> for SettlementSummary {
    fn from(wire: WireSettlementSummary) -> Self {
        Self {
            settlement_id: wire.settlement_id,
            currency: wire.currency,
            settlement_date: wire.settlement_date,
            total_credit: wire.total_credit,
            total_debit: wire.total_debit,
            total: wire.total,
        }
    }
}

impl From<WireSettlementTransaction> for SettlementTransaction {
    fn from(wire: WireSettlementTransaction) -> Self {
        Self {
            settlement_id: wire.settlement_id,
            transaction_id: wire.transaction_id,
            transaction_date_time: wire.transaction_date_time,
            card_type: wire.card_type,
            amount: wire.amount,
            currency: wire.currency,
            transaction_type: wire.transaction_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::model::{GatewayResponse, ResponseStatus};

    #[test]
    fn test_approved_direct_payment() {
        let body = br#"{
            "AuthorisationCode": "123456",
            "ResponseCode": "00",
            "ResponseMessage": "A2000",
            "TransactionID": 11929054,
            "TransactionStatus": true,
            "Payment": { "TotalAmount": 1000 },
            "Errors": null
        }"#;

        let response = ResponseMapper::create_transaction(PaymentMethod::Direct, body).unwrap();
        assert!(response.is_success());
        assert!(response.errors().is_empty());
        assert_eq!(response.status(), ResponseStatus::Approved);
        assert_eq!(response.transaction_id, Some(11_929_054));
        assert_eq!(response.response_messages, vec![ErrorCode::new("A2000")]);
        assert_eq!(response.payment.unwrap().total_amount, 1000);
    }

    #[test]
    fn test_approved_payment_with_null_echo_fields() {
        let body = br#"{
            "AuthorisationCode": "123456",
            "ResponseMessage": "A2000",
            "TransactionID": 11929056,
            "TransactionStatus": true,
            "Customer": {
                "TokenCustomerID": null,
                "CardDetails": { "Name": null, "Number": "444433XXXXXX1111", "ExpiryMonth": null, "ExpiryYear": "29" }
            },
            "Payment": { "TotalAmount": null, "CurrencyCode": "AUD" },
            "Errors": null
        }"#;

        let response = ResponseMapper::create_transaction(PaymentMethod::Direct, body).unwrap();
        assert!(response.is_success());
        assert_eq!(response.transaction_id, Some(11_929_056));
        assert_eq!(response.payment.unwrap().total_amount, 0);
        let card = response.customer.and_then(|customer| customer.card_details).unwrap();
        assert!(card.name.is_empty());
        assert_eq!(card.number, "444433XXXXXX1111");
    }

    #[test]
    fn test_query_tolerates_null_lists_and_amounts() {
        let records = ResponseMapper::query_transaction(
            br#"{ "Transactions": [{ "TransactionID": 7, "TransactionStatus": true, "TotalAmount": null }] }"#,
        )
        .unwrap();
        assert!(records.is_success());
        assert_eq!(records.transactions[0].total_amount, 0);

        let empty = ResponseMapper::query_customer(br#"{ "Customers": null, "Errors": null }"#).unwrap();
        assert!(empty.is_success());
        assert!(empty.customers.is_empty());
    }

    #[test]
    fn test_declined_direct_payment() {
        let body = br#"{
            "ResponseCode": "05",
            "ResponseMessage": "D4405",
            "TransactionID": 11929055,
            "TransactionStatus": false,
            "Errors": ""
        }"#;

        let response = ResponseMapper::create_transaction(PaymentMethod::Direct, body).unwrap();
        assert!(!response.is_success());
        assert_eq!(response.errors(), &[ErrorCode::new("D4405")]);
        assert_eq!(response.status(), ResponseStatus::Failed);
        assert_eq!(
            response.outcome.failure().and_then(Failure::summary),
            ErrorCode::new("D4405").message()
        );
    }

    #[test]
    fn test_validation_errors_in_order() {
        let body = br#"{ "TransactionStatus": false, "Errors": "V6021, V6022 ,V6023" }"#;
        let response = ResponseMapper::create_transaction(PaymentMethod::Direct, body).unwrap();
        let codes: Vec<&str> = response.errors().iter().map(ErrorCode::as_str).collect();
        assert_eq!(codes, ["V6021", "V6022", "V6023"]);
    }

    #[test]
    fn test_failed_status_without_codes_is_unknown_error() {
        let body = br#"{ "TransactionStatus": false, "ResponseMessage": "A2000" }"#;
        let response = ResponseMapper::create_transaction(PaymentMethod::Wallet, body).unwrap();
        assert_eq!(response.errors(), &[ErrorCode::new(UNKNOWN_GATEWAY_ERROR)]);
    }

    #[test]
    fn test_duplicate_codes_not_repeated() {
        let body = br#"{ "TransactionStatus": false, "ResponseMessage": "D4405", "Errors": "D4405" }"#;
        let response = ResponseMapper::create_transaction(PaymentMethod::Direct, body).unwrap();
        assert_eq!(response.errors().len(), 1);
    }

    #[test]
    fn test_hosted_payment_is_pending() {
        let body = br#"{
            "AccessCode": "60CF3xWrFUkSjpQl",
            "SharedPaymentUrl": "https://secure.ewaypayments.com/sharedpage/sharedpayment?AccessCode=60CF3xWrFUkSjpQl",
            "Errors": null
        }"#;

        let response =
            ResponseMapper::create_transaction(PaymentMethod::ResponsiveShared, body).unwrap();
        assert!(response.is_success());
        assert_eq!(response.status(), ResponseStatus::Pending);
        let continuation = response.outcome.continuation().unwrap();
        assert_eq!(continuation.access_code, "60CF3xWrFUkSjpQl");
        assert!(continuation.url().unwrap().contains("sharedpayment"));
    }

    #[test]
    fn test_hosted_success_without_access_code_is_invalid() {
        let body = br#"{ "FormActionURL": "https://secure.ewaypayments.com/AccessCode/x", "Errors": "" }"#;
        let err =
            ResponseMapper::create_transaction(PaymentMethod::TransparentRedirect, body).unwrap_err();
        assert!(matches!(err, RapidError::InvalidResponse(_)));
    }

    #[test]
    fn test_hosted_failure_stays_failed() {
        let body = br#"{ "Errors": "V6083" }"#;
        let response =
            ResponseMapper::create_transaction(PaymentMethod::TransparentRedirect, body).unwrap();
        assert_eq!(response.status(), ResponseStatus::Failed);
    }

    #[test]
    fn test_customer_states() {
        let hosted = br#"{
            "AccessCode": "C3AB9tXSp1Q",
            "FormActionURL": "https://secure.ewaypayments.com/AccessCode/C3AB9tXSp1Q",
            "Customer": { "TokenCustomerID": null, "FirstName": "John" }
        }"#;
        let response = ResponseMapper::create_customer(
            Operation::CreateCustomer,
            PaymentMethod::TransparentRedirect,
            hosted,
        )
        .unwrap();
        assert_eq!(response.customer_state, Some(CustomerState::Pending));
        assert!(response.outcome.continuation().is_some());

        let direct = br#"{ "Customer": { "TokenCustomerID": 917758625852 } }"#;
        let response =
            ResponseMapper::create_customer(Operation::CreateCustomer, PaymentMethod::Direct, direct)
                .unwrap();
        assert_eq!(response.customer_state, Some(CustomerState::Active));
        assert_eq!(response.customer.unwrap().token_customer_id, Some(917_758_625_852));

        let failed = br#"{ "Errors": "V6040" }"#;
        let response =
            ResponseMapper::create_customer(Operation::UpdateCustomer, PaymentMethod::Direct, failed)
                .unwrap();
        assert_eq!(response.customer_state, None);
    }

    #[test]
    fn test_query_transaction_records() {
        let body = br#"{
            "Transactions": [{
                "TransactionID": 11929054,
                "TransactionStatus": false,
                "ResponseMessage": "D4405",
                "TotalAmount": 1000
            }]
        }"#;
        let response = ResponseMapper::query_transaction(body).unwrap();
        assert!(response.is_success());
        assert!(!response.transactions[0].approved);
        assert_eq!(response.transactions[0].response_messages, vec![ErrorCode::new("D4405")]);
    }

    #[test]
    fn test_query_with_errors_fails() {
        let response = ResponseMapper::query_customer(br#"{ "Customers": [], "Errors": "V6040" }"#).unwrap();
        assert!(!response.is_success());
    }

    #[test]
    fn test_refund_and_cancel() {
        let refund = ResponseMapper::refund(
            br#"{ "TransactionID": 9, "TransactionStatus": true, "Refund": { "TotalAmount": 500 } }"#,
        )
        .unwrap();
        assert!(refund.is_success());
        assert_eq!(refund.refund.unwrap().total_amount, 500);

        let cancel =
            ResponseMapper::cancel_authorisation(br#"{ "TransactionID": 10, "TransactionStatus": true }"#)
                .unwrap();
        assert_eq!(cancel.status(), ResponseStatus::Cancelled);

        let capture =
            ResponseMapper::capture_payment(br#"{ "TransactionStatus": false, "ResponseMessage": "D4406" }"#)
                .unwrap();
        assert_eq!(capture.errors(), &[ErrorCode::new("D4406")]);
    }

    #[test]
    fn test_settlement_search_mapping() {
        let body = br#"{
            "SettlementSummaries": [{ "SettlementID": "S1", "Currency": "AUD", "Total": 1300 }],
            "SettlementTransactions": [{ "SettlementID": "S1", "eWAYTransactionID": "42", "Amount": 1300 }]
        }"#;
        let response = ResponseMapper::search_settlements(body).unwrap();
        assert_eq!(response.summaries[0].total, 1300);
        assert_eq!(response.transactions[0].transaction_id, Some(42));
    }

    #[test]
    fn test_malformed_body_is_protocol_error() {
        let err = ResponseMapper::refund(b"<html>502</html>").unwrap_err();
        assert!(matches!(err, RapidError::InvalidResponse(_)));
        assert!(!err.is_validation());
    }

    proptest! {
        #[test]
        fn prop_success_iff_no_errors(
            codes in proptest::collection::vec("[ADSVF][0-9]{4}", 0..4),
            status in proptest::option::of(any::<bool>()),
        ) {
            let body = serde_json::json!({
                "TransactionStatus": status,
                "ResponseMessage": "A2000",
                "Errors": codes.join(","),
            });
            let bytes = serde_json::to_vec(&body).unwrap();
            let response = ResponseMapper::create_transaction(PaymentMethod::Direct, &bytes).unwrap();
            prop_assert_eq!(response.is_success(), response.errors().is_empty());
            if !codes.is_empty() || status == Some(false) {
                prop_assert!(!response.is_success());
            }
        }
    }
}

//! Request Builder.
//!
//! Turns a domain request plus an explicit [`PaymentMethod`] into a
//! [`WireRequest`]. The payment method alone decides the endpoint, the
//! gateway `Method` and which fields are sent; the builder never looks at the
//! payload to guess it. Card data present on a request whose method does not
//! carry card details is dropped (and logged), never sent.

use serde::Serialize;
use tracing::warn;
use url::form_urlencoded;

use super::{Endpoint, EndpointResolver, Operation};
use crate::{
    error::{RapidError, Result},
    model::{
        CancelAuthorisationRequest, CapturePaymentRequest, Customer, PaymentMethod, Refund,
        SettlementSearchRequest, Transaction, TransactionFilter,
    },
    wire::{
        CancelAuthorisationBody, CapturePaymentBody, RefundBody, TransactionBody, WireCustomer,
        WirePayment,
    },
};

/// HTTP method of a wire request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// GET, no body.
    Get,
    /// POST with a JSON body.
    Post,
}

/// A fully shaped gateway request, ready for the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireRequest {
    /// Operation the request performs.
    pub operation: Operation,
    /// Payment method it was built for, on create and update calls.
    pub payment_method: Option<PaymentMethod>,
    /// HTTP method.
    pub http_method: HttpMethod,
    /// Path relative to the environment base URL, with any query string.
    pub path: String,
    /// JSON body for POST requests.
    pub body: Option<Vec<u8>>,
    /// Caller-supplied idempotency key, forwarded unchanged.
    pub idempotency_key: Option<String>,
}

impl WireRequest {
    fn get(operation: Operation, path: String) -> Self {
        Self {
            operation,
            payment_method: None,
            http_method: HttpMethod::Get,
            path,
            body: None,
            idempotency_key: None,
        }
    }

    fn post<B: Serialize>(operation: Operation, path: String, body: &B) -> Result<Self> {
        let body = serde_json::to_vec(body)
            .map_err(|e| RapidError::InvalidInput(format!("cannot encode {operation} request: {e}")))?;
        Ok(Self {
            operation,
            payment_method: None,
            http_method: HttpMethod::Post,
            path,
            body: Some(body),
            idempotency_key: None,
        })
    }

    fn with_method(mut self, method: PaymentMethod) -> Self {
        self.payment_method = Some(method);
        self
    }

    /// Attaches a non-blank key. Only money movements carry one.
    fn with_idempotency_key(mut self, key: Option<&str>) -> Self {
        let eligible = self.operation.is_money_movement();
        self.idempotency_key = key
            .filter(|_| eligible)
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_owned);
        self
    }
}

/// Returns whether `method` may be used with `operation`.
///
/// | Operation | Direct | ResponsiveShared | TransparentRedirect | Wallet | Authorisation |
/// |---|---|---|---|---|---|
/// | `CreateTransaction` | yes | yes | yes | yes | yes |
/// | `CreateCustomer` | yes | yes | yes | no | no |
/// | `UpdateCustomer` | yes | yes | yes | no | no |
///
/// Operations that take no payment method support none.
#[must_use]
pub const fn is_supported(method: PaymentMethod, operation: Operation) -> bool {
    match operation {
        Operation::CreateTransaction => true,
        Operation::CreateCustomer | Operation::UpdateCustomer => match method {
            PaymentMethod::Direct
            | PaymentMethod::ResponsiveShared
            | PaymentMethod::TransparentRedirect => true,
            PaymentMethod::Wallet | PaymentMethod::Authorisation => false,
        },
        Operation::QueryCustomer
        | Operation::QueryTransaction
        | Operation::Refund
        | Operation::CapturePayment
        | Operation::CancelAuthorisation
        | Operation::SearchSettlements => false,
    }
}

fn ensure_supported(method: PaymentMethod, operation: Operation) -> Result<()> {
    if is_supported(method, operation) {
        Ok(())
    } else {
        Err(RapidError::UnsupportedMethod { method, operation })
    }
}

/// Endpoint that receives create and update calls for `method`.
const fn create_endpoint(method: PaymentMethod) -> Endpoint {
    match method {
        PaymentMethod::Direct | PaymentMethod::Wallet | PaymentMethod::Authorisation => {
            Endpoint::Transaction
        }
        PaymentMethod::TransparentRedirect => Endpoint::AccessCodes,
        PaymentMethod::ResponsiveShared => Endpoint::AccessCodesShared,
    }
}

/// Gateway `Method` value for a transaction.
fn transaction_method(method: PaymentMethod, transaction: &Transaction) -> &'static str {
    if method == PaymentMethod::Authorisation || !transaction.capture {
        "Authorise"
    } else if transaction.customer.token_customer_id.is_some() || transaction.save_customer {
        "TokenPayment"
    } else {
        "ProcessPayment"
    }
}

fn missing(operation: Operation, field: &'static str) -> RapidError {
    RapidError::MissingField { operation, field }
}

fn require_text(operation: Operation, field: &'static str, value: Option<&str>) -> Result<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| missing(operation, field))
}

/// Decides whether the customer's card goes on the wire, enforcing the
/// method's card policy.
///
/// `card_optional` relaxes the inline-card requirement, for charges against an
/// existing token customer. Such a charge may carry a partial card, typically
/// just the CVN, and only the fields present are sent.
fn card_policy(
    operation: Operation,
    method: PaymentMethod,
    customer: &Customer,
    card_optional: bool,
) -> Result<bool> {
    if method.carries_card_details() {
        match &customer.card_details {
            Some(card) => match card.first_missing_field() {
                None => Ok(true),
                Some(_) if card_optional => Ok(!card.is_blank()),
                Some(field) => Err(missing(operation, field)),
            },
            None if card_optional => Ok(false),
            None => Err(missing(operation, "customer.card_details")),
        }
    } else {
        if customer.card_details.is_some() {
            warn!(
                %operation,
                payment_method = %method,
                "dropping inline card details: payment method does not send card data"
            );
        }
        Ok(false)
    }
}

/// Builds wire requests for every gateway operation.
#[derive(Debug, Clone, Default)]
pub struct RequestBuilder {
    endpoints: EndpointResolver,
}

impl RequestBuilder {
    /// Creates a builder resolving paths through `endpoints`.
    #[must_use]
    pub fn new(endpoints: EndpointResolver) -> Self {
        Self { endpoints }
    }

    /// Builds a payment.
    ///
    /// # Errors
    ///
    /// - [`RapidError::InvalidInput`] if the total amount is zero
    /// - [`RapidError::MissingField`] if the method's required fields are absent:
    ///   card details for `Direct`/`Authorisation` (unless a token customer is
    ///   charged), `redirect_url` for `ResponsiveShared`/`TransparentRedirect`,
    ///   `third_party_wallet_id` for `Wallet`
    pub fn create_transaction(
        &self,
        method: PaymentMethod,
        transaction: &Transaction,
    ) -> Result<WireRequest> {
        let operation = Operation::CreateTransaction;
        ensure_supported(method, operation)?;

        if transaction.payment.total_amount == 0 {
            return Err(RapidError::InvalidInput(
                "payment.total_amount must be positive".to_owned(),
            ));
        }

        let mut body = TransactionBody::from_transaction(transaction);
        body.method = transaction_method(method, transaction);

        let charges_token = transaction.customer.token_customer_id.is_some();
        let include_card = card_policy(operation, method, &transaction.customer, charges_token)?;
        body.customer = WireCustomer::from_customer(&transaction.customer, include_card);

        match method {
            PaymentMethod::Direct | PaymentMethod::Authorisation => {}
            PaymentMethod::ResponsiveShared => {
                body.redirect_url =
                    Some(require_text(operation, "redirect_url", transaction.redirect_url.as_deref())?);
                body.cancel_url.clone_from(&transaction.cancel_url);
            }
            PaymentMethod::TransparentRedirect => {
                body.redirect_url =
                    Some(require_text(operation, "redirect_url", transaction.redirect_url.as_deref())?);
            }
            PaymentMethod::Wallet => {
                body.third_party_wallet_id = Some(require_text(
                    operation,
                    "third_party_wallet_id",
                    transaction.third_party_wallet_id.as_deref(),
                )?);
            }
        }

        let path = self.endpoints.resolve(create_endpoint(method), None);
        Ok(WireRequest::post(operation, path, &body)?
            .with_method(method)
            .with_idempotency_key(transaction.idempotency_key.as_deref()))
    }

    /// Builds a token customer creation.
    ///
    /// # Errors
    ///
    /// - [`RapidError::UnsupportedMethod`] for `Wallet` and `Authorisation`
    /// - [`RapidError::MissingField`] for absent card details (`Direct`) or
    ///   `redirect_url` (`ResponsiveShared`/`TransparentRedirect`)
    pub fn create_customer(&self, method: PaymentMethod, customer: &Customer) -> Result<WireRequest> {
        self.customer_request(Operation::CreateCustomer, method, customer)
    }

    /// Builds a token customer update.
    ///
    /// # Errors
    ///
    /// As [`create_customer`](Self::create_customer), plus
    /// [`RapidError::MissingField`] when `token_customer_id` is absent.
    pub fn update_customer(&self, method: PaymentMethod, customer: &Customer) -> Result<WireRequest> {
        self.customer_request(Operation::UpdateCustomer, method, customer)
    }

    fn customer_request(
        &self,
        operation: Operation,
        method: PaymentMethod,
        customer: &Customer,
    ) -> Result<WireRequest> {
        ensure_supported(method, operation)?;

        if operation == Operation::UpdateCustomer && customer.token_customer_id.is_none() {
            return Err(missing(operation, "customer.token_customer_id"));
        }

        let include_card = card_policy(operation, method, customer, false)?;

        let mut body = TransactionBody {
            method: if operation == Operation::UpdateCustomer {
                "UpdateTokenCustomer"
            } else {
                "CreateTokenCustomer"
            },
            transaction_type: "Purchase",
            payment: WirePayment::default(),
            customer: WireCustomer::from_customer(customer, include_card),
            ..TransactionBody::default()
        };

        if method.is_hosted() {
            body.redirect_url =
                Some(require_text(operation, "customer.redirect_url", customer.redirect_url.as_deref())?);
            if method == PaymentMethod::ResponsiveShared {
                body.cancel_url.clone_from(&customer.cancel_url);
            }
        }

        let path = self.endpoints.resolve(create_endpoint(method), None);
        Ok(WireRequest::post(operation, path, &body)?.with_method(method))
    }

    /// Builds a token customer lookup.
    ///
    /// # Errors
    ///
    /// Returns [`RapidError::InvalidInput`] for a zero ID.
    pub fn query_customer(&self, token_customer_id: u64) -> Result<WireRequest> {
        if token_customer_id == 0 {
            return Err(RapidError::InvalidInput("token_customer_id must be positive".to_owned()));
        }
        let id = token_customer_id.to_string();
        let path = self.endpoints.resolve(Endpoint::QueryCustomer, Some(&id));
        Ok(WireRequest::get(Operation::QueryCustomer, path))
    }

    /// Builds a transaction lookup from a canonical filter.
    #[must_use]
    pub fn query_transaction(&self, filter: &TransactionFilter) -> WireRequest {
        let path = match filter {
            TransactionFilter::TransactionId(id) => {
                self.endpoints.resolve(Endpoint::QueryTransaction, Some(&id.to_string()))
            }
            TransactionFilter::AccessCode(code) => {
                self.endpoints.resolve(Endpoint::QueryTransaction, Some(code))
            }
            TransactionFilter::InvoiceNumber(number) => {
                self.endpoints.resolve(Endpoint::QueryInvoiceNumber, Some(number))
            }
            TransactionFilter::InvoiceReference(reference) => {
                self.endpoints.resolve(Endpoint::QueryInvoiceRef, Some(reference))
            }
        };
        WireRequest::get(Operation::QueryTransaction, path)
    }

    /// Builds a refund.
    ///
    /// # Errors
    ///
    /// Returns [`RapidError::MissingField`] without a transaction ID and
    /// [`RapidError::InvalidInput`] for a zero amount.
    pub fn refund(&self, refund: &Refund) -> Result<WireRequest> {
        let operation = Operation::Refund;
        if refund.transaction_id == 0 {
            return Err(missing(operation, "transaction_id"));
        }
        if refund.refund.total_amount == 0 {
            return Err(RapidError::InvalidInput("refund.total_amount must be positive".to_owned()));
        }
        let id = refund.transaction_id.to_string();
        let path = self.endpoints.resolve(Endpoint::Refund, Some(&id));
        Ok(WireRequest::post(operation, path, &RefundBody::from(refund))?
            .with_idempotency_key(refund.idempotency_key.as_deref()))
    }

    /// Builds a capture of an authorisation.
    ///
    /// # Errors
    ///
    /// Returns [`RapidError::MissingField`] without a transaction ID and
    /// [`RapidError::InvalidInput`] for a zero amount.
    pub fn capture_payment(&self, request: &CapturePaymentRequest) -> Result<WireRequest> {
        let operation = Operation::CapturePayment;
        if request.transaction_id == 0 {
            return Err(missing(operation, "transaction_id"));
        }
        if request.payment.total_amount == 0 {
            return Err(RapidError::InvalidInput("payment.total_amount must be positive".to_owned()));
        }
        let body = CapturePaymentBody {
            payment: WirePayment::from(&request.payment),
            transaction_id: request.transaction_id,
        };
        let path = self.endpoints.resolve(Endpoint::CapturePayment, None);
        Ok(WireRequest::post(operation, path, &body)?
            .with_idempotency_key(request.idempotency_key.as_deref()))
    }

    /// Builds a cancellation of an authorisation.
    ///
    /// # Errors
    ///
    /// Returns [`RapidError::MissingField`] without a transaction ID.
    pub fn cancel_authorisation(&self, request: &CancelAuthorisationRequest) -> Result<WireRequest> {
        let operation = Operation::CancelAuthorisation;
        if request.transaction_id == 0 {
            return Err(missing(operation, "transaction_id"));
        }
        let body = CancelAuthorisationBody { transaction_id: request.transaction_id };
        let path = self.endpoints.resolve(Endpoint::CancelAuthorisation, None);
        Ok(WireRequest::post(operation, path, &body)?
            .with_idempotency_key(request.idempotency_key.as_deref()))
    }

    /// Builds a settlement search.
    ///
    /// # Errors
    ///
    /// - [`RapidError::MissingField`] when neither a settlement date nor a
    ///   complete range is given
    /// - [`RapidError::InvalidInput`] when a date and a range are both given,
    ///   the range starts after it ends, or the page size is zero
    pub fn search_settlements(&self, request: &SettlementSearchRequest) -> Result<WireRequest> {
        let operation = Operation::SearchSettlements;

        match (request.settlement_date, request.start_date, request.end_date) {
            (Some(_), None, None) => {}
            (Some(_), _, _) => {
                return Err(RapidError::InvalidInput(
                    "give either settlement_date or start_date/end_date, not both".to_owned(),
                ));
            }
            (None, Some(start), Some(end)) if start > end => {
                return Err(RapidError::InvalidInput(format!(
                    "start_date {start} is after end_date {end}"
                )));
            }
            (None, Some(_), Some(_)) => {}
            (None, Some(_), None) => return Err(missing(operation, "end_date")),
            (None, None, Some(_)) => return Err(missing(operation, "start_date")),
            (None, None, None) => return Err(missing(operation, "settlement_date")),
        }

        if request.page_size == Some(0) {
            return Err(RapidError::InvalidInput("page_size must be positive".to_owned()));
        }

        let mut query = form_urlencoded::Serializer::new(String::new());
        query.append_pair("ReportMode", request.report_mode.as_str());
        if let Some(date) = request.settlement_date {
            query.append_pair("SettlementDate", &date.format("%Y-%m-%d").to_string());
        }
        if let Some(start) = request.start_date {
            query.append_pair("StartDate", &start.format("%Y-%m-%d").to_string());
        }
        if let Some(end) = request.end_date {
            query.append_pair("EndDate", &end.format("%Y-%m-%d").to_string());
        }
        if let Some(card_type) = request.card_type.as_deref() {
            query.append_pair("CardType", card_type);
        }
        if let Some(currency) = request.currency.as_deref() {
            query.append_pair("Currency", currency);
        }
        if let Some(page) = request.page {
            query.append_pair("Page", &page.to_string());
        }
        if let Some(page_size) = request.page_size {
            query.append_pair("PageSize", &page_size.to_string());
        }

        let path = format!(
            "{}?{}",
            self.endpoints.resolve(Endpoint::SettlementSearch, None),
            query.finish()
        );
        Ok(WireRequest::get(operation, path))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::Value;

    use super::*;
    use crate::model::{CardDetails, Payment};

    fn builder() -> RequestBuilder {
        RequestBuilder::default()
    }

    fn card() -> CardDetails {
        CardDetails::new("John Smith", "4444333322221111", "12", "29").with_cvn("123")
    }

    fn card_transaction() -> Transaction {
        Transaction {
            payment: Payment::new(1000).currency("AUD"),
            customer: Customer { card_details: Some(card()), ..Customer::default() },
            redirect_url: Some("https://shop.example.com/return".to_owned()),
            third_party_wallet_id: Some("wallet-token".to_owned()),
            ..Transaction::default()
        }
    }

    fn body(request: &WireRequest) -> Value {
        serde_json::from_slice(request.body.as_deref().unwrap()).unwrap()
    }

    #[test]
    fn test_validity_table_is_exhaustive() {
        let expected = [
            (Operation::CreateTransaction, [true, true, true, true, true]),
            (Operation::CreateCustomer, [true, true, true, false, false]),
            (Operation::UpdateCustomer, [true, true, true, false, false]),
        ];
        for (operation, row) in expected {
            for (method, allowed) in PaymentMethod::ALL.into_iter().zip(row) {
                assert_eq!(is_supported(method, operation), allowed, "{method} / {operation}");
            }
        }
        for operation in Operation::ALL.into_iter().filter(|op| !op.takes_payment_method()) {
            for method in PaymentMethod::ALL {
                assert!(!is_supported(method, operation));
            }
        }
    }

    #[test]
    fn test_direct_payment_shape() {
        let request = builder().create_transaction(PaymentMethod::Direct, &card_transaction()).unwrap();
        assert_eq!(request.path, "/Transaction");
        assert_eq!(request.http_method, HttpMethod::Post);
        assert_eq!(request.payment_method, Some(PaymentMethod::Direct));

        let json = body(&request);
        assert_eq!(json["Method"], "ProcessPayment");
        assert_eq!(json["TransactionType"], "Purchase");
        assert_eq!(json["Payment"]["TotalAmount"], 1000);
        assert_eq!(json["Customer"]["CardDetails"]["Number"], "4444333322221111");
        assert!(json.get("RedirectUrl").is_none());
        assert!(json.get("ThirdPartyWalletID").is_none());
    }

    #[test]
    fn test_direct_requires_complete_card() {
        let mut transaction = card_transaction();
        transaction.customer.card_details = None;
        let err = builder().create_transaction(PaymentMethod::Direct, &transaction).unwrap_err();
        assert!(matches!(err, RapidError::MissingField { field: "customer.card_details", .. }));

        transaction.customer.card_details = Some(CardDetails::new("John Smith", "", "12", "29"));
        let err = builder().create_transaction(PaymentMethod::Direct, &transaction).unwrap_err();
        assert!(matches!(err, RapidError::MissingField { field: "card_details.number", .. }));
    }

    #[test]
    fn test_direct_token_payment_without_card() {
        let transaction = Transaction {
            payment: Payment::new(500),
            customer: Customer::with_token(917_758_625_852),
            ..Transaction::default()
        };
        let request = builder().create_transaction(PaymentMethod::Direct, &transaction).unwrap();
        let json = body(&request);
        assert_eq!(json["Method"], "TokenPayment");
        assert_eq!(json["Customer"]["TokenCustomerID"], 917_758_625_852_u64);
        assert!(json["Customer"].get("CardDetails").is_none());
    }

    #[test]
    fn test_token_payment_forwards_partial_card() {
        let mut transaction = Transaction {
            payment: Payment::new(500),
            customer: Customer::with_token(917_758_625_852),
            ..Transaction::default()
        };
        transaction.customer.card_details = Some(CardDetails::default().with_cvn("123"));

        let request = builder().create_transaction(PaymentMethod::Direct, &transaction).unwrap();
        let json = body(&request);
        assert_eq!(json["Method"], "TokenPayment");
        assert_eq!(json["Customer"]["CardDetails"], serde_json::json!({ "CVN": "123" }));

        transaction.customer.card_details = Some(CardDetails::new(" ", "", "", ""));
        let request = builder().create_transaction(PaymentMethod::Direct, &transaction).unwrap();
        assert!(body(&request)["Customer"].get("CardDetails").is_none());
    }

    #[test]
    fn test_authorisation_uses_authorise() {
        let request =
            builder().create_transaction(PaymentMethod::Authorisation, &card_transaction()).unwrap();
        assert_eq!(request.path, "/Transaction");
        assert_eq!(body(&request)["Method"], "Authorise");

        let mut transaction = card_transaction();
        transaction.capture = false;
        let request = builder().create_transaction(PaymentMethod::Direct, &transaction).unwrap();
        assert_eq!(body(&request)["Method"], "Authorise");
    }

    #[test]
    fn test_hosted_methods_drop_card_and_need_redirect() {
        for (method, path) in [
            (PaymentMethod::ResponsiveShared, "/AccessCodesShared"),
            (PaymentMethod::TransparentRedirect, "/AccessCodes"),
        ] {
            let request = builder().create_transaction(method, &card_transaction()).unwrap();
            assert_eq!(request.path, path);
            let json = body(&request);
            assert!(json["Customer"].get("CardDetails").is_none(), "{method} leaked card data");
            assert_eq!(json["RedirectUrl"], "https://shop.example.com/return");

            let mut transaction = card_transaction();
            transaction.redirect_url = None;
            let err = builder().create_transaction(method, &transaction).unwrap_err();
            assert!(matches!(err, RapidError::MissingField { field: "redirect_url", .. }));
        }
    }

    #[test]
    fn test_wallet_sends_token_only() {
        let request = builder().create_transaction(PaymentMethod::Wallet, &card_transaction()).unwrap();
        let json = body(&request);
        assert_eq!(json["ThirdPartyWalletID"], "wallet-token");
        assert!(json["Customer"].get("CardDetails").is_none());

        let mut transaction = card_transaction();
        transaction.third_party_wallet_id = Some("  ".to_owned());
        let err = builder().create_transaction(PaymentMethod::Wallet, &transaction).unwrap_err();
        assert!(matches!(err, RapidError::MissingField { field: "third_party_wallet_id", .. }));
    }

    #[test]
    fn test_zero_amount_rejected() {
        let mut transaction = card_transaction();
        transaction.payment.total_amount = 0;
        let err = builder().create_transaction(PaymentMethod::Direct, &transaction).unwrap_err();
        assert!(matches!(err, RapidError::InvalidInput(_)));
    }

    #[test]
    fn test_idempotency_key_forwarded() {
        let mut transaction = card_transaction();
        transaction.idempotency_key = Some("order-1001".to_owned());
        let request = builder().create_transaction(PaymentMethod::Direct, &transaction).unwrap();
        assert_eq!(request.idempotency_key.as_deref(), Some("order-1001"));

        transaction.idempotency_key = Some(String::new());
        let request = builder().create_transaction(PaymentMethod::Direct, &transaction).unwrap();
        assert!(request.idempotency_key.is_none());
    }

    #[test]
    fn test_idempotency_key_only_on_money_movements() {
        let lookup = WireRequest::get(Operation::QueryTransaction, "/Transaction/1".to_owned())
            .with_idempotency_key(Some("order-1001"));
        assert!(lookup.idempotency_key.is_none());

        let refund = WireRequest::get(Operation::Refund, "/Transaction/1/Refund".to_owned())
            .with_idempotency_key(Some(" order-1001 "));
        assert_eq!(refund.idempotency_key.as_deref(), Some("order-1001"));
    }

    #[test]
    fn test_create_customer_methods() {
        let customer = Customer {
            first_name: Some("John".to_owned()),
            card_details: Some(card()),
            redirect_url: Some("https://shop.example.com/customer".to_owned()),
            ..Customer::default()
        };

        let request = builder().create_customer(PaymentMethod::Direct, &customer).unwrap();
        assert_eq!(request.path, "/Transaction");
        let json = body(&request);
        assert_eq!(json["Method"], "CreateTokenCustomer");
        assert_eq!(json["Payment"]["TotalAmount"], 0);
        assert!(json["Customer"].get("CardDetails").is_some());

        let request = builder().create_customer(PaymentMethod::ResponsiveShared, &customer).unwrap();
        assert_eq!(request.path, "/AccessCodesShared");
        assert!(body(&request)["Customer"].get("CardDetails").is_none());

        for method in [PaymentMethod::Wallet, PaymentMethod::Authorisation] {
            let err = builder().create_customer(method, &customer).unwrap_err();
            assert!(matches!(err, RapidError::UnsupportedMethod { .. }));
        }
    }

    #[test]
    fn test_update_customer_requires_token() {
        let customer = Customer { card_details: Some(card()), ..Customer::default() };
        let err = builder().update_customer(PaymentMethod::Direct, &customer).unwrap_err();
        assert!(matches!(err, RapidError::MissingField { field: "customer.token_customer_id", .. }));

        let customer = Customer { token_customer_id: Some(9), ..customer };
        let request = builder().update_customer(PaymentMethod::Direct, &customer).unwrap();
        assert_eq!(body(&request)["Method"], "UpdateTokenCustomer");
    }

    #[test]
    fn test_query_paths() {
        let b = builder();
        assert_eq!(b.query_transaction(&TransactionFilter::by_id(42)).path, "/Transaction/42");
        assert_eq!(b.query_transaction(&TransactionFilter::by_access_code("AC1")).path, "/Transaction/AC1");
        assert_eq!(
            b.query_transaction(&TransactionFilter::by_invoice_number("INV 1")).path,
            "/Transaction/InvoiceNumber/INV%201"
        );
        assert_eq!(
            b.query_transaction(&TransactionFilter::by_invoice_reference("R/1")).path,
            "/Transaction/InvoiceRef/R%2F1"
        );
        assert_eq!(b.query_customer(917).unwrap().path, "/Customer/917");
        assert!(b.query_customer(0).is_err());
    }

    #[test]
    fn test_follow_up_actions() {
        let b = builder();
        let request = b.refund(&Refund::new(11, 500)).unwrap();
        assert_eq!(request.path, "/Transaction/11/Refund");
        assert_eq!(body(&request)["Refund"]["TotalAmount"], 500);

        assert!(matches!(b.refund(&Refund::new(0, 500)), Err(RapidError::MissingField { .. })));
        assert!(matches!(b.refund(&Refund::new(11, 0)), Err(RapidError::InvalidInput(_))));

        let request = b.capture_payment(&CapturePaymentRequest::new(12, 700)).unwrap();
        assert_eq!(request.path, "/CapturePayment");
        assert_eq!(body(&request)["TransactionId"], 12);

        let mut cancel = CancelAuthorisationRequest::new(13);
        cancel.reason = Some("customer changed mind".to_owned());
        let request = b.cancel_authorisation(&cancel).unwrap();
        assert_eq!(request.path, "/CancelAuthorisation");
        assert_eq!(body(&request), serde_json::json!({ "TransactionId": 13 }));
    }

    #[test]
    fn test_settlement_search_query() {
        let start = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 3, 31).unwrap();
        let mut search = SettlementSearchRequest::between(start, end);
        search.currency = Some("AUD".to_owned());
        search.page = Some(2);

        let request = builder().search_settlements(&search).unwrap();
        assert_eq!(request.http_method, HttpMethod::Get);
        assert_eq!(
            request.path,
            "/Search/Settlement?ReportMode=Both&StartDate=2026-03-01&EndDate=2026-03-31&Currency=AUD&Page=2"
        );
    }

    #[test]
    fn test_settlement_search_validation() {
        let start = NaiveDate::from_ymd_opt(2026, 3, 31).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let b = builder();

        assert!(matches!(
            b.search_settlements(&SettlementSearchRequest::between(start, end)),
            Err(RapidError::InvalidInput(_))
        ));
        assert!(matches!(
            b.search_settlements(&SettlementSearchRequest::default()),
            Err(RapidError::MissingField { field: "settlement_date", .. })
        ));

        let mut both = SettlementSearchRequest::on(start);
        both.end_date = Some(end);
        assert!(matches!(b.search_settlements(&both), Err(RapidError::InvalidInput(_))));

        let open_range = SettlementSearchRequest { start_date: Some(end), ..Default::default() };
        assert!(matches!(
            b.search_settlements(&open_range),
            Err(RapidError::MissingField { field: "end_date", .. })
        ));
    }
}

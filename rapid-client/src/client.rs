//! Gateway Client façade.
//!
//! [`RapidClient`] is the single entry point for callers. Each operation
//! validates and shapes the request locally, performs exactly one transport
//! call, and maps the 2xx body into a domain response. The client holds only
//! fixed configuration, so one instance can serve any number of concurrent
//! calls.

use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::{
    config::{ClientConfig, Credentials},
    error::{RapidError, Result},
    gateway::{
        EndpointResolver, HttpMethod, Operation, QueryResolver, RequestBuilder, ResponseMapper,
        WireRequest,
    },
    model::{
        CancelAuthorisationRequest, CancelAuthorisationResponse, CapturePaymentRequest,
        CapturePaymentResponse, CreateCustomerResponse, CreateTransactionResponse, Customer,
        ErrorCode, FilterParams, GatewayResponse, Outcome, PaymentMethod, QueryCustomerResponse,
        QueryTransactionResponse, Refund, RefundResponse, SettlementSearchRequest,
        SettlementSearchResponse, Transaction,
    },
    transport::{HttpTransport, RequestContext, Transport},
};

const API_VERSION_HEADER: &str = "X-EWAY-APIVERSION";
const IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";
const JSON: &str = "application/json";

/// Client for the Rapid payment gateway.
///
/// Generic over the [`Transport`] so tests and alternative stacks can supply
/// their own; [`RapidClient::new`] uses the reqwest-backed [`HttpTransport`].
///
/// # Examples
///
/// ```rust,no_run
/// use rapid_client::{
///     RapidClient,
///     config::{ClientConfig, Environment},
///     model::{CardDetails, Customer, GatewayResponse, Payment, PaymentMethod, Transaction},
/// };
///
/// # async fn example() -> rapid_client::error::Result<()> {
/// let config = ClientConfig::new(Environment::Sandbox, "api-key", "password");
/// let client = RapidClient::new(&config)?;
///
/// let transaction = Transaction {
///     payment: Payment::new(1000).currency("AUD"),
///     customer: Customer {
///         card_details: Some(CardDetails::new("John Smith", "4444333322221111", "12", "29")),
///         ..Customer::default()
///     },
///     ..Transaction::default()
/// };
///
/// let response = client.create_transaction(PaymentMethod::Direct, &transaction).await?;
/// if response.is_success() {
///     println!("approved: {:?}", response.transaction_id);
/// } else {
///     println!("declined: {:?}", response.errors());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct RapidClient<T: Transport = HttpTransport> {
    transport: T,
    credentials: Credentials,
    base_url: String,
    api_version: String,
    builder: RequestBuilder,
}

impl RapidClient<HttpTransport> {
    /// Creates a client over an [`HttpTransport`] tuned by `config.http`.
    ///
    /// # Errors
    ///
    /// Returns [`RapidError::ConfigError`] for an invalid configuration or
    /// unresolvable credentials, and [`RapidError::HttpError`] if the HTTP
    /// client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let transport = HttpTransport::with_config(&config.http)?;
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> RapidClient<T> {
    /// Creates a client over a caller-supplied transport.
    ///
    /// # Errors
    ///
    /// Returns [`RapidError::ConfigError`] for an invalid configuration or
    /// unresolvable credentials.
    pub fn with_transport(config: &ClientConfig, transport: T) -> Result<Self> {
        config.validate()?;
        let credentials = config.credentials.resolve()?;
        Ok(Self {
            transport,
            credentials,
            base_url: config.base_url().to_owned(),
            api_version: config.api_version.to_string(),
            builder: RequestBuilder::new(EndpointResolver::new(&config.endpoints)),
        })
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Creates a payment using `method`.
    ///
    /// Hosted flows return [`Outcome::Pending`] with the access code and URL
    /// the buyer must be sent to.
    ///
    /// # Errors
    ///
    /// Validation errors when the transaction lacks what `method` requires;
    /// transport errors when no gateway response was obtained.
    #[instrument(
        skip(self, transaction),
        fields(
            operation = %Operation::CreateTransaction,
            payment_method = %method,
            correlation_id = %Uuid::new_v4(),
        )
    )]
    pub async fn create_transaction(
        &self,
        method: PaymentMethod,
        transaction: &Transaction,
    ) -> Result<CreateTransactionResponse> {
        let request = self.builder.create_transaction(method, transaction)?;
        let body = self.dispatch(&request).await?;
        let response = ResponseMapper::create_transaction(method, &body)?;
        log_outcome(&response);
        Ok(response)
    }

    /// Creates a token customer using `method`.
    ///
    /// # Errors
    ///
    /// [`RapidError::UnsupportedMethod`] for `Wallet` and `Authorisation`,
    /// other validation errors for missing fields, and transport errors.
    #[instrument(
        skip(self, customer),
        fields(
            operation = %Operation::CreateCustomer,
            payment_method = %method,
            correlation_id = %Uuid::new_v4(),
        )
    )]
    pub async fn create_customer(
        &self,
        method: PaymentMethod,
        customer: &Customer,
    ) -> Result<CreateCustomerResponse> {
        let request = self.builder.create_customer(method, customer)?;
        let body = self.dispatch(&request).await?;
        let response = ResponseMapper::create_customer(Operation::CreateCustomer, method, &body)?;
        log_outcome(&response);
        Ok(response)
    }

    /// Updates a token customer using `method`.
    ///
    /// # Errors
    ///
    /// As [`create_customer`](Self::create_customer), plus a missing
    /// `token_customer_id`.
    #[instrument(
        skip(self, customer),
        fields(
            operation = %Operation::UpdateCustomer,
            payment_method = %method,
            token_customer_id = customer.token_customer_id,
            correlation_id = %Uuid::new_v4(),
        )
    )]
    pub async fn update_customer(
        &self,
        method: PaymentMethod,
        customer: &Customer,
    ) -> Result<CreateCustomerResponse> {
        let request = self.builder.update_customer(method, customer)?;
        let body = self.dispatch(&request).await?;
        let response = ResponseMapper::create_customer(Operation::UpdateCustomer, method, &body)?;
        log_outcome(&response);
        Ok(response)
    }

    /// Looks up a token customer.
    ///
    /// # Errors
    ///
    /// [`RapidError::InvalidInput`] for a zero ID, and transport errors.
    #[instrument(
        skip(self),
        fields(operation = %Operation::QueryCustomer, correlation_id = %Uuid::new_v4())
    )]
    pub async fn query_customer(&self, token_customer_id: u64) -> Result<QueryCustomerResponse> {
        let request = self.builder.query_customer(token_customer_id)?;
        let body = self.dispatch(&request).await?;
        let response = ResponseMapper::query_customer(&body)?;
        log_outcome(&response);
        Ok(response)
    }

    /// Looks up a transaction by exactly one discriminant.
    ///
    /// Accepts a [`TransactionFilter`](crate::model::TransactionFilter) or
    /// loose [`FilterParams`]. Every lookup entry point ends here, so the same
    /// logical query always produces the same wire request.
    ///
    /// # Errors
    ///
    /// [`RapidError::AmbiguousFilter`] or [`RapidError::EmptyFilter`] before
    /// any network call, and transport errors.
    #[instrument(
        skip(self, filter),
        fields(
            operation = %Operation::QueryTransaction,
            discriminant = tracing::field::Empty,
            correlation_id = %Uuid::new_v4(),
        )
    )]
    pub async fn query_transaction(
        &self,
        filter: impl Into<FilterParams>,
    ) -> Result<QueryTransactionResponse> {
        let filter = QueryResolver::resolve(&filter.into())?;
        tracing::Span::current().record("discriminant", filter.field_name());

        let request = self.builder.query_transaction(&filter);
        let body = self.dispatch(&request).await?;
        let response = ResponseMapper::query_transaction(&body)?;
        log_outcome(&response);
        Ok(response)
    }

    /// Looks up a transaction by gateway ID. Accepts `i32`, `u32`, `i64` or
    /// `u64`.
    ///
    /// # Errors
    ///
    /// As [`query_transaction`](Self::query_transaction); a zero ID is an
    /// empty filter and a negative one is invalid.
    pub async fn query_transaction_by_id(
        &self,
        transaction_id: impl Into<i128>,
    ) -> Result<QueryTransactionResponse> {
        self.query_transaction(FilterParams::transaction_id(transaction_id)).await
    }

    /// Looks up the transaction completed under a hosted-flow access code.
    ///
    /// # Errors
    ///
    /// As [`query_transaction`](Self::query_transaction).
    pub async fn query_transaction_by_access_code(
        &self,
        access_code: &str,
    ) -> Result<QueryTransactionResponse> {
        self.query_transaction(FilterParams::access_code(access_code)).await
    }

    /// Looks up a transaction by merchant invoice number.
    ///
    /// # Errors
    ///
    /// As [`query_transaction`](Self::query_transaction).
    pub async fn query_invoice_number(
        &self,
        invoice_number: &str,
    ) -> Result<QueryTransactionResponse> {
        self.query_transaction(FilterParams::invoice_number(invoice_number)).await
    }

    /// Looks up a transaction by merchant invoice reference.
    ///
    /// # Errors
    ///
    /// As [`query_transaction`](Self::query_transaction).
    pub async fn query_invoice_ref(
        &self,
        invoice_reference: &str,
    ) -> Result<QueryTransactionResponse> {
        self.query_transaction(FilterParams::invoice_reference(invoice_reference)).await
    }

    /// Refunds all or part of a prior transaction.
    ///
    /// # Errors
    ///
    /// Validation errors for a missing transaction ID or zero amount, and
    /// transport errors.
    #[instrument(
        skip(self, refund),
        fields(
            operation = %Operation::Refund,
            transaction_id = refund.transaction_id,
            correlation_id = %Uuid::new_v4(),
        )
    )]
    pub async fn refund(&self, refund: &Refund) -> Result<RefundResponse> {
        let request = self.builder.refund(refund)?;
        let body = self.dispatch(&request).await?;
        let response = ResponseMapper::refund(&body)?;
        log_outcome(&response);
        Ok(response)
    }

    /// Captures a prior authorisation.
    ///
    /// # Errors
    ///
    /// Validation errors for a missing transaction ID or zero amount, and
    /// transport errors.
    #[instrument(
        skip(self, request),
        fields(
            operation = %Operation::CapturePayment,
            transaction_id = request.transaction_id,
            correlation_id = %Uuid::new_v4(),
        )
    )]
    pub async fn capture_payment(
        &self,
        request: &CapturePaymentRequest,
    ) -> Result<CapturePaymentResponse> {
        let wire = self.builder.capture_payment(request)?;
        let body = self.dispatch(&wire).await?;
        let response = ResponseMapper::capture_payment(&body)?;
        log_outcome(&response);
        Ok(response)
    }

    /// Voids a prior authorisation.
    ///
    /// The cancellation reason is recorded on the request span only.
    ///
    /// # Errors
    ///
    /// Validation errors for a missing transaction ID, and transport errors.
    #[instrument(
        skip(self, request),
        fields(
            operation = %Operation::CancelAuthorisation,
            transaction_id = request.transaction_id,
            reason = request.reason.as_deref(),
            correlation_id = %Uuid::new_v4(),
        )
    )]
    pub async fn cancel_authorisation(
        &self,
        request: &CancelAuthorisationRequest,
    ) -> Result<CancelAuthorisationResponse> {
        let wire = self.builder.cancel_authorisation(request)?;
        let body = self.dispatch(&wire).await?;
        let response = ResponseMapper::cancel_authorisation(&body)?;
        log_outcome(&response);
        Ok(response)
    }

    /// Searches settlements.
    ///
    /// # Errors
    ///
    /// Validation errors for an incomplete or inverted date range, and
    /// transport errors.
    #[instrument(
        skip(self, request),
        fields(operation = %Operation::SearchSettlements, correlation_id = %Uuid::new_v4())
    )]
    pub async fn search_settlements(
        &self,
        request: &SettlementSearchRequest,
    ) -> Result<SettlementSearchResponse> {
        let wire = self.builder.search_settlements(request)?;
        let body = self.dispatch(&wire).await?;
        let response = ResponseMapper::search_settlements(&body)?;
        log_outcome(&response);
        Ok(response)
    }

    /// Sends a built request and returns the body of a 2xx response.
    ///
    /// Non-2xx statuses become transport errors; the body is never mapped.
    async fn dispatch(&self, request: &WireRequest) -> Result<Vec<u8>> {
        let mut headers = vec![(API_VERSION_HEADER, self.api_version.as_str())];
        if let Some(key) = request.idempotency_key.as_deref() {
            headers.push((IDEMPOTENCY_KEY_HEADER, key));
        }

        let ctx = RequestContext {
            base_url: &self.base_url,
            path: &request.path,
            headers,
            content_type: (request.http_method == HttpMethod::Post).then_some(JSON),
            operation: request.operation,
        };

        debug!(
            http_method = ?request.http_method,
            path = %request.path,
            protocol = self.transport.protocol_name(),
            "dispatching gateway request"
        );

        let response = match request.http_method {
            HttpMethod::Get => self.transport.get(&self.credentials, ctx).await?,
            HttpMethod::Post => {
                let body = request.body.as_deref().unwrap_or_default();
                self.transport.post(&self.credentials, ctx, body).await?
            }
        };

        match response.status {
            _ if response.is_success() => Ok(response.body),
            401 | 403 => Err(RapidError::Authentication { status: response.status }),
            status => Err(RapidError::UnexpectedStatus { status }),
        }
    }
}

fn log_outcome<R: GatewayResponse>(response: &R) {
    match response.outcome() {
        Outcome::Success => info!(status = ?response.status(), "gateway call succeeded"),
        Outcome::Pending(continuation) => info!(
            status = ?response.status(),
            access_code = %continuation.access_code,
            "gateway call pending buyer action"
        ),
        Outcome::Failed(failure) => {
            let codes: Vec<&str> = failure.errors().iter().map(ErrorCode::as_str).collect();
            info!(
                status = ?response.status(),
                errors = %codes.join(","),
                summary = failure.summary(),
                "gateway call failed"
            );
        }
    }
}

//! Caller-facing domain model.
//!
//! These types describe requests and responses in the merchant's terms.
//! Their gateway wire representation lives in [`crate::wire`].

mod actions;
mod customer;
mod error_code;
mod filter;
mod payment_method;
mod response;
mod transaction;

pub use actions::{
    CancelAuthorisationRequest, CapturePaymentRequest, Refund, ReportMode, SettlementSearchRequest,
};
pub use customer::{Address, CardDetails, Customer, CustomerState};
pub use error_code::{ErrorCategory, ErrorCode, UNKNOWN_GATEWAY_ERROR};
pub use filter::{FilterParams, TransactionFilter};
pub use payment_method::PaymentMethod;
pub use response::{
    CancelAuthorisationResponse, CapturePaymentResponse, Continuation, CreateCustomerResponse,
    CreateTransactionResponse, Failure, GatewayResponse, Outcome, QueryCustomerResponse,
    QueryTransactionResponse, RefundResponse, ResponseStatus, SettlementSearchResponse,
    SettlementSummary, SettlementTransaction, TransactionRecord,
};
pub use transaction::{LineItem, Payment, ShippingAddress, Transaction, TransactionType};

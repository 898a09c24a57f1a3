//! Transaction request data.

use serde::{Deserialize, Serialize};

use crate::model::{Address, Customer};

/// Amount and invoice details of a payment, refund or capture.
///
/// Amounts are in the currency's minor unit (cents for AUD).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// Total amount in minor units.
    pub total_amount: u64,
    /// ISO 4217 currency code; the account default applies when absent.
    pub currency_code: Option<String>,
    /// Merchant invoice number.
    pub invoice_number: Option<String>,
    /// Merchant invoice description.
    pub invoice_description: Option<String>,
    /// Merchant invoice reference.
    pub invoice_reference: Option<String>,
}

impl Payment {
    /// Creates a payment for `total_amount` minor units.
    #[must_use]
    pub fn new(total_amount: u64) -> Self {
        Self { total_amount, ..Self::default() }
    }

    /// Sets the currency code.
    #[must_use]
    pub fn currency(mut self, code: impl Into<String>) -> Self {
        self.currency_code = Some(code.into());
        self
    }

    /// Sets the invoice number.
    #[must_use]
    pub fn invoice_number(mut self, number: impl Into<String>) -> Self {
        self.invoice_number = Some(number.into());
        self
    }

    /// Sets the invoice reference.
    #[must_use]
    pub fn invoice_reference(mut self, reference: impl Into<String>) -> Self {
        self.invoice_reference = Some(reference.into());
        self
    }
}

/// One line of an order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Stock keeping unit.
    pub sku: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Quantity.
    pub quantity: u32,
    /// Unit cost in minor units.
    pub unit_cost: u64,
    /// Tax in minor units.
    pub tax: u64,
    /// Line total in minor units.
    pub total: u64,
}

/// Delivery details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    /// Shipping method (e.g. "NextDay").
    pub shipping_method: Option<String>,
    /// Recipient first name.
    pub first_name: Option<String>,
    /// Recipient last name.
    pub last_name: Option<String>,
    /// Email.
    pub email: Option<String>,
    /// Phone.
    pub phone: Option<String>,
    /// Fax.
    pub fax: Option<String>,
    /// Postal address.
    #[serde(default)]
    pub address: Address,
}

/// How the transaction was initiated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionType {
    /// Customer-present e-commerce purchase.
    #[default]
    Purchase,
    /// Merchant-initiated recurring charge.
    Recurring,
    /// Mail or telephone order.
    #[serde(rename = "MOTO")]
    Moto,
}

impl TransactionType {
    /// Wire name of the transaction type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Purchase => "Purchase",
            Self::Recurring => "Recurring",
            Self::Moto => "MOTO",
        }
    }
}

/// A payment to create.
///
/// What must be populated depends on the [`PaymentMethod`](crate::model::PaymentMethod)
/// the transaction is sent with:
///
/// | Method | Required |
/// |---|---|
/// | `Direct`, `Authorisation` | `customer.card_details`, or `customer.token_customer_id` |
/// | `ResponsiveShared`, `TransparentRedirect` | `redirect_url` |
/// | `Wallet` | `third_party_wallet_id` |
///
/// # Examples
///
/// ```
/// use rapid_client::model::{CardDetails, Customer, Payment, Transaction};
///
/// let transaction = Transaction {
///     payment: Payment::new(1000).currency("AUD").invoice_reference("INV-1001"),
///     customer: Customer {
///         card_details: Some(CardDetails::new("John Smith", "4444333322221111", "12", "29")),
///         ..Customer::default()
///     },
///     ..Transaction::default()
/// };
/// assert!(transaction.capture);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transaction {
    /// Amount and invoice details.
    pub payment: Payment,
    /// Paying customer, including card details or token ID.
    pub customer: Customer,
    /// Delivery details.
    pub shipping_address: Option<ShippingAddress>,
    /// Order lines.
    pub line_items: Vec<LineItem>,
    /// Free-form metadata echoed back by the gateway.
    pub metadata: Vec<String>,
    /// How the transaction was initiated.
    pub transaction_type: TransactionType,
    /// Capture funds immediately; `false` only authorises them.
    pub capture: bool,
    /// Store the card against a new token customer while paying.
    pub save_customer: bool,
    /// Return URL for hosted and redirect flows.
    pub redirect_url: Option<String>,
    /// Cancel URL for the responsive shared page.
    pub cancel_url: Option<String>,
    /// Wallet token for [`PaymentMethod::Wallet`](crate::model::PaymentMethod::Wallet).
    pub third_party_wallet_id: Option<String>,
    /// Buyer's IP address, used by fraud checks.
    pub customer_ip: Option<String>,
    /// Identifier of the integrating device or application.
    pub device_id: Option<String>,
    /// Partner identifier.
    pub partner_id: Option<String>,
    /// Caller-supplied idempotency key, forwarded unchanged.
    pub idempotency_key: Option<String>,
}

impl Default for Transaction {
    fn default() -> Self {
        Self {
            payment: Payment::default(),
            customer: Customer::default(),
            shipping_address: None,
            line_items: Vec::new(),
            metadata: Vec::new(),
            transaction_type: TransactionType::default(),
            capture: true,
            save_customer: false,
            redirect_url: None,
            cancel_url: None,
            third_party_wallet_id: None,
            customer_ip: None,
            device_id: None,
            partner_id: None,
            idempotency_key: None,
        }
    }
}

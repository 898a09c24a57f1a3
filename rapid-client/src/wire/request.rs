//! Outbound request bodies and the shared entity shapes.

use serde::{Deserialize, Serialize};

use crate::model::{
    CardDetails, Customer, LineItem, Payment, Refund, ShippingAddress, Transaction,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub(crate) struct WirePayment {
    #[serde(deserialize_with = "super::null_default::deserialize")]
    pub total_amount: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
}

impl From<&Payment> for WirePayment {
    fn from(payment: &Payment) -> Self {
        Self {
            total_amount: payment.total_amount,
            invoice_number: payment.invoice_number.clone(),
            invoice_description: payment.invoice_description.clone(),
            invoice_reference: payment.invoice_reference.clone(),
            currency_code: payment.currency_code.clone(),
        }
    }
}

impl From<WirePayment> for Payment {
    fn from(wire: WirePayment) -> Self {
        Self {
            total_amount: wire.total_amount,
            currency_code: wire.currency_code,
            invoice_number: wire.invoice_number,
            invoice_description: wire.invoice_description,
            invoice_reference: wire.invoice_reference,
        }
    }
}

#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub(crate) struct WireCardDetails {
    #[serde(
        skip_serializing_if = "String::is_empty",
        deserialize_with = "super::null_default::deserialize"
    )]
    pub name: String,
    #[serde(
        skip_serializing_if = "String::is_empty",
        deserialize_with = "super::null_default::deserialize"
    )]
    pub number: String,
    #[serde(
        skip_serializing_if = "String::is_empty",
        deserialize_with = "super::null_default::deserialize"
    )]
    pub expiry_month: String,
    #[serde(
        skip_serializing_if = "String::is_empty",
        deserialize_with = "super::null_default::deserialize"
    )]
    pub expiry_year: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_month: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_number: Option<String>,
    #[serde(rename = "CVN", skip_serializing_if = "Option::is_none")]
    pub cvn: Option<String>,
}

// Card data stays out of logs even at the wire layer.
impl std::fmt::Debug for WireCardDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WireCardDetails").finish_non_exhaustive()
    }
}

impl From<&CardDetails> for WireCardDetails {
    fn from(card: &CardDetails) -> Self {
        Self {
            name: card.name.clone(),
            number: card.number.clone(),
            expiry_month: card.expiry_month.clone(),
            expiry_year: card.expiry_year.clone(),
            start_month: card.start_month.clone(),
            start_year: card.start_year.clone(),
            issue_number: card.issue_number.clone(),
            cvn: card.cvn.clone(),
        }
    }
}

impl From<WireCardDetails> for CardDetails {
    fn from(wire: WireCardDetails) -> Self {
        Self {
            name: wire.name,
            number: wire.number,
            expiry_month: wire.expiry_month,
            expiry_year: wire.expiry_year,
            start_month: wire.start_month,
            start_year: wire.start_year,
            issue_number: wire.issue_number,
            cvn: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub(crate) struct WireCustomer {
    #[serde(
        rename = "TokenCustomerID",
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::opt_u64::deserialize"
    )]
    pub token_customer_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fax: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_details: Option<WireCardDetails>,
}

impl WireCustomer {
    /// Maps a domain customer. Card details are copied only when
    /// `include_card` is set; the builder decides that from the payment method.
    pub(crate) fn from_customer(customer: &Customer, include_card: bool) -> Self {
        let address = &customer.address;
        Self {
            token_customer_id: customer.token_customer_id,
            reference: customer.reference.clone(),
            title: customer.title.clone(),
            first_name: customer.first_name.clone(),
            last_name: customer.last_name.clone(),
            company_name: customer.company_name.clone(),
            job_description: customer.job_description.clone(),
            street1: address.street1.clone(),
            street2: address.street2.clone(),
            city: address.city.clone(),
            state: address.state.clone(),
            postal_code: address.postal_code.clone(),
            country: address.country.as_deref().map(str::to_lowercase),
            email: customer.email.clone(),
            phone: customer.phone.clone(),
            mobile: customer.mobile.clone(),
            comments: customer.comments.clone(),
            fax: customer.fax.clone(),
            url: customer.url.clone(),
            card_details: if include_card {
                customer.card_details.as_ref().map(WireCardDetails::from)
            } else {
                None
            },
        }
    }
}

impl From<WireCustomer> for Customer {
    fn from(wire: WireCustomer) -> Self {
        Self {
            token_customer_id: wire.token_customer_id,
            reference: wire.reference,
            title: wire.title,
            first_name: wire.first_name,
            last_name: wire.last_name,
            company_name: wire.company_name,
            job_description: wire.job_description,
            email: wire.email,
            phone: wire.phone,
            mobile: wire.mobile,
            comments: wire.comments,
            fax: wire.fax,
            url: wire.url,
            address: crate::model::Address {
                street1: wire.street1,
                street2: wire.street2,
                city: wire.city,
                state: wire.state,
                postal_code: wire.postal_code,
                country: wire.country,
            },
            card_details: wire.card_details.map(CardDetails::from),
            redirect_url: None,
            cancel_url: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct WireShippingAddress {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fax: Option<String>,
}

impl From<&ShippingAddress> for WireShippingAddress {
    fn from(shipping: &ShippingAddress) -> Self {
        let address = &shipping.address;
        Self {
            shipping_method: shipping.shipping_method.clone(),
            first_name: shipping.first_name.clone(),
            last_name: shipping.last_name.clone(),
            street1: address.street1.clone(),
            street2: address.street2.clone(),
            city: address.city.clone(),
            state: address.state.clone(),
            country: address.country.as_deref().map(str::to_lowercase),
            postal_code: address.postal_code.clone(),
            email: shipping.email.clone(),
            phone: shipping.phone.clone(),
            fax: shipping.fax.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct WireLineItem {
    #[serde(rename = "SKU", skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub quantity: u32,
    pub unit_cost: u64,
    pub tax: u64,
    pub total: u64,
}

impl From<&LineItem> for WireLineItem {
    fn from(item: &LineItem) -> Self {
        Self {
            sku: item.sku.clone(),
            description: item.description.clone(),
            quantity: item.quantity,
            unit_cost: item.unit_cost,
            tax: item.tax,
            total: item.total,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct WireOption {
    pub value: String,
}

pub(crate) fn wire_options(metadata: &[String]) -> Vec<WireOption> {
    metadata.iter().map(|value| WireOption { value: value.clone() }).collect()
}

/// Body shared by direct payments, access code requests and token customer
/// requests. The `Method` field tells the gateway which of these it is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct TransactionBody {
    pub method: &'static str,
    pub transaction_type: &'static str,
    pub payment: WirePayment,
    pub customer: WireCustomer,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<WireShippingAddress>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<WireLineItem>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<WireOption>,
    #[serde(rename = "RedirectUrl", skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
    #[serde(rename = "CancelUrl", skip_serializing_if = "Option::is_none")]
    pub cancel_url: Option<String>,
    #[serde(rename = "ThirdPartyWalletID", skip_serializing_if = "Option::is_none")]
    pub third_party_wallet_id: Option<String>,
    #[serde(rename = "CustomerIP", skip_serializing_if = "Option::is_none")]
    pub customer_ip: Option<String>,
    #[serde(rename = "DeviceID", skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    #[serde(rename = "PartnerID", skip_serializing_if = "Option::is_none")]
    pub partner_id: Option<String>,
}

impl TransactionBody {
    /// Copies the method-independent transaction fields. The caller fills in
    /// `method`, `customer` and the flow-specific URLs.
    pub(crate) fn from_transaction(transaction: &Transaction) -> Self {
        Self {
            method: "",
            transaction_type: transaction.transaction_type.as_str(),
            payment: WirePayment::from(&transaction.payment),
            customer: WireCustomer::default(),
            shipping_address: transaction.shipping_address.as_ref().map(WireShippingAddress::from),
            items: transaction.line_items.iter().map(WireLineItem::from).collect(),
            options: wire_options(&transaction.metadata),
            redirect_url: None,
            cancel_url: None,
            third_party_wallet_id: None,
            customer_ip: transaction.customer_ip.clone(),
            device_id: transaction.device_id.clone(),
            partner_id: transaction.partner_id.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct WireRefund {
    #[serde(rename = "TransactionID")]
    pub transaction_id: u64,
    pub total_amount: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct RefundBody {
    pub refund: WireRefund,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<WireLineItem>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<WireOption>,
}

impl From<&Refund> for RefundBody {
    fn from(refund: &Refund) -> Self {
        let payment = &refund.refund;
        Self {
            refund: WireRefund {
                transaction_id: refund.transaction_id,
                total_amount: payment.total_amount,
                invoice_number: payment.invoice_number.clone(),
                invoice_description: payment.invoice_description.clone(),
                invoice_reference: payment.invoice_reference.clone(),
                currency_code: payment.currency_code.clone(),
            },
            items: refund.line_items.iter().map(WireLineItem::from).collect(),
            options: wire_options(&refund.metadata),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct CapturePaymentBody {
    pub payment: WirePayment,
    pub transaction_id: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct CancelAuthorisationBody {
    pub transaction_id: u64,
}

//! Inbound response bodies.
//!
//! Every field is optional on the wire and may be `null`: the gateway omits what does not apply
//! to the flow, and failed requests often come back with little more than
//! `Errors`.

use serde::Deserialize;

use super::{WireCustomer, WirePayment, null_default, opt_u64};

/// Response to direct payments, access code requests and token customer
/// create/update calls.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub(crate) struct CreateResponseWire {
    pub authorisation_code: Option<String>,
    pub response_code: Option<String>,
    pub response_message: Option<String>,
    #[serde(rename = "TransactionID", deserialize_with = "opt_u64::deserialize")]
    pub transaction_id: Option<u64>,
    pub transaction_status: Option<bool>,
    pub customer: Option<WireCustomer>,
    pub payment: Option<WirePayment>,
    pub access_code: Option<String>,
    #[serde(rename = "FormActionURL")]
    pub form_action_url: Option<String>,
    pub shared_payment_url: Option<String>,
    pub errors: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub(crate) struct WireTransactionRecord {
    #[serde(rename = "TransactionID", deserialize_with = "opt_u64::deserialize")]
    pub transaction_id: Option<u64>,
    pub transaction_status: Option<bool>,
    pub transaction_captured: Option<bool>,
    pub authorisation_code: Option<String>,
    pub response_code: Option<String>,
    pub response_message: Option<String>,
    #[serde(deserialize_with = "null_default::deserialize")]
    pub total_amount: u64,
    pub invoice_number: Option<String>,
    pub invoice_reference: Option<String>,
    #[serde(rename = "TokenCustomerID", deserialize_with = "opt_u64::deserialize")]
    pub token_customer_id: Option<u64>,
    pub customer: Option<WireCustomer>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub(crate) struct TransactionQueryWire {
    #[serde(deserialize_with = "null_default::deserialize")]
    pub transactions: Vec<WireTransactionRecord>,
    pub errors: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub(crate) struct CustomerQueryWire {
    #[serde(deserialize_with = "null_default::deserialize")]
    pub customers: Vec<WireCustomer>,
    pub errors: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub(crate) struct RefundResponseWire {
    pub authorisation_code: Option<String>,
    pub response_code: Option<String>,
    pub response_message: Option<String>,
    #[serde(rename = "TransactionID", deserialize_with = "opt_u64::deserialize")]
    pub transaction_id: Option<u64>,
    pub transaction_status: Option<bool>,
    pub refund: Option<WirePayment>,
    pub errors: Option<String>,
}

/// Response to capture and cancel calls.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub(crate) struct StatusResponseWire {
    pub response_code: Option<String>,
    pub response_message: Option<String>,
    #[serde(rename = "TransactionID", deserialize_with = "opt_u64::deserialize")]
    pub transaction_id: Option<u64>,
    pub transaction_status: Option<bool>,
    pub errors: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub(crate) struct WireSettlementSummary {
    #[serde(rename = "SettlementID")]
    pub settlement_id: Option<String>,
    pub currency: Option<String>,
    pub settlement_date: Option<String>,
    #[serde(deserialize_with = "null_default::deserialize")]
    pub total_credit: i64,
    #[serde(deserialize_with = "null_default::deserialize")]
    pub total_debit: i64,
    #[serde(deserialize_with = "null_default::deserialize")]
    pub total: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub(crate) struct WireSettlementTransaction {
    #[serde(rename = "SettlementID")]
    pub settlement_id: Option<String>,
    #[serde(rename = "eWAYTransactionID", deserialize_with = "opt_u64::deserialize")]
    pub transaction_id: Option<u64>,
    pub transaction_date_time: Option<String>,
    pub card_type: Option<String>,
    #[serde(deserialize_with = "null_default::deserialize")]
    pub amount: i64,
    pub currency: Option<String>,
    pub transaction_type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub(crate) struct SettlementSearchWire {
    #[serde(deserialize_with = "null_default::deserialize")]
    pub settlement_summaries: Vec<WireSettlementSummary>,
    #[serde(deserialize_with = "null_default::deserialize")]
    pub settlement_transactions: Vec<WireSettlementTransaction>,
    pub errors: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_direct_payment_response() {
        let body = r#"{
            "AuthorisationCode": "123456",
            "ResponseCode": "00",
            "ResponseMessage": "A2000",
            "TransactionID": 11929054,
            "TransactionStatus": true,
            "TransactionType": "Purchase",
            "Customer": {
                "TokenCustomerID": null,
                "FirstName": "John",
                "CardDetails": { "Number": "444433XXXXXX1111", "Name": "John Smith", "ExpiryMonth": "12", "ExpiryYear": "29" }
            },
            "Payment": { "TotalAmount": 1000, "CurrencyCode": "AUD" },
            "Errors": null
        }"#;

        let wire: CreateResponseWire = serde_json::from_str(body).unwrap();
        assert_eq!(wire.transaction_id, Some(11_929_054));
        assert_eq!(wire.transaction_status, Some(true));
        assert_eq!(wire.payment.unwrap().total_amount, 1000);
        let customer = wire.customer.unwrap();
        assert_eq!(customer.token_customer_id, None);
        assert_eq!(customer.card_details.unwrap().number, "444433XXXXXX1111");
    }

    #[test]
    fn test_decode_access_code_response() {
        let body = r#"{
            "AccessCode": "F9802j0-O7sdVLnOcb_9xzS",
            "FormActionURL": "https://secure.ewaypayments.com/AccessCode/F9802j0",
            "Customer": { "TokenCustomerID": "" },
            "Errors": ""
        }"#;

        let wire: CreateResponseWire = serde_json::from_str(body).unwrap();
        assert_eq!(wire.access_code.as_deref(), Some("F9802j0-O7sdVLnOcb_9xzS"));
        assert!(wire.form_action_url.is_some());
        assert!(wire.shared_payment_url.is_none());
        assert!(wire.transaction_status.is_none());
    }

    #[test]
    fn test_decode_query_transaction_response() {
        let body = r#"{
            "Transactions": [{
                "TransactionID": "11929054",
                "TransactionStatus": false,
                "TransactionCaptured": false,
                "ResponseMessage": "D4405",
                "TotalAmount": 1000,
                "InvoiceReference": "INV-1001"
            }],
            "Errors": null
        }"#;

        let wire: TransactionQueryWire = serde_json::from_str(body).unwrap();
        assert_eq!(wire.transactions.len(), 1);
        assert_eq!(wire.transactions[0].transaction_id, Some(11_929_054));
        assert_eq!(wire.transactions[0].invoice_reference.as_deref(), Some("INV-1001"));
    }

    #[test]
    fn test_decode_settlement_search() {
        let body = r#"{
            "SettlementSummaries": [{ "SettlementID": "S1", "Currency": "AUD", "TotalCredit": 1500, "TotalDebit": 200, "Total": 1300 }],
            "SettlementTransactions": [{ "SettlementID": "S1", "eWAYTransactionID": 42, "Amount": -200 }]
        }"#;

        let wire: SettlementSearchWire = serde_json::from_str(body).unwrap();
        assert_eq!(wire.settlement_summaries[0].total, 1300);
        assert_eq!(wire.settlement_transactions[0].transaction_id, Some(42));
        assert_eq!(wire.settlement_transactions[0].amount, -200);
    }
}

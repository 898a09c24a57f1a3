//! Gateway response and error codes.
//!
//! The gateway reports results as short codes: a letter for the category and
//! four digits (e.g. `A2000` approved, `D4405` do not honour, `V6021` card
//! holder name required). Codes are carried verbatim; [`ErrorCode::message`]
//! looks up a description for display only.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Category of a gateway code, taken from its first letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// `A`: approved.
    Approved,
    /// `D`: declined by the issuer or gateway.
    Declined,
    /// `S`: gateway system condition.
    System,
    /// `V`: request failed gateway validation.
    Validation,
    /// `F`: blocked by fraud rules.
    Fraud,
    /// Unrecognised prefix.
    Unknown,
}

/// A single gateway code, kept exactly as received (trimmed).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorCode(String);

/// Reported when the gateway signals failure without naming a code.
pub const UNKNOWN_GATEWAY_ERROR: &str = "S5010";

impl ErrorCode {
    /// Wraps a code.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// The raw code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Category derived from the code's prefix.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self.0.as_bytes().first() {
            Some(b'A') => ErrorCategory::Approved,
            Some(b'D') => ErrorCategory::Declined,
            Some(b'S') => ErrorCategory::System,
            Some(b'V') => ErrorCategory::Validation,
            Some(b'F') => ErrorCategory::Fraud,
            _ => ErrorCategory::Unknown,
        }
    }

    /// Returns true for approval codes.
    #[must_use]
    pub fn is_approval(&self) -> bool {
        self.category() == ErrorCategory::Approved
    }

    /// Human-readable description, if the code is in the built-in catalogue.
    #[must_use]
    pub fn message(&self) -> Option<&'static str> {
        MESSAGES
            .binary_search_by(|(code, _)| (*code).cmp(self.0.as_str()))
            .ok()
            .map(|index| MESSAGES[index].1)
    }

    /// Splits a comma-separated code list as sent by the gateway.
    ///
    /// Blank entries are skipped; order is preserved.
    pub fn parse_list(list: &str) -> Vec<Self> {
        list.split(',')
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .map(Self::new)
            .collect()
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ErrorCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

// Sorted by code for binary search.
const MESSAGES: &[(&str, &str)] = &[
    ("A2000", "Transaction Approved"),
    ("A2008", "Honour With Identification"),
    ("A2010", "Approved For Partial Amount"),
    ("A2011", "Approved, VIP"),
    ("A2016", "Approved, Update Track 3"),
    ("D4401", "Refer to Issuer"),
    ("D4402", "Refer to Issuer, special"),
    ("D4403", "No Merchant"),
    ("D4404", "Pick Up Card"),
    ("D4405", "Do Not Honour"),
    ("D4406", "Error"),
    ("D4409", "Request In Progress"),
    ("D4412", "Invalid Transaction"),
    ("D4413", "Invalid Amount"),
    ("D4414", "Invalid Card Number"),
    ("D4415", "No Issuer"),
    ("D4419", "Re-enter Last Transaction"),
    ("D4422", "Suspected Malfunction"),
    ("D4430", "Format Error"),
    ("D4433", "Expired Card, Capture"),
    ("D4434", "Suspected Fraud, Retain Card"),
    ("D4441", "Lost Card"),
    ("D4443", "Stolen Card"),
    ("D4451", "Insufficient Funds"),
    ("D4454", "Expired Card"),
    ("D4455", "Incorrect PIN"),
    ("D4457", "Function Not Permitted to Cardholder"),
    ("D4458", "Function Not Permitted to Terminal"),
    ("D4459", "Suspected Fraud"),
    ("D4461", "Exceeds Withdrawal Limit"),
    ("D4462", "Restricted Card"),
    ("D4463", "Security Violation"),
    ("D4482", "CVV Validation Error"),
    ("D4491", "Card Issuer Unavailable"),
    ("D4492", "Unable To Route Transaction"),
    ("D4494", "Duplicate Transaction"),
    ("D4496", "System Error"),
    ("S5000", "System Error"),
    ("S5010", "Unknown error returned by gateway"),
    ("S5085", "Started 3dSecure"),
    ("S5086", "Routed 3dSecure"),
    ("S5087", "Completed 3dSecure"),
    ("S5099", "Incomplete (Access Code in progress/incomplete)"),
    ("V6000", "Validation error"),
    ("V6001", "Invalid CustomerIP"),
    ("V6002", "Invalid DeviceID"),
    ("V6003", "Invalid Request PartnerID"),
    ("V6004", "Invalid Request Method"),
    ("V6010", "Invalid TransactionType"),
    ("V6011", "Invalid Payment TotalAmount"),
    ("V6012", "Invalid Payment InvoiceDescription"),
    ("V6013", "Invalid Payment InvoiceNumber"),
    ("V6014", "Invalid Payment InvoiceReference"),
    ("V6015", "Invalid Payment CurrencyCode"),
    ("V6016", "Payment Required"),
    ("V6017", "Payment CurrencyCode Required"),
    ("V6018", "Unknown Payment CurrencyCode"),
    ("V6021", "Cardholder Name Required"),
    ("V6022", "Card Number Required"),
    ("V6023", "CVN Required"),
    ("V6033", "Invalid Expiry Date"),
    ("V6034", "Invalid Issue Number"),
    ("V6035", "Invalid Valid From Date"),
    ("V6040", "Invalid TokenCustomerID"),
    ("V6041", "Customer Required"),
    ("V6042", "Customer FirstName Required"),
    ("V6043", "Customer LastName Required"),
    ("V6044", "Customer CountryCode Required"),
    ("V6045", "Customer Title Required"),
    ("V6046", "TokenCustomerID Required"),
    ("V6047", "RedirectURL Required"),
    ("V6051", "Invalid Customer FirstName"),
    ("V6052", "Invalid Customer LastName"),
    ("V6053", "Invalid Customer CountryCode"),
    ("V6101", "Invalid Card Expiry Month"),
    ("V6102", "Invalid Card Expiry Year"),
    ("V6106", "Invalid Card CVN"),
    ("V6107", "Invalid AccessCode"),
    ("V6110", "Invalid Card Number"),
    ("V6111", "Unauthorised API Access, Account Not PCI Certified"),
    ("V6115", "Invalid DirectRefundRequest, Transaction ID"),
    ("V6121", "Invalid TransactionSearch, Filter Match Type"),
    ("V6122", "Invalid TransactionSearch, Non numeric Transaction ID"),
    ("V6123", "Invalid TransactionSearch, no TransactionID or AccessCode specified"),
    ("V6124", "Invalid Line Items, totals do not match TotalAmount"),
    ("V6125", "Selected Payment Type not enabled"),
    ("V6128", "Invalid Method for Payment Type"),
    ("V6129", "Transaction has not been authorised for Capture/Cancellation"),
    ("V6132", "Transaction has already been completed or voided"),
    ("V6134", "Invalid Auth Transaction ID for Capture/Void"),
    ("V6140", "Merchant account is suspended"),
    ("V6150", "Invalid Refund Amount"),
    ("V6151", "Refund amount greater than original transaction"),
    ("V6152", "Original transaction already refunded for total amount"),
    ("V6153", "Card type not supported by merchant"),
    ("V6170", "Invalid TransactionSearch, Invoice Number is not unique"),
    ("V6171", "Invalid TransactionSearch, Invoice Number not found"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_is_sorted() {
        assert!(MESSAGES.windows(2).all(|pair| pair[0].0 < pair[1].0));
    }

    #[test]
    fn test_category_from_prefix() {
        assert_eq!(ErrorCode::from("A2000").category(), ErrorCategory::Approved);
        assert_eq!(ErrorCode::from("D4405").category(), ErrorCategory::Declined);
        assert_eq!(ErrorCode::from("S5099").category(), ErrorCategory::System);
        assert_eq!(ErrorCode::from("V6021").category(), ErrorCategory::Validation);
        assert_eq!(ErrorCode::from("F7000").category(), ErrorCategory::Fraud);
        assert_eq!(ErrorCode::from("X1").category(), ErrorCategory::Unknown);
        assert_eq!(ErrorCode::from("").category(), ErrorCategory::Unknown);
    }

    #[test]
    fn test_message_lookup() {
        assert_eq!(ErrorCode::from("D4405").message(), Some("Do Not Honour"));
        assert_eq!(ErrorCode::from("V6047").message(), Some("RedirectURL Required"));
        assert_eq!(ErrorCode::from("Z9999").message(), None);
    }

    #[test]
    fn test_parse_list_preserves_order() {
        let codes = ErrorCode::parse_list("V6021, V6022 ,,V6101");
        let raw: Vec<&str> = codes.iter().map(ErrorCode::as_str).collect();
        assert_eq!(raw, vec!["V6021", "V6022", "V6101"]);
    }

    #[test]
    fn test_parse_list_empty() {
        assert!(ErrorCode::parse_list("").is_empty());
        assert!(ErrorCode::parse_list(" , ").is_empty());
    }

    #[test]
    fn test_unknown_gateway_error_in_catalogue() {
        assert!(ErrorCode::from(UNKNOWN_GATEWAY_ERROR).message().is_some());
    }
}

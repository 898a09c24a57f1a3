//! Customer and card data.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Postal address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// First street line.
    pub street1: Option<String>,
    /// Second street line.
    pub street2: Option<String>,
    /// City or suburb.
    pub city: Option<String>,
    /// State or province.
    pub state: Option<String>,
    /// Postal code.
    pub postal_code: Option<String>,
    /// ISO 3166-1 alpha-2 country code, lower case on the wire (e.g. "au").
    pub country: Option<String>,
}

/// Card details.
///
/// On requests these are the raw values entered by the card holder. On
/// responses the gateway returns the number masked (e.g. `444433XXXXXX1111`)
/// and never returns the CVN.
///
/// `Debug` output masks the number and omits the CVN.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDetails {
    /// Name on the card.
    pub name: String,
    /// Card number (masked on responses).
    pub number: String,
    /// Two digit expiry month.
    pub expiry_month: String,
    /// Two digit expiry year.
    pub expiry_year: String,
    /// Start month, for cards that carry one.
    pub start_month: Option<String>,
    /// Start year, for cards that carry one.
    pub start_year: Option<String>,
    /// Issue number, for cards that carry one.
    pub issue_number: Option<String>,
    /// Card verification number.
    pub cvn: Option<String>,
}

impl CardDetails {
    /// Creates card details with the fields every inline payment requires.
    pub fn new(
        name: impl Into<String>,
        number: impl Into<String>,
        expiry_month: impl Into<String>,
        expiry_year: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            number: number.into(),
            expiry_month: expiry_month.into(),
            expiry_year: expiry_year.into(),
            ..Self::default()
        }
    }

    /// Sets the card verification number.
    #[must_use]
    pub fn with_cvn(mut self, cvn: impl Into<String>) -> Self {
        self.cvn = Some(cvn.into());
        self
    }

    /// Returns the name of the first required field that is blank, if any.
    pub(crate) fn first_missing_field(&self) -> Option<&'static str> {
        [
            ("card_details.name", &self.name),
            ("card_details.number", &self.number),
            ("card_details.expiry_month", &self.expiry_month),
            ("card_details.expiry_year", &self.expiry_year),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
    }

    /// Returns true if no field carries a value.
    pub(crate) fn is_blank(&self) -> bool {
        let text = [&self.name, &self.number, &self.expiry_month, &self.expiry_year];
        let optional = [&self.start_month, &self.start_year, &self.issue_number, &self.cvn];
        text.iter().all(|v| v.trim().is_empty())
            && optional.iter().all(|v| v.as_deref().is_none_or(|v| v.trim().is_empty()))
    }

    fn masked_number(&self) -> String {
        let digits = self.number.chars().count();
        if digits <= 4 {
            return "*".repeat(digits);
        }
        let tail: String = self.number.chars().skip(digits - 4).collect();
        format!("{}{tail}", "*".repeat(digits - 4))
    }
}

impl fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardDetails")
            .field("name", &self.name)
            .field("number", &self.masked_number())
            .field("expiry_month", &self.expiry_month)
            .field("expiry_year", &self.expiry_year)
            .field("cvn", &self.cvn.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}

/// A token customer: a stored payment profile at the gateway.
///
/// `token_customer_id` is assigned by the gateway when the customer is
/// created and is required to update or query it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    /// Gateway-assigned token customer ID.
    pub token_customer_id: Option<u64>,
    /// Merchant's own reference for the customer.
    pub reference: Option<String>,
    /// Title (Mr., Ms., ...).
    pub title: Option<String>,
    /// First name.
    pub first_name: Option<String>,
    /// Last name.
    pub last_name: Option<String>,
    /// Company name.
    pub company_name: Option<String>,
    /// Job description.
    pub job_description: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Mobile number.
    pub mobile: Option<String>,
    /// Free-form comments.
    pub comments: Option<String>,
    /// Fax number.
    pub fax: Option<String>,
    /// Web site.
    pub url: Option<String>,
    /// Billing address.
    #[serde(default)]
    pub address: Address,
    /// Card details, sent only for inline payment methods.
    pub card_details: Option<CardDetails>,
    /// Where the buyer returns after a hosted or redirect card capture.
    pub redirect_url: Option<String>,
    /// Where the buyer goes if they cancel a hosted card capture.
    pub cancel_url: Option<String>,
}

impl Customer {
    /// Creates a customer reference for an existing token customer.
    #[must_use]
    pub fn with_token(token_customer_id: u64) -> Self {
        Self { token_customer_id: Some(token_customer_id), ..Self::default() }
    }
}

/// Lifecycle state of a token customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CustomerState {
    /// Waiting for card details from a hosted page or redirect.
    Pending,
    /// The gateway holds card details for the customer.
    Active,
}

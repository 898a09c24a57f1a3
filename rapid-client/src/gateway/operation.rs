//! Gateway operations.

use std::fmt;

/// Operation type, used for endpoint selection, error context and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Create a payment.
    CreateTransaction,
    /// Create a token customer.
    CreateCustomer,
    /// Update a token customer.
    UpdateCustomer,
    /// Look up a token customer.
    QueryCustomer,
    /// Look up a transaction.
    QueryTransaction,
    /// Refund a transaction.
    Refund,
    /// Capture an authorisation.
    CapturePayment,
    /// Void an authorisation.
    CancelAuthorisation,
    /// Search settlements.
    SearchSettlements,
}

impl Operation {
    /// Every operation, in declaration order.
    pub const ALL: [Self; 9] = [
        Self::CreateTransaction,
        Self::CreateCustomer,
        Self::UpdateCustomer,
        Self::QueryCustomer,
        Self::QueryTransaction,
        Self::Refund,
        Self::CapturePayment,
        Self::CancelAuthorisation,
        Self::SearchSettlements,
    ];

    /// Operation name as shown in logs and error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreateTransaction => "CreateTransaction",
            Self::CreateCustomer => "CreateCustomer",
            Self::UpdateCustomer => "UpdateCustomer",
            Self::QueryCustomer => "QueryCustomer",
            Self::QueryTransaction => "QueryTransaction",
            Self::Refund => "Refund",
            Self::CapturePayment => "CapturePayment",
            Self::CancelAuthorisation => "CancelAuthorisation",
            Self::SearchSettlements => "SearchSettlements",
        }
    }

    /// Returns true if the operation takes a [`PaymentMethod`](crate::model::PaymentMethod).
    #[must_use]
    pub const fn takes_payment_method(self) -> bool {
        matches!(self, Self::CreateTransaction | Self::CreateCustomer | Self::UpdateCustomer)
    }

    /// Returns true if the operation moves or reserves money. These accept an
    /// idempotency key.
    #[must_use]
    pub const fn is_money_movement(self) -> bool {
        matches!(
            self,
            Self::CreateTransaction | Self::Refund | Self::CapturePayment | Self::CancelAuthorisation
        )
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//! Payment method selection.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Describes where card details for a request come from.
///
/// The method is always supplied explicitly by the caller. The client never
/// infers it from the shape of a [`Transaction`](crate::model::Transaction) or
/// [`Customer`](crate::model::Customer), so card data present on a request
/// sent through a hosted flow is dropped rather than silently charged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Card details are sent inline from the merchant server.
    Direct,
    /// Card details are collected on the gateway's responsive hosted page.
    ResponsiveShared,
    /// Card details are posted by the buyer's browser straight to the gateway.
    TransparentRedirect,
    /// A third-party wallet token stands in for card details.
    Wallet,
    /// Card details are sent inline and funds are only authorised, to be
    /// captured or cancelled later.
    Authorisation,
}

impl PaymentMethod {
    /// Every payment method, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Direct,
        Self::ResponsiveShared,
        Self::TransparentRedirect,
        Self::Wallet,
        Self::Authorisation,
    ];

    /// Returns true for flows where the buyer enters card details out-of-band
    /// and the gateway hands back an access code to complete later.
    #[must_use]
    pub const fn is_hosted(self) -> bool {
        matches!(self, Self::ResponsiveShared | Self::TransparentRedirect)
    }

    /// Returns true for flows that carry full card details inline.
    #[must_use]
    pub const fn carries_card_details(self) -> bool {
        matches!(self, Self::Direct | Self::Authorisation)
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Direct => "Direct",
            Self::ResponsiveShared => "ResponsiveShared",
            Self::TransparentRedirect => "TransparentRedirect",
            Self::Wallet => "Wallet",
            Self::Authorisation => "Authorisation",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hosted_methods() {
        let hosted: Vec<_> = PaymentMethod::ALL.into_iter().filter(|m| m.is_hosted()).collect();
        assert_eq!(hosted, vec![PaymentMethod::ResponsiveShared, PaymentMethod::TransparentRedirect]);
    }

    #[test]
    fn test_inline_card_methods() {
        assert!(PaymentMethod::Direct.carries_card_details());
        assert!(PaymentMethod::Authorisation.carries_card_details());
        assert!(!PaymentMethod::Wallet.carries_card_details());
        assert!(!PaymentMethod::TransparentRedirect.carries_card_details());
    }

    #[test]
    fn test_payment_method_from_toml_value() {
        #[derive(Deserialize)]
        struct Wrapper {
            method: PaymentMethod,
        }

        let wrapper: Wrapper = toml::from_str("method = \"responsive_shared\"").unwrap();
        assert_eq!(wrapper.method, PaymentMethod::ResponsiveShared);
    }

    #[test]
    fn test_display() {
        assert_eq!(PaymentMethod::TransparentRedirect.to_string(), "TransparentRedirect");
    }
}

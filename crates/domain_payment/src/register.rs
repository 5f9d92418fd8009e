//! Payment register entity and fixed vocabularies
//!
//! A payment register is the billing record attached to a turn. At most one
//! register exists per turn; it tracks how the visit was (or will be) paid.
//! Status and method form closed vocabularies with canonical uppercase wire
//! tokens; free-form input is normalized (trim + uppercase) exactly once,
//! when a patch enters the engine.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::{RegisterId, TurnId};

use crate::error::PaymentError;

/// Exclusive upper bound on every monetary field
pub const MAX_MONETARY_AMOUNT: Decimal = dec!(10_000_000);

/// Payment status vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// Created with the turn, nothing billed yet
    #[serde(rename = "PENDING")]
    Pending,
    /// Settled directly by the patient
    #[serde(rename = "PAID")]
    Paid,
    /// Covered by the patient's health insurance, possibly with a copayment
    #[serde(rename = "HEALTH INSURANCE")]
    HealthInsurance,
    /// Settled with a bonus voucher
    #[serde(rename = "BONUS")]
    Bonus,
    /// Terminal status; the billing was voided
    #[serde(rename = "CANCELED")]
    Canceled,
}

impl PaymentStatus {
    /// Canonical wire token
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Paid => "PAID",
            PaymentStatus::HealthInsurance => "HEALTH INSURANCE",
            PaymentStatus::Bonus => "BONUS",
            PaymentStatus::Canceled => "CANCELED",
        }
    }

    /// Parses a free-form token, normalizing trim + uppercase
    pub fn parse(input: &str) -> Result<Self, PaymentError> {
        let normalized = input.trim();
        if normalized.is_empty() {
            return Err(PaymentError::validation("Payment status cannot be empty"));
        }
        match normalized.to_ascii_uppercase().as_str() {
            "PENDING" => Ok(PaymentStatus::Pending),
            "PAID" => Ok(PaymentStatus::Paid),
            "HEALTH INSURANCE" => Ok(PaymentStatus::HealthInsurance),
            "BONUS" => Ok(PaymentStatus::Bonus),
            "CANCELED" => Ok(PaymentStatus::Canceled),
            _ => Err(PaymentError::validation("Invalid payment status")),
        }
    }

    /// The method this status forces, if any (the coupling invariant)
    pub fn required_method(&self) -> Option<PaymentMethod> {
        match self {
            PaymentStatus::HealthInsurance => Some(PaymentMethod::HealthInsurance),
            PaymentStatus::Bonus => Some(PaymentMethod::Bonus),
            _ => None,
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment method vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "CASH")]
    Cash,
    #[serde(rename = "CREDIT CARD")]
    CreditCard,
    #[serde(rename = "DEBIT CARD")]
    DebitCard,
    #[serde(rename = "ONLINE PAYMENT")]
    OnlinePayment,
    #[serde(rename = "TRANSFER")]
    Transfer,
    #[serde(rename = "BONUS")]
    Bonus,
    #[serde(rename = "HEALTH INSURANCE")]
    HealthInsurance,
}

impl PaymentMethod {
    /// Canonical wire token
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "CASH",
            PaymentMethod::CreditCard => "CREDIT CARD",
            PaymentMethod::DebitCard => "DEBIT CARD",
            PaymentMethod::OnlinePayment => "ONLINE PAYMENT",
            PaymentMethod::Transfer => "TRANSFER",
            PaymentMethod::Bonus => "BONUS",
            PaymentMethod::HealthInsurance => "HEALTH INSURANCE",
        }
    }

    /// Parses a free-form token, normalizing trim + uppercase
    pub fn parse(input: &str) -> Result<Self, PaymentError> {
        let normalized = input.trim();
        if normalized.is_empty() {
            return Err(PaymentError::validation("Payment method cannot be empty"));
        }
        match normalized.to_ascii_uppercase().as_str() {
            "CASH" => Ok(PaymentMethod::Cash),
            "CREDIT CARD" => Ok(PaymentMethod::CreditCard),
            "DEBIT CARD" => Ok(PaymentMethod::DebitCard),
            "ONLINE PAYMENT" => Ok(PaymentMethod::OnlinePayment),
            "TRANSFER" => Ok(PaymentMethod::Transfer),
            "BONUS" => Ok(PaymentMethod::Bonus),
            "HEALTH INSURANCE" => Ok(PaymentMethod::HealthInsurance),
            _ => Err(PaymentError::validation("Invalid payment method")),
        }
    }

    /// The status this method forces, if any (the coupling invariant)
    pub fn required_status(&self) -> Option<PaymentStatus> {
        match self {
            PaymentMethod::HealthInsurance => Some(PaymentStatus::HealthInsurance),
            PaymentMethod::Bonus => Some(PaymentStatus::Bonus),
            _ => None,
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The billing record for a single turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRegister {
    /// Unique identifier
    pub id: RegisterId,
    /// Owning turn; immutable after creation and the authoritative link
    pub turn_id: TurnId,
    /// Current payment status
    pub status: PaymentStatus,
    /// Amount billed, unset until the visit is billed
    pub payment_amount: Option<Decimal>,
    /// How the visit was paid, unset until the visit is billed
    pub method: Option<PaymentMethod>,
    /// Patient share under health insurance; present iff status is
    /// HEALTH INSURANCE
    pub copayment_amount: Option<Decimal>,
    /// Last status change (or the paid-at instant supplied by the caller)
    pub last_update: DateTime<Utc>,
}

impl PaymentRegister {
    /// Creates the initial PENDING register for a turn
    pub fn pending(turn_id: TurnId) -> Self {
        Self {
            id: RegisterId::new(),
            turn_id,
            status: PaymentStatus::Pending,
            payment_amount: None,
            method: None,
            copayment_amount: None,
            last_update: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_normalizes() {
        assert_eq!(
            PaymentStatus::parse("  health insurance ").unwrap(),
            PaymentStatus::HealthInsurance
        );
        assert_eq!(PaymentStatus::parse("paid").unwrap(), PaymentStatus::Paid);
    }

    #[test]
    fn test_status_parse_rejects_unknown() {
        let err = PaymentStatus::parse("REFUNDED").unwrap_err();
        assert_eq!(err.to_string(), "Invalid payment status");
    }

    #[test]
    fn test_status_parse_rejects_empty() {
        let err = PaymentStatus::parse("   ").unwrap_err();
        assert_eq!(err.to_string(), "Payment status cannot be empty");
    }

    #[test]
    fn test_method_parse_normalizes() {
        assert_eq!(
            PaymentMethod::parse("online payment").unwrap(),
            PaymentMethod::OnlinePayment
        );
    }

    #[test]
    fn test_method_parse_rejects_unknown() {
        let err = PaymentMethod::parse("BITCOIN").unwrap_err();
        assert_eq!(err.to_string(), "Invalid payment method");
    }

    #[test]
    fn test_coupling_lookups() {
        assert_eq!(
            PaymentStatus::HealthInsurance.required_method(),
            Some(PaymentMethod::HealthInsurance)
        );
        assert_eq!(
            PaymentMethod::Bonus.required_status(),
            Some(PaymentStatus::Bonus)
        );
        assert_eq!(PaymentStatus::Paid.required_method(), None);
        assert_eq!(PaymentMethod::Cash.required_status(), None);
    }

    #[test]
    fn test_wire_tokens() {
        let json = serde_json::to_string(&PaymentStatus::HealthInsurance).unwrap();
        assert_eq!(json, "\"HEALTH INSURANCE\"");
        let json = serde_json::to_string(&PaymentMethod::CreditCard).unwrap();
        assert_eq!(json, "\"CREDIT CARD\"");
    }

    #[test]
    fn test_pending_register_carries_no_financial_fields() {
        let register = PaymentRegister::pending(TurnId::new());
        assert_eq!(register.status, PaymentStatus::Pending);
        assert!(register.payment_amount.is_none());
        assert!(register.method.is_none());
        assert!(register.copayment_amount.is_none());
    }
}

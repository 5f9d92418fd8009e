//! External representations of the payment register
//!
//! The patch is the partial-update payload accepted by the engine; the view
//! is what the engine hands back to its callers. Timestamps cross the
//! boundary as offset datetimes; internally everything is UTC.

use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{RegisterId, TurnId};

use crate::register::{PaymentMethod, PaymentRegister, PaymentStatus};

/// Partial update request for a payment register. Absent fields leave the
/// stored value unchanged. Status and method arrive as free-form strings and
/// are normalized by the engine.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PaymentRegisterPatch {
    #[serde(rename = "paymentStatus")]
    pub status: Option<String>,
    pub method: Option<String>,
    #[serde(rename = "paymentAmount")]
    pub payment_amount: Option<Decimal>,
    #[serde(rename = "copaymentAmount")]
    pub copayment_amount: Option<Decimal>,
    // `payedAt` is the historical wire spelling
    #[serde(rename = "payedAt", alias = "paidAt")]
    pub paid_at: Option<DateTime<FixedOffset>>,
}

impl PaymentRegisterPatch {
    /// A patch that only requests cancellation
    pub fn canceled() -> Self {
        Self {
            status: Some("CANCELED".to_string()),
            ..Default::default()
        }
    }

    /// True if any field other than status is present
    pub fn has_fields_besides_status(&self) -> bool {
        self.method.is_some()
            || self.payment_amount.is_some()
            || self.copayment_amount.is_some()
            || self.paid_at.is_some()
    }
}

/// External view of a payment register
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRegisterView {
    pub id: RegisterId,
    #[serde(rename = "turnId")]
    pub turn_id: TurnId,
    #[serde(rename = "paidAt")]
    pub paid_at: DateTime<FixedOffset>,
    #[serde(rename = "paymentStatus")]
    pub status: PaymentStatus,
    #[serde(rename = "paymentAmount")]
    pub payment_amount: Option<Decimal>,
    pub method: Option<PaymentMethod>,
    #[serde(rename = "copaymentAmount")]
    pub copayment_amount: Option<Decimal>,
}

impl From<&PaymentRegister> for PaymentRegisterView {
    fn from(register: &PaymentRegister) -> Self {
        Self {
            id: register.id,
            turn_id: register.turn_id,
            paid_at: register.last_update.fixed_offset(),
            status: register.status,
            payment_amount: register.payment_amount,
            method: register.method,
            copayment_amount: register.copayment_amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use core_kernel::TurnId;
    use rust_decimal_macros::dec;

    #[test]
    fn test_patch_deserializes_wire_names() {
        let json = r#"{
            "paymentStatus": "paid",
            "paymentAmount": 150.0,
            "method": "credit card",
            "payedAt": "2025-03-01T10:00:00-03:00"
        }"#;
        let patch: PaymentRegisterPatch = serde_json::from_str(json).unwrap();
        assert_eq!(patch.status.as_deref(), Some("paid"));
        assert_eq!(patch.payment_amount, Some(dec!(150.0)));
        assert_eq!(patch.method.as_deref(), Some("credit card"));
        assert!(patch.paid_at.is_some());
        assert!(patch.copayment_amount.is_none());
    }

    #[test]
    fn test_patch_accepts_paid_at_alias() {
        let json = r#"{"paidAt": "2025-03-01T10:00:00Z"}"#;
        let patch: PaymentRegisterPatch = serde_json::from_str(json).unwrap();
        assert!(patch.paid_at.is_some());
    }

    #[test]
    fn test_canceled_patch_carries_only_status() {
        let patch = PaymentRegisterPatch::canceled();
        assert_eq!(patch.status.as_deref(), Some("CANCELED"));
        assert!(!patch.has_fields_besides_status());
    }

    #[test]
    fn test_view_maps_entity() {
        let mut register = PaymentRegister::pending(TurnId::new());
        register.status = PaymentStatus::Paid;
        register.payment_amount = Some(dec!(150));
        register.method = Some(PaymentMethod::CreditCard);
        register.last_update = Utc::now();

        let view = PaymentRegisterView::from(&register);
        assert_eq!(view.id, register.id);
        assert_eq!(view.turn_id, register.turn_id);
        assert_eq!(view.status, PaymentStatus::Paid);
        assert_eq!(view.payment_amount, Some(dec!(150)));
        assert_eq!(view.paid_at, register.last_update);

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["paymentStatus"], "PAID");
        assert_eq!(json["method"], "CREDIT CARD");
        assert!(json["copaymentAmount"].is_null());
    }
}

//! Test Data Builders
//!
//! Builder patterns for constructing test data with sensible defaults.
//! Tests specify only the fields relevant to the scenario.

use chrono::Utc;
use rust_decimal::Decimal;

use core_kernel::{RegisterId, TurnId, UserId};
use domain_payment::{
    PaymentMethod, PaymentRegister, PaymentStatus, Turn, TurnStatus,
};

/// Builder for test turns; defaults to a COMPLETED turn with fresh
/// doctor and patient ids.
pub struct TurnBuilder {
    id: TurnId,
    status: TurnStatus,
    doctor_id: UserId,
    patient_id: UserId,
    payment_register_id: Option<RegisterId>,
}

impl Default for TurnBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnBuilder {
    pub fn new() -> Self {
        Self {
            id: TurnId::new(),
            status: TurnStatus::Completed,
            doctor_id: UserId::new(),
            patient_id: UserId::new(),
            payment_register_id: None,
        }
    }

    pub fn with_id(mut self, id: TurnId) -> Self {
        self.id = id;
        self
    }

    pub fn with_status(mut self, status: TurnStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_doctor(mut self, doctor_id: UserId) -> Self {
        self.doctor_id = doctor_id;
        self
    }

    pub fn with_patient(mut self, patient_id: UserId) -> Self {
        self.patient_id = patient_id;
        self
    }

    pub fn with_register(mut self, register_id: RegisterId) -> Self {
        self.payment_register_id = Some(register_id);
        self
    }

    pub fn build(self) -> Turn {
        Turn {
            id: self.id,
            status: self.status,
            doctor_id: self.doctor_id,
            patient_id: self.patient_id,
            payment_register_id: self.payment_register_id,
        }
    }
}

/// Builder for test payment registers; defaults to a PENDING register
/// with no financial fields.
pub struct RegisterBuilder {
    turn_id: TurnId,
    status: PaymentStatus,
    payment_amount: Option<Decimal>,
    method: Option<PaymentMethod>,
    copayment_amount: Option<Decimal>,
}

impl RegisterBuilder {
    pub fn for_turn(turn_id: TurnId) -> Self {
        Self {
            turn_id,
            status: PaymentStatus::Pending,
            payment_amount: None,
            method: None,
            copayment_amount: None,
        }
    }

    pub fn with_status(mut self, status: PaymentStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.payment_amount = Some(amount);
        self
    }

    pub fn with_method(mut self, method: PaymentMethod) -> Self {
        self.method = Some(method);
        self
    }

    pub fn with_copayment(mut self, copayment: Decimal) -> Self {
        self.copayment_amount = Some(copayment);
        self
    }

    pub fn build(self) -> PaymentRegister {
        PaymentRegister {
            id: RegisterId::new(),
            turn_id: self.turn_id,
            status: self.status,
            payment_amount: self.payment_amount,
            method: self.method,
            copayment_amount: self.copayment_amount,
            last_update: Utc::now(),
        }
    }
}

//! Payment register engine
//!
//! Owns the register state machine: creation when a turn becomes billable,
//! the update transition with its cross-field validation rules, and
//! cancellation. The engine is stateless between calls; all state lives in
//! the repositories.
//!
//! Validation short-circuits in a fixed order: authorization, turn state,
//! payload well-formedness (vocabulary, bounds), status/method coupling,
//! amount positivity, copayment presence, copayment bound. Earlier failures
//! mask later ones.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, warn};

use core_kernel::TurnId;

use crate::authorization::{authorize_mutation, Actor};
use crate::error::PaymentError;
use crate::ports::{PaymentRegisterRepository, TurnRepository};
use crate::register::{PaymentMethod, PaymentRegister, PaymentStatus, MAX_MONETARY_AMOUNT};
use crate::turn::{Turn, TurnStatus};
use crate::view::{PaymentRegisterPatch, PaymentRegisterView};

/// Whether a copayment equal to the payment amount is acceptable.
///
/// The business rule is non-strict (`copayment <= amount`); kept as a
/// policy knob rather than hard-coded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CopaymentBound {
    /// copayment <= payment amount
    #[default]
    Inclusive,
    /// copayment < payment amount
    Exclusive,
}

impl CopaymentBound {
    fn allows(&self, copayment: Decimal, amount: Decimal) -> bool {
        match self {
            CopaymentBound::Inclusive => copayment <= amount,
            CopaymentBound::Exclusive => copayment < amount,
        }
    }
}

/// Application service for payment registers
pub struct PaymentRegisterService {
    turns: Arc<dyn TurnRepository>,
    registers: Arc<dyn PaymentRegisterRepository>,
    copayment_bound: CopaymentBound,
}

impl PaymentRegisterService {
    pub fn new(turns: Arc<dyn TurnRepository>, registers: Arc<dyn PaymentRegisterRepository>) -> Self {
        Self {
            turns,
            registers,
            copayment_bound: CopaymentBound::default(),
        }
    }

    /// Overrides the copayment bound policy
    pub fn with_copayment_bound(mut self, bound: CopaymentBound) -> Self {
        self.copayment_bound = bound;
        self
    }

    /// Creates the PENDING register for a turn that became billable.
    ///
    /// Invoked from the turn-completion workflow, not from a user-facing
    /// mutation, so no authorization applies. Duplicate creation is checked
    /// both through the existence lookup and through the turn's cached
    /// back-reference.
    pub async fn create(&self, turn_id: TurnId) -> Result<PaymentRegisterView, PaymentError> {
        let mut turn = self.load_turn(turn_id).await?;

        if self.registers.exists_by_turn_id(turn_id).await? || turn.payment_register_id.is_some() {
            warn!(%turn_id, "duplicate payment register creation rejected");
            return Err(PaymentError::conflict(
                "Payment register already exists for this turn",
            ));
        }

        let saved = self.registers.save(PaymentRegister::pending(turn_id)).await?;
        turn.payment_register_id = Some(saved.id);
        self.turns.save(turn).await?;

        debug!(%turn_id, register_id = %saved.id, "payment register created");
        Ok(PaymentRegisterView::from(&saved))
    }

    /// Returns the register for a turn
    pub async fn read(&self, turn_id: TurnId) -> Result<PaymentRegisterView, PaymentError> {
        let register = self.load_register(turn_id).await?;
        Ok(PaymentRegisterView::from(&register))
    }

    /// Applies a partial update to the register of a completed turn.
    ///
    /// This is the core transition function; see the module docs for the
    /// validation order.
    pub async fn update(
        &self,
        turn_id: TurnId,
        patch: &PaymentRegisterPatch,
        actor: &Actor,
    ) -> Result<PaymentRegisterView, PaymentError> {
        let turn = self.load_turn(turn_id).await?;

        if let Err(denied) = authorize_mutation(actor, &turn) {
            warn!(%turn_id, actor_id = %actor.id, "payment register update denied");
            return Err(denied);
        }

        if turn.status != TurnStatus::Completed {
            return Err(PaymentError::invalid_turn_state(
                "Payment can only be registered for a completed turn",
            ));
        }

        let register = self.load_register(turn_id).await?;

        let requested_status = patch
            .status
            .as_deref()
            .map(PaymentStatus::parse)
            .transpose()?;

        if requested_status == Some(PaymentStatus::Canceled) {
            return self.apply_cancellation(turn, register, patch).await;
        }

        self.apply_update(turn, register, patch, requested_status).await
    }

    /// Cancels the register of a completed turn.
    ///
    /// Equivalent to an update carrying only `status = CANCELED`: same
    /// authorization, same turn-state precondition, same pending gate.
    pub async fn cancel(
        &self,
        turn_id: TurnId,
        actor: &Actor,
    ) -> Result<PaymentRegisterView, PaymentError> {
        self.update(turn_id, &PaymentRegisterPatch::canceled(), actor)
            .await
    }

    /// Pure status transition to CANCELED. Financial fields and the
    /// last-update instant stay untouched.
    async fn apply_cancellation(
        &self,
        turn: Turn,
        register: PaymentRegister,
        patch: &PaymentRegisterPatch,
    ) -> Result<PaymentRegisterView, PaymentError> {
        if patch.has_fields_besides_status() {
            return Err(PaymentError::validation(
                "A cancellation cannot carry other payment fields",
            ));
        }
        if register.status == PaymentStatus::Pending {
            return Err(PaymentError::validation(
                "A pending payment register cannot be canceled",
            ));
        }

        let mut register = register;
        register.status = PaymentStatus::Canceled;
        self.persist(turn, register).await
    }

    async fn apply_update(
        &self,
        turn: Turn,
        register: PaymentRegister,
        patch: &PaymentRegisterPatch,
        requested_status: Option<PaymentStatus>,
    ) -> Result<PaymentRegisterView, PaymentError> {
        if requested_status == Some(PaymentStatus::Pending) {
            return Err(PaymentError::validation(
                "Payment status cannot be set back to PENDING",
            ));
        }

        let requested_method = patch
            .method
            .as_deref()
            .map(PaymentMethod::parse)
            .transpose()?;

        if let Some(amount) = patch.payment_amount {
            validate_ceiling(amount, "Payment amount")?;
        }
        if let Some(copayment) = patch.copayment_amount {
            validate_ceiling(copayment, "Copayment amount")?;
        }

        // Coupling is validated against the effective target status, before
        // any stored state is touched.
        let target_status = requested_status.unwrap_or(register.status);

        if let Some(method) = requested_method {
            if let Some(required_status) = method.required_status() {
                if target_status != required_status {
                    return Err(PaymentError::validation(format!(
                        "Payment method {} requires payment status {}",
                        method, required_status
                    )));
                }
            }
        }
        if let Some(required_method) = target_status.required_method() {
            if let Some(method) = requested_method {
                if method != required_method {
                    return Err(PaymentError::validation(format!(
                        "Payment status {} requires payment method {}",
                        target_status, required_method
                    )));
                }
            }
        }

        if let Some(amount) = patch.payment_amount {
            if amount <= dec!(0) {
                return Err(if target_status == PaymentStatus::Bonus {
                    PaymentError::validation("Bonus payment amount must be greater than zero")
                } else {
                    PaymentError::validation("Payment amount must be greater than zero")
                });
            }
        }

        // The effective copayment falls back to the stored value.
        let effective_copayment = patch.copayment_amount.or(register.copayment_amount);
        if target_status == PaymentStatus::HealthInsurance {
            match effective_copayment {
                None => {
                    return Err(PaymentError::validation(
                        "Copayment amount is required when payment status is HEALTH INSURANCE",
                    ))
                }
                Some(copayment) if copayment < dec!(0) => {
                    return Err(PaymentError::validation("Copayment amount cannot be negative"))
                }
                _ => {}
            }
        }

        let mut register = register;
        if let Some(status) = requested_status {
            register.status = status;
        }
        if let Some(amount) = patch.payment_amount {
            register.payment_amount = Some(amount);
        }
        if let Some(method) = requested_method {
            register.method = Some(method);
        }
        // Insurance and bonus settlements force their method even when none
        // was supplied; a conflicting explicit method was rejected above.
        if let Some(required_method) = register.status.required_method() {
            register.method = Some(required_method);
        }

        register.last_update = patch
            .paid_at
            .map(|instant| instant.with_timezone(&Utc))
            .unwrap_or_else(Utc::now);

        if register.status == PaymentStatus::HealthInsurance {
            if let (Some(copayment), Some(amount)) = (effective_copayment, register.payment_amount) {
                if !self.copayment_bound.allows(copayment, amount) {
                    return Err(PaymentError::validation(
                        "Copayment amount must be less than or equal to payment amount",
                    ));
                }
            }
            register.copayment_amount = effective_copayment;
        } else {
            if patch.copayment_amount.is_some() {
                return Err(PaymentError::validation(
                    "Copayment amount can only be set when payment status is HEALTH INSURANCE",
                ));
            }
            register.copayment_amount = None;
        }

        self.persist(turn, register).await
    }

    /// Saves the register and recomputes the turn's back-reference. The
    /// adapter commits both writes in one transaction.
    async fn persist(
        &self,
        mut turn: Turn,
        register: PaymentRegister,
    ) -> Result<PaymentRegisterView, PaymentError> {
        let saved = self.registers.save(register).await?;
        turn.payment_register_id = Some(saved.id);
        self.turns.save(turn).await?;

        debug!(register_id = %saved.id, status = %saved.status, "payment register saved");
        Ok(PaymentRegisterView::from(&saved))
    }

    async fn load_turn(&self, turn_id: TurnId) -> Result<Turn, PaymentError> {
        self.turns
            .find_by_id(turn_id)
            .await?
            .ok_or_else(|| PaymentError::not_found("Turn not found"))
    }

    async fn load_register(&self, turn_id: TurnId) -> Result<PaymentRegister, PaymentError> {
        self.registers
            .find_by_turn_id(turn_id)
            .await?
            .ok_or_else(|| PaymentError::not_found("Payment register not found for this turn"))
    }
}

fn validate_ceiling(amount: Decimal, label: &str) -> Result<(), PaymentError> {
    if amount >= MAX_MONETARY_AMOUNT {
        return Err(PaymentError::validation(format!(
            "{} must be less than {}",
            label, MAX_MONETARY_AMOUNT
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copayment_bound_policies() {
        assert!(CopaymentBound::Inclusive.allows(dec!(100), dec!(100)));
        assert!(!CopaymentBound::Exclusive.allows(dec!(100), dec!(100)));
        assert!(CopaymentBound::Exclusive.allows(dec!(99.99), dec!(100)));
        assert!(!CopaymentBound::Inclusive.allows(dec!(100.01), dec!(100)));
    }

    #[test]
    fn test_ceiling_is_exclusive() {
        assert!(validate_ceiling(dec!(9_999_999.99), "Payment amount").is_ok());
        let err = validate_ceiling(dec!(10_000_000), "Payment amount").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Payment amount must be less than 10000000"
        );
    }
}

//! Authorization gate
//!
//! Stateless predicates over `(actor, turn)`. Mutation (update/cancel) is
//! restricted to admins and the doctor who owns the turn; reads additionally
//! admit the booking patient. Denial carries a human-readable reason. An
//! absent (unauthenticated) actor is the transport boundary's concern and
//! never reaches these functions.

use serde::{Deserialize, Serialize};

use core_kernel::UserId;

use crate::error::PaymentError;
use crate::turn::Turn;

/// Role vocabulary for authenticated users
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "ADMIN")]
    Admin,
    #[serde(rename = "DOCTOR")]
    Doctor,
    #[serde(rename = "PATIENT")]
    Patient,
}

/// The authenticated identity invoking an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: UserId,
    pub role: Role,
}

impl Actor {
    pub fn new(id: UserId, role: Role) -> Self {
        Self { id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn is_doctor(&self) -> bool {
        self.role == Role::Doctor
    }

    pub fn is_patient(&self) -> bool {
        self.role == Role::Patient
    }

    /// True if the actor is the doctor assigned to the turn
    pub fn owns_turn_as_doctor(&self, turn: &Turn) -> bool {
        self.is_doctor() && self.id == turn.doctor_id
    }

    /// True if the actor is the patient who booked the turn
    pub fn owns_turn_as_patient(&self, turn: &Turn) -> bool {
        self.is_patient() && self.id == turn.patient_id
    }
}

/// Gate for update/cancel: admin, or the doctor who owns the turn
pub fn authorize_mutation(actor: &Actor, turn: &Turn) -> Result<(), PaymentError> {
    if actor.is_admin() || actor.owns_turn_as_doctor(turn) {
        return Ok(());
    }
    Err(PaymentError::forbidden(
        "You are not allowed to update this payment register",
    ))
}

/// Gate for reads: admin, owning doctor, or owning patient
pub fn authorize_read(actor: &Actor, turn: &Turn) -> Result<(), PaymentError> {
    if actor.is_admin() || actor.owns_turn_as_doctor(turn) || actor.owns_turn_as_patient(turn) {
        return Ok(());
    }
    Err(PaymentError::forbidden(
        "You do not have access to this payment information",
    ))
}

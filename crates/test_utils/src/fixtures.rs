//! Pre-built fixtures for common payment register scenarios

use std::sync::Arc;

use core_kernel::{TurnId, UserId};
use domain_payment::{
    Actor, PaymentRegister, PaymentRegisterService, Role, Turn, TurnStatus,
};

use crate::builders::TurnBuilder;
use crate::memory::{InMemoryPaymentRegisterRepository, InMemoryTurnRepository};

/// A wired service over in-memory stores, plus the handles the tests
/// need to seed and inspect state.
pub struct PaymentTestContext {
    pub turns: Arc<InMemoryTurnRepository>,
    pub registers: Arc<InMemoryPaymentRegisterRepository>,
    pub service: PaymentRegisterService,
}

impl Default for PaymentTestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl PaymentTestContext {
    pub fn new() -> Self {
        let turns = InMemoryTurnRepository::new();
        let registers = InMemoryPaymentRegisterRepository::new();
        let service = PaymentRegisterService::new(turns.clone(), registers.clone());
        Self {
            turns,
            registers,
            service,
        }
    }

    /// Seeds a completed turn and returns it with the actor owning it
    pub fn seed_completed_turn(&self) -> (Turn, Actor) {
        let doctor = doctor_actor();
        let turn = TurnBuilder::new().with_doctor(doctor.id).build();
        self.turns.insert(turn.clone());
        (turn, doctor)
    }

    /// Seeds a turn in the given state and returns it with its owning doctor
    pub fn seed_turn_with_status(&self, status: TurnStatus) -> (Turn, Actor) {
        let doctor = doctor_actor();
        let turn = TurnBuilder::new()
            .with_status(status)
            .with_doctor(doctor.id)
            .build();
        self.turns.insert(turn.clone());
        (turn, doctor)
    }

    /// Seeds a register and links the turn's back-reference to it
    pub fn seed_register(&self, register: PaymentRegister) {
        let turn_id = register.turn_id;
        let id = self.registers.insert(register);
        if let Some(mut turn) = self.turns.get(turn_id) {
            turn.payment_register_id = Some(id);
            self.turns.insert(turn);
        }
    }

    /// The register currently stored for a turn
    pub fn stored_register(&self, turn_id: TurnId) -> PaymentRegister {
        self.registers
            .get(turn_id)
            .expect("register should be stored")
    }
}

/// A fresh admin actor
pub fn admin_actor() -> Actor {
    Actor::new(UserId::new(), Role::Admin)
}

/// A fresh doctor actor
pub fn doctor_actor() -> Actor {
    Actor::new(UserId::new(), Role::Doctor)
}

/// A fresh patient actor
pub fn patient_actor() -> Actor {
    Actor::new(UserId::new(), Role::Patient)
}

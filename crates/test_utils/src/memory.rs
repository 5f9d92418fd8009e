//! In-memory repository adapters
//!
//! HashMap-backed implementations of the domain ports for tests. Each store
//! sits behind a `Mutex`; all operations are single lookups or single
//! inserts, so lock scope stays within one call.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use core_kernel::{PortError, RegisterId, TurnId};
use domain_payment::{PaymentRegister, PaymentRegisterRepository, Turn, TurnRepository};

/// In-memory turn store
#[derive(Default)]
pub struct InMemoryTurnRepository {
    turns: Mutex<HashMap<TurnId, Turn>>,
}

impl InMemoryTurnRepository {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Seeds a turn, returning its id
    pub fn insert(&self, turn: Turn) -> TurnId {
        let id = turn.id;
        self.turns.lock().unwrap().insert(id, turn);
        id
    }

    /// Snapshot of a stored turn, for assertions on the back-reference
    pub fn get(&self, id: TurnId) -> Option<Turn> {
        self.turns.lock().unwrap().get(&id).cloned()
    }
}

#[async_trait]
impl TurnRepository for InMemoryTurnRepository {
    async fn find_by_id(&self, id: TurnId) -> Result<Option<Turn>, PortError> {
        Ok(self.turns.lock().unwrap().get(&id).cloned())
    }

    async fn save(&self, turn: Turn) -> Result<Turn, PortError> {
        self.turns.lock().unwrap().insert(turn.id, turn.clone());
        Ok(turn)
    }
}

/// In-memory payment register store, keyed by owning turn
#[derive(Default)]
pub struct InMemoryPaymentRegisterRepository {
    registers: Mutex<HashMap<TurnId, PaymentRegister>>,
}

impl InMemoryPaymentRegisterRepository {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Seeds a register, returning its id
    pub fn insert(&self, register: PaymentRegister) -> RegisterId {
        let id = register.id;
        self.registers
            .lock()
            .unwrap()
            .insert(register.turn_id, register);
        id
    }

    /// Snapshot of the register stored for a turn
    pub fn get(&self, turn_id: TurnId) -> Option<PaymentRegister> {
        self.registers.lock().unwrap().get(&turn_id).cloned()
    }
}

#[async_trait]
impl PaymentRegisterRepository for InMemoryPaymentRegisterRepository {
    async fn exists_by_turn_id(&self, turn_id: TurnId) -> Result<bool, PortError> {
        Ok(self.registers.lock().unwrap().contains_key(&turn_id))
    }

    async fn find_by_turn_id(&self, turn_id: TurnId) -> Result<Option<PaymentRegister>, PortError> {
        Ok(self.registers.lock().unwrap().get(&turn_id).cloned())
    }

    async fn save(&self, register: PaymentRegister) -> Result<PaymentRegister, PortError> {
        self.registers
            .lock()
            .unwrap()
            .insert(register.turn_id, register.clone());
        Ok(register)
    }
}

//! Payment domain ports
//!
//! Repository traits the engine depends on. Adapters implement them against
//! the actual store; `test_utils` provides in-memory implementations for the
//! test suites. The engine performs one logical transaction per operation
//! (load, validate, save register, save turn back-reference); the adapter is
//! expected to commit those writes atomically.

use async_trait::async_trait;

use core_kernel::{PortError, TurnId};

use crate::register::PaymentRegister;
use crate::turn::Turn;

/// Read/write access to turns
#[async_trait]
pub trait TurnRepository: Send + Sync {
    /// Looks a turn up by its identifier
    async fn find_by_id(&self, id: TurnId) -> Result<Option<Turn>, PortError>;

    /// Persists the turn (used to write the register back-reference)
    async fn save(&self, turn: Turn) -> Result<Turn, PortError>;
}

/// Read/write access to payment registers
#[async_trait]
pub trait PaymentRegisterRepository: Send + Sync {
    /// True if a register already exists for the turn
    async fn exists_by_turn_id(&self, turn_id: TurnId) -> Result<bool, PortError>;

    /// Looks the register up by its owning turn
    async fn find_by_turn_id(&self, turn_id: TurnId) -> Result<Option<PaymentRegister>, PortError>;

    /// Persists the register and returns the stored record
    async fn save(&self, register: PaymentRegister) -> Result<PaymentRegister, PortError>;
}

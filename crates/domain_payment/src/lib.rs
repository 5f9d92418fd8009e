//! Payment Register Domain
//!
//! Billing records for completed turns (appointments) in the scheduling
//! platform. This crate owns the payment-register state machine: which
//! status/method/amount combinations are legal, when a register may be
//! created, updated, or canceled, and who may do so.
//!
//! # Components
//!
//! - [`service::PaymentRegisterService`] - the validation and transition
//!   engine behind create/read/update/cancel
//! - [`authorization`] - role and ownership gate over `(actor, turn)`
//! - [`ports`] - repository traits the engine consumes
//!
//! Transport, scheduling, authentication, and persistence mechanics are
//! external collaborators.

pub mod authorization;
pub mod error;
pub mod ports;
pub mod register;
pub mod service;
pub mod turn;
pub mod view;

pub use authorization::{authorize_mutation, authorize_read, Actor, Role};
pub use error::PaymentError;
pub use ports::{PaymentRegisterRepository, TurnRepository};
pub use register::{PaymentMethod, PaymentRegister, PaymentStatus, MAX_MONETARY_AMOUNT};
pub use service::{CopaymentBound, PaymentRegisterService};
pub use turn::{Turn, TurnStatus};
pub use view::{PaymentRegisterPatch, PaymentRegisterView};

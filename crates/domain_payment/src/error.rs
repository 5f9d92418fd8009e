//! Payment domain errors
//!
//! Every precondition failure in the payment register engine maps to one of
//! these variants. The surrounding transport layer translates the variant to
//! a status code; the engine only supplies the kind and a descriptive message.

use core_kernel::PortError;
use thiserror::Error;

/// Errors that can occur in the payment register domain
#[derive(Debug, Error)]
pub enum PaymentError {
    /// The turn or its payment register was not found
    #[error("{0}")]
    NotFound(String),

    /// A payment register already exists for the turn
    #[error("{0}")]
    Conflict(String),

    /// The actor is not allowed to perform this operation
    #[error("{0}")]
    Forbidden(String),

    /// The turn is not in a state that admits payment mutation
    #[error("{0}")]
    InvalidTurnState(String),

    /// The request payload violates a business rule
    #[error("{0}")]
    Validation(String),

    /// The underlying repository failed
    #[error("Repository error: {0}")]
    Port(#[from] PortError),
}

impl PaymentError {
    pub fn not_found(message: impl Into<String>) -> Self {
        PaymentError::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        PaymentError::Conflict(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        PaymentError::Forbidden(message.into())
    }

    pub fn invalid_turn_state(message: impl Into<String>) -> Self {
        PaymentError::InvalidTurnState(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        PaymentError::Validation(message.into())
    }
}

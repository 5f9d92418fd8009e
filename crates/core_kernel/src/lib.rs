//! Core Kernel - Foundational types for the payment register system
//!
//! This crate provides the building blocks used across the domain modules:
//! - Strongly-typed identifiers for turns, registers, and users
//! - The port error type shared by all repository abstractions

pub mod identifiers;
pub mod ports;

pub use identifiers::{RegisterId, TurnId, UserId};
pub use ports::PortError;

//! Test Utilities Crate
//!
//! Shared test infrastructure for the payment register test suite.
//!
//! # Modules
//!
//! - `memory`: in-memory repository adapters implementing the domain ports
//! - `builders`: builder patterns for test data construction
//! - `fixtures`: pre-built actors, turns, and registers for common scenarios

pub mod builders;
pub mod fixtures;
pub mod memory;

pub use builders::*;
pub use fixtures::*;
pub use memory::*;

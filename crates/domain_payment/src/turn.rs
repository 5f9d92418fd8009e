//! Turn reference
//!
//! The turn (a scheduled appointment) is owned by the scheduling domain;
//! this crate only reads its lifecycle status and ownership links, and
//! writes the derived back-reference to its payment register.

use serde::{Deserialize, Serialize};

use core_kernel::{RegisterId, TurnId, UserId};

/// Turn lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnStatus {
    /// Booked, visit has not happened yet
    #[serde(rename = "SCHEDULED")]
    Scheduled,
    /// Visit took place; the only state that admits payment mutation
    #[serde(rename = "COMPLETED")]
    Completed,
    /// Appointment was called off
    #[serde(rename = "CANCELED")]
    Canceled,
}

/// A scheduled appointment between a patient and a doctor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    /// Unique identifier
    pub id: TurnId,
    /// Lifecycle status
    pub status: TurnStatus,
    /// Assigned doctor, used for ownership checks
    pub doctor_id: UserId,
    /// Booking patient, used for ownership checks on reads
    pub patient_id: UserId,
    /// Cached link to the turn's payment register. Derived convenience
    /// only; the register's own `turn_id` is authoritative. Recomputed on
    /// every successful register save.
    pub payment_register_id: Option<RegisterId>,
}

impl Turn {
    /// Creates a turn in the given lifecycle state with no register yet
    pub fn new(status: TurnStatus, doctor_id: UserId, patient_id: UserId) -> Self {
        Self {
            id: TurnId::new(),
            status,
            doctor_id,
            patient_id,
            payment_register_id: None,
        }
    }
}

//! Ports and Adapters Infrastructure
//!
//! The domain crates access persistence through port traits (hexagonal
//! architecture). Each domain defines its own port trait; adapters implement
//! them against a real database or an in-memory store for tests. All adapters
//! report failures through the unified [`PortError`] defined here, so domain
//! services handle storage faults consistently regardless of the backend.

use thiserror::Error;

/// Error type for port operations
#[derive(Debug, Error)]
pub enum PortError {
    /// Connection to the underlying system failed
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The stored data could not be read or written in the expected shape
    #[error("Data error: {message}")]
    Data { message: String },
}

impl PortError {
    /// Creates a connection error without an underlying source
    pub fn connection(message: impl Into<String>) -> Self {
        PortError::Connection {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a data error
    pub fn data(message: impl Into<String>) -> Self {
        PortError::Data {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PortError::connection("pool exhausted");
        assert_eq!(err.to_string(), "Connection error: pool exhausted");

        let err = PortError::data("missing column");
        assert_eq!(err.to_string(), "Data error: missing column");
    }
}

//! Protocol error types.

use thiserror::Error;

/// Result alias for protocol operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;

/// Errors produced while encoding, decoding, or validating sync messages.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The remote reported an error in its reply body.
    #[error("remote error: {message}")]
    Remote {
        /// The remote's error text.
        message: String,
    },

    /// A message or row did not match the expected shape.
    #[error("malformed {context}: {reason}")]
    Malformed {
        /// Which message or section failed to decode.
        context: String,
        /// Decoder error text.
        reason: String,
    },
}

impl ProtocolError {
    /// Creates a [`ProtocolError::Remote`].
    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote {
            message: message.into(),
        }
    }

    /// Creates a [`ProtocolError::Malformed`] with decode context.
    pub fn malformed(context: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::Malformed {
            context: context.into(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_carry_context() {
        let err = ProtocolError::remote("sheet unavailable");
        assert_eq!(err.to_string(), "remote error: sheet unavailable");

        let err = ProtocolError::malformed("getAll reply", "expected an object");
        assert_eq!(
            err.to_string(),
            "malformed getAll reply: expected an object"
        );
    }
}

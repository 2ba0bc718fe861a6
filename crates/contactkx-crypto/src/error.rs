//! Error types for key-exchange primitive operations

use thiserror::Error;

/// Errors from the key-exchange primitive and key parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KxError {
    /// Peer public key produced an all-zero shared secret
    ///
    /// Happens for the identity element and other low-order points. The
    /// session keys would be predictable, so the exchange is refused.
    #[error("key exchange rejected: shared secret is not contributory")]
    NonContributory,

    /// Comparator called with buffers of different lengths
    #[error("comparator input length mismatch: {left} bytes vs {right} bytes")]
    InvalidComparatorInput {
        /// Length of the first buffer
        left: usize,
        /// Length of the second buffer
        right: usize,
    },

    /// Invalid key material length
    #[error("invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength {
        /// Expected key length
        expected: usize,
        /// Actual key length
        actual: usize,
    },
}

impl KxError {
    /// Returns true if the error was caused by the peer's key material.
    ///
    /// Peer-caused errors should be reported and the key rejected. The other
    /// variants indicate a programming error in the caller.
    pub fn is_peer_fault(&self) -> bool {
        match self {
            Self::NonContributory => true,
            Self::InvalidComparatorInput { .. } | Self::InvalidKeyLength { .. } => false,
        }
    }
}

//! Error types for contact token derivation.
//!
//! Every error is local to a single peer relationship. A failure for one peer
//! never aborts derivation for the others, and nothing here terminates the
//! process.

use contactkx_crypto::KxError;
use thiserror::Error;

use crate::{agreement::Direction, role::Role};

/// Errors from deriving contact tokens for one peer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContactError {
    /// Own and peer public keys compare equal
    ///
    /// Two distinct parties never share a public key under correct key
    /// generation. Indicates a reused key or a generation defect.
    #[error("own and peer public keys are identical ({key_id})")]
    IdenticalPublicKeys {
        /// Short identifier of the shared key
        key_id: String,
    },

    /// The key-exchange primitive rejected the peer key
    #[error("key exchange failed as {role}: {source}")]
    KeyExchangeFailed {
        /// Role we were deriving as
        role: Role,
        /// Rejection reported by the primitive
        #[source]
        source: KxError,
    },

    /// Key material could not be parsed or compared
    ///
    /// Only length errors land here. Build it through
    /// [`ContactError::from_key_error`] so primitive rejections stay
    /// `KeyExchangeFailed`.
    #[error("invalid key material: {0}")]
    InvalidKey(KxError),
}

impl ContactError {
    /// Classify a primitive error raised while deriving as `role`.
    ///
    /// Rejections of the peer key become `KeyExchangeFailed`; length
    /// errors become `InvalidKey`.
    pub fn from_key_error(source: KxError, role: Role) -> Self {
        match source {
            KxError::NonContributory => Self::KeyExchangeFailed { role, source },
            KxError::InvalidComparatorInput { .. } | KxError::InvalidKeyLength { .. } => {
                Self::InvalidKey(source)
            },
        }
    }

    /// Returns true if this error is fatal for the peer relationship.
    ///
    /// No retry with the same keys can succeed. Fatal errors are still
    /// local: other peer relationships are unaffected.
    pub fn is_fatal(&self) -> bool {
        match self {
            // Key reuse or a generation defect
            Self::IdenticalPublicKeys { .. } => true,

            // Degenerate peer key
            Self::KeyExchangeFailed { .. } => true,

            // Malformed input from the caller
            Self::InvalidKey(_) => true,
        }
    }

    /// Returns true if the peer's key caused the failure.
    ///
    /// These should be reported and the peer rejected. Other errors point
    /// to local misconfiguration or a bug in the caller.
    pub fn is_peer_fault(&self) -> bool {
        match self {
            Self::KeyExchangeFailed { source, .. } => source.is_peer_fault(),
            Self::IdenticalPublicKeys { .. } | Self::InvalidKey(_) => false,
        }
    }
}

/// Errors from checking that two parties derived matching tokens.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AgreementError {
    /// One side could not derive its tokens
    #[error(transparent)]
    Contact(#[from] ContactError),

    /// One side's transmit token differs from the other side's receive token
    #[error("token mismatch in {direction} direction")]
    TokenMismatch {
        /// Direction whose tokens disagree
        direction: Direction,
    },

    /// A party's receive and transmit tokens are identical
    #[error("receive and transmit tokens are identical")]
    DegenerateTokens,
}

//! Contact Key Exchange Cryptographic Primitives
//!
//! Building blocks for deriving contact tokens between two parties that only
//! know each other's long-term public keys. Pure functions with deterministic
//! outputs. Callers provide the random seed for key generation so tests can be
//! reproduced exactly.
//!
//! # Construction
//!
//! The primitive follows the libsodium `crypto_kx` construction. Both sides
//! hash the same transcript, and the role decides which half of the digest is
//! used for which direction.
//!
//! ```text
//! own secret ─┐
//!             ├─ X25519 ──► q (rejected if all-zero)
//! peer public ┘
//!
//! BLAKE2b-512(q || initiator_pk || responder_pk)
//!        │
//!        ├─ bytes  0..32 → initiator receive / responder transmit
//!        └─ bytes 32..64 → initiator transmit / responder receive
//! ```
//!
//! # Security
//!
//! Key Hygiene:
//! - Secret keys and session keys are zeroized on drop
//! - `Debug` output of secret material is redacted
//! - The X25519 shared secret and the digest are wiped after splitting
//!
//! Degenerate Keys:
//! - A low-order or all-zero peer key yields an all-zero shared secret
//! - Such exchanges are rejected with [`KxError::NonContributory`] instead of
//!   producing weak session keys

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod compare;
pub mod error;
pub mod keys;
pub mod kx;

pub use compare::{compare_bytes, compare_slices};
pub use error::KxError;
pub use keys::{
    KeyPair, PUBLIC_KEY_BYTES, PublicKey, SECRET_KEY_BYTES, SESSION_KEY_BYTES, SecretKey,
    SessionKey, SessionKeyPair,
};
pub use kx::{KeyExchange, X25519Blake2b};

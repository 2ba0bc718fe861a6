//! Contact token derivation between two parties.
//!
//! Two parties that only know each other's long-term public keys derive a
//! pair of directional session keys ("contact tokens") without any
//! negotiation message. Symmetry is broken by comparing the public keys: the
//! smaller key derives as initiator, the larger as responder, so both sides
//! independently land on the same two keys.
//!
//! ```text
//! Alice (pk_a, sk_a)                     Bob (pk_b, sk_b)
//!        │  publish pk_a  ──────────────►       │
//!        │       ◄──────────────  publish pk_b  │
//!        ▼                                      ▼
//! Role::resolve(pk_a, pk_b)            Role::resolve(pk_b, pk_a)
//!        │ (opposite roles)                     │
//!        ▼                                      ▼
//! (receive_a, transmit_a)              (receive_b, transmit_b)
//!
//! receive_a == transmit_b,  transmit_a == receive_b
//! ```
//!
//! # Failure Isolation
//!
//! All errors are returned per peer relationship. An identical or degenerate
//! peer key fails that one derivation and nothing else.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod agreement;
pub mod env;
pub mod error;
pub mod publish;
pub mod role;
pub mod tokens;

pub use agreement::{Contact, Direction, establish_contact, verify_agreement};
pub use env::{Environment, SystemEnv};
pub use error::{AgreementError, ContactError};
pub use publish::{HexPublisher, Publisher};
pub use role::Role;
pub use tokens::{derive_for_peers, generate_contact_tokens, generate_keypair};

//! Fixed-size key types
//!
//! Public keys are freely shareable and comparable. Secret keys and session
//! keys never appear in `Debug` output and are zeroized when dropped.

use std::{cmp::Ordering, fmt};

use zeroize::Zeroize;

use crate::{compare::compare_bytes, error::KxError};

/// Public key size in bytes
pub const PUBLIC_KEY_BYTES: usize = 32;

/// Secret key size in bytes
pub const SECRET_KEY_BYTES: usize = 32;

/// Session key (contact token) size in bytes
pub const SESSION_KEY_BYTES: usize = 32;

/// A party's public key.
///
/// Ordered lexicographically by byte value. This ordering is what assigns
/// the initiator and responder roles between two parties.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey([u8; PUBLIC_KEY_BYTES]);

impl PublicKey {
    /// Wrap raw public key bytes.
    pub const fn from_bytes(bytes: [u8; PUBLIC_KEY_BYTES]) -> Self {
        Self(bytes)
    }

    /// Parse a public key received as untyped bytes.
    ///
    /// # Errors
    ///
    /// - `InvalidKeyLength`: the slice is not exactly [`PUBLIC_KEY_BYTES`] long
    pub fn from_slice(bytes: &[u8]) -> Result<Self, KxError> {
        let array: [u8; PUBLIC_KEY_BYTES] = bytes.try_into().map_err(|_| {
            KxError::InvalidKeyLength { expected: PUBLIC_KEY_BYTES, actual: bytes.len() }
        })?;
        Ok(Self(array))
    }

    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_BYTES] {
        &self.0
    }

    /// Uppercase hex encoding of the full key.
    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
    }

    /// Lowercase hex of the first 4 bytes, for log fields.
    pub fn short_id(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl From<[u8; PUBLIC_KEY_BYTES]> for PublicKey {
    fn from(bytes: [u8; PUBLIC_KEY_BYTES]) -> Self {
        Self(bytes)
    }
}

impl Ord for PublicKey {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_bytes(&self.0, &other.0)
    }
}

impl PartialOrd for PublicKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", hex::encode(self.0))
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// A party's secret key.
///
/// Owned exclusively by the party that generated it. Never cloned, never
/// printed.
pub struct SecretKey([u8; SECRET_KEY_BYTES]);

impl SecretKey {
    /// Wrap raw secret key bytes.
    pub fn from_bytes(bytes: [u8; SECRET_KEY_BYTES]) -> Self {
        Self(bytes)
    }

    /// Raw key bytes, for the key-exchange primitive only.
    pub fn expose_secret(&self) -> &[u8; SECRET_KEY_BYTES] {
        &self.0
    }
}

impl Drop for SecretKey {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(<redacted>)")
    }
}

/// A party's long-term key pair.
///
/// Immutable after generation.
pub struct KeyPair {
    public: PublicKey,
    secret: SecretKey,
}

impl KeyPair {
    /// Assemble a key pair.
    ///
    /// The caller guarantees that `public` belongs to `secret`. Prefer
    /// [`crate::KeyExchange::keypair_from_seed`].
    pub fn new(public: PublicKey, secret: SecretKey) -> Self {
        Self { public, secret }
    }

    /// Shareable half of the pair.
    pub fn public(&self) -> &PublicKey {
        &self.public
    }

    /// Secret half of the pair.
    pub fn secret(&self) -> &SecretKey {
        &self.secret
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public", &self.public)
            .field("secret", &self.secret)
            .finish()
    }
}

/// One directional session key (a contact token).
#[derive(Clone)]
pub struct SessionKey([u8; SESSION_KEY_BYTES]);

impl SessionKey {
    /// Wrap raw session key bytes.
    pub fn from_bytes(bytes: [u8; SESSION_KEY_BYTES]) -> Self {
        Self(bytes)
    }

    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8; SESSION_KEY_BYTES] {
        &self.0
    }

    /// Uppercase hex encoding. Only call when the token is meant to be shown.
    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
    }
}

impl PartialEq for SessionKey {
    fn eq(&self, other: &Self) -> bool {
        compare_bytes(&self.0, &other.0) == Ordering::Equal
    }
}

impl Eq for SessionKey {}

impl Drop for SessionKey {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionKey(<redacted>)")
    }
}

/// Directional session keys derived by one party for one peer.
///
/// For two parties A and B, `A.receive == B.transmit` and
/// `A.transmit == B.receive`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionKeyPair {
    receive: SessionKey,
    transmit: SessionKey,
}

impl SessionKeyPair {
    /// Pair up a receive and a transmit key.
    pub fn new(receive: SessionKey, transmit: SessionKey) -> Self {
        Self { receive, transmit }
    }

    /// Key for messages from the peer to us.
    pub fn receive(&self) -> &SessionKey {
        &self.receive
    }

    /// Key for messages from us to the peer.
    pub fn transmit(&self) -> &SessionKey {
        &self.transmit
    }
}

//! Out-of-band publication of public keys
//!
//! Role resolution never depends on how a public key reaches the peer. The
//! [`Publisher`] trait is the seam for whatever broadcast medium carries it
//! (a radio advertisement in a deployment, a terminal in the demo).

use std::io::{self, Write};

use contactkx_crypto::PublicKey;
use tracing::trace;

/// Channel that advertises a public key to nearby peers.
pub trait Publisher {
    /// Publish `key` under a human-readable `label`.
    fn publish(&mut self, label: &str, key: &PublicKey) -> io::Result<()>;
}

/// Publisher writing `label:<TAB>HEX` lines to any writer.
///
/// Hex is uppercase, two digits per byte.
#[derive(Debug)]
pub struct HexPublisher<W> {
    writer: W,
}

impl<W: Write> HexPublisher<W> {
    /// Publish to `writer`.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Publisher for HexPublisher<W> {
    fn publish(&mut self, label: &str, key: &PublicKey) -> io::Result<()> {
        trace!(%label, key = %key.short_id(), "publishing public key");
        writeln!(self.writer, "{label}:\t{}", key.to_hex())
    }
}

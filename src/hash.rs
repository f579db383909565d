//! The black-box hash collaborator (§6): double-SHA256 and HASH160.

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// A 32-byte double-SHA256 digest.
pub type Hash256 = [u8; 32];

/// A 20-byte RIPEMD160(SHA256(_)) digest.
pub type Hash160Digest = [u8; 20];

/// `Hash(bytes) = SHA256(SHA256(bytes))`.
pub fn hash256(data: &[u8]) -> Hash256 {
    let first = Sha256::digest(data);
    let second = Sha256::digest(first);
    let mut out = [0u8; 32];
    out.copy_from_slice(&second);
    out
}

/// `Hash160(bytes) = RIPEMD160(SHA256(bytes))`.
pub fn hash160(data: &[u8]) -> Hash160Digest {
    let sha = Sha256::digest(data);
    let ripemd = Ripemd160::digest(sha);
    let mut out = [0u8; 20];
    out.copy_from_slice(&ripemd);
    out
}

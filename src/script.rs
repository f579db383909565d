//! Script byte container and builder coercion rules (C2).
//!
//! A [`Script`] is an opaque byte sequence. Decoding into opcodes/pushes is
//! on demand via [`crate::decoder`]; this module only owns construction and
//! concatenation.

use crate::error::Result;
use crate::opcodes::Opcode;
use serde::{Deserialize, Serialize};

/// A serialized script: a byte sequence interpreted as an opcode stream.
///
/// Consensus requires byte-level fidelity, including non-minimal pushes, so
/// this type carries raw bytes rather than a decoded opcode list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Script(Vec<u8>);

/// An item that can be coerced into script bytes per §4.2's builder rules.
pub enum ScriptItem<'a> {
    Op(Opcode),
    Int(i64),
    Data(&'a [u8]),
}

impl Script {
    /// Construct a script directly from raw bytes, stored verbatim.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Script(bytes)
    }

    /// Construct a script from an ordered sequence of items, each coerced
    /// and concatenated per §4.2.
    pub fn from_items(items: &[ScriptItem<'_>]) -> Result<Self> {
        let mut out = Vec::new();
        for item in items {
            out.extend_from_slice(&coerce(item)?);
        }
        Ok(Script(out))
    }

    /// Borrow the underlying bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume the script, returning the underlying bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Concatenate `item`, coerced per §4.2, onto a copy of this script.
    /// There is no `join`: joining a collection of scripts together is not
    /// semantically meaningful for a byte-level script value.
    pub fn append(&self, item: &ScriptItem<'_>) -> Result<Script> {
        let mut out = self.0.clone();
        out.extend_from_slice(&coerce(item)?);
        Ok(Script(out))
    }
}

impl AsRef<[u8]> for Script {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Script {
    fn from(bytes: Vec<u8>) -> Self {
        Script(bytes)
    }
}

impl From<&[u8]> for Script {
    fn from(bytes: &[u8]) -> Self {
        Script(bytes.to_vec())
    }
}

impl From<Opcode> for Script {
    fn from(op: Opcode) -> Self {
        Script(vec![op.0])
    }
}

fn coerce(item: &ScriptItem<'_>) -> Result<Vec<u8>> {
    match item {
        ScriptItem::Op(op) => Ok(vec![op.0]),
        ScriptItem::Int(n) => coerce_int(*n),
        ScriptItem::Data(d) => crate::opcodes::encode_op_pushdata(d),
    }
}

fn coerce_int(n: i64) -> Result<Vec<u8>> {
    if (0..=16).contains(&n) {
        return Ok(vec![crate::opcodes::encode_op_n(n as u8)?.0]);
    }
    if n == -1 {
        return Ok(vec![crate::opcodes::OP_1NEGATE.0]);
    }
    crate::opcodes::encode_op_pushdata(&minimal_signed_magnitude(n))
}

/// Encode `n` as little-endian absolute-value magnitude bytes with a sign
/// bit in the most-significant byte, appending an extra zero/`0x80` byte
/// when the magnitude's own high bit would otherwise collide with it.
///
/// This is the "minimal signed magnitude" used to push arbitrary (not
/// `[-1, 16]`) integers as script data (the reference implementation's
/// `bn2vch`).
pub fn minimal_signed_magnitude(n: i64) -> Vec<u8> {
    let abs = n.unsigned_abs();
    let bit_length = u64::BITS - abs.leading_zeros();
    let nbytes = (bit_length as usize + 1 + 7) / 8;
    let full = abs.to_le_bytes();
    let mut out = full[..nbytes.min(8)].to_vec();
    out.resize(nbytes, 0);
    if n < 0 {
        *out.last_mut().unwrap() |= 0x80;
    }
    out
}

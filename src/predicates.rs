//! Structural predicates recognizing standard output/witness templates (C4).
//!
//! All predicates operate on raw bytes. Per §7, predicates that could
//! otherwise propagate a decoder error (`is_valid`, `is_push_only`,
//! `has_canonical_pushes`) swallow it and return `false` instead, matching
//! the consensus-visible behavior of the reference implementation.

use crate::decoder::RawIter;
use crate::opcodes::{Opcode, OP_EQUAL, OP_HASH160, OP_PUSHDATA1, OP_PUSHDATA2, OP_PUSHDATA4, OP_RETURN, OP_16};
use crate::script::Script;

/// `OP_HASH160 <20-byte hash> OP_EQUAL`.
pub fn is_p2sh(script: &Script) -> bool {
    let b = script.as_bytes();
    b.len() == 23 && b[0] == OP_HASH160.0 && b[1] == 0x14 && b[22] == OP_EQUAL.0
}

/// A 1-byte small-int push opcode followed by a 2-to-40-byte data push.
pub fn is_witness_scriptpubkey(script: &Script) -> bool {
    let b = script.as_bytes();
    let size = b.len();
    if !(4..=42).contains(&size) {
        return false;
    }
    if !Opcode(b[0]).is_small_int() {
        return false;
    }
    b[1] as usize + 2 == size
}

/// The witness version encoded in the first cooked op, decoded as a small
/// integer. Caller must ensure the script is a witness scriptPubKey.
pub fn witness_version(script: &Script) -> Option<i64> {
    match crate::decoder::CookedIter::new(script).next()? {
        Ok(crate::decoder::CookedValue::Int(n)) => Some(n),
        _ => None,
    }
}

/// `00 14 <20 bytes>` — witness v0 P2WPKH scriptPubKey.
pub fn is_witness_v0_keyhash(script: &Script) -> bool {
    let b = script.as_bytes();
    b.len() == 22 && b[0] == 0x00 && b[1] == 0x14
}

/// `16 00 14 <20 bytes>` — witness v0 P2WPKH scriptSig nested in P2SH.
pub fn is_witness_v0_nested_keyhash(script: &Script) -> bool {
    let b = script.as_bytes();
    b.len() == 23 && b[0] == 0x16 && b[1] == 0x00 && b[2] == 0x14
}

/// `00 20 <32 bytes>` — witness v0 P2WSH scriptPubKey.
pub fn is_witness_v0_scripthash(script: &Script) -> bool {
    let b = script.as_bytes();
    b.len() == 34 && b[0] == 0x00 && b[1] == 0x20
}

/// `22 00 20 <32 bytes>` — witness v0 P2WSH scriptSig nested in P2SH.
pub fn is_witness_v0_nested_scripthash(script: &Script) -> bool {
    let b = script.as_bytes();
    b.len() == 35 && b[0] == 0x22 && b[1] == 0x00 && b[2] == 0x20
}

/// `true` iff every raw operation's opcode byte is `<= OP_16`. Note that
/// `OP_RESERVED` (0x50) counts as pushdata here, matching the reference
/// implementation; truncation or any other decode error makes this `false`.
pub fn is_push_only(script: &Script) -> bool {
    for op in RawIter::new(script) {
        match op {
            Ok(op) if op.opcode.0 > OP_16.0 => return false,
            Ok(_) => {}
            Err(_) => return false,
        }
    }
    true
}

/// `true` iff the script is non-empty and begins with `OP_RETURN`.
pub fn is_unspendable(script: &Script) -> bool {
    let b = script.as_bytes();
    !b.is_empty() && b[0] == OP_RETURN.0
}

/// `true` iff raw iteration completes without a truncation/decode error.
/// Invalid (unassigned) opcodes do not themselves make a script invalid.
pub fn is_valid(script: &Script) -> bool {
    RawIter::new(script).all(|op| op.is_ok())
}

/// `true` iff every push in the script uses the shortest legal encoding for
/// its payload length:
/// - a 1-byte payload whose value is `<= 16` must use `OP_n`, not a direct
///   1-byte push;
/// - a payload `< 0x4c` must use a direct push, not `OP_PUSHDATA1`;
/// - a payload `<= 0xff` must use `OP_PUSHDATA1`, not `OP_PUSHDATA2`;
/// - a payload `<= 0xffff` must use `OP_PUSHDATA2`, not `OP_PUSHDATA4`.
///
/// Not yet consensus-critical, but reproduced exactly including the
/// `<= 0xff`/`<= 0xffff` boundary literals (see design notes).
pub fn has_canonical_pushes(script: &Script) -> bool {
    for op in RawIter::new(script) {
        let op = match op {
            Ok(op) => op,
            Err(_) => return false,
        };
        if op.opcode.0 > OP_16.0 {
            continue;
        }
        if op.opcode.0 < OP_PUSHDATA1.0 && op.opcode.0 > 0 {
            if let Some(data) = &op.data {
                if data.len() == 1 && data[0] <= 16 {
                    return false;
                }
            }
        } else if op.opcode == OP_PUSHDATA1 {
            if let Some(data) = &op.data {
                if data.len() < OP_PUSHDATA1.0 as usize {
                    return false;
                }
            }
        } else if op.opcode == OP_PUSHDATA2 {
            if let Some(data) = &op.data {
                if data.len() <= 0xff {
                    return false;
                }
            }
        } else if op.opcode == OP_PUSHDATA4 {
            if let Some(data) = &op.data {
                if data.len() <= 0xffff {
                    return false;
                }
            }
        }
    }
    true
}

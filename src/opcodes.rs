//! The opcode byte table (C1).
//!
//! An [`Opcode`] is nothing more than an 8-bit value; the reference
//! implementation's per-byte object interning is a language artifact of its
//! origin and is dropped here (see design notes) in favor of a plain `Copy`
//! newtype plus two lookup functions standing in for the process-wide name
//! table.

use crate::error::{ConsensusError, Result};

/// A single script opcode byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Opcode(pub u8);

impl Opcode {
    /// `true` if this opcode pushes a small integer (`OP_0` or
    /// `OP_1..=OP_16`) directly onto the stack.
    pub fn is_small_int(self) -> bool {
        self.0 == OP_0.0 || (OP_1.0..=OP_16.0).contains(&self.0)
    }

    /// `true` if this is a push opcode (`OP_0` through `OP_PUSHDATA4`).
    pub fn is_push(self) -> bool {
        (0x01..=OP_PUSHDATA4.0).contains(&self.0)
    }

    /// `true` if this opcode is unconditionally invalid, even inside an
    /// unexecuted branch. Enforcement belongs to the interpreter; this crate
    /// only records membership.
    pub fn is_disabled(self) -> bool {
        DISABLED_OPCODES.contains(&self)
    }
}

impl From<u8> for Opcode {
    fn from(b: u8) -> Self {
        Opcode(b)
    }
}

impl From<Opcode> for u8 {
    fn from(op: Opcode) -> Self {
        op.0
    }
}

macro_rules! opcodes {
    ($($name:ident = $val:expr),+ $(,)?) => {
        $(pub const $name: Opcode = Opcode($val);)+
    };
}

// push value
opcodes! {
    OP_0 = 0x00,
    OP_PUSHDATA1 = 0x4c,
    OP_PUSHDATA2 = 0x4d,
    OP_PUSHDATA4 = 0x4e,
    OP_1NEGATE = 0x4f,
    OP_RESERVED = 0x50,
    OP_1 = 0x51,
    OP_2 = 0x52,
    OP_3 = 0x53,
    OP_4 = 0x54,
    OP_5 = 0x55,
    OP_6 = 0x56,
    OP_7 = 0x57,
    OP_8 = 0x58,
    OP_9 = 0x59,
    OP_10 = 0x5a,
    OP_11 = 0x5b,
    OP_12 = 0x5c,
    OP_13 = 0x5d,
    OP_14 = 0x5e,
    OP_15 = 0x5f,
    OP_16 = 0x60,
}

/// `OP_0` pushes an empty byte string, conventionally read as "false".
pub const OP_FALSE: Opcode = OP_0;
/// `OP_1` pushes the integer 1, conventionally read as "true".
pub const OP_TRUE: Opcode = OP_1;

// control
opcodes! {
    OP_NOP = 0x61,
    OP_VER = 0x62,
    OP_IF = 0x63,
    OP_NOTIF = 0x64,
    OP_VERIF = 0x65,
    OP_VERNOTIF = 0x66,
    OP_ELSE = 0x67,
    OP_ENDIF = 0x68,
    OP_VERIFY = 0x69,
    OP_RETURN = 0x6a,
}

// stack ops
opcodes! {
    OP_TOALTSTACK = 0x6b,
    OP_FROMALTSTACK = 0x6c,
    OP_2DROP = 0x6d,
    OP_2DUP = 0x6e,
    OP_3DUP = 0x6f,
    OP_2OVER = 0x70,
    OP_2ROT = 0x71,
    OP_2SWAP = 0x72,
    OP_IFDUP = 0x73,
    OP_DEPTH = 0x74,
    OP_DROP = 0x75,
    OP_DUP = 0x76,
    OP_NIP = 0x77,
    OP_OVER = 0x78,
    OP_PICK = 0x79,
    OP_ROLL = 0x7a,
    OP_ROT = 0x7b,
    OP_SWAP = 0x7c,
    OP_TUCK = 0x7d,
}

// splice ops
opcodes! {
    OP_CAT = 0x7e,
    OP_SUBSTR = 0x7f,
    OP_LEFT = 0x80,
    OP_RIGHT = 0x81,
    OP_SIZE = 0x82,
}

// bit logic
opcodes! {
    OP_INVERT = 0x83,
    OP_AND = 0x84,
    OP_OR = 0x85,
    OP_XOR = 0x86,
    OP_EQUAL = 0x87,
    OP_EQUALVERIFY = 0x88,
    OP_RESERVED1 = 0x89,
    OP_RESERVED2 = 0x8a,
}

// numeric
opcodes! {
    OP_1ADD = 0x8b,
    OP_1SUB = 0x8c,
    OP_2MUL = 0x8d,
    OP_2DIV = 0x8e,
    OP_NEGATE = 0x8f,
    OP_ABS = 0x90,
    OP_NOT = 0x91,
    OP_0NOTEQUAL = 0x92,
    OP_ADD = 0x93,
    OP_SUB = 0x94,
    OP_MUL = 0x95,
    OP_DIV = 0x96,
    OP_MOD = 0x97,
    OP_LSHIFT = 0x98,
    OP_RSHIFT = 0x99,
    OP_BOOLAND = 0x9a,
    OP_BOOLOR = 0x9b,
    OP_NUMEQUAL = 0x9c,
    OP_NUMEQUALVERIFY = 0x9d,
    OP_NUMNOTEQUAL = 0x9e,
    OP_LESSTHAN = 0x9f,
    OP_GREATERTHAN = 0xa0,
    OP_LESSTHANOREQUAL = 0xa1,
    OP_GREATERTHANOREQUAL = 0xa2,
    OP_MIN = 0xa3,
    OP_MAX = 0xa4,
    OP_WITHIN = 0xa5,
}

// crypto
opcodes! {
    OP_RIPEMD160 = 0xa6,
    OP_SHA1 = 0xa7,
    OP_SHA256 = 0xa8,
    OP_HASH160 = 0xa9,
    OP_HASH256 = 0xaa,
    OP_CODESEPARATOR = 0xab,
    OP_CHECKSIG = 0xac,
    OP_CHECKSIGVERIFY = 0xad,
    OP_CHECKMULTISIG = 0xae,
    OP_CHECKMULTISIGVERIFY = 0xaf,
}

// expansion
opcodes! {
    OP_NOP1 = 0xb0,
    OP_NOP2 = 0xb1,
    OP_NOP3 = 0xb2,
    OP_NOP4 = 0xb3,
    OP_NOP5 = 0xb4,
    OP_NOP6 = 0xb5,
    OP_NOP7 = 0xb6,
    OP_NOP8 = 0xb7,
    OP_NOP9 = 0xb8,
    OP_NOP10 = 0xb9,
}

/// Alias: BIP65 `CHECKLOCKTIMEVERIFY` reuses the `OP_NOP2` byte.
pub const OP_CHECKLOCKTIMEVERIFY: Opcode = OP_NOP2;
/// Alias: BIP112 `CHECKSEQUENCEVERIFY` reuses the `OP_NOP3` byte.
pub const OP_CHECKSEQUENCEVERIFY: Opcode = OP_NOP3;

/// Domain extension: asset metadata marker. Treated as an ordinary opaque
/// opcode by this crate; asset-payload parsing is an external concern.
pub const OP_EVR_ASSET: Opcode = Opcode(0xc0);

// template matching params (never appear on the wire; used by matchers
// external to this crate, recorded here for name-table completeness)
opcodes! {
    OP_SMALLINTEGER = 0xfa,
    OP_PUBKEYS = 0xfb,
    OP_PUBKEYHASH = 0xfd,
    OP_PUBKEY = 0xfe,
}

/// Placeholder for a byte with no defined meaning.
pub const OP_INVALIDOPCODE: Opcode = Opcode(0xff);

/// Opcodes that are invalid even inside an unexecuted `OP_IF` branch,
/// whether because they are permanently disabled or were never
/// implemented. Recorded for consumers; not enforced here (see spec §9).
pub const DISABLED_OPCODES: [Opcode; 17] = [
    OP_VERIF, OP_VERNOTIF, OP_CAT, OP_SUBSTR, OP_LEFT, OP_RIGHT, OP_INVERT, OP_AND, OP_OR, OP_XOR,
    OP_2MUL, OP_2DIV, OP_MUL, OP_DIV, OP_MOD, OP_LSHIFT, OP_RSHIFT,
];

/// Name for a given opcode byte, or `None` if the byte has no defined name
/// (renders as `"0x<hex>"` by convention at the call site).
pub fn opcode_name(op: Opcode) -> Option<&'static str> {
    Some(match op.0 {
        0x00 => "OP_0",
        0x4c => "OP_PUSHDATA1",
        0x4d => "OP_PUSHDATA2",
        0x4e => "OP_PUSHDATA4",
        0x4f => "OP_1NEGATE",
        0x50 => "OP_RESERVED",
        0x51 => "OP_1",
        0x52 => "OP_2",
        0x53 => "OP_3",
        0x54 => "OP_4",
        0x55 => "OP_5",
        0x56 => "OP_6",
        0x57 => "OP_7",
        0x58 => "OP_8",
        0x59 => "OP_9",
        0x5a => "OP_10",
        0x5b => "OP_11",
        0x5c => "OP_12",
        0x5d => "OP_13",
        0x5e => "OP_14",
        0x5f => "OP_15",
        0x60 => "OP_16",
        0x61 => "OP_NOP",
        0x62 => "OP_VER",
        0x63 => "OP_IF",
        0x64 => "OP_NOTIF",
        0x65 => "OP_VERIF",
        0x66 => "OP_VERNOTIF",
        0x67 => "OP_ELSE",
        0x68 => "OP_ENDIF",
        0x69 => "OP_VERIFY",
        0x6a => "OP_RETURN",
        0x6b => "OP_TOALTSTACK",
        0x6c => "OP_FROMALTSTACK",
        0x6d => "OP_2DROP",
        0x6e => "OP_2DUP",
        0x6f => "OP_3DUP",
        0x70 => "OP_2OVER",
        0x71 => "OP_2ROT",
        0x72 => "OP_2SWAP",
        0x73 => "OP_IFDUP",
        0x74 => "OP_DEPTH",
        0x75 => "OP_DROP",
        0x76 => "OP_DUP",
        0x77 => "OP_NIP",
        0x78 => "OP_OVER",
        0x79 => "OP_PICK",
        0x7a => "OP_ROLL",
        0x7b => "OP_ROT",
        0x7c => "OP_SWAP",
        0x7d => "OP_TUCK",
        0x7e => "OP_CAT",
        0x7f => "OP_SUBSTR",
        0x80 => "OP_LEFT",
        0x81 => "OP_RIGHT",
        0x82 => "OP_SIZE",
        0x83 => "OP_INVERT",
        0x84 => "OP_AND",
        0x85 => "OP_OR",
        0x86 => "OP_XOR",
        0x87 => "OP_EQUAL",
        0x88 => "OP_EQUALVERIFY",
        0x89 => "OP_RESERVED1",
        0x8a => "OP_RESERVED2",
        0x8b => "OP_1ADD",
        0x8c => "OP_1SUB",
        0x8d => "OP_2MUL",
        0x8e => "OP_2DIV",
        0x8f => "OP_NEGATE",
        0x90 => "OP_ABS",
        0x91 => "OP_NOT",
        0x92 => "OP_0NOTEQUAL",
        0x93 => "OP_ADD",
        0x94 => "OP_SUB",
        0x95 => "OP_MUL",
        0x96 => "OP_DIV",
        0x97 => "OP_MOD",
        0x98 => "OP_LSHIFT",
        0x99 => "OP_RSHIFT",
        0x9a => "OP_BOOLAND",
        0x9b => "OP_BOOLOR",
        0x9c => "OP_NUMEQUAL",
        0x9d => "OP_NUMEQUALVERIFY",
        0x9e => "OP_NUMNOTEQUAL",
        0x9f => "OP_LESSTHAN",
        0xa0 => "OP_GREATERTHAN",
        0xa1 => "OP_LESSTHANOREQUAL",
        0xa2 => "OP_GREATERTHANOREQUAL",
        0xa3 => "OP_MIN",
        0xa4 => "OP_MAX",
        0xa5 => "OP_WITHIN",
        0xa6 => "OP_RIPEMD160",
        0xa7 => "OP_SHA1",
        0xa8 => "OP_SHA256",
        0xa9 => "OP_HASH160",
        0xaa => "OP_HASH256",
        0xab => "OP_CODESEPARATOR",
        0xac => "OP_CHECKSIG",
        0xad => "OP_CHECKSIGVERIFY",
        0xae => "OP_CHECKMULTISIG",
        0xaf => "OP_CHECKMULTISIGVERIFY",
        0xb0 => "OP_NOP1",
        0xb1 => "OP_NOP2",
        0xb2 => "OP_NOP3",
        0xb3 => "OP_NOP4",
        0xb4 => "OP_NOP5",
        0xb5 => "OP_NOP6",
        0xb6 => "OP_NOP7",
        0xb7 => "OP_NOP8",
        0xb8 => "OP_NOP9",
        0xb9 => "OP_NOP10",
        0xc0 => "OP_EVR_ASSET",
        0xfa => "OP_SMALLINTEGER",
        0xfb => "OP_PUBKEYS",
        0xfd => "OP_PUBKEYHASH",
        0xfe => "OP_PUBKEY",
        0xff => "OP_INVALIDOPCODE",
        _ => return None,
    })
}

/// Inverse of [`opcode_name`]. Note that `OP_FALSE`/`OP_TRUE`/
/// `OP_CHECKLOCKTIMEVERIFY`/`OP_CHECKSEQUENCEVERIFY` are aliases and are not
/// distinct entries here (they map back to `OP_0`/`OP_1`/`OP_NOP2`/
/// `OP_NOP3` under their primary names, matching the source table).
pub fn opcode_by_name(name: &str) -> Option<Opcode> {
    (0u8..=0xffu8).find(|&b| opcode_name(Opcode(b)) == Some(name)).map(Opcode)
}

/// `encode_op_n(0) = OP_0`, `encode_op_n(n) = OP_1 + n - 1` for `1 <= n <= 16`.
pub fn encode_op_n(n: u8) -> Result<Opcode> {
    if n > 16 {
        return Err(ConsensusError::EncodingOutOfRange(format!(
            "encode_op_n: {} not in [0, 16]",
            n
        )));
    }
    Ok(if n == 0 { OP_0 } else { Opcode(OP_1.0 + n - 1) })
}

/// Inverse of [`encode_op_n`]: `OP_0 -> 0`, `OP_1..=OP_16 -> 1..=16`.
pub fn decode_op_n(op: Opcode) -> Result<u8> {
    if op == OP_0 {
        return Ok(0);
    }
    if (OP_1.0..=OP_16.0).contains(&op.0) {
        return Ok(op.0 - OP_1.0 + 1);
    }
    Err(ConsensusError::EncodingOutOfRange(format!(
        "{:?} is not an OP_N",
        op
    )))
}

/// Choose the smallest pushdata encoding that fits `data`, returning the
/// complete opcode(+length-prefix)+data byte sequence.
///
/// Note that non-minimal encodings (e.g. `OP_PUSHDATA2` for 3 bytes) are
/// legal to construct directly from bytes; only this function's own choice
/// is guaranteed minimal, and only this function's output is guaranteed to
/// pass [`crate::predicates::has_canonical_pushes`].
pub fn encode_op_pushdata(data: &[u8]) -> Result<Vec<u8>> {
    let len = data.len();
    let mut out = Vec::with_capacity(len + 5);
    if len < 0x4c {
        out.push(len as u8);
    } else if len <= 0xff {
        out.push(OP_PUSHDATA1.0);
        out.push(len as u8);
    } else if len <= 0xffff {
        out.push(OP_PUSHDATA2.0);
        out.extend_from_slice(&(len as u16).to_le_bytes());
    } else if len <= 0xffff_ffff {
        out.push(OP_PUSHDATA4.0);
        out.extend_from_slice(&(len as u32).to_le_bytes());
    } else {
        return Err(ConsensusError::EncodingOutOfRange(
            "data too long to encode in a PUSHDATA op".to_string(),
        ));
    }
    out.extend_from_slice(data);
    Ok(out)
}

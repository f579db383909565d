//! Script and signature-hash limits and flag values.
//!
//! Trimmed to what this crate's scope actually touches: script byte-length
//! and element-size limits, the opcode-count limit the external interpreter
//! enforces, segwit v0 witness-program lengths, and the sighash flag/
//! sigversion byte values from the on-wire contract.

/// Maximum serialized script length.
pub const MAX_SCRIPT_SIZE: usize = 10_000;

/// Maximum size of a single pushed data element when consensus-relevant
/// (e.g. a P2SH redeem script).
pub const MAX_SCRIPT_ELEMENT_SIZE: usize = 520;

/// Maximum number of non-push opcodes in a script. Defined here for
/// consumers; enforcement belongs to the external script interpreter.
pub const MAX_SCRIPT_OPCODES: usize = 201;

/// Witness v0 P2WPKH program length.
pub const SEGWIT_P2WPKH_LENGTH: usize = 20;

/// Witness v0 P2WSH program length.
pub const SEGWIT_P2WSH_LENGTH: usize = 32;

/// Sign all inputs and all outputs.
pub const SIGHASH_ALL: u8 = 1;
/// Sign all inputs and no outputs.
pub const SIGHASH_NONE: u8 = 2;
/// Sign all inputs and only the output at the same index as the input.
pub const SIGHASH_SINGLE: u8 = 3;
/// Modifier: sign only the input being hashed, not the rest of `vin`.
pub const SIGHASH_ANYONECANPAY: u8 = 0x80;

/// Pre-segwit signature-hash algorithm.
pub const SIGVERSION_BASE: u8 = 0;
/// BIP-143 segwit v0 signature-hash algorithm.
pub const SIGVERSION_WITNESS_V0: u8 = 1;

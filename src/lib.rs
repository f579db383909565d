//! A consensus-compatible script and signature-hash library for an
//! Evrmore/Ravencoin-family UTXO cryptocurrency.
//!
//! This crate covers the opaque byte-sequence representation of a script,
//! lossless opcode/pushdata encoding and decoding, structural predicates
//! recognizing standard output and witness templates, the consensus-critical
//! transaction signature-hash computation (legacy and BIP-143 segwit v0),
//! and helpers for common redeem scripts.
//!
//! Out of scope: executing scripts (the stack machine interpreter),
//! validating signatures, parsing asset payloads, and full transaction or
//! block validation. [`transaction::Transaction`] here is only the narrow
//! view the signature-hash engine needs, not a validator.

pub mod builders;
pub mod constants;
pub mod decoder;
pub mod error;
pub mod find_and_delete;
pub mod hash;
pub mod opcodes;
pub mod predicates;
pub mod script;
pub mod serialization;
pub mod sighash;
pub mod sigops;
pub mod transaction;

pub use error::{ConsensusError, Result};
pub use opcodes::Opcode;
pub use script::{Script, ScriptItem};

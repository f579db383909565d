//! The narrow external transaction-view contract this crate drives (§6).
//!
//! This is not transaction validation: just the shape the signature-hash
//! engine needs, plus the wire serializer it calls.

use crate::script::Script;
use crate::serialization::{encode_var_bytes, encode_varint};
use serde::{Deserialize, Serialize};

/// A reference to a previous output: the 32-byte transaction id and the
/// output index within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutPoint {
    pub hash: [u8; 32],
    pub index: u32,
}

impl OutPoint {
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(36);
        out.extend_from_slice(&self.hash);
        out.extend_from_slice(&self.index.to_le_bytes());
        out
    }
}

/// One transaction input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxIn {
    pub prevout: OutPoint,
    pub script_sig: Script,
    pub sequence: u32,
}

/// One transaction output. The default/null output (value `-1`, empty
/// script) is what `SIGHASH_SINGLE` left-pads with when truncating `vout`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOut {
    pub value: i64,
    pub script_pubkey: Script,
}

impl TxOut {
    /// The default output used to left-pad `vout` under `SIGHASH_SINGLE`:
    /// value `-1`, empty script.
    pub fn default_null() -> Self {
        TxOut { value: -1, script_pubkey: Script::from_bytes(Vec::new()) }
    }

    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(8 + self.script_pubkey.len() + 9);
        out.extend_from_slice(&self.value.to_le_bytes());
        out.extend_from_slice(&encode_var_bytes(self.script_pubkey.as_bytes()));
        out
    }
}

/// The witness stack attached to one input. `is_null()` mirrors the
/// original's `CScriptWitness`: an empty stack signals "no witness data for
/// this input".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptWitness {
    pub stack: Vec<Vec<u8>>,
}

impl ScriptWitness {
    pub fn is_null(&self) -> bool {
        self.stack.is_empty()
    }
}

/// The witness data for a whole transaction: one stack per input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxWitness {
    pub inputs: Vec<ScriptWitness>,
}

impl TxWitness {
    pub fn is_null(&self) -> bool {
        self.inputs.iter().all(ScriptWitness::is_null)
    }
}

/// The transaction view the signature-hash engine is driven by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub version: i32,
    pub inputs: Vec<TxIn>,
    pub outputs: Vec<TxOut>,
    pub lock_time: i32,
    #[serde(default)]
    pub witness: TxWitness,
}

impl Transaction {
    /// Serialize the transaction in full, embedding all inputs, outputs,
    /// version, and locktime. Witness data is never embedded by this
    /// serializer: the legacy sighash preimage clears witness on its working
    /// copy before calling this, and the segwit-v0 preimage never serializes
    /// the whole transaction at all (see `sighash.rs`).
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&self.version.to_le_bytes());
        out.extend_from_slice(&encode_varint(self.inputs.len() as u64));
        for input in &self.inputs {
            out.extend_from_slice(&input.prevout.serialize());
            out.extend_from_slice(&encode_var_bytes(input.script_sig.as_bytes()));
            out.extend_from_slice(&input.sequence.to_le_bytes());
        }
        out.extend_from_slice(&encode_varint(self.outputs.len() as u64));
        for output in &self.outputs {
            out.extend_from_slice(&output.serialize());
        }
        out.extend_from_slice(&self.lock_time.to_le_bytes());
        out
    }
}

//! Raw and cooked script iteration (C3).

use crate::error::ConsensusError;
use crate::opcodes::{Opcode, OP_0, OP_PUSHDATA1, OP_PUSHDATA2, OP_PUSHDATA4};
use crate::script::Script;

/// One raw operation: the opcode byte, its attached push data (if any), and
/// the byte offset at which the operation started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawOp {
    pub opcode: Opcode,
    pub data: Option<Vec<u8>>,
    pub offset: usize,
}

/// Iterates a script's raw byte stream, yielding one [`RawOp`] per opcode
/// (with its attached push data, if it is a push opcode).
///
/// Truncation (a declared push length longer than the remaining bytes, or a
/// PUSHDATA length prefix with not enough bytes to read it) ends iteration
/// with exactly one `TruncatedPushData` error, carrying the partial bytes
/// actually read.
pub struct RawIter<'a> {
    bytes: &'a [u8],
    pos: usize,
    errored: bool,
}

impl<'a> RawIter<'a> {
    pub fn new(script: &'a Script) -> Self {
        RawIter { bytes: script.as_bytes(), pos: 0, errored: false }
    }
}

impl<'a> Iterator for RawIter<'a> {
    type Item = Result<RawOp, ConsensusError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.errored || self.pos >= self.bytes.len() {
            return None;
        }

        let sop_idx = self.pos;
        let opcode = Opcode(self.bytes[self.pos]);
        self.pos += 1;

        if opcode.0 > OP_PUSHDATA4.0 {
            return Some(Ok(RawOp { opcode, data: None, offset: sop_idx }));
        }

        let datasize: usize = if opcode.0 < OP_PUSHDATA1.0 {
            opcode.0 as usize
        } else if opcode == OP_PUSHDATA1 {
            match self.bytes.get(self.pos) {
                Some(&b) => {
                    self.pos += 1;
                    b as usize
                }
                None => {
                    self.errored = true;
                    return Some(Err(ConsensusError::InvalidScript(
                        "PUSHDATA1: missing data length".to_string(),
                    )));
                }
            }
        } else if opcode == OP_PUSHDATA2 {
            if self.pos + 2 > self.bytes.len() {
                self.errored = true;
                return Some(Err(ConsensusError::InvalidScript(
                    "PUSHDATA2: missing data length".to_string(),
                )));
            }
            let n = u16::from_le_bytes([self.bytes[self.pos], self.bytes[self.pos + 1]]);
            self.pos += 2;
            n as usize
        } else {
            // OP_PUSHDATA4
            if self.pos + 4 > self.bytes.len() {
                self.errored = true;
                return Some(Err(ConsensusError::InvalidScript(
                    "PUSHDATA4: missing data length".to_string(),
                )));
            }
            let n = u32::from_le_bytes([
                self.bytes[self.pos],
                self.bytes[self.pos + 1],
                self.bytes[self.pos + 2],
                self.bytes[self.pos + 3],
            ]);
            self.pos += 4;
            n as usize
        };

        let available = self.bytes.len() - self.pos;
        if datasize > available {
            self.errored = true;
            let partial = self.bytes[self.pos..].to_vec();
            return Some(Err(ConsensusError::TruncatedPushData(partial)));
        }

        let data = self.bytes[self.pos..self.pos + datasize].to_vec();
        self.pos += datasize;
        Some(Ok(RawOp { opcode, data: Some(data), offset: sop_idx }))
    }
}

/// A "cooked" decoded value: the semantic meaning of one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CookedValue {
    /// `OP_0`, or `OP_1..=OP_16`/`OP_1NEGATE` decoded to their integer value.
    Int(i64),
    /// The attached bytes of any push operation (other than `OP_0`).
    Data(Vec<u8>),
    /// Any other opcode, yielded as-is.
    Op(Opcode),
}

/// Iterates a script's semantic values: pushed data as bytes, small
/// integers and `OP_1NEGATE` as integers, everything else as the raw
/// opcode.
pub struct CookedIter<'a> {
    raw: RawIter<'a>,
}

impl<'a> CookedIter<'a> {
    pub fn new(script: &'a Script) -> Self {
        CookedIter { raw: RawIter::new(script) }
    }
}

impl<'a> Iterator for CookedIter<'a> {
    type Item = Result<CookedValue, ConsensusError>;

    fn next(&mut self) -> Option<Self::Item> {
        let raw_op = self.raw.next()?;
        Some(raw_op.map(|op| {
            if op.opcode == OP_0 {
                CookedValue::Int(0)
            } else if let Some(data) = op.data {
                CookedValue::Data(data)
            } else if op.opcode == crate::opcodes::OP_1NEGATE {
                CookedValue::Int(-1)
            } else if op.opcode.is_small_int() {
                CookedValue::Int(crate::opcodes::decode_op_n(op.opcode).unwrap() as i64)
            } else {
                CookedValue::Op(op.opcode)
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opcodes::*;

    #[test]
    fn raw_iter_direct_push() {
        let s = Script::from_bytes(vec![0x03, 0xaa, 0xbb, 0xcc, OP_DUP.0]);
        let ops: Vec<_> = RawIter::new(&s).collect::<Result<_, _>>().unwrap();
        assert_eq!(ops.len(), 2);
        assert_eq!(ops[0].data, Some(vec![0xaa, 0xbb, 0xcc]));
        assert_eq!(ops[1].opcode, OP_DUP);
        assert_eq!(ops[1].offset, 4);
    }

    #[test]
    fn raw_iter_pushdata1() {
        let mut bytes = vec![OP_PUSHDATA1.0, 2, 0x11, 0x22];
        bytes.push(OP_DUP.0);
        let s = Script::from_bytes(bytes);
        let ops: Vec<_> = RawIter::new(&s).collect::<Result<_, _>>().unwrap();
        assert_eq!(ops[0].data, Some(vec![0x11, 0x22]));
    }

    #[test]
    fn raw_iter_truncated_push() {
        let s = Script::from_bytes(vec![0x05, 0xaa, 0xbb]);
        let mut it = RawIter::new(&s);
        match it.next().unwrap() {
            Err(ConsensusError::TruncatedPushData(partial)) => {
                assert_eq!(partial, vec![0xaa, 0xbb]);
            }
            other => panic!("expected TruncatedPushData, got {other:?}"),
        }
        assert!(it.next().is_none());
    }

    #[test]
    fn raw_iter_truncated_length_prefix() {
        let s = Script::from_bytes(vec![OP_PUSHDATA2.0, 0x01]);
        let mut it = RawIter::new(&s);
        assert!(matches!(it.next(), Some(Err(ConsensusError::InvalidScript(_)))));
    }

    #[test]
    fn cooked_iter_decodes_semantics() {
        let s = Script::from_bytes(vec![OP_0.0, OP_5.0, OP_1NEGATE.0, 0x02, 0x01, 0x02, OP_DUP.0]);
        let vals: Vec<_> = CookedIter::new(&s).collect::<Result<_, _>>().unwrap();
        assert_eq!(
            vals,
            vec![
                CookedValue::Int(0),
                CookedValue::Int(5),
                CookedValue::Int(-1),
                CookedValue::Data(vec![0x01, 0x02]),
                CookedValue::Op(OP_DUP),
            ]
        );
    }

    #[test]
    fn decoder_totality() {
        // Any byte sequence either fully decodes or yields exactly one error.
        for bytes in [vec![0x4c], vec![0x4d, 0x05], vec![0x01], vec![]] {
            let s = Script::from_bytes(bytes);
            let mut saw_error = false;
            for res in RawIter::new(&s) {
                if res.is_err() {
                    assert!(!saw_error, "more than one error observed");
                    saw_error = true;
                }
            }
        }
    }

    use proptest::prelude::*;

    proptest! {
        /// Property 4 (spec §8): raw iteration over any byte sequence either
        /// terminates successfully or raises exactly one truncation error.
        #[test]
        fn prop_decoder_totality(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
            let s = Script::from_bytes(bytes);
            let mut saw_error = false;
            for res in RawIter::new(&s) {
                if res.is_err() {
                    prop_assert!(!saw_error, "more than one error observed");
                    saw_error = true;
                }
            }
        }

        /// Property 1 (spec §8): decoding `encode_op_pushdata(d)` yields one
        /// push whose attached data equals `d`.
        #[test]
        fn prop_pushdata_roundtrip(data in prop::collection::vec(any::<u8>(), 0..600)) {
            let encoded = crate::opcodes::encode_op_pushdata(&data).unwrap();
            let s = Script::from_bytes(encoded);
            let ops: Vec<_> = RawIter::new(&s).collect::<Result<_, _>>().unwrap();
            prop_assert_eq!(ops.len(), 1);
            prop_assert_eq!(ops[0].data.clone(), Some(data));
        }
    }
}

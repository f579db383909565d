//! Weighted opcode tally used by consensus fee/weight accounting (C5).

use crate::decoder::RawIter;
use crate::opcodes::{decode_op_n, OP_1, OP_16, OP_CHECKMULTISIG, OP_CHECKMULTISIGVERIFY, OP_CHECKSIG, OP_CHECKSIGVERIFY, OP_INVALIDOPCODE};
use crate::script::Script;

/// Count signature-checking opcodes in `script`.
///
/// `OP_CHECKSIG(VERIFY)` counts as 1. `OP_CHECKMULTISIG(VERIFY)` counts as
/// `decode_op_n(lastOpcode)` when `f_accurate` is set and the immediately
/// preceding opcode was `OP_1..=OP_16`; otherwise it counts as a flat 20
/// (the conservative assumption when the multisig's `n` can't be read off
/// the preceding opcode). Truncated/invalid scripts are tallied up to the
/// point of truncation.
pub fn get_sig_op_count(script: &Script, f_accurate: bool) -> usize {
    let mut n = 0usize;
    let mut last_opcode = OP_INVALIDOPCODE;
    for op in RawIter::new(script) {
        let op = match op {
            Ok(op) => op,
            Err(_) => break,
        };
        if op.opcode == OP_CHECKSIG || op.opcode == OP_CHECKSIGVERIFY {
            n += 1;
        } else if op.opcode == OP_CHECKMULTISIG || op.opcode == OP_CHECKMULTISIGVERIFY {
            if f_accurate && (OP_1.0..=OP_16.0).contains(&last_opcode.0) {
                n += decode_op_n(last_opcode).unwrap_or(20) as usize;
            } else {
                n += 20;
            }
        }
        last_opcode = op.opcode;
    }
    n
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::create_multisig_redeem_script;
    use crate::opcodes::*;

    #[test]
    fn checksig_counts_one() {
        let s = Script::from_bytes(vec![OP_CHECKSIG.0]);
        assert_eq!(get_sig_op_count(&s, true), 1);
        assert_eq!(get_sig_op_count(&s, false), 1);
    }

    #[test]
    fn accurate_multisig_uses_preceding_op_n() {
        let pubkeys = vec![vec![0xaa; 33], vec![0xbb; 33], vec![0xcc; 33]];
        let refs: Vec<&[u8]> = pubkeys.iter().map(|p| p.as_slice()).collect();
        let script = create_multisig_redeem_script(2, &refs).unwrap();
        assert_eq!(get_sig_op_count(&script, true), 3);
        assert_eq!(get_sig_op_count(&script, false), 20);
    }

    #[test]
    fn inaccurate_multisig_without_preceding_op_n_is_20() {
        let s = Script::from_bytes(vec![OP_DUP.0, OP_CHECKMULTISIG.0]);
        assert_eq!(get_sig_op_count(&s, true), 20);
    }

    #[test]
    fn last_opcode_updates_on_every_step_including_pushes() {
        // OP_2 then a data push then CHECKMULTISIG: lastOpcode is the push,
        // not OP_2, so the accurate count falls back to 20.
        let s = Script::from_bytes(vec![OP_2.0, 0x01, 0xaa, OP_CHECKMULTISIG.0]);
        assert_eq!(get_sig_op_count(&s, true), 20);
    }

    use proptest::prelude::*;

    proptest! {
        /// Property 8 (spec §8): in `[OP_n, pubkeys.., OP_n, OP_CHECKMULTISIG]`,
        /// accurate counting reads `n` off the preceding opcode and inaccurate
        /// counting always charges the flat 20.
        #[test]
        fn prop_sigop_weighting(n in 1u8..=16, m in 1u8..=16) {
            let pubkeys: Vec<Vec<u8>> = (0..m).map(|_| vec![0xaa; 33]).collect();
            let refs: Vec<&[u8]> = pubkeys.iter().map(|v| v.as_slice()).collect();
            let required = n.min(m);
            let script = crate::builders::create_multisig_redeem_script(required, &refs).unwrap();
            prop_assert_eq!(get_sig_op_count(&script, true), required as usize);
            prop_assert_eq!(get_sig_op_count(&script, false), 20);
        }
    }
}

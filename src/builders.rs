//! Constructors for common redeem scripts (C8).

use crate::constants::MAX_SCRIPT_ELEMENT_SIZE;
use crate::error::{ConsensusError, Result};
use crate::hash::hash160;
use crate::opcodes::{OP_CHECKMULTISIG, OP_EQUAL, OP_HASH160};
use crate::script::{Script, ScriptItem};

/// Build an `m`-of-`n` multisig redeem script:
/// `[m, pubkey_1, .., pubkey_n, n, OP_CHECKMULTISIG]`, with `m` and `n`
/// rendered through the minimal `OP_n` encoding.
///
/// Requires `0 <= m <= n <= 16`.
pub fn create_multisig_redeem_script(required: u8, pubkeys: &[&[u8]]) -> Result<Script> {
    let n = pubkeys.len();
    if n > 16 || required as usize > n {
        return Err(ConsensusError::BuilderError(format!(
            "invalid number of required signatures ({required}) or public keys ({n})"
        )));
    }

    let mut items = vec![ScriptItem::Int(required as i64)];
    for pk in pubkeys {
        items.push(ScriptItem::Data(pk));
    }
    items.push(ScriptItem::Int(n as i64));
    items.push(ScriptItem::Op(OP_CHECKMULTISIG));
    Script::from_items(&items)
}

/// Build the P2SH scriptPubKey that requires `redeem_script` to spend:
/// `OP_HASH160 <20-byte hash> OP_EQUAL`.
///
/// When `checksize` is `true` (the recommended default), refuses redeem
/// scripts longer than `MAX_SCRIPT_ELEMENT_SIZE`: a P2SH output whose
/// redeem script can't fit a single pushdata can never actually be spent,
/// since the interpreter rejects that push outright.
pub fn to_p2sh_script_pubkey(redeem_script: &Script, checksize: bool) -> Result<Script> {
    if checksize && redeem_script.len() > MAX_SCRIPT_ELEMENT_SIZE {
        return Err(ConsensusError::BuilderError(
            "redeemScript exceeds max allowed size; P2SH output would be unspendable".to_string(),
        ));
    }
    let hash = hash160(redeem_script.as_bytes());
    Script::from_items(&[
        ScriptItem::Op(OP_HASH160),
        ScriptItem::Data(&hash),
        ScriptItem::Op(OP_EQUAL),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opcodes::*;
    use crate::predicates::is_p2sh;

    #[test]
    fn multisig_builder_emits_expected_bytes() {
        let pk1 = vec![0x02u8; 33];
        let pk2 = vec![0x03u8; 33];
        let pk3 = vec![0x04u8; 33];
        let pubkeys: Vec<&[u8]> = vec![&pk1, &pk2, &pk3];
        let script = create_multisig_redeem_script(2, &pubkeys).unwrap();

        let mut expected = vec![OP_2.0];
        for pk in &pubkeys {
            expected.push(0x21);
            expected.extend_from_slice(pk);
        }
        expected.push(OP_3.0);
        expected.push(OP_CHECKMULTISIG.0);
        assert_eq!(script.as_bytes(), expected.as_slice());
    }

    #[test]
    fn multisig_builder_rejects_too_many_required() {
        let pk = vec![0x02u8; 33];
        assert!(create_multisig_redeem_script(2, &[&pk]).is_err());
        let seventeen: Vec<Vec<u8>> = (0..17).map(|_| vec![0x02u8; 33]).collect();
        let refs: Vec<&[u8]> = seventeen.iter().map(|v| v.as_slice()).collect();
        assert!(create_multisig_redeem_script(1, &refs).is_err());
    }

    #[test]
    fn p2sh_wrapper_produces_recognizable_template() {
        let redeem = Script::from_bytes(vec![OP_1.0, OP_CHECKSIG.0]);
        let wrapped = to_p2sh_script_pubkey(&redeem, true).unwrap();
        assert!(is_p2sh(&wrapped));
    }

    #[test]
    fn p2sh_wrapper_rejects_oversized_redeem_when_checked() {
        let redeem = Script::from_bytes(vec![0u8; 521]);
        assert!(to_p2sh_script_pubkey(&redeem, true).is_err());
        assert!(to_p2sh_script_pubkey(&redeem, false).is_ok());
    }
}

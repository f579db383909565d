//! Byte-level removal of exact operation-aligned occurrences of a sub-script (C6).

use crate::decoder::RawIter;
use crate::script::Script;

/// Return a new script equal to `script` with every occurrence of `needle`
/// that is exactly aligned to an operation boundary removed.
///
/// Alignment is checked at each raw-iteration operation's start offset: if
/// the bytes of `script` starting there equal `needle` byte-for-byte, the
/// entire operation at that offset is dropped and the scan resumes at the
/// next operation boundary (so consecutive matches are each deleted). This
/// is deliberately not "remove occurrences of the substring" — a match that
/// starts mid-operation is not a match.
pub fn find_and_delete(script: &Script, needle: &Script) -> Script {
    let bytes = script.as_bytes();
    let needle_bytes = needle.as_bytes();
    let mut out = Vec::new();
    let mut last_sop_idx = 0usize;
    let mut skip = true;

    for op in RawIter::new(script) {
        let Ok(op) = op else { break };
        let sop_idx = op.offset;
        if !skip {
            out.extend_from_slice(&bytes[last_sop_idx..sop_idx]);
        }
        last_sop_idx = sop_idx;
        let end = sop_idx + needle_bytes.len();
        skip = end <= bytes.len() && &bytes[sop_idx..end] == needle_bytes;
    }
    if !skip {
        out.extend_from_slice(&bytes[last_sop_idx..]);
    }
    Script::from_bytes(out)
}

//! Error types for script decoding, encoding, and signature-hash computation.

use thiserror::Error;

/// Result alias used throughout this crate.
pub type Result<T> = std::result::Result<T, ConsensusError>;

/// Errors raised by script decoding, builder coercion, and signature-hash
/// computation.
///
/// `TruncatedPushData` and `SigHashOutOfRange` carry the partial data/context
/// a caller needs to reproduce the reference implementation's consensus-
/// visible quirks; the other variants are plain reporting.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConsensusError {
    /// General script corruption other than a truncated push (e.g. a
    /// PUSHDATA length prefix with no bytes left to read it from).
    #[error("invalid script: {0}")]
    InvalidScript(String),

    /// A push declared more bytes than were actually present. Carries the
    /// partial payload that was read before truncation was detected.
    #[error("truncated push data: {0} partial bytes")]
    TruncatedPushData(Vec<u8>),

    /// Encoding input fell outside the representable range: data longer
    /// than `u32::MAX` bytes for a pushdata, or `encode_op_n` called
    /// outside `[0, 16]`.
    #[error("encoding out of range: {0}")]
    EncodingOutOfRange(String),

    /// The legacy signature-hash engine's cooked wrapper observed an
    /// out-of-range input or output index. The raw engine never raises
    /// this; it returns it as a side-channel alongside the sentinel digest.
    #[error("sighash index out of range: {0}")]
    SigHashOutOfRange(String),

    /// An unrecognized or malformed sighash type byte.
    #[error("invalid sighash type byte: 0x{0:02x}")]
    InvalidSighashType(u8),

    /// An input index referenced a transaction input that doesn't exist.
    #[error("invalid input index: {0}")]
    InvalidInputIndex(usize),

    /// Builder misuse: `CreateMultisigRedeemScript` with `m` or `n` outside
    /// `[0, 16]`, or a redeem script exceeding `MAX_SCRIPT_ELEMENT_SIZE`
    /// when `to_p2sh_script_pubkey` is asked to check the size.
    #[error("builder error: {0}")]
    BuilderError(String),
}

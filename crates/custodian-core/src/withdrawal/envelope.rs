//! Parsing the two pieces of metadata a withdrawal transaction carries
//! inline, outside of the execution payload itself (§4.6 step 1-2).

use thiserror::Error;

use crate::types::payload::PayloadKind;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EnvelopeError {
    #[error("transaction is too short to carry an execution-hash envelope: needed {needed} bytes, got {got}")]
    Truncated { needed: usize, got: usize },

    #[error("execution-hash envelope is not valid hex-ASCII")]
    NotHex,

    #[error("payload-kind tag {tag} does not name a known payload kind")]
    UnknownTag { tag: u64 },
}

const HASH_ENVELOPE_LEN: usize = 68;
const HASH_PREFIX_LEN: usize = 2;
const HASH_HEX_LEN: usize = 64;
const HASH_SUFFIX_LEN: usize = 2;

const PAYLOAD_KIND_OFFSET: usize = 73;
const PAYLOAD_KIND_LEN: usize = 8;

/// Read the keccak256 execution hash embedded in the last 68 bytes of a
/// transaction: 2 bytes of framing, 64 bytes of hex-ASCII digest, 2 more
/// bytes of framing.
pub fn parse_execution_hash(tx: &[u8]) -> Result<[u8; 32], EnvelopeError> {
    if tx.len() < HASH_ENVELOPE_LEN {
        return Err(EnvelopeError::Truncated { needed: HASH_ENVELOPE_LEN, got: tx.len() });
    }
    let envelope = &tx[tx.len() - HASH_ENVELOPE_LEN..];
    let hex_ascii = &envelope[HASH_PREFIX_LEN..HASH_PREFIX_LEN + HASH_HEX_LEN];
    debug_assert_eq!(envelope.len(), HASH_PREFIX_LEN + HASH_HEX_LEN + HASH_SUFFIX_LEN);

    let decoded = hex::decode(hex_ascii).map_err(|_| EnvelopeError::NotHex)?;
    let mut digest = [0u8; 32];
    digest.copy_from_slice(&decoded);
    Ok(digest)
}

/// Read the payload-kind discriminator at byte offset 73.
pub fn parse_payload_kind(tx: &[u8]) -> Result<PayloadKind, EnvelopeError> {
    let needed = PAYLOAD_KIND_OFFSET + PAYLOAD_KIND_LEN;
    if tx.len() < needed {
        return Err(EnvelopeError::Truncated { needed, got: tx.len() });
    }
    let mut tag_bytes = [0u8; 8];
    tag_bytes.copy_from_slice(&tx[PAYLOAD_KIND_OFFSET..PAYLOAD_KIND_OFFSET + PAYLOAD_KIND_LEN]);
    let tag = u64::from_le_bytes(tag_bytes);
    PayloadKind::from_tag(tag).ok_or(EnvelopeError::UnknownTag { tag })
}

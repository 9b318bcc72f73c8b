//! `MerkleVerifier::verifyCommitment` (§4.4): proving a transaction was
//! committed in a block's `commit_merkle_root`.
//!
//! The proof has its own little wire format — `pathLen:8 ‖ (dir:4 ‖
//! sibling:32)*` — distinct from the header/payload codec, since it is
//! never exchanged as part of either of those structures.

use thiserror::Error;

use crate::crypto::keccak256;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MerkleError {
    #[error("block height {height} has no recorded commit root (tracked range starts at {height_offset})")]
    HeightOutOfRange { height: u64, height_offset: u64 },

    #[error("malformed merkle proof: truncated at step {at_step}")]
    Truncated { at_step: usize },

    #[error("malformed merkle proof: direction at step {at_step} must be 0 or 1, got {value}")]
    BadDirection { at_step: usize, value: u32 },

    #[error("computed root {computed} does not match the block's commit root {expected}")]
    RootMismatch { expected: String, computed: String },
}

struct ProofStep {
    direction: u32,
    sibling: [u8; 32],
}

fn decode_proof(bytes: &[u8]) -> Result<Vec<ProofStep>, MerkleError> {
    if bytes.len() < 8 {
        return Err(MerkleError::Truncated { at_step: 0 });
    }
    let mut path_len_bytes = [0u8; 8];
    path_len_bytes.copy_from_slice(&bytes[0..8]);
    let path_len = u64::from_le_bytes(path_len_bytes) as usize;

    let mut steps = Vec::with_capacity(path_len);
    let mut offset = 8usize;
    for i in 0..path_len {
        if bytes.len() < offset + 36 {
            return Err(MerkleError::Truncated { at_step: i });
        }
        let mut dir_bytes = [0u8; 4];
        dir_bytes.copy_from_slice(&bytes[offset..offset + 4]);
        let direction = u32::from_le_bytes(dir_bytes);

        let mut sibling = [0u8; 32];
        sibling.copy_from_slice(&bytes[offset + 4..offset + 36]);

        if direction > 1 {
            return Err(MerkleError::BadDirection { at_step: i, value: direction });
        }

        steps.push(ProofStep { direction, sibling });
        offset += 36;
    }

    Ok(steps)
}

/// Verify that `transaction_bytes` is committed in the commit root recorded
/// for `block_height`.
///
/// `dir == 0` means the sibling is the left child (`acc = H(sibling ‖
/// acc)`); `dir == 1` means the sibling is the right child (`acc = H(acc ‖
/// sibling)`) — per §4.4.
pub fn verify_commitment(
    transaction_bytes: &[u8],
    commit_roots: &[[u8; 32]],
    proof_bytes: &[u8],
    block_height: u64,
    height_offset: u64,
) -> Result<(), MerkleError> {
    if block_height < height_offset {
        return Err(MerkleError::HeightOutOfRange { height: block_height, height_offset });
    }
    let index = (block_height - height_offset) as usize;
    let expected_root = *commit_roots
        .get(index)
        .ok_or(MerkleError::HeightOutOfRange { height: block_height, height_offset })?;

    let steps = decode_proof(proof_bytes)?;

    let mut acc = keccak256(transaction_bytes);
    for step in &steps {
        acc = match step.direction {
            0 => {
                let mut buf = Vec::with_capacity(64);
                buf.extend_from_slice(&step.sibling);
                buf.extend_from_slice(&acc);
                keccak256(&buf)
            }
            1 => {
                let mut buf = Vec::with_capacity(64);
                buf.extend_from_slice(&acc);
                buf.extend_from_slice(&step.sibling);
                keccak256(&buf)
            }
            other => unreachable!("decode_proof rejects direction {other} before this point"),
        };
    }

    if acc == expected_root {
        Ok(())
    } else {
        Err(MerkleError::RootMismatch {
            expected: hex::encode(expected_root),
            computed: hex::encode(acc),
        })
    }
}

/// Encode a proof in the same layout `verify_commitment` reads — used by
/// tests and by hosts constructing fixtures.
pub fn encode_proof(steps: &[(u32, [u8; 32])]) -> Vec<u8> {
    let mut out = Vec::with_capacity(8 + steps.len() * 36);
    out.extend_from_slice(&(steps.len() as u64).to_le_bytes());
    for (direction, sibling) in steps {
        out.extend_from_slice(&direction.to_le_bytes());
        out.extend_from_slice(sibling);
    }
    out
}
